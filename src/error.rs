//! Error types for score evaluation.

use std::io;

use crate::stats::Stat;

/// Errors that can occur while evaluating scores.
///
/// Numeric singularities (zero denominators, logarithms of zero) are not
/// errors: denominators are biased by [`EPSILON`](crate::utils::EPSILON) and
/// interpretation metrics report the `-1` sentinel instead.
#[derive(Debug, thiserror::Error)]
pub enum ScorerError {
    #[error(
        "wrong shapes found: {n_true} true labels and {n_pred} predicted labels; \
         input arrays must have the same length"
    )]
    LengthMismatch { n_true: usize, n_pred: usize },

    #[error("the number of classes must be greater than 1, found {n_classes}")]
    DegenerateClasses { n_classes: usize },

    #[error("label of sample {sample} is not part of the class set")]
    UnknownLabel { sample: usize },

    #[error("scores not computed yet; call `evaluate` first")]
    NotComputed,

    #[error("statistic not found: {0}")]
    UnknownStat(String),

    #[error("invalid metric dependency table: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while layering the metric dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("{stat:?} depends on {dependency:?}, which is not part of the graph")]
    UnknownDependency { stat: Stat, dependency: Stat },

    #[error("{0:?} is registered more than once")]
    Duplicate(Stat),

    #[error("dependency cycle through {0:?}")]
    Cycle(Vec<Stat>),

    #[error("{0:?} is not part of the schedule")]
    Missing(Stat),
}

pub type Result<T, E = ScorerError> = std::result::Result<T, E>;
