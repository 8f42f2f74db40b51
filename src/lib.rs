//! scorer: Multi-class classification scores for Rust.
//!
//! Turns a pair of true/predicted label arrays into a confusion matrix and
//! the full catalog of per-class and overall statistics derived from it.
//! Statistics form a static dependency graph that is evaluated in stages,
//! in parallel where the stage allows.
//!
//! # Key Types
//!
//! - [`Scorer`] / [`evaluate`] - Run an evaluation
//! - [`ScorerConfig`] - Thread count and verbosity
//! - [`MetricSnapshot`] - Immutable result with typed accessors
//! - [`Stat`] - Identifier of every statistic, in report order
//! - [`Report`] - Text table and delimited-file rendering
//!
//! # Example
//!
//! ```
//! use scorer::{evaluate, Stat};
//!
//! let y_true = [2, 0, 2, 2, 0, 1, 1, 2, 2, 0, 1, 2];
//! let y_pred = [0, 0, 2, 1, 0, 2, 1, 0, 2, 0, 2, 2];
//! let snapshot = evaluate(&y_true, &y_pred).unwrap();
//!
//! assert_eq!(snapshot.class_stat(Stat::Ppv).len(), 3);
//! let kappa = snapshot.overall_stat(Stat::Kappa);
//! assert!((kappa - 0.35484).abs() < 1e-5);
//! ```
//!
//! See the [`stats`] module for the statistic registry and the
//! [`schedule`] module for how it is evaluated.

// Re-export approx traits for users who want to compare scores
pub use approx;

pub mod config;
pub mod confusion;
pub mod error;
pub mod logger;
pub mod report;
pub mod schedule;
pub mod scorer;
pub mod snapshot;
pub mod stats;
pub mod testing;
pub mod utils;

// =============================================================================
// Convenience Re-exports
// =============================================================================

// Entry points
pub use scorer::{evaluate, Scorer};
pub use snapshot::MetricSnapshot;

// Configuration and logging
pub use config::ScorerConfig;
pub use logger::{ScoreLogger, Verbosity};

// Inputs
pub use confusion::{ClassSet, ConfusionMatrix};

// Statistic registry
pub use schedule::Schedule;
pub use stats::benchmark::{
    Altman, AucQuality, Cicchetti, CramerStrength, DiscriminantPower, Fleiss, Interpretation,
    LandisKoch, LikelihoodRatioStrength, MatthewsStrength, NegativeLikelihoodStrength,
};
pub use stats::{Scope, Stat, StatValue};

// Reporting
pub use report::Report;

// Errors
pub use error::{Result, ScheduleError, ScorerError};

// Shared utilities
pub use utils::{run_with_threads, Parallelism};
