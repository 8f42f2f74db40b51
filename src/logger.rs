//! Structured evaluation logging.
//!
//! [`ScoreLogger`] emits `tracing` events gated by a [`Verbosity`] level.
//! The library never installs a subscriber; applications choose where the
//! events go.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::stats::Stat;

/// Verbosity level of an evaluation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Verbosity {
    /// No output.
    #[default]
    Silent,
    /// Per-class statistics that came out undefined (NaN or infinite).
    Warning,
    /// One summary line per evaluation.
    Info,
    /// One event per dependency stage.
    Debug,
}

/// Logger for a single evaluation.
#[derive(Debug)]
pub struct ScoreLogger {
    verbosity: Verbosity,
    start: Instant,
}

impl ScoreLogger {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            start: Instant::now(),
        }
    }

    #[inline]
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    #[inline]
    pub fn enabled(&self, level: Verbosity) -> bool {
        level != Verbosity::Silent && self.verbosity >= level
    }

    /// Reset the clock and announce the input size.
    pub fn start_evaluation(&mut self, n_samples: usize, n_classes: usize) {
        self.start = Instant::now();
        if self.enabled(Verbosity::Debug) {
            debug!(n_samples, n_classes, "evaluation started");
        }
    }

    pub fn log_stage(&self, stage: usize, stats: &[Stat], elapsed: Duration) {
        if self.enabled(Verbosity::Debug) {
            let names: Vec<&str> = stats.iter().map(|s| s.name()).collect();
            debug!(
                stage,
                n_stats = stats.len(),
                elapsed_us = elapsed.as_micros() as u64,
                "stage done: {}",
                names.join(", ")
            );
        }
    }

    /// Report the classes for which `stat` is NaN or infinite.
    pub fn log_undefined(&self, stat: Stat, classes: &[usize]) {
        if self.enabled(Verbosity::Warning) && !classes.is_empty() {
            warn!(
                stat = stat.name(),
                ?classes,
                "{} is undefined for {} class(es)",
                stat.name(),
                classes.len()
            );
        }
    }

    pub fn finish_evaluation(&self, n_samples: usize, n_classes: usize, overall_acc: f64) {
        if self.enabled(Verbosity::Info) {
            let elapsed = self.start.elapsed();
            info!(
                n_samples,
                n_classes,
                overall_acc,
                elapsed_ms = elapsed.as_secs_f64() * 1e3,
                "evaluated {} samples over {} classes: overall accuracy {:.5}",
                n_samples,
                n_classes,
                overall_acc
            );
        }
    }
}
