//! Scorer configuration with builder pattern.
//!
//! [`ScorerConfig`] controls how an evaluation runs, never what it computes:
//! every configuration produces the same snapshot for the same labels.
//!
//! # Example
//!
//! ```
//! use std::num::NonZeroUsize;
//! use scorer::{ScorerConfig, Verbosity};
//!
//! // All defaults: all cores, silent
//! let config = ScorerConfig::builder().build();
//!
//! // Sequential with a summary line per evaluation
//! let config = ScorerConfig::builder()
//!     .n_threads(NonZeroUsize::MIN)
//!     .verbosity(Verbosity::Info)
//!     .build();
//! assert_eq!(config.threads(), 1);
//! ```

use std::num::NonZeroUsize;

use bon::Builder;

use crate::logger::Verbosity;

/// Configuration of a [`Scorer`](crate::Scorer).
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(derive(Clone, Debug))]
pub struct ScorerConfig {
    // === Resource control ===
    /// Number of threads. `None` uses all available cores.
    ///
    /// One thread evaluates every stage sequentially on the calling thread.
    pub n_threads: Option<NonZeroUsize>,

    // === Logging ===
    /// Verbosity level. Default: `Silent`.
    #[builder(default)]
    pub verbosity: Verbosity,
}

impl ScorerConfig {
    /// Thread count in [`run_with_threads`](crate::run_with_threads) terms
    /// (`0` = auto).
    #[inline]
    pub fn threads(&self) -> usize {
        self.n_threads.map_or(0, NonZeroUsize::get)
    }
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScorerConfig::default();
        assert_eq!(config.n_threads, None);
        assert_eq!(config.threads(), 0);
        assert_eq!(config.verbosity, Verbosity::Silent);
    }

    #[test]
    fn test_explicit_threads() {
        let config = ScorerConfig::builder()
            .n_threads(NonZeroUsize::new(4).unwrap())
            .build();
        assert_eq!(config.threads(), 4);
    }

    #[test]
    fn test_builder_is_cloneable() {
        let builder = ScorerConfig::builder().verbosity(Verbosity::Debug);
        let a = builder.clone().build();
        let b = builder.build();
        assert_eq!(a, b);
    }
}
