//! Common utilities used across the crate.
//!
//! This module provides the numeric helpers shared by every metric formula and
//! the parallelism configuration used to evaluate independent metrics.

use rayon::prelude::*;

use crate::error::Result;

// =============================================================================
// Numeric Utilities
// =============================================================================

/// Bias added to every denominator.
///
/// A zero denominator yields a finite (possibly very large) value instead of
/// NaN or infinity.
pub const EPSILON: f64 = f64::EPSILON;

/// Divide `num` by `den + EPSILON`.
#[inline]
pub fn safe_div(num: f64, den: f64) -> f64 {
    num / (den + EPSILON)
}

/// `p * log2(p)` with the information-theory convention `0 * log2(0) = 0`.
#[inline]
pub fn xlog2x(p: f64) -> f64 {
    if p == 0.0 {
        0.0
    } else {
        p * p.log2()
    }
}

/// Returns `true` if the value is NaN or infinite.
#[inline]
pub fn is_undefined(value: f64) -> bool {
    !value.is_finite()
}

/// Upper tail `P(X >= successes)` of a `Binomial(trials, p)` variable.
///
/// Each term is evaluated in log space; the coefficient is updated
/// iteratively from the previous one.
pub fn binomial_upper_tail(successes: u64, trials: u64, p: f64) -> f64 {
    if successes == 0 {
        return 1.0;
    }
    if successes > trials {
        return 0.0;
    }
    if p <= 0.0 {
        return 0.0;
    }
    if p >= 1.0 {
        return 1.0;
    }

    let ln_p = p.ln();
    let ln_q = (1.0 - p).ln();
    let n = trials as f64;

    // sum of pmf(i) for i in 0..successes
    let mut ln_coef = 0.0f64;
    let mut lower = 0.0f64;
    for i in 0..successes {
        if i > 0 {
            ln_coef += (n - i as f64 + 1.0).ln() - (i as f64).ln();
        }
        lower += (ln_coef + i as f64 * ln_p + (n - i as f64) * ln_q).exp();
    }

    (1.0 - lower).clamp(0.0, 1.0)
}

// =============================================================================
// Parallelism Configuration
// =============================================================================

/// Whether parallel execution is allowed.
///
/// This is a simple flag passed to the stage executor. When `Parallel`,
/// independent metrics of a stage may run on `rayon` worker threads. When
/// `Sequential`, they run one after another on the calling thread.
///
/// The actual thread pool is set up by [`run_with_threads`]; components only
/// respect this flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parallelism {
    Sequential,
    Parallel,
}

impl Parallelism {
    /// Create from thread count semantics.
    ///
    /// - 0 = auto (parallel if rayon pool has multiple threads, sequential otherwise)
    /// - 1 = sequential
    /// - >1 = parallel
    #[inline]
    pub fn from_threads(n_threads: usize) -> Self {
        if n_threads == 1 || (n_threads == 0 && rayon::current_num_threads() == 1) {
            Parallelism::Sequential
        } else {
            Parallelism::Parallel
        }
    }

    /// Returns `true` if parallel execution is allowed.
    #[inline]
    pub fn is_parallel(self) -> bool {
        matches!(self, Parallelism::Parallel)
    }

    /// Map every item, in parallel when allowed.
    ///
    /// Output order always matches input order. The call returns only after
    /// every item has been mapped, so it doubles as a barrier between stages.
    #[inline]
    pub fn maybe_par_map<T, B, I, F>(self, iter: I, f: F) -> Vec<B>
    where
        T: Send,
        B: Send,
        I: IntoIterator<Item = T> + IntoParallelIterator<Item = T>,
        F: Fn(T) -> B + Sync + Send,
    {
        if self.is_parallel() {
            iter.into_par_iter().map(f).collect()
        } else {
            iter.into_iter().map(f).collect()
        }
    }
}

// =============================================================================
// Thread Pool Setup
// =============================================================================

/// Run a closure with the appropriate thread pool.
///
/// Thread count semantics:
/// - `0` = auto (use the global rayon pool)
/// - `1` = sequential (no thread pool)
/// - `n > 1` = use exactly `n` threads
///
/// # Errors
///
/// Returns [`ScorerError::ThreadPool`](crate::ScorerError::ThreadPool) if a
/// dedicated pool cannot be created.
///
/// # Example
///
/// ```
/// use scorer::run_with_threads;
///
/// let result = run_with_threads(4, |_| 40 + 2).unwrap();
/// assert_eq!(result, 42);
/// ```
pub fn run_with_threads<T: Send>(
    n_threads: usize,
    f: impl FnOnce(Parallelism) -> T + Send,
) -> Result<T> {
    let parallelism = Parallelism::from_threads(n_threads);

    match parallelism {
        Parallelism::Sequential => Ok(f(Parallelism::Sequential)),
        Parallelism::Parallel if n_threads == 0 => Ok(f(Parallelism::Parallel)),
        Parallelism::Parallel => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n_threads)
                .build()?;
            Ok(pool.install(|| f(Parallelism::Parallel)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_safe_div_zero_denominator_is_finite() {
        assert_eq!(safe_div(0.0, 0.0), 0.0);
        let big = safe_div(1.0, 0.0);
        assert!(big.is_finite());
        assert!(big > 1e15);
    }

    #[test]
    fn test_safe_div_regular() {
        assert_abs_diff_eq!(safe_div(3.0, 4.0), 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_xlog2x() {
        assert_eq!(xlog2x(0.0), 0.0);
        assert_abs_diff_eq!(xlog2x(0.5), -0.5, epsilon = 1e-12);
        assert_eq!(xlog2x(1.0), 0.0);
    }

    #[test]
    fn test_binomial_upper_tail_fair_coin() {
        // P(X >= 2) for Binomial(2, 0.5) = 0.25
        assert_abs_diff_eq!(binomial_upper_tail(2, 2, 0.5), 0.25, epsilon = 1e-12);
        // P(X >= 1) = 0.75
        assert_abs_diff_eq!(binomial_upper_tail(1, 2, 0.5), 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_binomial_upper_tail_edges() {
        assert_eq!(binomial_upper_tail(0, 10, 0.3), 1.0);
        assert_eq!(binomial_upper_tail(11, 10, 0.3), 0.0);
        assert_eq!(binomial_upper_tail(3, 10, 0.0), 0.0);
        assert_eq!(binomial_upper_tail(3, 10, 1.0), 1.0);
    }

    #[test]
    fn test_binomial_upper_tail_large_counts() {
        let p = binomial_upper_tail(60_000, 100_000, 0.5);
        assert!(p.is_finite());
        assert!((0.0..=1e-12).contains(&p));
    }

    #[test]
    fn test_parallelism_from_threads() {
        assert!(!Parallelism::from_threads(1).is_parallel()); // 1 = sequential
        assert!(Parallelism::from_threads(2).is_parallel()); // >1 = parallel
        assert!(Parallelism::from_threads(8).is_parallel());
    }

    #[test]
    fn test_run_with_threads_sequential() {
        let result = run_with_threads(1, |p| p).unwrap();
        assert_eq!(result, Parallelism::Sequential);
    }

    #[test]
    fn test_run_with_threads_explicit() {
        let result = run_with_threads(2, |_| rayon::current_num_threads()).unwrap();
        assert_eq!(result, 2);
    }

    #[test]
    fn test_maybe_par_map_preserves_order() {
        let result: Vec<_> = Parallelism::Sequential.maybe_par_map(0..5usize, |i| i * 2);
        assert_eq!(result, vec![0, 2, 4, 6, 8]);

        let result: Vec<_> = Parallelism::Parallel.maybe_par_map(0..5usize, |i| i * 2);
        assert_eq!(result, vec![0, 2, 4, 6, 8]);
    }
}
