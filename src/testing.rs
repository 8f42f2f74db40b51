//! Testing utilities for scorer.
//!
//! This module provides common assertion helpers and fixtures that can be
//! used in both unit tests and integration tests.
//!
//! ```ignore
//! use scorer::testing::{assert_class_stat_eq, CANONICAL_PRED, CANONICAL_TRUE};
//! ```

use ndarray::Array2;

use crate::confusion::ConfusionMatrix;
use crate::logger::{ScoreLogger, Verbosity};
use crate::schedule::{Schedule, StatStore};
use crate::snapshot::MetricSnapshot;
use crate::stats::{Stat, StatContext};
use crate::utils::Parallelism;

// =============================================================================
// Constants
// =============================================================================

/// Default tolerance for floating point comparisons.
///
/// Reference values are usually quoted to five decimals.
pub const DEFAULT_TOLERANCE: f64 = 1e-5;

/// True labels of the three-class reference example.
///
/// Together with [`CANONICAL_PRED`] this gives the confusion matrix
/// `[[3, 0, 0], [0, 1, 2], [2, 1, 3]]`.
pub const CANONICAL_TRUE: [i64; 12] = [2, 0, 2, 2, 0, 1, 1, 2, 2, 0, 1, 2];

/// Predicted labels of the three-class reference example.
pub const CANONICAL_PRED: [i64; 12] = [0, 0, 2, 1, 0, 2, 1, 0, 2, 0, 2, 2];

// =============================================================================
// Floating Point Assertions
// =============================================================================

/// Assert that two f64 values are approximately equal.
///
/// Two NaNs compare equal, as do two infinities of the same sign.
///
/// # Examples
///
/// ```
/// # use scorer::assert_approx_eq;
/// assert_approx_eq!(0.58333, 7.0 / 12.0, 1e-5);
/// assert_approx_eq!(f64::NAN, f64::NAN, 1e-5);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $tolerance:expr) => {
        $crate::assert_approx_eq!($left, $right, $tolerance, "values differ")
    };
    ($left:expr, $right:expr, $tolerance:expr, $($arg:tt)+) => {{
        let left_val: f64 = $left;
        let right_val: f64 = $right;
        let tol: f64 = $tolerance;
        if !$crate::testing::approx_eq(left_val, right_val, tol) {
            panic!(
                "assertion failed: `(left ≈ right)` - {}\n  left: `{:?}`\n right: `{:?}`\n  diff: `{:?}` > tolerance `{:?}`",
                format_args!($($arg)+), left_val, right_val, (left_val - right_val).abs(), tol
            );
        }
    }};
}

/// Tolerant equality that treats matching undefined values as equal.
#[inline]
pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return a.is_nan() && b.is_nan();
    }
    if a.is_infinite() || b.is_infinite() {
        return a == b;
    }
    (a - b).abs() <= tolerance
}

/// Assert that two f64 slices are approximately equal element-wise.
///
/// # Panics
///
/// Panics with a per-element report if the lengths differ or any element
/// differs by more than `tolerance`.
pub fn assert_slice_approx_eq(actual: &[f64], expected: &[f64], tolerance: f64, context: &str) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "{context}: length mismatch (actual {}, expected {})",
        actual.len(),
        expected.len()
    );

    let mismatches: Vec<String> = actual
        .iter()
        .zip(expected)
        .enumerate()
        .filter(|(_, (&a, &e))| !approx_eq(a, e, tolerance))
        .map(|(i, (a, e))| format!("  [{i}] actual {a:.6}, expected {e:.6}"))
        .collect();

    if !mismatches.is_empty() {
        panic!(
            "{context}: {} of {} values differ (tolerance {tolerance:e})\n{}",
            mismatches.len(),
            actual.len(),
            mismatches.join("\n")
        );
    }
}

// =============================================================================
// Snapshot Assertions
// =============================================================================

/// Assert the per-class values of `stat` in `snapshot`.
pub fn assert_class_stat_eq<L>(
    snapshot: &MetricSnapshot<L>,
    stat: Stat,
    expected: &[f64],
    tolerance: f64,
) {
    let actual = snapshot.class_stat(stat).to_vec();
    assert_slice_approx_eq(&actual, expected, tolerance, stat.name());
}

/// Assert the value of overall statistic `stat` in `snapshot`.
pub fn assert_overall_stat_eq<L>(
    snapshot: &MetricSnapshot<L>,
    stat: Stat,
    expected: f64,
    tolerance: f64,
) {
    crate::assert_approx_eq!(
        snapshot.overall_stat(stat),
        expected,
        tolerance,
        "{}",
        stat.name()
    );
}

// =============================================================================
// Compute Function Fixtures
// =============================================================================

/// Fully evaluated store over a fixed confusion matrix.
///
/// Hands out a [`StatContext`] for any statistic, so a compute function can
/// be called directly with real dependency values.
#[derive(Debug)]
pub struct ContextFixture {
    matrix: ConfusionMatrix,
    store: StatStore,
}

impl ContextFixture {
    /// Evaluate the standard schedule sequentially over `counts`.
    pub fn from_counts(counts: Array2<u64>) -> Self {
        let matrix = ConfusionMatrix::from_counts(counts);
        let logger = ScoreLogger::new(Verbosity::Silent);
        let store = Schedule::standard()
            .expect("standard schedule is valid")
            .run(&matrix, Parallelism::Sequential, &logger);
        Self { matrix, store }
    }

    /// The three-class reference example.
    pub fn canonical() -> Self {
        Self::from_counts(ndarray::array![[3, 0, 0], [0, 1, 2], [2, 1, 3]])
    }

    #[inline]
    pub fn matrix(&self) -> &ConfusionMatrix {
        &self.matrix
    }

    /// Context with the declared dependencies of `stat`.
    pub fn ctx(&self, stat: Stat) -> StatContext<'_> {
        StatContext::new(&self.matrix, &self.store, stat.deps())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_approx_eq_macro() {
        crate::assert_approx_eq!(1.0, 1.000001, 1e-5);
        crate::assert_approx_eq!(f64::INFINITY, f64::INFINITY, 1e-5);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_assert_approx_eq_fails() {
        crate::assert_approx_eq!(1.0, 1.1, 1e-5);
    }

    #[test]
    #[should_panic(expected = "PPV")]
    fn test_assert_approx_eq_with_message() {
        crate::assert_approx_eq!(0.5, 0.6, 1e-5, "{}", "PPV");
    }

    #[test]
    fn test_nan_only_matches_nan() {
        assert!(approx_eq(f64::NAN, f64::NAN, 0.0));
        assert!(!approx_eq(f64::NAN, 0.0, 1.0));
        assert!(!approx_eq(f64::INFINITY, f64::NEG_INFINITY, 1.0));
    }

    #[test]
    fn test_slice_approx_eq() {
        assert_slice_approx_eq(&[0.75, 0.4], &[0.750001, 0.4], 1e-5, "F1");
    }

    #[test]
    #[should_panic(expected = "1 of 2 values differ")]
    fn test_slice_approx_eq_reports_mismatch() {
        assert_slice_approx_eq(&[0.75, 0.4], &[0.75, 0.5], 1e-5, "F1");
    }

    #[test]
    fn test_canonical_fixture() {
        let fx = ContextFixture::canonical();
        assert_eq!(fx.matrix().total(), CANONICAL_TRUE.len() as u64);
        let ctx = fx.ctx(Stat::Tpr);
        assert_eq!(ctx.class(Stat::TruePositive).to_vec(), vec![3.0, 1.0, 3.0]);
    }
}
