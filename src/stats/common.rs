//! Base confusion counts.
//!
//! These are the roots of the dependency graph. TP, FN, FP and TN read the
//! confusion matrix directly; the derived counts only add them up.

use ndarray::Array1;

use super::{Stat, StatContext};

fn to_f64(counts: Vec<u64>) -> Array1<f64> {
    counts.into_iter().map(|c| c as f64).collect()
}

/// TP: diagonal cell of each class.
pub fn true_positive(ctx: &StatContext<'_>) -> Array1<f64> {
    to_f64(ctx.matrix().diagonal())
}

/// FN: samples of the class predicted as another class.
pub fn false_negative(ctx: &StatContext<'_>) -> Array1<f64> {
    let cm = ctx.matrix();
    let rows = to_f64(cm.row_sums());
    rows - to_f64(cm.diagonal())
}

/// FP: samples of other classes predicted as the class.
pub fn false_positive(ctx: &StatContext<'_>) -> Array1<f64> {
    let cm = ctx.matrix();
    let cols = to_f64(cm.column_sums());
    cols - to_f64(cm.diagonal())
}

/// TN: everything outside the class's row and column.
///
/// `total - row_i - col_i + C[i][i]`, which holds for any number of classes.
pub fn true_negative(ctx: &StatContext<'_>) -> Array1<f64> {
    let cm = ctx.matrix();
    let total = cm.total() as f64;
    let rows = to_f64(cm.row_sums());
    let cols = to_f64(cm.column_sums());
    let diag = to_f64(cm.diagonal());
    (total - rows - cols) + diag
}

/// POP: TP + TN + FP + FN. Equal for every class.
pub fn population(ctx: &StatContext<'_>) -> Array1<f64> {
    &ctx.class(Stat::TruePositive)
        + &ctx.class(Stat::TrueNegative)
        + &ctx.class(Stat::FalsePositive)
        + &ctx.class(Stat::FalseNegative)
}

/// P: TP + FN.
pub fn condition_positive(ctx: &StatContext<'_>) -> Array1<f64> {
    &ctx.class(Stat::TruePositive) + &ctx.class(Stat::FalseNegative)
}

/// N: TN + FP.
pub fn condition_negative(ctx: &StatContext<'_>) -> Array1<f64> {
    &ctx.class(Stat::TrueNegative) + &ctx.class(Stat::FalsePositive)
}

/// TOP: TP + FP.
pub fn test_outcome_positive(ctx: &StatContext<'_>) -> Array1<f64> {
    &ctx.class(Stat::TruePositive) + &ctx.class(Stat::FalsePositive)
}

/// TON: TN + FN.
pub fn test_outcome_negative(ctx: &StatContext<'_>) -> Array1<f64> {
    &ctx.class(Stat::TrueNegative) + &ctx.class(Stat::FalseNegative)
}
