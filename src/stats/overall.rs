//! Overall statistics.
//!
//! Scalar aggregates over the per-class arrays and the confusion matrix.

use ndarray::ArrayView1;

use super::benchmark::{
    encode, Altman, Cicchetti, CramerStrength, Fleiss, LandisKoch, MatthewsStrength,
};
use super::{Stat, StatContext};
use crate::utils::{binomial_upper_tail, safe_div, xlog2x};

/// z-score of a two-sided 95% confidence interval.
const Z_95: f64 = 1.96;

// =============================================================================
// Helpers
// =============================================================================

#[inline]
fn sum(ctx: &StatContext<'_>, stat: Stat) -> f64 {
    ctx.class(stat).sum()
}

#[inline]
fn mean(ctx: &StatContext<'_>, stat: Stat) -> f64 {
    sum(ctx, stat) / ctx.n_classes() as f64
}

#[inline]
fn max(values: ArrayView1<'_, f64>) -> f64 {
    values.fold(f64::NEG_INFINITY, |m, &v| m.max(v))
}

/// Total sample count (POP is constant across classes).
#[inline]
fn population(ctx: &StatContext<'_>) -> f64 {
    ctx.class(Stat::Population).get(0).copied().unwrap_or(0.0)
}

/// `(acc − pc) / (1 − pc)` for a chance-agreement estimate `pc`.
#[inline]
fn chance_corrected(acc: f64, pc: f64) -> f64 {
    safe_div(acc - pc, 1.0 - pc)
}

// =============================================================================
// Accuracy
// =============================================================================

/// Overall ACC: ΣTP / POP.
pub fn overall_acc(ctx: &StatContext<'_>) -> f64 {
    safe_div(sum(ctx, Stat::TruePositive), population(ctx))
}

pub fn overall_racc(ctx: &StatContext<'_>) -> f64 {
    sum(ctx, Stat::Racc)
}

pub fn overall_raccu(ctx: &StatContext<'_>) -> f64 {
    sum(ctx, Stat::Raccu)
}

/// Standard error of the overall accuracy.
pub fn overall_acc_se(ctx: &StatContext<'_>) -> f64 {
    let acc = ctx.overall(Stat::OverallAcc);
    safe_div(acc * (1.0 - acc), population(ctx)).sqrt()
}

pub fn overall_acc_ci_upper(ctx: &StatContext<'_>) -> f64 {
    ctx.overall(Stat::OverallAcc) + Z_95 * ctx.overall(Stat::OverallAccSe)
}

pub fn overall_acc_ci_lower(ctx: &StatContext<'_>) -> f64 {
    ctx.overall(Stat::OverallAcc) - Z_95 * ctx.overall(Stat::OverallAccSe)
}

// =============================================================================
// Kappa Family
// =============================================================================

/// Cohen's kappa.
pub fn kappa(ctx: &StatContext<'_>) -> f64 {
    chance_corrected(ctx.overall(Stat::OverallAcc), ctx.overall(Stat::OverallRacc))
}

pub fn kappa_unbiased(ctx: &StatContext<'_>) -> f64 {
    chance_corrected(ctx.overall(Stat::OverallAcc), ctx.overall(Stat::OverallRaccu))
}

pub fn kappa_no_prevalence(ctx: &StatContext<'_>) -> f64 {
    2.0 * ctx.overall(Stat::OverallAcc) - 1.0
}

pub fn kappa_se(ctx: &StatContext<'_>) -> f64 {
    let acc = ctx.overall(Stat::OverallAcc);
    let racc = ctx.overall(Stat::OverallRacc);
    safe_div(acc * (1.0 - acc), population(ctx) * (1.0 - racc).powi(2)).sqrt()
}

pub fn kappa_ci_upper(ctx: &StatContext<'_>) -> f64 {
    ctx.overall(Stat::Kappa) + Z_95 * ctx.overall(Stat::KappaSe)
}

pub fn kappa_ci_lower(ctx: &StatContext<'_>) -> f64 {
    ctx.overall(Stat::Kappa) - Z_95 * ctx.overall(Stat::KappaSe)
}

/// Mean of reference and response prevalence of every class.
fn joint_prevalence<'a>(ctx: &StatContext<'a>) -> impl Iterator<Item = f64> + 'a {
    let pop = population(ctx);
    let p = ctx.class(Stat::ConditionPositive);
    let top = ctx.class(Stat::TestOutcomePositive);
    p.into_iter()
        .zip(top)
        .map(move |(&p, &top)| safe_div(p + top, 2.0 * pop))
}

/// Chance agreement of Scott's pi.
pub fn pc_pi(ctx: &StatContext<'_>) -> f64 {
    joint_prevalence(ctx).map(|pi| pi * pi).sum()
}

/// Chance agreement of Gwet's AC1.
pub fn pc_ac1(ctx: &StatContext<'_>) -> f64 {
    let s: f64 = joint_prevalence(ctx).map(|pi| pi * (1.0 - pi)).sum();
    safe_div(s, ctx.n_classes() as f64 - 1.0)
}

/// Chance agreement of Bennett's S.
pub fn pc_s(ctx: &StatContext<'_>) -> f64 {
    1.0 / ctx.n_classes() as f64
}

pub fn scott_pi(ctx: &StatContext<'_>) -> f64 {
    chance_corrected(ctx.overall(Stat::OverallAcc), ctx.overall(Stat::PcPi))
}

pub fn gwet_ac1(ctx: &StatContext<'_>) -> f64 {
    chance_corrected(ctx.overall(Stat::OverallAcc), ctx.overall(Stat::PcAc1))
}

pub fn bennett_s(ctx: &StatContext<'_>) -> f64 {
    chance_corrected(ctx.overall(Stat::OverallAcc), ctx.overall(Stat::PcS))
}

// =============================================================================
// Chi-Squared Family
// =============================================================================

/// Pearson's chi-squared against the independence table `TOP_j·P_i / POP`.
pub fn chi_squared(ctx: &StatContext<'_>) -> f64 {
    let cm = ctx.matrix();
    let pop = population(ctx);
    let p = ctx.class(Stat::ConditionPositive);
    let top = ctx.class(Stat::TestOutcomePositive);
    let n = ctx.n_classes();

    let mut chi = 0.0;
    for i in 0..n {
        for j in 0..n {
            let expected = safe_div(top[j] * p[i], pop);
            let diff = cm.get(i, j) as f64 - expected;
            chi += safe_div(diff * diff, expected);
        }
    }
    chi
}

pub fn chi_squared_df(ctx: &StatContext<'_>) -> f64 {
    (ctx.n_classes() as f64 - 1.0).powi(2)
}

pub fn phi_squared(ctx: &StatContext<'_>) -> f64 {
    safe_div(ctx.overall(Stat::ChiSquared), population(ctx))
}

pub fn cramer_v(ctx: &StatContext<'_>) -> f64 {
    safe_div(ctx.overall(Stat::PhiSquared), ctx.n_classes() as f64 - 1.0).sqrt()
}

pub fn pearson_c(ctx: &StatContext<'_>) -> f64 {
    let chi = ctx.overall(Stat::ChiSquared);
    safe_div(chi, population(ctx) + chi).sqrt()
}

// =============================================================================
// Information Theory
// =============================================================================

pub fn response_entropy(ctx: &StatContext<'_>) -> f64 {
    let pop = population(ctx);
    -ctx.class(Stat::TestOutcomePositive)
        .iter()
        .map(|&top| xlog2x(safe_div(top, pop)))
        .sum::<f64>()
}

pub fn reference_entropy(ctx: &StatContext<'_>) -> f64 {
    let pop = population(ctx);
    -ctx.class(Stat::ConditionPositive)
        .iter()
        .map(|&p| xlog2x(safe_div(p, pop)))
        .sum::<f64>()
}

/// Reference distribution measured with the code of the response distribution.
pub fn cross_entropy(ctx: &StatContext<'_>) -> f64 {
    let pop = population(ctx);
    let p = ctx.class(Stat::ConditionPositive);
    let top = ctx.class(Stat::TestOutcomePositive);
    -p.iter()
        .zip(top.iter())
        .map(|(&p, &top)| {
            let ref_p = safe_div(p, pop);
            if ref_p == 0.0 {
                0.0
            } else {
                ref_p * safe_div(top, pop).log2()
            }
        })
        .sum::<f64>()
}

pub fn joint_entropy(ctx: &StatContext<'_>) -> f64 {
    let pop = population(ctx);
    -ctx.matrix()
        .view()
        .iter()
        .map(|&c| xlog2x(safe_div(c as f64, pop)))
        .sum::<f64>()
}

/// Entropy of the response given the reference.
pub fn conditional_entropy(ctx: &StatContext<'_>) -> f64 {
    let cm = ctx.matrix();
    let pop = population(ctx);
    let p = ctx.class(Stat::ConditionPositive);

    -(0..ctx.n_classes())
        .map(|i| {
            let row: f64 = cm
                .row(i)
                .iter()
                .map(|&c| xlog2x(safe_div(c as f64, p[i])))
                .sum();
            safe_div(p[i], pop) * row
        })
        .sum::<f64>()
}

pub fn mutual_information(ctx: &StatContext<'_>) -> f64 {
    ctx.overall(Stat::ResponseEntropy) - ctx.overall(Stat::ConditionalEntropy)
}

/// KL divergence of the response from the reference distribution.
///
/// Classes absent from the reference contribute nothing.
pub fn kl_divergence(ctx: &StatContext<'_>) -> f64 {
    let pop = population(ctx);
    let p = ctx.class(Stat::ConditionPositive);
    let top = ctx.class(Stat::TestOutcomePositive);
    p.iter()
        .zip(top.iter())
        .map(|(&p, &top)| {
            let ref_p = safe_div(p, pop);
            if ref_p == 0.0 {
                return 0.0;
            }
            let resp_p = safe_div(top, pop);
            ref_p * safe_div(ref_p, resp_p).log2()
        })
        .sum()
}

/// RCI: relative classifier information, MI / reference entropy.
pub fn rci(ctx: &StatContext<'_>) -> f64 {
    safe_div(
        ctx.overall(Stat::MutualInformation),
        ctx.overall(Stat::ReferenceEntropy),
    )
}

// =============================================================================
// Association
// =============================================================================

/// Goodman-Kruskal lambda predicting the response from the reference.
pub fn lambda_b(ctx: &StatContext<'_>) -> f64 {
    let cm = ctx.matrix();
    let row_max: f64 = (0..ctx.n_classes())
        .map(|i| cm.row(i).iter().copied().max().unwrap_or(0) as f64)
        .sum();
    let max_top = max(ctx.class(Stat::TestOutcomePositive));
    safe_div(row_max - max_top, population(ctx) - max_top)
}

/// Goodman-Kruskal lambda predicting the reference from the response.
pub fn lambda_a(ctx: &StatContext<'_>) -> f64 {
    let cm = ctx.matrix();
    let col_max: f64 = (0..ctx.n_classes())
        .map(|j| cm.column(j).iter().copied().max().unwrap_or(0) as f64)
        .sum();
    let max_p = max(ctx.class(Stat::ConditionPositive));
    safe_div(col_max - max_p, population(ctx) - max_p)
}

// =============================================================================
// Losses & Baselines
// =============================================================================

pub fn overall_jaccard(ctx: &StatContext<'_>) -> f64 {
    sum(ctx, Stat::Jaccard)
}

pub fn hamming_loss(ctx: &StatContext<'_>) -> f64 {
    let pop = population(ctx);
    safe_div(pop - sum(ctx, Stat::TruePositive), pop)
}

pub fn zero_one_loss(ctx: &StatContext<'_>) -> f64 {
    population(ctx) - sum(ctx, Stat::TruePositive)
}

/// NIR: no-information rate, the prevalence of the largest class.
pub fn nir(ctx: &StatContext<'_>) -> f64 {
    safe_div(max(ctx.class(Stat::ConditionPositive)), population(ctx))
}

/// One-sided binomial test of the accuracy against NIR.
pub fn p_value(ctx: &StatContext<'_>) -> f64 {
    let correct = sum(ctx, Stat::TruePositive) as u64;
    let trials = population(ctx) as u64;
    binomial_upper_tail(correct, trials, ctx.overall(Stat::Nir))
}

// =============================================================================
// Aggregated Per-Class Statistics
// =============================================================================

/// Overall CEN: class entropies weighted by `(TOP + P) / 2ΣTOP`.
pub fn overall_cen(ctx: &StatContext<'_>) -> f64 {
    let top = ctx.class(Stat::TestOutcomePositive);
    let p = ctx.class(Stat::ConditionPositive);
    let cen = ctx.class(Stat::Cen);
    let weight_den = 2.0 * top.sum();
    (0..ctx.n_classes())
        .map(|i| safe_div(top[i] + p[i], weight_den) * cen[i])
        .sum()
}

/// Overall MCEN. The diagonal is not discounted in the binary case.
pub fn overall_mcen(ctx: &StatContext<'_>) -> f64 {
    let tp = ctx.class(Stat::TruePositive);
    let top = ctx.class(Stat::TestOutcomePositive);
    let p = ctx.class(Stat::ConditionPositive);
    let mcen = ctx.class(Stat::Mcen);
    let alpha = if ctx.n_classes() == 2 { 0.0 } else { 1.0 };
    let weight_den = 2.0 * top.sum() - alpha * tp.sum();
    (0..ctx.n_classes())
        .map(|i| safe_div(top[i] + p[i] - tp[i], weight_den) * mcen[i])
        .sum()
}

/// Multi-class MCC (Gorodkin's R_K).
pub fn overall_mcc(ctx: &StatContext<'_>) -> f64 {
    let cm = ctx.matrix();
    let top = ctx.class(Stat::TestOutcomePositive);
    let p = ctx.class(Stat::ConditionPositive);
    let correct: f64 = cm.diagonal().iter().map(|&c| c as f64).sum();
    let s = cm.total() as f64;

    let cov_xy = correct * s - p.dot(&top);
    let cov_xx = s * s - top.dot(&top);
    let cov_yy = s * s - p.dot(&p);
    safe_div(cov_xy, (cov_xx * cov_yy).sqrt())
}

/// RR: global performance index, mean predicted count per class.
pub fn rr(ctx: &StatContext<'_>) -> f64 {
    mean(ctx, Stat::TestOutcomePositive)
}

/// CBA: class balance accuracy.
pub fn cba(ctx: &StatContext<'_>) -> f64 {
    let cm = ctx.matrix();
    let top = ctx.class(Stat::TestOutcomePositive);
    let p = ctx.class(Stat::ConditionPositive);
    let n = ctx.n_classes();
    let s: f64 = (0..n)
        .map(|i| safe_div(cm.get(i, i) as f64, top[i].max(p[i])))
        .sum();
    s / n as f64
}

/// AUNU: unweighted mean of the per-class AUC.
pub fn aunu(ctx: &StatContext<'_>) -> f64 {
    mean(ctx, Stat::Auc)
}

/// AUNP: per-class AUC weighted by class prevalence, Σ (P/POP)·AUC.
pub fn aunp(ctx: &StatContext<'_>) -> f64 {
    let p = ctx.class(Stat::ConditionPositive);
    let pop = ctx.class(Stat::Population);
    let auc = ctx.class(Stat::Auc);
    (0..ctx.n_classes())
        .map(|i| safe_div(p[i], pop[i]) * auc[i])
        .sum()
}

/// CSI: classification success index, mean ICSI.
pub fn csi(ctx: &StatContext<'_>) -> f64 {
    mean(ctx, Stat::Icsi)
}

/// Micro-averaged TPR. Equal to micro PPV and micro F1 for single-label data.
pub fn micro_average(ctx: &StatContext<'_>) -> f64 {
    let tp = sum(ctx, Stat::TruePositive);
    safe_div(tp, tp + sum(ctx, Stat::FalseNegative))
}

pub fn tpr_macro(ctx: &StatContext<'_>) -> f64 {
    mean(ctx, Stat::Tpr)
}

pub fn ppv_macro(ctx: &StatContext<'_>) -> f64 {
    mean(ctx, Stat::Ppv)
}

pub fn acc_macro(ctx: &StatContext<'_>) -> f64 {
    mean(ctx, Stat::Acc)
}

pub fn f1_macro(ctx: &StatContext<'_>) -> f64 {
    mean(ctx, Stat::F1)
}

// =============================================================================
// Benchmarks
// =============================================================================

pub fn landis_koch(ctx: &StatContext<'_>) -> f64 {
    encode::<LandisKoch>(ctx.overall(Stat::Kappa))
}

pub fn fleiss(ctx: &StatContext<'_>) -> f64 {
    encode::<Fleiss>(ctx.overall(Stat::Kappa))
}

pub fn altman(ctx: &StatContext<'_>) -> f64 {
    encode::<Altman>(ctx.overall(Stat::Kappa))
}

pub fn cicchetti(ctx: &StatContext<'_>) -> f64 {
    encode::<Cicchetti>(ctx.overall(Stat::Kappa))
}

pub fn cramer_benchmark(ctx: &StatContext<'_>) -> f64 {
    encode::<CramerStrength>(ctx.overall(Stat::CramerV))
}

pub fn matthews_benchmark(ctx: &StatContext<'_>) -> f64 {
    encode::<MatthewsStrength>(ctx.overall(Stat::OverallMcc))
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::testing::ContextFixture;

    const EPS: f64 = 1e-5;

    fn check(fx: &ContextFixture, cases: &[(fn(&StatContext<'_>) -> f64, Stat, f64)]) {
        for &(f, stat, expected) in cases {
            let got = f(&fx.ctx(stat));
            assert!(
                (got - expected).abs() < EPS,
                "{stat:?}: expected {expected}, got {got}"
            );
        }
    }

    #[test]
    fn test_agreement_canonical() {
        let fx = ContextFixture::canonical();
        check(
            &fx,
            &[
                (overall_acc, Stat::OverallAcc, 0.58333),
                (overall_racc, Stat::OverallRacc, 0.35417),
                (overall_raccu, Stat::OverallRaccu, 0.36458),
                (kappa, Stat::Kappa, 0.35484),
                (kappa_se, Stat::KappaSe, 0.22036),
                (kappa_unbiased, Stat::KappaUnbiased, 0.34426),
                (kappa_no_prevalence, Stat::KappaNoPrevalence, 0.16667),
                (pc_pi, Stat::PcPi, 0.36458),
                (pc_ac1, Stat::PcAc1, 0.31771),
                (scott_pi, Stat::ScottPi, 0.34426),
                (gwet_ac1, Stat::GwetAc1, 0.38931),
                (bennett_s, Stat::BennettS, 0.375),
                (overall_acc_se, Stat::OverallAccSe, 0.14232),
            ],
        );
    }

    #[test]
    fn test_association_canonical() {
        let fx = ContextFixture::canonical();
        check(
            &fx,
            &[
                (chi_squared, Stat::ChiSquared, 6.6),
                (chi_squared_df, Stat::ChiSquaredDf, 4.0),
                (phi_squared, Stat::PhiSquared, 0.55),
                (cramer_v, Stat::CramerV, 0.5244),
                (pearson_c, Stat::PearsonC, 0.59568),
                (lambda_a, Stat::LambdaA, 0.16667),
                (lambda_b, Stat::LambdaB, 0.42857),
            ],
        );
    }

    #[test]
    fn test_information_canonical() {
        let fx = ContextFixture::canonical();
        check(
            &fx,
            &[
                (response_entropy, Stat::ResponseEntropy, 1.48336),
                (reference_entropy, Stat::ReferenceEntropy, 1.5),
                (cross_entropy, Stat::CrossEntropy, 1.59352),
                (joint_entropy, Stat::JointEntropy, 2.45915),
                (conditional_entropy, Stat::ConditionalEntropy, 0.95915),
                (mutual_information, Stat::MutualInformation, 0.52421),
                (kl_divergence, Stat::KlDivergence, 0.09352),
                (rci, Stat::Rci, 0.34947),
            ],
        );
    }

    #[test]
    fn test_aggregates_canonical() {
        let fx = ContextFixture::canonical();
        check(
            &fx,
            &[
                (overall_jaccard, Stat::OverallJaccard, 1.225),
                (hamming_loss, Stat::HammingLoss, 0.41667),
                (zero_one_loss, Stat::ZeroOneLoss, 5.0),
                (nir, Stat::Nir, 0.5),
                (p_value, Stat::PValue, 0.38721),
                (overall_cen, Stat::OverallCen, 0.46381),
                (overall_mcen, Stat::OverallMcen, 0.51894),
                (overall_mcc, Stat::OverallMcc, 0.36667),
                (rr, Stat::Rr, 4.0),
                (cba, Stat::Cba, 0.47778),
                (aunu, Stat::Aunu, 0.69444),
                (aunp, Stat::Aunp, 0.66667),
                (csi, Stat::Csi, 0.17778),
                (micro_average, Stat::MicroAverage, 0.58333),
                (tpr_macro, Stat::TprMacro, 0.61111),
                (ppv_macro, Stat::PpvMacro, 0.56667),
                (acc_macro, Stat::AccMacro, 0.72222),
                (f1_macro, Stat::F1Macro, 0.56515),
            ],
        );
    }

    #[test]
    fn test_benchmarks_canonical() {
        let fx = ContextFixture::canonical();
        // kappa = 0.355, Cramer's V = 0.524, overall MCC = 0.367
        assert_eq!(landis_koch(&fx.ctx(Stat::LandisKochBenchmark)), 2.0);
        assert_eq!(fleiss(&fx.ctx(Stat::FleissBenchmark)), 0.0);
        assert_eq!(altman(&fx.ctx(Stat::AltmanBenchmark)), 1.0);
        assert_eq!(cicchetti(&fx.ctx(Stat::CicchettiBenchmark)), 0.0);
        assert_eq!(cramer_benchmark(&fx.ctx(Stat::CramerBenchmark)), 3.0);
        assert_eq!(matthews_benchmark(&fx.ctx(Stat::MatthewsBenchmark)), 1.0);
    }

    #[test]
    fn test_binary_mcen_keeps_diagonal() {
        let fx = ContextFixture::from_counts(ndarray::array![[5, 1], [2, 8]]);
        assert_abs_diff_eq!(overall_mcen(&fx.ctx(Stat::OverallMcen)), 0.48057, epsilon = EPS);
        assert_abs_diff_eq!(overall_mcc(&fx.ctx(Stat::OverallMcc)), 0.61807, epsilon = EPS);
        assert_abs_diff_eq!(p_value(&fx.ctx(Stat::PValue)), 0.09474, epsilon = EPS);
    }

    #[test]
    fn test_information_with_predicted_only_class() {
        // class 2 is predicted once but never occurs in the reference
        let fx = ContextFixture::from_counts(ndarray::array![[1, 0, 1], [0, 2, 0], [0, 0, 0]]);
        assert_abs_diff_eq!(kl_divergence(&fx.ctx(Stat::KlDivergence)), 0.5, epsilon = EPS);
        assert_abs_diff_eq!(cross_entropy(&fx.ctx(Stat::CrossEntropy)), 1.5, epsilon = EPS);
        assert_abs_diff_eq!(joint_entropy(&fx.ctx(Stat::JointEntropy)), 1.5, epsilon = EPS);
        assert_abs_diff_eq!(
            conditional_entropy(&fx.ctx(Stat::ConditionalEntropy)),
            0.5,
            epsilon = EPS
        );
    }
}
