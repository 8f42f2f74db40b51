//! Per-class statistics.
//!
//! Each function maps the per-class arrays of its dependencies to a new
//! length-N array. Denominators go through [`safe_div`], so an empty class
//! yields a finite value instead of NaN.

use std::f64::consts::{PI, SQRT_2};

use ndarray::{Array1, ArrayView1, Zip};

use super::benchmark::{
    encode, AucQuality, DiscriminantPower, LikelihoodRatioStrength, MatthewsStrength,
    NegativeLikelihoodStrength,
};
use super::{Stat, StatContext};
use crate::confusion::ConfusionMatrix;
use crate::utils::safe_div;

// =============================================================================
// Helpers
// =============================================================================

#[inline]
fn zip2(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>, f: impl Fn(f64, f64) -> f64) -> Array1<f64> {
    Zip::from(a).and(b).map_collect(|&a, &b| f(a, b))
}

#[inline]
fn zip3(
    a: ArrayView1<'_, f64>,
    b: ArrayView1<'_, f64>,
    c: ArrayView1<'_, f64>,
    f: impl Fn(f64, f64, f64) -> f64,
) -> Array1<f64> {
    Zip::from(a).and(b).and(c).map_collect(|&a, &b, &c| f(a, b, c))
}

#[inline]
fn zip4(
    a: ArrayView1<'_, f64>,
    b: ArrayView1<'_, f64>,
    c: ArrayView1<'_, f64>,
    d: ArrayView1<'_, f64>,
    f: impl Fn(f64, f64, f64, f64) -> f64,
) -> Array1<f64> {
    Zip::from(a)
        .and(b)
        .and(c)
        .and(d)
        .map_collect(|&a, &b, &c, &d| f(a, b, c, d))
}

/// F-beta score from counts: `(1+b²)TP / ((1+b²)TP + FP + b²FN)`.
#[inline]
fn f_beta(tp: f64, fp: f64, fn_: f64, beta: f64) -> f64 {
    let b2 = beta * beta;
    safe_div((1.0 + b2) * tp, (1.0 + b2) * tp + fp + b2 * fn_)
}

// =============================================================================
// Rates
// =============================================================================

/// TPR: TP / (TP + FN).
pub fn tpr(ctx: &StatContext<'_>) -> Array1<f64> {
    zip2(
        ctx.class(Stat::TruePositive),
        ctx.class(Stat::FalseNegative),
        |tp, fn_| safe_div(tp, tp + fn_),
    )
}

/// TNR: TN / (TN + FP).
pub fn tnr(ctx: &StatContext<'_>) -> Array1<f64> {
    zip2(
        ctx.class(Stat::TrueNegative),
        ctx.class(Stat::FalsePositive),
        |tn, fp| safe_div(tn, tn + fp),
    )
}

/// PPV: TP / (TP + FP).
pub fn ppv(ctx: &StatContext<'_>) -> Array1<f64> {
    zip2(
        ctx.class(Stat::TruePositive),
        ctx.class(Stat::FalsePositive),
        |tp, fp| safe_div(tp, tp + fp),
    )
}

/// NPV: TN / (TN + FN).
pub fn npv(ctx: &StatContext<'_>) -> Array1<f64> {
    zip2(
        ctx.class(Stat::TrueNegative),
        ctx.class(Stat::FalseNegative),
        |tn, fn_| safe_div(tn, tn + fn_),
    )
}

pub fn fnr(ctx: &StatContext<'_>) -> Array1<f64> {
    ctx.class(Stat::Tpr).mapv(|x| 1.0 - x)
}

pub fn fpr(ctx: &StatContext<'_>) -> Array1<f64> {
    ctx.class(Stat::Tnr).mapv(|x| 1.0 - x)
}

pub fn fdr(ctx: &StatContext<'_>) -> Array1<f64> {
    ctx.class(Stat::Ppv).mapv(|x| 1.0 - x)
}

pub fn for_(ctx: &StatContext<'_>) -> Array1<f64> {
    ctx.class(Stat::Npv).mapv(|x| 1.0 - x)
}

/// ACC: (TP + TN) / POP.
pub fn acc(ctx: &StatContext<'_>) -> Array1<f64> {
    zip3(
        ctx.class(Stat::TruePositive),
        ctx.class(Stat::TrueNegative),
        ctx.class(Stat::Population),
        |tp, tn, pop| safe_div(tp + tn, pop),
    )
}

pub fn err(ctx: &StatContext<'_>) -> Array1<f64> {
    ctx.class(Stat::Acc).mapv(|x| 1.0 - x)
}

/// PRE: prevalence, P / POP.
pub fn pre(ctx: &StatContext<'_>) -> Array1<f64> {
    zip2(
        ctx.class(Stat::ConditionPositive),
        ctx.class(Stat::Population),
        safe_div,
    )
}

// =============================================================================
// Scores
// =============================================================================

fn f_score(ctx: &StatContext<'_>, beta: f64) -> Array1<f64> {
    zip3(
        ctx.class(Stat::TruePositive),
        ctx.class(Stat::FalsePositive),
        ctx.class(Stat::FalseNegative),
        |tp, fp, fn_| f_beta(tp, fp, fn_, beta),
    )
}

pub fn f1(ctx: &StatContext<'_>) -> Array1<f64> {
    f_score(ctx, 1.0)
}

pub fn f05(ctx: &StatContext<'_>) -> Array1<f64> {
    f_score(ctx, 0.5)
}

pub fn f2(ctx: &StatContext<'_>) -> Array1<f64> {
    f_score(ctx, 2.0)
}

/// MCC: (TP·TN − FP·FN) / sqrt((TP+FP)(TP+FN)(TN+FP)(TN+FN)).
pub fn mcc(ctx: &StatContext<'_>) -> Array1<f64> {
    zip4(
        ctx.class(Stat::TruePositive),
        ctx.class(Stat::TrueNegative),
        ctx.class(Stat::FalsePositive),
        ctx.class(Stat::FalseNegative),
        |tp, tn, fp, fn_| {
            let den = ((tp + fp) * (tp + fn_) * (tn + fp) * (tn + fn_)).sqrt();
            safe_div(tp * tn - fp * fn_, den)
        },
    )
}

/// BM: informedness, TPR + TNR − 1.
pub fn bm(ctx: &StatContext<'_>) -> Array1<f64> {
    zip2(ctx.class(Stat::Tpr), ctx.class(Stat::Tnr), |tpr, tnr| {
        tpr + tnr - 1.0
    })
}

/// MK: markedness, PPV + NPV − 1.
pub fn mk(ctx: &StatContext<'_>) -> Array1<f64> {
    zip2(ctx.class(Stat::Ppv), ctx.class(Stat::Npv), |ppv, npv| {
        ppv + npv - 1.0
    })
}

/// ICSI: PPV + TPR − 1.
pub fn icsi(ctx: &StatContext<'_>) -> Array1<f64> {
    zip2(ctx.class(Stat::Ppv), ctx.class(Stat::Tpr), |ppv, tpr| {
        ppv + tpr - 1.0
    })
}

/// Y: Youden index, equal to BM.
pub fn youden(ctx: &StatContext<'_>) -> Array1<f64> {
    ctx.class(Stat::Bm).to_owned()
}

// =============================================================================
// Likelihood Ratios
// =============================================================================

/// PLR: TPR / FPR.
pub fn plr(ctx: &StatContext<'_>) -> Array1<f64> {
    zip2(ctx.class(Stat::Tpr), ctx.class(Stat::Fpr), safe_div)
}

/// NLR: FNR / TNR.
pub fn nlr(ctx: &StatContext<'_>) -> Array1<f64> {
    zip2(ctx.class(Stat::Fnr), ctx.class(Stat::Tnr), safe_div)
}

/// DOR: PLR / NLR.
pub fn dor(ctx: &StatContext<'_>) -> Array1<f64> {
    zip2(ctx.class(Stat::Plr), ctx.class(Stat::Nlr), safe_div)
}

// =============================================================================
// Means & Agreement
// =============================================================================

/// G: geometric mean of precision and recall.
pub fn g(ctx: &StatContext<'_>) -> Array1<f64> {
    zip2(ctx.class(Stat::Ppv), ctx.class(Stat::Tpr), |ppv, tpr| {
        (ppv * tpr).sqrt()
    })
}

/// GM: geometric mean of specificity and sensitivity.
pub fn gm(ctx: &StatContext<'_>) -> Array1<f64> {
    zip2(ctx.class(Stat::Tnr), ctx.class(Stat::Tpr), |tnr, tpr| {
        (tnr * tpr).sqrt()
    })
}

/// RACC: random accuracy, TOP·P / POP².
pub fn racc(ctx: &StatContext<'_>) -> Array1<f64> {
    zip3(
        ctx.class(Stat::TestOutcomePositive),
        ctx.class(Stat::ConditionPositive),
        ctx.class(Stat::Population),
        |top, p, pop| safe_div(top * p, pop * pop),
    )
}

/// RACCU: unbiased random accuracy, ((TOP + P) / 2·POP)².
pub fn raccu(ctx: &StatContext<'_>) -> Array1<f64> {
    zip3(
        ctx.class(Stat::TestOutcomePositive),
        ctx.class(Stat::ConditionPositive),
        ctx.class(Stat::Population),
        |top, p, pop| safe_div(top + p, 2.0 * pop).powi(2),
    )
}

/// J: Jaccard index, TP / (TOP + P − TP).
pub fn jaccard(ctx: &StatContext<'_>) -> Array1<f64> {
    zip3(
        ctx.class(Stat::TruePositive),
        ctx.class(Stat::TestOutcomePositive),
        ctx.class(Stat::ConditionPositive),
        |tp, top, p| safe_div(tp, top + p - tp),
    )
}

/// IS: information score, −log2(P/POP) + log2(TP/TOP).
///
/// `-inf` for a class that is never predicted correctly. The logarithms are
/// not guarded, so a class absent from the reference or never predicted is NaN.
pub fn information_score(ctx: &StatContext<'_>) -> Array1<f64> {
    zip4(
        ctx.class(Stat::TruePositive),
        ctx.class(Stat::TestOutcomePositive),
        ctx.class(Stat::ConditionPositive),
        ctx.class(Stat::Population),
        |tp, top, p, pop| -safe_div(p, pop).log2() + safe_div(tp, top).log2(),
    )
}

// =============================================================================
// Confusion Entropy
// =============================================================================

/// Confusion entropy of every class, logarithms in base `2(N − 1)`.
///
/// The misclassification probabilities of class `i` are taken relative to
/// `row_i + col_i`, or `row_i + col_i − C[i][i]` for the modified variant.
fn confusion_entropy(cm: &ConfusionMatrix, modified: bool) -> Array1<f64> {
    let n = cm.n_classes();
    let ln_base = (2.0 * (n as f64 - 1.0)).ln();
    let rows = cm.row_sums();
    let cols = cm.column_sums();

    let term = |count: u64, den: f64| {
        let p = safe_div(count as f64, den);
        if p == 0.0 {
            0.0
        } else {
            p * p.ln() / ln_base
        }
    };

    (0..n)
        .map(|i| {
            let mut den = (rows[i] + cols[i]) as f64;
            if modified {
                den -= cm.get(i, i) as f64;
            }
            let sum: f64 = (0..n)
                .filter(|&j| j != i)
                .map(|j| term(cm.get(i, j), den) + term(cm.get(j, i), den))
                .sum();
            -sum
        })
        .collect()
}

/// CEN: confusion entropy.
pub fn cen(ctx: &StatContext<'_>) -> Array1<f64> {
    confusion_entropy(ctx.matrix(), false)
}

/// MCEN: modified confusion entropy.
pub fn mcen(ctx: &StatContext<'_>) -> Array1<f64> {
    confusion_entropy(ctx.matrix(), true)
}

// =============================================================================
// ROC Summaries
// =============================================================================

/// AUC: (TNR + TPR) / 2.
pub fn auc(ctx: &StatContext<'_>) -> Array1<f64> {
    zip2(ctx.class(Stat::Tnr), ctx.class(Stat::Tpr), |tnr, tpr| {
        (tnr + tpr) / 2.0
    })
}

/// dInd: distance of (FPR, TPR) from the perfect classifier.
pub fn distance_index(ctx: &StatContext<'_>) -> Array1<f64> {
    zip2(ctx.class(Stat::Tnr), ctx.class(Stat::Tpr), |tnr, tpr| {
        ((1.0 - tnr).powi(2) + (1.0 - tpr).powi(2)).sqrt()
    })
}

/// sInd: similarity to the perfect classifier, 1 − dInd/√2.
pub fn similarity_index(ctx: &StatContext<'_>) -> Array1<f64> {
    ctx.class(Stat::DInd).mapv(|d| 1.0 - d / SQRT_2)
}

/// DP: discriminant power.
pub fn discriminant_power(ctx: &StatContext<'_>) -> Array1<f64> {
    let k = 3f64.sqrt() / PI;
    zip2(ctx.class(Stat::Tpr), ctx.class(Stat::Tnr), |tpr, tnr| {
        let x = safe_div(tpr, 1.0 - tpr);
        let y = safe_div(tnr, 1.0 - tnr);
        k * (x.log10() + y.log10())
    })
}

/// GI: Gini index, 2·AUC − 1.
pub fn gini(ctx: &StatContext<'_>) -> Array1<f64> {
    ctx.class(Stat::Auc).mapv(|auc| 2.0 * auc - 1.0)
}

/// AUPR: (PPV + TPR) / 2.
pub fn aupr(ctx: &StatContext<'_>) -> Array1<f64> {
    zip2(ctx.class(Stat::Ppv), ctx.class(Stat::Tpr), |ppv, tpr| {
        (ppv + tpr) / 2.0
    })
}

// =============================================================================
// Interpretation Indices
// =============================================================================

pub fn plr_interpretation(ctx: &StatContext<'_>) -> Array1<f64> {
    ctx.class(Stat::Plr).mapv(encode::<LikelihoodRatioStrength>)
}

pub fn nlr_interpretation(ctx: &StatContext<'_>) -> Array1<f64> {
    ctx.class(Stat::Nlr).mapv(encode::<NegativeLikelihoodStrength>)
}

pub fn dp_interpretation(ctx: &StatContext<'_>) -> Array1<f64> {
    ctx.class(Stat::Dp).mapv(encode::<DiscriminantPower>)
}

pub fn auc_interpretation(ctx: &StatContext<'_>) -> Array1<f64> {
    ctx.class(Stat::Auc).mapv(encode::<AucQuality>)
}

pub fn mcc_interpretation(ctx: &StatContext<'_>) -> Array1<f64> {
    ctx.class(Stat::Mcc).mapv(encode::<MatthewsStrength>)
}

// =============================================================================
// Miscellaneous
// =============================================================================

/// LS: lift score, PPV / PRE.
pub fn lift(ctx: &StatContext<'_>) -> Array1<f64> {
    zip2(ctx.class(Stat::Ppv), ctx.class(Stat::Pre), safe_div)
}

/// AM: automatic/manual difference, TOP − P.
pub fn am(ctx: &StatContext<'_>) -> Array1<f64> {
    &ctx.class(Stat::TestOutcomePositive) - &ctx.class(Stat::ConditionPositive)
}

/// OP: optimized precision, ACC − |TNR − TPR| / (TPR + TNR).
pub fn optimized_precision(ctx: &StatContext<'_>) -> Array1<f64> {
    zip3(
        ctx.class(Stat::Acc),
        ctx.class(Stat::Tpr),
        ctx.class(Stat::Tnr),
        |acc, tpr, tnr| acc - safe_div((tnr - tpr).abs(), tpr + tnr),
    )
}

/// IBA: index of balanced accuracy with weight 1.
pub fn iba(ctx: &StatContext<'_>) -> Array1<f64> {
    zip2(ctx.class(Stat::Tpr), ctx.class(Stat::Tnr), |tpr, tnr| {
        (1.0 + tpr - tnr) * tpr * tnr
    })
}

/// Q: Yule's Q from the odds ratio TP·TN / (FP·FN).
pub fn yule_q(ctx: &StatContext<'_>) -> Array1<f64> {
    zip4(
        ctx.class(Stat::TruePositive),
        ctx.class(Stat::TrueNegative),
        ctx.class(Stat::FalsePositive),
        ctx.class(Stat::FalseNegative),
        |tp, tn, fp, fn_| {
            let odds = safe_div(tp * tn, fp * fn_);
            safe_div(odds - 1.0, odds + 1.0)
        },
    )
}

/// AGM: adjusted geometric mean. Zero when TPR is zero.
pub fn agm(ctx: &StatContext<'_>) -> Array1<f64> {
    let nn = zip2(
        ctx.class(Stat::ConditionNegative),
        ctx.class(Stat::Population),
        safe_div,
    );
    Zip::from(ctx.class(Stat::Tpr))
        .and(ctx.class(Stat::Tnr))
        .and(ctx.class(Stat::Gm))
        .and(&nn)
        .map_collect(|&tpr, &tnr, &gm, &nn| {
            if tpr == 0.0 {
                0.0
            } else {
                safe_div(gm + tnr * nn, 1.0 + nn)
            }
        })
}

/// AGF: adjusted F-score, sqrt(F2 · inverse F0.5).
///
/// The inverse F0.5 swaps the roles of positives and negatives.
pub fn agf(ctx: &StatContext<'_>) -> Array1<f64> {
    zip4(
        ctx.class(Stat::F2),
        ctx.class(Stat::TrueNegative),
        ctx.class(Stat::FalsePositive),
        ctx.class(Stat::FalseNegative),
        |f2, tn, fp, fn_| (f2 * f_beta(tn, fn_, fp, 0.5)).sqrt(),
    )
}

/// OC: overlap coefficient, TP / min(TOP, P).
pub fn overlap(ctx: &StatContext<'_>) -> Array1<f64> {
    zip3(
        ctx.class(Stat::TruePositive),
        ctx.class(Stat::TestOutcomePositive),
        ctx.class(Stat::ConditionPositive),
        |tp, top, p| safe_div(tp, top.min(p)),
    )
}

/// OOC: Otsuka-Ochiai coefficient, TP / sqrt(TOP · P).
pub fn otsuka_ochiai(ctx: &StatContext<'_>) -> Array1<f64> {
    zip3(
        ctx.class(Stat::TruePositive),
        ctx.class(Stat::TestOutcomePositive),
        ctx.class(Stat::ConditionPositive),
        |tp, top, p| safe_div(tp, (top * p).sqrt()),
    )
}

/// BCD: Bray-Curtis dissimilarity, |AM| / (ΣTOP + ΣP).
pub fn bray_curtis(ctx: &StatContext<'_>) -> Array1<f64> {
    let total = ctx.class(Stat::TestOutcomePositive).sum() + ctx.class(Stat::ConditionPositive).sum();
    ctx.class(Stat::Am).mapv(|am| safe_div(am.abs(), total))
}
