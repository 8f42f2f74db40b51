//! Pinned definitions where published formulas and historical implementations
//! disagree.

use approx::assert_abs_diff_eq;

use scorer::testing::{CANONICAL_PRED, CANONICAL_TRUE};
use scorer::{evaluate, Stat};

/// AUNP is the prevalence-weighted mean of the per-class AUC.
///
/// One historical variant divided by the AUC instead of multiplying, which
/// lands outside `[0, 1]`; this pins the weighted mean.
#[test]
fn aunp_is_prevalence_weighted_auc() {
    let s = evaluate(&CANONICAL_TRUE, &CANONICAL_PRED).unwrap();
    let auc = s.class_stat(Stat::Auc);
    let p = s.class_stat(Stat::ConditionPositive);
    let pop = s.class_stat(Stat::Population);

    let weighted: f64 = (0..3).map(|i| p[i] / pop[i] * auc[i]).sum();
    let divided: f64 = (0..3).map(|i| p[i] / (pop[i] * auc[i])).sum();

    let aunp = s.overall_stat(Stat::Aunp);
    assert_abs_diff_eq!(aunp, weighted, epsilon = 1e-9);
    assert_abs_diff_eq!(aunp, 0.66667, epsilon = 1e-5);
    assert!((aunp - divided).abs() > 0.5);
    assert!(auc.iter().all(|&a| a >= 0.58) && aunp <= 1.0);
}

/// RACCU uses the squared mean of reference and response prevalence.
#[test]
fn raccu_is_squared_mean_prevalence() {
    let s = evaluate(&CANONICAL_TRUE, &CANONICAL_PRED).unwrap();
    let p = s.class_stat(Stat::ConditionPositive);
    let top = s.class_stat(Stat::TestOutcomePositive);
    let raccu = s.class_stat(Stat::Raccu);
    for i in 0..3 {
        let expected = ((p[i] + top[i]) / 24.0).powi(2);
        assert_abs_diff_eq!(raccu[i], expected, epsilon = 1e-9);
    }
}

/// IS = -log2(P/POP) + log2(TP/TOP).
#[test]
fn information_score_definition() {
    let s = evaluate(&CANONICAL_TRUE, &CANONICAL_PRED).unwrap();
    let is = s.class_stat(Stat::Is);
    // class 0: -log2(3/12) + log2(3/5)
    assert_abs_diff_eq!(is[0], 2.0 + (0.6f64).log2(), epsilon = 1e-9);
    // class 2: -log2(6/12) + log2(3/5)
    assert_abs_diff_eq!(is[2], 1.0 + (0.6f64).log2(), epsilon = 1e-9);
}

/// Cicchetti's top band includes a perfect kappa of 1.
#[test]
fn cicchetti_includes_perfect_agreement() {
    let s = evaluate(&[0, 1, 2], &[0, 1, 2]).unwrap();
    assert_eq!(s.cicchetti(), Some(scorer::Cicchetti::Excellent));
}

/// Landis & Koch "moderate" starts at 0.4.
#[test]
fn landis_koch_moderate_band() {
    use scorer::{Interpretation, LandisKoch};
    assert_eq!(LandisKoch::from_value(0.4), Some(LandisKoch::Moderate));
    assert_eq!(LandisKoch::from_value(0.3999), Some(LandisKoch::Fair));
}
