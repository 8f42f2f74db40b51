//! Edge cases: degenerate inputs, perfect and inverted classifiers, labels
//! that occur on one side only, undefined interpretations.

use approx::assert_abs_diff_eq;
use rstest::rstest;

use scorer::{
    evaluate, Altman, Cicchetti, DiscriminantPower, Fleiss, LandisKoch, ScorerError, Stat,
};

// =============================================================================
// Input Validation
// =============================================================================

#[rstest]
#[case::empty(&[], &[], 0)]
#[case::single_label(&[3, 3, 3], &[3, 3, 3], 1)]
#[case::single_sample(&[7], &[7], 1)]
fn degenerate_class_sets(#[case] y_true: &[i32], #[case] y_pred: &[i32], #[case] n: usize) {
    let err = evaluate(y_true, y_pred).unwrap_err();
    assert!(
        matches!(err, ScorerError::DegenerateClasses { n_classes } if n_classes == n),
        "unexpected error: {err}"
    );
}

#[rstest]
#[case(&[0, 1, 1], &[0, 1])]
#[case(&[0], &[0, 1])]
#[case(&[], &[1])]
fn length_mismatch(#[case] y_true: &[i32], #[case] y_pred: &[i32]) {
    let err = evaluate(y_true, y_pred).unwrap_err();
    match err {
        ScorerError::LengthMismatch { n_true, n_pred } => {
            assert_eq!(n_true, y_true.len());
            assert_eq!(n_pred, y_pred.len());
        }
        other => panic!("expected LengthMismatch, got {other}"),
    }
}

#[test]
fn error_messages_name_the_problem() {
    let err = evaluate(&[0, 1, 1], &[0, 1]).unwrap_err();
    assert!(err.to_string().contains("3 true labels and 2 predicted labels"));
    let err = evaluate(&[5], &[5]).unwrap_err();
    assert!(err.to_string().contains("greater than 1"));
}

// =============================================================================
// Perfect and Inverted Classifiers
// =============================================================================

#[rstest]
#[case::binary(&[0, 1, 0, 1, 1, 0])]
#[case::three_classes(&[0, 1, 2, 2, 1, 0, 2])]
#[case::sparse_labels(&[-5, 10, 10, 400, -5])]
fn perfect_classifier(#[case] labels: &[i32]) {
    let s = evaluate(labels, labels).unwrap();
    let n = s.n_classes();

    assert_abs_diff_eq!(s.overall_stat(Stat::OverallAcc), 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(s.overall_stat(Stat::Kappa), 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(s.overall_stat(Stat::OverallMcc), 1.0, epsilon = 1e-9);
    assert_eq!(s.overall_stat(Stat::ZeroOneLoss), 0.0);
    assert_eq!(s.class_stat(Stat::FalsePositive).to_vec(), vec![0.0; n]);
    assert_eq!(s.class_stat(Stat::FalseNegative).to_vec(), vec![0.0; n]);
    for stat in [Stat::Tpr, Stat::Ppv, Stat::Acc, Stat::F1] {
        for &v in s.class_stat(stat) {
            assert_abs_diff_eq!(v, 1.0, epsilon = 1e-9);
        }
    }

    assert_eq!(s.landis_koch(), Some(LandisKoch::AlmostPerfect));
    assert_eq!(s.fleiss(), Some(Fleiss::Excellent));
    assert_eq!(s.altman(), Some(Altman::VeryGood));
    assert_eq!(s.cicchetti(), Some(Cicchetti::Excellent));
}

#[test]
fn binary_overall_accuracy() {
    // confusion matrix [[5, 1], [2, 8]]
    let mut y_true = vec![0; 6];
    y_true.extend([1; 10]);
    let mut y_pred = vec![0; 5];
    y_pred.extend([1, 0, 0]);
    y_pred.extend([1; 8]);
    let s = evaluate(&y_true, &y_pred).unwrap();

    assert_eq!(s.confusion_matrix().to_rows(), vec![vec![5, 1], vec![2, 8]]);
    assert_abs_diff_eq!(s.overall_stat(Stat::OverallAcc), 0.8125, epsilon = 1e-12);
}

#[test]
fn inverted_binary_classifier() {
    let s = evaluate(&[0, 0, 1, 1], &[1, 1, 0, 0]).unwrap();

    assert_eq!(s.overall_stat(Stat::OverallAcc), 0.0);
    assert_abs_diff_eq!(s.overall_stat(Stat::Kappa), -1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(s.overall_stat(Stat::OverallMcc), -1.0, epsilon = 1e-9);
    assert_eq!(s.landis_koch(), Some(LandisKoch::Poor));
}

// =============================================================================
// Class Set Edges
// =============================================================================

#[test]
fn label_only_predicted() {
    // class 2 never occurs in the reference labels
    let s = evaluate(&[0, 0, 1, 1], &[0, 2, 1, 1]).unwrap();

    assert_eq!(s.classes().labels(), &[0, 1, 2]);
    assert_eq!(s.class_stat(Stat::ConditionPositive).to_vec(), vec![2.0, 2.0, 0.0]);
    assert_eq!(s.class_stat(Stat::TestOutcomePositive).to_vec(), vec![1.0, 2.0, 1.0]);

    // zero denominators stay finite
    let tpr = s.class_stat(Stat::Tpr);
    assert_eq!(tpr[2], 0.0);
    assert!(s.class_stat(Stat::Ppv).iter().all(|v| v.is_finite()));
    assert_eq!(s.class_stat_of(Stat::TestOutcomePositive, &2), Some(1.0));

    // the absent reference class contributes nothing to the information terms
    assert_abs_diff_eq!(s.overall_stat(Stat::KlDivergence), 0.5, epsilon = 1e-9);
    assert_abs_diff_eq!(s.overall_stat(Stat::CrossEntropy), 1.5, epsilon = 1e-9);
    assert_abs_diff_eq!(s.overall_stat(Stat::ReferenceEntropy), 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(s.overall_stat(Stat::ResponseEntropy), 1.5, epsilon = 1e-9);
    assert_abs_diff_eq!(s.overall_stat(Stat::JointEntropy), 1.5, epsilon = 1e-9);
    assert_abs_diff_eq!(s.overall_stat(Stat::ConditionalEntropy), 0.5, epsilon = 1e-9);
    assert_abs_diff_eq!(s.overall_stat(Stat::MutualInformation), 1.0, epsilon = 1e-9);

    // TPR = 0 sends DP to -inf; IS mixes +inf and -inf
    assert_eq!(s.class_stat(Stat::Dp)[2], f64::NEG_INFINITY);
    assert_eq!(s.class_stat(Stat::Dpi)[2], -1.0);
    assert!(s.class_stat(Stat::Is)[2].is_nan());
    assert!(s.class_stat(Stat::Is).iter().take(2).all(|v| v.is_finite()));
}

#[test]
fn label_only_in_reference() {
    let s = evaluate(&[0, 1, 2], &[0, 1, 1]).unwrap();
    assert_eq!(s.class_stat(Stat::TestOutcomePositive).to_vec(), vec![1.0, 2.0, 0.0]);
    assert_eq!(s.class_stat(Stat::Ppv)[2], 0.0);
}

#[test]
fn string_labels_match_integer_encoding() {
    let t = ["cat", "dog", "cat", "bird", "dog"];
    let p = ["cat", "cat", "cat", "bird", "dog"];
    let by_name = evaluate(&t, &p).unwrap();

    // bird = 0, cat = 1, dog = 2
    let by_index = evaluate(&[1, 2, 1, 0, 2], &[1, 1, 1, 0, 2]).unwrap();

    assert_eq!(by_name.classes().labels(), &["bird", "cat", "dog"]);
    assert_eq!(by_name.confusion_matrix(), by_index.confusion_matrix());
    for ((a, x), (b, y)) in by_name.overall().zip(by_index.overall()) {
        assert_eq!(a, b);
        assert!(x == y || (x.is_nan() && y.is_nan()), "{a:?}: {x} vs {y}");
    }
}

#[test]
fn two_class_statistics_mirror() {
    let s = evaluate(&[0, 0, 0, 0, 0, 0, 1, 1, 1, 1], &[0, 0, 0, 0, 1, 1, 1, 1, 1, 0]).unwrap();
    let tpr = s.class_stat(Stat::Tpr);
    let tnr = s.class_stat(Stat::Tnr);
    assert_abs_diff_eq!(tpr[0], tnr[1], epsilon = 1e-12);
    assert_abs_diff_eq!(tpr[1], tnr[0], epsilon = 1e-12);

    // binary MCC is class-symmetric and equals the overall MCC
    let mcc = s.class_stat(Stat::Mcc);
    assert_abs_diff_eq!(mcc[0], mcc[1], epsilon = 1e-9);
    assert_abs_diff_eq!(mcc[0], s.overall_stat(Stat::OverallMcc), epsilon = 1e-9);
}

// =============================================================================
// Undefined Values
// =============================================================================

#[test]
fn undefined_discriminant_power_uses_sentinel() {
    // class 0 has TP = 0, class 1 has TN = 0: both log terms diverge
    let s = evaluate(&[0, 0, 1, 1, 1, 1], &[1, 1, 0, 0, 0, 1]).unwrap();

    assert!(s.class_stat(Stat::Dp).iter().all(|v| v.is_infinite()));
    assert_eq!(s.class_stat(Stat::Dpi).to_vec(), vec![-1.0, -1.0]);
    assert_eq!(s.dp_interpretation(), vec![None::<DiscriminantPower>, None]);
}

#[test]
fn information_score_without_hits_is_negative_infinity() {
    let s = evaluate(&[0, 0, 1, 1, 1, 1], &[1, 1, 0, 0, 0, 1]).unwrap();
    let is = s.class_stat(Stat::Is);
    assert_eq!(is[0], f64::NEG_INFINITY);
    assert!(is[1].is_finite());
}

#[test]
fn interpretation_codes_are_integers_or_sentinel() {
    let s = evaluate(&[0, 0, 1, 1, 1, 1], &[1, 1, 0, 0, 0, 1]).unwrap();
    for stat in [Stat::Plri, Stat::Nlri, Stat::Dpi, Stat::Auci, Stat::Mcci] {
        for &code in s.class_stat(stat) {
            assert!(code == -1.0 || (code >= 0.0 && code.fract() == 0.0), "{stat:?}: {code}");
        }
    }
    for stat in [
        Stat::LandisKochBenchmark,
        Stat::FleissBenchmark,
        Stat::AltmanBenchmark,
        Stat::CicchettiBenchmark,
        Stat::CramerBenchmark,
        Stat::MatthewsBenchmark,
    ] {
        let code = s.overall_stat(stat);
        assert!(code == -1.0 || (code >= 0.0 && code.fract() == 0.0), "{stat:?}: {code}");
    }
}
