//! The static metric table, in report order.

use super::Stat::{self, *};
use super::{class, common, overall, Compute, StatDef};

macro_rules! per_class {
    ($stat:ident, $name:literal, $label:literal, [$($dep:ident),*], $f:path) => {
        StatDef {
            stat: $stat,
            name: $name,
            label: $label,
            deps: &[$($dep),*],
            compute: Compute::PerClass($f),
        }
    };
}

macro_rules! overall {
    ($stat:ident, $name:literal, $label:literal, [$($dep:ident),*], $f:path) => {
        StatDef {
            stat: $stat,
            name: $name,
            label: $label,
            deps: &[$($dep),*],
            compute: Compute::Overall($f),
        }
    };
}

/// Every statistic, indexed by [`Stat::index`].
pub static REGISTRY: [StatDef; Stat::COUNT] = [
    // === Base counts ===
    per_class!(TruePositive, "TP", "TP(True positive/hit)", [], common::true_positive),
    per_class!(FalseNegative, "FN", "FN(False negative/miss/type 2 error)", [], common::false_negative),
    per_class!(FalsePositive, "FP", "FP(False positive/type 1 error/false alarm)", [], common::false_positive),
    per_class!(TrueNegative, "TN", "TN(True negative/correct rejection)", [], common::true_negative),
    per_class!(Population, "POP", "POP(Population)", [TruePositive, TrueNegative, FalsePositive, FalseNegative], common::population),
    per_class!(ConditionPositive, "P", "P(Condition positive or support)", [TruePositive, FalseNegative], common::condition_positive),
    per_class!(ConditionNegative, "N", "N(Condition negative)", [TrueNegative, FalsePositive], common::condition_negative),
    per_class!(TestOutcomePositive, "TOP", "TOP(Test outcome positive)", [TruePositive, FalsePositive], common::test_outcome_positive),
    per_class!(TestOutcomeNegative, "TON", "TON(Test outcome negative)", [TrueNegative, FalseNegative], common::test_outcome_negative),
    // === Per-class ===
    per_class!(Tpr, "TPR", "TPR(Sensitivity / recall / hit rate / true positive rate)", [TruePositive, FalseNegative], class::tpr),
    per_class!(Tnr, "TNR", "TNR(Specificity or true negative rate)", [TrueNegative, FalsePositive], class::tnr),
    per_class!(Ppv, "PPV", "PPV(Precision or positive predictive value)", [TruePositive, FalsePositive], class::ppv),
    per_class!(Npv, "NPV", "NPV(Negative predictive value)", [TrueNegative, FalseNegative], class::npv),
    per_class!(Fnr, "FNR", "FNR(Miss rate or false negative rate)", [Tpr], class::fnr),
    per_class!(Fpr, "FPR", "FPR(Fall-out or false positive rate)", [Tnr], class::fpr),
    per_class!(Fdr, "FDR", "FDR(False discovery rate)", [Ppv], class::fdr),
    per_class!(For, "FOR", "FOR(False omission rate)", [Npv], class::for_),
    per_class!(Acc, "ACC", "ACC(Accuracy)", [TruePositive, TrueNegative, Population], class::acc),
    per_class!(F1, "F1", "F1(F1 score - harmonic mean of precision and sensitivity)", [TruePositive, FalsePositive, FalseNegative], class::f1),
    per_class!(F05, "F0.5", "F0.5(F0.5 score)", [TruePositive, FalsePositive, FalseNegative], class::f05),
    per_class!(F2, "F2", "F2(F2 score)", [TruePositive, FalsePositive, FalseNegative], class::f2),
    per_class!(Mcc, "MCC", "MCC(Matthews correlation coefficient)", [TruePositive, TrueNegative, FalsePositive, FalseNegative], class::mcc),
    per_class!(Bm, "BM", "BM(Informedness or bookmaker informedness)", [Tpr, Tnr], class::bm),
    per_class!(Mk, "MK", "MK(Markedness)", [Ppv, Npv], class::mk),
    per_class!(Icsi, "ICSI", "ICSI(Individual classification success index)", [Ppv, Tpr], class::icsi),
    per_class!(Plr, "PLR", "PLR(Positive likelihood ratio)", [Tpr, Fpr], class::plr),
    per_class!(Nlr, "NLR", "NLR(Negative likelihood ratio)", [Fnr, Tnr], class::nlr),
    per_class!(Dor, "DOR", "DOR(Diagnostic odds ratio)", [Plr, Nlr], class::dor),
    per_class!(Pre, "PRE", "PRE(Prevalence)", [ConditionPositive, Population], class::pre),
    per_class!(G, "G", "G(G-measure geometric mean of precision and sensitivity)", [Ppv, Tpr], class::g),
    per_class!(Racc, "RACC", "RACC(Random accuracy)", [TestOutcomePositive, ConditionPositive, Population], class::racc),
    per_class!(Err, "ERR", "ERR(Error rate)", [Acc], class::err),
    per_class!(Raccu, "RACCU", "RACCU(Random accuracy unbiased)", [TestOutcomePositive, ConditionPositive, Population], class::raccu),
    per_class!(Jaccard, "J", "J(Jaccard index)", [TruePositive, TestOutcomePositive, ConditionPositive], class::jaccard),
    per_class!(Is, "IS", "IS(Information score)", [TruePositive, TestOutcomePositive, ConditionPositive, Population], class::information_score),
    per_class!(Cen, "CEN", "CEN(Confusion entropy)", [], class::cen),
    per_class!(Mcen, "MCEN", "MCEN(Modified confusion entropy)", [], class::mcen),
    per_class!(Auc, "AUC", "AUC(Area Under the ROC curve)", [Tnr, Tpr], class::auc),
    per_class!(DInd, "dInd", "dInd(Distance index)", [Tnr, Tpr], class::distance_index),
    per_class!(SInd, "sInd", "sInd(Similarity index)", [DInd], class::similarity_index),
    per_class!(Dp, "DP", "DP(Discriminant power)", [Tpr, Tnr], class::discriminant_power),
    per_class!(Y, "Y", "Y(Youden index)", [Bm], class::youden),
    per_class!(Plri, "PLRI", "PLRI(Positive likelihood ratio interpretation)", [Plr], class::plr_interpretation),
    per_class!(Nlri, "NLRI", "NLRI(Negative likelihood ratio interpretation)", [Nlr], class::nlr_interpretation),
    per_class!(Dpi, "DPI", "DPI(Discriminant power interpretation)", [Dp], class::dp_interpretation),
    per_class!(Auci, "AUCI", "AUCI(AUC value interpretation)", [Auc], class::auc_interpretation),
    per_class!(Gi, "GI", "GI(Gini index)", [Auc], class::gini),
    per_class!(Ls, "LS", "LS(Lift score)", [Ppv, Pre], class::lift),
    per_class!(Am, "AM", "AM(Difference between automatic and manual classification)", [TestOutcomePositive, ConditionPositive], class::am),
    per_class!(Op, "OP", "OP(Optimized precision)", [Acc, Tpr, Tnr], class::optimized_precision),
    per_class!(Iba, "IBA", "IBA(Index of balanced accuracy)", [Tpr, Tnr], class::iba),
    per_class!(Gm, "GM", "GM(G-mean geometric mean of specificity and sensitivity)", [Tnr, Tpr], class::gm),
    per_class!(Q, "Q", "Q(Yule Q - coefficient of colligation)", [TruePositive, TrueNegative, FalsePositive, FalseNegative], class::yule_q),
    per_class!(Agm, "AGM", "AGM(Adjusted geometric mean)", [Tpr, Tnr, Gm, ConditionNegative, Population], class::agm),
    per_class!(Mcci, "MCCI", "MCCI(Matthews correlation coefficient interpretation)", [Mcc], class::mcc_interpretation),
    per_class!(Agf, "AGF", "AGF(Adjusted F-score)", [F2, TrueNegative, FalsePositive, FalseNegative], class::agf),
    per_class!(Oc, "OC", "OC(Overlap coefficient)", [TruePositive, TestOutcomePositive, ConditionPositive], class::overlap),
    per_class!(Ooc, "OOC", "OOC(Otsuka-Ochiai coefficient)", [TruePositive, TestOutcomePositive, ConditionPositive], class::otsuka_ochiai),
    per_class!(Aupr, "AUPR", "AUPR(Area under the PR curve)", [Ppv, Tpr], class::aupr),
    per_class!(Bcd, "BCD", "BCD(Bray-Curtis dissimilarity)", [TestOutcomePositive, ConditionPositive, Am], class::bray_curtis),
    // === Overall ===
    overall!(OverallAcc, "Overall ACC", "Overall ACC", [TruePositive, Population], overall::overall_acc),
    overall!(OverallRaccu, "Overall RACCU", "Overall RACCU", [Raccu], overall::overall_raccu),
    overall!(OverallRacc, "Overall RACC", "Overall RACC", [Racc], overall::overall_racc),
    overall!(Kappa, "Kappa", "Kappa", [OverallAcc, OverallRacc], overall::kappa),
    overall!(PcPi, "PC_PI", "PC_PI", [ConditionPositive, TestOutcomePositive, Population], overall::pc_pi),
    overall!(PcAc1, "PC_AC1", "PC_AC1", [ConditionPositive, TestOutcomePositive, Population], overall::pc_ac1),
    overall!(PcS, "PC_S", "PC_S", [], overall::pc_s),
    overall!(ScottPi, "Scott PI", "Scott PI", [OverallAcc, PcPi], overall::scott_pi),
    overall!(GwetAc1, "Gwet AC1", "Gwet AC1", [OverallAcc, PcAc1], overall::gwet_ac1),
    overall!(BennettS, "Bennett S", "Bennett S", [OverallAcc, PcS], overall::bennett_s),
    overall!(KappaSe, "Kappa Standard Error", "Kappa Standard Error", [OverallAcc, OverallRacc, Population], overall::kappa_se),
    overall!(KappaUnbiased, "Kappa Unbiased", "Kappa Unbiased", [OverallAcc, OverallRaccu], overall::kappa_unbiased),
    overall!(KappaNoPrevalence, "Kappa No Prevalence", "Kappa No Prevalence", [OverallAcc], overall::kappa_no_prevalence),
    overall!(KappaCiUpper, "Kappa 95% CI up", "Kappa 95% CI up", [Kappa, KappaSe], overall::kappa_ci_upper),
    overall!(KappaCiLower, "Kappa 95% CI down", "Kappa 95% CI down", [Kappa, KappaSe], overall::kappa_ci_lower),
    overall!(OverallAccSe, "Standard Error", "Standard Error", [OverallAcc, Population], overall::overall_acc_se),
    overall!(OverallAccCiUpper, "95% CI up", "95% CI up", [OverallAcc, OverallAccSe], overall::overall_acc_ci_upper),
    overall!(OverallAccCiLower, "95% CI down", "95% CI down", [OverallAcc, OverallAccSe], overall::overall_acc_ci_lower),
    overall!(ChiSquared, "Chi-Squared", "Chi-Squared", [ConditionPositive, TestOutcomePositive, Population], overall::chi_squared),
    overall!(PhiSquared, "Phi-Squared", "Phi-Squared", [ChiSquared, Population], overall::phi_squared),
    overall!(CramerV, "Cramer V", "Cramer V", [PhiSquared], overall::cramer_v),
    overall!(ResponseEntropy, "Response Entropy", "Response Entropy", [TestOutcomePositive, Population], overall::response_entropy),
    overall!(ReferenceEntropy, "Reference Entropy", "Reference Entropy", [ConditionPositive, Population], overall::reference_entropy),
    overall!(CrossEntropy, "Cross Entropy", "Cross Entropy", [ConditionPositive, TestOutcomePositive, Population], overall::cross_entropy),
    overall!(JointEntropy, "Joint Entropy", "Joint Entropy", [Population], overall::joint_entropy),
    overall!(ConditionalEntropy, "Conditional Entropy", "Conditional Entropy", [ConditionPositive, Population], overall::conditional_entropy),
    overall!(MutualInformation, "Mutual Information", "Mutual Information", [ResponseEntropy, ConditionalEntropy], overall::mutual_information),
    overall!(KlDivergence, "KL Divergence", "KL Divergence", [ConditionPositive, TestOutcomePositive, Population], overall::kl_divergence),
    overall!(LambdaB, "Lambda B", "Lambda B", [TestOutcomePositive, Population], overall::lambda_b),
    overall!(LambdaA, "Lambda A", "Lambda A", [ConditionPositive, Population], overall::lambda_a),
    overall!(ChiSquaredDf, "Chi-Squared DF", "Chi-Squared DF", [], overall::chi_squared_df),
    overall!(OverallJaccard, "Overall J", "Overall J", [Jaccard], overall::overall_jaccard),
    overall!(HammingLoss, "Hamming Loss", "Hamming Loss", [TruePositive, Population], overall::hamming_loss),
    overall!(ZeroOneLoss, "Zero-one Loss", "Zero-one Loss", [TruePositive, Population], overall::zero_one_loss),
    overall!(Nir, "NIR", "NIR", [ConditionPositive, Population], overall::nir),
    overall!(PValue, "P-Value", "P-Value", [TruePositive, Population, Nir], overall::p_value),
    overall!(OverallCen, "Overall CEN", "Overall CEN", [TestOutcomePositive, ConditionPositive, Cen], overall::overall_cen),
    overall!(OverallMcen, "Overall MCEN", "Overall MCEN", [TruePositive, TestOutcomePositive, ConditionPositive, Mcen], overall::overall_mcen),
    overall!(OverallMcc, "Overall MCC", "Overall MCC", [TestOutcomePositive, ConditionPositive], overall::overall_mcc),
    overall!(Rr, "RR", "RR", [TestOutcomePositive], overall::rr),
    overall!(Cba, "CBA", "CBA", [TestOutcomePositive, ConditionPositive], overall::cba),
    overall!(Aunu, "AUNU", "AUNU", [Auc], overall::aunu),
    overall!(Aunp, "AUNP", "AUNP", [ConditionPositive, Population, Auc], overall::aunp),
    overall!(Rci, "RCI", "RCI", [MutualInformation, ReferenceEntropy], overall::rci),
    overall!(Csi, "CSI", "CSI", [Icsi], overall::csi),
    overall!(PearsonC, "Pearson C", "Pearson C", [ChiSquared, Population], overall::pearson_c),
    overall!(MicroAverage, "Micro", "TPR Micro, PPV Micro, F1 Micro", [TruePositive, FalseNegative], overall::micro_average),
    overall!(MatthewsBenchmark, "SOA6", "SOA6(Matthews)", [OverallMcc], overall::matthews_benchmark),
    overall!(CicchettiBenchmark, "SOA4", "SOA4(Cicchetti)", [Kappa], overall::cicchetti),
    overall!(LandisKochBenchmark, "SOA1", "SOA1(Landis & Koch)", [Kappa], overall::landis_koch),
    overall!(FleissBenchmark, "SOA2", "SOA2(Fleiss)", [Kappa], overall::fleiss),
    overall!(AltmanBenchmark, "SOA3", "SOA3(Altman)", [Kappa], overall::altman),
    overall!(CramerBenchmark, "SOA5", "SOA5(Cramer)", [CramerV], overall::cramer_benchmark),
    overall!(TprMacro, "TPR Macro", "TPR Macro", [Tpr], overall::tpr_macro),
    overall!(PpvMacro, "PPV Macro", "PPV Macro", [Ppv], overall::ppv_macro),
    overall!(AccMacro, "ACC Macro", "ACC Macro", [Acc], overall::acc_macro),
    overall!(F1Macro, "F1 Macro", "F1 Macro", [F1], overall::f1_macro),
];
