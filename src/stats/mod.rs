//! Statistic identifiers, the static metric registry and evaluation context.
//!
//! Every statistic is a pure, named function registered in a static table
//! ([`StatDef`]). A definition declares the statistics it reads; the
//! [`Schedule`](crate::schedule::Schedule) derives the evaluation stages from
//! those declarations, so adding a metric only means adding a table row.
//!
//! # Scopes
//!
//! - **Per-class** statistics produce one `f64` per class (length-N array).
//! - **Overall** statistics produce a single `f64`. Benchmark scales are
//!   stored as integer category codes, with `-1` for an undefined input.
//!
//! # Available Statistics
//!
//! - [`common`]: base confusion counts (TP, FN, FP, TN, POP, P, N, TOP, TON)
//! - [`class`]: rates, scores, likelihood ratios, entropies and indices per class
//! - [`overall`]: accuracy, the kappa family, chi-squared family, entropies,
//!   averages over classes
//! - [`benchmark`]: qualitative interpretation scales

pub mod benchmark;
pub mod class;
pub mod common;
pub mod overall;
mod registry;

use std::fmt;

use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::confusion::ConfusionMatrix;

pub use registry::REGISTRY;

// =============================================================================
// Scope & Value
// =============================================================================

/// Shape of a statistic's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    /// One value per class.
    PerClass,
    /// A single scalar.
    Overall,
}

/// A computed statistic value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    PerClass(Array1<f64>),
    Overall(f64),
}

impl StatValue {
    #[inline]
    pub fn scope(&self) -> Scope {
        match self {
            StatValue::PerClass(_) => Scope::PerClass,
            StatValue::Overall(_) => Scope::Overall,
        }
    }

    /// The per-class array, if this is a per-class value.
    pub fn as_per_class(&self) -> Option<ArrayView1<'_, f64>> {
        match self {
            StatValue::PerClass(values) => Some(values.view()),
            StatValue::Overall(_) => None,
        }
    }

    /// The scalar, if this is an overall value.
    pub fn as_overall(&self) -> Option<f64> {
        match self {
            StatValue::PerClass(_) => None,
            StatValue::Overall(value) => Some(*value),
        }
    }
}

// =============================================================================
// Stat
// =============================================================================

/// Identifier of every statistic the scorer computes.
///
/// The declaration order is the report order: base counts, per-class
/// statistics, then overall statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stat {
    // === Base counts ===
    TruePositive,
    FalseNegative,
    FalsePositive,
    TrueNegative,
    Population,
    ConditionPositive,
    ConditionNegative,
    TestOutcomePositive,
    TestOutcomeNegative,

    // === Per-class ===
    Tpr,
    Tnr,
    Ppv,
    Npv,
    Fnr,
    Fpr,
    Fdr,
    For,
    Acc,
    F1,
    F05,
    F2,
    Mcc,
    Bm,
    Mk,
    Icsi,
    Plr,
    Nlr,
    Dor,
    Pre,
    G,
    Racc,
    Err,
    Raccu,
    Jaccard,
    Is,
    Cen,
    Mcen,
    Auc,
    DInd,
    SInd,
    Dp,
    Y,
    Plri,
    Nlri,
    Dpi,
    Auci,
    Gi,
    Ls,
    Am,
    Op,
    Iba,
    Gm,
    Q,
    Agm,
    Mcci,
    Agf,
    Oc,
    Ooc,
    Aupr,
    Bcd,

    // === Overall ===
    OverallAcc,
    OverallRaccu,
    OverallRacc,
    Kappa,
    PcPi,
    PcAc1,
    PcS,
    ScottPi,
    GwetAc1,
    BennettS,
    KappaSe,
    KappaUnbiased,
    KappaNoPrevalence,
    KappaCiUpper,
    KappaCiLower,
    OverallAccSe,
    OverallAccCiUpper,
    OverallAccCiLower,
    ChiSquared,
    PhiSquared,
    CramerV,
    ResponseEntropy,
    ReferenceEntropy,
    CrossEntropy,
    JointEntropy,
    ConditionalEntropy,
    MutualInformation,
    KlDivergence,
    LambdaB,
    LambdaA,
    ChiSquaredDf,
    OverallJaccard,
    HammingLoss,
    ZeroOneLoss,
    Nir,
    PValue,
    OverallCen,
    OverallMcen,
    OverallMcc,
    Rr,
    Cba,
    Aunu,
    Aunp,
    Rci,
    Csi,
    PearsonC,
    MicroAverage,
    MatthewsBenchmark,
    CicchettiBenchmark,
    LandisKochBenchmark,
    FleissBenchmark,
    AltmanBenchmark,
    CramerBenchmark,
    TprMacro,
    PpvMacro,
    AccMacro,
    F1Macro,
}

impl Stat {
    /// Number of statistics.
    pub const COUNT: usize = Stat::F1Macro as usize + 1;

    /// Position of this statistic in [`REGISTRY`] and in report order.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The registry entry of this statistic.
    #[inline]
    pub fn def(self) -> &'static StatDef {
        &REGISTRY[self.index()]
    }

    /// Short name, e.g. `"TPR"` or `"Kappa"`.
    #[inline]
    pub fn name(self) -> &'static str {
        self.def().name
    }

    /// Descriptive label used in reports, e.g. `"TPR(Sensitivity / recall / hit rate / true positive rate)"`.
    #[inline]
    pub fn label(self) -> &'static str {
        self.def().label
    }

    #[inline]
    pub fn scope(self) -> Scope {
        self.def().scope()
    }

    /// Statistics this one reads.
    #[inline]
    pub fn deps(self) -> &'static [Stat] {
        self.def().deps
    }

    /// Iterate over every statistic in report order.
    pub fn all() -> impl Iterator<Item = Stat> {
        REGISTRY.iter().map(|def| def.stat)
    }

    /// Look a statistic up by short name or report label.
    ///
    /// Matching ignores ASCII case.
    pub fn from_name(name: &str) -> Option<Stat> {
        let name = name.trim();
        REGISTRY
            .iter()
            .find(|def| def.name.eq_ignore_ascii_case(name) || def.label.eq_ignore_ascii_case(name))
            .map(|def| def.stat)
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// StatDef
// =============================================================================

/// Function computing one per-class statistic.
pub type PerClassFn = fn(&StatContext<'_>) -> Array1<f64>;

/// Function computing one overall statistic.
pub type OverallFn = fn(&StatContext<'_>) -> f64;

/// The compute function of a statistic, tagged with its scope.
#[derive(Clone, Copy)]
pub enum Compute {
    PerClass(PerClassFn),
    Overall(OverallFn),
}

/// Registry entry: a named, pure statistic with declared dependencies.
pub struct StatDef {
    pub stat: Stat,
    /// Short name (registry key).
    pub name: &'static str,
    /// Descriptive label (report row title).
    pub label: &'static str,
    /// Statistics read by `compute`. The confusion matrix is always readable.
    pub deps: &'static [Stat],
    pub compute: Compute,
}

impl StatDef {
    #[inline]
    pub fn scope(&self) -> Scope {
        match self.compute {
            Compute::PerClass(_) => Scope::PerClass,
            Compute::Overall(_) => Scope::Overall,
        }
    }

    /// Run the compute function.
    pub fn evaluate(&self, ctx: &StatContext<'_>) -> StatValue {
        match self.compute {
            Compute::PerClass(f) => StatValue::PerClass(f(ctx)),
            Compute::Overall(f) => StatValue::Overall(f(ctx)),
        }
    }
}

impl fmt::Debug for StatDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatDef")
            .field("stat", &self.stat)
            .field("name", &self.name)
            .field("scope", &self.scope())
            .field("deps", &self.deps)
            .finish()
    }
}

// =============================================================================
// StatContext
// =============================================================================

/// Read-only view handed to a compute function.
///
/// Exposes the confusion matrix and the already computed values of the
/// statistic's declared dependencies.
#[derive(Clone, Copy)]
pub struct StatContext<'a> {
    matrix: &'a ConfusionMatrix,
    values: &'a [Option<StatValue>],
    deps: &'static [Stat],
}

impl<'a> StatContext<'a> {
    /// Create a context for a statistic declaring `deps`.
    ///
    /// `values` is indexed by [`Stat::index`].
    pub fn new(
        matrix: &'a ConfusionMatrix,
        values: &'a [Option<StatValue>],
        deps: &'static [Stat],
    ) -> Self {
        Self {
            matrix,
            values,
            deps,
        }
    }

    #[inline]
    pub fn matrix(&self) -> &'a ConfusionMatrix {
        self.matrix
    }

    #[inline]
    pub fn n_classes(&self) -> usize {
        self.matrix.n_classes()
    }

    /// Values of a per-class dependency.
    ///
    /// # Panics
    ///
    /// Panics if `stat` has not been computed or is not per-class. Reading a
    /// statistic that is not a declared dependency fails a debug assertion.
    pub fn class(&self, stat: Stat) -> ArrayView1<'a, f64> {
        match self.value(stat) {
            StatValue::PerClass(values) => values.view(),
            StatValue::Overall(_) => panic!("{stat:?} is an overall statistic"),
        }
    }

    /// Value of an overall dependency.
    ///
    /// # Panics
    ///
    /// Panics if `stat` has not been computed or is not overall. Reading a
    /// statistic that is not a declared dependency fails a debug assertion.
    pub fn overall(&self, stat: Stat) -> f64 {
        match self.value(stat) {
            StatValue::Overall(value) => *value,
            StatValue::PerClass(_) => panic!("{stat:?} is a per-class statistic"),
        }
    }

    fn value(&self, stat: Stat) -> &'a StatValue {
        debug_assert!(
            self.deps.contains(&stat),
            "{stat:?} read without being declared as a dependency"
        );
        self.values
            .get(stat.index())
            .and_then(Option::as_ref)
            .unwrap_or_else(|| panic!("{stat:?} read before it was computed"))
    }
}
