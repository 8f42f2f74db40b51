//! Immutable result of one evaluation.

use ndarray::ArrayView1;
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::confusion::{ClassSet, ConfusionMatrix};
use crate::error::{Result, ScheduleError, ScorerError};
use crate::schedule::StatStore;
use crate::stats::benchmark::{
    Altman, AucQuality, Cicchetti, CramerStrength, DiscriminantPower, Fleiss, Interpretation,
    LandisKoch, LikelihoodRatioStrength, MatthewsStrength, NegativeLikelihoodStrength,
};
use crate::stats::{Scope, Stat, StatValue};

/// Classes, confusion matrix and every statistic of one evaluation.
///
/// A snapshot is never mutated; evaluating again produces a new one.
///
/// # Example
///
/// ```
/// use scorer::{evaluate, Stat};
///
/// let snapshot = evaluate(&[0, 1, 1, 0], &[0, 1, 0, 0]).unwrap();
/// assert_eq!(snapshot.n_classes(), 2);
/// assert_eq!(snapshot.class_stat(Stat::TruePositive).to_vec(), vec![2.0, 1.0]);
/// assert!((snapshot.overall_stat(Stat::OverallAcc) - 0.75).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSnapshot<L> {
    classes: ClassSet<L>,
    matrix: ConfusionMatrix,
    values: Vec<StatValue>,
}

impl<L> MetricSnapshot<L> {
    /// Assemble a snapshot from a fully evaluated store.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::Missing`] if a statistic was never computed.
    pub(crate) fn new(classes: ClassSet<L>, matrix: ConfusionMatrix, store: StatStore) -> Result<Self> {
        let values = store
            .into_iter()
            .zip(Stat::all())
            .map(|(value, stat)| value.ok_or(ScheduleError::Missing(stat)))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self {
            classes,
            matrix,
            values,
        })
    }

    // =========================================================================
    // Inputs
    // =========================================================================

    #[inline]
    pub fn classes(&self) -> &ClassSet<L> {
        &self.classes
    }

    #[inline]
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Number of evaluated samples.
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.matrix.total() as usize
    }

    #[inline]
    pub fn confusion_matrix(&self) -> &ConfusionMatrix {
        &self.matrix
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Value of any statistic.
    #[inline]
    pub fn value(&self, stat: Stat) -> &StatValue {
        &self.values[stat.index()]
    }

    /// Per-class values of `stat`, indexed like [`classes`](Self::classes).
    ///
    /// # Panics
    ///
    /// Panics if `stat` is an overall statistic.
    pub fn class_stat(&self, stat: Stat) -> ArrayView1<'_, f64> {
        match self.value(stat) {
            StatValue::PerClass(values) => values.view(),
            StatValue::Overall(_) => panic!("{stat:?} is an overall statistic"),
        }
    }

    /// Value of overall statistic `stat`.
    ///
    /// # Panics
    ///
    /// Panics if `stat` is a per-class statistic.
    pub fn overall_stat(&self, stat: Stat) -> f64 {
        match self.value(stat) {
            StatValue::Overall(value) => *value,
            StatValue::PerClass(_) => panic!("{stat:?} is a per-class statistic"),
        }
    }

    /// Look a statistic up by short name or report label.
    ///
    /// # Errors
    ///
    /// Returns [`ScorerError::UnknownStat`] if no statistic matches.
    pub fn get(&self, name: &str) -> Result<&StatValue> {
        Stat::from_name(name)
            .map(|stat| self.value(stat))
            .ok_or_else(|| ScorerError::UnknownStat(name.to_string()))
    }

    /// Per-class statistics in report order.
    pub fn per_class(&self) -> impl Iterator<Item = (Stat, ArrayView1<'_, f64>)> + '_ {
        Stat::all().filter_map(move |stat| {
            self.value(stat)
                .as_per_class()
                .map(|values| (stat, values))
        })
    }

    /// Overall statistics in report order.
    pub fn overall(&self) -> impl Iterator<Item = (Stat, f64)> + '_ {
        Stat::all().filter_map(move |stat| self.value(stat).as_overall().map(|v| (stat, v)))
    }

    // =========================================================================
    // Interpretations
    // =========================================================================

    /// Category of an overall benchmark statistic, `None` when undefined.
    pub fn interpretation<I: Interpretation>(&self, stat: Stat) -> Option<I> {
        I::from_code(self.overall_stat(stat))
    }

    /// Category of a per-class interpretation statistic for every class.
    pub fn class_interpretations<I: Interpretation>(&self, stat: Stat) -> Vec<Option<I>> {
        self.class_stat(stat).iter().map(|&c| I::from_code(c)).collect()
    }

    pub fn landis_koch(&self) -> Option<LandisKoch> {
        self.interpretation(Stat::LandisKochBenchmark)
    }

    pub fn fleiss(&self) -> Option<Fleiss> {
        self.interpretation(Stat::FleissBenchmark)
    }

    pub fn altman(&self) -> Option<Altman> {
        self.interpretation(Stat::AltmanBenchmark)
    }

    pub fn cicchetti(&self) -> Option<Cicchetti> {
        self.interpretation(Stat::CicchettiBenchmark)
    }

    pub fn cramer_strength(&self) -> Option<CramerStrength> {
        self.interpretation(Stat::CramerBenchmark)
    }

    pub fn matthews_strength(&self) -> Option<MatthewsStrength> {
        self.interpretation(Stat::MatthewsBenchmark)
    }

    pub fn plr_interpretation(&self) -> Vec<Option<LikelihoodRatioStrength>> {
        self.class_interpretations(Stat::Plri)
    }

    pub fn nlr_interpretation(&self) -> Vec<Option<NegativeLikelihoodStrength>> {
        self.class_interpretations(Stat::Nlri)
    }

    pub fn dp_interpretation(&self) -> Vec<Option<DiscriminantPower>> {
        self.class_interpretations(Stat::Dpi)
    }

    pub fn auc_interpretation(&self) -> Vec<Option<AucQuality>> {
        self.class_interpretations(Stat::Auci)
    }

    pub fn mcc_interpretation(&self) -> Vec<Option<MatthewsStrength>> {
        self.class_interpretations(Stat::Mcci)
    }
}

impl<L: Ord> MetricSnapshot<L> {
    /// Value of per-class statistic `stat` for the class labelled `label`.
    pub fn class_stat_of(&self, stat: Stat, label: &L) -> Option<f64> {
        let i = self.classes.index_of(label)?;
        self.class_stat(stat).get(i).copied()
    }
}

impl<L: Serialize> MetricSnapshot<L> {
    /// Serialize to pretty-printed JSON.
    ///
    /// Undefined values (NaN, infinities) are written as `null`.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// =============================================================================
// Serialization
// =============================================================================

/// Statistics of one scope as a name -> value map in report order.
struct StatsMap<'a> {
    values: &'a [StatValue],
    scope: Scope,
}

impl Serialize for StatsMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for stat in Stat::all().filter(|s| s.scope() == self.scope) {
            match &self.values[stat.index()] {
                StatValue::PerClass(values) => map.serialize_entry(stat.name(), &values.to_vec())?,
                StatValue::Overall(value) => map.serialize_entry(stat.name(), value)?,
            }
        }
        map.end()
    }
}

impl<L: Serialize> Serialize for MetricSnapshot<L> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("MetricSnapshot", 4)?;
        s.serialize_field("classes", &self.classes)?;
        s.serialize_field("confusion_matrix", &self.matrix.to_rows())?;
        s.serialize_field(
            "class_stats",
            &StatsMap {
                values: &self.values,
                scope: Scope::PerClass,
            },
        )?;
        s.serialize_field(
            "overall_stats",
            &StatsMap {
                values: &self.values,
                scope: Scope::Overall,
            },
        )?;
        s.end()
    }
}
