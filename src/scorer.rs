//! The scorer: labels in, snapshot out.

use crate::config::ScorerConfig;
use crate::confusion::{ClassSet, ConfusionMatrix};
use crate::error::{Result, ScorerError};
use crate::logger::ScoreLogger;
use crate::schedule::Schedule;
use crate::snapshot::MetricSnapshot;
use crate::stats::Stat;
use crate::utils::{is_undefined, run_with_threads};

/// Evaluates classification scores and keeps the latest result.
///
/// A scorer starts empty. Each successful [`evaluate`](Scorer::evaluate)
/// replaces the held snapshot; a failed one leaves it untouched.
///
/// # Example
///
/// ```
/// use scorer::{Scorer, ScorerConfig, Stat};
///
/// let mut scorer = Scorer::new(ScorerConfig::default());
/// assert!(scorer.snapshot().is_err());
///
/// let y_true = ["cat", "dog", "dog", "cat"];
/// let y_pred = ["cat", "dog", "cat", "cat"];
/// let snapshot = scorer.evaluate(&y_true, &y_pred).unwrap();
/// assert_eq!(snapshot.classes().labels(), &["cat", "dog"]);
/// assert!((snapshot.overall_stat(Stat::OverallAcc) - 0.75).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct Scorer<L> {
    config: ScorerConfig,
    snapshot: Option<MetricSnapshot<L>>,
}

impl<L> Scorer<L> {
    pub fn new(config: ScorerConfig) -> Self {
        Self {
            config,
            snapshot: None,
        }
    }

    #[inline]
    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// The snapshot of the last successful evaluation.
    ///
    /// # Errors
    ///
    /// Returns [`ScorerError::NotComputed`] before the first evaluation.
    pub fn snapshot(&self) -> Result<&MetricSnapshot<L>> {
        self.snapshot.as_ref().ok_or(ScorerError::NotComputed)
    }

    #[inline]
    pub fn is_computed(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Take the held snapshot, if any.
    pub fn into_snapshot(self) -> Option<MetricSnapshot<L>> {
        self.snapshot
    }
}

impl<L: Ord + Clone> Scorer<L> {
    /// Evaluate every statistic for the given labels.
    ///
    /// # Errors
    ///
    /// - [`ScorerError::LengthMismatch`] if the arrays differ in length
    /// - [`ScorerError::DegenerateClasses`] if fewer than two distinct labels
    ///   occur across both arrays
    /// - [`ScorerError::ThreadPool`] if a dedicated pool cannot be built
    pub fn evaluate(&mut self, y_true: &[L], y_pred: &[L]) -> Result<&MetricSnapshot<L>> {
        let snapshot = compute(&self.config, y_true, y_pred)?;
        Ok(self.snapshot.insert(snapshot))
    }
}

impl<L> Default for Scorer<L> {
    fn default() -> Self {
        Self::new(ScorerConfig::default())
    }
}

/// Evaluate with the default configuration.
///
/// # Example
///
/// ```
/// use scorer::{evaluate, LandisKoch};
///
/// let snapshot = evaluate(&[0, 0, 1, 1], &[0, 0, 1, 1]).unwrap();
/// assert_eq!(snapshot.landis_koch(), Some(LandisKoch::AlmostPerfect));
/// ```
pub fn evaluate<L: Ord + Clone>(
    y_true: &[L],
    y_pred: &[L],
) -> Result<MetricSnapshot<L>> {
    compute(&ScorerConfig::default(), y_true, y_pred)
}

fn compute<L: Ord + Clone>(
    config: &ScorerConfig,
    y_true: &[L],
    y_pred: &[L],
) -> Result<MetricSnapshot<L>> {
    let classes = ClassSet::from_labels(y_true, y_pred)?;
    if classes.len() < 2 {
        return Err(ScorerError::DegenerateClasses {
            n_classes: classes.len(),
        });
    }
    let matrix = ConfusionMatrix::from_labels(&classes, y_true, y_pred)?;

    let mut logger = ScoreLogger::new(config.verbosity);
    logger.start_evaluation(y_true.len(), classes.len());

    let schedule = Schedule::standard()?;
    let store = run_with_threads(config.threads(), |parallelism| {
        schedule.run(&matrix, parallelism, &logger)
    })?;

    let snapshot = MetricSnapshot::new(classes, matrix, store)?;

    for (stat, values) in snapshot.per_class() {
        let undefined: Vec<usize> = values
            .iter()
            .enumerate()
            .filter(|(_, &v)| is_undefined(v))
            .map(|(i, _)| i)
            .collect();
        logger.log_undefined(stat, &undefined);
    }
    logger.finish_evaluation(
        snapshot.n_samples(),
        snapshot.n_classes(),
        snapshot.overall_stat(Stat::OverallAcc),
    );

    Ok(snapshot)
}
