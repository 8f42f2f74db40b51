//! Dependency layering and staged evaluation of the metric graph.
//!
//! A [`Schedule`] groups statistics into stages. Every statistic sits one
//! stage after the deepest of its dependencies, so all members of a stage are
//! independent of each other and may run concurrently. Stages run in order;
//! collecting a stage's results is the barrier before the next one starts.
//!
//! ```text
//! stage 0: TP FN FP TN CEN MCEN PC_S Chi-Squared DF
//! stage 1: POP P N TOP TON TPR TNR PPV NPV MCC ...
//! stage 2: FNR FPR FDR FOR ACC RACC ...
//! ...
//! ```

use std::collections::BTreeMap;
use std::sync::OnceLock;
use std::time::Instant;

use crate::confusion::ConfusionMatrix;
use crate::error::ScheduleError;
use crate::logger::ScoreLogger;
use crate::stats::{Stat, StatContext, StatValue, REGISTRY};
use crate::utils::Parallelism;

/// Stat-indexed, write-once value store.
pub type StatStore = Vec<Option<StatValue>>;

/// Statistics grouped into dependency stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    stages: Vec<Vec<Stat>>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done(usize),
}

impl Schedule {
    /// Layer a dependency graph given as `(stat, dependencies)` nodes.
    ///
    /// A node without dependencies lands in stage 0; any other node in
    /// `1 + max(stage of its dependencies)`. Stats of a stage are ordered by
    /// [`Stat::index`].
    ///
    /// # Errors
    ///
    /// - [`ScheduleError::Duplicate`] if a stat is listed twice
    /// - [`ScheduleError::UnknownDependency`] if a dependency is not a node
    /// - [`ScheduleError::Cycle`] if the graph is not acyclic
    pub fn build<'a, I>(nodes: I) -> Result<Self, ScheduleError>
    where
        I: IntoIterator<Item = (Stat, &'a [Stat])>,
    {
        let mut graph: BTreeMap<Stat, &'a [Stat]> = BTreeMap::new();
        for (stat, deps) in nodes {
            if graph.insert(stat, deps).is_some() {
                return Err(ScheduleError::Duplicate(stat));
            }
        }

        for (&stat, deps) in &graph {
            if let Some(&dependency) = deps.iter().find(|&d| !graph.contains_key(d)) {
                return Err(ScheduleError::UnknownDependency { stat, dependency });
            }
        }

        let mut marks: BTreeMap<Stat, Mark> = BTreeMap::new();
        let mut path = Vec::new();
        for &stat in graph.keys() {
            level_of(stat, &graph, &mut marks, &mut path)?;
        }

        let n_stages = marks
            .values()
            .filter_map(|m| match m {
                Mark::Done(level) => Some(level + 1),
                Mark::Visiting => None,
            })
            .max()
            .unwrap_or(0);

        let mut stages = vec![Vec::new(); n_stages];
        // BTreeMap iteration keeps each stage sorted by stat
        for (stat, mark) in marks {
            if let Mark::Done(level) = mark {
                stages[level].push(stat);
            }
        }

        Ok(Self { stages })
    }

    /// The schedule of the full metric registry.
    ///
    /// Built on first use and shared for the lifetime of the process.
    pub fn standard() -> Result<&'static Schedule, ScheduleError> {
        static STANDARD: OnceLock<Result<Schedule, ScheduleError>> = OnceLock::new();
        STANDARD
            .get_or_init(|| Schedule::build(REGISTRY.iter().map(|def| (def.stat, def.deps))))
            .as_ref()
            .map_err(Clone::clone)
    }

    #[inline]
    pub fn stages(&self) -> &[Vec<Stat>] {
        &self.stages
    }

    #[inline]
    pub fn n_stages(&self) -> usize {
        self.stages.len()
    }

    /// Total number of scheduled statistics.
    pub fn len(&self) -> usize {
        self.stages.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage index of `stat`, if scheduled.
    pub fn stage_of(&self, stat: Stat) -> Option<usize> {
        self.stages.iter().position(|s| s.contains(&stat))
    }

    /// Evaluate every scheduled statistic over `matrix`.
    ///
    /// Stats within a stage go through [`Parallelism::maybe_par_map`]; each
    /// result is written exactly once into the returned store.
    pub fn run(
        &self,
        matrix: &ConfusionMatrix,
        parallelism: Parallelism,
        logger: &ScoreLogger,
    ) -> StatStore {
        let mut store: StatStore = vec![None; Stat::COUNT];

        for (index, stage) in self.stages.iter().enumerate() {
            let start = Instant::now();
            let results = {
                let store = &store;
                parallelism.maybe_par_map(stage, |&stat| {
                    let def = stat.def();
                    let ctx = StatContext::new(matrix, store, def.deps);
                    (stat, def.evaluate(&ctx))
                })
            };

            for (stat, value) in results {
                let slot = &mut store[stat.index()];
                debug_assert!(slot.is_none(), "{stat:?} written twice");
                *slot = Some(value);
            }
            logger.log_stage(index, stage, start.elapsed());
        }

        store
    }
}

/// Depth-first level assignment with cycle detection.
fn level_of(
    stat: Stat,
    graph: &BTreeMap<Stat, &[Stat]>,
    marks: &mut BTreeMap<Stat, Mark>,
    path: &mut Vec<Stat>,
) -> Result<usize, ScheduleError> {
    match marks.get(&stat) {
        Some(Mark::Done(level)) => return Ok(*level),
        Some(Mark::Visiting) => {
            let start = path.iter().position(|&s| s == stat).unwrap_or(0);
            let mut cycle = path[start..].to_vec();
            cycle.push(stat);
            return Err(ScheduleError::Cycle(cycle));
        }
        None => {}
    }

    marks.insert(stat, Mark::Visiting);
    path.push(stat);

    let deps = graph.get(&stat).copied().unwrap_or(&[]);
    let mut level = 0;
    for &dep in deps {
        level = level.max(level_of(dep, graph, marks, path)? + 1);
    }

    path.pop();
    marks.insert(stat, Mark::Done(level));
    Ok(level)
}
