//! Batch planning over many goals.
//!
//! Wraps the single-query engine for the common fleet patterns:
//! - Fan-out: one start, many goals, results index-aligned with the goals
//! - Pairwise: every unordered pair over `[start] + goals`
//! - Parallel fan-out with one engine per worker thread
//!
//! Goals travel to workers and results travel back over `crossbeam`
//! channels; engines are never shared between threads.

use std::thread;

use crossbeam_channel::bounded;
use log::debug;

use crate::core::GridCoord;
use crate::error::{PlanError, Result};
use crate::grid::OccupancyGrid;
use crate::planning::{LazyThetaStar, PlannedPath, PlannerConfig};

/// Path for one unordered pair of batch points.
///
/// Indices refer to the combined point list: 0 is the start, `i >= 1` is
/// `goals[i - 1]`. Pairs are emitted with `from < to`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PairPath {
    pub from: usize,
    pub to: usize,
    pub path: PlannedPath,
}

/// Plans paths from one start to many goals over a shared grid.
pub struct MultiGoalPlanner<'a> {
    grid: &'a OccupancyGrid,
    config: PlannerConfig,
}

impl<'a> MultiGoalPlanner<'a> {
    /// Create a batch planner for a grid
    pub fn new(grid: &'a OccupancyGrid, config: PlannerConfig) -> Self {
        Self { grid, config }
    }

    /// Create a batch planner with default configuration
    pub fn with_defaults(grid: &'a OccupancyGrid) -> Self {
        Self::new(grid, PlannerConfig::default())
    }

    /// The active configuration
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan paths from `start` to every goal, in order.
    ///
    /// All endpoints are validated before any search runs; one invalid
    /// goal fails the whole batch. Unreachable goals are a normal outcome
    /// and land in the result as [`PlannedPath::unreachable`]. The goals
    /// run sequentially through a single engine.
    pub fn find_paths(&self, start: GridCoord, goals: &[GridCoord]) -> Result<Vec<PlannedPath>> {
        self.validate_batch(start, goals)?;

        let mut engine = LazyThetaStar::new(self.grid, self.config.clone());
        let mut paths = Vec::with_capacity(goals.len());
        for goal in goals {
            paths.push(engine.find_path(start, *goal)?);
        }
        Ok(paths)
    }

    /// Plan paths from `start` to every goal across worker threads.
    ///
    /// Same contract and identical results as [`find_paths`]; `threads`
    /// picks the worker count, with 0 meaning available parallelism. Each
    /// worker owns a private engine, so search state never crosses a
    /// thread boundary.
    ///
    /// [`find_paths`]: MultiGoalPlanner::find_paths
    pub fn find_paths_parallel(
        &self,
        start: GridCoord,
        goals: &[GridCoord],
        threads: usize,
    ) -> Result<Vec<PlannedPath>> {
        self.validate_batch(start, goals)?;

        let requested = if threads == 0 {
            thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
        } else {
            threads
        };
        let workers = requested.min(goals.len()).max(1);
        if workers <= 1 {
            let mut engine = LazyThetaStar::new(self.grid, self.config.clone());
            let mut paths = Vec::with_capacity(goals.len());
            for goal in goals {
                paths.push(engine.find_path(start, *goal)?);
            }
            return Ok(paths);
        }

        debug!(
            "[MultiGoal] planning {} goals across {} workers",
            goals.len(),
            workers
        );

        let (job_tx, job_rx) = bounded::<(usize, GridCoord)>(goals.len());
        let (result_tx, result_rx) = bounded::<(usize, Result<PlannedPath>)>(goals.len());

        for (slot, goal) in goals.iter().copied().enumerate() {
            job_tx
                .send((slot, goal))
                .map_err(|_| PlanError::Invariant("job channel closed early".into()))?;
        }
        drop(job_tx);

        thread::scope(|scope| {
            for worker in 0..workers {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                let mut engine = LazyThetaStar::new(self.grid, self.config.clone());
                thread::Builder::new()
                    .name(format!("planner-{}", worker))
                    .spawn_scoped(scope, move || {
                        for (slot, goal) in job_rx.iter() {
                            let outcome = engine.find_path(start, goal);
                            if result_tx.send((slot, outcome)).is_err() {
                                break;
                            }
                        }
                    })
                    .expect("Failed to spawn planner thread");
            }
        });
        drop(result_tx);

        let mut outcomes: Vec<Option<Result<PlannedPath>>> = vec![None; goals.len()];
        for (slot, outcome) in result_rx.iter() {
            outcomes[slot] = Some(outcome);
        }

        let mut paths = Vec::with_capacity(goals.len());
        for (slot, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Some(result) => paths.push(result?),
                None => {
                    return Err(PlanError::Invariant(format!(
                        "no result for goal {}",
                        slot
                    )));
                }
            }
        }
        Ok(paths)
    }

    /// Plan every unordered pair over the combined list `[start] + goals`.
    ///
    /// Output is ordered lexicographically by `(from, to)` with
    /// `from < to`, which makes the result length `n * (n + 1) / 2` for
    /// `n` goals. Index 0 validates as the start; every other point
    /// validates as a goal.
    pub fn find_path_pairs(&self, start: GridCoord, goals: &[GridCoord]) -> Result<Vec<PairPath>> {
        let points: Vec<GridCoord> = std::iter::once(start)
            .chain(goals.iter().copied())
            .collect();
        for (i, point) in points.iter().copied().enumerate() {
            if !self.grid.contains(point) {
                return Err(match i {
                    0 => PlanError::StartOutOfBounds(point),
                    _ => PlanError::GoalOutOfBounds(point),
                });
            }
            if self.grid.is_blocked(point) {
                return Err(match i {
                    0 => PlanError::StartBlocked(point),
                    _ => PlanError::GoalBlocked(point),
                });
            }
        }

        let mut engine = LazyThetaStar::new(self.grid, self.config.clone());
        let mut pairs = Vec::with_capacity(points.len() * points.len().saturating_sub(1) / 2);
        for from in 0..points.len() {
            for to in (from + 1)..points.len() {
                let path = engine.find_path(points[from], points[to])?;
                pairs.push(PairPath { from, to, path });
            }
        }

        debug!(
            "[MultiGoal] pairwise batch: {} points, {} pairs",
            points.len(),
            pairs.len()
        );
        Ok(pairs)
    }

    fn validate_batch(&self, start: GridCoord, goals: &[GridCoord]) -> Result<()> {
        if !self.grid.contains(start) {
            return Err(PlanError::StartOutOfBounds(start));
        }
        if self.grid.is_blocked(start) {
            return Err(PlanError::StartBlocked(start));
        }
        for goal in goals.iter().copied() {
            if !self.grid.contains(goal) {
                return Err(PlanError::GoalOutOfBounds(goal));
            }
            if self.grid.is_blocked(goal) {
                return Err(PlanError::GoalBlocked(goal));
            }
        }
        Ok(())
    }
}
