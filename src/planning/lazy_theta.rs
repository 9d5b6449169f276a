//! Lazy Theta* search engine.
//!
//! Theta* produces any-angle paths by letting a node's parent be any
//! visible ancestor instead of only the neighbor that generated it. The
//! lazy variant defers the visibility check: at generation time every
//! neighbor is optimistically relaxed straight through the expanding
//! node's parent, and the line of sight is verified only when a node is
//! popped for expansion. A failed check falls back to the best one-step
//! predecessor and requeues the node with corrected keys, so each node
//! needs at most one line-of-sight test per expansion instead of one per
//! generated edge.

use log::{debug, trace};

use crate::core::GridCoord;
use crate::error::{PlanError, Result};
use crate::grid::OccupancyGrid;
use crate::query::line_of_sight;

use super::arena::NodeArena;
use super::open_list::{OpenEntry, OpenList};
use super::types::{PlannedPath, PlannerConfig};

/// Any-angle path planner over an occupancy grid.
///
/// The per-cell arena and the open list are allocated once, sized to the
/// grid, and reused across calls; planning many goals on one engine does
/// not churn the allocator.
pub struct LazyThetaStar<'a> {
    grid: &'a OccupancyGrid,
    config: PlannerConfig,
    arena: NodeArena,
    open: OpenList,
}

impl<'a> LazyThetaStar<'a> {
    /// Create a planner for a grid
    pub fn new(grid: &'a OccupancyGrid, config: PlannerConfig) -> Self {
        Self {
            grid,
            config,
            arena: NodeArena::new(grid.cell_count()),
            open: OpenList::new(),
        }
    }

    /// Create a planner with default configuration
    pub fn with_defaults(grid: &'a OccupancyGrid) -> Self {
        Self::new(grid, PlannerConfig::default())
    }

    /// The active configuration
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Find a path between two free cells.
    ///
    /// An unreachable goal is a normal outcome and comes back as
    /// [`PlannedPath::unreachable`]; errors are reserved for invalid
    /// input, an exhausted expansion budget, and corrupted search state.
    /// Input validation runs before any search state is touched.
    pub fn find_path(&mut self, start: GridCoord, goal: GridCoord) -> Result<PlannedPath> {
        let (start_idx, goal_idx) = self.validate_endpoints(start, goal)?;

        trace!(
            "[LazyTheta*] find_path: start=({},{}) goal=({},{})",
            start.x,
            start.y,
            goal.x,
            goal.y
        );

        if start == goal {
            return Ok(PlannedPath {
                waypoints: vec![start],
                length: 0.0,
                expansions: 0,
                los_checks: 0,
            });
        }

        let grid = self.grid;
        self.arena.begin_search();
        self.open.clear();

        let mut expansions: usize = 0;
        let mut los_checks: usize = 0;

        let h_start = self.weighted_h(start, goal);
        self.arena.relax(start_idx, 0.0, start_idx);
        self.open.push(OpenEntry {
            f: h_start,
            h: h_start,
            g: 0.0,
            idx: start_idx as u32,
        });

        while let Some(entry) = self.open.pop() {
            let idx = entry.idx as usize;

            // Lazy invalidation: entries superseded by a better relaxation
            // or belonging to finished nodes fall out here.
            if self.arena.is_closed(idx) || entry.g != self.arena.g(idx) {
                continue;
            }

            let coord = grid.coord_at(idx);
            let parent_idx = match self.arena.parent(idx) {
                Some(p) => p,
                None => {
                    return Err(PlanError::Invariant(format!(
                        "open node ({}, {}) has no parent",
                        coord.x, coord.y
                    )));
                }
            };

            // Deferred validation gate: the optimistic parent assigned at
            // generation time is only trusted once the segment to it turns
            // out to be visible. Otherwise the node drops back to its best
            // one-step predecessor and goes around with corrected keys.
            if idx != start_idx {
                los_checks += 1;
                if !line_of_sight(grid, grid.coord_at(parent_idx), coord) {
                    let (fallback_g, fallback_parent) = self.best_step_predecessor(coord)?;
                    self.arena.relax(idx, fallback_g, fallback_parent);
                    let h = self.weighted_h(coord, goal);
                    self.open.push(OpenEntry {
                        f: fallback_g + h,
                        h,
                        g: fallback_g,
                        idx: entry.idx,
                    });
                    continue;
                }
            }

            if idx == goal_idx {
                let path = self.reconstruct(start_idx, goal_idx, expansions, los_checks)?;
                debug!(
                    "[LazyTheta*] path found: {} waypoints, length={:.3}, expansions={}, los_checks={}",
                    path.waypoints.len(),
                    path.length,
                    expansions,
                    los_checks
                );
                return Ok(path);
            }

            expansions += 1;
            if expansions > self.config.max_expansions {
                debug!(
                    "[LazyTheta*] FAILED: expansion budget exhausted ({} nodes)",
                    expansions
                );
                return Err(PlanError::ExpansionBudgetExceeded { expansions });
            }
            self.arena.close(idx);
            trace!(
                "[LazyTheta*] expand ({},{}) g={:.3} open={}",
                coord.x,
                coord.y,
                entry.g,
                self.open.len()
            );

            let parent_coord = grid.coord_at(parent_idx);
            let parent_g = self.arena.g(parent_idx);

            for neighbor in grid.neighbors(coord) {
                let nidx = match grid.index_of(neighbor) {
                    Some(i) => i,
                    None => continue,
                };
                if self.arena.is_closed(nidx) {
                    continue;
                }

                // Optimistic any-angle relaxation through the parent; the
                // line of sight stays unchecked until this neighbor is
                // itself expanded.
                let tentative = parent_g + parent_coord.euclidean_distance(&neighbor);
                if tentative < self.arena.g(nidx) {
                    self.arena.relax(nidx, tentative, parent_idx);
                    let h = self.weighted_h(neighbor, goal);
                    self.open.push(OpenEntry {
                        f: tentative + h,
                        h,
                        g: tentative,
                        idx: nidx as u32,
                    });
                }
            }
        }

        debug!(
            "[LazyTheta*] goal ({},{}) unreachable from ({},{}) after {} expansions",
            goal.x, goal.y, start.x, start.y, expansions
        );
        Ok(PlannedPath::unreachable(expansions, los_checks))
    }

    /// Bounds and traversability checks for both endpoints.
    fn validate_endpoints(&self, start: GridCoord, goal: GridCoord) -> Result<(usize, usize)> {
        let start_idx = self
            .grid
            .index_of(start)
            .ok_or(PlanError::StartOutOfBounds(start))?;
        let goal_idx = self
            .grid
            .index_of(goal)
            .ok_or(PlanError::GoalOutOfBounds(goal))?;
        if self.grid.is_blocked(start) {
            return Err(PlanError::StartBlocked(start));
        }
        if self.grid.is_blocked(goal) {
            return Err(PlanError::GoalBlocked(goal));
        }
        Ok((start_idx, goal_idx))
    }

    #[inline]
    fn weighted_h(&self, from: GridCoord, goal: GridCoord) -> f32 {
        self.config.heuristic_weight * from.euclidean_distance(&goal)
    }

    /// Best one-step way into `coord` among already-closed neighbors.
    ///
    /// Every open node was generated by expanding some neighbor, so a
    /// candidate must exist; finding none means the bookkeeping is corrupt.
    fn best_step_predecessor(&self, coord: GridCoord) -> Result<(f32, usize)> {
        let mut best: Option<(f32, usize)> = None;
        for neighbor in self.grid.neighbors(coord) {
            let nidx = match self.grid.index_of(neighbor) {
                Some(i) => i,
                None => continue,
            };
            if !self.arena.is_closed(nidx) {
                continue;
            }
            let g = self.arena.g(nidx) + neighbor.euclidean_distance(&coord);
            if best.map_or(true, |(best_g, _)| g < best_g) {
                best = Some((g, nidx));
            }
        }
        best.ok_or_else(|| {
            PlanError::Invariant(format!(
                "no closed predecessor for ({}, {})",
                coord.x, coord.y
            ))
        })
    }

    /// Walk the parent chain goal to start and sum segment lengths.
    fn reconstruct(
        &self,
        start_idx: usize,
        goal_idx: usize,
        expansions: usize,
        los_checks: usize,
    ) -> Result<PlannedPath> {
        let mut waypoints = Vec::new();
        let mut idx = goal_idx;
        let mut hops = 0usize;

        loop {
            waypoints.push(self.grid.coord_at(idx));
            if idx == start_idx {
                break;
            }
            hops += 1;
            if hops > self.grid.cell_count() {
                return Err(PlanError::Invariant(
                    "parent chain does not terminate".into(),
                ));
            }
            idx = match self.arena.parent(idx) {
                Some(p) => p,
                None => return Err(PlanError::Invariant("parent chain broken".into())),
            };
        }

        waypoints.reverse();

        let mut length = 0.0;
        for pair in waypoints.windows(2) {
            length += pair[0].euclidean_distance(&pair[1]);
        }
        length *= self.config.resolution;

        Ok(PlannedPath {
            waypoints,
            length,
            expansions,
            los_checks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQRT_2: f32 = std::f32::consts::SQRT_2;

    fn open_grid(w: i32, h: i32) -> OccupancyGrid {
        OccupancyGrid::open(w, h).unwrap()
    }

    fn assert_segments_visible(grid: &OccupancyGrid, path: &PlannedPath) {
        for pair in path.waypoints.windows(2) {
            assert!(
                line_of_sight(grid, pair[0], pair[1]),
                "segment {:?} -> {:?} is obstructed",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_start_equals_goal() {
        let grid = open_grid(4, 4);
        let mut planner = LazyThetaStar::with_defaults(&grid);
        let path = planner.find_path(GridCoord::new(2, 2), GridCoord::new(2, 2)).unwrap();
        assert_eq!(path.waypoints, vec![GridCoord::new(2, 2)]);
        assert_eq!(path.length, 0.0);
    }

    #[test]
    fn test_free_grid_is_a_single_segment() {
        let grid = open_grid(5, 5);
        let mut planner = LazyThetaStar::with_defaults(&grid);
        let path = planner.find_path(GridCoord::new(0, 0), GridCoord::new(4, 4)).unwrap();
        assert_eq!(
            path.waypoints,
            vec![GridCoord::new(0, 0), GridCoord::new(4, 4)]
        );
        assert!((path.length - 4.0 * SQRT_2).abs() < 1e-6);
    }

    #[test]
    fn test_off_axis_straight_shot() {
        let grid = open_grid(20, 10);
        let mut planner = LazyThetaStar::with_defaults(&grid);
        let start = GridCoord::new(1, 2);
        let goal = GridCoord::new(17, 7);
        let path = planner.find_path(start, goal).unwrap();
        assert_eq!(path.waypoints, vec![start, goal]);
        assert!((path.length - start.euclidean_distance(&goal)).abs() < 1e-5);
    }

    #[test]
    fn test_center_blocked_three_by_three() {
        let mut grid = open_grid(3, 3);
        grid.set_blocked(GridCoord::new(1, 1));
        let mut planner = LazyThetaStar::with_defaults(&grid);
        let path = planner.find_path(GridCoord::new(0, 0), GridCoord::new(2, 2)).unwrap();

        // The true diagonal runs through the blocked center, so the best
        // route threads the corner beside it: one straight cell, one legal
        // diagonal, one straight cell.
        assert!(path.waypoints.len() >= 3);
        assert!((path.length - (2.0 + SQRT_2)).abs() < 1e-6);
        assert!(path.length > 2.0 * SQRT_2);
        assert_segments_visible(&grid, &path);
    }

    #[test]
    fn test_wall_detour() {
        let mut grid = open_grid(11, 11);
        for y in 0..9 {
            grid.set_blocked(GridCoord::new(5, y));
        }
        let start = GridCoord::new(1, 1);
        let goal = GridCoord::new(9, 1);
        let mut planner = LazyThetaStar::with_defaults(&grid);
        let path = planner.find_path(start, goal).unwrap();

        assert!(path.waypoints.len() >= 3);
        assert!(path.length >= start.euclidean_distance(&goal));
        assert_eq!(path.waypoints[0], start);
        assert_eq!(*path.waypoints.last().unwrap(), goal);
        assert_segments_visible(&grid, &path);
    }

    #[test]
    fn test_unreachable_goal_is_not_an_error() {
        let mut grid = open_grid(9, 9);
        // Box in the goal completely
        for x in 3..=7 {
            grid.set_blocked(GridCoord::new(x, 3));
            grid.set_blocked(GridCoord::new(x, 7));
        }
        for y in 3..=7 {
            grid.set_blocked(GridCoord::new(3, y));
            grid.set_blocked(GridCoord::new(7, y));
        }
        let mut planner = LazyThetaStar::with_defaults(&grid);
        let path = planner.find_path(GridCoord::new(0, 0), GridCoord::new(5, 5)).unwrap();

        assert!(!path.is_reachable());
        assert!(path.waypoints.is_empty());
        assert!(path.length.is_infinite());
        assert!(path.expansions > 0);
    }

    #[test]
    fn test_input_validation() {
        let mut grid = open_grid(6, 6);
        grid.set_blocked(GridCoord::new(2, 2));
        grid.set_blocked(GridCoord::new(4, 4));
        let mut planner = LazyThetaStar::with_defaults(&grid);

        assert_eq!(
            planner.find_path(GridCoord::new(-1, 0), GridCoord::new(5, 5)),
            Err(PlanError::StartOutOfBounds(GridCoord::new(-1, 0)))
        );
        assert_eq!(
            planner.find_path(GridCoord::new(0, 0), GridCoord::new(6, 1)),
            Err(PlanError::GoalOutOfBounds(GridCoord::new(6, 1)))
        );
        assert_eq!(
            planner.find_path(GridCoord::new(2, 2), GridCoord::new(5, 5)),
            Err(PlanError::StartBlocked(GridCoord::new(2, 2)))
        );
        assert_eq!(
            planner.find_path(GridCoord::new(0, 0), GridCoord::new(4, 4)),
            Err(PlanError::GoalBlocked(GridCoord::new(4, 4)))
        );

        // A blocked pair of identical endpoints is still an input error
        assert_eq!(
            planner.find_path(GridCoord::new(2, 2), GridCoord::new(2, 2)),
            Err(PlanError::StartBlocked(GridCoord::new(2, 2)))
        );

        // Validation failures leave the planner fully usable
        let path = planner.find_path(GridCoord::new(0, 0), GridCoord::new(5, 5)).unwrap();
        assert!(path.is_reachable());
    }

    #[test]
    fn test_expansion_budget() {
        let grid = open_grid(30, 30);
        let config = PlannerConfig::default().with_max_expansions(3);
        let mut planner = LazyThetaStar::new(&grid, config);
        let result = planner.find_path(GridCoord::new(0, 0), GridCoord::new(29, 29));
        assert!(matches!(
            result,
            Err(PlanError::ExpansionBudgetExceeded { .. })
        ));
    }

    #[test]
    fn test_deterministic_results() {
        let mut grid = open_grid(15, 15);
        for &(x, y) in &[(4, 4), (4, 5), (4, 6), (9, 9), (10, 9), (7, 2), (2, 11)] {
            grid.set_blocked(GridCoord::new(x, y));
        }
        let start = GridCoord::new(0, 7);
        let goal = GridCoord::new(14, 7);

        let mut first = LazyThetaStar::with_defaults(&grid);
        let mut second = LazyThetaStar::with_defaults(&grid);
        let a = first.find_path(start, goal).unwrap();
        let b = second.find_path(start, goal).unwrap();
        assert_eq!(a, b);

        // And again on a reused engine
        let c = first.find_path(start, goal).unwrap();
        assert_eq!(a, c);
    }

    #[test]
    fn test_engine_reuse_across_goals() {
        let mut grid = open_grid(12, 12);
        for y in 2..12 {
            grid.set_blocked(GridCoord::new(6, y));
        }
        let start = GridCoord::new(1, 6);
        let goals = [
            GridCoord::new(10, 6),
            GridCoord::new(11, 1),
            GridCoord::new(5, 11),
        ];

        let mut shared = LazyThetaStar::with_defaults(&grid);
        for goal in goals {
            let reused = shared.find_path(start, goal).unwrap();
            let fresh = LazyThetaStar::with_defaults(&grid).find_path(start, goal).unwrap();
            assert_eq!(reused, fresh, "arena reuse changed the result for {:?}", goal);
        }
    }

    #[test]
    fn test_inflated_heuristic_still_reaches_goal() {
        let mut grid = open_grid(20, 20);
        for y in 0..15 {
            grid.set_blocked(GridCoord::new(10, y));
        }
        let start = GridCoord::new(2, 2);
        let goal = GridCoord::new(18, 2);

        let optimal = LazyThetaStar::with_defaults(&grid)
            .find_path(start, goal)
            .unwrap();
        let config = PlannerConfig::default().with_heuristic_weight(100.0);
        let greedy = LazyThetaStar::new(&grid, config).find_path(start, goal).unwrap();

        assert!(greedy.is_reachable());
        assert_segments_visible(&grid, &greedy);
        // The inflated search may trade length for search effort but never
        // undercuts the optimum.
        assert!(greedy.length >= optimal.length - 1e-4);
    }

    #[test]
    fn test_resolution_scales_reported_length() {
        let grid = open_grid(5, 5);
        let mut config = PlannerConfig::default();
        config.resolution = 0.05;
        let mut planner = LazyThetaStar::new(&grid, config);
        let path = planner.find_path(GridCoord::new(0, 0), GridCoord::new(4, 0)).unwrap();
        assert!((path.length - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_corner_squeeze_is_refused() {
        // A staggered band of blocked cells leaves only diagonal gaps
        // whose corner cells are blocked on both sides. With corner
        // passage refused the two halves of the grid are disconnected.
        let mut grid = open_grid(4, 4);
        grid.set_blocked(GridCoord::new(1, 1));
        grid.set_blocked(GridCoord::new(2, 2));
        grid.set_blocked(GridCoord::new(0, 2));
        grid.set_blocked(GridCoord::new(3, 1));

        let mut planner = LazyThetaStar::with_defaults(&grid);
        let path = planner.find_path(GridCoord::new(0, 0), GridCoord::new(3, 3)).unwrap();
        assert!(!path.is_reachable());
    }
}
