//! Lazy Theta* any-angle pathfinding on the occupancy grid.
//!
//! Implements the lazy variant of Theta* with support for:
//! - Any-angle paths whose waypoints are turn corners, not cell chains
//! - Deferred line-of-sight validation (one check per expansion)
//! - Reusable per-grid search state for repeated queries

mod arena;
mod lazy_theta;
mod open_list;
mod types;

pub use lazy_theta::LazyThetaStar;
pub use types::{PlannedPath, PlannerConfig, UNREACHABLE_DISTANCE};

use crate::core::GridCoord;
use crate::error::Result;
use crate::grid::OccupancyGrid;

/// Quick path finding with default configuration
pub fn find_path(grid: &OccupancyGrid, start: GridCoord, goal: GridCoord) -> Result<PlannedPath> {
    let mut planner = LazyThetaStar::with_defaults(grid);
    planner.find_path(start, goal)
}

/// Check if a path exists (invalid endpoints count as no path)
pub fn path_exists(grid: &OccupancyGrid, start: GridCoord, goal: GridCoord) -> bool {
    find_path(grid, start, goal)
        .map(|path| path.is_reachable())
        .unwrap_or(false)
}
