//! # Marga-Nav: Any-Angle Grid Path Planning
//!
//! A Lazy Theta* pathfinding library for 2D occupancy grids, built for
//! robots that should drive straight across open floor instead of
//! stair-stepping along grid edges.
//!
//! ## Features
//!
//! - **Any-Angle Paths**: waypoints are turn corners; consecutive waypoints
//!   are connected by straight segments at arbitrary slopes, not cell chains
//! - **Lazy Line-of-Sight**: visibility is checked once per expanded node
//!   instead of once per generated edge
//! - **Exact Supercover Visibility**: integer-only traversal of every cell a
//!   segment crosses, with explicit handling of lattice-corner crossings
//! - **Batch Planning**: one-to-many fans and all-pairs batches, with an
//!   optional worker pool using one engine per thread
//!
//! ## Quick Start
//!
//! ```rust
//! use marga_nav::{GridCoord, LazyThetaStar, OccupancyGrid};
//!
//! // 20x10 map with a partial wall across the middle
//! let mut grid = OccupancyGrid::open(20, 10).unwrap();
//! for y in 0..7 {
//!     grid.set_blocked(GridCoord::new(10, y));
//! }
//!
//! let mut planner = LazyThetaStar::with_defaults(&grid);
//! let path = planner
//!     .find_path(GridCoord::new(2, 2), GridCoord::new(17, 2))
//!     .unwrap();
//!
//! assert!(path.is_reachable());
//! println!(
//!     "{} waypoints, {:.2} cells long",
//!     path.waypoints.len(),
//!     path.length
//! );
//! ```
//!
//! ## Grid Conventions
//!
//! - Cells are stored row-major: `index = y * width + x`
//! - One byte per cell; a single configurable sentinel value marks
//!   obstacles, every other value is traversable
//! - A segment may pass exactly through a lattice corner between two
//!   diagonally-touching cells only if at least one of them is free
//!
//! ## Architecture
//!
//! The library is organized into modules:
//!
//! - [`core`]: fundamental types (GridCoord)
//! - [`grid`]: occupancy grid storage and the step rules
//! - [`query`]: supercover traversal and line-of-sight tests
//! - [`planning`]: the Lazy Theta* engine and its configuration
//! - [`batch`]: multi-goal and pairwise batch planning
//! - [`error`]: error taxonomy
//!
//! ## Data Flow
//!
//! ```text
//!   ┌───────────────┐  neighbors()   ┌────────────────┐
//!   │ OccupancyGrid │───────────────►│  LazyThetaStar │
//!   │  (byte cells) │                │ (arena + heap) │
//!   └───────┬───────┘                └───────┬────────┘
//!           │                                │
//!           │ line_of_sight()                ▼
//!           ▼                        ┌────────────────┐
//!   ┌───────────────┐                │  PlannedPath   │
//!   │ SupercoverLine│                │ (corner points │
//!   │ (cell/corner  │                │  + length)     │
//!   │   crossings)  │                └────────────────┘
//!   └───────────────┘
//! ```
//!
//! ## Determinism
//!
//! Planning is fully deterministic: the open list orders entries by cost,
//! then heuristic, then cell index, so identical inputs always produce
//! identical paths, expansion counts, and line-of-sight counts. Parallel
//! batches return the same results as sequential ones.

pub mod batch;
pub mod core;
pub mod error;
pub mod grid;
pub mod planning;
pub mod query;

// Re-export main types at crate root
pub use crate::core::GridCoord;
pub use error::{PlanError, Result};
pub use grid::{OccupancyGrid, DEFAULT_FREE_VALUE, DEFAULT_OBSTACLE_VALUE};
pub use planning::{
    find_path, path_exists, LazyThetaStar, PlannedPath, PlannerConfig, UNREACHABLE_DISTANCE,
};

// Re-export batch planning types
pub use batch::{MultiGoalPlanner, PairPath};

// Re-export visibility query for path post-processing
pub use query::{cells_crossed, line_of_sight};
