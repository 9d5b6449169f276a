//! Occupancy grid storage and adjacency.

mod occupancy;

pub use occupancy::{OccupancyGrid, DEFAULT_FREE_VALUE, DEFAULT_OBSTACLE_VALUE};
