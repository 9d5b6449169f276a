//! Error types for marga-nav.

use thiserror::Error;

use crate::core::GridCoord;

/// Planner error type.
///
/// Covers input validation failures, an exhausted expansion budget, and
/// internal invariant violations. An unreachable goal is a normal planning
/// outcome, not an error; see
/// [`PlannedPath::unreachable`](crate::planning::PlannedPath::unreachable).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("invalid grid dimensions: {width}x{height} with {cells} cells")]
    InvalidDimensions {
        width: i32,
        height: i32,
        cells: usize,
    },

    #[error("start ({}, {}) is outside the grid", .0.x, .0.y)]
    StartOutOfBounds(GridCoord),

    #[error("goal ({}, {}) is outside the grid", .0.x, .0.y)]
    GoalOutOfBounds(GridCoord),

    #[error("start ({}, {}) is on a blocked cell", .0.x, .0.y)]
    StartBlocked(GridCoord),

    #[error("goal ({}, {}) is on a blocked cell", .0.x, .0.y)]
    GoalBlocked(GridCoord),

    #[error("expansion budget exhausted after {expansions} expansions")]
    ExpansionBudgetExceeded { expansions: usize },

    #[error("search invariant violated: {0}")]
    Invariant(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<serde_yaml::Error> for PlanError {
    fn from(e: serde_yaml::Error) -> Self {
        PlanError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;
