//! Planner configuration and result types.

use serde::{Deserialize, Serialize};

use crate::core::GridCoord;
use crate::error::Result;

/// Distance reported for unreachable goals.
pub const UNREACHABLE_DISTANCE: f32 = f32::INFINITY;

/// Lazy Theta* planner settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Multiplier applied to the heuristic. 1.0 keeps it admissible;
    /// larger values trade path quality for search speed.
    #[serde(default = "defaults::heuristic_weight")]
    pub heuristic_weight: f32,

    /// Maximum nodes to expand before aborting the call
    #[serde(default = "defaults::max_expansions")]
    pub max_expansions: usize,

    /// Scale applied to reported path lengths (cell units x resolution)
    #[serde(default = "defaults::resolution")]
    pub resolution: f32,
}

mod defaults {
    pub fn heuristic_weight() -> f32 {
        1.0
    }

    pub fn max_expansions() -> usize {
        usize::MAX
    }

    pub fn resolution() -> f32 {
        1.0
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            heuristic_weight: defaults::heuristic_weight(),
            max_expansions: defaults::max_expansions(),
            resolution: defaults::resolution(),
        }
    }
}

impl PlannerConfig {
    /// Parse a configuration from YAML
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Serialize the configuration to YAML
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Override the heuristic weight
    pub fn with_heuristic_weight(mut self, weight: f32) -> Self {
        self.heuristic_weight = weight;
        self
    }

    /// Override the expansion budget
    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = max_expansions;
        self
    }
}

/// Result of a single-goal search.
///
/// `waypoints` holds only the corners of the route; consecutive waypoints
/// are connected by straight unobstructed segments. An unreachable goal
/// carries no waypoints and [`UNREACHABLE_DISTANCE`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannedPath {
    /// Waypoints from start to goal (empty if unreachable)
    pub waypoints: Vec<GridCoord>,
    /// Total Euclidean path length, scaled by the configured resolution
    pub length: f32,
    /// Nodes expanded during the search
    pub expansions: usize,
    /// Line-of-sight validations performed
    pub los_checks: usize,
}

impl PlannedPath {
    /// Result for a goal no path reaches
    pub fn unreachable(expansions: usize, los_checks: usize) -> Self {
        Self {
            waypoints: Vec::new(),
            length: UNREACHABLE_DISTANCE,
            expansions,
            los_checks,
        }
    }

    /// Whether a path was found
    #[inline]
    pub fn is_reachable(&self) -> bool {
        !self.waypoints.is_empty()
    }

    /// Waypoints as a flat alternating x/y vector, the shape expected by
    /// language-boundary callers.
    pub fn flat_waypoints(&self) -> Vec<i32> {
        let mut flat = Vec::with_capacity(self.waypoints.len() * 2);
        for w in &self.waypoints {
            flat.push(w.x);
            flat.push(w.y);
        }
        flat
    }
}
