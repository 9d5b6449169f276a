//! Line-of-sight queries over the occupancy grid.

use crate::core::GridCoord;
use crate::grid::OccupancyGrid;

use super::supercover::{Crossing, SupercoverLine};

/// Check whether the straight segment between two cell centers is
/// unobstructed.
///
/// Every cell the segment's interior crosses must be free, endpoints
/// included. Where the segment threads a lattice corner the passage is
/// blocked only if both diagonally adjacent cells are blocked. Symmetric:
/// swapping the endpoints never changes the answer.
pub fn line_of_sight(grid: &OccupancyGrid, from: GridCoord, to: GridCoord) -> bool {
    for crossing in SupercoverLine::new(from, to) {
        match crossing {
            Crossing::Cell(cell) => {
                if !grid.is_free(cell) {
                    return false;
                }
            }
            Crossing::Corner(a, b) => {
                if grid.corner_blocked(a, b) {
                    return false;
                }
            }
        }
    }
    true
}
