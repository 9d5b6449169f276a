//! Geometric queries against the grid.

mod supercover;
mod visibility;

pub use supercover::{cells_crossed, Crossing, SupercoverLine};
pub use visibility::line_of_sight;
