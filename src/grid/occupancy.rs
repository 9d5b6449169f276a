//! Flat occupancy grid storage.

use crate::core::GridCoord;
use crate::error::{PlanError, Result};

/// Cell value conventionally used for blocked cells.
pub const DEFAULT_OBSTACLE_VALUE: u8 = 255;

/// Cell value conventionally used for free cells.
pub const DEFAULT_FREE_VALUE: u8 = 0;

/// 2D occupancy grid over a flat row-major cell array.
///
/// Cell `(x, y)` lives at index `y * width + x`. A cell is blocked iff its
/// value equals the configured obstacle sentinel; every other value is free.
/// Queries outside the grid report not-free instead of panicking, so callers
/// can probe coordinates without pre-checking bounds.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    width: i32,
    height: i32,
    cells: Vec<u8>,
    obstacle_value: u8,
}

impl OccupancyGrid {
    /// Create a grid from a flat row-major cell array.
    ///
    /// Fails when either dimension is non-positive or the cell count does
    /// not match `width * height`.
    pub fn new(width: i32, height: i32, cells: Vec<u8>, obstacle_value: u8) -> Result<Self> {
        if width <= 0 || height <= 0 || cells.len() != (width as usize) * (height as usize) {
            return Err(PlanError::InvalidDimensions {
                width,
                height,
                cells: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
            obstacle_value,
        })
    }

    /// Create an all-free grid with the conventional cell values.
    pub fn open(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(PlanError::InvalidDimensions {
                width,
                height,
                cells: 0,
            });
        }
        let count = (width as usize) * (height as usize);
        Self::new(
            width,
            height,
            vec![DEFAULT_FREE_VALUE; count],
            DEFAULT_OBSTACLE_VALUE,
        )
    }

    /// Grid width in cells
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in cells
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// The cell value treated as blocked
    #[inline]
    pub fn obstacle_value(&self) -> u8 {
        self.obstacle_value
    }

    /// Check if a coordinate is within the grid bounds
    #[inline]
    pub fn contains(&self, coord: GridCoord) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }

    /// Convert a coordinate to its flat index (None if out of bounds)
    #[inline]
    pub fn index_of(&self, coord: GridCoord) -> Option<usize> {
        if self.contains(coord) {
            Some((coord.y as usize) * (self.width as usize) + (coord.x as usize))
        } else {
            None
        }
    }

    /// Convert a flat index back to a coordinate
    #[inline]
    pub fn coord_at(&self, index: usize) -> GridCoord {
        let w = self.width as usize;
        GridCoord::new((index % w) as i32, (index / w) as i32)
    }

    /// Raw cell value (None if out of bounds)
    #[inline]
    pub fn value(&self, coord: GridCoord) -> Option<u8> {
        self.index_of(coord).map(|i| self.cells[i])
    }

    /// True iff the coordinate is in bounds and not blocked.
    ///
    /// Out-of-bounds coordinates are never free; the world outside the map
    /// behaves like an obstacle.
    #[inline]
    pub fn is_free(&self, coord: GridCoord) -> bool {
        match self.index_of(coord) {
            Some(i) => self.cells[i] != self.obstacle_value,
            None => false,
        }
    }

    /// True iff the coordinate is in bounds and carries the obstacle value
    #[inline]
    pub fn is_blocked(&self, coord: GridCoord) -> bool {
        match self.index_of(coord) {
            Some(i) => self.cells[i] == self.obstacle_value,
            None => false,
        }
    }

    /// Set a cell's raw value. Out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, coord: GridCoord, value: u8) {
        if let Some(i) = self.index_of(coord) {
            self.cells[i] = value;
        }
    }

    /// Mark a cell blocked
    #[inline]
    pub fn set_blocked(&mut self, coord: GridCoord) {
        self.set(coord, self.obstacle_value);
    }

    /// Mark a cell free with the conventional free value
    #[inline]
    pub fn set_free(&mut self, coord: GridCoord) {
        let free = if self.obstacle_value == DEFAULT_FREE_VALUE {
            // Sentinel collision: pick any value that is not the obstacle.
            self.obstacle_value.wrapping_add(1)
        } else {
            DEFAULT_FREE_VALUE
        };
        self.set(coord, free);
    }

    /// Corner rule shared by stepping and line-of-sight: passage through
    /// the lattice point between two diagonally adjacent cells is blocked
    /// only when both of them are blocked.
    #[inline]
    pub fn corner_blocked(&self, a: GridCoord, b: GridCoord) -> bool {
        self.is_blocked(a) && self.is_blocked(b)
    }

    /// Whether a single grid step from `from` to an adjacent cell `to` is
    /// legal: the target must be free, and a diagonal step must not squeeze
    /// through the corner between two blocked cells.
    #[inline]
    pub fn can_step(&self, from: GridCoord, to: GridCoord) -> bool {
        if !self.is_free(to) {
            return false;
        }
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        if dx != 0 && dy != 0 {
            !self.corner_blocked(
                GridCoord::new(from.x + dx, from.y),
                GridCoord::new(from.x, from.y + dy),
            )
        } else {
            true
        }
    }

    /// The adjacent cells reachable by a single grid step, in the fixed
    /// N, NE, E, SE, S, SW, W, NW order.
    pub fn neighbors(&self, coord: GridCoord) -> impl Iterator<Item = GridCoord> + '_ {
        coord
            .neighbors_8()
            .into_iter()
            .filter(move |&n| self.can_step(coord, n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_dimensions() {
        assert!(matches!(
            OccupancyGrid::new(0, 5, vec![], DEFAULT_OBSTACLE_VALUE),
            Err(PlanError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            OccupancyGrid::new(3, -1, vec![0; 3], DEFAULT_OBSTACLE_VALUE),
            Err(PlanError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            OccupancyGrid::new(3, 3, vec![0; 8], DEFAULT_OBSTACLE_VALUE),
            Err(PlanError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_row_major_indexing() {
        let grid = OccupancyGrid::open(4, 3).unwrap();
        assert_eq!(grid.index_of(GridCoord::new(0, 0)), Some(0));
        assert_eq!(grid.index_of(GridCoord::new(3, 0)), Some(3));
        assert_eq!(grid.index_of(GridCoord::new(0, 1)), Some(4));
        assert_eq!(grid.index_of(GridCoord::new(3, 2)), Some(11));
        assert_eq!(grid.coord_at(7), GridCoord::new(3, 1));
        assert_eq!(grid.index_of(GridCoord::new(4, 0)), None);
        assert_eq!(grid.index_of(GridCoord::new(0, 3)), None);
    }

    #[test]
    fn test_out_of_bounds_is_not_free() {
        let grid = OccupancyGrid::open(2, 2).unwrap();
        assert!(!grid.is_free(GridCoord::new(-1, 0)));
        assert!(!grid.is_free(GridCoord::new(0, -1)));
        assert!(!grid.is_free(GridCoord::new(2, 0)));
        // Out of bounds is not a blocked *cell* either
        assert!(!grid.is_blocked(GridCoord::new(-1, 0)));
    }

    #[test]
    fn test_blocked_iff_sentinel() {
        let mut grid = OccupancyGrid::open(3, 3).unwrap();
        let c = GridCoord::new(1, 1);
        assert!(grid.is_free(c));

        grid.set(c, 17); // arbitrary non-sentinel value stays free
        assert!(grid.is_free(c));

        grid.set_blocked(c);
        assert!(grid.is_blocked(c));
        assert!(!grid.is_free(c));

        grid.set_free(c);
        assert!(grid.is_free(c));
    }

    #[test]
    fn test_custom_obstacle_value() {
        let cells = vec![0, 1, 0, 1];
        let grid = OccupancyGrid::new(2, 2, cells, 1).unwrap();
        assert!(grid.is_free(GridCoord::new(0, 0)));
        assert!(grid.is_blocked(GridCoord::new(1, 0)));
        assert!(grid.is_blocked(GridCoord::new(1, 1)));
    }

    #[test]
    fn test_neighbor_order_and_filtering() {
        let grid = OccupancyGrid::open(3, 3).unwrap();
        let center = GridCoord::new(1, 1);
        let all: Vec<_> = grid.neighbors(center).collect();
        assert_eq!(all.len(), 8);
        assert_eq!(all[0], GridCoord::new(1, 2)); // N
        assert_eq!(all[1], GridCoord::new(2, 2)); // NE
        assert_eq!(all[7], GridCoord::new(0, 2)); // NW

        // Corner cell only sees its in-bounds neighbors
        let corner: Vec<_> = grid.neighbors(GridCoord::new(0, 0)).collect();
        assert_eq!(corner.len(), 3);
    }

    #[test]
    fn test_diagonal_step_corner_rule() {
        // . F      F = (1, 1), step from (0, 0)
        // S .
        let mut grid = OccupancyGrid::open(2, 2).unwrap();
        let from = GridCoord::new(0, 0);
        let to = GridCoord::new(1, 1);
        assert!(grid.can_step(from, to));

        // One blocked corner cell still allows the squeeze
        grid.set_blocked(GridCoord::new(1, 0));
        assert!(grid.can_step(from, to));

        // Both blocked corner cells close the passage
        grid.set_blocked(GridCoord::new(0, 1));
        assert!(!grid.can_step(from, to));
        assert!(grid.neighbors(from).next().is_none());
    }

    #[test]
    fn test_single_cell_grid() {
        let grid = OccupancyGrid::open(1, 1).unwrap();
        assert!(grid.is_free(GridCoord::new(0, 0)));
        assert_eq!(grid.neighbors(GridCoord::new(0, 0)).count(), 0);
    }
}
