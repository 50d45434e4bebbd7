//! Grid lattice and orthogonal directions
//!
//! Cells are integer coordinates: `x` is the column, `y` the row, row 0 at the top.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// One of the four orthogonal headings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in neighbor enumeration order
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
    ];

    /// Unit cell offset for this direction
    #[inline]
    pub fn offset(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    #[inline]
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Direction matching a unit offset, if it is one
    pub fn from_offset(offset: IVec2) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.offset() == offset)
    }
}

/// Fixed `columns × rows` lattice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub columns: i32,
    pub rows: i32,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(crate::consts::GRID_COLUMNS, crate::consts::GRID_ROWS)
    }
}

impl Grid {
    /// Create a grid; dimensions below 1 are raised to 1
    pub fn new(columns: i32, rows: i32) -> Self {
        Self {
            columns: columns.max(1),
            rows: rows.max(1),
        }
    }

    #[inline]
    pub fn in_bounds(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.columns && cell.y < self.rows
    }

    #[inline]
    pub fn equals(a: IVec2, b: IVec2) -> bool {
        a == b
    }

    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Continuous-space center of a cell (cell units)
    #[inline]
    pub fn cell_center(cell: IVec2) -> Vec2 {
        cell.as_vec2() + Vec2::splat(0.5)
    }

    /// Orthogonal neighbors of a cell in `Direction::ALL` order (may be out of bounds)
    pub fn neighbors(cell: IVec2) -> [IVec2; 4] {
        Direction::ALL.map(|d| cell + d.offset())
    }

    /// Iterate every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.columns).map(move |x| IVec2::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let grid = Grid::new(24, 24);
        assert!(grid.in_bounds(IVec2::new(0, 0)));
        assert!(grid.in_bounds(IVec2::new(23, 23)));
        assert!(!grid.in_bounds(IVec2::new(-1, 12)));
        assert!(!grid.in_bounds(IVec2::new(24, 0)));
        assert!(!grid.in_bounds(IVec2::new(0, 24)));
    }

    #[test]
    fn test_degenerate_dimensions_raised() {
        let grid = Grid::new(0, -5);
        assert_eq!(grid.columns, 1);
        assert_eq!(grid.rows, 1);
        assert_eq!(grid.cell_count(), 1);
        assert_eq!(grid.cells().count(), 1);
    }

    #[test]
    fn test_direction_opposites() {
        for d in Direction::ALL {
            assert!(d.is_opposite(d.opposite()));
            assert!(!d.is_opposite(d));
            assert_eq!(d.offset() + d.opposite().offset(), IVec2::ZERO);
            assert_eq!(Direction::from_offset(d.offset()), Some(d));
        }
        assert_eq!(Direction::from_offset(IVec2::new(1, 1)), None);
    }

    #[test]
    fn test_neighbors_follow_direction_order() {
        let cell = IVec2::new(4, 7);
        let neighbors = Grid::neighbors(cell);
        for (dir, neighbor) in Direction::ALL.into_iter().zip(neighbors) {
            assert_eq!(Direction::from_offset(neighbor - cell), Some(dir));
        }
    }

    #[test]
    fn test_cell_center() {
        assert_eq!(Grid::cell_center(IVec2::new(9, 12)), Vec2::new(9.5, 12.5));
        assert!(Grid::equals(IVec2::new(3, 4), IVec2::new(3, 4)));
    }
}
