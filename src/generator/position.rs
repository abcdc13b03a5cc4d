/*
position.rs

Copyright 2025 Hervé Quatremain

This file is part of Zipgrid.

Zipgrid is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Zipgrid is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Zipgrid. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Positions in the grid and the adjacency rules between them.
//!
//! Two cells are adjacent when they share a side: diagonal cells are not adjacent.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, FromRepr};

/// Position of a cell in the grid.
///
/// Coordinates are signed so that moving off the border of the grid produces a position that
/// [`is_valid_grid_position`] rejects, instead of an arithmetic overflow.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    /// Create a [`Position`] object.
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return the position one step away in the given direction.
    pub fn step(&self, direction: Direction) -> Self {
        let (dr, dc): (i32, i32) = direction.delta();
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    /// Return the row and column as grid indexes, or None if the position is outside a grid of
    /// the given size.
    pub fn indexes(&self, size: usize) -> Option<(usize, usize)> {
        if is_valid_grid_position(self.row, self.col, size) {
            Some((self.row as usize, self.col as usize))
        } else {
            None
        }
    }
}

/// The four axis directions, in the order the path generator considers them before shuffling.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Display, FromRepr)]
#[repr(u8)]
pub enum Direction {
    #[strum(to_string = "right")]
    Right,
    #[strum(to_string = "down")]
    Down,
    #[strum(to_string = "left")]
    Left,
    #[strum(to_string = "up")]
    Up,
}

/// All the directions.
pub const DIRECTIONS: [Direction; 4] = [
    Direction::Right,
    Direction::Down,
    Direction::Left,
    Direction::Up,
];

impl Direction {
    /// Row and column offsets for the direction.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Up => (-1, 0),
        }
    }
}

/// Whether two positions are exactly one cell apart, horizontally or vertically.
pub fn are_positions_adjacent(pos1: &Position, pos2: &Position) -> bool {
    matches!(
        (pos1.row.abs_diff(pos2.row), pos1.col.abs_diff(pos2.col)),
        (0, 1) | (1, 0)
    )
}

/// Whether the position is inside a square grid of the given size.
pub fn is_valid_grid_position(row: i32, col: i32, size: usize) -> bool {
    let size: i64 = size as i64;
    let (row, col): (i64, i64) = (row as i64, col as i64);
    row >= 0 && row < size && col >= 0 && col < size
}

/// Return the index of the position in the path, or None if the path does not go through it.
pub fn find_position_in_path(path: &[Position], row: i32, col: i32) -> Option<usize> {
    path.iter().position(|p| p.row == row && p.col == col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency_is_orthogonal_only() {
        let center: Position = Position::new(1, 1);

        assert!(are_positions_adjacent(&center, &Position::new(1, 2)));
        assert!(are_positions_adjacent(&center, &Position::new(0, 1)));
        assert!(!are_positions_adjacent(&center, &center));
        assert!(!are_positions_adjacent(&center, &Position::new(2, 2)));
        assert!(!are_positions_adjacent(&center, &Position::new(1, 3)));
    }

    #[test]
    fn adjacency_with_extreme_coordinates() {
        let origin: Position = Position::new(0, 0);

        assert!(!are_positions_adjacent(&origin, &Position::new(i32::MIN, 0)));
        assert!(!are_positions_adjacent(&Position::new(i32::MAX, 0), &origin));
        assert!(!are_positions_adjacent(
            &Position::new(i32::MIN, i32::MIN),
            &Position::new(i32::MAX, i32::MAX)
        ));
        assert!(are_positions_adjacent(
            &Position::new(i32::MAX, 0),
            &Position::new(i32::MAX - 1, 0)
        ));
    }

    #[test]
    fn grid_bounds() {
        assert!(is_valid_grid_position(0, 0, 3));
        assert!(is_valid_grid_position(2, 2, 3));
        assert!(!is_valid_grid_position(3, 0, 3));
        assert!(!is_valid_grid_position(0, -1, 3));
        assert!(!is_valid_grid_position(0, 0, 0));
    }

    #[test]
    fn find_in_path() {
        let path: Vec<Position> = vec![
            Position::new(0, 0),
            Position::new(0, 1),
            Position::new(1, 1),
        ];

        assert_eq!(find_position_in_path(&path, 0, 1), Some(1));
        assert_eq!(find_position_in_path(&path, 1, 1), Some(2));
        assert_eq!(find_position_in_path(&path, 2, 2), None);
        assert_eq!(find_position_in_path(&[], 0, 0), None);
    }

    #[test]
    fn steps_follow_directions() {
        let origin: Position = Position::new(0, 0);

        assert_eq!(origin.step(Direction::Right), Position::new(0, 1));
        assert_eq!(origin.step(Direction::Down), Position::new(1, 0));
        assert_eq!(origin.step(Direction::Up).indexes(4), None);
        assert_eq!(Direction::from_repr(2), Some(Direction::Left));
        assert_eq!(Direction::Up.to_string(), "up");
    }
}
