/*
grid.rs

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

//! Grid of cells and checkpoint numbering.
//!
//! A [`Grid`] is a square, row-major matrix of [`Cell`] objects.
//! Each cell knows its own coordinates, which always match its place in the matrix.
//! Grids that come from outside the crate (saved games, shared board documents) go through
//! [`Grid::from_rows`] so that this invariant is verified.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::position::Position;

/// Number of checkpoints placed along the solution path.
pub const NUM_CHECKPOINTS: usize = 4;

/// Type of errors for grids built from external data.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GridError {
    /// A row does not have as many cells as the grid has rows.
    #[error("row {row} has {len} cells instead of {size}")]
    NotSquare { row: usize, len: usize, size: usize },

    /// The coordinates stored in a cell do not match its place in the grid.
    #[error("cell at ({row}, {col}) claims to be at ({cell_row}, {cell_col})")]
    MisplacedCell {
        row: usize,
        col: usize,
        cell_row: usize,
        cell_col: usize,
    },

    /// Checkpoint numbers start at 1.
    #[error("cell at ({row}, {col}) has checkpoint number 0")]
    ZeroNumber { row: usize, col: usize },
}

/// One cell of the grid.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,

    /// Checkpoint number, only set for checkpoint cells.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,

    /// Whether the player's path currently covers the cell.
    pub filled: bool,
}

impl Cell {
    /// Create an unfilled cell without a number.
    pub fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            number: None,
            filled: false,
        }
    }

    /// Position of the cell in the grid.
    pub fn position(&self) -> Position {
        Position::new(self.row as i32, self.col as i32)
    }
}

/// Square matrix of cells.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(try_from = "Vec<Vec<Cell>>", into = "Vec<Vec<Cell>>")]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// Build a grid from its rows, verifying the shape and the cell coordinates.
    ///
    /// # Errors
    ///
    /// Return an error if the grid is not square, if a cell coordinates do not match its place
    /// in the matrix, or if a checkpoint number is 0.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        let size: usize = rows.len();
        for (r, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(GridError::NotSquare {
                    row: r,
                    len: row.len(),
                    size,
                });
            }
            for (c, cell) in row.iter().enumerate() {
                if cell.row != r || cell.col != c {
                    return Err(GridError::MisplacedCell {
                        row: r,
                        col: c,
                        cell_row: cell.row,
                        cell_col: cell.col,
                    });
                }
                if cell.number == Some(0) {
                    return Err(GridError::ZeroNumber { row: r, col: c });
                }
            }
        }
        Ok(Self { rows })
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Return the rows of the grid.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Iterate over all the cells, row by row.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flatten()
    }

    /// Return the cell at the given row and column.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Return the cell at the given position, or None if the position is outside the grid.
    pub fn cell_at(&self, position: &Position) -> Option<&Cell> {
        let (row, col): (usize, usize) = position.indexes(self.size())?;
        self.cell(row, col)
    }

    /// Mutable access to a cell, for building new grids inside the crate.
    pub(crate) fn cell_at_mut(&mut self, position: &Position) -> Option<&mut Cell> {
        let (row, col): (usize, usize) = position.indexes(self.size())?;
        self.rows.get_mut(row).and_then(|r| r.get_mut(col))
    }

    /// Highest checkpoint number in the grid, or None if the grid has no checkpoint.
    pub fn max_number(&self) -> Option<u32> {
        self.cells().filter_map(|c| c.number).max()
    }

    /// Whether every cell is covered by the path.
    pub fn is_all_filled(&self) -> bool {
        self.cells().all(|c| c.filled)
    }

    /// Return a copy of the grid with the `filled` flag cleared on every cell.
    pub fn cleared(&self) -> Self {
        let mut grid: Grid = self.clone();
        grid.rows
            .iter_mut()
            .flatten()
            .for_each(|cell| cell.filled = false);
        grid
    }
}

/// Text rendering: checkpoint numbers, `#` for the cells of the path, and `.` for the others.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in &self.rows {
            let line: Vec<String> = row
                .iter()
                .map(|cell| match (cell.number, cell.filled) {
                    (Some(n), _) => format!("{n:>2}"),
                    (None, true) => " #".to_string(),
                    (None, false) => " .".to_string(),
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<Vec<Cell>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<Cell>>) -> Result<Self, Self::Error> {
        Grid::from_rows(rows)
    }
}

impl From<Grid> for Vec<Vec<Cell>> {
    fn from(grid: Grid) -> Self {
        grid.rows
    }
}

/// Create a grid of unfilled cells without numbers.
pub fn create_empty_grid(size: usize) -> Grid {
    Grid {
        rows: (0..size)
            .map(|row| (0..size).map(|col| Cell::new(row, col)).collect())
            .collect(),
    }
}

/// Indexes in the path where the checkpoints go: the start, the first and second thirds, and
/// the end of the path.
pub fn checkpoint_indexes(len: usize) -> [usize; NUM_CHECKPOINTS] {
    [0, len / 3, 2 * len / 3, len.saturating_sub(1)]
}

/// Return a copy of the grid with the checkpoint numbers placed along the solution path.
///
/// Number 1 goes at the start of the path and number 4 at its end.
/// On very short paths, several numbers can land on the same cell, in which case the last one
/// wins.
pub fn add_numbers_to_grid(grid: &Grid, solution_path: &[Position]) -> Grid {
    let mut new_grid: Grid = grid.clone();
    if solution_path.is_empty() {
        return new_grid;
    }

    for (i, index) in checkpoint_indexes(solution_path.len()).iter().enumerate() {
        let position: Position = solution_path[*index];
        match new_grid.cell_at_mut(&position) {
            Some(cell) => {
                cell.number = Some(i as u32 + 1);
                debug!(
                    "Checkpoint {} at ({}, {}) (path index {index})",
                    i + 1,
                    position.row,
                    position.col
                );
            }
            None => warn!(
                "Checkpoint {} at ({}, {}) is outside the grid",
                i + 1,
                position.row,
                position.col
            ),
        }
    }
    new_grid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake_path(size: i32) -> Vec<Position> {
        let mut path: Vec<Position> = Vec::new();
        for row in 0..size {
            for i in 0..size {
                let col: i32 = if row % 2 == 0 { i } else { size - 1 - i };
                path.push(Position::new(row, col));
            }
        }
        path
    }

    #[test]
    fn empty_grid_shape() {
        let grid: Grid = create_empty_grid(3);

        assert_eq!(grid.size(), 3);
        assert!(grid.rows().iter().all(|r| r.len() == 3));
        assert_eq!(
            grid.cell(0, 0),
            Some(&Cell {
                row: 0,
                col: 0,
                number: None,
                filled: false
            })
        );
        assert_eq!(grid.cell(2, 1).map(|c| (c.row, c.col)), Some((2, 1)));
        assert_eq!(grid.max_number(), None);
    }

    #[test]
    fn empty_cell_serializes_without_number() {
        let grid: Grid = create_empty_grid(3);
        let json: serde_json::Value = serde_json::to_value(&grid).unwrap();

        assert_eq!(
            json[0][0],
            serde_json::json!({"row": 0, "col": 0, "filled": false})
        );
    }

    #[test]
    fn numbers_on_nine_cell_path() {
        let path: Vec<Position> = snake_path(3);
        let grid: Grid = create_empty_grid(3);
        let numbered: Grid = add_numbers_to_grid(&grid, &path);

        assert_eq!(numbered.cell_at(&path[0]).unwrap().number, Some(1));
        assert_eq!(numbered.cell_at(&path[3]).unwrap().number, Some(2));
        assert_eq!(numbered.cell_at(&path[6]).unwrap().number, Some(3));
        assert_eq!(numbered.cell_at(&path[8]).unwrap().number, Some(4));
        assert_eq!(numbered.cells().filter(|c| c.number.is_some()).count(), 4);

        // The input grid is left untouched
        assert_eq!(grid.max_number(), None);
    }

    #[test]
    fn colliding_numbers_overwrite() {
        // On a two-cell path, indexes are [0, 0, 1, 1]
        let path: Vec<Position> = vec![Position::new(0, 0), Position::new(0, 1)];
        let numbered: Grid = add_numbers_to_grid(&create_empty_grid(2), &path);

        assert_eq!(numbered.cell(0, 0).unwrap().number, Some(2));
        assert_eq!(numbered.cell(0, 1).unwrap().number, Some(4));
        assert_eq!(numbered.max_number(), Some(4));
    }

    #[test]
    fn text_rendering() {
        let path: Vec<Position> = snake_path(3);
        let numbered: Grid = add_numbers_to_grid(&create_empty_grid(3), &path);

        assert_eq!(numbered.to_string(), " 1  .  .\n .  .  2\n 3  .  4\n");
    }

    #[test]
    fn from_rows_rejects_bad_grids() {
        let mut rows: Vec<Vec<Cell>> = create_empty_grid(2).into();
        rows[1].pop();
        assert_eq!(
            Grid::from_rows(rows),
            Err(GridError::NotSquare {
                row: 1,
                len: 1,
                size: 2
            })
        );

        let mut rows: Vec<Vec<Cell>> = create_empty_grid(2).into();
        rows[0][1].row = 1;
        assert!(matches!(
            Grid::from_rows(rows),
            Err(GridError::MisplacedCell { row: 0, col: 1, .. })
        ));

        let mut rows: Vec<Vec<Cell>> = create_empty_grid(2).into();
        rows[1][1].number = Some(0);
        assert_eq!(
            Grid::from_rows(rows),
            Err(GridError::ZeroNumber { row: 1, col: 1 })
        );
    }

    #[test]
    fn deserialization_validates() {
        let bad: &str = r#"[[{"row": 0, "col": 0, "filled": false}, {"row": 0, "col": 1, "filled": false}]]"#;
        assert!(serde_json::from_str::<Grid>(bad).is_err());

        let good: String = serde_json::to_string(&create_empty_grid(2)).unwrap();
        let grid: Grid = serde_json::from_str(&good).unwrap();
        assert_eq!(grid, create_empty_grid(2));
    }
}
