/*
state.rs

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

//! State of the path that the player is drawing.
//!
//! A [`GameState`] object is never modified once built.
//! Every operation that changes the game returns a new [`GameState`] object, and the caller
//! replaces its current state with the returned one.
//!
//! The rules are:
//!
//! * The path starts on the checkpoint that carries the current number (1 for a new game).
//! * The path grows one cell at a time, to a cell that shares a side with the end of the path.
//! * Checkpoints must be reached in ascending order: a numbered cell can only be entered when
//!   its number is the current number plus one.
//! * Once the path reaches the last checkpoint, it cannot grow anymore.
//! * The puzzle is solved when every cell is covered and the last checkpoint is reached.
//!
//! Clicking a cell that is already in the path cuts the path after that cell
//! ([`GameState::trim_path_to_position`]).

use log::debug;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

use crate::generator::grid::{Cell, Grid};
use crate::generator::position::{Position, are_positions_adjacent, find_position_in_path};

/// Progress of the game.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameStatus {
    /// The player has not started the path on checkpoint 1 yet.
    NotStarted,

    /// The path is being drawn.
    InProgress,

    /// The puzzle is solved. Only a reset or a new board leaves this status.
    Complete,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameStatus::NotStarted => write!(f, "not started"),
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Complete => write!(f, "complete"),
        }
    }
}

/// Fields to change when deriving a new [`GameState`] with [`GameState::update`].
///
/// Fields left to None are copied from the original state.
#[derive(Debug, Default, Clone)]
pub struct GameStateUpdate {
    pub grid: Option<Grid>,
    pub path: Option<Vec<Position>>,
    pub current_number: Option<u32>,
    pub is_complete: Option<bool>,
    pub game_started: Option<bool>,
}

/// Immutable state of a game.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Puzzle grid. The `filled` flags of the cells reflect the path.
    grid: Grid,

    /// Cells the player went through, in order.
    path: Vec<Position>,

    /// Highest checkpoint number reached by the path.
    current_number: u32,

    /// Whether the puzzle is solved.
    is_complete: bool,

    /// Whether the player started the path on checkpoint 1.
    game_started: bool,
}

impl GameState {
    /// Create a [`GameState`] object for a new game on the given grid.
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            path: Vec::new(),
            current_number: 1,
            is_complete: false,
            game_started: false,
        }
    }

    /// Create a [`GameState`] object from a game in progress.
    ///
    /// No verification is done: the caller is responsible for providing a consistent state.
    pub fn with_progress(
        grid: Grid,
        path: Vec<Position>,
        current_number: u32,
        is_complete: bool,
        game_started: bool,
    ) -> Self {
        Self {
            grid,
            path,
            current_number,
            is_complete,
            game_started,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn path(&self) -> &[Position] {
        &self.path
    }

    pub fn current_number(&self) -> u32 {
        self.current_number
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn game_started(&self) -> bool {
        self.game_started
    }

    /// Progress of the game, derived from the flags.
    pub fn status(&self) -> GameStatus {
        if self.is_complete {
            GameStatus::Complete
        } else if self.game_started {
            GameStatus::InProgress
        } else {
            GameStatus::NotStarted
        }
    }

    /// Highest checkpoint number in the path, or 1 when the path has no checkpoint.
    pub fn calculate_current_number(&self) -> u32 {
        current_number_for_path(&self.grid, &self.path)
    }

    /// Highest checkpoint number in the grid, or None when the grid has no checkpoint.
    ///
    /// None never equals a current number, so a grid without checkpoint never blocks the path.
    pub fn get_max_number(&self) -> Option<u32> {
        self.grid.max_number()
    }

    /// Whether the path can grow from its last cell to the target cell.
    pub fn can_extend_path(&self, target_position: &Position, target_cell: &Cell) -> bool {
        let last_position: &Position = match self.path.last() {
            Some(p) => p,
            None => return false,
        };

        if !are_positions_adjacent(target_position, last_position) {
            return false;
        }

        // The last checkpoint is the end of the path
        if self.get_max_number() == Some(self.current_number) {
            return false;
        }

        match target_cell.number {
            None => true,
            Some(n) => self.current_number.checked_add(1) == Some(n),
        }
    }

    /// Return a copy of the grid where the only filled cells are the ones in the path.
    ///
    /// When `path` is None, the path of the state is used.
    /// Positions outside the grid are ignored.
    pub fn update_grid_with_path(&self, path: Option<&[Position]>) -> Grid {
        let path: &[Position] = path.unwrap_or(&self.path);
        let mut grid: Grid = self.grid.cleared();

        for position in path {
            if let Some(cell) = grid.cell_at_mut(position) {
                cell.filled = true;
            }
        }
        grid
    }

    /// Cut the path after the first occurrence of the given cell.
    ///
    /// When the cell is not in the path, the state itself is returned, borrowed, so that the
    /// caller can detect that nothing changed.
    pub fn trim_path_to_position(&self, row: i32, col: i32) -> Cow<'_, GameState> {
        let target_index: usize = match find_position_in_path(&self.path, row, col) {
            Some(i) => i,
            None => return Cow::Borrowed(self),
        };

        let new_path: Vec<Position> = self.path[..=target_index].to_vec();
        let new_grid: Grid = self.update_grid_with_path(Some(new_path.as_slice()));
        let new_current_number: u32 = current_number_for_path(&new_grid, &new_path);
        debug!(
            "Path trimmed to ({row}, {col}): {} cells, current number {new_current_number}",
            new_path.len()
        );

        Cow::Owned(Self {
            grid: new_grid,
            path: new_path,
            current_number: new_current_number,
            is_complete: self.is_complete,
            game_started: self.game_started,
        })
    }

    /// Whether every cell is covered and the last checkpoint is reached.
    pub fn check_game_completion(&self) -> bool {
        self.grid.is_all_filled() && self.get_max_number() == Some(self.current_number)
    }

    /// Return a copy of the state where no cell is filled.
    pub fn reset_grid_filled(&self) -> Self {
        Self {
            grid: self.grid.cleared(),
            ..self.clone()
        }
    }

    /// Return a copy of the state with the given fields changed.
    pub fn update(&self, updates: GameStateUpdate) -> Self {
        Self {
            grid: updates.grid.unwrap_or_else(|| self.grid.clone()),
            path: updates.path.unwrap_or_else(|| self.path.clone()),
            current_number: updates.current_number.unwrap_or(self.current_number),
            is_complete: updates.is_complete.unwrap_or(self.is_complete),
            game_started: updates.game_started.unwrap_or(self.game_started),
        }
    }

    /// Return a fresh game on the same puzzle.
    pub fn reset(&self) -> Self {
        Self::new(self.grid.cleared())
    }

    /// Start a new path on the given cell.
    ///
    /// The cell must carry the current number and must not be in the path already (clicking a
    /// cell of the path trims the path instead).
    /// Starting on checkpoint 1 starts the game.
    ///
    /// Return None if a path cannot start on that cell.
    pub fn start_path(&self, row: i32, col: i32) -> Option<Self> {
        if self.is_complete {
            return None;
        }
        let position: Position = Position::new(row, col);
        let number: u32 = self.grid.cell_at(&position)?.number?;
        if number != self.current_number || self.path.contains(&position) {
            return None;
        }

        let new_path: Vec<Position> = vec![position];
        let game_started: bool = self.game_started || number == 1;
        if game_started && !self.game_started {
            debug!("Game started at ({row}, {col})");
        }
        Some(Self {
            grid: self.update_grid_with_path(Some(new_path.as_slice())),
            path: new_path,
            current_number: self.current_number,
            is_complete: self.is_complete,
            game_started,
        })
    }

    /// Grow the path to the given cell.
    ///
    /// Entering the next checkpoint increments the current number, and the returned state is
    /// marked complete when the move solves the puzzle.
    ///
    /// Return None if the move is not allowed.
    pub fn extend_path(&self, row: i32, col: i32) -> Option<Self> {
        if self.is_complete {
            return None;
        }
        let position: Position = Position::new(row, col);
        let cell: &Cell = self.grid.cell_at(&position)?;
        if self.path.contains(&position) || !self.can_extend_path(&position, cell) {
            return None;
        }

        let next_number: Option<u32> = self.current_number.checked_add(1);
        let current_number: u32 = if let Some(next_number) = next_number
            && cell.number == Some(next_number)
        {
            debug!("Checkpoint {next_number} reached at ({row}, {col})");
            next_number
        } else {
            self.current_number
        };

        let mut grid: Grid = self.grid.clone();
        if let Some(c) = grid.cell_at_mut(&position) {
            c.filled = true;
        }
        let mut path: Vec<Position> = self.path.clone();
        path.push(position);

        let new_state: GameState = Self {
            grid,
            path,
            current_number,
            is_complete: false,
            game_started: self.game_started,
        };
        if new_state.check_game_completion() {
            debug!("Puzzle solved in {} moves", new_state.path.len());
            Some(new_state.update(GameStateUpdate {
                is_complete: Some(true),
                ..Default::default()
            }))
        } else {
            Some(new_state)
        }
    }
}

/// Highest checkpoint number that the path goes through, or 1 when there is none.
fn current_number_for_path(grid: &Grid, path: &[Position]) -> u32 {
    path.iter()
        .filter_map(|p| grid.cell_at(p).and_then(|c| c.number))
        .fold(1, u32::max)
}
