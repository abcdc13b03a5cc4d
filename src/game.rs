/*
game.rs

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

//! Manage the game in progress.
//!
//! [`Game`] turns the player's gestures into [`GameState`] transitions:
//!
//! * Pressing a checkpoint that carries the current number starts the path there.
//! * Pressing a cell of the path cuts the path after that cell.
//! * While the button is held, entering an adjacent cell grows the path, or cuts it when the
//!   cell is already in the path.
//! * Releasing the button stops the drag.
//!
//! The game also runs the timer: it starts when the path starts on checkpoint 1 and stops when
//! the puzzle is solved.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::time::{Duration, Instant};

use crate::generator::generate_board;
use crate::generator::grid::Grid;
use crate::generator::position::{Position, are_positions_adjacent};
use crate::saver::game::instant;
use crate::state::GameState;

/// What a gesture changed, so that the caller knows what to redraw or announce.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The gesture was ignored.
    None,

    /// The path changed.
    Changed,

    /// The path started on checkpoint 1. The timer is running.
    Started,

    /// The puzzle is solved, in the given time.
    Solved { time_ms: u64 },
}

/// Manage the status of the game in progress.
#[derive(Serialize, Deserialize, Debug)]
pub struct Game {
    /// Size of the boards for new games.
    pub size: usize,

    /// Current state of the path.
    state: GameState,

    /// Whether the player is dragging the path (button held).
    #[serde(skip)]
    dragging: bool,

    /// Time when the path started on checkpoint 1.
    #[serde(with = "instant")]
    start_time: Option<Instant>,

    /// Time it took to solve the puzzle.
    final_time: Option<Duration>,
}

impl Game {
    /// Create a [`Game`] object with a new board of the given size.
    pub fn new(size: usize) -> Self {
        Self::from_board(size, generate_board(size))
    }

    /// Create a [`Game`] object for the given board.
    pub fn from_board(size: usize, grid: Grid) -> Self {
        Self {
            size,
            state: GameState::new(grid),
            dragging: false,
            start_time: None,
            final_time: None,
        }
    }

    /// Current state of the path.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Whether the player is dragging the path.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Time spent on the puzzle so far, or the solve time once the puzzle is solved.
    pub fn elapsed(&self) -> Duration {
        match (self.final_time, self.start_time) {
            (Some(d), _) => d,
            (None, Some(start)) => start.elapsed(),
            (None, None) => Duration::ZERO,
        }
    }

    /// Time it took to solve the puzzle, or None if the puzzle is not solved.
    pub fn final_time(&self) -> Option<Duration> {
        self.final_time
    }

    /// The player pressed the given cell.
    pub fn press(&mut self, row: i32, col: i32) -> GameEvent {
        let position: Position = Position::new(row, col);
        if self.state.is_complete() || self.state.grid().cell_at(&position).is_none() {
            return GameEvent::None;
        }

        // Back to a cell of the path
        if let Cow::Owned(state) = self.state.trim_path_to_position(row, col) {
            self.state = state;
            self.dragging = true;
            return GameEvent::Changed;
        }

        match self.state.start_path(row, col) {
            Some(state) => {
                let started: bool = state.game_started() && !self.state.game_started();
                self.state = state;
                self.dragging = true;
                if started {
                    self.start_time = Some(Instant::now());
                    self.final_time = None;
                    debug!("Timer started");
                    GameEvent::Started
                } else {
                    GameEvent::Changed
                }
            }
            None => GameEvent::None,
        }
    }

    /// The pointer entered the given cell.
    pub fn drag_enter(&mut self, row: i32, col: i32) -> GameEvent {
        let position: Position = Position::new(row, col);
        if !self.dragging
            || self.state.is_complete()
            || self.state.grid().cell_at(&position).is_none()
        {
            return GameEvent::None;
        }

        let last: Position = match self.state.path().last() {
            Some(p) => *p,
            None => return GameEvent::None,
        };
        if !are_positions_adjacent(&last, &position) {
            return GameEvent::None;
        }

        // Going back over the path
        if let Cow::Owned(state) = self.state.trim_path_to_position(row, col) {
            self.state = state;
            return GameEvent::Changed;
        }

        match self.state.extend_path(row, col) {
            Some(state) => {
                self.state = state;
                if self.state.is_complete() {
                    let time: Duration = self.elapsed();
                    self.final_time = Some(time);
                    self.dragging = false;
                    info!("Puzzle solved in {}", format_time(time.as_millis() as u64));
                    GameEvent::Solved {
                        time_ms: time.as_millis() as u64,
                    }
                } else {
                    GameEvent::Changed
                }
            }
            None => GameEvent::None,
        }
    }

    /// The player released the button.
    pub fn release(&mut self) {
        self.dragging = false;
    }

    /// Restart the puzzle from scratch.
    pub fn reset(&mut self) {
        self.state = self.state.reset();
        self.clear_timer();
    }

    /// Start a new game with a freshly generated board.
    pub fn new_game(&mut self) {
        self.load_board(generate_board(self.size));
    }

    /// Replace the puzzle with the given board, for example a board shared by other players.
    pub fn load_board(&mut self, grid: Grid) {
        debug!("Loading a {}x{} board", grid.size(), grid.size());
        self.state = GameState::new(grid);
        self.clear_timer();
    }

    fn clear_timer(&mut self) {
        self.dragging = false;
        self.start_time = None;
        self.final_time = None;
    }
}

/// Format a duration in milliseconds as `M:SS.CC`.
///
/// Minutes are not limited to 59.
pub fn format_time(ms: u64) -> String {
    let seconds: u64 = ms / 1000;
    let minutes: u64 = seconds / 60;
    let remaining_seconds: u64 = seconds % 60;
    let centiseconds: u64 = (ms % 1000) / 10;
    format!("{minutes}:{remaining_seconds:02}.{centiseconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::grid::{Cell, create_empty_grid};

    /// 2x2 grid with checkpoint 1 at (0, 0) and checkpoint 2 at (1, 0).
    fn small_game() -> Game {
        let mut rows: Vec<Vec<Cell>> = create_empty_grid(2).into();
        rows[0][0].number = Some(1);
        rows[1][0].number = Some(2);
        Game::from_board(2, Grid::from_rows(rows).unwrap())
    }

    #[test]
    fn time_format() {
        assert_eq!(format_time(0), "0:00.00");
        assert_eq!(format_time(61234), "1:01.23");
        assert_eq!(format_time(3665450), "61:05.45");
        assert_eq!(format_time(999), "0:00.99");
    }

    #[test]
    fn press_starts_on_first_checkpoint_only() {
        let mut game: Game = small_game();

        assert_eq!(game.press(0, 1), GameEvent::None);
        assert_eq!(game.press(1, 0), GameEvent::None);
        assert!(!game.is_dragging());
        assert_eq!(game.press(5, 5), GameEvent::None);

        assert_eq!(game.press(0, 0), GameEvent::Started);
        assert!(game.is_dragging());
        assert!(game.state().game_started());
        assert_eq!(game.state().path(), &[Position::new(0, 0)]);
    }

    #[test]
    fn drag_requires_press() {
        let mut game: Game = small_game();

        assert_eq!(game.drag_enter(0, 1), GameEvent::None);
        game.press(0, 0);
        game.release();
        assert_eq!(game.drag_enter(0, 1), GameEvent::None);
    }

    #[test]
    fn drag_outside_the_grid_is_ignored() {
        let mut game: Game = small_game();
        game.press(0, 0);

        assert_eq!(game.drag_enter(i32::MIN, 0), GameEvent::None);
        assert_eq!(game.drag_enter(0, i32::MAX), GameEvent::None);
        assert_eq!(game.drag_enter(-1, 0), GameEvent::None);
        assert_eq!(game.drag_enter(0, 2), GameEvent::None);
        assert_eq!(game.state().path(), &[Position::new(0, 0)]);
        assert!(game.is_dragging());
    }

    #[test]
    fn drag_grows_and_backtracks() {
        let mut game: Game = small_game();
        game.press(0, 0);

        // Not adjacent to the end of the path
        assert_eq!(game.drag_enter(1, 1), GameEvent::None);
        assert_eq!(game.drag_enter(0, 1), GameEvent::Changed);
        assert_eq!(game.drag_enter(1, 1), GameEvent::Changed);
        assert_eq!(game.state().path().len(), 3);

        // Dragging back over the path cuts it
        assert_eq!(game.drag_enter(0, 1), GameEvent::Changed);
        assert_eq!(game.state().path().len(), 2);
        assert!(!game.state().grid().cell(1, 1).unwrap().filled);

        // Pressing a cell of the path cuts it too
        game.release();
        assert_eq!(game.press(0, 0), GameEvent::Changed);
        assert_eq!(game.state().path(), &[Position::new(0, 0)]);
        assert!(game.is_dragging());
    }

    #[test]
    fn solving_stops_the_timer() {
        let mut game: Game = small_game();
        game.press(0, 0);
        game.drag_enter(0, 1);
        game.drag_enter(1, 1);

        match game.drag_enter(1, 0) {
            GameEvent::Solved { time_ms } => assert_eq!(
                game.final_time().map(|d| d.as_millis() as u64),
                Some(time_ms)
            ),
            other => panic!("unexpected event {other:?}"),
        }
        assert!(game.state().is_complete());
        assert!(!game.is_dragging());

        // Nothing changes once solved
        assert_eq!(game.press(0, 0), GameEvent::None);
        assert_eq!(game.drag_enter(1, 1), GameEvent::None);
        assert_eq!(game.elapsed(), game.final_time().unwrap());
    }

    #[test]
    fn reset_and_new_board() {
        let mut game: Game = small_game();
        game.press(0, 0);
        game.drag_enter(0, 1);

        game.reset();
        assert!(game.state().path().is_empty());
        assert!(!game.state().game_started());
        assert_eq!(game.elapsed(), Duration::ZERO);
        assert_eq!(game.state().get_max_number(), Some(2));

        game.load_board(create_empty_grid(3));
        assert_eq!(game.state().grid().size(), 3);
        assert_eq!(game.state().get_max_number(), None);

        game.size = 4;
        game.new_game();
        assert_eq!(game.state().grid().size(), 4);
        assert_eq!(game.state().get_max_number(), Some(4));
    }
}
