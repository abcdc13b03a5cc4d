/*
lib.rs

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

//! Zipgrid: draw a single path through a square grid, visiting every cell once and the
//! numbered checkpoints in order.
//!
//! * [`generator`] builds random boards that always have a solution.
//! * [`state`] holds the rules: the immutable [`state::GameState`] and its transitions.
//! * [`game`] turns press, drag, and release gestures into transitions and runs the timer.
//! * [`room`] is the board document shared with the other players of a room.
//! * [`saver`] saves and restores the game in progress.

pub mod cli_options;
pub mod config;
pub mod game;
pub mod generator;
pub mod room;
pub mod saver;
pub mod state;
