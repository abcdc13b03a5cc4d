/*
random_path.rs

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

//! Generate a random path that visits every cell of the grid exactly once.
//!
//! The path is built by a random walk: from a random starting cell, the walk tries the four
//! directions in a random order and moves to the first neighbor that is inside the grid and not
//! visited yet.
//! When the walk reaches a cell with no such neighbor before covering the grid, the attempt is
//! abandoned and a brand-new walk starts from another random cell.
//! There is no backtracking inside an attempt.
//!
//! Small grids (4x4, 5x5) need a handful of attempts.
//! The number of attempts grows quickly with the grid size, so [`RandomPath`] can stop after a
//! number of attempts or after some time.

use log::{debug, trace};
use rand::Rng;
use rand::seq::SliceRandom;
use std::time::{Duration, Instant};
use thiserror::Error;

use super::position::{DIRECTIONS, Direction, Position};

/// Type of errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RandomPathError {
    /// No path found within the allowed number of attempts.
    #[error("no path found after {0} attempts")]
    AttemptsExceeded(usize),

    /// No path found before the timeout.
    #[error("no path found after {0:?}")]
    DurationExceeded(Duration),
}

/// [`RandomPath`] object.
pub struct RandomPath {
    /// Number of rows (and columns) of the grid.
    pub size: usize,

    /// Number of walks it took to generate the last random path.
    pub attempts: usize,

    /// Duration in seconds it took to generate the last random path.
    pub duration: f32,

    /// Give up after that many walks.
    max_attempts: Option<usize>,

    /// Give up after that duration.
    max_duration: Option<Duration>,
}

impl RandomPath {
    /// Create the object. By default, the generation never gives up.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            attempts: 0,
            duration: 0.0,
            max_attempts: None,
            max_duration: None,
        }
    }

    /// Limit the number of walks.
    pub fn with_max_attempts(mut self, max_attempts: Option<usize>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Limit the time spent looking for a path.
    pub fn with_max_duration(mut self, max_duration: Option<Duration>) -> Self {
        self.max_duration = max_duration;
        self
    }

    /// Generate and return a random path.
    ///
    /// # Errors
    ///
    /// The method returns an error if the number of attempts or the duration exceeds the
    /// configured limits. The method can be retried.
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Vec<Position>, RandomPathError> {
        self.attempts = 0;
        self.duration = 0.0;
        let start: Instant = Instant::now();

        let res: Result<Vec<Position>, RandomPathError> = loop {
            if let Some(max) = self.max_attempts
                && self.attempts >= max
            {
                break Err(RandomPathError::AttemptsExceeded(self.attempts));
            }
            if let Some(max) = self.max_duration
                && start.elapsed() >= max
            {
                break Err(RandomPathError::DurationExceeded(start.elapsed()));
            }

            self.attempts += 1;
            if let Some(path) = random_walk(self.size, rng) {
                break Ok(path);
            }
        };

        self.duration = start.elapsed().as_secs_f32();
        debug!(
            "Size = {}  Attempts = {}  Duration = {}",
            self.size, self.attempts, self.duration
        );
        res
    }
}

/// Generate a random path for a grid of the given size, retrying until a walk succeeds.
pub fn generate_random_path(size: usize) -> Vec<Position> {
    generate_random_path_with(&mut rand::rng(), size)
}

/// Same as [`generate_random_path`], with the provided random number generator.
pub fn generate_random_path_with<R: Rng + ?Sized>(rng: &mut R, size: usize) -> Vec<Position> {
    let mut attempts: usize = 0;
    loop {
        attempts += 1;
        if let Some(path) = random_walk(size, rng) {
            debug!("Path for size {size} found after {attempts} attempts");
            return path;
        }
    }
}

/// Return a shuffled copy of the array.
pub fn shuffle_array<T: Clone>(array: &[T]) -> Vec<T> {
    shuffle_array_with(array, &mut rand::rng())
}

/// Same as [`shuffle_array`], with the provided random number generator.
pub fn shuffle_array_with<T: Clone, R: Rng + ?Sized>(array: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled: Vec<T> = array.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

/// Walk through the grid from a random cell. Return None if the walk reaches a dead end.
fn random_walk<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Option<Vec<Position>> {
    let num_cells: usize = size * size;
    if num_cells == 0 {
        return Some(Vec::new());
    }

    let mut visited: Vec<bool> = vec![false; num_cells];
    let mut path: Vec<Position> = Vec::with_capacity(num_cells);

    let mut current: Position = Position::new(
        rng.random_range(0..size) as i32,
        rng.random_range(0..size) as i32,
    );
    trace!("Starting cell ({}, {})", current.row, current.col);
    path.push(current);
    visited[current.row as usize * size + current.col as usize] = true;

    while path.len() < num_cells {
        let directions: Vec<Direction> = shuffle_array_with(&DIRECTIONS, rng);

        let next: Option<(Direction, usize, Position)> = directions.iter().find_map(|d| {
            let p: Position = current.step(*d);
            let (row, col): (usize, usize) = p.indexes(size)?;
            let index: usize = row * size + col;
            if visited[index] {
                None
            } else {
                Some((*d, index, p))
            }
        });

        match next {
            Some((direction, index, p)) => {
                trace!("    Going {direction} to ({}, {})", p.row, p.col);
                visited[index] = true;
                path.push(p);
                current = p;
            }
            None => {
                trace!("    Dead end after {} cells", path.len());
                return None;
            }
        }
    }
    Some(path)
}
