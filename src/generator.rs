/*
generator.rs

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

//! Generate random puzzles.
//!
//! A puzzle is a [`grid::Grid`] with a few numbered cells, the checkpoints.
//! Building a puzzle takes two steps:
//!
//! * A random path that visits every cell exactly once.
//!   You create it with [`random_path::generate_random_path`], or with a
//!   [`random_path::RandomPath`] object when the generation must give up after some attempts
//!   or some time.
//!
//! * The checkpoint numbers, placed along that path with [`grid::add_numbers_to_grid`].
//!   Because the numbers follow the generated path, the puzzle always has a solution.
//!
//! [`generate_board`] performs both steps.

pub mod grid;
pub mod position;
pub mod random_path;

use rand::Rng;

use grid::Grid;

/// Generate a puzzle for a grid of the given size.
pub fn generate_board(size: usize) -> Grid {
    generate_board_with(&mut rand::rng(), size)
}

/// Same as [`generate_board`], with the provided random number generator.
pub fn generate_board_with<R: Rng + ?Sized>(rng: &mut R, size: usize) -> Grid {
    grid::add_numbers_to_grid(
        &grid::create_empty_grid(size),
        &random_path::generate_random_path_with(rng, size),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn board_has_four_checkpoints() {
        for size in 2..=5 {
            let board: Grid = generate_board(size);
            let mut numbers: Vec<u32> = board.cells().filter_map(|c| c.number).collect();
            numbers.sort_unstable();

            assert_eq!(board.size(), size);
            assert!(board.cells().all(|c| !c.filled));
            if size >= 3 {
                assert_eq!(numbers, vec![1, 2, 3, 4]);
            }
            assert_eq!(board.max_number(), Some(4));
        }
    }

    #[test]
    fn seeded_boards_are_reproducible() {
        let board1: Grid = generate_board_with(&mut StdRng::seed_from_u64(42), 5);
        let board2: Grid = generate_board_with(&mut StdRng::seed_from_u64(42), 5);

        assert_eq!(board1, board2);
    }
}
