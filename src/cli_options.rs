/*
cli_options.rs

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

//! Process command-line options.
//!
//! In command-line mode, Zipgrid generates random boards. Developers use it to check the
//! generator and to produce board documents for the room service.
//!
//! # Examples
//!
//! Generate two 5x5 boards with their solutions:
//!
//! ```text
//! $ zipgrid -c 2 --solution
//! Board 1:
//!  .  .  .  3  .
//!  .  4  .  .  .
//!  .  .  .  .  .
//!  .  .  1  .  2
//!  .  .  .  .  .
//! Solution: (3,2) (3,1) (4,1) ...
//! ```
//!
//! Generate a reproducible 4x4 board document:
//!
//! ```text
//! $ zipgrid -s 4 --seed 42 --json
//! {"boardData":[[{"row":0,"col":0,"filled":false}, ...]],"adminId":"cli","createdAt":...}
//! ```

use clap::Parser;
use clap::builder::RangedU64ValueParser;
use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;
use std::env;
use std::time::Duration;

use crate::config::{COPYRIGHT_NOTICE, DEFAULT_GRID_SIZE, MAX_GRID_SIZE, MAX_TIME_SEC};
use crate::generator::grid::{self, Grid};
use crate::generator::position::{Position, are_positions_adjacent, is_valid_grid_position};
use crate::generator::random_path::RandomPath;
use crate::room::BoardDocument;

/// Generate random Zipgrid boards.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// Number of rows and columns of the grid
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_GRID_SIZE,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_GRID_SIZE as u64)
    )]
    size: usize,

    /// Number of boards to generate
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Seed for the random number generator, to reproduce boards
    #[arg(long)]
    seed: Option<u64>,

    /// Give up generating a board after that many random walks
    #[arg(short = 'a', long)]
    max_attempts: Option<usize>,

    /// Give up generating a board after that many seconds (0 for no limit)
    #[arg(short, long, default_value_t = MAX_TIME_SEC)]
    timeout: u64,

    /// Print the boards as room board documents in JSON format
    #[arg(short, long, default_value_t = false)]
    json: bool,

    /// Admin identifier for the JSON board documents
    #[arg(long, default_value = "cli", requires = "json")]
    admin: String,

    /// Print the solution path after each board
    #[arg(long, default_value_t = false, conflicts_with = "json")]
    solution: bool,

    /// Print some statistics after generating the boards
    #[arg(long, default_value_t = false)]
    summary: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Verify that the path visits every cell of the grid once, moving to an adjacent cell at
/// each step.
fn verify_path(path: &[Position], size: usize) -> Result<(), String> {
    if path.len() != size * size {
        return Err(format!(
            "Wrong length: {} instead of {}",
            path.len(),
            size * size
        ));
    }
    if let Some(p) = path
        .iter()
        .find(|p| !is_valid_grid_position(p.row, p.col, size))
    {
        return Err(format!("Cell ({}, {}) is outside the grid", p.row, p.col));
    }
    let distinct: HashSet<&Position> = path.iter().collect();
    if distinct.len() != path.len() {
        return Err("Duplicated cells in path".to_string());
    }
    if let Some(w) = path.windows(2).find(|w| !are_positions_adjacent(&w[0], &w[1])) {
        return Err(format!(
            "Cells ({}, {}) and ({}, {}) are not adjacent",
            w[0].row, w[0].col, w[1].row, w[1].col
        ));
    }
    Ok(())
}

/// Parse and process command-line options. Return the exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    let mut rng: StdRng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let max_duration: Option<Duration> = match args.timeout {
        0 => None,
        t => Some(Duration::from_secs(t)),
    };
    let mut generator: RandomPath = RandomPath::new(args.size)
        .with_max_attempts(args.max_attempts)
        .with_max_duration(max_duration);

    let mut total: f32 = 0.0;
    let mut max: f32 = 0.0;
    let mut attempts: usize = 0;
    for i in 0..args.count {
        debug!("Board {i}");

        let path: Vec<Position> = match generator.generate(&mut rng) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Error: {e}");
                return 1;
            }
        };
        total += generator.duration;
        if generator.duration > max {
            max = generator.duration;
        }
        attempts += generator.attempts;

        if let Err(msg) = verify_path(&path, args.size) {
            eprintln!("{msg}: {path:?}");
            panic!("Bug: invalid generated path");
        }

        let board: Grid = grid::add_numbers_to_grid(&grid::create_empty_grid(args.size), &path);
        if args.json {
            match BoardDocument::with_board(&args.admin, board).to_json() {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("Error: {e}");
                    return 1;
                }
            }
        } else {
            println!("Board {}:", i + 1);
            print!("{board}");
            if args.solution {
                let cells: Vec<String> = path
                    .iter()
                    .map(|p| format!("({},{})", p.row, p.col))
                    .collect();
                println!("Solution: {}", cells.join(" "));
            }
        }
    }

    // Print some stats
    if args.summary && args.count > 0 {
        eprintln!(
            "
        total time = {}s
      average time = {}s
          max time = {}s
  average attempts = {}",
            total,
            total / args.count as f32,
            max,
            attempts / args.count,
        );
    }
    0
}
