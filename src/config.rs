/*
config.rs

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

//! Build-time settings.

/// Grid size used for new games and shared boards.
pub const DEFAULT_GRID_SIZE: usize = 5;

/// Largest grid size accepted on the command line.
/// Generating a path takes many attempts above 6x6, so use `--timeout` for large grids.
pub const MAX_GRID_SIZE: usize = 10;

/// Default time limit, in seconds, for generating a path from the command line.
pub const MAX_TIME_SEC: u64 = 6;

/// Name of the file that stores the game in progress.
pub const SAVE_FILE_NAME: &str = "savegame.json";

/// Text displayed by `--version`.
pub const COPYRIGHT_NOTICE: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\n\nCopyright 2025 Hervé Quatremain\n",
    "License GPLv3+: GNU GPL version 3 or later <https://gnu.org/licenses/gpl.html>\n",
    "This is free software: you are free to change and redistribute it.\n",
    "There is NO WARRANTY, to the extent permitted by law."
);
