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

//! Save and restore the game in progress.
//!
//! The game status is saved in the `savegame.json` file of a data directory.
//! When the game is restored, the player continues the puzzle where they left it, and the
//! timer keeps counting from the saved elapsed time.
//!
//! The saved object is a serialization of the [`Game`] object in JSON format by using [`serde`].

use log::debug;
use std::fs::{File, remove_file};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;
use thiserror::Error;

use crate::config::SAVE_FILE_NAME;
use crate::game::Game;

/// Serialize and deserialize optional [`std::time::Instant`] objects with Serde.
///
/// An instant is stored as the time elapsed since then, and restored relative to now.
pub mod instant {
    use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error};
    use std::time::{Duration, Instant};

    /// Serialize an [`std::time::Instant`] object.
    pub fn serialize<S>(instant: &Option<Instant>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let duration: Option<Duration> = instant.map(|i| i.elapsed());
        duration.serialize(serializer)
    }

    /// Deserialize an [`std::time::Instant`] object.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Instant>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Duration>::deserialize(deserializer)? {
            Some(duration) => {
                let instant: Instant = Instant::now()
                    .checked_sub(duration)
                    .ok_or_else(|| Error::custom("Cannot compute the saved game duration"))?;
                Ok(Some(instant))
            }
            None => Ok(None),
        }
    }
}

/// Type of errors.
#[derive(Error, Debug)]
pub enum SaverError {
    #[error("cannot access the save file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid save file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Object to save and restore a puzzle in progress.
pub struct SaverGame {
    /// Absolute path to the save file.
    save_file: PathBuf,
}

impl SaverGame {
    /// Create a [`SaverGame`] object.
    ///
    /// The provided [`PathBuf`] is the path to the directory where the puzzle must be saved.
    pub fn new(mut data_dir: PathBuf) -> Self {
        data_dir.push(SAVE_FILE_NAME);
        debug!("Save game file: {data_dir:?}");
        SaverGame {
            save_file: data_dir,
        }
    }

    /// Retrieve the [`Game`] object for the saved puzzle.
    ///
    /// Return the [`Game`] object or None if there is no saved puzzle.
    pub fn get_game(&self) -> Result<Option<Game>, SaverError> {
        let file: File = match File::open(&self.save_file) {
            Ok(f) => f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(error.into()),
            },
        };
        let reader: BufReader<File> = BufReader::new(file);
        let game: Game = serde_json::from_reader(reader)?;
        Ok(Some(game))
    }

    /// Save the provided [`Game`] object.
    pub fn save_game(&self, game: &Game) -> Result<(), SaverError> {
        let file: File = File::create(&self.save_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer(&mut writer, game)?;
        writer.flush()?;
        Ok(())
    }

    /// Delete the saved game.
    ///
    /// Deleting a save that does not exist is not an error.
    pub fn delete_save(&self) -> Result<(), SaverError> {
        match remove_file(&self.save_file) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::grid::{Cell, Grid, create_empty_grid};
    use crate::generator::position::Position;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_dir(name: &str) -> PathBuf {
        let nanos: u128 = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir: PathBuf =
            std::env::temp_dir().join(format!("zipgrid-{name}-{}-{nanos}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn small_game() -> Game {
        let mut rows: Vec<Vec<Cell>> = create_empty_grid(3).into();
        rows[0][0].number = Some(1);
        rows[2][2].number = Some(2);
        Game::from_board(3, Grid::from_rows(rows).unwrap())
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir: PathBuf = scratch_dir("missing");
        let saver: SaverGame = SaverGame::new(dir.clone());

        assert!(saver.get_game().unwrap().is_none());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn save_and_restore() {
        let dir: PathBuf = scratch_dir("restore");
        let saver: SaverGame = SaverGame::new(dir.clone());
        let mut game: Game = small_game();
        game.press(0, 0);
        game.drag_enter(0, 1);
        game.release();

        saver.save_game(&game).unwrap();
        let restored: Game = saver.get_game().unwrap().unwrap();

        assert_eq!(restored.state(), game.state());
        assert_eq!(
            restored.state().path(),
            &[Position::new(0, 0), Position::new(0, 1)]
        );
        assert!(restored.state().game_started());
        assert!(restored.final_time().is_none());
        assert_eq!(restored.size, 3);

        saver.delete_save().unwrap();
        assert!(saver.get_game().unwrap().is_none());
        saver.delete_save().unwrap();
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn restored_game_is_not_dragging() {
        let dir: PathBuf = scratch_dir("dragging");
        let saver: SaverGame = SaverGame::new(dir.clone());
        let mut game: Game = small_game();
        game.press(0, 0);
        assert!(game.is_dragging());

        saver.save_game(&game).unwrap();
        let mut restored: Game = saver.get_game().unwrap().unwrap();

        assert!(!restored.is_dragging());
        assert_eq!(restored.drag_enter(0, 1), crate::game::GameEvent::None);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn delete_fails_on_a_directory() {
        let dir: PathBuf = scratch_dir("directory");
        fs::create_dir(dir.join(SAVE_FILE_NAME)).unwrap();
        let saver: SaverGame = SaverGame::new(dir.clone());

        assert!(matches!(saver.delete_save(), Err(SaverError::Io(_))));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn corrupted_file() {
        let dir: PathBuf = scratch_dir("corrupted");
        fs::write(dir.join(SAVE_FILE_NAME), "{\"size\": 3").unwrap();
        let saver: SaverGame = SaverGame::new(dir.clone());

        assert!(matches!(saver.get_game(), Err(SaverError::Json(_))));
        fs::remove_dir_all(dir).unwrap();
    }
}
