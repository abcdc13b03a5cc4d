/*
room.rs

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

//! Board shared by the players of a room.
//!
//! The room service stores one [`BoardDocument`] per room, as JSON.
//! The player who created the board is its admin, and only the admin can replace it with a new
//! board.
//! The other players load the document with [`BoardDocument::from_json`] and pass its grid to
//! [`crate::game::Game::load_board`].
//!
//! Each player solves the board on their own: only the board is shared, not the paths.
//! The room service delivers the documents and the [`RoomNotice`] messages; it is the only
//! writer of the stored document.

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::game::format_time;
use crate::generator::generate_board;
use crate::generator::grid::Grid;

/// Type of errors.
#[derive(Error, Debug)]
pub enum RoomError {
    #[error("invalid board document: {0}")]
    Json(#[from] serde_json::Error),
}

/// System messages posted to the room.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum RoomNotice {
    /// The admin replaced the board.
    BoardRegenerated { by: String },

    /// A player solved the board.
    PuzzleSolved { by: String, time_ms: u64 },
}

impl fmt::Display for RoomNotice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RoomNotice::BoardRegenerated { by } => write!(f, "{by} generated a new board"),
            RoomNotice::PuzzleSolved { by, time_ms } => {
                write!(f, "{by} solved the puzzle in {}", format_time(*time_ms))
            }
        }
    }
}

/// Board stored by the room service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoardDocument {
    /// The puzzle.
    pub board_data: Grid,

    /// Identifier of the player who can regenerate the board.
    pub admin_id: String,

    /// When the board was generated.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl BoardDocument {
    /// Create a document with a new board of the given size.
    pub fn new(admin_id: &str, size: usize) -> Self {
        Self::with_board(admin_id, generate_board(size))
    }

    /// Create a document for the given board.
    pub fn with_board(admin_id: &str, board_data: Grid) -> Self {
        Self {
            board_data,
            admin_id: admin_id.to_string(),
            created_at: Utc::now(),
        }
    }

    /// Whether the given player owns the board.
    pub fn is_admin(&self, user_id: &str) -> bool {
        self.admin_id == user_id
    }

    /// Replace the board with a new one of the given size.
    ///
    /// Return the new document and the notice to post in the room, or None if the player is not
    /// the admin of the board.
    pub fn regenerate(&self, user_id: &str, size: usize) -> Option<(Self, RoomNotice)> {
        if !self.is_admin(user_id) {
            debug!("{user_id} cannot regenerate the board owned by {}", self.admin_id);
            return None;
        }
        info!("Board regenerated by {user_id}");
        Some((
            Self::new(&self.admin_id, size),
            RoomNotice::BoardRegenerated {
                by: user_id.to_string(),
            },
        ))
    }

    /// Load a document received from the room service.
    ///
    /// # Errors
    ///
    /// Return an error if the JSON is invalid or if the board is not a valid grid.
    pub fn from_json(json: &str) -> Result<Self, RoomError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the document for the room service.
    pub fn to_json(&self) -> Result<String, RoomError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;

    #[test]
    fn only_admin_regenerates() {
        let doc: BoardDocument = BoardDocument::new("alice", 4);

        assert!(doc.is_admin("alice"));
        assert!(doc.regenerate("bob", 4).is_none());

        let (new_doc, notice) = doc.regenerate("alice", 5).unwrap();
        assert_eq!(new_doc.admin_id, "alice");
        assert_eq!(new_doc.board_data.size(), 5);
        assert_eq!(notice.to_string(), "alice generated a new board");
    }

    #[test]
    fn json_uses_room_field_names() {
        let doc: BoardDocument = BoardDocument::new("alice", 3);
        let json: String = doc.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["adminId"], "alice");
        assert!(value["createdAt"].is_i64());
        assert_eq!(value["boardData"].as_array().map(|r| r.len()), Some(3));

        let restored: BoardDocument = BoardDocument::from_json(&json).unwrap();
        assert_eq!(restored.board_data, doc.board_data);
        assert_eq!(
            restored.created_at.timestamp_millis(),
            doc.created_at.timestamp_millis()
        );
    }

    #[test]
    fn invalid_board_rejected() {
        let json: &str = r#"{
            "boardData": [[{"row": 0, "col": 0, "filled": false}, {"row": 0, "col": 1, "filled": false}]],
            "adminId": "alice",
            "createdAt": 1700000000000
        }"#;

        assert!(matches!(
            BoardDocument::from_json(json),
            Err(RoomError::Json(_))
        ));
    }

    #[test]
    fn shared_board_starts_a_fresh_game() {
        let doc: BoardDocument = BoardDocument::new("alice", 4);
        let mut game: Game = Game::new(4);
        game.load_board(doc.board_data.clone());

        assert_eq!(game.state().grid(), &doc.board_data);
        assert!(game.state().path().is_empty());
    }

    #[test]
    fn solved_notice() {
        let notice: RoomNotice = RoomNotice::PuzzleSolved {
            by: "bob".to_string(),
            time_ms: 61234,
        };

        assert_eq!(notice.to_string(), "bob solved the puzzle in 1:01.23");
    }
}
