// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use rand::Rng;

use crate::board::FREE_INDEX;
use crate::board::RenderedBoard;
use crate::board::build_board;
use crate::client::BoardSource;
use crate::config::Limits;
use crate::db::Database;
use crate::error::BoardError;
use crate::tokenizer::empty_list;
use crate::tokenizer::revalidate;
use crate::tokenizer::tokenize;
use crate::types::board_id::BoardId;

pub const DEFAULT_TITLE: &str = "Untitled Board";

/// Validate an uploaded list and store it as a new board.
pub fn create_board(
    db: &Database,
    raw: &str,
    title: &str,
    original_name: &str,
    limits: &Limits,
) -> Result<BoardId, BoardError> {
    let tokens = tokenize(raw, limits)?;
    if tokens.is_empty() {
        return Err(empty_list());
    }
    db.create(&tokens, &normalize_title(title), original_name)
}

/// Load a board and lay out a fresh arrangement of it.
///
/// Stored entries are checked again, since the limits may have changed
/// since the board was uploaded.
pub fn render_board(
    db: &Database,
    id: &BoardId,
    limits: &Limits,
    rng: &mut impl Rng,
) -> Result<RenderedBoard, BoardError> {
    let record = db.get(id)?;
    let tokens = revalidate(record.tokens, limits)?;
    let cells = build_board(&tokens, FREE_INDEX, rng);
    Ok(RenderedBoard {
        id: record.id,
        title: record.title,
        cells,
        free_index: FREE_INDEX,
    })
}

fn normalize_title(title: &str) -> String {
    let title = title.trim();
    if title.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        title.to_string()
    }
}

/// The read path, served in-process.
pub struct LocalSource<'a> {
    pub db: &'a Database,
    pub limits: &'a Limits,
}

impl BoardSource for LocalSource<'_> {
    fn fetch_board(&self, id: &BoardId) -> Result<RenderedBoard, BoardError> {
        render_board(self.db, id, self.limits, &mut rand::rng())
    }
}
