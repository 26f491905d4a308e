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

//! The viewer side of a board. A viewer keeps the first arrangement it sees
//! for a board, and its own set of marked cells, in a local store.

mod store;

use std::collections::BTreeSet;

pub use store::FileStore;
pub use store::LocalStore;
#[cfg(test)]
pub use store::MemoryStore;

use crate::board::BOARD_SIZE;
use crate::board::FREE;
use crate::board::FREE_INDEX;
use crate::board::RenderedBoard;
use crate::error::BoardError;
use crate::types::board_id::BoardId;

/// Indices of the cells a viewer has marked.
pub type MarkSet = BTreeSet<usize>;

/// Where boards come from when the viewer has none cached.
pub trait BoardSource {
    fn fetch_board(&self, id: &BoardId) -> Result<RenderedBoard, BoardError>;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Origin {
    /// The board was in the local store.
    Cache,
    /// The board was fetched and has now been cached.
    Source,
}

#[derive(Debug)]
pub struct LoadedBoard {
    pub board: RenderedBoard,
    pub origin: Origin,
}

fn board_key(id: &BoardId) -> String {
    format!("bingoboard:board:{id}")
}

fn marks_key(id: &BoardId) -> String {
    format!("bingoboard:marks:{id}")
}

pub struct ClientSession<S: LocalStore> {
    store: S,
}

impl<S: LocalStore> ClientSession<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Show a board. A cached arrangement always wins: once a viewer has
    /// seen a board, later fetches never replace it.
    pub fn load_board(
        &mut self,
        id: &BoardId,
        source: &impl BoardSource,
    ) -> Result<LoadedBoard, BoardError> {
        if let Some(board) = self.load_cached_render(id) {
            return Ok(LoadedBoard {
                board,
                origin: Origin::Cache,
            });
        }
        let mut board = source.fetch_board(id)?;
        board.cells = ensure_five_by_five(board.cells, board.free_index);
        self.save_cached_render(id, &board)?;
        Ok(LoadedBoard {
            board,
            origin: Origin::Source,
        })
    }

    /// The cached arrangement for a board. An entry that cannot be parsed
    /// counts as absent.
    pub fn load_cached_render(&self, id: &BoardId) -> Option<RenderedBoard> {
        let json = self.store.get(&board_key(id))?;
        match serde_json::from_str(&json) {
            Ok(board) => Some(board),
            Err(e) => {
                log::debug!("Discarding cached board {id}: {e}");
                None
            }
        }
    }

    pub fn save_cached_render(
        &mut self,
        id: &BoardId,
        board: &RenderedBoard,
    ) -> Result<(), BoardError> {
        let json = serde_json::to_string(board)?;
        self.store.set(&board_key(id), json)
    }

    /// The viewer's marks on a board. Unparseable marks count as none.
    pub fn get_marks(&self, id: &BoardId) -> MarkSet {
        let Some(json) = self.store.get(&marks_key(id)) else {
            return MarkSet::new();
        };
        match serde_json::from_str(&json) {
            Ok(marks) => marks,
            Err(e) => {
                log::debug!("Discarding marks for board {id}: {e}");
                MarkSet::new()
            }
        }
    }

    /// Flip a cell's mark and return whether it is now marked. Indices off
    /// the board are ignored.
    pub fn toggle_mark(&mut self, id: &BoardId, index: usize) -> Result<bool, BoardError> {
        if index >= BOARD_SIZE {
            return Ok(false);
        }
        let mut marks = self.get_marks(id);
        let marked = if marks.remove(&index) {
            false
        } else {
            marks.insert(index);
            true
        };
        let json = serde_json::to_string(&marks)?;
        self.store.set(&marks_key(id), json)?;
        Ok(marked)
    }

    /// Forget every mark on a board. The cached arrangement is kept.
    pub fn clear_marks(&mut self, id: &BoardId) -> Result<(), BoardError> {
        self.store.remove(&marks_key(id))
    }
}

/// Force a cell list into a 5x5 board: cut or pad with blanks to 25 cells,
/// then put FREE at the free index.
pub fn ensure_five_by_five(mut cells: Vec<String>, free_index: usize) -> Vec<String> {
    cells.truncate(BOARD_SIZE);
    cells.resize(BOARD_SIZE, String::new());
    let free_index = if free_index < BOARD_SIZE {
        free_index
    } else {
        FREE_INDEX
    };
    cells[free_index] = FREE.to_string();
    cells
}

/// Draw a board as a text grid, five cells per line. Long entries are
/// clipped and marked cells are bracketed.
pub fn render_grid(board: &RenderedBoard, marks: &MarkSet) -> String {
    const CLIP: usize = 20;
    let width = board
        .cells
        .iter()
        .map(|c| c.chars().count().min(CLIP))
        .max()
        .unwrap_or(0)
        + 2;
    let mut out = format!("{}\n", board.title);
    for (r, row) in board.cells.chunks(5).enumerate() {
        let parts: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(c, cell)| {
                let text: String = cell.chars().take(CLIP).collect();
                let text = if marks.contains(&(r * 5 + c)) {
                    format!("[{text}]")
                } else {
                    format!(" {text} ")
                };
                format!("{text:<width$}")
            })
            .collect();
        out.push_str(parts.join("|").trim_end());
        out.push('\n');
    }
    out
}
