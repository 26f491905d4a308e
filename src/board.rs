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
use rand::seq::SliceRandom;
use serde::Deserialize;
use serde::Serialize;

use crate::types::board_id::BoardId;

/// Number of cells on a board.
pub const BOARD_SIZE: usize = 25;

/// Number of cells filled from the entry list.
pub const PICKS: usize = BOARD_SIZE - 1;

/// Position of the free cell: the center of the 5x5 grid.
pub const FREE_INDEX: usize = 12;

/// Text of the free cell.
pub const FREE: &str = "FREE";

/// A board as served to clients. Each read produces a new arrangement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedBoard {
    pub id: BoardId,
    pub title: String,
    pub cells: Vec<String>,
    pub free_index: usize,
}

/// Lay out a board from a non-empty list of entries.
///
/// The entries are shuffled, then 24 are taken by walking the shuffled list
/// with wraparound: short lists repeat, long lists leave some entries out.
/// The picks are placed around the free cell.
pub fn build_board(tokens: &[String], free_index: usize, rng: &mut impl Rng) -> Vec<String> {
    debug_assert!(!tokens.is_empty(), "build_board called with no entries");
    let free_index = if free_index < BOARD_SIZE {
        free_index
    } else {
        FREE_INDEX
    };

    let mut shuffled: Vec<&String> = tokens.iter().collect();
    shuffled.shuffle(rng);

    let picks: Vec<&String> = if shuffled.is_empty() {
        Vec::new()
    } else {
        (0..PICKS).map(|i| shuffled[i % shuffled.len()]).collect()
    };

    let mut cells: Vec<String> = Vec::with_capacity(BOARD_SIZE);
    let (before, after) = picks.split_at(free_index.min(picks.len()));
    cells.extend(before.iter().map(|s| s.to_string()));
    cells.push(FREE.to_string());
    cells.extend(after.iter().map(|s| s.to_string()));
    while cells.len() < BOARD_SIZE {
        cells.push(FREE.to_string());
    }
    cells.truncate(BOARD_SIZE);
    cells
}
