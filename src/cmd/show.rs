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

use crate::boards::render_board;
use crate::client::MarkSet;
use crate::client::render_grid;
use crate::cmd::open_database;
use crate::config::Config;
use crate::error::Fallible;
use crate::types::board_id::BoardId;

/// Render a new arrangement of a board as text. Nothing is cached.
pub fn show_board(config: &Config, id: &str) -> Fallible<String> {
    let id = BoardId::parse(id)?;
    let db = open_database(config)?;
    let board = render_board(&db, &id, &config.limits, &mut rand::rng())?;
    Ok(render_grid(&board, &MarkSet::new()))
}
