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

use serde::Serialize;

use crate::cmd::open_database;
use crate::config::Config;
use crate::error::Fallible;
use crate::types::board_id::BoardId;
use crate::types::timestamp::Timestamp;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BoardInfo {
    id: BoardId,
    title: String,
    original_name: String,
    entry_count: usize,
    created_at: Timestamp,
}

/// Describe a stored board as pretty-printed JSON.
pub fn board_info(config: &Config, id: &str) -> Fallible<String> {
    let id = BoardId::parse(id)?;
    let db = open_database(config)?;
    let record = db.get(&id)?;
    let info = BoardInfo {
        id: record.id,
        title: record.title,
        original_name: record.original_name,
        entry_count: record.tokens.len(),
        created_at: record.created_at,
    };
    Ok(serde_json::to_string_pretty(&info)?)
}
