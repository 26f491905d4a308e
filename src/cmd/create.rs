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

use std::fs::read;
use std::path::Path;

use crate::boards::create_board;
use crate::cmd::open_database;
use crate::config::Config;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::board_id::BoardId;

pub fn create_from_file(config: &Config, file: &Path, title: &str) -> Fallible<BoardId> {
    if !file.exists() {
        return fail("file does not exist.");
    }
    let bytes = read(file)?;
    let content = String::from_utf8_lossy(&bytes);
    let original_name = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let db = open_database(config)?;
    let id = create_board(&db, &content, title, &original_name, &config.limits)?;
    Ok(id)
}
