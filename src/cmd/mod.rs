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

use std::fs::create_dir_all;

use crate::config::Config;
use crate::db::Database;
use crate::error::Fallible;

pub mod create;
pub mod info;
pub mod play;
pub mod show;

fn open_database(config: &Config) -> Fallible<Database> {
    create_dir_all(&config.data_dir)?;
    let db = Database::new(&config.database_path())?;
    Ok(db)
}
