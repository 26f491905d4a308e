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

use crate::board::BOARD_SIZE;
use crate::boards::LocalSource;
use crate::client::ClientSession;
use crate::client::FileStore;
use crate::client::Origin;
use crate::client::render_grid;
use crate::cmd::open_database;
use crate::config::Config;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::board_id::BoardId;

fn session(config: &Config) -> ClientSession<FileStore> {
    ClientSession::new(FileStore::open(config.viewer_path()))
}

/// Show the viewer's copy of a board. The first call fixes the
/// arrangement; later calls reuse it.
pub fn play_board(config: &Config, id: &str) -> Fallible<String> {
    let id = BoardId::parse(id)?;
    let db = open_database(config)?;
    let source = LocalSource {
        db: &db,
        limits: &config.limits,
    };
    let mut session = session(config);
    let loaded = session.load_board(&id, &source)?;
    if loaded.origin == Origin::Source {
        log::debug!("Saved a new arrangement of board {id}");
    }
    let marks = session.get_marks(&id);
    Ok(render_grid(&loaded.board, &marks))
}

pub fn mark_cell(config: &Config, id: &str, index: usize) -> Fallible<bool> {
    let id = BoardId::parse(id)?;
    if index >= BOARD_SIZE {
        return fail(format!("cell index must be below {BOARD_SIZE}."));
    }
    let marked = session(config).toggle_mark(&id, index)?;
    Ok(marked)
}

pub fn reset_marks(config: &Config, id: &str) -> Fallible<()> {
    let id = BoardId::parse(id)?;
    session(config).clear_marks(&id)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::create::create_from_file;
    use crate::helper::create_tmp_csv;
    use crate::helper::create_tmp_directory;

    fn setup() -> Fallible<(Config, String)> {
        let config = Config::load(&create_tmp_directory()?)?;
        let entries: Vec<String> = (0..40).map(|i| format!("e{i}")).collect();
        let csv = create_tmp_csv(&entries.join(","))?;
        let id = create_from_file(&config, &csv, "Forty")?;
        Ok((config, id.to_string()))
    }

    #[test]
    fn test_play_is_stable() -> Fallible<()> {
        let (config, id) = setup()?;
        let first = play_board(&config, &id)?;
        let second = play_board(&config, &id)?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_mark_and_reset() -> Fallible<()> {
        let (config, id) = setup()?;
        let before = play_board(&config, &id)?;
        assert!(!before.contains('['));
        assert!(mark_cell(&config, &id, 0)?);
        let marked = play_board(&config, &id)?;
        assert!(marked.lines().nth(1).unwrap().starts_with('['));
        assert!(!mark_cell(&config, &id, 0)?);
        mark_cell(&config, &id, 4)?;
        reset_marks(&config, &id)?;
        assert_eq!(play_board(&config, &id)?, before);
        Ok(())
    }

    #[test]
    fn test_mark_out_of_range() -> Fallible<()> {
        let (config, id) = setup()?;
        assert!(mark_cell(&config, &id, 25).is_err());
        Ok(())
    }
}
