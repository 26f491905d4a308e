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

use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Transaction;
use rusqlite::config::DbConfig;

use crate::error::BoardError;
use crate::types::board_id::BoardId;
use crate::types::board_record::BoardRecord;
use crate::types::timestamp::Timestamp;

/// The board store. Boards are written once and never changed.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn new(database_path: &Path) -> Result<Self, BoardError> {
        log::debug!("Opening database at {}", database_path.display());
        let conn = Connection::open(database_path)?;
        Self::from_connection(conn)
    }

    #[cfg(test)]
    pub fn in_memory() -> Result<Self, BoardError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(mut conn: Connection) -> Result<Self, BoardError> {
        conn.set_db_config(DbConfig::SQLITE_DBCONFIG_ENABLE_FKEY, true)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        let conn = Arc::new(Mutex::new(conn));
        Ok(Self { conn })
    }

    /// Store a new board and return its freshly generated ID.
    ///
    /// The board and its entries are written in one transaction, so a failed
    /// insert leaves nothing behind.
    pub fn create(
        &self,
        tokens: &[String],
        title: &str,
        original_name: &str,
    ) -> Result<BoardId, BoardError> {
        let id = BoardId::generate(&mut rand::rng());
        let created_at = Timestamp::now();
        let mut conn = self.acquire()?;
        let tx = conn.transaction()?;
        insert_board(&tx, &id, title, original_name, created_at)?;
        for (position, content) in tokens.iter().enumerate() {
            insert_entry(&tx, &id, position, content)?;
        }
        tx.commit()?;
        log::debug!("Created board {id} with {} entries", tokens.len());
        Ok(id)
    }

    /// Fetch a board by ID.
    pub fn get(&self, id: &BoardId) -> Result<BoardRecord, BoardError> {
        let conn = self.acquire()?;
        let sql = "select title, original_name, created_at from boards where board_id = ?;";
        let meta: Option<(String, String, Timestamp)> = conn
            .query_row(sql, [id], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
            .optional()?;
        let Some((title, original_name, created_at)) = meta else {
            return Err(BoardError::NotFound);
        };
        let sql = "select content from entries where board_id = ? order by position;";
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query([id])?;
        let mut tokens = Vec::new();
        while let Some(row) = rows.next()? {
            let content: String = row.get(0)?;
            tokens.push(content);
        }
        Ok(BoardRecord {
            id: id.clone(),
            title,
            original_name,
            tokens,
            created_at,
        })
    }

    /// Number of stored boards.
    pub fn board_count(&self) -> Result<usize, BoardError> {
        let conn = self.acquire()?;
        let count: i64 = conn.query_row("select count(*) from boards;", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn acquire(&self) -> Result<MutexGuard<'_, Connection>, BoardError> {
        self.conn
            .lock()
            .map_err(|_| BoardError::Storage("database lock poisoned".to_string()))
    }
}

fn insert_board(
    tx: &Transaction,
    id: &BoardId,
    title: &str,
    original_name: &str,
    created_at: Timestamp,
) -> Result<(), BoardError> {
    let sql =
        "insert into boards (board_id, title, original_name, created_at) values (?, ?, ?, ?);";
    tx.execute(sql, (id, title, original_name, created_at))?;
    Ok(())
}

fn insert_entry(
    tx: &Transaction,
    id: &BoardId,
    position: usize,
    content: &str,
) -> Result<(), BoardError> {
    let sql = "insert into entries (board_id, position, content) values (?, ?, ?);";
    tx.execute(sql, (id, position as i64, content))?;
    Ok(())
}

fn probe_schema_exists(tx: &Transaction) -> Result<bool, BoardError> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["boards"], |row| row.get(0))?;
    Ok(count > 0)
}
