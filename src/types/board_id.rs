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

use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use rand::Rng;
use rusqlite::ToSql;
use rusqlite::types::FromSql;
use rusqlite::types::FromSqlError;
use rusqlite::types::FromSqlResult;
use rusqlite::types::ToSqlOutput;
use rusqlite::types::ValueRef;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;

/// The URL-safe alphabet board IDs are drawn from.
const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Length of a generated ID. With 64 symbols this gives 60 bits.
const GENERATED_LEN: usize = 10;

/// Longest string accepted as an ID.
const MAX_LEN: usize = 64;

/// The identifier under which a board is stored and shared.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BoardId(String);

impl BoardId {
    /// Draw a fresh random ID.
    pub fn generate(rng: &mut impl Rng) -> Self {
        let id: String = (0..GENERATED_LEN)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        Self(id)
    }

    /// Parse an ID received from a client.
    pub fn parse(s: &str) -> Fallible<Self> {
        if s.is_empty() || s.len() > MAX_LEN {
            return Err(ErrorReport::new("invalid board ID length"));
        }
        if !s.bytes().all(|b| ALPHABET.contains(&b)) {
            return Err(ErrorReport::new("invalid character in board ID"));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for BoardId {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BoardId::parse(s)
    }
}

impl TryFrom<String> for BoardId {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        BoardId::parse(&value)
    }
}

impl From<BoardId> for String {
    fn from(value: BoardId) -> Self {
        value.0
    }
}

impl Display for BoardId {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ToSql for BoardId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for BoardId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let string: String = FromSql::column_result(value)?;
        BoardId::parse(&string).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}
