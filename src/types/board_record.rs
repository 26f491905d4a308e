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

use crate::types::board_id::BoardId;
use crate::types::timestamp::Timestamp;

/// A persisted board: the entries as uploaded plus metadata. Records are
/// never modified after creation.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardRecord {
    pub id: BoardId,
    pub title: String,
    pub original_name: String,
    pub tokens: Vec<String>,
    pub created_at: Timestamp,
}
