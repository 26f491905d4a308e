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

use axum::Json;
use axum::extract::Path;
use axum::extract::State;

use crate::board::RenderedBoard;
use crate::boards::render_board;
use crate::error::BoardError;
use crate::types::board_id::BoardId;
use crate::web::error::ApiError;
use crate::web::state::ServerState;

/// Serve a freshly shuffled arrangement of a board.
pub async fn board_handler(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<RenderedBoard>, ApiError> {
    // Anything that is not a well-formed ID cannot name a board.
    let id = BoardId::parse(&id).map_err(|_| BoardError::NotFound)?;
    log::debug!("Rendering board {id}");
    let board = render_board(&state.db, &id, &state.limits, &mut rand::rng())?;
    Ok(Json(board))
}
