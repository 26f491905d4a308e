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

use crate::config::Limits;
use crate::error::BoardError;

/// Split an uploaded list into entries.
///
/// The input is a flat list delimited by any run of commas, carriage returns
/// or newlines. Quoting is not interpreted. Pieces are trimmed and empty
/// pieces are dropped. An empty result is not an error here; the caller
/// decides how to report it.
pub fn tokenize(raw: &str, limits: &Limits) -> Result<Vec<String>, BoardError> {
    if raw.len() > limits.max_bytes {
        return Err(too_large(limits));
    }

    let mut tokens: Vec<String> = Vec::new();
    let pieces = raw
        .split([',', '\r', '\n'])
        .map(|s| s.trim())
        .filter(|s| !s.is_empty());
    for piece in pieces {
        tokens.push(cap_length(piece, limits)?);
    }

    if tokens.len() > limits.max_entries {
        return Err(too_many_entries(limits));
    }

    Ok(tokens)
}

/// Check entries that were stored earlier against the current limits. The
/// length cap is applied again, and an empty list is an error.
pub fn revalidate(tokens: Vec<String>, limits: &Limits) -> Result<Vec<String>, BoardError> {
    if tokens.is_empty() {
        return Err(empty_list());
    }
    let tokens = tokens
        .iter()
        .map(|token| cap_length(token, limits))
        .collect::<Result<Vec<String>, BoardError>>()?;
    if tokens.len() > limits.max_entries {
        return Err(too_many_entries(limits));
    }
    Ok(tokens)
}

pub fn too_large(limits: &Limits) -> BoardError {
    BoardError::validation(format!(
        "File exceeds {}KB limit.",
        limits.max_bytes / 1024
    ))
}

pub fn too_many_entries(limits: &Limits) -> BoardError {
    BoardError::validation(format!("Too many entries (max {}).", limits.max_entries))
}

pub fn empty_list() -> BoardError {
    BoardError::validation("CSV is empty.")
}

// Lengths are counted in characters, not bytes.
fn cap_length(piece: &str, limits: &Limits) -> Result<String, BoardError> {
    match piece.char_indices().nth(limits.max_entry_len) {
        None => Ok(piece.to_string()),
        Some((cut, _)) => {
            if limits.truncate {
                Ok(piece[..cut].to_string())
            } else {
                Err(BoardError::validation(format!(
                    "Entry exceeds {} characters.",
                    limits.max_entry_len
                )))
            }
        }
    }
}
