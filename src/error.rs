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

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

/// A process-level error: something went wrong and the command cannot
/// continue.
#[derive(Debug, PartialEq)]
pub struct ErrorReport {
    message: String,
}

impl ErrorReport {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for ErrorReport {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "error: {}", self.message)
    }
}

impl Error for ErrorReport {}

pub type Fallible<T> = Result<T, ErrorReport>;

pub fn fail<T>(message: impl Into<String>) -> Fallible<T> {
    Err(ErrorReport::new(message))
}

impl From<std::io::Error> for ErrorReport {
    fn from(value: std::io::Error) -> Self {
        ErrorReport::new(format!("I/O error: {value}"))
    }
}

impl From<rusqlite::Error> for ErrorReport {
    fn from(value: rusqlite::Error) -> Self {
        ErrorReport::new(format!("database error: {value}"))
    }
}

impl From<serde_json::Error> for ErrorReport {
    fn from(value: serde_json::Error) -> Self {
        ErrorReport::new(format!("JSON error: {value}"))
    }
}

impl From<toml::de::Error> for ErrorReport {
    fn from(value: toml::de::Error) -> Self {
        ErrorReport::new(format!("invalid config: {value}"))
    }
}

#[cfg(test)]
impl From<reqwest::Error> for ErrorReport {
    fn from(value: reqwest::Error) -> Self {
        ErrorReport::new(format!("HTTP error: {value}"))
    }
}

impl From<BoardError> for ErrorReport {
    fn from(value: BoardError) -> Self {
        ErrorReport::new(value.to_string())
    }
}

/// Errors from the board operations. Each kind maps to one class of HTTP
/// response.
#[derive(Debug, PartialEq)]
pub enum BoardError {
    /// The input is missing, oversized, or malformed. The message is shown
    /// to the user as-is.
    Validation(String),
    /// No board exists with the requested ID.
    NotFound,
    /// Persistence failed. The message is for the logs, not the user.
    Storage(String),
}

impl BoardError {
    pub fn validation(message: impl Into<String>) -> Self {
        BoardError::Validation(message.into())
    }
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            BoardError::Validation(message) => write!(f, "{message}"),
            BoardError::NotFound => write!(f, "Board not found."),
            BoardError::Storage(message) => write!(f, "storage error: {message}"),
        }
    }
}

impl Error for BoardError {}

impl From<rusqlite::Error> for BoardError {
    fn from(value: rusqlite::Error) -> Self {
        BoardError::Storage(value.to_string())
    }
}

impl From<serde_json::Error> for BoardError {
    fn from(value: serde_json::Error) -> Self {
        BoardError::Storage(value.to_string())
    }
}

impl From<std::io::Error> for BoardError {
    fn from(value: std::io::Error) -> Self {
        BoardError::Storage(value.to_string())
    }
}
