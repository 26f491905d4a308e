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
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Serialize;

use crate::error::BoardError;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// An error response: a status code and a message, sent as `{ "error": ... }`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<BoardError> for ApiError {
    fn from(value: BoardError) -> Self {
        match value {
            BoardError::Validation(message) => ApiError::bad_request(message),
            BoardError::NotFound => Self {
                status: StatusCode::NOT_FOUND,
                message: BoardError::NotFound.to_string(),
            },
            BoardError::Storage(message) => {
                log::error!("storage error: {message}");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "Internal error.".to_string(),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let err: ApiError = BoardError::validation("CSV is empty.").into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "CSV is empty.");

        let err: ApiError = BoardError::NotFound.into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Board not found.");

        let err: ApiError = BoardError::Storage("disk on fire".to_string()).into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Internal error.");
    }
}
