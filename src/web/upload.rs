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
use axum::extract::Multipart;
use axum::extract::State;
use axum::extract::multipart::MultipartError;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::http::header::HOST;
use serde::Serialize;

use crate::boards::create_board;
use crate::config::Limits;
use crate::tokenizer::too_large;
use crate::web::error::ApiError;
use crate::web::state::ServerState;

#[derive(Serialize)]
pub struct UploadResponse {
    id: String,
    url: String,
}

struct CsvFile {
    name: String,
    content: String,
}

pub async fn upload_handler(
    State(state): State<ServerState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut file: Option<CsvFile> = None;
    let mut title = String::new();
    let reject = |e: MultipartError| multipart_error(e, &state.limits);
    while let Some(field) = multipart.next_field().await.map_err(reject)? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "csv" => {
                let name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                if !is_csv(&content_type, &name) {
                    return Err(ApiError::bad_request("Please upload a CSV file."));
                }
                let bytes = field.bytes().await.map_err(reject)?;
                file = Some(CsvFile {
                    name,
                    content: String::from_utf8_lossy(&bytes).into_owned(),
                });
            }
            "title" => {
                title = field.text().await.map_err(reject)?;
            }
            _ => {}
        }
    }
    let Some(file) = file else {
        return Err(ApiError::bad_request("CSV file required."));
    };

    let id = create_board(&state.db, &file.content, &title, &file.name, &state.limits)?;
    let origin = request_origin(&headers, state.public_url.as_deref());
    let url = format!("{origin}/game/{id}");
    Ok(Json(UploadResponse {
        id: id.to_string(),
        url,
    }))
}

fn is_csv(content_type: &str, file_name: &str) -> bool {
    content_type == "text/csv" || file_name.to_ascii_lowercase().ends_with(".csv")
}

fn multipart_error(err: MultipartError, limits: &Limits) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        too_large(limits).into()
    } else {
        log::debug!("Rejecting malformed upload: {err}");
        ApiError::bad_request("Invalid upload.")
    }
}

/// The scheme and host share links should point at.
fn request_origin(headers: &HeaderMap, public_url: Option<&str>) -> String {
    if let Some(url) = public_url {
        return url.trim_end_matches('/').to_string();
    }
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    let host = headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    format!("{scheme}://{host}")
}
