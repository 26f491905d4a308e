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
use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Redirect;
use axum::routing::get;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::time::sleep;

use crate::config::Config;
use crate::db::Database;
use crate::error::Fallible;
use crate::web::board::board_handler;
use crate::web::page::shell_handler;
use crate::web::state::ServerState;
use crate::web::upload::upload_handler;

/// Room for the multipart framing and the title field on top of the file.
const MULTIPART_OVERHEAD: usize = 16 * 1024;

pub async fn start_server(config: Config, open_browser: bool) -> Fallible<()> {
    create_dir_all(&config.data_dir)?;
    let db = Database::new(&config.database_path())?;
    log::debug!("{} boards in store.", db.board_count()?);

    let bind = config.bind.clone();
    let state = ServerState {
        db,
        limits: config.limits,
        public_url: config.public_url,
    };
    let app = router(state);

    if open_browser {
        let url = format!("http://{}/", bind.replace("0.0.0.0", "localhost"));
        let probe = bind.clone();
        tokio::spawn(async move {
            loop {
                if let Ok(stream) = TcpStream::connect(&probe).await {
                    drop(stream);
                    break;
                }
                sleep(Duration::from_millis(1)).await;
            }
            let _ = open::that(url);
        });
    }

    log::info!("Starting server on {bind}");
    let listener = TcpListener::bind(&bind).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn router(state: ServerState) -> Router {
    let body_limit = state.limits.max_bytes + MULTIPART_OVERHEAD;
    let app = Router::new();
    let app = app.route("/", get(shell_handler));
    let app = app.route("/game/{id}", get(shell_handler));
    let app = app.route(
        "/api/upload",
        post(upload_handler).layer(DefaultBodyLimit::max(body_limit)),
    );
    let app = app.route("/api/board/{id}", get(board_handler));
    let app = app.route("/script.js", get(script));
    let app = app.route("/style.css", get(stylesheet));
    let app = app.fallback(fallback_handler);
    app.with_state(state)
}

async fn script() -> (StatusCode, [(HeaderName, &'static str); 1], &'static str) {
    (
        StatusCode::OK,
        [(CONTENT_TYPE, "text/javascript")],
        include_str!("script.js"),
    )
}

async fn stylesheet() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, "public, max-age=604800, immutable"),
        ],
        bytes,
    )
}

async fn fallback_handler() -> Redirect {
    Redirect::to("/")
}
