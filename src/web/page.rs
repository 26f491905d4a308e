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

use axum::http::StatusCode;
use axum::response::Html;
use maud::DOCTYPE;
use maud::Markup;
use maud::html;

pub fn page_template(body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Bingo Board" }
                link rel="stylesheet" href="/style.css";
            }
            body {
                (body)
                script src="/script.js" {};
            }
        }
    }
}

/// The client shell. The script decides between the upload form and a board
/// from the URL.
pub async fn shell_handler() -> (StatusCode, Html<String>) {
    let body = html! {
        main.root {
            section #upload-section {
                h1 { "Bingo Board" }
                p { "Upload a CSV of entries to make a shareable 5x5 board." }
                form #upload-form {
                    label.file {
                        input #csv-file type="file" name="csv" accept=".csv,text/csv";
                        span #file-label { "Choose a CSV file" }
                    }
                    input #title type="text" name="title" placeholder="Board title" maxlength="120";
                    button type="submit" { "Create board" }
                }
                div #share-result .hidden {
                    input #share-url type="text" readonly;
                    button #copy-btn type="button" { "Copy" }
                }
            }
            section #board-section .hidden {
                h1 #board-title { "Bingo Board" }
                div #board-grid {}
                div.controls {
                    button #reset-btn type="button" { "Reset marks" }
                    button #share-btn type="button" { "Share" }
                }
                div #board-share .hidden {
                    input #board-share-url type="text" readonly;
                    button #board-copy-btn type="button" { "Copy" }
                }
            }
            p #board-status {}
        }
    };
    (StatusCode::OK, Html(page_template(body).into_string()))
}
