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

mod board;
mod error;
mod page;
pub mod server;
mod state;
mod upload;

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::time::Duration;

    use reqwest::StatusCode;
    use reqwest::multipart::Form;
    use reqwest::multipart::Part;
    use reqwest::redirect::Policy;
    use serde_json::Value;
    use tokio::net::TcpStream;
    use tokio::spawn;
    use tokio::time::sleep;

    use crate::config::Config;
    use crate::error::Fallible;
    use crate::helper::create_tmp_directory;
    use crate::web::server::start_server;

    /// Start a server on a free port and return its base URL.
    async fn spawn_server(configure: impl FnOnce(&mut Config)) -> Fallible<String> {
        let port = portpicker::pick_unused_port().expect("no free port");
        let mut config = Config::load(&create_tmp_directory()?)?;
        config.bind = format!("127.0.0.1:{port}");
        configure(&mut config);
        let bind = config.bind.clone();
        spawn(async move { start_server(config, false).await });
        loop {
            if let Ok(stream) = TcpStream::connect(&bind).await {
                drop(stream);
                break;
            }
            sleep(Duration::from_millis(1)).await;
        }
        Ok(format!("http://{bind}"))
    }

    fn csv_form(content: &str, file_name: &str, title: &str) -> Fallible<Form> {
        let part = Part::text(content.to_string())
            .file_name(file_name.to_string())
            .mime_str("text/csv")?;
        Ok(Form::new().text("title", title.to_string()).part("csv", part))
    }

    async fn upload(base: &str, form: Form) -> Fallible<(StatusCode, Value)> {
        let response = reqwest::Client::new()
            .post(format!("{base}/api/upload"))
            .multipart(form)
            .send()
            .await?;
        let status = response.status();
        let body: Value = response.json().await?;
        Ok((status, body))
    }

    #[tokio::test]
    async fn test_start_server_on_bad_bind() -> Fallible<()> {
        let mut config = Config::load(&create_tmp_directory()?)?;
        config.bind = "not an address".to_string();
        let result = start_server(config, false).await;
        assert!(result.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_e2e() -> Fallible<()> {
        let base = spawn_server(|_| {}).await?;

        // Upload a list.
        let form = csv_form("Pizza\nTacos\nSushi", "lunch.csv", "Lunch")?;
        let (status, body) = upload(&base, form).await?;
        assert_eq!(status, StatusCode::OK);
        let id = body["id"].as_str().unwrap().to_string();
        let url = body["url"].as_str().unwrap();
        assert!(url.ends_with(&format!("/game/{id}")));
        assert!(url.starts_with("http://127.0.0.1:"));

        // Read it back.
        let response = reqwest::get(format!("{base}/api/board/{id}")).await?;
        assert_eq!(response.status(), StatusCode::OK);
        let board: Value = response.json().await?;
        assert_eq!(board["id"], id.as_str());
        assert_eq!(board["title"], "Lunch");
        assert_eq!(board["freeIndex"], 12);
        let cells = board["cells"].as_array().unwrap();
        assert_eq!(cells.len(), 25);
        assert_eq!(cells[12], "FREE");
        let allowed: HashSet<&str> = ["Pizza", "Tacos", "Sushi"].into_iter().collect();
        for (i, cell) in cells.iter().enumerate() {
            if i != 12 {
                assert!(allowed.contains(cell.as_str().unwrap()));
            }
        }

        // The board page is the client shell.
        let response = reqwest::get(format!("{base}/game/{id}")).await?;
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/html; charset=utf-8"
        );
        let html = response.text().await?;
        assert!(html.contains("board-grid"));
        Ok(())
    }

    #[tokio::test]
    async fn test_blank_title() -> Fallible<()> {
        let base = spawn_server(|_| {}).await?;
        let form = csv_form("a,b,c", "list.csv", "   ")?;
        let (status, body) = upload(&base, form).await?;
        assert_eq!(status, StatusCode::OK);
        let id = body["id"].as_str().unwrap();
        let board: Value = reqwest::get(format!("{base}/api/board/{id}"))
            .await?
            .json()
            .await?;
        assert_eq!(board["title"], "Untitled Board");
        Ok(())
    }

    #[tokio::test]
    async fn test_public_url() -> Fallible<()> {
        let base = spawn_server(|config| {
            config.public_url = Some("https://bingo.example".to_string());
        })
        .await?;
        let form = csv_form("a,b,c", "list.csv", "T")?;
        let (_, body) = upload(&base, form).await?;
        let id = body["id"].as_str().unwrap();
        assert_eq!(body["url"], format!("https://bingo.example/game/{id}"));
        Ok(())
    }

    #[tokio::test]
    async fn test_upload_errors() -> Fallible<()> {
        let base = spawn_server(|_| {}).await?;

        // No file at all.
        let form = Form::new().text("title", "Nothing");
        let (status, body) = upload(&base, form).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "CSV file required.");

        // Wrong type.
        let part = Part::text("a,b").file_name("list.txt").mime_str("text/plain")?;
        let form = Form::new().part("csv", part);
        let (status, body) = upload(&base, form).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Please upload a CSV file.");

        // Empty list.
        let (status, body) = upload(&base, csv_form(" ,\n", "e.csv", "E")?).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "CSV is empty.");

        // Too many entries.
        let many: Vec<String> = (0..501).map(|i| i.to_string()).collect();
        let (status, body) = upload(&base, csv_form(&many.join("\n"), "m.csv", "M")?).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Too many entries (max 500).");

        // Too large, but within the transport limit.
        let big = "x,".repeat(103 * 1024);
        let (status, body) = upload(&base, csv_form(&big, "b.csv", "B")?).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "File exceeds 200KB limit.");

        // Past the transport limit: the body is cut off, same message.
        let huge = "x,".repeat(200 * 1024);
        let (status, body) = upload(&base, csv_form(&huge, "h.csv", "H")?).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "File exceeds 200KB limit.");
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_board() -> Fallible<()> {
        let base = spawn_server(|_| {}).await?;
        let response = reqwest::get(format!("{base}/api/board/doesNotExist")).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = response.json().await?;
        assert_eq!(body["error"], "Board not found.");

        // Malformed IDs are simply unknown.
        let response = reqwest::get(format!("{base}/api/board/no%20such")).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // The page itself is served regardless.
        let response = reqwest::get(format!("{base}/game/doesNotExist")).await?;
        assert!(response.status().is_success());
        Ok(())
    }

    #[tokio::test]
    async fn test_assets_and_fallback() -> Fallible<()> {
        let base = spawn_server(|_| {}).await?;

        let response = reqwest::get(format!("{base}/style.css")).await?;
        assert!(response.status().is_success());
        assert_eq!(response.headers().get("content-type").unwrap(), "text/css");

        let response = reqwest::get(format!("{base}/script.js")).await?;
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/javascript"
        );

        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .build()?;
        let response = client.get(format!("{base}/herp/derp")).send().await?;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get("location").unwrap(), "/");
        Ok(())
    }
}
