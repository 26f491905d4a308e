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

use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::Fallible;

pub const CONFIG_FILE_NAME: &str = "bingoboard.toml";
pub const DATABASE_FILE_NAME: &str = "boards.db";
pub const VIEWER_FILE_NAME: &str = "viewer.json";

/// Bounds enforced on uploaded lists. The defaults are part of the public
/// contract.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Limits {
    /// Maximum size of an upload, in bytes.
    pub max_bytes: usize,
    /// Maximum number of entries in a list.
    pub max_entries: usize,
    /// Maximum length of a single entry, in characters.
    pub max_entry_len: usize,
    /// Whether over-long entries are truncated (`true`) or rejected.
    pub truncate: bool,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_bytes: 200 * 1024,
            max_entries: 500,
            max_entry_len: 160,
            truncate: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Address the server listens on.
    pub bind: String,
    /// Directory holding the database and the viewer store.
    pub data_dir: PathBuf,
    /// Origin used to build share links. When unset, the request's `Host`
    /// header is used.
    pub public_url: Option<String>,
    pub limits: Limits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3000".to_string(),
            data_dir: PathBuf::from("data"),
            public_url: None,
            limits: Limits::default(),
        }
    }
}

impl Config {
    /// Load the config file from the data directory, if there is one.
    /// The `data_dir` field always reflects the directory passed in.
    pub fn load(data_dir: &Path) -> Fallible<Self> {
        let path = data_dir.join(CONFIG_FILE_NAME);
        let mut config: Config = if path.exists() {
            log::debug!("Loading config from {}", path.display());
            let content = read_to_string(&path)?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };
        config.data_dir = data_dir.to_path_buf();
        Ok(config)
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE_NAME)
    }

    pub fn viewer_path(&self) -> PathBuf {
        self.data_dir.join(VIEWER_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use super::*;
    use crate::helper::create_tmp_directory;

    #[test]
    fn test_defaults() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let config = Config::load(&dir)?;
        assert_eq!(config.limits, Limits::default());
        assert_eq!(config.limits.max_bytes, 204800);
        assert_eq!(config.limits.max_entries, 500);
        assert_eq!(config.limits.max_entry_len, 160);
        assert!(config.limits.truncate);
        assert_eq!(config.data_dir, dir);
        assert_eq!(config.public_url, None);
        Ok(())
    }

    #[test]
    fn test_partial_file() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        write(
            dir.join(CONFIG_FILE_NAME),
            "bind = \"127.0.0.1:9000\"\n\n[limits]\ntruncate = false\n",
        )?;
        let config = Config::load(&dir)?;
        assert_eq!(config.bind, "127.0.0.1:9000");
        assert!(!config.limits.truncate);
        assert_eq!(config.limits.max_entries, 500);
        Ok(())
    }

    #[test]
    fn test_unknown_key_rejected() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        write(dir.join(CONFIG_FILE_NAME), "colour = \"blue\"\n")?;
        assert!(Config::load(&dir).is_err());
        Ok(())
    }
}
