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

use std::collections::BTreeMap;
#[cfg(test)]
use std::collections::HashMap;
use std::fs::read_to_string;
use std::fs::write;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::BoardError;

/// A viewer's key-value store, the equivalent of a browser's
/// `localStorage`.
pub trait LocalStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), BoardError>;
    fn remove(&mut self, key: &str) -> Result<(), BoardError>;
}

/// A store that lives only as long as the value.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl LocalStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), BoardError> {
        self.items.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), BoardError> {
        self.items.remove(key);
        Ok(())
    }
}

/// A store kept in a single JSON file. Every write rewrites the file.
pub struct FileStore {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`. A missing or unreadable file starts empty.
    /// Anything other than a missing file is logged.
    pub fn open(path: PathBuf) -> Self {
        let items: BTreeMap<String, String> = match read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(items) => items,
                Err(e) => {
                    log::debug!("Ignoring unreadable viewer store {}: {e}", path.display());
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                log::debug!("Cannot read viewer store {}: {e}", path.display());
                BTreeMap::new()
            }
        };
        Self { path, items }
    }

    fn flush(&self) -> Result<(), BoardError> {
        let json = serde_json::to_string_pretty(&self.items)?;
        write(&self.path, json)?;
        Ok(())
    }
}

impl LocalStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), BoardError> {
        self.items.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), BoardError> {
        if self.items.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;
    use crate::helper::create_tmp_directory;

    #[test]
    fn test_memory_store() -> Fallible<()> {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k"), None);
        store.set("k", "v".to_string())?;
        assert_eq!(store.get("k"), Some("v".to_string()));
        store.remove("k")?;
        assert_eq!(store.get("k"), None);
        Ok(())
    }

    #[test]
    fn test_file_store_persists() -> Fallible<()> {
        let path = create_tmp_directory()?.join("viewer.json");
        {
            let mut store = FileStore::open(path.clone());
            store.set("a", "1".to_string())?;
            store.set("b", "2".to_string())?;
            store.remove("a")?;
        }
        let store = FileStore::open(path);
        assert_eq!(store.get("a"), None);
        assert_eq!(store.get("b"), Some("2".to_string()));
        Ok(())
    }

    #[test]
    fn test_file_store_on_a_directory() -> Fallible<()> {
        // Reading a directory fails with something other than NotFound.
        let dir = create_tmp_directory()?;
        let store = FileStore::open(dir);
        assert_eq!(store.get("a"), None);
        Ok(())
    }

    #[test]
    fn test_file_store_ignores_garbage() -> Fallible<()> {
        let path = create_tmp_directory()?.join("viewer.json");
        write(&path, "not json")?;
        let store = FileStore::open(path);
        assert_eq!(store.get("a"), None);
        Ok(())
    }
}
