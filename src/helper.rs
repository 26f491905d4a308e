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

use std::path::PathBuf;

use tempfile::tempdir;

use crate::error::Fallible;

/// Create a fresh directory that outlives the test that made it.
pub fn create_tmp_directory() -> Fallible<PathBuf> {
    let dir: PathBuf = tempdir()?.keep().canonicalize()?;
    Ok(dir)
}

/// Write a CSV file with the given content into a fresh directory and return
/// its path.
pub fn create_tmp_csv(content: &str) -> Fallible<PathBuf> {
    let path = create_tmp_directory()?.join("entries.csv");
    std::fs::write(&path, content)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tmp_directory() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        assert!(dir.is_dir());
        Ok(())
    }

    #[test]
    fn test_create_tmp_csv() -> Fallible<()> {
        let path = create_tmp_csv("a,b")?;
        assert_eq!(std::fs::read_to_string(path)?, "a,b");
        Ok(())
    }
}
