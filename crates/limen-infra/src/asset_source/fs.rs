// Copyright 2025 eraflo
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

use async_trait::async_trait;
use limen_core::asset::{AssetSource, LoadError};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Serves asset URLs such as `/audio/door.mp3` from a directory on disk.
#[derive(Debug, Clone)]
pub struct FileAssetSource {
    root: PathBuf,
}

impl FileAssetSource {
    /// A source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory URLs resolve against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a URL to a path under the root. URLs that try to climb out of
    /// the root resolve to `None`.
    fn resolve(&self, url: &str) -> Option<PathBuf> {
        let relative = Path::new(url.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return None;
        }
        Some(self.root.join(relative))
    }
}

#[async_trait]
impl AssetSource for FileAssetSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        let path = self.resolve(url).ok_or_else(|| LoadError::NotFound {
            url: url.to_owned(),
        })?;
        tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => LoadError::NotFound {
                url: url.to_owned(),
            },
            _ => LoadError::Io {
                url: url.to_owned(),
                message: e.to_string(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_files_relative_to_root() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::create_dir_all(dir.path().join("audio")).expect("mkdir");
        std::fs::write(dir.path().join("audio/door.wav"), b"RIFF").expect("write");

        let source = FileAssetSource::new(dir.path());
        let bytes = source.fetch("/audio/door.wav").await.expect("file exists");
        assert_eq!(bytes, b"RIFF");
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().expect("temp dir");
        let source = FileAssetSource::new(dir.path());
        let err = source.fetch("/audio/nope.wav").await.unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
    }

    #[tokio::test]
    async fn parent_components_are_refused() {
        let dir = tempfile::tempdir().expect("temp dir");
        let source = FileAssetSource::new(dir.path().join("assets"));
        let err = source.fetch("/../secret.txt").await.unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
    }
}
