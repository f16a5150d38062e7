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

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use texel_core::fetch::{FetchError, ImageFetcher};

/// Reads encoded images from files below a root directory.
///
/// Locators are relative paths. A locator that would leave the root
/// (`..`, absolute paths) is rejected.
#[derive(Debug, Clone)]
pub struct FileImageFetcher {
    root: PathBuf,
}

impl FileImageFetcher {
    /// Creates a fetcher resolving locators against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory locators are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, locator: &str) -> Result<PathBuf, FetchError> {
        let relative = Path::new(locator);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(FetchError::Transport {
                locator: locator.to_owned(),
                message: "locator escapes the root directory".to_owned(),
            });
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ImageFetcher for FileImageFetcher {
    async fn fetch(&self, locator: &str) -> Result<Vec<u8>, FetchError> {
        let path = self.resolve(locator)?;
        log::debug!("FileImageFetcher: Reading {}", path.display());

        tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => FetchError::NotFound {
                locator: locator.to_owned(),
            },
            _ => FetchError::Transport {
                locator: locator.to_owned(),
                message: e.to_string(),
            },
        })
    }
}
