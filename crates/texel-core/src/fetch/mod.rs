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

//! The image transport contract.
//!
//! Fetching encoded image bytes is the only asynchronous step of texture loading.
//! The texture manager does not care whether bytes come from disk, a network, or
//! an archive; it only sees an [`ImageFetcher`]. Retrying is the transport's job.

use async_trait::async_trait;
use std::fmt;

/// Fetches encoded image bytes for a locator.
#[async_trait]
pub trait ImageFetcher: Send + Sync + 'static {
    /// Returns the encoded bytes (PNG, JPEG, ...) behind `locator`.
    async fn fetch(&self, locator: &str) -> Result<Vec<u8>, FetchError>;
}

/// A failure to fetch the bytes behind a locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Nothing exists at the locator.
    NotFound {
        /// The locator that was requested.
        locator: String,
    },
    /// The transport failed while reading.
    Transport {
        /// The locator that was requested.
        locator: String,
        /// A description of the underlying failure.
        message: String,
    },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::NotFound { locator } => write!(f, "No image found at '{locator}'"),
            FetchError::Transport { locator, message } => {
                write!(f, "Failed to fetch '{locator}': {message}")
            }
        }
    }
}

impl std::error::Error for FetchError {}
