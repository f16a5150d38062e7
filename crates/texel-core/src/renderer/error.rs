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

//! Defines the error type reported by graphics devices.

use crate::math::Extent2D;
use crate::renderer::api::texture::TextureId;
use std::fmt;

/// An error related to the creation or use of a GPU texture.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceError {
    /// No texture exists for the given handle (never created, or already destroyed).
    NotFound(TextureId),
    /// The requested size is zero or exceeds what the device supports.
    UnsupportedSize {
        /// The requested size.
        size: Extent2D,
        /// The largest dimension the device accepts.
        max_dimension: u32,
    },
    /// The pixel data handed to an upload does not match the texture's layout.
    InvalidData {
        /// The number of bytes the upload required.
        expected: usize,
        /// The number of bytes that were provided.
        actual: usize,
    },
    /// An operation needed data the texture does not have (e.g., building
    /// mipmaps before the base level was written).
    MissingData(TextureId),
    /// An error originating from the specific graphics backend implementation.
    BackendError(String),
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::NotFound(id) => write!(f, "Texture not found for ID: {id:?}"),
            ResourceError::UnsupportedSize {
                size,
                max_dimension,
            } => write!(
                f,
                "Unsupported texture size {}x{} (maximum dimension is {max_dimension})",
                size.width, size.height
            ),
            ResourceError::InvalidData { expected, actual } => write!(
                f,
                "Invalid texture data: expected {expected} bytes, got {actual}"
            ),
            ResourceError::MissingData(id) => {
                write!(f, "Texture {id:?} has no base level data")
            }
            ResourceError::BackendError(msg) => {
                write!(f, "Backend-specific resource error: {msg}")
            }
        }
    }
}

impl std::error::Error for ResourceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_error_display() {
        assert_eq!(
            format!("{}", ResourceError::NotFound(TextureId(7))),
            "Texture not found for ID: TextureId(7)"
        );
        assert_eq!(
            format!(
                "{}",
                ResourceError::UnsupportedSize {
                    size: Extent2D::new(16384, 2),
                    max_dimension: 8192,
                }
            ),
            "Unsupported texture size 16384x2 (maximum dimension is 8192)"
        );
        assert_eq!(
            format!(
                "{}",
                ResourceError::InvalidData {
                    expected: 64,
                    actual: 12
                }
            ),
            "Invalid texture data: expected 64 bytes, got 12"
        );
    }
}
