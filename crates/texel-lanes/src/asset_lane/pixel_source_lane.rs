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

//! Resolves a [`PixelSource`] into decoded pixels.

use std::sync::Arc;

use texel_core::asset::PixelSource;
use texel_core::fetch::{FetchError, ImageFetcher};
use texel_core::math::Extent2D;
use texel_core::renderer::CpuTexture;
use thiserror::Error;

use super::{AssetLoaderLane, TextureLoaderLane};

/// Why a pixel source could not be turned into pixels.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The transport failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// The bytes were fetched but are not a decodable image.
    #[error("Failed to decode '{locator}': {source}")]
    Decode {
        /// The locator the bytes came from.
        locator: String,
        /// The decoder's error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The decode task was cancelled or panicked.
    #[error("Decode task for '{locator}' did not complete: {source}")]
    DecodeTask {
        /// The locator the bytes came from.
        locator: String,
        /// The blocking task's failure.
        #[source]
        source: tokio::task::JoinError,
    },
    /// A locator was requested but no transport is configured.
    #[error("No image fetcher configured to resolve '{locator}'")]
    NoFetcher {
        /// The locator that could not be resolved.
        locator: String,
    },
}

/// Normalizes pixel sources into decoded RGBA8 textures.
///
/// Locators go through the [`ImageFetcher`] and are decoded with the
/// [`TextureLoaderLane`]; explicit buffers are passed through unchanged.
/// This lane never touches a GPU resource.
#[derive(Clone, Default)]
pub struct PixelSourceLane {
    fetcher: Option<Arc<dyn ImageFetcher>>,
    decoder: TextureLoaderLane,
}

impl std::fmt::Debug for PixelSourceLane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelSourceLane")
            .field("has_fetcher", &self.has_fetcher())
            .finish()
    }
}

impl PixelSourceLane {
    /// Creates a lane that resolves locators through `fetcher`.
    pub fn new(fetcher: Arc<dyn ImageFetcher>) -> Self {
        Self {
            fetcher: Some(fetcher),
            decoder: TextureLoaderLane,
        }
    }

    /// Creates a lane that can only pass pixel buffers through.
    pub fn buffers_only() -> Self {
        Self::default()
    }

    /// Returns `true` if locators can be resolved.
    pub fn has_fetcher(&self) -> bool {
        self.fetcher.is_some()
    }

    /// Resolves `source` into a decoded texture.
    ///
    /// Decoding runs on the runtime's blocking pool, so this must be awaited
    /// inside a tokio runtime. Failures are reported once; nothing is retried.
    pub async fn resolve(&self, source: PixelSource) -> Result<CpuTexture, ResolveError> {
        match source {
            PixelSource::Locator(locator) => self.resolve_locator(locator).await,
            PixelSource::Buffer {
                pixels,
                width,
                height,
            } => Ok(Self::pass_through(pixels, width, height)),
        }
    }

    /// Wraps a caller-supplied buffer without copying or validating it again.
    pub fn pass_through(pixels: Vec<u8>, width: u32, height: u32) -> CpuTexture {
        CpuTexture::rgba8(pixels, Extent2D::new(width, height))
    }

    async fn resolve_locator(&self, locator: String) -> Result<CpuTexture, ResolveError> {
        let fetcher = self
            .fetcher
            .as_ref()
            .ok_or_else(|| ResolveError::NoFetcher {
                locator: locator.clone(),
            })?;

        let bytes = fetcher.fetch(&locator).await?;
        log::debug!(
            "PixelSourceLane: Fetched {} bytes from '{locator}'",
            bytes.len()
        );

        let decoder = self.decoder;
        let decoded = tokio::task::spawn_blocking(move || decoder.load(&bytes)).await;
        match decoded {
            Ok(result) => result.map_err(|source| ResolveError::Decode { locator, source }),
            Err(source) => Err(ResolveError::DecodeTask { locator, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::collections::HashMap;
    use std::io::Cursor;

    struct MapFetcher(HashMap<String, Vec<u8>>);

    #[async_trait]
    impl ImageFetcher for MapFetcher {
        async fn fetch(&self, locator: &str) -> Result<Vec<u8>, FetchError> {
            self.0
                .get(locator)
                .cloned()
                .ok_or_else(|| FetchError::NotFound {
                    locator: locator.to_string(),
                })
        }
    }

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255]));
        let mut bytes = Cursor::new(Vec::new());
        img.write_to(&mut bytes, ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    fn lane() -> PixelSourceLane {
        let mut images = HashMap::new();
        images.insert("red.png".to_string(), png(10, 10));
        images.insert("broken.png".to_string(), b"not a png".to_vec());
        PixelSourceLane::new(Arc::new(MapFetcher(images)))
    }

    #[tokio::test]
    async fn resolves_and_decodes_locator() {
        let texture = lane()
            .resolve(PixelSource::Locator("red.png".into()))
            .await
            .unwrap();
        assert_eq!(texture.size, Extent2D::new(10, 10));
        assert_eq!(&texture.pixels[..4], &[255, 0, 0, 255]);
    }

    #[tokio::test]
    async fn missing_locator_is_a_fetch_error() {
        let err = lane()
            .resolve(PixelSource::Locator("missing.png".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::Fetch(FetchError::NotFound { .. })));
    }

    #[tokio::test]
    async fn undecodable_bytes_are_a_decode_error() {
        let err = lane()
            .resolve(PixelSource::Locator("broken.png".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::Decode { ref locator, .. } if locator == "broken.png"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn concurrent_locators_decode_on_a_single_threaded_runtime() {
        let mut images = HashMap::new();
        images.insert("small.png".to_string(), png(2, 3));
        images.insert("large.png".to_string(), png(512, 256));
        let lane = PixelSourceLane::new(Arc::new(MapFetcher(images)));

        let (small, large) = tokio::join!(
            lane.resolve(PixelSource::Locator("small.png".into())),
            lane.resolve(PixelSource::Locator("large.png".into())),
        );

        assert_eq!(small.unwrap().size, Extent2D::new(2, 3));
        let large = large.unwrap();
        assert_eq!(large.size, Extent2D::new(512, 256));
        assert_eq!(large.pixels.len(), 512 * 256 * 4);
    }

    #[test]
    fn debug_reports_whether_a_fetcher_is_attached() {
        assert!(lane().has_fetcher());
        assert!(!PixelSourceLane::buffers_only().has_fetcher());
        assert!(format!("{:?}", lane()).contains("has_fetcher: true"));
        assert!(format!("{:?}", PixelSourceLane::buffers_only()).contains("has_fetcher: false"));
    }

    #[tokio::test]
    async fn buffers_pass_through_unchanged() {
        let pixels: Vec<u8> = (0..3 * 2 * 4).map(|i| i as u8).collect();
        let texture = PixelSourceLane::buffers_only()
            .resolve(PixelSource::Buffer {
                pixels: pixels.clone(),
                width: 3,
                height: 2,
            })
            .await
            .unwrap();
        assert_eq!(texture.pixels, pixels);
        assert_eq!(texture.size, Extent2D::new(3, 2));
    }

    #[tokio::test]
    async fn locator_without_fetcher_fails() {
        let err = PixelSourceLane::buffers_only()
            .resolve(PixelSource::Locator("red.png".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::NoFetcher { .. }));
    }
}
