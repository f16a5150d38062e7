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

//! Texture decoding.

use crate::asset_lane::AssetLoaderLane;
use anyhow::{ensure, Context, Result};
use texel_core::{math::Extent2D, renderer::CpuTexture};

/// A lane dedicated to decoding encoded images (PNG, JPEG, ...) on the CPU
#[derive(Debug, Clone, Copy, Default)]
pub struct TextureLoaderLane;

impl TextureLoaderLane {
    fn decode(bytes: &[u8]) -> Result<CpuTexture> {
        // Decode the image using the `image` crate
        let img = image::load_from_memory(bytes).context("Failed to decode image from memory")?;

        // Convert to RGBA8 (keep in sRGB space)
        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();
        ensure!(
            width > 0 && height > 0,
            "Decoded image has a zero dimension: {width}x{height}"
        );

        Ok(CpuTexture::rgba8(
            rgba_img.into_raw(),
            Extent2D::new(width, height),
        ))
    }
}

impl AssetLoaderLane<CpuTexture> for TextureLoaderLane {
    fn load(
        &self,
        bytes: &[u8],
    ) -> Result<CpuTexture, Box<dyn std::error::Error + Send + Sync + 'static>> {
        Ok(Self::decode(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 7, 255]));
        let mut bytes = Cursor::new(Vec::new());
        img.write_to(&mut bytes, ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn decodes_png_to_rgba8() {
        let texture = TextureLoaderLane.load(&encode_png(5, 3)).unwrap();
        assert_eq!(texture.size, Extent2D::new(5, 3));
        assert_eq!(texture.pixels.len(), 5 * 3 * 4);
        // Pixel (4, 2)
        let offset = (2 * 5 + 4) * 4;
        assert_eq!(&texture.pixels[offset..offset + 4], &[4, 2, 7, 255]);
    }

    #[test]
    fn rejects_garbage() {
        let err = TextureLoaderLane.load(b"definitely not an image").unwrap_err();
        assert!(err.to_string().contains("Failed to decode image"));
    }
}
