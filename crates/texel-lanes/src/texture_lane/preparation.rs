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

use texel_core::math::Extent2D;
use texel_core::renderer::{CpuTexture, MinificationFilter, TextureCapabilities};
use thiserror::Error;

use super::dimension_policy::{resample, target_size, ResampleError};
use super::mipmap_policy::{mip_level_count, requires_mipmaps};

/// A decoded texture shaped for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedTexture {
    /// Pixels at their upload size.
    pub texture: CpuTexture,
    /// Number of mip levels to allocate.
    pub mip_level_count: u32,
    /// The original size when the dimension policy resampled the pixels.
    pub resized_from: Option<Extent2D>,
    /// Whether the minification filter samples a mip chain.
    pub mipmapped: bool,
}

impl PreparedTexture {
    /// Returns `true` if a mip chain must be generated after upload,
    /// even when the chain is the base level alone.
    pub fn needs_mipmaps(&self) -> bool {
        self.mipmapped
    }
}

/// Why a decoded texture cannot be uploaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrepareError {
    /// Resampling to the target size failed.
    #[error("Failed to resample texture: {0}")]
    Resample(#[from] ResampleError),
    /// The upload size exceeds the context's limit.
    #[error("Texture size {}x{} exceeds the maximum dimension {max}", size.width, size.height)]
    TooLarge {
        /// The size that would have been uploaded.
        size: Extent2D,
        /// The context's `max_texture_dimension_2d`.
        max: u32,
    },
}

/// Applies the dimension and mipmap policies to a decoded texture.
///
/// The size limit is checked before resampling so an oversized target never
/// allocates a pixel buffer.
pub fn prepare_for_upload(
    texture: CpuTexture,
    min_filter: MinificationFilter,
    capabilities: &TextureCapabilities,
) -> Result<PreparedTexture, PrepareError> {
    let source_size = texture.size;
    let upload_size = target_size(source_size, min_filter, capabilities);

    if upload_size.max_dimension() > capabilities.max_texture_dimension_2d {
        return Err(PrepareError::TooLarge {
            size: upload_size,
            max: capabilities.max_texture_dimension_2d,
        });
    }

    let (texture, resized_from) = if upload_size == source_size {
        (texture, None)
    } else {
        log::debug!(
            "Resampling texture from {}x{} to {}x{}",
            source_size.width,
            source_size.height,
            upload_size.width,
            upload_size.height
        );
        let pixels = resample(&texture.pixels, source_size, upload_size)?;
        (
            CpuTexture {
                pixels,
                size: upload_size,
                format: texture.format,
            },
            Some(source_size),
        )
    };

    Ok(PreparedTexture {
        mip_level_count: mip_level_count(upload_size, min_filter),
        texture,
        resized_from,
        mipmapped: requires_mipmaps(min_filter),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32) -> CpuTexture {
        CpuTexture::rgba8(
            vec![255; (width * height * 4) as usize],
            Extent2D::new(width, height),
        )
    }

    fn caps(npot_mipmaps: bool, max: u32) -> TextureCapabilities {
        TextureCapabilities {
            npot_mipmaps,
            max_texture_dimension_2d: max,
        }
    }

    #[test]
    fn resizes_and_mipmaps_npot_on_old_tier() {
        let prepared = prepare_for_upload(
            solid(10, 10),
            MinificationFilter::LinearMipmapLinear,
            &caps(false, 4096),
        )
        .unwrap();

        assert_eq!(prepared.texture.size, Extent2D::new(16, 16));
        assert_eq!(prepared.texture.pixels.len(), 16 * 16 * 4);
        assert_eq!(prepared.mip_level_count, 5);
        assert_eq!(prepared.resized_from, Some(Extent2D::new(10, 10)));
        assert!(prepared.needs_mipmaps());
    }

    #[test]
    fn keeps_npot_without_mipmaps() {
        let prepared =
            prepare_for_upload(solid(10, 10), MinificationFilter::Linear, &caps(false, 4096))
                .unwrap();

        assert_eq!(prepared.texture.size, Extent2D::new(10, 10));
        assert_eq!(prepared.mip_level_count, 1);
        assert_eq!(prepared.resized_from, None);
        assert!(!prepared.needs_mipmaps());
    }

    #[test]
    fn mipmaps_npot_in_place_when_supported() {
        let prepared = prepare_for_upload(
            solid(10, 6),
            MinificationFilter::NearestMipmapNearest,
            &caps(true, 4096),
        )
        .unwrap();

        assert_eq!(prepared.texture.size, Extent2D::new(10, 6));
        assert_eq!(prepared.mip_level_count, 4);
        assert_eq!(prepared.resized_from, None);
    }

    #[test]
    fn single_pixel_is_a_one_level_chain() {
        let prepared = prepare_for_upload(
            solid(1, 1),
            MinificationFilter::LinearMipmapLinear,
            &caps(false, 4096),
        )
        .unwrap();

        assert_eq!(prepared.texture.size, Extent2D::new(1, 1));
        assert_eq!(prepared.mip_level_count, 1);
        assert!(prepared.needs_mipmaps());
    }

    #[test]
    fn rejects_targets_above_the_limit() {
        let err = prepare_for_upload(
            solid(9, 9),
            MinificationFilter::LinearMipmapLinear,
            &caps(false, 8),
        )
        .unwrap_err();

        assert_eq!(
            err,
            PrepareError::TooLarge {
                size: Extent2D::new(16, 16),
                max: 8
            }
        );
    }
}
