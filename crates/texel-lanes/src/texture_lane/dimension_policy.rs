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

//! Dimension policy: decides upload dimensions and resamples pixels to match.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use texel_core::math::{is_power_of_two, next_power_of_two, Extent2D};
use texel_core::renderer::{MinificationFilter, TextureCapabilities};
use thiserror::Error;

use super::mipmap_policy::requires_mipmaps;

/// A resampling request that cannot be carried out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResampleError {
    /// The source buffer length does not match its declared size.
    #[error("Source buffer is {actual} bytes, expected {expected}")]
    SourceSizeMismatch {
        /// `width * height * 4` of the source.
        expected: usize,
        /// The actual buffer length.
        actual: usize,
    },
    /// The source or target has a zero dimension.
    #[error("Cannot resample {src_width}x{src_height} to {dst_width}x{dst_height}")]
    EmptyExtent {
        /// Source width.
        src_width: u32,
        /// Source height.
        src_height: u32,
        /// Target width.
        dst_width: u32,
        /// Target height.
        dst_height: u32,
    },
}

/// Returns the size `size` must be uploaded at.
///
/// Dimensions are rounded up to the next power of two only when the filter
/// needs mipmaps, a dimension is not already a power of two, and the context
/// cannot mipmap non-power-of-two textures. Otherwise `size` is returned as is.
pub fn target_size(
    size: Extent2D,
    min_filter: MinificationFilter,
    capabilities: &TextureCapabilities,
) -> Extent2D {
    let pot = is_power_of_two(size.width) && is_power_of_two(size.height);
    if !requires_mipmaps(min_filter) || pot || capabilities.npot_mipmaps {
        return size;
    }

    // Overflowing dimensions saturate; the device size limit rejects them later.
    Extent2D::new(
        next_power_of_two(size.width).unwrap_or(u32::MAX),
        next_power_of_two(size.height).unwrap_or(u32::MAX),
    )
}

/// Resamples tightly packed RGBA8 pixels from `src` to `dst` with a bilinear
/// (triangle) filter.
///
/// This is a pure function: the same input always produces the same output.
/// Resampling to the same size returns a copy of the input.
pub fn resample(pixels: &[u8], src: Extent2D, dst: Extent2D) -> Result<Vec<u8>, ResampleError> {
    if src.is_empty() || dst.is_empty() {
        return Err(ResampleError::EmptyExtent {
            src_width: src.width,
            src_height: src.height,
            dst_width: dst.width,
            dst_height: dst.height,
        });
    }

    let expected = src.area() as usize * 4;
    if pixels.len() != expected {
        return Err(ResampleError::SourceSizeMismatch {
            expected,
            actual: pixels.len(),
        });
    }

    if src == dst {
        return Ok(pixels.to_vec());
    }

    let source = RgbaImage::from_raw(src.width, src.height, pixels.to_vec()).ok_or(
        ResampleError::SourceSizeMismatch {
            expected,
            actual: pixels.len(),
        },
    )?;
    let resized = imageops::resize(&source, dst.width, dst.height, FilterType::Triangle);
    Ok(resized.into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;

    const OLD_TIER: TextureCapabilities = TextureCapabilities {
        npot_mipmaps: false,
        max_texture_dimension_2d: 4096,
    };
    const NEW_TIER: TextureCapabilities = TextureCapabilities {
        npot_mipmaps: true,
        max_texture_dimension_2d: 4096,
    };
    const MIPMAPPED: MinificationFilter = MinificationFilter::LinearMipmapLinear;

    #[test]
    fn npot_mipmapped_rounds_up_on_old_tier() {
        assert_eq!(
            target_size(Extent2D::new(10, 10), MIPMAPPED, &OLD_TIER),
            Extent2D::new(16, 16)
        );
        assert_eq!(
            target_size(Extent2D::new(3, 3), MIPMAPPED, &OLD_TIER),
            Extent2D::new(4, 4)
        );
        assert_eq!(
            target_size(Extent2D::new(1, 6), MIPMAPPED, &OLD_TIER),
            Extent2D::new(1, 8)
        );
    }

    #[test]
    fn pot_is_left_alone() {
        assert_eq!(
            target_size(Extent2D::new(4, 4), MIPMAPPED, &OLD_TIER),
            Extent2D::new(4, 4)
        );
        assert_eq!(
            target_size(Extent2D::new(1, 1), MIPMAPPED, &OLD_TIER),
            Extent2D::new(1, 1)
        );
    }

    #[test]
    fn npot_without_mipmaps_is_left_alone() {
        assert_eq!(
            target_size(Extent2D::new(10, 10), MinificationFilter::Linear, &OLD_TIER),
            Extent2D::new(10, 10)
        );
    }

    #[test]
    fn npot_capable_context_is_left_alone() {
        assert_eq!(
            target_size(Extent2D::new(10, 10), MIPMAPPED, &NEW_TIER),
            Extent2D::new(10, 10)
        );
    }

    #[test]
    fn resample_changes_size() {
        let src = Extent2D::new(3, 3);
        let pixels = vec![200u8; 3 * 3 * 4];
        let out = resample(&pixels, src, Extent2D::new(4, 4)).unwrap();
        assert_eq!(out.len(), 4 * 4 * 4);
        // A uniform image stays uniform under bilinear filtering.
        assert!(out.iter().all(|&v| v == 200));
    }

    #[test]
    fn resample_is_deterministic() {
        let src = Extent2D::new(10, 10);
        let pixels: Vec<u8> = (0..10 * 10 * 4).map(|i| (i * 7 % 251) as u8).collect();
        let a = resample(&pixels, src, Extent2D::new(16, 16)).unwrap();
        let b = resample(&pixels, src, Extent2D::new(16, 16)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn resample_same_size_copies() {
        let src = Extent2D::new(2, 2);
        let pixels: Vec<u8> = (0..16).collect();
        assert_eq!(resample(&pixels, src, src).unwrap(), pixels);
    }

    #[test]
    fn resample_rejects_bad_input() {
        assert_eq!(
            resample(&[0; 7], Extent2D::new(2, 2), Extent2D::new(4, 4)),
            Err(ResampleError::SourceSizeMismatch {
                expected: 16,
                actual: 7
            })
        );
        assert!(matches!(
            resample(&[], Extent2D::new(0, 2), Extent2D::new(4, 4)),
            Err(ResampleError::EmptyExtent { .. })
        ));
    }
}
