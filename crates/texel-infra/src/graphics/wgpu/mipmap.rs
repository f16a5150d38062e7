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

//! CPU-side mip chain construction.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use texel_core::math::Extent2D;
use texel_core::renderer::ResourceError;

/// One level below the base level.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MipLevel {
    pub level: u32,
    pub size: Extent2D,
    pub pixels: Vec<u8>,
}

/// Size of mip `level` for a base of `base`, never below 1x1.
pub(crate) fn level_size(base: Extent2D, level: u32) -> Extent2D {
    Extent2D::new(
        (base.width >> level).max(1),
        (base.height >> level).max(1),
    )
}

/// Builds levels `1..level_count` from tightly packed 4-byte-per-pixel base data.
///
/// Each level is filtered from the previous one, halving both dimensions.
pub(crate) fn build_chain(
    base: &[u8],
    size: Extent2D,
    level_count: u32,
) -> Result<Vec<MipLevel>, ResourceError> {
    let mut previous = RgbaImage::from_raw(size.width, size.height, base.to_vec()).ok_or(
        ResourceError::InvalidData {
            expected: size.area() as usize * 4,
            actual: base.len(),
        },
    )?;

    let mut levels = Vec::with_capacity(level_count.saturating_sub(1) as usize);
    for level in 1..level_count {
        let level_size = level_size(size, level);
        let next = imageops::resize(
            &previous,
            level_size.width,
            level_size.height,
            FilterType::Triangle,
        );
        levels.push(MipLevel {
            level,
            size: level_size,
            pixels: next.as_raw().clone(),
        });
        previous = next;
    }
    Ok(levels)
}
