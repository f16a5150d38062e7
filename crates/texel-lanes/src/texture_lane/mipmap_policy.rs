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

//! Mipmap policy: a pure lookup from the minification filter.

use texel_core::math::Extent2D;
use texel_core::renderer::MinificationFilter;

/// Returns `true` if `filter` samples from a mip chain, which must then be
/// generated after the base level is uploaded.
pub fn requires_mipmaps(filter: MinificationFilter) -> bool {
    filter.split().1.is_some()
}

/// The number of levels in a full mip chain for `size`: `floor(log2(max(w, h))) + 1`.
///
/// A zero-sized extent is treated as 1x1.
pub fn full_chain_length(size: Extent2D) -> u32 {
    let largest = size.max_dimension().max(1);
    u32::BITS - largest.leading_zeros()
}

/// The mip level count to allocate for a texture of `size` sampled with `filter`.
pub fn mip_level_count(size: Extent2D, filter: MinificationFilter) -> u32 {
    if requires_mipmaps(filter) {
        full_chain_length(size)
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_level_filters_need_no_mipmaps() {
        assert!(!requires_mipmaps(MinificationFilter::Nearest));
        assert!(!requires_mipmaps(MinificationFilter::Linear));
    }

    #[test]
    fn mipmap_filters_need_mipmaps() {
        for filter in [
            MinificationFilter::NearestMipmapNearest,
            MinificationFilter::LinearMipmapNearest,
            MinificationFilter::NearestMipmapLinear,
            MinificationFilter::LinearMipmapLinear,
        ] {
            assert!(requires_mipmaps(filter), "{filter:?}");
        }
    }

    #[test]
    fn chain_length() {
        assert_eq!(full_chain_length(Extent2D::new(1, 1)), 1);
        assert_eq!(full_chain_length(Extent2D::new(4, 4)), 3);
        assert_eq!(full_chain_length(Extent2D::new(16, 2)), 5);
        assert_eq!(full_chain_length(Extent2D::new(10, 10)), 4);
        assert_eq!(full_chain_length(Extent2D::new(0, 0)), 1);
    }

    #[test]
    fn level_count_follows_filter() {
        let size = Extent2D::new(16, 16);
        assert_eq!(mip_level_count(size, MinificationFilter::Linear), 1);
        assert_eq!(
            mip_level_count(size, MinificationFilter::LinearMipmapLinear),
            5
        );
    }
}
