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

//! Defines data structures related to GPU texture and sampler resources.

use crate::math::Extent2D;
use crate::renderer::TextureFormat;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Defines how texture coordinates are handled when sampling outside the `[0, 1]` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AddressMode {
    /// Coordinates wrap around. `1.1` becomes `0.1`.
    Repeat,
    /// Coordinates are clamped to the edge. `1.1` becomes `1.0`.
    #[default]
    ClampToEdge,
    /// Coordinates wrap around, mirroring at each integer boundary.
    MirrorRepeat,
}

/// Defines the filtering mode for texture sampling.
///
/// This is also the full set of magnification filters: magnification never
/// involves mipmaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FilterMode {
    /// Point sampling. Returns the value of the nearest texel.
    Nearest,
    /// Linear interpolation. Returns a weighted average of the four nearest texels.
    #[default]
    Linear,
}

/// Defines the filtering mode between mipmap levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MipmapFilterMode {
    /// Use the nearest mipmap level.
    Nearest,
    /// Linearly interpolate between the two nearest mipmap levels.
    Linear,
}

/// The sampling mode used when a texture is rendered smaller than its native resolution.
///
/// The `*Mipmap*` variants sample from a mip chain; the first word names the
/// filter used within a level, the last word the filter used between levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MinificationFilter {
    /// Nearest texel of the base level.
    Nearest,
    /// Bilinear filtering of the base level.
    #[default]
    Linear,
    /// Nearest texel of the nearest mip level.
    NearestMipmapNearest,
    /// Bilinear filtering within the nearest mip level.
    LinearMipmapNearest,
    /// Nearest texel, linearly blended between the two nearest mip levels.
    NearestMipmapLinear,
    /// Trilinear filtering.
    LinearMipmapLinear,
}

impl MinificationFilter {
    /// Splits the mode into the per-level filter and the optional between-level filter.
    ///
    /// The second element is `None` for modes that only sample the base level.
    pub fn split(self) -> (FilterMode, Option<MipmapFilterMode>) {
        match self {
            MinificationFilter::Nearest => (FilterMode::Nearest, None),
            MinificationFilter::Linear => (FilterMode::Linear, None),
            MinificationFilter::NearestMipmapNearest => {
                (FilterMode::Nearest, Some(MipmapFilterMode::Nearest))
            }
            MinificationFilter::LinearMipmapNearest => {
                (FilterMode::Linear, Some(MipmapFilterMode::Nearest))
            }
            MinificationFilter::NearestMipmapLinear => {
                (FilterMode::Nearest, Some(MipmapFilterMode::Linear))
            }
            MinificationFilter::LinearMipmapLinear => {
                (FilterMode::Linear, Some(MipmapFilterMode::Linear))
            }
        }
    }
}

/// A descriptor used to create a [`TextureId`].
///
/// Every texture created through this API is a single-sampled 2D texture that
/// can be written from the CPU and sampled from shaders.
#[derive(Debug, Clone)]
pub struct TextureDescriptor<'a> {
    /// An optional debug label.
    pub label: Option<Cow<'a, str>>,
    /// The dimensions of the base level.
    pub size: Extent2D,
    /// The number of mipmap levels for the texture.
    pub mip_level_count: u32,
    /// The format of the texels in the texture.
    pub format: TextureFormat,
}

/// Sampler state applied to a texture.
/// A sampler defines how a shader will sample from a texture.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerDescriptor<'a> {
    /// An optional debug label.
    pub label: Option<Cow<'a, str>>,
    /// The address mode for the U (or S) texture coordinate.
    pub address_mode_u: AddressMode,
    /// The address mode for the V (or T) texture coordinate.
    pub address_mode_v: AddressMode,
    /// The filter mode for magnification (when the texture is larger on screen than its resolution).
    pub mag_filter: FilterMode,
    /// The filter mode for minification (when the texture is smaller on screen than its resolution).
    pub min_filter: FilterMode,
    /// The filter mode to use between mipmap levels, `None` when only the base level is sampled.
    pub mipmap_filter: Option<MipmapFilterMode>,
    /// The minimum level of detail (LOD) to use for mipmapping.
    pub lod_min_clamp: f32,
    /// The maximum level of detail (LOD) to use for mipmapping.
    pub lod_max_clamp: f32,
    /// The maximum anisotropy level to use.
    pub anisotropy_clamp: u16,
}

/// A CPU-side representation of a decoded texture, ready to be uploaded to the GPU.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuTexture {
    /// The raw pixel data, tightly packed rows.
    pub pixels: Vec<u8>,
    /// The size of the texture
    pub size: Extent2D,
    /// The format of the pixel data
    pub format: TextureFormat,
}

impl crate::asset::Asset for CpuTexture {}

impl CpuTexture {
    /// Wraps tightly packed RGBA8 pixels.
    pub fn rgba8(pixels: Vec<u8>, size: Extent2D) -> Self {
        Self {
            pixels,
            size,
            format: TextureFormat::Rgba8UnormSrgb,
        }
    }

    /// Creates a texture descriptor from this CPU texture data
    pub fn to_descriptor<'a>(
        &self,
        label: Option<Cow<'a, str>>,
        mip_level_count: u32,
    ) -> TextureDescriptor<'a> {
        TextureDescriptor {
            label,
            size: self.size,
            mip_level_count,
            format: self.format,
        }
    }

    /// Gets the row size in bytes (important for texture upload alignment)
    pub fn row_size(&self) -> usize {
        let bytes_per_pixel = self.format.bytes_per_pixel();
        self.size.width as usize * bytes_per_pixel as usize
    }

    /// Returns the byte length the pixel buffer must have for its size and format.
    pub fn expected_len(&self) -> usize {
        self.row_size() * self.size.height as usize
    }
}

/// An opaque handle to a GPU texture resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

/// A GPU texture as seen by renderers: its handle plus the facts needed to sample it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GpuTexture {
    /// The backend handle.
    pub id: TextureId,
    /// The size of the base level.
    pub size: Extent2D,
    /// The number of mip levels.
    pub mip_level_count: u32,
    /// Whether a mip chain was generated for sampling with a mipmap filter.
    ///
    /// A 1x1 texture can be mipmapped with a single level.
    pub mipmapped: bool,
}

impl GpuTexture {
    /// Returns `true` if the texture carries a complete mip chain.
    pub fn has_mipmaps(&self) -> bool {
        self.mipmapped
    }
}

/// Texture-related capabilities reported by a graphics context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureCapabilities {
    /// Whether non-power-of-two textures may carry a mip chain and be sampled with it.
    pub npot_mipmaps: bool,
    /// The largest width or height a 2D texture may have.
    pub max_texture_dimension_2d: u32,
}

impl Default for TextureCapabilities {
    fn default() -> Self {
        Self {
            npot_mipmaps: true,
            max_texture_dimension_2d: 8192,
        }
    }
}
