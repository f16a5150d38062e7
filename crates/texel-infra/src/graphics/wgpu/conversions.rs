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

use texel_core::math::{Extent2D, Extent3D, Origin3D};
use texel_core::renderer::{
    AddressMode, FilterMode, MipmapFilterMode, SamplerDescriptor, TextureFormat,
};

/// A local extension trait to convert our types into WGPU-compatible types.
/// This avoids Rust's orphan rules while keeping an idiomatic `.into_wgpu()` syntax.
pub trait IntoWgpu<T> {
    /// Consumes self and converts it into a WGPU-compatible type.
    fn into_wgpu(self) -> T;
}

// --- Dimensions and Origins ---

impl IntoWgpu<wgpu::Extent3d> for Extent2D {
    fn into_wgpu(self) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: 1,
        }
    }
}

impl IntoWgpu<wgpu::Extent3d> for Extent3D {
    fn into_wgpu(self) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: self.depth_or_array_layers,
        }
    }
}

impl IntoWgpu<wgpu::Origin3d> for Origin3D {
    fn into_wgpu(self) -> wgpu::Origin3d {
        wgpu::Origin3d {
            x: self.x,
            y: self.y,
            z: self.z,
        }
    }
}

// --- Sampler related Enums ---

impl IntoWgpu<wgpu::AddressMode> for AddressMode {
    fn into_wgpu(self) -> wgpu::AddressMode {
        match self {
            AddressMode::Repeat => wgpu::AddressMode::Repeat,
            AddressMode::ClampToEdge => wgpu::AddressMode::ClampToEdge,
            AddressMode::MirrorRepeat => wgpu::AddressMode::MirrorRepeat,
        }
    }
}

impl IntoWgpu<wgpu::FilterMode> for FilterMode {
    fn into_wgpu(self) -> wgpu::FilterMode {
        match self {
            FilterMode::Nearest => wgpu::FilterMode::Nearest,
            FilterMode::Linear => wgpu::FilterMode::Linear,
        }
    }
}

impl IntoWgpu<wgpu::MipmapFilterMode> for Option<MipmapFilterMode> {
    fn into_wgpu(self) -> wgpu::MipmapFilterMode {
        match self {
            Some(MipmapFilterMode::Linear) => wgpu::MipmapFilterMode::Linear,
            // Without a mip filter the lod clamp keeps sampling on the base level.
            Some(MipmapFilterMode::Nearest) | None => wgpu::MipmapFilterMode::Nearest,
        }
    }
}

// --- Texture Format ---

impl IntoWgpu<wgpu::TextureFormat> for TextureFormat {
    fn into_wgpu(self) -> wgpu::TextureFormat {
        match self {
            TextureFormat::R8Unorm => wgpu::TextureFormat::R8Unorm,
            TextureFormat::Rgba8Unorm => wgpu::TextureFormat::Rgba8Unorm,
            TextureFormat::Rgba8UnormSrgb => wgpu::TextureFormat::Rgba8UnormSrgb,
            TextureFormat::Bgra8UnormSrgb => wgpu::TextureFormat::Bgra8UnormSrgb,
        }
    }
}

// --- Sampler Descriptor ---

impl<'a> IntoWgpu<wgpu::SamplerDescriptor<'a>> for &'a SamplerDescriptor<'a> {
    fn into_wgpu(self) -> wgpu::SamplerDescriptor<'a> {
        let all_linear = self.mag_filter == FilterMode::Linear
            && self.min_filter == FilterMode::Linear
            && self.mipmap_filter == Some(MipmapFilterMode::Linear);
        // wgpu only accepts anisotropy with fully linear filtering.
        let anisotropy_clamp = if all_linear {
            self.anisotropy_clamp.max(1)
        } else {
            1
        };
        // Base-level filters must not reach into the mip chain.
        let lod_max_clamp = if self.mipmap_filter.is_some() {
            self.lod_max_clamp
        } else {
            self.lod_min_clamp
        };

        wgpu::SamplerDescriptor {
            label: self.label.as_deref(),
            address_mode_u: self.address_mode_u.into_wgpu(),
            address_mode_v: self.address_mode_v.into_wgpu(),
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: self.mag_filter.into_wgpu(),
            min_filter: self.min_filter.into_wgpu(),
            mipmap_filter: self.mipmap_filter.into_wgpu(),
            lod_min_clamp: self.lod_min_clamp,
            lod_max_clamp,
            compare: None,
            anisotropy_clamp,
            border_color: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sampler(
        min_filter: FilterMode,
        mipmap_filter: Option<MipmapFilterMode>,
        anisotropy_clamp: u16,
    ) -> SamplerDescriptor<'static> {
        SamplerDescriptor {
            label: None,
            address_mode_u: AddressMode::Repeat,
            address_mode_v: AddressMode::MirrorRepeat,
            mag_filter: FilterMode::Linear,
            min_filter,
            mipmap_filter,
            lod_min_clamp: 0.0,
            lod_max_clamp: 32.0,
            anisotropy_clamp,
        }
    }

    #[test]
    fn test_extent_conversion() {
        let extent: wgpu::Extent3d = Extent2D::new(16, 8).into_wgpu();
        assert_eq!(extent.width, 16);
        assert_eq!(extent.height, 8);
        assert_eq!(extent.depth_or_array_layers, 1);
    }

    #[test]
    fn test_sampler_conversion_keeps_wrap_and_filters() {
        let descriptor = sampler(FilterMode::Nearest, Some(MipmapFilterMode::Linear), 1);
        let converted: wgpu::SamplerDescriptor = (&descriptor).into_wgpu();

        assert_eq!(converted.address_mode_u, wgpu::AddressMode::Repeat);
        assert_eq!(converted.address_mode_v, wgpu::AddressMode::MirrorRepeat);
        assert_eq!(converted.min_filter, wgpu::FilterMode::Nearest);
        assert_eq!(converted.mipmap_filter, wgpu::MipmapFilterMode::Linear);
        assert_eq!(converted.lod_max_clamp, 32.0);
    }

    #[test]
    fn test_anisotropy_requires_linear_filtering() {
        let trilinear = sampler(FilterMode::Linear, Some(MipmapFilterMode::Linear), 8);
        let converted: wgpu::SamplerDescriptor = (&trilinear).into_wgpu();
        assert_eq!(converted.anisotropy_clamp, 8);

        let point = sampler(FilterMode::Nearest, Some(MipmapFilterMode::Linear), 8);
        let converted: wgpu::SamplerDescriptor = (&point).into_wgpu();
        assert_eq!(converted.anisotropy_clamp, 1);
    }

    #[test]
    fn test_base_level_sampling_clamps_lod() {
        let descriptor = sampler(FilterMode::Linear, None, 1);
        let converted: wgpu::SamplerDescriptor = (&descriptor).into_wgpu();
        assert_eq!(converted.lod_max_clamp, 0.0);
    }

    #[test]
    fn test_texture_format_conversion() {
        assert_eq!(
            TextureFormat::Rgba8UnormSrgb.into_wgpu(),
            wgpu::TextureFormat::Rgba8UnormSrgb
        );
    }
}
