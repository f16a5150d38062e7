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

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use texel_core::math::{dimension, Extent2D, Origin3D};
use texel_core::renderer::{
    GpuTexture, GraphicsDevice, ResourceError, SamplerDescriptor, TextureCapabilities,
    TextureDescriptor, TextureFormat, TextureId,
};

use super::context::WgpuGraphicsContext;
use super::conversions::IntoWgpu;
use super::mipmap;

const DEFAULT_TEXTURE_PIXEL: [u8; 4] = [255, 255, 255, 255];

#[derive(Debug)]
struct WgpuTextureEntry {
    wgpu_texture: wgpu::Texture,
    size: Extent2D,
    mip_level_count: u32,
    format: TextureFormat,
    /// A copy of the last full base-level upload, the source of the mip chain.
    base_level: Option<Vec<u8>>,
    #[allow(dead_code)]
    sampler: Option<wgpu::Sampler>,
}

/// The internal, non-clonable state of the WgpuDevice.
#[derive(Debug)]
struct WgpuDeviceInternal {
    context: Arc<WgpuGraphicsContext>,
    textures: Mutex<HashMap<TextureId, WgpuTextureEntry>>,
    next_texture_id: AtomicUsize,
    default_texture: Mutex<Option<GpuTexture>>,
}

/// A clonable, thread-safe handle to the WGPU graphics device.
/// It wraps the actual device state (`WgpuDeviceInternal`) in an Arc,
/// allowing it to be shared with the texture manager and with renderers.
#[derive(Clone, Debug)]
pub struct WgpuDevice {
    internal: Arc<WgpuDeviceInternal>,
}

impl WgpuDevice {
    /// Wraps an initialized context.
    pub fn new(context: Arc<WgpuGraphicsContext>) -> Self {
        Self {
            internal: Arc::new(WgpuDeviceInternal {
                context,
                textures: Mutex::new(HashMap::new()),
                next_texture_id: AtomicUsize::new(0),
                default_texture: Mutex::new(None),
            }),
        }
    }

    /// The context this device creates resources on.
    pub fn context(&self) -> &WgpuGraphicsContext {
        &self.internal.context
    }

    /// Number of live textures, the default texture included.
    pub fn texture_count(&self) -> usize {
        self.internal.textures.lock().unwrap().len()
    }

    fn generate_texture_id(&self) -> TextureId {
        TextureId(
            self.internal
                .next_texture_id
                .fetch_add(1, Ordering::Relaxed),
        )
    }

    fn is_default_texture(&self, id: TextureId) -> bool {
        self.internal
            .default_texture
            .lock()
            .unwrap()
            .is_some_and(|texture| texture.id == id)
    }

    fn write_level(
        &self,
        texture: &wgpu::Texture,
        mip_level: u32,
        data: &[u8],
        bytes_per_row: Option<u32>,
        origin: Origin3D,
        size: dimension::Extent3D,
    ) {
        self.internal.context.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level,
                origin: origin.into_wgpu(),
                aspect: wgpu::TextureAspect::All,
            },
            data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row,
                rows_per_image: None,
            },
            size.into_wgpu(),
        );
    }
}

impl GraphicsDevice for WgpuDevice {
    fn create_texture(&self, descriptor: &TextureDescriptor) -> Result<TextureId, ResourceError> {
        let max_dimension = self.internal.context.device_limits.max_texture_dimension_2d;
        if descriptor.size.is_empty() || descriptor.size.max_dimension() > max_dimension {
            return Err(ResourceError::UnsupportedSize {
                size: descriptor.size,
                max_dimension,
            });
        }

        let wgpu_texture = self
            .internal
            .context
            .device
            .create_texture(&wgpu::TextureDescriptor {
                label: descriptor.label.as_deref(),
                size: descriptor.size.into_wgpu(),
                mip_level_count: descriptor.mip_level_count,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: descriptor.format.into_wgpu(),
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            });
        let id = self.generate_texture_id();

        self.internal.textures.lock().unwrap().insert(
            id,
            WgpuTextureEntry {
                wgpu_texture,
                size: descriptor.size,
                mip_level_count: descriptor.mip_level_count,
                format: descriptor.format,
                base_level: None,
                sampler: None,
            },
        );

        log::info!(
            "WgpuDevice: Created texture '{}' ({}x{}, {} mip levels) with ID: {:?}",
            descriptor.label.as_deref().unwrap_or_default(),
            descriptor.size.width,
            descriptor.size.height,
            descriptor.mip_level_count,
            id
        );
        Ok(id)
    }

    fn destroy_texture(&self, id: TextureId) -> Result<(), ResourceError> {
        if self.is_default_texture(id) {
            return Err(ResourceError::BackendError(
                "The default texture is owned by the device".to_owned(),
            ));
        }

        let mut textures = self.internal.textures.lock().unwrap();
        if let Some(entry) = textures.remove(&id) {
            entry.wgpu_texture.destroy();
            log::debug!("WgpuDevice: Destroyed texture with ID: {id:?}");
            Ok(())
        } else {
            Err(ResourceError::NotFound(id))
        }
    }

    fn write_texture(
        &self,
        texture_id: TextureId,
        data: &[u8],
        bytes_per_row: Option<u32>,
        offset: dimension::Origin3D,
        size: dimension::Extent3D,
    ) -> Result<(), ResourceError> {
        let mut textures = self.internal.textures.lock().unwrap();
        let entry = textures
            .get_mut(&texture_id)
            .ok_or(ResourceError::NotFound(texture_id))?;

        let row = bytes_per_row.unwrap_or(size.width * entry.format.bytes_per_pixel());
        let expected = row as usize * size.height as usize * size.depth_or_array_layers as usize;
        if data.len() < expected {
            return Err(ResourceError::InvalidData {
                expected,
                actual: data.len(),
            });
        }

        self.write_level(&entry.wgpu_texture, 0, data, Some(row), offset, size);

        let covers_base = offset == Origin3D::ZERO
            && size.width == entry.size.width
            && size.height == entry.size.height
            && row == entry.size.width * entry.format.bytes_per_pixel();
        entry.base_level = covers_base.then(|| data[..expected].to_vec());

        log::debug!(
            "WgpuDevice: Wrote {} bytes to texture ID: {:?} at offset {:?}",
            data.len(),
            texture_id,
            offset
        );
        Ok(())
    }

    fn generate_mipmaps(&self, texture_id: TextureId) -> Result<(), ResourceError> {
        let textures = self.internal.textures.lock().unwrap();
        let entry = textures
            .get(&texture_id)
            .ok_or(ResourceError::NotFound(texture_id))?;
        if entry.mip_level_count <= 1 {
            return Ok(());
        }
        if entry.format.bytes_per_pixel() != 4 {
            return Err(ResourceError::BackendError(format!(
                "Mipmap generation is not supported for {:?}",
                entry.format
            )));
        }
        let base = entry
            .base_level
            .as_deref()
            .ok_or(ResourceError::MissingData(texture_id))?;

        for level in mipmap::build_chain(base, entry.size, entry.mip_level_count)? {
            self.write_level(
                &entry.wgpu_texture,
                level.level,
                &level.pixels,
                Some(level.size.width * 4),
                Origin3D::ZERO,
                level.size.to_3d(),
            );
        }

        log::debug!(
            "WgpuDevice: Generated {} mip levels for texture ID: {:?}",
            entry.mip_level_count - 1,
            texture_id
        );
        Ok(())
    }

    fn set_sampler_state(
        &self,
        texture_id: TextureId,
        descriptor: &SamplerDescriptor,
    ) -> Result<(), ResourceError> {
        let mut textures = self.internal.textures.lock().unwrap();
        let entry = textures
            .get_mut(&texture_id)
            .ok_or(ResourceError::NotFound(texture_id))?;

        let wgpu_descriptor: wgpu::SamplerDescriptor = descriptor.into_wgpu();
        entry.sampler = Some(self.internal.context.device.create_sampler(&wgpu_descriptor));
        log::debug!("WgpuDevice: Applied sampler state to texture ID: {texture_id:?}");
        Ok(())
    }

    fn texture_capabilities(&self) -> TextureCapabilities {
        self.internal.context.texture_capabilities()
    }

    fn default_texture(&self) -> Result<GpuTexture, ResourceError> {
        let mut default_texture = self.internal.default_texture.lock().unwrap();
        if let Some(texture) = *default_texture {
            return Ok(texture);
        }

        let size = Extent2D::new(1, 1);
        let id = self.create_texture(&TextureDescriptor {
            label: Some("Default Texture".into()),
            size,
            mip_level_count: 1,
            format: TextureFormat::Rgba8UnormSrgb,
        })?;
        self.write_texture(
            id,
            &DEFAULT_TEXTURE_PIXEL,
            Some(4),
            Origin3D::ZERO,
            size.to_3d(),
        )?;
        self.set_sampler_state(
            id,
            &SamplerDescriptor {
                label: Some("Default Sampler".into()),
                address_mode_u: Default::default(),
                address_mode_v: Default::default(),
                mag_filter: Default::default(),
                min_filter: Default::default(),
                mipmap_filter: None,
                lod_min_clamp: 0.0,
                lod_max_clamp: 0.0,
                anisotropy_clamp: 1,
            },
        )?;

        let texture = GpuTexture {
            id,
            size,
            mip_level_count: 1,
            mipmapped: false,
        };
        *default_texture = Some(texture);
        Ok(texture)
    }
}
