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

use anyhow::{anyhow, Result};
use texel_core::renderer::TextureCapabilities;

/// Holds the core wgpu state objects used for texture management.
///
/// The context is headless: textures are created and sampled by whoever owns
/// the device, no surface is configured here.
#[derive(Debug)]
pub struct WgpuGraphicsContext {
    /// The adapter the device was requested from.
    pub adapter: wgpu::Adapter,
    /// The logical device.
    pub device: wgpu::Device,
    /// The command queue used for uploads.
    pub queue: wgpu::Queue,

    /// Human-readable adapter name.
    pub adapter_name: String,
    /// The backend API behind the adapter.
    pub adapter_backend: wgpu::Backend,
    /// Limits of the logical device.
    pub device_limits: wgpu::Limits,
    /// Downlevel capabilities of the adapter.
    pub downlevel_flags: wgpu::DownlevelFlags,
}

impl WgpuGraphicsContext {
    /// Asynchronously creates a headless context on the best available adapter.
    ///
    /// ## Returns
    /// * `Result<Self>` - The initialized context, or an error if no adapter or
    ///   device could be obtained.
    pub async fn new_headless() -> Result<Self> {
        log::info!("Initializing headless WGPU Graphics Context...");

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::new_without_display_handle());
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| anyhow!("Failed to find a suitable adapter: {e}"))?;

        let adapter_info = adapter.get_info();
        log::info!(
            "Using graphics adapter: \"{}\" (Backend: {:?})",
            adapter_info.name,
            adapter_info.backend
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Texel Logical Device"),
                required_features: wgpu::Features::empty(),
                required_limits: adapter.limits(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::default(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
            })
            .await
            .map_err(|e| anyhow!("Failed to create logical device: {e}"))?;
        log::info!("Logical device and command queue created.");

        device.on_uncaptured_error(std::sync::Arc::new(|e| {
            log::error!("WGPU Uncaptured Error: {e:?}");
        }));

        let device_limits = device.limits();
        let downlevel_flags = adapter.get_downlevel_capabilities().flags;
        log::debug!("Device limits: {device_limits:?}");
        log::debug!("Downlevel flags: {downlevel_flags:?}");

        Ok(Self {
            adapter,
            device,
            queue,
            adapter_name: adapter_info.name,
            adapter_backend: adapter_info.backend,
            device_limits,
            downlevel_flags,
        })
    }

    /// Blocking variant of [`new_headless`](Self::new_headless).
    pub fn new_headless_blocking() -> Result<Self> {
        pollster::block_on(Self::new_headless())
    }

    /// Reports the texture capabilities of this context.
    pub fn texture_capabilities(&self) -> TextureCapabilities {
        TextureCapabilities {
            npot_mipmaps: self
                .downlevel_flags
                .contains(wgpu::DownlevelFlags::NON_POWER_OF_TWO_MIPMAPPED_TEXTURES),
            max_texture_dimension_2d: self.device_limits.max_texture_dimension_2d,
        }
    }

    /// Returns the logical device.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns the command queue.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }
}
