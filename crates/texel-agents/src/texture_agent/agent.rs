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

//! The texture manager: keyed requests in, GPU textures out.
//!
//! Loads are resolved in the background and reported through a channel. All
//! GPU work and every change visible to renderers happens inside
//! [`TextureAgent::tick`], so a renderer calling [`TextureAgent::get_texture`]
//! never sees a half-built texture.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use texel_core::asset::{PixelSource, TextureRequest, TextureRequestError};
use texel_core::fetch::ImageFetcher;
use texel_core::math::Origin3D;
use texel_core::renderer::{
    CpuTexture, GpuTexture, GraphicsDevice, ResourceError, SamplerDescriptor, TextureCapabilities,
    TextureId,
};
use texel_lanes::asset_lane::{PixelSourceLane, ResolveError};
use texel_lanes::texture_lane::{prepare_for_upload, PrepareError, PreparedTexture};
use thiserror::Error;
use tokio::runtime::Handle;

use super::entry::{TextureEntry, TextureState};
use super::pending::{LoadCompletion, LoadParams, PendingLoad};
use super::settings::{TextureAgentSettings, TextureAgentStats};

/// Errors reported synchronously by [`TextureAgent::submit`].
#[derive(Debug, Error)]
pub enum TextureAgentError {
    /// The request is malformed.
    #[error(transparent)]
    Request(#[from] TextureRequestError),
    /// The graphics context could not provide its default texture.
    #[error("Failed to obtain the default texture: {0}")]
    DefaultTexture(#[from] ResourceError),
}

#[derive(Debug, Error)]
enum UploadError {
    #[error(transparent)]
    Prepare(#[from] PrepareError),
    #[error(transparent)]
    Resource(#[from] ResourceError),
}

/// Manages keyed GPU textures loaded from pixel sources.
///
/// Every mutating operation takes `&mut self`; background resolution never
/// touches the manager's state directly. Call [`tick`](Self::tick) once per
/// frame before reading textures.
pub struct TextureAgent {
    device: Arc<dyn GraphicsDevice>,
    settings: TextureAgentSettings,
    capabilities: TextureCapabilities,
    resolver: PixelSourceLane,
    runtime: Option<Handle>,
    entries: HashMap<String, TextureEntry>,
    pending: HashMap<String, PendingLoad>,
    default_texture: Option<GpuTexture>,
    completion_sender: Sender<LoadCompletion>,
    completion_receiver: Receiver<LoadCompletion>,
    next_generation: u64,
    stats: TextureAgentStats,
    destroyed: bool,
}

impl std::fmt::Debug for TextureAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureAgent")
            .field("textures", &self.entries.len())
            .field("pending", &self.pending.len())
            .field("capabilities", &self.capabilities)
            .field("stats", &self.stats)
            .field("destroyed", &self.destroyed)
            .finish()
    }
}

impl TextureAgent {
    /// Creates a manager with default settings that can only load pixel buffers.
    ///
    /// Attach a transport with [`with_fetcher`](Self::with_fetcher) to load locators.
    pub fn new(device: Arc<dyn GraphicsDevice>) -> Self {
        Self::with_settings(device, TextureAgentSettings::default())
    }

    /// Creates a manager with explicit settings.
    pub fn with_settings(device: Arc<dyn GraphicsDevice>, settings: TextureAgentSettings) -> Self {
        let mut capabilities = device.texture_capabilities();
        if settings.force_power_of_two {
            capabilities.npot_mipmaps = false;
        }
        log::info!(
            "TextureAgent: Created (npot_mipmaps: {}, max_texture_dimension_2d: {})",
            capabilities.npot_mipmaps,
            capabilities.max_texture_dimension_2d
        );

        let (completion_sender, completion_receiver) = crossbeam_channel::unbounded();
        Self {
            device,
            settings,
            capabilities,
            resolver: PixelSourceLane::buffers_only(),
            runtime: None,
            entries: HashMap::new(),
            pending: HashMap::new(),
            default_texture: None,
            completion_sender,
            completion_receiver,
            next_generation: 0,
            stats: TextureAgentStats::default(),
            destroyed: false,
        }
    }

    /// Resolves locators through `fetcher`, running each fetch on `runtime`.
    pub fn with_fetcher(mut self, fetcher: Arc<dyn ImageFetcher>, runtime: Handle) -> Self {
        self.resolver = PixelSourceLane::new(fetcher);
        self.runtime = Some(runtime);
        self
    }

    /// Starts loading `request` under `key`, superseding any load in flight for it.
    ///
    /// The currently installed texture for `key` (if any) keeps being served
    /// until the new load completes in a later [`tick`](Self::tick). A key
    /// with nothing installed yet is served the default texture.
    ///
    /// # Errors
    ///
    /// Returns [`TextureAgentError::Request`] for a malformed request, in which
    /// case nothing is recorded. Returns [`TextureAgentError::DefaultTexture`] if
    /// the graphics context cannot provide its default texture.
    ///
    /// # Panics
    ///
    /// Panics if the manager has been destroyed.
    pub fn submit(
        &mut self,
        key: impl Into<String>,
        request: TextureRequest,
    ) -> Result<(), TextureAgentError> {
        self.assert_alive("submit");
        let key = key.into();
        request.validate()?;
        self.ensure_default_texture()?;

        self.next_generation += 1;
        let generation = self.next_generation;
        self.stats.submitted += 1;

        if let Some(previous) = self.pending.remove(&key) {
            log::debug!(
                "TextureAgent: Load {} for '{key}' superseded by {generation}",
                previous.generation
            );
            previous.abandon();
        }

        let params = LoadParams::of(&request);
        let task = self.start_resolution(&key, generation, request.source);
        self.pending.insert(
            key,
            PendingLoad {
                generation,
                task,
                params,
            },
        );
        Ok(())
    }

    /// Applies every load that completed since the previous tick, in completion order.
    ///
    /// # Panics
    ///
    /// Panics if the manager has been destroyed.
    pub fn tick(&mut self) {
        self.assert_alive("tick");
        while let Ok(completion) = self.completion_receiver.try_recv() {
            self.apply(completion);
        }
    }

    /// Returns the texture a renderer should sample for `key`.
    ///
    /// This is the installed texture, the default texture while the first
    /// load is pending or after a failure, or `None` if `key` was never submitted.
    ///
    /// # Panics
    ///
    /// Panics if the manager has been destroyed.
    pub fn get_texture(&self, key: &str) -> Option<GpuTexture> {
        self.assert_alive("get_texture");
        match self.entries.get(key) {
            Some(TextureEntry::Owned(texture)) => Some(*texture),
            Some(TextureEntry::Fallback) => self.default_texture,
            None if self.pending.contains_key(key) => self.default_texture,
            None => None,
        }
    }

    /// Returns the state of `key`, or `None` if it was never submitted.
    ///
    /// # Panics
    ///
    /// Panics if the manager has been destroyed.
    pub fn state(&self, key: &str) -> Option<TextureState> {
        self.assert_alive("state");
        if self.pending.contains_key(key) {
            return Some(TextureState::Pending);
        }
        self.entries.get(key).map(|entry| match entry {
            TextureEntry::Owned(_) => TextureState::Ready,
            TextureEntry::Fallback => TextureState::Fallback,
        })
    }

    /// Number of keys with an installed entry, fallbacks included.
    pub fn texture_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of loads in flight.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Running totals since creation.
    pub fn stats(&self) -> TextureAgentStats {
        self.stats
    }

    /// The capabilities the dimension policy is applied against.
    pub fn capabilities(&self) -> TextureCapabilities {
        self.capabilities
    }

    /// Releases every texture the manager created and abandons every load in flight.
    ///
    /// The default texture belongs to the graphics context and is left alone.
    ///
    /// # Panics
    ///
    /// Panics if the manager has already been destroyed.
    pub fn destroy(&mut self) {
        self.assert_alive("destroy");
        self.release_all();
        self.destroyed = true;
    }

    /// Returns `true` once [`destroy`](Self::destroy) has been called.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn assert_alive(&self, operation: &str) {
        assert!(
            !self.destroyed,
            "TextureAgent::{operation} called after destroy()"
        );
    }

    fn ensure_default_texture(&mut self) -> Result<GpuTexture, ResourceError> {
        if let Some(texture) = self.default_texture {
            return Ok(texture);
        }
        let texture = self.device.default_texture()?;
        log::debug!("TextureAgent: Cached default texture {:?}", texture.id);
        self.default_texture = Some(texture);
        Ok(texture)
    }

    fn start_resolution(
        &self,
        key: &str,
        generation: u64,
        source: PixelSource,
    ) -> Option<tokio::task::JoinHandle<()>> {
        let sender = self.completion_sender.clone();
        let key = key.to_owned();

        match (source, &self.runtime) {
            (
                PixelSource::Buffer {
                    pixels,
                    width,
                    height,
                },
                _,
            ) => {
                let texture = PixelSourceLane::pass_through(pixels, width, height);
                // The receiver is owned by `self`, so this cannot fail.
                let _ = sender.send(LoadCompletion {
                    key,
                    generation,
                    result: Ok(texture),
                });
                None
            }
            (PixelSource::Locator(locator), Some(runtime)) => {
                let resolver = self.resolver.clone();
                Some(runtime.spawn(async move {
                    let result = resolver.resolve(PixelSource::Locator(locator)).await;
                    let _ = sender.send(LoadCompletion {
                        key,
                        generation,
                        result,
                    });
                }))
            }
            (PixelSource::Locator(locator), None) => {
                let _ = sender.send(LoadCompletion {
                    key,
                    generation,
                    result: Err(ResolveError::NoFetcher { locator }),
                });
                None
            }
        }
    }

    fn apply(&mut self, completion: LoadCompletion) {
        let LoadCompletion {
            key,
            generation,
            result,
        } = completion;

        let current = self.pending.get(&key).map(|load| load.generation);
        if current != Some(generation) {
            log::debug!("TextureAgent: Discarding stale load {generation} for '{key}'");
            self.stats.stale_discarded += 1;
            return;
        }
        let Some(load) = self.pending.remove(&key) else {
            return;
        };

        let entry = match result {
            Ok(texture) => match self.upload(&key, &load.params, texture) {
                Ok(gpu_texture) => TextureEntry::Owned(gpu_texture),
                Err(e) => {
                    log::error!("TextureAgent: Failed to upload '{key}': {e}");
                    self.stats.failed += 1;
                    TextureEntry::Fallback
                }
            },
            Err(e) => {
                log::warn!("TextureAgent: Failed to resolve '{key}', using default texture: {e}");
                self.stats.failed += 1;
                TextureEntry::Fallback
            }
        };

        self.install(key, entry);
    }

    /// Installs `entry` for `key`, then releases the texture it replaced.
    fn install(&mut self, key: String, entry: TextureEntry) {
        if let Some(previous) = self.entries.insert(key, entry).and_then(|e| e.owned()) {
            self.release(previous.id);
        }
    }

    fn upload(
        &mut self,
        key: &str,
        params: &LoadParams,
        texture: CpuTexture,
    ) -> Result<GpuTexture, UploadError> {
        let prepared = prepare_for_upload(texture, params.min_filter, &self.capabilities)?;

        let label = format!(
            "{}{}",
            self.settings.label_prefix,
            params.label.as_deref().unwrap_or(key)
        );
        let descriptor = prepared
            .texture
            .to_descriptor(Some(Cow::Owned(label)), prepared.mip_level_count);
        let id = self.device.create_texture(&descriptor)?;

        if let Err(e) = self.fill(id, params, &prepared) {
            self.release(id);
            return Err(e.into());
        }

        let size = prepared.texture.size;
        log::debug!(
            "TextureAgent: Uploaded '{key}' as {id:?} ({}x{}, {} mip levels)",
            size.width,
            size.height,
            prepared.mip_level_count
        );
        self.stats.uploaded += 1;
        if prepared.resized_from.is_some() {
            self.stats.resized += 1;
        }
        if prepared.needs_mipmaps() {
            self.stats.mipmapped += 1;
        }

        Ok(GpuTexture {
            id,
            size,
            mip_level_count: prepared.mip_level_count,
            mipmapped: prepared.needs_mipmaps(),
        })
    }

    /// Writes pixels, builds the mip chain and applies sampler state.
    fn fill(
        &self,
        id: TextureId,
        params: &LoadParams,
        prepared: &PreparedTexture,
    ) -> Result<(), ResourceError> {
        let texture = &prepared.texture;
        self.device.write_texture(
            id,
            &texture.pixels,
            Some(texture.row_size() as u32),
            Origin3D::ZERO,
            texture.size.to_3d(),
        )?;

        if prepared.needs_mipmaps() {
            self.device.generate_mipmaps(id)?;
        }

        let (min_filter, mipmap_filter) = params.min_filter.split();
        self.device.set_sampler_state(
            id,
            &SamplerDescriptor {
                label: None,
                address_mode_u: params.wrap_s,
                address_mode_v: params.wrap_t,
                mag_filter: params.mag_filter,
                min_filter,
                mipmap_filter,
                lod_min_clamp: self.settings.lod_min_clamp,
                lod_max_clamp: self.settings.lod_max_clamp,
                anisotropy_clamp: self.settings.anisotropy_clamp,
            },
        )
    }

    fn release(&mut self, id: TextureId) {
        match self.device.destroy_texture(id) {
            Ok(()) => self.stats.released += 1,
            Err(e) => log::error!("TextureAgent: Failed to destroy texture {id:?}: {e}"),
        }
    }

    fn release_all(&mut self) {
        for (_, load) in self.pending.drain() {
            load.abandon();
        }
        while self.completion_receiver.try_recv().is_ok() {}

        let owned: Vec<TextureId> = self
            .entries
            .drain()
            .filter_map(|(_, entry)| entry.owned().map(|texture| texture.id))
            .collect();
        let count = owned.len();
        for id in owned {
            self.release(id);
        }
        log::info!("TextureAgent: Released {count} textures");
    }
}

impl Drop for TextureAgent {
    fn drop(&mut self) {
        if !self.destroyed {
            self.release_all();
            self.destroyed = true;
        }
    }
}
