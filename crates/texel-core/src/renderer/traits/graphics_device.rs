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

use crate::math::dimension;
use crate::renderer::api::*;
use crate::renderer::error::ResourceError;
use std::fmt::Debug;

/// The GPU primitives and context queries the texture manager depends on.
///
/// Implementations own the actual GPU objects; callers only hold [`TextureId`]s.
pub trait GraphicsDevice: Send + Sync + Debug + 'static {
    /// Creates a new GPU texture.
    /// ## Arguments
    /// * `descriptor` - A reference to a `TextureDescriptor` containing the texture configuration.
    /// ## Returns
    /// A `Result` containing the ID of the created texture or an error if the creation fails.
    fn create_texture(&self, descriptor: &TextureDescriptor) -> Result<TextureId, ResourceError>;

    /// Destroys a GPU texture.
    /// ## Arguments
    /// * `id` - The ID of the texture to be destroyed.
    /// ## Returns
    /// A `Result` indicating success or failure of the operation.
    fn destroy_texture(&self, id: TextureId) -> Result<(), ResourceError>;

    /// Writes pixel data to the base level of a GPU texture.
    /// ## Arguments
    /// * `texture_id` - The ID of the texture to write to.
    /// * `data` - A slice of bytes containing the data to be written.
    /// * `bytes_per_row` - The number of bytes per row in the texture data.
    /// * `offset` - The offset in the texture where the data will be written.
    /// * `size` - The size of the region being written.
    /// ## Returns
    /// A `Result` indicating success or failure of the operation.
    fn write_texture(
        &self,
        texture_id: TextureId,
        data: &[u8],
        bytes_per_row: Option<u32>,
        offset: dimension::Origin3D,
        size: dimension::Extent3D,
    ) -> Result<(), ResourceError>;

    /// Fills every mip level below the base level from the base level's contents.
    fn generate_mipmaps(&self, texture_id: TextureId) -> Result<(), ResourceError>;

    /// Applies filtering and wrapping state to the texture.
    fn set_sampler_state(
        &self,
        texture_id: TextureId,
        descriptor: &SamplerDescriptor,
    ) -> Result<(), ResourceError>;

    /// Reports what this context can do with textures.
    fn texture_capabilities(&self) -> TextureCapabilities;

    /// Returns the context-wide placeholder texture, creating it on first call.
    ///
    /// The device keeps ownership: callers must never destroy it.
    fn default_texture(&self) -> Result<GpuTexture, ResourceError>;
}
