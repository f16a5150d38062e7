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

use texel_core::renderer::GpuTexture;

/// What is installed for a key once its first load has completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureEntry {
    /// A texture created and owned by the manager.
    Owned(GpuTexture),
    /// The load failed; the key resolves to the default texture.
    Fallback,
}

impl TextureEntry {
    /// Returns the owned texture, if any.
    pub fn owned(&self) -> Option<GpuTexture> {
        match self {
            TextureEntry::Owned(texture) => Some(*texture),
            TextureEntry::Fallback => None,
        }
    }
}

/// The observable state of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureState {
    /// A load is in flight. Any previously installed texture is still served.
    Pending,
    /// The latest load was uploaded successfully.
    Ready,
    /// The latest load failed; the default texture is served.
    Fallback,
}
