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

//! Lanes that shape decoded pixels into something the GPU can sample.
//!
//! - [`mipmap_policy`] decides whether a mip chain is needed.
//! - [`dimension_policy`] decides the upload size and resamples when the
//!   context requires power-of-two mipmapped textures.
//! - [`prepare_for_upload`] runs both in order for one decoded texture.

pub mod dimension_policy;
pub mod mipmap_policy;
mod preparation;

pub use dimension_policy::{resample, target_size, ResampleError};
pub use mipmap_policy::{mip_level_count, requires_mipmaps};
pub use preparation::{prepare_for_upload, PrepareError, PreparedTexture};
