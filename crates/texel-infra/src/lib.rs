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

//! # Texel Infra
//!
//! Concrete implementations of the contracts declared in `texel-core`.
//!
//! - [`graphics::wgpu`]: a headless wgpu context and a [`WgpuDevice`] implementing
//!   [`GraphicsDevice`](texel_core::renderer::GraphicsDevice).
//! - [`io`]: a [`FileImageFetcher`] reading encoded images from a directory.

#![warn(missing_docs)]

pub mod graphics;
pub mod io;

pub use graphics::wgpu::{WgpuDevice, WgpuGraphicsContext};
pub use io::FileImageFetcher;
