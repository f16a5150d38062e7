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

//! # Texel Core
//!
//! Foundational crate containing traits, core types, and interface contracts
//! that define the texture manager's architecture.
//!
//! Nothing in here performs I/O or talks to a GPU. The concrete collaborators
//! (image transport, graphics device) live in `texel-infra` and are only seen
//! through the traits declared here.

#![warn(missing_docs)]

pub mod asset;
pub mod fetch;
pub mod math;
pub mod renderer;

pub use asset::{PixelSource, TextureRequest, TextureRequestDescriptor, TextureRequestError};
pub use fetch::{FetchError, ImageFetcher};
