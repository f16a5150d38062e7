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

//! Provides the foundational traits and request types for texture assets.
//!
//! The key components are:
//! - The [`Asset`] trait: A marker for all types that can be treated as assets.
//! - [`TextureRequest`]: what a caller asks the texture manager to load, and where
//!   its pixels come from ([`PixelSource`]).
//! - [`TextureRequestDescriptor`]: the loose, serializable shape of a request,
//!   validated into a [`TextureRequest`].

mod request;

pub use request::*;

/// A marker trait for types that can be managed by the asset system.
///
/// The supertraits enforce critical safety guarantees:
/// - `Send` + `Sync`: The asset type can be safely shared and sent between threads.
///   This is essential for background loading.
/// - `'static`: The asset type does not contain any non-static references.
///
/// # Examples
///
/// ```
/// use texel_core::asset::Asset;
///
/// struct Heightmap {
///     samples: Vec<f32>,
/// }
///
/// impl Asset for Heightmap {}
/// ```
pub trait Asset: Send + Sync + 'static {}
