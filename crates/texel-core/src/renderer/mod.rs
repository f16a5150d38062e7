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

//! Provides the public, backend-agnostic texture contracts.
//!
//! This module defines the "common language" for every GPU texture operation the
//! manager performs. It contains the abstract [`GraphicsDevice`] trait, the data
//! structures describing textures and samplers, and the error types that form the
//! stable boundary with a concrete backend.
//!
//! This module defines the 'what' of texture management, while the 'how' is handled
//! by a concrete backend implementation in the `texel-infra` crate (e.g., a WGPU
//! backend) which implements these traits.

pub mod api;
pub mod error;
pub mod traits;

// Re-export the most important traits and types for easier use.
pub use self::api::*;
pub use self::error::ResourceError;
pub use self::traits::GraphicsDevice;
