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

//! # Texel Lanes
//!
//! Hot-path execution pipelines for the CPU side of texture loading.
//!
//! - [`asset_lane`]: turns a pixel source into a decoded [`CpuTexture`](texel_core::renderer::CpuTexture).
//! - [`texture_lane`]: decides upload dimensions and mip chains, and resamples pixels.
//!
//! Nothing in this crate touches a GPU.

#![warn(missing_docs)]

pub mod asset_lane;
pub mod texture_lane;
