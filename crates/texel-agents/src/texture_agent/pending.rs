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

//! In-flight load bookkeeping.

use texel_core::asset::TextureRequest;
use texel_core::renderer::{AddressMode, CpuTexture, FilterMode, MinificationFilter};
use texel_lanes::asset_lane::ResolveError;
use tokio::task::JoinHandle;

/// The sampling parameters of a request, kept until its pixels arrive.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LoadParams {
    pub min_filter: MinificationFilter,
    pub mag_filter: FilterMode,
    pub wrap_s: AddressMode,
    pub wrap_t: AddressMode,
    pub label: Option<String>,
}

impl LoadParams {
    pub fn of(request: &TextureRequest) -> Self {
        Self {
            min_filter: request.min_filter,
            mag_filter: request.mag_filter,
            wrap_s: request.wrap_s,
            wrap_t: request.wrap_t,
            label: request.label.clone(),
        }
    }
}

/// The most recent load started for a key.
#[derive(Debug)]
pub(crate) struct PendingLoad {
    /// Identity of this load. Completions carrying another generation are stale.
    pub generation: u64,
    /// The background resolution, `None` when it completed inline.
    pub task: Option<JoinHandle<()>>,
    pub params: LoadParams,
}

impl PendingLoad {
    /// Stops the background resolution if it is still running.
    pub fn abandon(self) {
        if let Some(task) = self.task {
            task.abort();
        }
    }
}

/// A finished resolution, sent back to the manager for the next tick.
#[derive(Debug)]
pub(crate) struct LoadCompletion {
    pub key: String,
    pub generation: u64,
    pub result: Result<CpuTexture, ResolveError>,
}
