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

//! Configuration and counters for the texture manager.

use serde::{Deserialize, Serialize};

/// Tunables applied to every texture the manager creates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureAgentSettings {
    /// Prepended to every GPU texture label.
    pub label_prefix: String,
    /// Maximum anisotropy for samplers. Values above 1 only apply to fully linear filters.
    pub anisotropy_clamp: u16,
    /// Minimum level of detail for samplers.
    pub lod_min_clamp: f32,
    /// Maximum level of detail for samplers.
    pub lod_max_clamp: f32,
    /// Treat the context as unable to mipmap non-power-of-two textures.
    pub force_power_of_two: bool,
}

impl Default for TextureAgentSettings {
    fn default() -> Self {
        Self {
            label_prefix: "texel:".to_owned(),
            anisotropy_clamp: 1,
            lod_min_clamp: 0.0,
            lod_max_clamp: 32.0,
            force_power_of_two: false,
        }
    }
}

/// Running totals since the manager was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextureAgentStats {
    /// Requests accepted by `submit`.
    pub submitted: u64,
    /// Textures created and installed.
    pub uploaded: u64,
    /// Uploads that were resampled to power-of-two dimensions.
    pub resized: u64,
    /// Uploads that carry a generated mip chain.
    pub mipmapped: u64,
    /// Loads that ended in the fallback texture.
    pub failed: u64,
    /// Completions discarded because a newer request superseded them.
    pub stale_discarded: u64,
    /// GPU textures destroyed by the manager.
    pub released: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_from_partial_ron() {
        let settings: TextureAgentSettings =
            ron::from_str("(force_power_of_two: true, anisotropy_clamp: 8)").unwrap();

        assert!(settings.force_power_of_two);
        assert_eq!(settings.anisotropy_clamp, 8);
        assert_eq!(settings.label_prefix, "texel:");
        assert_eq!(settings.lod_max_clamp, 32.0);
    }

    #[test]
    fn settings_round_trip_through_ron() {
        let settings = TextureAgentSettings {
            label_prefix: "ui/".to_owned(),
            ..Default::default()
        };
        let text = ron::to_string(&settings).unwrap();
        assert_eq!(ron::from_str::<TextureAgentSettings>(&text).unwrap(), settings);
    }
}
