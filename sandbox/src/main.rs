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

//! Loads a handful of textures on a headless wgpu device and reports what a
//! renderer would sample for each of them.
//!
//! Usage: `sandbox [settings.ron] [asset_dir]`
//!
//! If `asset_dir` contains a `textures.ron` map of key to request descriptor,
//! those requests are submitted alongside the built-in ones.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use texel_agents::{TextureAgent, TextureAgentSettings, TextureState};
use texel_core::asset::{TextureRequest, TextureRequestDescriptor};
use texel_core::renderer::{AddressMode, FilterMode, MinificationFilter};
use texel_infra::{FileImageFetcher, WgpuDevice, WgpuGraphicsContext};

const MAX_FRAMES: usize = 300;
const FRAME_TIME: Duration = Duration::from_millis(16);

fn load_settings(path: Option<&Path>) -> Result<TextureAgentSettings> {
    let Some(path) = path else {
        return Ok(TextureAgentSettings::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    ron::from_str(&text).with_context(|| format!("Failed to parse settings {}", path.display()))
}

fn load_requests(asset_dir: &Path) -> Result<BTreeMap<String, TextureRequest>> {
    let path = asset_dir.join("textures.ron");
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let descriptors: BTreeMap<String, TextureRequestDescriptor> =
        ron::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))?;

    descriptors
        .into_iter()
        .map(|(key, descriptor)| {
            let request = TextureRequest::try_from(descriptor)
                .with_context(|| format!("Invalid request '{key}'"))?;
            Ok((key, request))
        })
        .collect()
}

/// A `size`x`size` checkerboard with 2-pixel cells.
fn checkerboard(size: u32) -> Vec<u8> {
    (0..size * size)
        .flat_map(|i| {
            let (x, y) = (i % size, i / size);
            if (x / 2 + y / 2) % 2 == 0 {
                [230, 230, 230, 255]
            } else {
                [40, 40, 40, 255]
            }
        })
        .collect()
}

fn gradient(width: u32, height: u32) -> Vec<u8> {
    (0..width * height)
        .flat_map(|i| {
            let (x, y) = (i % width, i / width);
            [(x * 255 / width) as u8, (y * 255 / height) as u8, 128, 255]
        })
        .collect()
}

fn built_in_requests() -> Vec<(String, TextureRequest)> {
    vec![
        (
            "checker".to_owned(),
            TextureRequest::from_pixels(checkerboard(10), 10, 10)
                .with_min_filter(MinificationFilter::LinearMipmapLinear)
                .with_wrap(AddressMode::Repeat, AddressMode::Repeat),
        ),
        (
            "gradient".to_owned(),
            TextureRequest::from_pixels(gradient(64, 30), 64, 30)
                .with_min_filter(MinificationFilter::Linear)
                .with_mag_filter(FilterMode::Nearest),
        ),
        (
            "missing".to_owned(),
            TextureRequest::from_locator("does/not/exist.png"),
        ),
    ]
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info"))
        .filter_module("wgpu_hal", log::LevelFilter::Error)
        .init();

    let mut args = std::env::args().skip(1);
    let settings = load_settings(args.next().as_deref().map(Path::new))?;
    let asset_dir = args.next().map_or_else(|| PathBuf::from("assets"), PathBuf::from);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;

    let context = WgpuGraphicsContext::new_headless_blocking()?;
    let device = WgpuDevice::new(Arc::new(context));
    let fetcher = Arc::new(FileImageFetcher::new(&asset_dir));
    let mut agent = TextureAgent::with_settings(Arc::new(device.clone()), settings)
        .with_fetcher(fetcher, runtime.handle().clone());

    let mut requests = built_in_requests();
    requests.extend(load_requests(&asset_dir)?);
    let keys: Vec<String> = requests.iter().map(|(key, _)| key.clone()).collect();
    for (key, request) in requests {
        agent.submit(key, request)?;
    }

    for frame in 0..MAX_FRAMES {
        agent.tick();
        if agent.pending_count() == 0 {
            log::info!("All textures settled after {} frames", frame + 1);
            break;
        }
        std::thread::sleep(FRAME_TIME);
    }

    for key in &keys {
        match (agent.state(key), agent.get_texture(key)) {
            (Some(TextureState::Ready), Some(texture)) => log::info!(
                "'{key}': ready as {:?}, {}x{} with {} mip levels",
                texture.id,
                texture.size.width,
                texture.size.height,
                texture.mip_level_count
            ),
            (state, texture) => log::warn!("'{key}': {state:?}, sampling {texture:?}"),
        }
    }
    log::info!("{:?}", agent.stats());

    agent.destroy();
    log::info!(
        "Textures left on the device after destroy: {}",
        device.texture_count()
    );
    Ok(())
}
