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

use crate::math::Extent2D;
use crate::renderer::{AddressMode, FilterMode, MinificationFilter};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bytes per pixel of caller-supplied pixel buffers (tightly packed RGBA8).
pub const BUFFER_BYTES_PER_PIXEL: usize = 4;

/// Where the pixels of a texture request come from.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelSource {
    /// An encoded image resolved through the configured `ImageFetcher`.
    Locator(String),
    /// Tightly packed RGBA8 pixels supplied by the caller.
    Buffer {
        /// The pixel bytes, `width * height * 4` long.
        pixels: Vec<u8>,
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
}

/// A request for the texture manager to load a texture.
///
/// Requests are immutable once submitted; a new submission under the same key
/// replaces the previous one entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureRequest {
    /// Where the pixels come from.
    pub source: PixelSource,
    /// Filter used when the texture is minified. Decides whether a mip chain is built.
    pub min_filter: MinificationFilter,
    /// Filter used when the texture is magnified.
    pub mag_filter: FilterMode,
    /// Wrap mode along the S (U) axis.
    pub wrap_s: AddressMode,
    /// Wrap mode along the T (V) axis.
    pub wrap_t: AddressMode,
    /// Optional debug label forwarded to the GPU texture.
    pub label: Option<String>,
}

impl TextureRequest {
    /// Creates a request whose pixels are fetched from `locator`.
    pub fn from_locator(locator: impl Into<String>) -> Self {
        Self::with_source(PixelSource::Locator(locator.into()))
    }

    /// Creates a request from tightly packed RGBA8 pixels.
    pub fn from_pixels(pixels: Vec<u8>, width: u32, height: u32) -> Self {
        Self::with_source(PixelSource::Buffer {
            pixels,
            width,
            height,
        })
    }

    fn with_source(source: PixelSource) -> Self {
        Self {
            source,
            min_filter: MinificationFilter::default(),
            mag_filter: FilterMode::default(),
            wrap_s: AddressMode::default(),
            wrap_t: AddressMode::default(),
            label: None,
        }
    }

    /// Sets the minification filter.
    pub fn with_min_filter(mut self, filter: MinificationFilter) -> Self {
        self.min_filter = filter;
        self
    }

    /// Sets the magnification filter.
    pub fn with_mag_filter(mut self, filter: FilterMode) -> Self {
        self.mag_filter = filter;
        self
    }

    /// Sets both wrap modes.
    pub fn with_wrap(mut self, wrap_s: AddressMode, wrap_t: AddressMode) -> Self {
        self.wrap_s = wrap_s;
        self.wrap_t = wrap_t;
        self
    }

    /// Sets the debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Checks that the request can be resolved.
    ///
    /// Locators are always accepted here; whether they resolve is only known
    /// asynchronously. Buffers must have non-zero dimensions and exactly
    /// `width * height * 4` bytes.
    pub fn validate(&self) -> Result<(), TextureRequestError> {
        match &self.source {
            PixelSource::Locator(locator) if locator.is_empty() => {
                Err(TextureRequestError::EmptyLocator)
            }
            PixelSource::Locator(_) => Ok(()),
            PixelSource::Buffer {
                pixels,
                width,
                height,
            } => {
                if *width == 0 || *height == 0 {
                    return Err(TextureRequestError::ZeroDimension {
                        width: *width,
                        height: *height,
                    });
                }
                let expected = Extent2D::new(*width, *height).area() as usize
                    * BUFFER_BYTES_PER_PIXEL;
                if pixels.len() != expected {
                    return Err(TextureRequestError::BufferSizeMismatch {
                        expected,
                        actual: pixels.len(),
                    });
                }
                Ok(())
            }
        }
    }
}

/// The external, loosely-typed shape of a texture request.
///
/// Exactly one of `locator` or (`pixels` + `width` + `height`) must be present.
/// This is the form requests take in configuration files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureRequestDescriptor {
    /// Locator of an encoded image.
    pub locator: Option<String>,
    /// Tightly packed RGBA8 pixels.
    pub pixels: Option<Vec<u8>>,
    /// Width of `pixels`.
    pub width: Option<u32>,
    /// Height of `pixels`.
    pub height: Option<u32>,
    /// Minification filter.
    pub min_filter: MinificationFilter,
    /// Magnification filter.
    pub mag_filter: FilterMode,
    /// Wrap mode along S.
    pub wrap_s: AddressMode,
    /// Wrap mode along T.
    pub wrap_t: AddressMode,
    /// Debug label.
    pub label: Option<String>,
}

impl TryFrom<TextureRequestDescriptor> for TextureRequest {
    type Error = TextureRequestError;

    fn try_from(descriptor: TextureRequestDescriptor) -> Result<Self, Self::Error> {
        let source = match (descriptor.locator, descriptor.pixels) {
            (Some(_), Some(_)) => return Err(TextureRequestError::BothSources),
            (None, None) => return Err(TextureRequestError::NoSource),
            (Some(locator), None) => PixelSource::Locator(locator),
            (None, Some(pixels)) => match (descriptor.width, descriptor.height) {
                (Some(width), Some(height)) => PixelSource::Buffer {
                    pixels,
                    width,
                    height,
                },
                _ => return Err(TextureRequestError::MissingDimensions),
            },
        };

        let request = TextureRequest {
            source,
            min_filter: descriptor.min_filter,
            mag_filter: descriptor.mag_filter,
            wrap_s: descriptor.wrap_s,
            wrap_t: descriptor.wrap_t,
            label: descriptor.label,
        };
        request.validate()?;
        Ok(request)
    }
}

/// A malformed texture request, reported synchronously to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureRequestError {
    /// Both a locator and a pixel buffer were supplied.
    BothSources,
    /// Neither a locator nor a pixel buffer was supplied.
    NoSource,
    /// A pixel buffer was supplied without its width and height.
    MissingDimensions,
    /// The locator is an empty string.
    EmptyLocator,
    /// A pixel buffer dimension is zero.
    ZeroDimension {
        /// The supplied width.
        width: u32,
        /// The supplied height.
        height: u32,
    },
    /// The pixel buffer length does not match `width * height * 4`.
    BufferSizeMismatch {
        /// The required length in bytes.
        expected: usize,
        /// The supplied length in bytes.
        actual: usize,
    },
}

impl fmt::Display for TextureRequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureRequestError::BothSources => {
                write!(f, "Texture request has both a locator and a pixel buffer")
            }
            TextureRequestError::NoSource => {
                write!(f, "Texture request has neither a locator nor a pixel buffer")
            }
            TextureRequestError::MissingDimensions => {
                write!(f, "Pixel buffer supplied without width and height")
            }
            TextureRequestError::EmptyLocator => write!(f, "Texture locator is empty"),
            TextureRequestError::ZeroDimension { width, height } => {
                write!(f, "Pixel buffer has a zero dimension: {width}x{height}")
            }
            TextureRequestError::BufferSizeMismatch { expected, actual } => write!(
                f,
                "Pixel buffer is {actual} bytes, expected {expected} for RGBA8"
            ),
        }
    }
}

impl std::error::Error for TextureRequestError {}
