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

//! Provides structs for representing extents (sizes) and origins (offsets) in 2D and 3D.
//!
//! They use integer (`u32`) components, making them suitable for representing
//! pixel-based coordinates and sizes.

use serde::{Deserialize, Serialize};

/// A two-dimensional extent, typically representing width and height.
///
/// This is the size every managed texture is tracked with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Extent2D {
    /// The width component of the extent.
    pub width: u32,
    /// The height component of the extent.
    pub height: u32,
}

impl Extent2D {
    /// Creates a new extent from a width and a height.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns the number of pixels covered by this extent.
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Returns `true` if either dimension is zero.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the largest of the two dimensions.
    pub fn max_dimension(&self) -> u32 {
        self.width.max(self.height)
    }

    /// Promotes this extent to a single-layer [`Extent3D`].
    pub const fn to_3d(self) -> Extent3D {
        Extent3D {
            width: self.width,
            height: self.height,
            depth_or_array_layers: 1,
        }
    }
}

/// A three-dimensional extent, representing width, height, and depth.
///
/// Backends speak in 3D extents; the texture manager only ever uses a depth of 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Extent3D {
    /// The width component of the extent.
    pub width: u32,
    /// The height component of the extent.
    pub height: u32,
    /// The depth or number of array layers.
    pub depth_or_array_layers: u32,
}

impl From<Extent2D> for Extent3D {
    fn from(extent: Extent2D) -> Self {
        extent.to_3d()
    }
}

/// A three-dimensional origin, representing an (x, y, z) offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Origin3D {
    /// The x-coordinate of the origin.
    pub x: u32,
    /// The y-coordinate of the origin.
    pub y: u32,
    /// The z-coordinate or array layer of the origin.
    pub z: u32,
}

impl Origin3D {
    /// The origin at `(0, 0, 0)`.
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent2d_helpers() {
        let extent = Extent2D::new(10, 3);
        assert_eq!(extent.area(), 30);
        assert_eq!(extent.max_dimension(), 10);
        assert!(!extent.is_empty());
        assert!(Extent2D::new(0, 4).is_empty());
    }

    #[test]
    fn extent2d_promotes_to_single_layer() {
        let extent: Extent3D = Extent2D::new(16, 8).into();
        assert_eq!(
            extent,
            Extent3D {
                width: 16,
                height: 8,
                depth_or_array_layers: 1
            }
        );
    }
}
