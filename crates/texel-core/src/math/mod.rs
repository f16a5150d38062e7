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

//! Provides the integer math primitives used to describe texture sizes.
//!
//! The texture manager only deals in pixel-based extents, so this module is
//! intentionally limited to the [`dimension`] types and a handful of
//! power-of-two helpers used by the dimension policy.

pub mod dimension;

pub use self::dimension::{Extent2D, Extent3D, Origin3D};

/// Returns `true` if `value` is a power of two.
///
/// `1` counts as a power of two (2^0); `0` does not.
///
/// # Examples
///
/// ```
/// use texel_core::math::is_power_of_two;
/// assert!(is_power_of_two(1));
/// assert!(is_power_of_two(16));
/// assert!(!is_power_of_two(10));
/// assert!(!is_power_of_two(0));
/// ```
#[inline]
pub fn is_power_of_two(value: u32) -> bool {
    value.is_power_of_two()
}

/// Returns the smallest power of two greater than or equal to `value`.
///
/// Returns `None` if the result does not fit in a `u32`. `0` maps to `1`.
///
/// # Examples
///
/// ```
/// use texel_core::math::next_power_of_two;
/// assert_eq!(next_power_of_two(10), Some(16));
/// assert_eq!(next_power_of_two(3), Some(4));
/// assert_eq!(next_power_of_two(4), Some(4));
/// ```
#[inline]
pub fn next_power_of_two(value: u32) -> Option<u32> {
    value.checked_next_power_of_two()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_of_two_detection() {
        for pot in [1u32, 2, 4, 8, 256, 1 << 31] {
            assert!(is_power_of_two(pot), "{pot} should be a power of two");
        }
        for npot in [0u32, 3, 5, 10, 100, 1000] {
            assert!(!is_power_of_two(npot), "{npot} should not be a power of two");
        }
    }

    #[test]
    fn next_power_of_two_rounds_up() {
        assert_eq!(next_power_of_two(0), Some(1));
        assert_eq!(next_power_of_two(1), Some(1));
        assert_eq!(next_power_of_two(3), Some(4));
        assert_eq!(next_power_of_two(10), Some(16));
        assert_eq!(next_power_of_two(513), Some(1024));
        assert_eq!(next_power_of_two(u32::MAX), None);
    }
}
