//! # fd6_layout
//! fd6_layout calculates the memory layout of images for Adreno a6xx GPUs.
//!
//! The hardware walks image memory using fixed alignment and padding rules
//! for tiled surfaces, block compressed formats, 3D textures, and UBWC
//! (universal bandwidth compression) metadata.
//! The offsets, pitches, and sizes calculated here must match those rules exactly.
//!
//! # Getting Started
//! The following example calculates the layout for a tiled and compressed R8G8B8A8 texture
//! with a full mip chain and accesses the offset of each mip level.
/*!
```rust
use fd6_layout::{fd6_layout, Format, ImageDesc, TileMode};

# fn main() -> Result<(), fd6_layout::LayoutError> {
let desc = ImageDesc {
    mip_levels: 9,
    ..ImageDesc::new(Format::R8G8B8A8Unorm, 256, 256)
};
let layout = fd6_layout(&desc, TileMode::Tiled3, true, None)?;

for level in 0..desc.mip_levels {
    let offset = layout.surface_offset(level, 0);
    let pitch = layout.pitch(level);
    # let _ = (offset, pitch);
}
// The UBWC metadata is stored before the color data.
assert!(layout.ubwc_offset(0, 0) < layout.surface_offset(0, 0));
# Ok(())
# }
```
*/
//! # Layer Ordering
//! 2D textures and array textures store each array layer with its complete mip chain.
//! 3D textures store each mip level with all of its depth slices.
//! Any UBWC metadata planes for all layers are placed at the start of the buffer.
/*!
```no_compile
UBWC Layer 0 Mip 0
...
UBWC Layer L-1 Mip M-1
Layer 0 Mip 0
...
Layer 0 Mip M-1
Layer 1 Mip 0
...
Layer L-1 Mip M-1
```
*/
//! # Formats
//! The layout only depends on a few properties of the pixel format described by [FormatInfo].
//! The [Format] enum covers common formats, but any type implementing [FormatInfo] can be used.
#![cfg_attr(not(feature = "std"), no_std)]

mod format;
mod layout;
mod tile;
mod ubwc;

// Avoid making this module public to prevent people importing it accidentally.
#[cfg(feature = "ffi")]
mod ffi;

pub use format::{Format, FormatInfo};
pub use layout::{fd6_layout, ImageDesc, Layout, PlaneLayout, Slice};
pub use tile::TileMode;
pub use ubwc::ubwc_block_size;

/// The maximum number of mip levels for a single image.
/// This covers the full mip chain for the largest supported 16384x16384 image.
pub const MAX_MIP_LEVELS: usize = 15;

/// Errors that can occur while calculating a layout.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LayoutError {
    /// The pitch of the explicit [PlaneLayout] is not a multiple of the required alignment in bytes.
    PitchMisaligned { pitch: u32, alignment: u32 },
    /// An offset or size of the layout does not fit in 32 bits.
    SizeOverflow,
}

impl core::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LayoutError::PitchMisaligned { pitch, alignment } => write!(
                f,
                "Explicit pitch {} is not aligned to {} bytes.",
                pitch, alignment
            ),
            LayoutError::SizeOverflow => {
                write!(f, "The layout size does not fit in 32 bits.")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LayoutError {}

/// Calculates the division of `x` by `d` but rounds up rather than truncating.
///
/// # Examples
/**
```rust
# use fd6_layout::div_round_up;
assert_eq!(2, div_round_up(8, 4));
assert_eq!(3, div_round_up(10, 4));
assert_eq!(u32::MAX, div_round_up(u32::MAX, 1));
```
 */
#[inline]
pub const fn div_round_up(x: u32, d: u32) -> u32 {
    x / d + (x % d != 0) as u32
}

/// Rounds `x` up to the next multiple of `n` or returns [None] on overflow.
#[inline]
pub(crate) fn checked_round_up(x: u32, n: u32) -> Option<u32> {
    div_round_up(x, n).checked_mul(n)
}

/// The size of `base` at the given mip level, never going below 1.
#[inline]
pub(crate) fn minify(base: u32, level: u32) -> u32 {
    core::cmp::max(base >> level, 1)
}
