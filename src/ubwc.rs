//! UBWC (universal bandwidth compression) metadata sizing.
//!
//! Each level of a compressed surface has a separate metadata plane
//! with flag data for each compressed block of the color plane.
use crate::{checked_round_up, div_round_up, minify, tile::is_r8g8, FormatInfo, Layout};

const RGB_TILE_WIDTH_ALIGNMENT: u32 = 64;
const RGB_TILE_HEIGHT_ALIGNMENT: u32 = 16;
const RGB_TILE_HEIGHT_ALIGNMENT_MIPMAPPED: u32 = 64;
pub(crate) const UBWC_PLANE_SIZE_ALIGNMENT: u32 = 4096;

// Compressed block dimensions in pixels indexed by cpp_shift.
// A width of 0 means UBWC isn't supported for that cpp.
const BLOCK_SIZES: [(u32, u32); 7] = [
    (16, 4), // cpp = 1
    (16, 4), // cpp = 2
    (16, 4), // cpp = 4
    (8, 4),  // cpp = 8
    (4, 4),  // cpp = 16
    (4, 2),  // cpp = 32
    (0, 0),  // cpp = 64
];

/// Calculates the width and height in pixels of a UBWC compressed block
/// for the resolved format and bytes per pixel of `layout`.
///
/// A width of 0 indicates that the bytes per pixel don't support compression.
///
/// # Panics
/// Panics if the bytes per pixel of `layout` are larger than 64.
///
/// # Examples
/**
```rust
use fd6_layout::{fd6_layout, ubwc_block_size, Format, ImageDesc, TileMode};

let desc = ImageDesc::new(Format::R8G8Unorm, 64, 64);
let layout = fd6_layout(&desc, TileMode::Tiled3, true, None).unwrap();
assert_eq!((16, 8), ubwc_block_size(&layout));
```
 */
pub fn ubwc_block_size<F: FormatInfo>(layout: &Layout<F>) -> (u32, u32) {
    block_size(
        layout.cpp_shift,
        is_r8g8(layout.cpp, layout.format.component_count()),
    )
}

pub(crate) fn block_size(cpp_shift: u32, is_r8g8: bool) -> (u32, u32) {
    if is_r8g8 {
        return (16, 8);
    }

    assert!(
        (cpp_shift as usize) < BLOCK_SIZES.len(),
        "No UBWC block size for {} bytes per pixel",
        1u64 << cpp_shift
    );
    BLOCK_SIZES[cpp_shift as usize]
}

/// The dimensions of the metadata plane in compressed blocks for the base level.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) struct MetadataSurface {
    width0: u32,
    height0: u32,
    height_align: u32,
}

impl MetadataSurface {
    /// Returns [None] if the dimensions don't fit in 32 bits after alignment.
    pub fn new(
        width0: u32,
        height0: u32,
        mip_levels: u32,
        block_width: u32,
        block_height: u32,
    ) -> Option<Self> {
        // Mipmapped UBWC is power of two sized with log2 dimensions in the descriptors.
        // The height alignment is 64 when mipmapped.
        // Single level surfaces may be shared with other participants that expect 16.
        let (width, height, height_align) = if mip_levels > 1 {
            (
                width0.checked_next_power_of_two()?,
                height0.checked_next_power_of_two()?,
                RGB_TILE_HEIGHT_ALIGNMENT_MIPMAPPED,
            )
        } else {
            (width0, height0, RGB_TILE_HEIGHT_ALIGNMENT)
        };

        Some(Self {
            width0: checked_round_up(div_round_up(width, block_width), RGB_TILE_WIDTH_ALIGNMENT)?,
            height0: checked_round_up(div_round_up(height, block_height), height_align)?,
            height_align,
        })
    }

    /// Returns the pitch and size in bytes of the metadata plane for `level`
    /// or [None] if the size doesn't fit in 32 bits.
    pub fn level_pitch_size(&self, level: u32) -> Option<(u32, u32)> {
        let pitch = checked_round_up(minify(self.width0, level), RGB_TILE_WIDTH_ALIGNMENT)?;
        let height = checked_round_up(minify(self.height0, level), self.height_align)?;
        let size = checked_round_up(pitch.checked_mul(height)?, UBWC_PLANE_SIZE_ALIGNMENT)?;
        Some((pitch, size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_sizes_by_cpp() {
        assert_eq!((16, 4), block_size(0, false));
        assert_eq!((16, 4), block_size(1, false));
        assert_eq!((16, 4), block_size(2, false));
        assert_eq!((8, 4), block_size(3, false));
        assert_eq!((4, 4), block_size(4, false));
        assert_eq!((4, 2), block_size(5, false));
        assert_eq!((0, 0), block_size(6, false));
    }

    #[test]
    fn block_size_r8g8() {
        assert_eq!((16, 8), block_size(1, true));
    }

    #[test]
    #[should_panic]
    fn block_size_unsupported_cpp() {
        block_size(7, false);
    }

    #[test]
    fn metadata_single_level() {
        // Single level surfaces don't round to a power of two.
        let surface = MetadataSurface::new(1000, 600, 1, 16, 4).unwrap();
        assert_eq!(
            MetadataSurface {
                width0: 64,
                height0: 160,
                height_align: 16
            },
            surface
        );
        assert_eq!(Some((64, 12288)), surface.level_pitch_size(0));
    }

    #[test]
    fn metadata_mipmapped() {
        let surface = MetadataSurface::new(1000, 600, 4, 16, 4).unwrap();
        assert_eq!(
            MetadataSurface {
                width0: 64,
                height0: 256,
                height_align: 64
            },
            surface
        );
        assert_eq!(Some((64, 16384)), surface.level_pitch_size(0));
        assert_eq!(Some((64, 8192)), surface.level_pitch_size(1));
        assert_eq!(Some((64, 4096)), surface.level_pitch_size(2));
        assert_eq!(Some((64, 4096)), surface.level_pitch_size(3));
    }

    #[test]
    fn metadata_wide_surface() {
        let surface = MetadataSurface::new(4096, 4, 1, 4, 2).unwrap();
        assert_eq!(Some((1024, 16384)), surface.level_pitch_size(0));
    }

    #[test]
    fn metadata_overflow() {
        // The power of two rounding doesn't fit in 32 bits.
        assert_eq!(None, MetadataSurface::new(u32::MAX, 16, 2, 16, 4));

        let surface = MetadataSurface::new(u32::MAX, u32::MAX, 1, 4, 2).unwrap();
        assert_eq!(None, surface.level_pitch_size(0));
    }
}
