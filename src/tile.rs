//! Pitch, height, and base alignment rules for tiled and linear surfaces.
use crate::minify;

/// The addressing mode for image memory.
///
/// Tiled surfaces use a cache friendly swizzled order within each tile.
/// Linear surfaces are stored in row-major order.
#[repr(u32)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum TileMode {
    Linear = 0,
    Tiled2 = 2,
    Tiled3 = 3,
}

impl TileMode {
    /// Attempts to construct a tile mode from the hardware's encoded value.
    /// Returns [None] if `value` is not a supported tile mode.
    /// # Examples
    /**
    ```rust
    use fd6_layout::TileMode;

    assert_eq!(Some(TileMode::Tiled3), TileMode::new(3));
    assert_eq!(None, TileMode::new(1));
    ```
    */
    pub fn new(value: u32) -> Option<Self> {
        match value {
            0 => Some(TileMode::Linear),
            2 => Some(TileMode::Tiled2),
            3 => Some(TileMode::Tiled3),
            _ => None,
        }
    }

    /// Returns `true` for any of the tiled modes.
    pub fn is_tiled(self) -> bool {
        self != TileMode::Linear
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) struct Alignment {
    /// The log2 of the pitch alignment in units of 64 bytes.
    pub pitchalign: u32,
    /// The alignment in block rows for tiled levels.
    pub heightalign: u32,
    /// The alignment in bytes for the start of the buffer.
    pub base_align: u32,
}

impl Alignment {
    /// The pitch alignment in bytes.
    pub fn pitch_unit(&self) -> u32 {
        64 << self.pitchalign
    }
}

/// R8G8 has different block dimensions than other 2 byte formats.
pub(crate) fn is_r8g8(cpp: u32, component_count: u32) -> bool {
    cpp == 2 && component_count == 2
}

pub(crate) fn tile_alignment(cpp: u32, cpp_shift: u32, is_r8g8: bool) -> Alignment {
    let (pitchalign, heightalign) = if is_r8g8 || cpp == 1 {
        (0, 32)
    } else if cpp == 2 {
        (1, 16)
    } else {
        (cpp_shift, 16)
    };

    // TODO: This is probably not always right for UBWC, which aligns levels to 4K.
    let base_align = match cpp {
        1 => 64,
        2 => 128,
        _ => 256,
    };

    Alignment {
        pitchalign,
        heightalign,
        base_align,
    }
}

/// Tiled levels still expect the tiled alignment,
/// so this only affects linear layouts and linear levels of tiled layouts.
pub(crate) fn linear_alignment(cpp: u32, cpp_shift: u32, explicit_pitch: bool) -> Alignment {
    // Align the pitch to at least 16 pixels for 16x4 aligned GMEM stores.
    let mut pitchalign = if cpp > 4 { cpp_shift - 2 } else { 0 };

    // Use more alignment than necessary when the pitch isn't fixed by the caller.
    if !explicit_pitch {
        pitchalign = cpp_shift;
    }

    Alignment {
        pitchalign,
        heightalign: 1,
        base_align: 64,
    }
}

/// Small levels of tiled surfaces are stored linearly unless the surface uses UBWC.
pub(crate) fn level_linear(width0: u32, ubwc: bool, level: u32) -> bool {
    !ubwc && minify(width0, level) < 16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_alignment_1bpp() {
        let alignment = tile_alignment(1, 0, false);
        assert_eq!(
            Alignment {
                pitchalign: 0,
                heightalign: 32,
                base_align: 64
            },
            alignment
        );
        assert_eq!(64, alignment.pitch_unit());
    }

    #[test]
    fn tile_alignment_2bpp() {
        assert_eq!(
            Alignment {
                pitchalign: 1,
                heightalign: 16,
                base_align: 128
            },
            tile_alignment(2, 1, false)
        );
        assert_eq!(
            Alignment {
                pitchalign: 0,
                heightalign: 32,
                base_align: 128
            },
            tile_alignment(2, 1, true)
        );
    }

    #[test]
    fn tile_alignment_larger_bpp() {
        assert_eq!(256, tile_alignment(4, 2, false).pitch_unit());
        assert_eq!(512, tile_alignment(8, 3, false).pitch_unit());
        assert_eq!(1024, tile_alignment(16, 4, false).pitch_unit());
        assert_eq!(256, tile_alignment(16, 4, false).base_align);
        assert_eq!(16, tile_alignment(64, 6, false).heightalign);
    }

    #[test]
    fn linear_alignment_computed_pitch() {
        assert_eq!(64, linear_alignment(1, 0, false).pitch_unit());
        assert_eq!(256, linear_alignment(4, 2, false).pitch_unit());
        assert_eq!(1024, linear_alignment(16, 4, false).pitch_unit());
        assert_eq!(64, linear_alignment(16, 4, false).base_align);
    }

    #[test]
    fn linear_alignment_explicit_pitch() {
        assert_eq!(64, linear_alignment(1, 0, true).pitch_unit());
        assert_eq!(64, linear_alignment(4, 2, true).pitch_unit());
        assert_eq!(128, linear_alignment(8, 3, true).pitch_unit());
        assert_eq!(256, linear_alignment(16, 4, true).pitch_unit());
    }

    #[test]
    fn r8g8_detection() {
        assert!(is_r8g8(2, 2));
        assert!(!is_r8g8(2, 1));
        assert!(!is_r8g8(2, 3));
        assert!(!is_r8g8(4, 2));
    }

    #[test]
    fn small_levels_linear() {
        assert!(!level_linear(100, false, 2));
        assert!(level_linear(100, false, 3));
        assert!(level_linear(8, false, 0));
        assert!(!level_linear(8, true, 0));
    }

    #[test]
    fn tile_mode_values() {
        assert!(!TileMode::Linear.is_tiled());
        assert!(TileMode::Tiled2.is_tiled());
        assert_eq!(Some(TileMode::Linear), TileMode::new(0));
    }
}
