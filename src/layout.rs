//! Offsets, pitches, and sizes for all the mip levels and array layers of an image.
//!
//! The [fd6_layout] function calculates a complete [Layout] for a single buffer.
//! Each mip level has a [Slice] for the color data and,
//! for UBWC compressed images, a [Slice] for the metadata plane.
use crate::{
    checked_round_up, minify,
    tile::{is_r8g8, level_linear, linear_alignment, tile_alignment},
    ubwc::{self, MetadataSurface, UBWC_PLANE_SIZE_ALIGNMENT},
    Format, FormatInfo, LayoutError, TileMode, MAX_MIP_LEVELS,
};

const LAYER_SIZE_ALIGNMENT: u32 = 4096;

// The hardware stops shrinking 3D layer sizes once they get this small.
const MIN_3D_LAYER_SIZE: u32 = 0xf000;

/// The location of the data for a single mip level.
#[repr(C)]
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct Slice {
    /// The offset in bytes from the start of the buffer.
    pub offset: u32,
    /// The size in bytes of a single row of blocks.
    pub pitch: u32,
    /// The size in bytes of a single layer or depth slice.
    pub size0: u32,
}

/// The offset and pitch of an existing allocation like an imported buffer.
#[repr(C)]
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct PlaneLayout {
    /// The offset in bytes of the image within the buffer.
    pub offset: u32,
    /// The pitch in bytes of the base mip level.
    pub pitch: u32,
}

/// The dimensions and format of an image.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ImageDesc<F = Format> {
    pub format: F,
    pub nr_samples: u32,
    pub width0: u32,
    pub height0: u32,
    pub depth0: u32,
    pub mip_levels: u32,
    pub array_size: u32,
    /// `true` for 3D textures and `false` for 1D, 2D, and array textures.
    pub is_3d: bool,
}

impl<F: FormatInfo> ImageDesc<F> {
    /// A 2D image with a single sample, mip level, and array layer.
    pub fn new(format: F, width0: u32, height0: u32) -> Self {
        Self {
            format,
            nr_samples: 1,
            width0,
            height0,
            depth0: 1,
            mip_levels: 1,
            array_size: 1,
            is_3d: false,
        }
    }
}

/// The memory layout of an image calculated by [fd6_layout].
///
/// Only the first `mip_levels` entries of `slices` and `ubwc_slices` are used.
/// The `ubwc_slices` are only used if `ubwc` is `true`.
#[repr(C)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Layout<F = Format> {
    pub slices: [Slice; MAX_MIP_LEVELS],
    pub ubwc_slices: [Slice; MAX_MIP_LEVELS],
    /// The total size in bytes of the buffer including any explicit offset.
    pub size: u32,
    /// The stride in bytes between array layers if `layer_first` is `true`.
    pub layer_size: u32,
    /// The size in bytes of the UBWC metadata for all levels of a single layer.
    pub ubwc_layer_size: u32,
    pub width0: u32,
    pub height0: u32,
    pub depth0: u32,
    pub mip_levels: u32,
    pub array_size: u32,
    pub nr_samples: u32,
    /// The bytes per pixel including all samples.
    pub cpp: u32,
    /// The log2 of `cpp`.
    pub cpp_shift: u32,
    /// The log2 of the pitch alignment in units of 64 bytes.
    pub pitchalign: u32,
    /// The alignment in rows of blocks for tiled levels.
    pub heightalign: u32,
    /// The alignment in bytes for the start of the buffer.
    pub base_align: u32,
    pub format: F,
    pub tile_mode: TileMode,
    /// `true` if UBWC compression was requested and is supported for this image.
    pub ubwc: bool,
    /// `true` if each array layer stores all of its mip levels contiguously.
    pub layer_first: bool,
}

/// Calculates the layout of an image with the given dimensions.
///
/// UBWC compression is only enabled if `ubwc` is `true` and the image supports it.
/// Check [Layout::ubwc] for the result.
///
/// If `plane_layout` is [Some], the image uses the existing offset and pitch instead of calculating a pitch.
/// Returns [LayoutError::PitchMisaligned] if the existing pitch doesn't have the required alignment.
/// Returns [LayoutError::SizeOverflow] if any offset or size of the layout doesn't fit in 32 bits.
///
/// # Panics
/// Panics if `desc` has 0 samples, if `desc` has no mip levels or more than [MAX_MIP_LEVELS],
/// or if the bytes per pixel including samples are larger than 64.
///
/// # Examples
/// Uncompressed and block compressed formats both use dimensions in pixels.
/**
```rust
use fd6_layout::{fd6_layout, Format, ImageDesc, TileMode};

// 100x100x8 R8G8B8A8 3D texture with mipmaps.
let desc = ImageDesc {
    depth0: 8,
    mip_levels: 7,
    is_3d: true,
    ..ImageDesc::new(Format::R8G8B8A8Unorm, 100, 100)
};
let layout = fd6_layout(&desc, TileMode::Tiled3, false, None).unwrap();

// 3D textures don't support UBWC.
assert!(!layout.ubwc);
```
 */
/// An imported buffer may already have a pitch.
/**
```rust
use fd6_layout::{fd6_layout, Format, ImageDesc, LayoutError, PlaneLayout, TileMode};

let desc = ImageDesc::new(Format::R8Unorm, 1920, 1080);
let plane = PlaneLayout { offset: 0, pitch: 1920 };
let layout = fd6_layout(&desc, TileMode::Linear, false, Some(plane)).unwrap();
assert_eq!(1920, layout.pitch(0));

let plane = PlaneLayout { offset: 0, pitch: 1921 };
assert_eq!(
    Err(LayoutError::PitchMisaligned { pitch: 1921, alignment: 64 }),
    fd6_layout(&desc, TileMode::Linear, false, Some(plane))
);
```
 */
pub fn fd6_layout<F: FormatInfo>(
    desc: &ImageDesc<F>,
    tile_mode: TileMode,
    ubwc: bool,
    plane_layout: Option<PlaneLayout>,
) -> Result<Layout<F>, LayoutError> {
    assert!(desc.nr_samples > 0, "The sample count must be non zero");
    assert!(
        desc.mip_levels > 0 && desc.mip_levels as usize <= MAX_MIP_LEVELS,
        "Unsupported mip level count {}",
        desc.mip_levels
    );

    let cpp = checked_mul(desc.format.block_size(), desc.nr_samples)?;
    let cpp_shift = cpp.trailing_zeros();
    let r8g8 = is_r8g8(cpp, desc.format.component_count());

    // UBWC only supports images with a single depth slice.
    let (ubwc_block_width, ubwc_block_height) = ubwc::block_size(cpp_shift, r8g8);
    let ubwc = ubwc && desc.depth0 <= 1 && ubwc_block_width != 0;

    let layer_first = !desc.is_3d;

    // A level contains a single layer if each layer contains all the levels.
    let layers_in_level = if layer_first { 1 } else { desc.array_size };

    let alignment = if tile_mode.is_tiled() {
        tile_alignment(cpp, cpp_shift, r8g8)
    } else {
        linear_alignment(cpp, cpp_shift, plane_layout.is_some())
    };
    let pitch_unit = alignment.pitch_unit();

    let (offset, pitch0) = match plane_layout {
        Some(plane) => {
            if plane.pitch % pitch_unit != 0 {
                return Err(LayoutError::PitchMisaligned {
                    pitch: plane.pitch,
                    alignment: pitch_unit,
                });
            }
            (plane.offset, plane.pitch)
        }
        None => {
            let row_size = checked_mul(desc.format.nblocks_x(desc.width0), cpp)?;
            (0, checked_align(row_size, pitch_unit)?)
        }
    };

    let metadata = if ubwc {
        Some(
            MetadataSurface::new(
                desc.width0,
                desc.height0,
                desc.mip_levels,
                ubwc_block_width,
                ubwc_block_height,
            )
            .ok_or(LayoutError::SizeOverflow)?,
        )
    } else {
        None
    };

    let mut layout = Layout {
        slices: [Slice::default(); MAX_MIP_LEVELS],
        ubwc_slices: [Slice::default(); MAX_MIP_LEVELS],
        size: 0,
        layer_size: 0,
        ubwc_layer_size: 0,
        width0: desc.width0,
        height0: desc.height0,
        depth0: desc.depth0,
        mip_levels: desc.mip_levels,
        array_size: desc.array_size,
        nr_samples: desc.nr_samples,
        cpp,
        cpp_shift,
        pitchalign: alignment.pitchalign,
        heightalign: alignment.heightalign,
        base_align: alignment.base_align,
        format: desc.format,
        tile_mode,
        ubwc,
        layer_first,
    };

    for level in 0..desc.mip_levels {
        let depth = minify(desc.depth0, level);
        let tiled = layout.level_tile_mode(level).is_tiled();

        // Tiled levels of 3D textures use power of two dimensions.
        let height = if desc.is_3d && tiled {
            let height0 = desc
                .height0
                .checked_next_power_of_two()
                .ok_or(LayoutError::SizeOverflow)?;
            minify(height0, level)
        } else {
            minify(desc.height0, level)
        };

        let mut nblocksy = desc.format.nblocks_y(height);
        if tiled {
            nblocksy = checked_align(nblocksy, alignment.heightalign)?;
        }

        // The blits for mem<->gmem work at a granularity of 16x4 and can over-fetch past the last level.
        // The pitch is already aligned enough, so only pad the height.
        // This only matters if the last level is linear.
        if level == desc.mip_levels - 1 {
            nblocksy = checked_align(nblocksy, 4)?;
        }

        let pitch = checked_align(minify(pitch0, level), pitch_unit)?;

        // Array layers have the same layer size for each level.
        // 3D textures can have smaller layer sizes for higher levels,
        // but the hardware stops reducing the layer size once it gets small enough.
        let size0 = if desc.is_3d {
            match level.checked_sub(1) {
                Some(previous) if layout.slices[previous as usize].size0 <= MIN_3D_LAYER_SIZE => {
                    layout.slices[previous as usize].size0
                }
                _ => checked_align(checked_mul(nblocksy, pitch)?, LAYER_SIZE_ALIGNMENT)?,
            }
        } else {
            checked_mul(nblocksy, pitch)?
        };

        layout.slices[level as usize] = Slice {
            offset: checked_add(offset, layout.size)?,
            pitch,
            size0,
        };
        let level_size = checked_mul(checked_mul(size0, depth)?, layers_in_level)?;
        layout.size = checked_add(layout.size, level_size)?;

        if let Some(metadata) = &metadata {
            // Every UBWC level starts on a 4K boundary.
            layout.size = checked_align(layout.size, UBWC_PLANE_SIZE_ALIGNMENT)?;

            let (ubwc_pitch, ubwc_size) = metadata
                .level_pitch_size(level)
                .ok_or(LayoutError::SizeOverflow)?;
            layout.ubwc_slices[level as usize] = Slice {
                offset: checked_add(offset, layout.ubwc_layer_size)?,
                pitch: ubwc_pitch,
                size0: ubwc_size,
            };
            layout.ubwc_layer_size = checked_add(layout.ubwc_layer_size, ubwc_size)?;
        }
    }

    if layer_first {
        layout.layer_size = checked_align(layout.size, LAYER_SIZE_ALIGNMENT)?;
        layout.size = checked_mul(layout.layer_size, desc.array_size)?;
    }

    // The kernel expects the UBWC data at the start of the buffer.
    // The hardware has separate offsets and pitches for UBWC and color data.
    if layout.ubwc {
        let ubwc_size = checked_mul(layout.ubwc_layer_size, desc.array_size)?;
        for slice in &mut layout.slices[..desc.mip_levels as usize] {
            slice.offset = checked_add(slice.offset, ubwc_size)?;
        }
        layout.size = checked_add(layout.size, ubwc_size)?;
    }

    layout.size = checked_add(layout.size, offset)?;

    Ok(layout)
}

// Offsets and sizes are 32 bit like the hardware registers.
fn checked_add(a: u32, b: u32) -> Result<u32, LayoutError> {
    a.checked_add(b).ok_or(LayoutError::SizeOverflow)
}

fn checked_mul(a: u32, b: u32) -> Result<u32, LayoutError> {
    a.checked_mul(b).ok_or(LayoutError::SizeOverflow)
}

fn checked_align(x: u32, n: u32) -> Result<u32, LayoutError> {
    checked_round_up(x, n).ok_or(LayoutError::SizeOverflow)
}

impl<F: FormatInfo> Layout<F> {
    /// The color data slices for each mip level.
    pub fn slices(&self) -> &[Slice] {
        &self.slices[..self.mip_levels as usize]
    }

    /// The UBWC metadata slices for each mip level or an empty slice if UBWC is disabled.
    pub fn ubwc_slices(&self) -> &[Slice] {
        if self.ubwc {
            &self.ubwc_slices[..self.mip_levels as usize]
        } else {
            &[]
        }
    }

    /// Returns `true` if `level` is stored linearly.
    /// Small levels of tiled images without UBWC are linear.
    pub fn level_linear(&self, level: u32) -> bool {
        level_linear(self.width0, self.ubwc, level)
    }

    /// The tile mode used for the data of `level`.
    pub fn level_tile_mode(&self, level: u32) -> TileMode {
        if self.tile_mode.is_tiled() && self.level_linear(level) {
            TileMode::Linear
        } else {
            self.tile_mode
        }
    }

    /// The pitch in bytes of the color data for `level`.
    pub fn pitch(&self, level: u32) -> u32 {
        self.slices[level as usize].pitch
    }

    /// The pitch in bytes of the UBWC metadata for `level`.
    pub fn ubwc_pitch(&self, level: u32) -> u32 {
        self.ubwc_slices[level as usize].pitch
    }

    /// The stride in bytes between array layers of `level`.
    pub fn layer_stride(&self, level: u32) -> u32 {
        if self.layer_first {
            self.layer_size
        } else {
            self.slices[level as usize].size0
        }
    }

    /// The offset in bytes of the color data for `level` and `layer`.
    pub fn surface_offset(&self, level: u32, layer: u32) -> u32 {
        self.slices[level as usize].offset + self.layer_stride(level) * layer
    }

    /// The offset in bytes of the UBWC metadata for `level` and `layer`.
    pub fn ubwc_offset(&self, level: u32, layer: u32) -> u32 {
        self.ubwc_slices[level as usize].offset + self.ubwc_layer_size * layer
    }

    /// See [crate::ubwc_block_size].
    pub fn ubwc_block_size(&self) -> (u32, u32) {
        ubwc::ubwc_block_size(self)
    }
}

impl<F: FormatInfo + core::fmt::Debug> Layout<F> {
    /// Logs the layout of each level at the debug level.
    pub fn dump(&self) {
        for level in 0..self.mip_levels {
            let slice = &self.slices[level as usize];
            let ubwc_slice = &self.ubwc_slices[level as usize];
            log::debug!(
                "{:?}: {}x{}x{}@{}x{}: {:2}: stride={:4}, size={:6},{:6}, aligned_height={:3}, offset={:#x},{:#x}, layersz {:5},{:5} tiling={:?}",
                self.format,
                minify(self.width0, level),
                minify(self.height0, level),
                minify(self.depth0, level),
                self.cpp,
                self.nr_samples,
                level,
                slice.pitch,
                slice.size0,
                ubwc_slice.size0,
                slice.size0 / slice.pitch.max(1),
                slice.offset,
                ubwc_slice.offset,
                self.layer_size,
                self.ubwc_layer_size,
                self.level_tile_mode(level)
            );
        }
    }
}
