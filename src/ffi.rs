//! Documentation for the C API.
//!
//! None of the FFI methods allocate memory.
//! The caller owns the [Layout] and passes a pointer to be filled in by [fd6_layout].
use crate::{Format, Layout, PlaneLayout, TileMode};

/// See [crate::fd6_layout].
///
/// Returns `false` without modifying `layout` if `plane_layout` has a pitch
/// that isn't a multiple of the required alignment or if the layout size doesn't fit in 32 bits.
/// Returns `true` otherwise.
///
/// # Safety
/// `layout` must point to memory valid for writing a [Layout].
/// `plane_layout` must be null or point to a valid [PlaneLayout].
///
/// `format` must be one of the supported values in [Format]
/// and `tile_mode` must be one of the supported values in [TileMode].
#[no_mangle]
pub unsafe extern "C" fn fd6_layout(
    layout: *mut Layout,
    format: u32,
    nr_samples: u32,
    width0: u32,
    height0: u32,
    depth0: u32,
    mip_levels: u32,
    array_size: u32,
    is_3d: bool,
    tile_mode: u32,
    ubwc: bool,
    plane_layout: *const PlaneLayout,
) -> bool {
    let desc = crate::ImageDesc {
        format: Format::new(format).unwrap(),
        nr_samples,
        width0,
        height0,
        depth0,
        mip_levels,
        array_size,
        is_3d,
    };

    match crate::layout::fd6_layout(
        &desc,
        TileMode::new(tile_mode).unwrap(),
        ubwc,
        plane_layout.as_ref().copied(),
    ) {
        Ok(result) => {
            layout.write(result);
            true
        }
        Err(_) => false,
    }
}

/// See [crate::ubwc_block_size].
///
/// # Safety
/// `layout` must point to a [Layout] initialized by [fd6_layout].
/// `block_width` and `block_height` must point to memory valid for writing a `u32`.
#[no_mangle]
pub unsafe extern "C" fn fd6_ubwc_block_size(
    layout: *const Layout,
    block_width: *mut u32,
    block_height: *mut u32,
) {
    let (width, height) = crate::ubwc::ubwc_block_size(&*layout);
    block_width.write(width);
    block_height.write(height);
}
