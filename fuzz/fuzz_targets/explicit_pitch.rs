#![no_main]
use libfuzzer_sys::fuzz_target;

extern crate arbitrary;
use arbitrary::{Arbitrary, Result, Unstructured};
use fd6_layout::{fd6_layout, Format, ImageDesc, LayoutError, PlaneLayout, TileMode};

#[derive(Debug)]
struct Input {
    format: Format,
    width0: u32,
    height0: u32,
    tile_mode: TileMode,
    ubwc: bool,
    offset: u32,
    pitch: u32,
}

impl<'a> Arbitrary<'a> for Input {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        Ok(Input {
            format: u.arbitrary()?,
            width0: u.int_in_range(1..=2048)?,
            height0: u.int_in_range(1..=2048)?,
            tile_mode: u.arbitrary()?,
            ubwc: u.arbitrary()?,
            offset: u.int_in_range(0..=0x100000)?,
            pitch: u.int_in_range(1..=0x20000)?,
        })
    }
}

fuzz_target!(|input: Input| {
    let desc = ImageDesc::new(input.format, input.width0, input.height0);
    let plane = PlaneLayout {
        offset: input.offset,
        pitch: input.pitch,
    };

    // Misaligned pitches should return an error instead of panicking.
    match fd6_layout(&desc, input.tile_mode, input.ubwc, Some(plane)) {
        Ok(layout) => {
            assert_eq!(input.pitch, layout.pitch(0));
            assert!(layout.size >= input.offset);

            // The UBWC data stays in front of the color data after the explicit offset.
            let first_color = layout.slices[0].offset;
            for (level, slice) in layout.ubwc_slices().iter().enumerate() {
                assert!(slice.offset >= input.offset);
                assert!(layout.ubwc_offset(level as u32, 0) + slice.size0 <= first_color);
            }
        }
        Err(LayoutError::PitchMisaligned { pitch, alignment }) => {
            assert_eq!(input.pitch, pitch);
            assert_ne!(0, pitch % alignment);
        }
        Err(LayoutError::SizeOverflow) => panic!("Unexpected overflow for {:?}", input),
    }
});
