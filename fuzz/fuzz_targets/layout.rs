#![no_main]
use libfuzzer_sys::fuzz_target;

extern crate arbitrary;
use arbitrary::{Arbitrary, Result, Unstructured};
use fd6_layout::{fd6_layout, Format, ImageDesc, TileMode};

#[derive(Debug)]
struct Input {
    desc: ImageDesc,
    tile_mode: TileMode,
    ubwc: bool,
}

impl<'a> Arbitrary<'a> for Input {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        let is_3d: bool = u.arbitrary()?;
        // Keep the total size within 32 bits for the largest formats.
        Ok(Input {
            desc: ImageDesc {
                format: u.arbitrary::<Format>()?,
                nr_samples: *u.choose(&[1, 2, 4])?,
                width0: u.int_in_range(1..=2048)?,
                height0: u.int_in_range(1..=2048)?,
                depth0: if is_3d { u.int_in_range(1..=8)? } else { 1 },
                mip_levels: u.int_in_range(1..=15)?,
                array_size: if is_3d { 1 } else { u.int_in_range(1..=6)? },
                is_3d,
            },
            tile_mode: u.arbitrary()?,
            ubwc: u.arbitrary()?,
        })
    }
}

fuzz_target!(|input: Input| {
    let desc = &input.desc;
    let layout = fd6_layout(desc, input.tile_mode, input.ubwc, None).unwrap();

    let pitch_unit = 64 << layout.pitchalign;
    let first_color = layout.slices().iter().map(|s| s.offset).min().unwrap();

    for level in 0..desc.mip_levels {
        let slice = layout.slices[level as usize];
        assert_eq!(0, slice.pitch % pitch_unit);

        let depth = std::cmp::max(desc.depth0 >> level, 1);
        let end = layout.surface_offset(level, desc.array_size - 1) + slice.size0 * depth;
        assert!(end <= layout.size);
    }

    for level in 0..layout.ubwc_slices().len() as u32 {
        let end = layout.ubwc_offset(level, desc.array_size - 1) + layout.ubwc_slices[level as usize].size0;
        assert!(end <= first_color);
    }
});
