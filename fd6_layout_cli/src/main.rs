use clap::{App, Arg};
use fd6_layout::{fd6_layout, Format, ImageDesc, PlaneLayout, TileMode};

fn main() {
    env_logger::init();

    let matches = App::new("fd6_layout")
        .version("0.1")
        .about("Print the memory layout of an Adreno a6xx image.")
        .arg(
            Arg::with_name("format")
                .short("f")
                .long("format")
                .help("The image format")
                .required(true)
                .takes_value(true)
                .possible_values(&[
                    "r8", "rg8", "r16f", "rgb565", "rgba8", "bgra8", "r32f", "rg16f", "z24s8",
                    "d32f", "rgba16f", "rg32f", "rgba32f", "bc1", "bc3", "bc4", "bc5", "bc7",
                    "etc2", "astc4x4", "astc8x8",
                ])
                .case_insensitive(true),
        )
        .arg(
            Arg::with_name("width")
                .short("w")
                .long("width")
                .help("The image width in pixels")
                .required(true)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("height")
                .short("h")
                .long("height")
                .help("The image height in pixels")
                .required(true)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("depth")
                .short("d")
                .long("depth")
                .help("The image depth in pixels for 3D images")
                .default_value("1")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("levels")
                .short("m")
                .long("levels")
                .help("The number of mip levels")
                .default_value("1")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("layers")
                .short("l")
                .long("layers")
                .help("The number of array layers")
                .default_value("1")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("samples")
                .short("s")
                .long("samples")
                .help("The number of samples per pixel")
                .default_value("1")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("3d")
                .long("3d")
                .help("Lay out the image as a 3D texture"),
        )
        .arg(
            Arg::with_name("tiled")
                .short("t")
                .long("tiled")
                .help("Use tiled instead of linear addressing"),
        )
        .arg(
            Arg::with_name("ubwc")
                .short("u")
                .long("ubwc")
                .help("Enable UBWC if supported by the image"),
        )
        .arg(
            Arg::with_name("pitch")
                .long("pitch")
                .help("The explicit pitch in bytes of an existing buffer")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("offset")
                .long("offset")
                .help("The explicit offset in bytes of an existing buffer")
                .requires("pitch")
                .takes_value(true),
        )
        .get_matches();

    let format: Format = matches
        .value_of("format")
        .unwrap()
        .to_lowercase()
        .parse()
        .unwrap();
    let value = |name: &str| -> u32 { matches.value_of(name).unwrap().parse().unwrap() };

    let desc = ImageDesc {
        format,
        nr_samples: value("samples"),
        width0: value("width"),
        height0: value("height"),
        depth0: value("depth"),
        mip_levels: value("levels"),
        array_size: value("layers"),
        is_3d: matches.is_present("3d"),
    };
    let tile_mode = if matches.is_present("tiled") {
        TileMode::Tiled3
    } else {
        TileMode::Linear
    };
    let plane_layout = matches.value_of("pitch").map(|pitch| PlaneLayout {
        offset: matches
            .value_of("offset")
            .map(|o| o.parse().unwrap())
            .unwrap_or(0),
        pitch: pitch.parse().unwrap(),
    });

    let layout = match fd6_layout(&desc, tile_mode, matches.is_present("ubwc"), plane_layout) {
        Ok(layout) => layout,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    layout.dump();

    println!(
        "{:?} {}x{}x{} cpp={} ubwc={} layer_first={}",
        layout.format,
        layout.width0,
        layout.height0,
        layout.depth0,
        layout.cpp,
        layout.ubwc,
        layout.layer_first
    );
    println!(
        "pitchalign={} heightalign={} base_align={}",
        layout.pitchalign, layout.heightalign, layout.base_align
    );
    for (level, slice) in layout.slices().iter().enumerate() {
        println!(
            "level {:2}: offset={:#010x} pitch={:6} size0={:8} tiling={:?}",
            level,
            slice.offset,
            slice.pitch,
            slice.size0,
            layout.level_tile_mode(level as u32)
        );
    }
    for (level, slice) in layout.ubwc_slices().iter().enumerate() {
        println!(
            "ubwc  {:2}: offset={:#010x} pitch={:6} size0={:8}",
            level, slice.offset, slice.pitch, slice.size0
        );
    }
    println!(
        "layer_size={} ubwc_layer_size={} size={}",
        layout.layer_size, layout.ubwc_layer_size, layout.size
    );
}
