use core::str::FromStr;

use crate::div_round_up;

/// The properties of a pixel format needed to calculate a layout.
///
/// Uncompressed formats are equivalent to 1x1 pixel blocks.
/// Implementations must report a power of two for [FormatInfo::block_size].
pub trait FormatInfo: Copy {
    /// The size of a single block in bytes or the bytes per pixel for uncompressed formats.
    fn block_size(self) -> u32;

    /// The width of a block in pixels.
    fn block_width(self) -> u32;

    /// The height of a block in pixels.
    fn block_height(self) -> u32;

    /// The number of color components like 2 for R8G8.
    fn component_count(self) -> u32;

    /// The number of blocks needed to cover `width` pixels.
    fn nblocks_x(self, width: u32) -> u32 {
        div_round_up(width, self.block_width())
    }

    /// The number of blocks needed to cover `height` pixels.
    fn nblocks_y(self, height: u32) -> u32 {
        div_round_up(height, self.block_height())
    }
}

/// Common image formats supported by the hardware.
#[repr(u32)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Format {
    R8Unorm = 0,
    R8G8Unorm = 1,
    R16Float = 2,
    R5G6B5Unorm = 3,
    R8G8B8A8Unorm = 4,
    B8G8R8A8Unorm = 5,
    R32Float = 6,
    R16G16Float = 7,
    Z24UnormS8Uint = 8,
    D32Float = 9,
    R16G16B16A16Float = 10,
    R32G32Float = 11,
    R32G32B32A32Float = 12,
    Bc1RgbaUnorm = 13,
    Bc3RgbaUnorm = 14,
    Bc4RUnorm = 15,
    Bc5RgUnorm = 16,
    Bc7RgbaUnorm = 17,
    Etc2Rgb8Unorm = 18,
    Astc4x4RgbaUnorm = 19,
    Astc8x8RgbaUnorm = 20,
}

impl Format {
    /// Attempts to construct a format from its `u32` representation.
    /// Returns [None] if `value` is not a known format.
    /// # Examples
    /**
    ```rust
    use fd6_layout::Format;

    assert_eq!(Some(Format::R8G8B8A8Unorm), Format::new(4));
    assert_eq!(None, Format::new(1000));
    ```
    */
    pub fn new(value: u32) -> Option<Self> {
        match value {
            0 => Some(Format::R8Unorm),
            1 => Some(Format::R8G8Unorm),
            2 => Some(Format::R16Float),
            3 => Some(Format::R5G6B5Unorm),
            4 => Some(Format::R8G8B8A8Unorm),
            5 => Some(Format::B8G8R8A8Unorm),
            6 => Some(Format::R32Float),
            7 => Some(Format::R16G16Float),
            8 => Some(Format::Z24UnormS8Uint),
            9 => Some(Format::D32Float),
            10 => Some(Format::R16G16B16A16Float),
            11 => Some(Format::R32G32Float),
            12 => Some(Format::R32G32B32A32Float),
            13 => Some(Format::Bc1RgbaUnorm),
            14 => Some(Format::Bc3RgbaUnorm),
            15 => Some(Format::Bc4RUnorm),
            16 => Some(Format::Bc5RgUnorm),
            17 => Some(Format::Bc7RgbaUnorm),
            18 => Some(Format::Etc2Rgb8Unorm),
            19 => Some(Format::Astc4x4RgbaUnorm),
            20 => Some(Format::Astc8x8RgbaUnorm),
            _ => None,
        }
    }

    fn block_dimensions(self) -> (u32, u32) {
        match self {
            Format::Bc1RgbaUnorm
            | Format::Bc3RgbaUnorm
            | Format::Bc4RUnorm
            | Format::Bc5RgUnorm
            | Format::Bc7RgbaUnorm
            | Format::Etc2Rgb8Unorm
            | Format::Astc4x4RgbaUnorm => (4, 4),
            Format::Astc8x8RgbaUnorm => (8, 8),
            _ => (1, 1),
        }
    }
}

impl FormatInfo for Format {
    fn block_size(self) -> u32 {
        match self {
            Format::R8Unorm => 1,
            Format::R8G8Unorm | Format::R16Float | Format::R5G6B5Unorm => 2,
            Format::R8G8B8A8Unorm
            | Format::B8G8R8A8Unorm
            | Format::R32Float
            | Format::R16G16Float
            | Format::Z24UnormS8Uint
            | Format::D32Float => 4,
            Format::R16G16B16A16Float
            | Format::R32G32Float
            | Format::Bc1RgbaUnorm
            | Format::Bc4RUnorm
            | Format::Etc2Rgb8Unorm => 8,
            Format::R32G32B32A32Float
            | Format::Bc3RgbaUnorm
            | Format::Bc5RgUnorm
            | Format::Bc7RgbaUnorm
            | Format::Astc4x4RgbaUnorm
            | Format::Astc8x8RgbaUnorm => 16,
        }
    }

    fn block_width(self) -> u32 {
        self.block_dimensions().0
    }

    fn block_height(self) -> u32 {
        self.block_dimensions().1
    }

    fn component_count(self) -> u32 {
        match self {
            Format::R8Unorm
            | Format::R16Float
            | Format::R32Float
            | Format::D32Float
            | Format::Bc4RUnorm => 1,
            Format::R8G8Unorm
            | Format::R16G16Float
            | Format::Z24UnormS8Uint
            | Format::R32G32Float
            | Format::Bc5RgUnorm => 2,
            Format::R5G6B5Unorm | Format::Etc2Rgb8Unorm => 3,
            _ => 4,
        }
    }
}

impl FromStr for Format {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "r8" => Ok(Format::R8Unorm),
            "rg8" => Ok(Format::R8G8Unorm),
            "r16f" => Ok(Format::R16Float),
            "rgb565" => Ok(Format::R5G6B5Unorm),
            "rgba8" => Ok(Format::R8G8B8A8Unorm),
            "bgra8" => Ok(Format::B8G8R8A8Unorm),
            "r32f" => Ok(Format::R32Float),
            "rg16f" => Ok(Format::R16G16Float),
            "z24s8" => Ok(Format::Z24UnormS8Uint),
            "d32f" => Ok(Format::D32Float),
            "rgba16f" => Ok(Format::R16G16B16A16Float),
            "rg32f" => Ok(Format::R32G32Float),
            "rgba32f" => Ok(Format::R32G32B32A32Float),
            "bc1" => Ok(Format::Bc1RgbaUnorm),
            "bc3" => Ok(Format::Bc3RgbaUnorm),
            "bc4" => Ok(Format::Bc4RUnorm),
            "bc5" => Ok(Format::Bc5RgUnorm),
            "bc7" => Ok(Format::Bc7RgbaUnorm),
            "etc2" => Ok(Format::Etc2Rgb8Unorm),
            "astc4x4" => Ok(Format::Astc4x4RgbaUnorm),
            "astc8x8" => Ok(Format::Astc8x8RgbaUnorm),
            _ => Err("Unsupported format"),
        }
    }
}
