//! Resolution of (glFormat, glInternalFormat) into a decodable texture format.
//!
//! Uncompressed formats are selected by `glFormat`. Anything else (normally
//! `glFormat == 0`) is looked up by `glInternalFormat`, first into a size
//! class and then into a concrete block codec.

use super::glenum::*;
use crate::pixel::PixelLayout;

/// Block-compressed codecs.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Codec {
    /// BC1 without alpha.
    Dxt1,
    /// BC1 with 1-bit alpha.
    Dxt1A,
    /// BC2
    Dxt3,
    /// BC3
    Dxt5,
    Etc1,
    Etc2Rgb,
    /// ETC2 RGB with punchthrough (1-bit) alpha.
    Etc2RgbA1,
    /// ETC2 RGB with an EAC alpha block.
    Etc2Rgba,
    /// Single-channel EAC. Sized, but not decoded.
    EacR11,
    /// Two-channel EAC. Sized, but not decoded.
    EacRg11,
    /// RGTC1, red only.
    Bc4,
    /// RGTC2, red and green.
    Bc5,
    /// BC4 data interpreted as luminance.
    Latc1,
    /// BC5 data interpreted as luminance + alpha.
    Latc2,
}

/// Fixed-ratio size class of a block codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockFamily {
    /// 4x4 pixels in 64 bits.
    Bpp4,
    /// 4x4 pixels in 128 bits.
    Bpp8,
}

impl BlockFamily {
    /// Bytes per 4x4 block.
    pub fn block_bytes(self) -> usize {
        match self {
            Self::Bpp4 => 8,
            Self::Bpp8 => 16,
        }
    }
}

impl Codec {
    /// Look up a compressed `glInternalFormat`.
    pub fn from_internal_format(gl_internal_format: u32) -> Option<Self> {
        let codec = match gl_internal_format {
            GL_RGB_S3TC | GL_RGB4_S3TC | GL_COMPRESSED_RGB_S3TC_DXT1_EXT => Self::Dxt1,
            GL_COMPRESSED_RGBA_S3TC_DXT1_EXT => Self::Dxt1A,
            GL_COMPRESSED_RGBA_S3TC_DXT3_EXT => Self::Dxt3,
            GL_RGBA_DXT5_S3TC | GL_RGBA4_DXT5_S3TC | GL_COMPRESSED_RGBA_S3TC_DXT5_EXT => {
                Self::Dxt5
            }
            GL_ETC1_RGB8_OES => Self::Etc1,
            GL_COMPRESSED_RGB8_ETC2 | GL_COMPRESSED_SRGB8_ETC2 => Self::Etc2Rgb,
            GL_COMPRESSED_RGB8_PUNCHTHROUGH_ALPHA1_ETC2
            | GL_COMPRESSED_SRGB8_PUNCHTHROUGH_ALPHA1_ETC2 => Self::Etc2RgbA1,
            GL_COMPRESSED_RGBA8_ETC2_EAC | GL_COMPRESSED_SRGB8_ALPHA8_ETC2_EAC => Self::Etc2Rgba,
            GL_COMPRESSED_R11_EAC | GL_COMPRESSED_SIGNED_R11_EAC => Self::EacR11,
            GL_COMPRESSED_RG11_EAC | GL_COMPRESSED_SIGNED_RG11_EAC => Self::EacRg11,
            // Signed variants are decoded as unsigned.
            GL_COMPRESSED_RED_RGTC1 | GL_COMPRESSED_SIGNED_RED_RGTC1 => Self::Bc4,
            GL_COMPRESSED_RG_RGTC2 | GL_COMPRESSED_SIGNED_RG_RGTC2 => Self::Bc5,
            GL_COMPRESSED_LUMINANCE_LATC1_EXT | GL_COMPRESSED_SIGNED_LUMINANCE_LATC1_EXT => {
                Self::Latc1
            }
            GL_COMPRESSED_LUMINANCE_ALPHA_LATC2_EXT
            | GL_COMPRESSED_SIGNED_LUMINANCE_ALPHA_LATC2_EXT => Self::Latc2,
            _ => return None,
        };
        Some(codec)
    }

    pub fn family(self) -> BlockFamily {
        match self {
            Self::Dxt1
            | Self::Dxt1A
            | Self::Etc1
            | Self::Etc2Rgb
            | Self::Etc2RgbA1
            | Self::EacR11
            | Self::Bc4
            | Self::Latc1 => BlockFamily::Bpp4,
            Self::Dxt3
            | Self::Dxt5
            | Self::Etc2Rgba
            | Self::EacRg11
            | Self::Bc5
            | Self::Latc2 => BlockFamily::Bpp8,
        }
    }

    /// Layout produced by the decoder, or `None` if there is no decoder.
    pub fn output_layout(self) -> Option<PixelLayout> {
        match self {
            Self::EacR11 | Self::EacRg11 => None,
            Self::Latc1 => Some(PixelLayout::Gray8),
            Self::Latc2 => Some(PixelLayout::GrayAlpha8),
            _ => Some(PixelLayout::Rgba8),
        }
    }
}

/// Storage format of the top-level image.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    /// `GL_RGB`, 3 bytes per pixel, rows padded to 4 bytes.
    Rgb8,
    /// `GL_RGBA`, 4 bytes per pixel.
    Rgba8,
    /// `GL_LUMINANCE`, 1 byte per pixel, rows padded to 4 bytes.
    Luminance8,
    Compressed(Codec),
}

impl TextureFormat {
    /// Resolve the header's format fields. `None` means unsupported.
    pub fn resolve(gl_format: u32, gl_internal_format: u32) -> Option<Self> {
        match gl_format {
            GL_RGB => Some(Self::Rgb8),
            GL_RGBA => Some(Self::Rgba8),
            GL_LUMINANCE => Some(Self::Luminance8),
            _ => Codec::from_internal_format(gl_internal_format).map(Self::Compressed),
        }
    }

    /// Bytes per row as stored in the file.
    ///
    /// For compressed formats this is the size of one row of 4x4 blocks.
    pub fn stride(self, width: u32) -> Option<usize> {
        let width = width as usize;
        match self {
            Self::Rgb8 => width.checked_mul(3).map(|w| w.next_multiple_of(4)),
            Self::Rgba8 => width.checked_mul(4),
            Self::Luminance8 => Some(width.next_multiple_of(4)),
            Self::Compressed(codec) => width
                .div_ceil(4)
                .checked_mul(codec.family().block_bytes()),
        }
    }

    /// Encoded byte size of a `width` x `height` image.
    pub fn expected_size(self, width: u32, height: u32) -> Option<usize> {
        let pixels = (width as usize).checked_mul(height as usize)?;
        match self {
            Self::Rgb8 | Self::Rgba8 | Self::Luminance8 => {
                self.stride(width)?.checked_mul(height as usize)
            }
            Self::Compressed(codec) => match codec.family() {
                BlockFamily::Bpp4 => Some(pixels / 2),
                BlockFamily::Bpp8 => Some(pixels),
            },
        }
    }

    pub fn output_layout(self) -> Option<PixelLayout> {
        match self {
            Self::Rgb8 => Some(PixelLayout::Rgb8),
            Self::Rgba8 => Some(PixelLayout::Rgba8),
            Self::Luminance8 => Some(PixelLayout::Gray8),
            Self::Compressed(codec) => codec.output_layout(),
        }
    }
}
