use alloc::format;
use alloc::string::String;

use crate::ktx::{KtxHeader, TextureFormat, gl_enum_name};
use crate::pixel::PixelLayout;

/// Byte order a KTX file was written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endianness {
    Little,
    Big,
}

impl Endianness {
    /// Byte order of the running machine.
    pub const fn host() -> Self {
        if cfg!(target_endian = "little") {
            Self::Little
        } else {
            Self::Big
        }
    }

    /// The opposite byte order.
    pub const fn swapped(self) -> Self {
        match self {
            Self::Little => Self::Big,
            Self::Big => Self::Little,
        }
    }

    /// Display label, e.g. "Little-Endian".
    pub fn label(self) -> &'static str {
        match self {
            Self::Little => "Little-Endian",
            Self::Big => "Big-Endian",
        }
    }
}

/// Texture metadata obtained from the header without decoding pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct ImageInfo {
    pub width: u32,
    /// Height as stored; 0 for 1D textures.
    pub height: u32,
    /// Depth as stored; 0 for non-3D textures.
    pub depth: u32,
    pub mipmap_levels: u32,
    pub array_elements: u32,
    pub faces: u32,
    pub endianness: Endianness,
    /// `glType`; 0 for compressed textures.
    pub gl_type: u32,
    /// `glFormat`; 0 for compressed textures.
    pub gl_format: u32,
    pub gl_internal_format: u32,
    pub gl_base_internal_format: u32,
    /// Resolved storage format, or `None` if no decoder handles it.
    pub format: Option<TextureFormat>,
    /// Layout the decoder produces, if the format can be decoded.
    pub native_layout: Option<PixelLayout>,
}

impl ImageInfo {
    pub(crate) fn from_header(header: &KtxHeader) -> Self {
        let format = TextureFormat::resolve(header.gl_format, header.gl_internal_format);
        Self {
            width: header.pixel_width,
            height: header.pixel_height,
            depth: header.pixel_depth,
            mipmap_levels: header.number_of_mipmap_levels,
            array_elements: header.number_of_array_elements,
            faces: header.number_of_faces,
            endianness: header.endianness(),
            gl_type: header.gl_type,
            gl_format: header.gl_format,
            gl_internal_format: header.gl_internal_format,
            gl_base_internal_format: header.gl_base_internal_format,
            format,
            native_layout: format.and_then(|f| f.output_layout()),
        }
    }

    /// Pixel format label: the GL name of the internal format, or
    /// `Unknown (0xNNNN)` when the value is not in the enum table.
    pub fn pixel_format(&self) -> String {
        pixel_format_label(self.gl_internal_format)
    }
}

pub(crate) fn pixel_format_label(gl_internal_format: u32) -> String {
    match gl_enum_name(gl_internal_format) {
        Some(name) => String::from(name),
        None => format!("Unknown (0x{gl_internal_format:04X})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_label_is_hex() {
        assert_eq!(pixel_format_label(0x1234), "Unknown (0x1234)");
        assert_eq!(pixel_format_label(0xABCDE), "Unknown (0xABCDE)");
        assert_eq!(pixel_format_label(0x8058), "RGBA8");
    }

    #[test]
    fn swapped_endianness() {
        assert_eq!(Endianness::host().swapped().swapped(), Endianness::host());
        assert_ne!(Endianness::host().swapped(), Endianness::host());
    }
}
