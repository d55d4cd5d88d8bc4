//! KTX 1.1 file header.

use crate::error::KtxError;
use crate::info::Endianness;

/// `«KTX 11»\r\n\x1A\n`
pub const KTX_IDENTIFIER: [u8; 12] = [
    0xAB, b'K', b'T', b'X', b' ', b'1', b'1', 0xBB, b'\r', b'\n', 0x1A, b'\n',
];

/// Endianness marker as written by the producing machine.
pub const KTX_ENDIAN_MAGIC: u32 = 0x0403_0201;

/// Size of the fixed header in bytes.
pub const HEADER_SIZE: usize = 64;

/// Parsed KTX header.
///
/// After [`KtxHeader::parse`] every field except `endianness` is in host
/// byte order. `endianness` keeps the value as read so the source byte
/// order stays recoverable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KtxHeader {
    pub identifier: [u8; 12],
    pub endianness: u32,
    pub gl_type: u32,
    pub gl_type_size: u32,
    pub gl_format: u32,
    pub gl_internal_format: u32,
    pub gl_base_internal_format: u32,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub pixel_depth: u32,
    pub number_of_array_elements: u32,
    pub number_of_faces: u32,
    pub number_of_mipmap_levels: u32,
    pub bytes_of_key_value_data: u32,
}

/// Check whether `data` starts with a KTX header this crate understands.
///
/// Only sniffs: identifier and endianness marker. Never fails.
pub fn is_supported(data: &[u8]) -> bool {
    if data.len() < HEADER_SIZE || data[..12] != KTX_IDENTIFIER {
        return false;
    }
    let marker = read_u32_ne(data, 12);
    marker == KTX_ENDIAN_MAGIC || marker == KTX_ENDIAN_MAGIC.swap_bytes()
}

fn read_u32_ne(data: &[u8], offset: usize) -> u32 {
    u32::from_ne_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

impl KtxHeader {
    /// Parse and normalize a header from the first 64 bytes of `data`.
    pub fn parse(data: &[u8]) -> Result<Self, KtxError> {
        if data.len() < HEADER_SIZE {
            return Err(KtxError::UnexpectedEof);
        }
        if !is_supported(data) {
            return Err(KtxError::UnrecognizedFormat);
        }
        let mut header = Self::read_raw(data);
        header.normalize();
        log::trace!(
            "KTX header: {}x{}x{} glFormat=0x{:04X} glInternalFormat=0x{:04X} kv={} ({})",
            header.pixel_width,
            header.pixel_height,
            header.pixel_depth,
            header.gl_format,
            header.gl_internal_format,
            header.bytes_of_key_value_data,
            header.endianness().label(),
        );
        Ok(header)
    }

    /// Read all fields in host byte order, without any swapping.
    fn read_raw(data: &[u8]) -> Self {
        let mut identifier = [0u8; 12];
        identifier.copy_from_slice(&data[..12]);
        let field = |index: usize| read_u32_ne(data, 12 + index * 4);
        Self {
            identifier,
            endianness: field(0),
            gl_type: field(1),
            gl_type_size: field(2),
            gl_format: field(3),
            gl_internal_format: field(4),
            gl_base_internal_format: field(5),
            pixel_width: field(6),
            pixel_height: field(7),
            pixel_depth: field(8),
            number_of_array_elements: field(9),
            number_of_faces: field(10),
            number_of_mipmap_levels: field(11),
            bytes_of_key_value_data: field(12),
        }
    }

    /// Byteswap every field except the marker if the file's byte order
    /// differs from the host's.
    fn normalize(&mut self) {
        if !self.needs_byteswap() {
            return;
        }
        for field in [
            &mut self.gl_type,
            &mut self.gl_type_size,
            &mut self.gl_format,
            &mut self.gl_internal_format,
            &mut self.gl_base_internal_format,
            &mut self.pixel_width,
            &mut self.pixel_height,
            &mut self.pixel_depth,
            &mut self.number_of_array_elements,
            &mut self.number_of_faces,
            &mut self.number_of_mipmap_levels,
            &mut self.bytes_of_key_value_data,
        ] {
            *field = field.swap_bytes();
        }
    }

    /// Whether the file was written in the opposite byte order of the host.
    pub fn needs_byteswap(&self) -> bool {
        self.endianness != KTX_ENDIAN_MAGIC
    }

    /// Byte order the file was written in.
    pub fn endianness(&self) -> Endianness {
        if self.needs_byteswap() {
            Endianness::host().swapped()
        } else {
            Endianness::host()
        }
    }

    /// Convert a u32 read in host order from the file body into its logical value.
    pub(crate) fn fix_u32(&self, raw: u32) -> u32 {
        if self.needs_byteswap() {
            raw.swap_bytes()
        } else {
            raw
        }
    }

    /// Offset of the image-size field of mipmap level 0.
    ///
    /// Always 4-byte aligned and never inside the header.
    pub fn texture_data_offset(&self) -> u64 {
        (HEADER_SIZE as u64 + u64::from(self.bytes_of_key_value_data)).next_multiple_of(4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn raw_header(fields: [u32; 13], foreign: bool) -> Vec<u8> {
        let mut out = KTX_IDENTIFIER.to_vec();
        for v in fields {
            let v = if foreign { v.swap_bytes() } else { v };
            out.extend_from_slice(&v.to_ne_bytes());
        }
        out
    }

    const FIELDS: [u32; 13] = [
        KTX_ENDIAN_MAGIC,
        0x1401,
        1,
        0x1908,
        0x8058,
        0x1908,
        64,
        32,
        0,
        0,
        1,
        1,
        20,
    ];

    #[test]
    fn sniff_native_and_swapped() {
        assert!(is_supported(&raw_header(FIELDS, false)));
        assert!(is_supported(&raw_header(FIELDS, true)));
    }

    #[test]
    fn sniff_rejects_bad_input() {
        let good = raw_header(FIELDS, false);
        assert!(!is_supported(&good[..63]));
        assert!(!is_supported(&[]));

        let mut bad_magic = good.clone();
        bad_magic[5] = b'2';
        assert!(!is_supported(&bad_magic));

        let mut bad_marker = good.clone();
        bad_marker[12..16].copy_from_slice(&0x0102_0403u32.to_ne_bytes());
        assert!(!is_supported(&bad_marker));
    }

    #[test]
    fn foreign_byte_order_normalizes() {
        let native = KtxHeader::parse(&raw_header(FIELDS, false)).unwrap();
        let foreign = KtxHeader::parse(&raw_header(FIELDS, true)).unwrap();

        assert!(!native.needs_byteswap());
        assert!(foreign.needs_byteswap());
        assert_eq!(foreign.endianness, KTX_ENDIAN_MAGIC.swap_bytes());
        assert_eq!(native.endianness(), Endianness::host());
        assert_eq!(foreign.endianness(), Endianness::host().swapped());

        let logical = KtxHeader {
            endianness: native.endianness,
            ..foreign
        };
        assert_eq!(logical, native);
        assert_eq!(foreign.pixel_width, 64);
        assert_eq!(foreign.gl_internal_format, 0x8058);
    }

    #[test]
    fn texture_offset_is_aligned() {
        let mut header = KtxHeader::parse(&raw_header(FIELDS, false)).unwrap();
        assert_eq!(header.texture_data_offset(), 84);
        header.bytes_of_key_value_data = 21;
        assert_eq!(header.texture_data_offset(), 88);
        header.bytes_of_key_value_data = u32::MAX;
        assert_eq!(header.texture_data_offset(), 64 + u64::from(u32::MAX) + 1);
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            KtxHeader::parse(&[0u8; 10]),
            Err(KtxError::UnexpectedEof)
        ));
        assert!(matches!(
            KtxHeader::parse(&[0u8; 64]),
            Err(KtxError::UnrecognizedFormat)
        ));
    }
}
