//! OpenGL enum values that appear in KTX headers.
//!
//! Only the subset relevant to texture storage is listed: pixel types,
//! base formats, sized internal formats and the compressed formats the
//! decoders understand (plus a few common ones for display).

// Pixel types (glType).
pub const GL_BYTE: u32 = 0x1400;
pub const GL_UNSIGNED_BYTE: u32 = 0x1401;
pub const GL_SHORT: u32 = 0x1402;
pub const GL_UNSIGNED_SHORT: u32 = 0x1403;
pub const GL_INT: u32 = 0x1404;
pub const GL_UNSIGNED_INT: u32 = 0x1405;
pub const GL_FLOAT: u32 = 0x1406;
pub const GL_HALF_FLOAT: u32 = 0x140B;
pub const GL_UNSIGNED_SHORT_4_4_4_4: u32 = 0x8033;
pub const GL_UNSIGNED_SHORT_5_5_5_1: u32 = 0x8034;
pub const GL_UNSIGNED_SHORT_5_6_5: u32 = 0x8363;

// Base formats (glFormat / glBaseInternalFormat).
pub const GL_RED: u32 = 0x1903;
pub const GL_ALPHA: u32 = 0x1906;
pub const GL_RGB: u32 = 0x1907;
pub const GL_RGBA: u32 = 0x1908;
pub const GL_LUMINANCE: u32 = 0x1909;
pub const GL_LUMINANCE_ALPHA: u32 = 0x190A;
pub const GL_RG: u32 = 0x8227;
pub const GL_BGRA: u32 = 0x80E1;

// Sized internal formats.
pub const GL_LUMINANCE8: u32 = 0x8040;
pub const GL_LUMINANCE8_ALPHA8: u32 = 0x8045;
pub const GL_RGB8: u32 = 0x8051;
pub const GL_RGBA4: u32 = 0x8056;
pub const GL_RGB5_A1: u32 = 0x8057;
pub const GL_RGBA8: u32 = 0x8058;
pub const GL_R8: u32 = 0x8229;
pub const GL_RG8: u32 = 0x822B;
pub const GL_RGB565: u32 = 0x8D62;
pub const GL_SRGB8: u32 = 0x8C41;
pub const GL_SRGB8_ALPHA8: u32 = 0x8C43;

// S3TC (legacy 3Dfx / S3 enums).
pub const GL_RGB_S3TC: u32 = 0x83A0;
pub const GL_RGB4_S3TC: u32 = 0x83A1;
pub const GL_RGBA_S3TC: u32 = 0x83A2;
pub const GL_RGBA4_S3TC: u32 = 0x83A3;
pub const GL_RGBA_DXT5_S3TC: u32 = 0x83A4;
pub const GL_RGBA4_DXT5_S3TC: u32 = 0x83A5;

// EXT_texture_compression_s3tc
pub const GL_COMPRESSED_RGB_S3TC_DXT1_EXT: u32 = 0x83F0;
pub const GL_COMPRESSED_RGBA_S3TC_DXT1_EXT: u32 = 0x83F1;
pub const GL_COMPRESSED_RGBA_S3TC_DXT3_EXT: u32 = 0x83F2;
pub const GL_COMPRESSED_RGBA_S3TC_DXT5_EXT: u32 = 0x83F3;

// OES_compressed_ETC1_RGB8_texture
pub const GL_ETC1_RGB8_OES: u32 = 0x8D64;

// ETC2 / EAC
pub const GL_COMPRESSED_R11_EAC: u32 = 0x9270;
pub const GL_COMPRESSED_SIGNED_R11_EAC: u32 = 0x9271;
pub const GL_COMPRESSED_RG11_EAC: u32 = 0x9272;
pub const GL_COMPRESSED_SIGNED_RG11_EAC: u32 = 0x9273;
pub const GL_COMPRESSED_RGB8_ETC2: u32 = 0x9274;
pub const GL_COMPRESSED_SRGB8_ETC2: u32 = 0x9275;
pub const GL_COMPRESSED_RGB8_PUNCHTHROUGH_ALPHA1_ETC2: u32 = 0x9276;
pub const GL_COMPRESSED_SRGB8_PUNCHTHROUGH_ALPHA1_ETC2: u32 = 0x9277;
pub const GL_COMPRESSED_RGBA8_ETC2_EAC: u32 = 0x9278;
pub const GL_COMPRESSED_SRGB8_ALPHA8_ETC2_EAC: u32 = 0x9279;

// RGTC
pub const GL_COMPRESSED_RED_RGTC1: u32 = 0x8DBB;
pub const GL_COMPRESSED_SIGNED_RED_RGTC1: u32 = 0x8DBC;
pub const GL_COMPRESSED_RG_RGTC2: u32 = 0x8DBD;
pub const GL_COMPRESSED_SIGNED_RG_RGTC2: u32 = 0x8DBE;

// LATC
pub const GL_COMPRESSED_LUMINANCE_LATC1_EXT: u32 = 0x8C70;
pub const GL_COMPRESSED_SIGNED_LUMINANCE_LATC1_EXT: u32 = 0x8C71;
pub const GL_COMPRESSED_LUMINANCE_ALPHA_LATC2_EXT: u32 = 0x8C72;
pub const GL_COMPRESSED_SIGNED_LUMINANCE_ALPHA_LATC2_EXT: u32 = 0x8C73;

// BPTC (display only)
pub const GL_COMPRESSED_RGBA_BPTC_UNORM: u32 = 0x8E8C;
pub const GL_COMPRESSED_SRGB_ALPHA_BPTC_UNORM: u32 = 0x8E8D;

/// Look up the symbolic name of a GL enum value.
///
/// Returns `None` for values not in the table. The names drop the `GL_`
/// prefix, matching how the values are usually shown to users.
pub fn gl_enum_name(value: u32) -> Option<&'static str> {
    let name = match value {
        GL_BYTE => "BYTE",
        GL_UNSIGNED_BYTE => "UNSIGNED_BYTE",
        GL_SHORT => "SHORT",
        GL_UNSIGNED_SHORT => "UNSIGNED_SHORT",
        GL_INT => "INT",
        GL_UNSIGNED_INT => "UNSIGNED_INT",
        GL_FLOAT => "FLOAT",
        GL_HALF_FLOAT => "HALF_FLOAT",
        GL_UNSIGNED_SHORT_4_4_4_4 => "UNSIGNED_SHORT_4_4_4_4",
        GL_UNSIGNED_SHORT_5_5_5_1 => "UNSIGNED_SHORT_5_5_5_1",
        GL_UNSIGNED_SHORT_5_6_5 => "UNSIGNED_SHORT_5_6_5",

        GL_RED => "RED",
        GL_ALPHA => "ALPHA",
        GL_RGB => "RGB",
        GL_RGBA => "RGBA",
        GL_LUMINANCE => "LUMINANCE",
        GL_LUMINANCE_ALPHA => "LUMINANCE_ALPHA",
        GL_RG => "RG",
        GL_BGRA => "BGRA",

        GL_LUMINANCE8 => "LUMINANCE8",
        GL_LUMINANCE8_ALPHA8 => "LUMINANCE8_ALPHA8",
        GL_RGB8 => "RGB8",
        GL_RGBA4 => "RGBA4",
        GL_RGB5_A1 => "RGB5_A1",
        GL_RGBA8 => "RGBA8",
        GL_R8 => "R8",
        GL_RG8 => "RG8",
        GL_RGB565 => "RGB565",
        GL_SRGB8 => "SRGB8",
        GL_SRGB8_ALPHA8 => "SRGB8_ALPHA8",

        GL_RGB_S3TC => "RGB_S3TC",
        GL_RGB4_S3TC => "RGB4_S3TC",
        GL_RGBA_S3TC => "RGBA_S3TC",
        GL_RGBA4_S3TC => "RGBA4_S3TC",
        GL_RGBA_DXT5_S3TC => "RGBA_DXT5_S3TC",
        GL_RGBA4_DXT5_S3TC => "RGBA4_DXT5_S3TC",

        GL_COMPRESSED_RGB_S3TC_DXT1_EXT => "COMPRESSED_RGB_S3TC_DXT1_EXT",
        GL_COMPRESSED_RGBA_S3TC_DXT1_EXT => "COMPRESSED_RGBA_S3TC_DXT1_EXT",
        GL_COMPRESSED_RGBA_S3TC_DXT3_EXT => "COMPRESSED_RGBA_S3TC_DXT3_EXT",
        GL_COMPRESSED_RGBA_S3TC_DXT5_EXT => "COMPRESSED_RGBA_S3TC_DXT5_EXT",

        GL_ETC1_RGB8_OES => "ETC1_RGB8_OES",

        GL_COMPRESSED_R11_EAC => "COMPRESSED_R11_EAC",
        GL_COMPRESSED_SIGNED_R11_EAC => "COMPRESSED_SIGNED_R11_EAC",
        GL_COMPRESSED_RG11_EAC => "COMPRESSED_RG11_EAC",
        GL_COMPRESSED_SIGNED_RG11_EAC => "COMPRESSED_SIGNED_RG11_EAC",
        GL_COMPRESSED_RGB8_ETC2 => "COMPRESSED_RGB8_ETC2",
        GL_COMPRESSED_SRGB8_ETC2 => "COMPRESSED_SRGB8_ETC2",
        GL_COMPRESSED_RGB8_PUNCHTHROUGH_ALPHA1_ETC2 => "COMPRESSED_RGB8_PUNCHTHROUGH_ALPHA1_ETC2",
        GL_COMPRESSED_SRGB8_PUNCHTHROUGH_ALPHA1_ETC2 => {
            "COMPRESSED_SRGB8_PUNCHTHROUGH_ALPHA1_ETC2"
        }
        GL_COMPRESSED_RGBA8_ETC2_EAC => "COMPRESSED_RGBA8_ETC2_EAC",
        GL_COMPRESSED_SRGB8_ALPHA8_ETC2_EAC => "COMPRESSED_SRGB8_ALPHA8_ETC2_EAC",

        GL_COMPRESSED_RED_RGTC1 => "COMPRESSED_RED_RGTC1",
        GL_COMPRESSED_SIGNED_RED_RGTC1 => "COMPRESSED_SIGNED_RED_RGTC1",
        GL_COMPRESSED_RG_RGTC2 => "COMPRESSED_RG_RGTC2",
        GL_COMPRESSED_SIGNED_RG_RGTC2 => "COMPRESSED_SIGNED_RG_RGTC2",

        GL_COMPRESSED_LUMINANCE_LATC1_EXT => "COMPRESSED_LUMINANCE_LATC1_EXT",
        GL_COMPRESSED_SIGNED_LUMINANCE_LATC1_EXT => "COMPRESSED_SIGNED_LUMINANCE_LATC1_EXT",
        GL_COMPRESSED_LUMINANCE_ALPHA_LATC2_EXT => "COMPRESSED_LUMINANCE_ALPHA_LATC2_EXT",
        GL_COMPRESSED_SIGNED_LUMINANCE_ALPHA_LATC2_EXT => {
            "COMPRESSED_SIGNED_LUMINANCE_ALPHA_LATC2_EXT"
        }

        GL_COMPRESSED_RGBA_BPTC_UNORM => "COMPRESSED_RGBA_BPTC_UNORM",
        GL_COMPRESSED_SRGB_ALPHA_BPTC_UNORM => "COMPRESSED_SRGB_ALPHA_BPTC_UNORM",

        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names() {
        assert_eq!(gl_enum_name(GL_RGBA8), Some("RGBA8"));
        assert_eq!(
            gl_enum_name(GL_COMPRESSED_RGB8_ETC2),
            Some("COMPRESSED_RGB8_ETC2")
        );
        assert_eq!(gl_enum_name(0x1234), None);
        assert_eq!(gl_enum_name(0), None);
    }
}
