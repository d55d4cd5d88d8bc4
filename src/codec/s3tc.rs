//! S3TC / DXTn (BC1-BC3) block decoding.
//!
//! Colour endpoints are RGB565, interpolated after expansion to 8 bits.

use super::block::{Rgba4x4, expand5, expand6};

fn rgb565(c: u16) -> [u8; 3] {
    [
        expand5((c >> 11) as u8 & 0x1F),
        expand6((c >> 5) as u8 & 0x3F),
        expand5(c as u8 & 0x1F),
    ]
}

fn mix(a: [u8; 3], b: [u8; 3], wa: u16, wb: u16) -> [u8; 3] {
    let div = wa + wb;
    let ch = |i: usize| ((u16::from(a[i]) * wa + u16::from(b[i]) * wb) / div) as u8;
    [ch(0), ch(1), ch(2)]
}

/// How the third-colour mode (`c0 <= c1`) treats index 3.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColorMode {
    /// Index 3 is opaque black (DXT1 without alpha).
    Opaque,
    /// Index 3 is transparent black (DXT1 with 1-bit alpha).
    PunchThrough,
    /// Always four colours (the colour half of DXT3/DXT5).
    FourColor,
}

/// Decode the 8-byte colour part of a BC1/BC2/BC3 block.
pub(crate) fn decode_color_block(block: &[u8; 8], mode: ColorMode) -> Rgba4x4 {
    let c0 = u16::from_le_bytes([block[0], block[1]]);
    let c1 = u16::from_le_bytes([block[2], block[3]]);
    let indices = u32::from_le_bytes([block[4], block[5], block[6], block[7]]);

    let e0 = rgb565(c0);
    let e1 = rgb565(c1);
    let with_alpha = |c: [u8; 3], a: u8| [c[0], c[1], c[2], a];

    let palette = if c0 > c1 || mode == ColorMode::FourColor {
        [
            with_alpha(e0, 255),
            with_alpha(e1, 255),
            with_alpha(mix(e0, e1, 2, 1), 255),
            with_alpha(mix(e0, e1, 1, 2), 255),
        ]
    } else {
        let last = match mode {
            ColorMode::PunchThrough => [0, 0, 0, 0],
            _ => [0, 0, 0, 255],
        };
        [
            with_alpha(e0, 255),
            with_alpha(e1, 255),
            with_alpha(mix(e0, e1, 1, 1), 255),
            last,
        ]
    };

    let mut out = [[0u8; 4]; 16];
    for (i, px) in out.iter_mut().enumerate() {
        *px = palette[((indices >> (2 * i)) & 0x3) as usize];
    }
    out
}

/// Decode an 8-byte interpolated alpha block (the alpha half of BC3, and
/// each channel of BC4/BC5) into 16 values, row-major.
pub(crate) fn decode_interpolated_channel(block: &[u8; 8]) -> [u8; 16] {
    let a0 = u16::from(block[0]);
    let a1 = u16::from(block[1]);
    let mut palette = [0u8; 8];
    palette[0] = a0 as u8;
    palette[1] = a1 as u8;
    if a0 > a1 {
        for i in 1..7u16 {
            palette[i as usize + 1] = (((7 - i) * a0 + i * a1) / 7) as u8;
        }
    } else {
        for i in 1..5u16 {
            palette[i as usize + 1] = (((5 - i) * a0 + i * a1) / 5) as u8;
        }
        palette[6] = 0;
        palette[7] = 255;
    }

    let bits = u64::from_le_bytes([
        block[2], block[3], block[4], block[5], block[6], block[7], 0, 0,
    ]);
    let mut out = [0u8; 16];
    for (i, v) in out.iter_mut().enumerate() {
        *v = palette[((bits >> (3 * i)) & 0x7) as usize];
    }
    out
}

/// Split a 16-byte block into its two 8-byte halves.
pub(crate) fn split(block: &[u8; 16]) -> ([u8; 8], [u8; 8]) {
    let mut lo = [0u8; 8];
    let mut hi = [0u8; 8];
    lo.copy_from_slice(&block[..8]);
    hi.copy_from_slice(&block[8..]);
    (lo, hi)
}

pub(crate) fn decode_dxt1(block: &[u8; 8]) -> Rgba4x4 {
    decode_color_block(block, ColorMode::Opaque)
}

pub(crate) fn decode_dxt1a(block: &[u8; 8]) -> Rgba4x4 {
    decode_color_block(block, ColorMode::PunchThrough)
}

/// DXT3: 64 bits of explicit 4-bit alpha, then a colour block.
pub(crate) fn decode_dxt3(block: &[u8; 16]) -> Rgba4x4 {
    let (alpha, color) = split(block);
    let mut out = decode_color_block(&color, ColorMode::FourColor);
    let bits = u64::from_le_bytes(alpha);
    for (i, px) in out.iter_mut().enumerate() {
        px[3] = ((bits >> (4 * i)) & 0xF) as u8 * 17;
    }
    out
}

/// DXT5: interpolated alpha block, then a colour block.
pub(crate) fn decode_dxt5(block: &[u8; 16]) -> Rgba4x4 {
    let (alpha, color) = split(block);
    let mut out = decode_color_block(&color, ColorMode::FourColor);
    let alpha = decode_interpolated_channel(&alpha);
    for (px, a) in out.iter_mut().zip(alpha) {
        px[3] = a;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color_block(c0: u16, c1: u16, indices: u32) -> [u8; 8] {
        let mut b = [0u8; 8];
        b[0..2].copy_from_slice(&c0.to_le_bytes());
        b[2..4].copy_from_slice(&c1.to_le_bytes());
        b[4..8].copy_from_slice(&indices.to_le_bytes());
        b
    }

    #[test]
    fn dxt1_four_color() {
        // c0 = pure red, c1 = black, indices cycle 0,1,2,3.
        let block = color_block(0xF800, 0x0000, 0xE4E4_E4E4);
        let out = decode_dxt1(&block);
        assert_eq!(out[0], [255, 0, 0, 255]);
        assert_eq!(out[1], [0, 0, 0, 255]);
        assert_eq!(out[2], [170, 0, 0, 255]);
        assert_eq!(out[3], [85, 0, 0, 255]);
    }

    #[test]
    fn dxt1_three_color_alpha_modes() {
        // c0 <= c1 selects three-colour mode; index 3 everywhere.
        let block = color_block(0x0000, 0x001F, 0xFFFF_FFFF);
        assert_eq!(decode_dxt1(&block)[5], [0, 0, 0, 255]);
        assert_eq!(decode_dxt1a(&block)[5], [0, 0, 0, 0]);

        // Index 2 is the midpoint.
        let block = color_block(0x0000, 0x001F, 0xAAAA_AAAA);
        assert_eq!(decode_dxt1(&block)[0], [0, 0, 127, 255]);
    }

    #[test]
    fn dxt3_explicit_alpha() {
        let mut block = [0u8; 16];
        // Pixel 0 alpha 0xF, pixel 1 alpha 0x8.
        block[0] = 0x8F;
        block[8..16].copy_from_slice(&color_block(0xFFFF, 0xFFFF, 0));
        let out = decode_dxt3(&block);
        assert_eq!(out[0], [255, 255, 255, 255]);
        assert_eq!(out[1][3], 0x88);
        assert_eq!(out[2][3], 0);
    }

    #[test]
    fn interpolated_alpha_eight_value_mode() {
        // a0 = 255, a1 = 0; index i for pixel i (pixels 0..8).
        let mut block = [255u8, 0, 0, 0, 0, 0, 0, 0];
        let mut bits: u64 = 0;
        for i in 0..8u64 {
            bits |= i << (3 * i);
        }
        block[2..8].copy_from_slice(&bits.to_le_bytes()[..6]);
        let out = decode_interpolated_channel(&block);
        assert_eq!(&out[..8], &[255, 0, 218, 182, 145, 109, 72, 36]);
    }

    #[test]
    fn interpolated_alpha_six_value_mode() {
        let mut block = [0u8, 255, 0, 0, 0, 0, 0, 0];
        let mut bits: u64 = 0;
        for i in 0..8u64 {
            bits |= i << (3 * i);
        }
        block[2..8].copy_from_slice(&bits.to_le_bytes()[..6]);
        let out = decode_interpolated_channel(&block);
        assert_eq!(&out[..8], &[0, 255, 51, 102, 153, 204, 0, 255]);
    }

    #[test]
    fn dxt5_combines_halves() {
        let mut block = [0u8; 16];
        block[0] = 128;
        block[1] = 128;
        block[8..16].copy_from_slice(&color_block(0x07E0, 0x07E0, 0));
        let out = decode_dxt5(&block);
        assert!(out.iter().all(|px| *px == [0, 255, 0, 128]));
    }
}
