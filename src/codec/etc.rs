//! ETC1, ETC2 (RGB, punchthrough alpha, RGBA with EAC alpha) block decoding.
//!
//! ETC blocks are big-endian 64-bit words. Pixel indices are stored
//! column-major (`k = x * 4 + y`), with the index MSBs in bits 31..16 and
//! the LSBs in bits 15..0. Output is row-major like the other decoders.

use super::block::{Rgba4x4, clamp_u8, expand4, expand5, expand6};
use super::s3tc::split;

const MODIFIERS: [[i32; 2]; 8] = [
    [2, 8],
    [5, 17],
    [9, 29],
    [13, 42],
    [18, 60],
    [24, 80],
    [33, 106],
    [47, 183],
];

/// T and H mode distances.
const DISTANCES: [i32; 8] = [3, 6, 11, 16, 23, 32, 41, 64];

const EAC_MODIFIERS: [[i32; 8]; 16] = [
    [-3, -6, -9, -15, 2, 5, 8, 14],
    [-3, -7, -10, -13, 2, 6, 9, 12],
    [-2, -5, -8, -13, 1, 4, 7, 12],
    [-2, -4, -6, -13, 1, 3, 5, 12],
    [-3, -6, -8, -12, 2, 5, 7, 11],
    [-3, -7, -9, -11, 2, 6, 8, 10],
    [-4, -7, -8, -11, 3, 6, 7, 10],
    [-3, -5, -8, -11, 2, 4, 7, 10],
    [-2, -6, -8, -10, 1, 5, 7, 9],
    [-2, -5, -8, -10, 1, 4, 7, 9],
    [-2, -4, -8, -10, 1, 3, 7, 9],
    [-2, -5, -7, -10, 1, 4, 6, 9],
    [-3, -4, -7, -10, 2, 3, 6, 9],
    [-1, -2, -3, -10, 0, 1, 2, 9],
    [-4, -6, -8, -9, 3, 5, 7, 8],
    [-3, -5, -7, -9, 2, 4, 6, 8],
];

const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

#[derive(Clone, Copy, PartialEq, Eq)]
enum Variant {
    Etc1,
    Etc2,
    /// Bit 33 is the opaque flag instead of the differential flag.
    Etc2PunchThrough,
}

#[inline]
fn bits(v: u64, shift: u32, mask: u64) -> u8 {
    ((v >> shift) & mask) as u8
}

/// 3-bit two's complement delta.
#[inline]
fn delta3(v: u8) -> i32 {
    (i32::from(v) << 29) >> 29
}

#[inline]
fn expand7(v: u8) -> u8 {
    (v << 1) | (v >> 6)
}

/// 2-bit pixel index for pixel (x, y).
#[inline]
fn pixel_index(v: u64, x: usize, y: usize) -> usize {
    let k = x * 4 + y;
    let msb = (v >> (16 + k)) & 1;
    let lsb = (v >> k) & 1;
    ((msb << 1) | lsb) as usize
}

fn offset(c: [u8; 3], d: i32) -> [u8; 4] {
    [
        clamp_u8(i32::from(c[0]) + d),
        clamp_u8(i32::from(c[1]) + d),
        clamp_u8(i32::from(c[2]) + d),
        255,
    ]
}

fn decode_rgb(block: &[u8; 8], variant: Variant) -> Rgba4x4 {
    let v = u64::from_be_bytes(*block);
    let flag = (v >> 33) & 1 == 1;
    let (differential, opaque) = match variant {
        Variant::Etc1 | Variant::Etc2 => (flag, true),
        Variant::Etc2PunchThrough => (true, flag),
    };

    if !differential {
        let c1 = [
            expand4(bits(v, 60, 0xF)),
            expand4(bits(v, 52, 0xF)),
            expand4(bits(v, 44, 0xF)),
        ];
        let c2 = [
            expand4(bits(v, 56, 0xF)),
            expand4(bits(v, 48, 0xF)),
            expand4(bits(v, 40, 0xF)),
        ];
        return decode_subblocks(v, c1, c2, true);
    }

    let r = i32::from(bits(v, 59, 0x1F));
    let g = i32::from(bits(v, 51, 0x1F));
    let b = i32::from(bits(v, 43, 0x1F));
    let r2 = r + delta3(bits(v, 56, 0x7));
    let g2 = g + delta3(bits(v, 48, 0x7));
    let b2 = b + delta3(bits(v, 40, 0x7));

    if variant != Variant::Etc1 {
        let in_range = |c: i32| (0..=31).contains(&c);
        if !in_range(r2) {
            return decode_t_mode(v, opaque);
        }
        if !in_range(g2) {
            return decode_h_mode(v, opaque);
        }
        if !in_range(b2) {
            return decode_planar(v);
        }
    }

    let c1 = [expand5(r as u8), expand5(g as u8), expand5(b as u8)];
    let c2 = [
        expand5(r2 as u8 & 0x1F),
        expand5(g2 as u8 & 0x1F),
        expand5(b2 as u8 & 0x1F),
    ];
    decode_subblocks(v, c1, c2, opaque)
}

/// Individual and differential modes: two base colours, one per 2x4 or
/// 4x2 sub-block, each with its own modifier table.
fn decode_subblocks(v: u64, c1: [u8; 3], c2: [u8; 3], opaque: bool) -> Rgba4x4 {
    let table1 = MODIFIERS[bits(v, 37, 0x7) as usize];
    let table2 = MODIFIERS[bits(v, 34, 0x7) as usize];
    let flip = (v >> 32) & 1 == 1;

    let mut out = [[0u8; 4]; 16];
    for y in 0..4 {
        for x in 0..4 {
            let second = if flip { y >= 2 } else { x >= 2 };
            let (base, table) = if second { (c2, table2) } else { (c1, table1) };
            let idx = pixel_index(v, x, y);
            out[y * 4 + x] = match (idx, opaque) {
                (2, false) => TRANSPARENT,
                (0, false) => offset(base, 0),
                (0, true) => offset(base, table[0]),
                (1, _) => offset(base, table[1]),
                (2, true) => offset(base, -table[0]),
                _ => offset(base, -table[1]),
            };
        }
    }
    out
}

fn paint(v: u64, colors: [[u8; 4]; 4], opaque: bool) -> Rgba4x4 {
    let mut out = [[0u8; 4]; 16];
    for y in 0..4 {
        for x in 0..4 {
            let idx = pixel_index(v, x, y);
            out[y * 4 + x] = if idx == 2 && !opaque {
                TRANSPARENT
            } else {
                colors[idx]
            };
        }
    }
    out
}

fn decode_t_mode(v: u64, opaque: bool) -> Rgba4x4 {
    let c1 = [
        expand4((bits(v, 59, 0x3) << 2) | bits(v, 56, 0x3)),
        expand4(bits(v, 52, 0xF)),
        expand4(bits(v, 48, 0xF)),
    ];
    let c2 = [
        expand4(bits(v, 44, 0xF)),
        expand4(bits(v, 40, 0xF)),
        expand4(bits(v, 36, 0xF)),
    ];
    let d = DISTANCES[((bits(v, 34, 0x3) << 1) | bits(v, 32, 0x1)) as usize];
    let colors = [
        offset(c1, 0),
        offset(c2, d),
        offset(c2, 0),
        offset(c2, -d),
    ];
    paint(v, colors, opaque)
}

fn decode_h_mode(v: u64, opaque: bool) -> Rgba4x4 {
    let r1 = bits(v, 59, 0xF);
    let g1 = (bits(v, 56, 0x7) << 1) | bits(v, 52, 0x1);
    let b1 = (bits(v, 51, 0x1) << 3) | bits(v, 47, 0x7);
    let r2 = bits(v, 43, 0xF);
    let g2 = bits(v, 39, 0xF);
    let b2 = bits(v, 35, 0xF);

    let key = |r: u8, g: u8, b: u8| (u32::from(r) << 8) | (u32::from(g) << 4) | u32::from(b);
    let ordering = u8::from(key(r1, g1, b1) >= key(r2, g2, b2));
    let d = DISTANCES
        [((bits(v, 34, 0x1) << 2) | (bits(v, 32, 0x1) << 1) | ordering) as usize];

    let c1 = [expand4(r1), expand4(g1), expand4(b1)];
    let c2 = [expand4(r2), expand4(g2), expand4(b2)];
    let colors = [
        offset(c1, d),
        offset(c1, -d),
        offset(c2, d),
        offset(c2, -d),
    ];
    paint(v, colors, opaque)
}

/// Planar mode: three colours (origin, horizontal, vertical) define a
/// gradient. Always opaque; pixel indices are not used.
fn decode_planar(v: u64) -> Rgba4x4 {
    let ro = expand6(bits(v, 57, 0x3F));
    let go = expand7((bits(v, 56, 0x1) << 6) | bits(v, 49, 0x3F));
    let bo = expand6((bits(v, 48, 0x1) << 5) | (bits(v, 43, 0x3) << 3) | bits(v, 39, 0x7));
    let rh = expand6((bits(v, 34, 0x1F) << 1) | bits(v, 32, 0x1));
    let gh = expand7(bits(v, 25, 0x7F));
    let bh = expand6(bits(v, 19, 0x3F));
    let rv = expand6(bits(v, 13, 0x3F));
    let gv = expand7(bits(v, 6, 0x7F));
    let bv = expand6(bits(v, 0, 0x3F));

    let channel = |o: u8, h: u8, vv: u8, x: i32, y: i32| {
        let (o, h, vv) = (i32::from(o), i32::from(h), i32::from(vv));
        clamp_u8((x * (h - o) + y * (vv - o) + 4 * o + 2) >> 2)
    };

    let mut out = [[0u8; 4]; 16];
    for y in 0..4 {
        for x in 0..4 {
            let (xi, yi) = (x as i32, y as i32);
            out[y * 4 + x] = [
                channel(ro, rh, rv, xi, yi),
                channel(go, gh, gv, xi, yi),
                channel(bo, bh, bv, xi, yi),
                255,
            ];
        }
    }
    out
}

/// EAC 8-bit alpha block → 16 alpha values, row-major.
fn decode_eac_alpha(block: &[u8; 8]) -> [u8; 16] {
    let v = u64::from_be_bytes(*block);
    let base = i32::from(block[0]);
    let multiplier = i32::from(block[1] >> 4);
    let table = EAC_MODIFIERS[(block[1] & 0xF) as usize];

    let mut out = [0u8; 16];
    for y in 0..4 {
        for x in 0..4 {
            let k = x * 4 + y;
            let idx = ((v >> (45 - 3 * k)) & 0x7) as usize;
            out[y * 4 + x] = clamp_u8(base + table[idx] * multiplier);
        }
    }
    out
}

pub(crate) fn decode_etc1(block: &[u8; 8]) -> Rgba4x4 {
    decode_rgb(block, Variant::Etc1)
}

pub(crate) fn decode_etc2_rgb(block: &[u8; 8]) -> Rgba4x4 {
    decode_rgb(block, Variant::Etc2)
}

pub(crate) fn decode_etc2_rgb_a1(block: &[u8; 8]) -> Rgba4x4 {
    decode_rgb(block, Variant::Etc2PunchThrough)
}

/// EAC alpha block followed by an ETC2 RGB block.
pub(crate) fn decode_etc2_rgba(block: &[u8; 16]) -> Rgba4x4 {
    let (alpha, color) = split(block);
    let mut out = decode_rgb(&color, Variant::Etc2);
    for (px, a) in out.iter_mut().zip(decode_eac_alpha(&alpha)) {
        px[3] = a;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn individual_mode() {
        let mut block = [0x88, 0x88, 0x88, 0x00, 0, 0, 0, 0];
        assert!(decode_etc1(&block).iter().all(|px| *px == [138, 138, 138, 255]));

        // Index 3 everywhere: -8.
        block[4..8].copy_from_slice(&[0xFF; 4]);
        assert!(decode_etc1(&block).iter().all(|px| *px == [128, 128, 128, 255]));
    }

    #[test]
    fn differential_mode_subblocks() {
        // R = 16, dR = +1; G = B = 0; side-by-side sub-blocks.
        let block = [0x81, 0x00, 0x00, 0x02, 0, 0, 0, 0];
        for out in [decode_etc1(&block), decode_etc2_rgb(&block)] {
            assert_eq!(out[0], [134, 2, 2, 255]);
            assert_eq!(out[3], [142, 2, 2, 255]);
            assert_eq!(out[12], [134, 2, 2, 255]);
        }

        // Flipped: stacked sub-blocks.
        let block = [0x81, 0x00, 0x00, 0x03, 0, 0, 0, 0];
        let out = decode_etc1(&block);
        assert_eq!(out[3], [134, 2, 2, 255]);
        assert_eq!(out[12], [142, 2, 2, 255]);
    }

    #[test]
    fn pixel_indices_are_column_major() {
        // Pixel (0, 1) is k = 1: MSB in bit 17, LSB in bit 1 → index 3 (-8).
        let block = [0x88, 0x88, 0x88, 0x00, 0x00, 0x02, 0x00, 0x02];
        let out = decode_etc1(&block);
        assert_eq!(out[4], [128, 128, 128, 255]);
        assert_eq!(out[1], [138, 138, 138, 255]);
    }

    #[test]
    fn t_mode() {
        // Pixel (0,0) index 1, pixel (0,1) index 2, others index 0.
        let block = [0xF9, 0x00, 0x88, 0x82, 0x00, 0x02, 0x00, 0x01];
        let out = decode_etc2_rgb(&block);
        assert_eq!(out[0], [139, 139, 139, 255]);
        assert_eq!(out[4], [136, 136, 136, 255]);
        assert_eq!(out[1], [221, 0, 0, 255]);
    }

    #[test]
    fn punchthrough_transparency() {
        // Same T-mode block with the opaque bit cleared.
        let block = [0xF9, 0x00, 0x88, 0x80, 0x00, 0x02, 0x00, 0x01];
        let out = decode_etc2_rgb_a1(&block);
        assert_eq!(out[4], [0, 0, 0, 0]);
        assert_eq!(out[0], [139, 139, 139, 255]);

        // Opaque bit set: identical to plain ETC2.
        let block = [0xF9, 0x00, 0x88, 0x82, 0x00, 0x02, 0x00, 0x01];
        assert_eq!(decode_etc2_rgb_a1(&block), decode_etc2_rgb(&block));
    }

    #[test]
    fn punchthrough_differential_zero_modifier() {
        // Differential, opaque bit clear: index 0 is the base colour,
        // index 2 is transparent.
        let block = [0x81, 0x00, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00];
        let out = decode_etc2_rgb_a1(&block);
        assert_eq!(out[0], [132, 0, 0, 255]);
        assert_eq!(out[4], [0, 0, 0, 0]);
    }

    #[test]
    fn h_mode() {
        let block = [0x00, 0xF9, 0x00, 0x02, 0, 0, 0, 0];
        let out = decode_etc2_rgb(&block);
        assert!(out.iter().all(|px| *px == [6, 23, 176, 255]));
    }

    #[test]
    fn planar_mode() {
        let block = [0x00, 0x00, 0xF9, 0x02, 0, 0, 0, 0];
        let out = decode_etc2_rgb(&block);
        assert_eq!(out[0], [0, 0, 105, 255]);
        assert_eq!(out[1], [0, 0, 79, 255]);
        assert_eq!(out[4], [0, 0, 79, 255]);
        assert_eq!(out[15], [0, 0, 0, 255]);
    }

    #[test]
    fn eac_alpha() {
        // base 100, multiplier 2, table 0; (0,0) index 4, (3,3) index 7.
        let block = [100, 0x20, 0x80, 0, 0, 0, 0, 0x07];
        let alpha = decode_eac_alpha(&block);
        assert_eq!(alpha[0], 104);
        assert_eq!(alpha[15], 128);
        assert_eq!(alpha[5], 94);
    }

    #[test]
    fn etc2_rgba_combines_halves() {
        let mut block = [0u8; 16];
        block[..8].copy_from_slice(&[100, 0x20, 0x80, 0, 0, 0, 0, 0x07]);
        block[8..].copy_from_slice(&[0x88, 0x88, 0x88, 0x02, 0, 0, 0, 0]);
        let out = decode_etc2_rgba(&block);
        assert_eq!(out[0][3], 104);
        assert_eq!(out[15][3], 128);
    }
}
