//! RGTC (BC4/BC5) and LATC decoding.
//!
//! Signed variants share the unsigned decoder.

use alloc::vec::Vec;

use super::block::Rgba4x4;
use super::s3tc::{decode_interpolated_channel, split};

/// BC4: one interpolated channel, written to red.
pub(crate) fn decode_bc4(block: &[u8; 8]) -> Rgba4x4 {
    let red = decode_interpolated_channel(block);
    let mut out = [[0u8; 4]; 16];
    for (px, r) in out.iter_mut().zip(red) {
        *px = [r, 0, 0, 255];
    }
    out
}

/// BC5: two interpolated channels, written to red and green.
pub(crate) fn decode_bc5(block: &[u8; 16]) -> Rgba4x4 {
    let (red, green) = split(block);
    let red = decode_interpolated_channel(&red);
    let green = decode_interpolated_channel(&green);
    let mut out = [[0u8; 4]; 16];
    for ((px, r), g) in out.iter_mut().zip(red).zip(green) {
        *px = [r, g, 0, 255];
    }
    out
}

/// Red-only RGBA8 → Gray8 (LATC1).
pub(crate) fn red_to_luminance(rgba: &[u8]) -> Vec<u8> {
    rgba.chunks_exact(4).map(|px| px[0]).collect()
}

/// Red/green RGBA8 → GrayAlpha8 (LATC2).
pub(crate) fn red_green_to_luminance_alpha(rgba: &[u8]) -> Vec<u8> {
    rgba.chunks_exact(4).flat_map(|px| [px[0], px[1]]).collect()
}
