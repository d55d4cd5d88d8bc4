//! Uncompressed GL_RGB / GL_RGBA / GL_LUMINANCE scanlines.
//!
//! Rows in the file are padded to 4 bytes (GL_UNPACK_ALIGNMENT); output rows
//! are tightly packed. Multi-byte pixels are not byteswapped for
//! foreign-endian files.

use alloc::vec::Vec;
use enough::Stop;

use crate::error::KtxError;

fn check_input(
    data: &[u8],
    width: u32,
    height: u32,
    stride: usize,
    bytes_per_pixel: usize,
) -> Result<usize, KtxError> {
    let row = (width as usize)
        .checked_mul(bytes_per_pixel)
        .ok_or(KtxError::DimensionsTooLarge { width, height })?;
    if stride < row {
        return Err(KtxError::InvalidData(alloc::format!(
            "stride {stride} is shorter than a {width}-pixel row"
        )));
    }
    let needed = stride
        .checked_mul(height as usize)
        .ok_or(KtxError::DimensionsTooLarge { width, height })?;
    if data.len() < needed {
        return Err(KtxError::BufferTooSmall {
            needed,
            actual: data.len(),
        });
    }
    Ok(row)
}

/// Copy rows of `bytes_per_pixel`-byte pixels, dropping the row padding.
fn unpad_rows(
    data: &[u8],
    width: u32,
    height: u32,
    stride: usize,
    bytes_per_pixel: usize,
    stop: &dyn Stop,
) -> Result<Vec<u8>, KtxError> {
    let row = check_input(data, width, height, stride, bytes_per_pixel)?;
    let mut out = Vec::with_capacity(row * height as usize);
    for (row_idx, line) in data.chunks(stride).take(height as usize).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        out.extend_from_slice(&line[..row]);
    }
    Ok(out)
}

/// 24-bit RGB (BGR888 as a little-endian word: R in the low byte).
pub(crate) fn decode_rgb8(
    data: &[u8],
    width: u32,
    height: u32,
    stride: usize,
    stop: &dyn Stop,
) -> Result<Vec<u8>, KtxError> {
    unpad_rows(data, width, height, stride, 3, stop)
}

/// 8-bit luminance.
pub(crate) fn decode_l8(
    data: &[u8],
    width: u32,
    height: u32,
    stride: usize,
    stop: &dyn Stop,
) -> Result<Vec<u8>, KtxError> {
    unpad_rows(data, width, height, stride, 1, stop)
}

/// 32-bit RGBA. ABGR8888 little-endian words are R, G, B, A in memory.
pub(crate) fn decode_rgba8(
    data: &[u8],
    width: u32,
    height: u32,
    stride: usize,
    stop: &dyn Stop,
) -> Result<Vec<u8>, KtxError> {
    unpad_rows(data, width, height, stride, 4, stop)
}

/// Whether the stored rows are already tightly packed in output order,
/// so the payload can be used as-is.
pub(crate) fn is_packed(width: u32, stride: usize, bytes_per_pixel: usize) -> bool {
    width as usize * bytes_per_pixel == stride
}
