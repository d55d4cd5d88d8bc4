//! Shared 4x4 block walking for the block-compressed decoders.

use alloc::vec;
use alloc::vec::Vec;
use enough::Stop;

use crate::error::KtxError;

/// Decoded 4x4 block, RGBA8, row-major.
pub(crate) type Rgba4x4 = [[u8; 4]; 16];

/// Decode a texture made of `N`-byte blocks into tightly packed RGBA8.
///
/// Width and height must be multiples of 4; `data` must hold at least one
/// block per 4x4 tile. Extra trailing bytes are ignored.
pub(crate) fn decode_blocks<const N: usize>(
    data: &[u8],
    width: u32,
    height: u32,
    stop: &dyn Stop,
    mut decode_block: impl FnMut(&[u8; N]) -> Rgba4x4,
) -> Result<Vec<u8>, KtxError> {
    if width == 0 || height == 0 || width % 4 != 0 || height % 4 != 0 {
        return Err(KtxError::InvalidData(alloc::format!(
            "{width}x{height} is not a whole number of 4x4 blocks"
        )));
    }
    let (w, h) = (width as usize, height as usize);
    let blocks_x = w / 4;
    let blocks_y = h / 4;
    let needed = blocks_x
        .checked_mul(blocks_y)
        .and_then(|n| n.checked_mul(N))
        .ok_or(KtxError::DimensionsTooLarge { width, height })?;
    if data.len() < needed {
        return Err(KtxError::BufferTooSmall {
            needed,
            actual: data.len(),
        });
    }
    let out_len = w
        .checked_mul(h)
        .and_then(|n| n.checked_mul(4))
        .ok_or(KtxError::DimensionsTooLarge { width, height })?;
    let mut out = vec![0u8; out_len];
    let row_bytes = w * 4;

    for (by, block_row) in data[..needed].chunks_exact(blocks_x * N).enumerate() {
        stop.check()?;
        for (bx, chunk) in block_row.chunks_exact(N).enumerate() {
            let block = <&[u8; N]>::try_from(chunk).map_err(|_| KtxError::BufferTooSmall {
                needed: N,
                actual: chunk.len(),
            })?;
            let pixels = decode_block(block);
            for (y, row) in pixels.chunks_exact(4).enumerate() {
                let offset = (by * 4 + y) * row_bytes + bx * 16;
                for (dst, px) in out[offset..offset + 16].chunks_exact_mut(4).zip(row) {
                    dst.copy_from_slice(px);
                }
            }
        }
    }
    Ok(out)
}

/// Expand a 5-bit channel to 8 bits.
#[inline]
pub(crate) fn expand5(v: u8) -> u8 {
    (v << 3) | (v >> 2)
}

/// Expand a 6-bit channel to 8 bits.
#[inline]
pub(crate) fn expand6(v: u8) -> u8 {
    (v << 2) | (v >> 4)
}

/// Expand a 4-bit channel to 8 bits.
#[inline]
pub(crate) fn expand4(v: u8) -> u8 {
    (v << 4) | v
}

/// Clamp to 0..=255.
#[inline]
pub(crate) fn clamp_u8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use enough::Unstoppable;

    #[test]
    fn places_blocks_row_major() {
        // Each 1-byte "block" paints its 4x4 tile with its own value.
        let data = [10u8, 20, 30, 40];
        let out = decode_blocks::<1>(&data, 8, 8, &Unstoppable, |b| [[b[0], 0, 0, 255]; 16])
            .unwrap();
        assert_eq!(out.len(), 8 * 8 * 4);
        let at = |x: usize, y: usize| out[(y * 8 + x) * 4];
        assert_eq!(at(0, 0), 10);
        assert_eq!(at(7, 3), 20);
        assert_eq!(at(3, 4), 30);
        assert_eq!(at(7, 7), 40);
    }

    #[test]
    fn every_tile_is_painted_and_trailing_bytes_ignored() {
        let data = [1u8, 2, 3, 4, 5, 6, 0, 0, 0];
        let out = decode_blocks::<2>(&data, 12, 4, &Unstoppable, |b| [[b[0], b[1], 0, 255]; 16])
            .unwrap();
        for (i, px) in out.chunks_exact(4).enumerate() {
            let tile = (i % 12) / 4;
            assert_eq!(px, [data[tile * 2], data[tile * 2 + 1], 0, 255], "pixel {i}");
        }
    }

    #[test]
    fn rejects_partial_blocks_and_short_input() {
        let data = [0u8; 64];
        assert!(matches!(
            decode_blocks::<8>(&data, 6, 4, &Unstoppable, |_| [[0; 4]; 16]),
            Err(KtxError::InvalidData(_))
        ));
        assert!(matches!(
            decode_blocks::<8>(&data[..15], 8, 4, &Unstoppable, |_| [[0; 4]; 16]),
            Err(KtxError::BufferTooSmall { needed: 16, actual: 15 })
        ));
    }

    #[test]
    fn bit_expansion() {
        assert_eq!(expand5(0x1F), 255);
        assert_eq!(expand6(0x3F), 255);
        assert_eq!(expand4(0xF), 255);
        assert_eq!(expand5(0), 0);
        assert_eq!(expand5(0x10), 0x84);
    }
}
