//! Pixel and block decoders, and the orientation post-processing step.

mod block;
mod etc;
mod linear;
mod rgtc;
mod s3tc;

use alloc::vec::Vec;
use enough::Stop;

use crate::error::KtxError;
use crate::ktx::{Codec, TextureFormat};
use crate::pixel::PixelLayout;

/// Decode a top-level image into tightly packed pixels.
///
/// `stride` is the stored row length for uncompressed formats and is
/// ignored for block-compressed ones.
pub(crate) fn decode_texture(
    format: TextureFormat,
    data: &[u8],
    width: u32,
    height: u32,
    stride: usize,
    stop: &dyn Stop,
) -> Result<(Vec<u8>, PixelLayout), KtxError> {
    let decoded = match format {
        TextureFormat::Rgb8 => (
            linear::decode_rgb8(data, width, height, stride, stop)?,
            PixelLayout::Rgb8,
        ),
        TextureFormat::Rgba8 => (
            linear::decode_rgba8(data, width, height, stride, stop)?,
            PixelLayout::Rgba8,
        ),
        TextureFormat::Luminance8 => (
            linear::decode_l8(data, width, height, stride, stop)?,
            PixelLayout::Gray8,
        ),
        TextureFormat::Compressed(codec) => decode_compressed(codec, data, width, height, stop)?,
    };
    Ok(decoded)
}

fn decode_compressed(
    codec: Codec,
    data: &[u8],
    width: u32,
    height: u32,
    stop: &dyn Stop,
) -> Result<(Vec<u8>, PixelLayout), KtxError> {
    use block::decode_blocks;

    let rgba = match codec {
        Codec::Dxt1 => decode_blocks::<8>(data, width, height, stop, s3tc::decode_dxt1)?,
        Codec::Dxt1A => decode_blocks::<8>(data, width, height, stop, s3tc::decode_dxt1a)?,
        Codec::Dxt3 => decode_blocks::<16>(data, width, height, stop, s3tc::decode_dxt3)?,
        Codec::Dxt5 => decode_blocks::<16>(data, width, height, stop, s3tc::decode_dxt5)?,
        Codec::Etc1 => decode_blocks::<8>(data, width, height, stop, etc::decode_etc1)?,
        Codec::Etc2Rgb => decode_blocks::<8>(data, width, height, stop, etc::decode_etc2_rgb)?,
        Codec::Etc2RgbA1 => decode_blocks::<8>(data, width, height, stop, etc::decode_etc2_rgb_a1)?,
        Codec::Etc2Rgba => decode_blocks::<16>(data, width, height, stop, etc::decode_etc2_rgba)?,
        Codec::Bc4 => decode_blocks::<8>(data, width, height, stop, rgtc::decode_bc4)?,
        Codec::Bc5 => decode_blocks::<16>(data, width, height, stop, rgtc::decode_bc5)?,
        Codec::Latc1 => {
            let rgba = decode_blocks::<8>(data, width, height, stop, rgtc::decode_bc4)?;
            return Ok((rgtc::red_to_luminance(&rgba), PixelLayout::Gray8));
        }
        Codec::Latc2 => {
            let rgba = decode_blocks::<16>(data, width, height, stop, rgtc::decode_bc5)?;
            return Ok((
                rgtc::red_green_to_luminance_alpha(&rgba),
                PixelLayout::GrayAlpha8,
            ));
        }
        Codec::EacR11 | Codec::EacRg11 => {
            return Err(KtxError::UnsupportedVariant(alloc::format!(
                "no decoder for {codec:?}"
            )));
        }
    };
    Ok((rgba, PixelLayout::Rgba8))
}

/// Whether an uncompressed payload already has the output layout, so it
/// can be handed out without copying.
pub(crate) fn is_passthrough(format: TextureFormat, width: u32, stride: usize) -> bool {
    match format {
        TextureFormat::Rgb8 => linear::is_packed(width, stride, 3),
        TextureFormat::Rgba8 => linear::is_packed(width, stride, 4),
        TextureFormat::Luminance8 => linear::is_packed(width, stride, 1),
        TextureFormat::Compressed(_) => false,
    }
}

/// Return a copy of `pixels` with the row order reversed.
pub(crate) fn flip_vertical(pixels: &[u8], width: u32, height: u32, layout: PixelLayout) -> Vec<u8> {
    let row = width as usize * layout.bytes_per_pixel();
    let mut out = Vec::with_capacity(pixels.len());
    if row == 0 {
        return out;
    }
    for line in pixels.chunks_exact(row).take(height as usize).rev() {
        out.extend_from_slice(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use enough::Unstoppable;

    #[test]
    fn flip_reverses_rows() {
        let pixels = vec![1, 2, 3, 4, 5, 6];
        assert_eq!(
            flip_vertical(&pixels, 1, 3, PixelLayout::GrayAlpha8),
            vec![5, 6, 3, 4, 1, 2]
        );
    }

    #[test]
    fn eac_is_unsupported() {
        let data = [0u8; 8];
        assert!(matches!(
            decode_texture(
                TextureFormat::Compressed(Codec::EacR11),
                &data,
                4,
                4,
                8,
                &Unstoppable
            ),
            Err(KtxError::UnsupportedVariant(_))
        ));
    }

    #[test]
    fn latc_layouts() {
        let data = [7u8, 7, 0, 0, 0, 0, 0, 0, 9, 9, 0, 0, 0, 0, 0, 0];
        let (px, layout) = decode_texture(
            TextureFormat::Compressed(Codec::Latc1),
            &data[..8],
            4,
            4,
            8,
            &Unstoppable,
        )
        .unwrap();
        assert_eq!(layout, PixelLayout::Gray8);
        assert_eq!(px, vec![7; 16]);

        let (px, layout) = decode_texture(
            TextureFormat::Compressed(Codec::Latc2),
            &data,
            4,
            4,
            16,
            &Unstoppable,
        )
        .unwrap();
        assert_eq!(layout, PixelLayout::GrayAlpha8);
        assert_eq!(&px[..4], &[7, 9, 7, 9]);
    }

    #[test]
    fn passthrough_only_for_packed_rows() {
        assert!(is_passthrough(TextureFormat::Rgba8, 3, 12));
        assert!(!is_passthrough(TextureFormat::Rgb8, 3, 12));
        assert!(!is_passthrough(
            TextureFormat::Compressed(Codec::Dxt1),
            4,
            8
        ));
    }
}
