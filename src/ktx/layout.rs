//! Location and validation of the top-level image inside a KTX file.

use alloc::format;
use enough::Stop;

use super::format::TextureFormat;
use super::header::{HEADER_SIZE, KtxHeader};
use super::kv::Orientation;
use crate::codec;
use crate::decode::DecodeOutput;
use crate::error::KtxError;
use crate::info::pixel_format_label;
use crate::limits::{Limits, MAX_DIMENSION, MAX_FILE_SIZE, MAX_KEY_VALUE_DATA};
use crate::pixel::PixelLayout;

/// Length of the key/value block to read, or `None` when it is empty or
/// over the sanity ceiling.
pub(crate) fn key_value_block_len(header: &KtxHeader) -> Option<usize> {
    match header.bytes_of_key_value_data {
        0 => None,
        len if len > MAX_KEY_VALUE_DATA => {
            log::debug!("KTX key/value block of {len} bytes exceeds {MAX_KEY_VALUE_DATA}; ignoring");
            None
        }
        len => Some(len as usize),
    }
}

/// Where mipmap level 0 lives and how big it must be.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TextureLayout {
    pub format: TextureFormat,
    pub width: u32,
    /// Height with 1D textures (height 0) normalized to 1.
    pub height: u32,
    pub stride: usize,
    pub expected_size: usize,
    /// Offset of the u32 image-size field that precedes the payload.
    pub size_field_offset: u64,
}

impl TextureLayout {
    pub fn locate(header: &KtxHeader, file_size: u64) -> Result<Self, KtxError> {
        let width = header.pixel_width;
        if width == 0 {
            return Err(KtxError::InvalidHeader("pixel width is 0".into()));
        }
        let height = header.pixel_height.max(1);
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(KtxError::DimensionsTooLarge { width, height });
        }

        let size_field_offset = header.texture_data_offset();
        if size_field_offset < HEADER_SIZE as u64 {
            return Err(KtxError::InvalidHeader(format!(
                "texture data offset {size_field_offset} is inside the header"
            )));
        }
        if file_size > MAX_FILE_SIZE {
            return Err(KtxError::LimitExceeded(format!(
                "file size {file_size} exceeds {MAX_FILE_SIZE}"
            )));
        }

        let Some(format) = TextureFormat::resolve(header.gl_format, header.gl_internal_format)
        else {
            log::debug!(
                "KTX glFormat=0x{:04X} glInternalFormat=0x{:04X} is not supported",
                header.gl_format,
                header.gl_internal_format
            );
            return Err(KtxError::UnsupportedVariant(pixel_format_label(
                header.gl_internal_format,
            )));
        };
        let (Some(stride), Some(expected_size)) =
            (format.stride(width), format.expected_size(width, height))
        else {
            return Err(KtxError::DimensionsTooLarge { width, height });
        };
        log::trace!("KTX level 0: {format:?} {width}x{height}, {expected_size} bytes");

        let end = size_field_offset + 4 + expected_size as u64;
        if end > file_size {
            log::debug!("KTX image needs {end} bytes but the file has {file_size}");
            return Err(KtxError::UnexpectedEof);
        }

        Ok(Self {
            format,
            width,
            height,
            stride,
            expected_size,
            size_field_offset,
        })
    }

    pub fn payload_offset(&self) -> u64 {
        self.size_field_offset + 4
    }

    /// Apply caller limits to the dimensions and the decoded buffer size.
    pub fn check_limits(&self, limits: &Limits) -> Result<(), KtxError> {
        limits.check(self.width, self.height)?;
        let bpp = self
            .format
            .output_layout()
            .map_or(4, |layout| layout.bytes_per_pixel());
        limits.check_memory(self.width as usize * self.height as usize * bpp)
    }

    /// `declared` is the image-size field, already in host byte order.
    pub fn verify_declared_size(&self, declared: u32) -> Result<(), KtxError> {
        if declared as usize != self.expected_size {
            log::debug!(
                "KTX image size field is {declared}, expected {}",
                self.expected_size
            );
            return Err(KtxError::SizeMismatch {
                declared: u64::from(declared),
                expected: self.expected_size as u64,
            });
        }
        Ok(())
    }

    pub fn needs_vflip(&self, orientation: Orientation) -> bool {
        orientation.flips_vertically() && self.height > 1
    }

    /// Output layout when the payload can be handed out as is.
    pub fn passthrough(&self, orientation: Orientation) -> Option<PixelLayout> {
        if self.needs_vflip(orientation) || !codec::is_passthrough(self.format, self.width, self.stride)
        {
            return None;
        }
        self.format.output_layout()
    }

    /// Decode the payload and apply the vertical flip.
    pub fn decode(
        &self,
        payload: &[u8],
        orientation: Orientation,
        stop: &dyn Stop,
    ) -> Result<DecodeOutput<'static>, KtxError> {
        let (pixels, layout) = codec::decode_texture(
            self.format,
            payload,
            self.width,
            self.height,
            self.stride,
            stop,
        )?;
        let pixels = if self.needs_vflip(orientation) {
            codec::flip_vertical(&pixels, self.width, self.height, layout)
        } else {
            pixels
        };
        Ok(DecodeOutput::owned(pixels, self.width, self.height, layout))
    }
}
