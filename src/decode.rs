use alloc::borrow::Cow;
use alloc::vec::Vec;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use enough::Stop;

use crate::error::KtxError;
use crate::ktx::{self, KeyValueData, KtxHeader};
use crate::limits::Limits;
use crate::pixel::PixelLayout;

/// Decoded image output. Pixels may be borrowed (zero-copy) or owned.
#[derive(Clone, Debug)]
pub struct DecodeOutput<'a> {
    pixels: Cow<'a, [u8]>,
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout,
}

impl<'a> DecodeOutput<'a> {
    /// Access the pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel data (copies if borrowed).
    pub fn into_owned(self) -> DecodeOutput<'static> {
        DecodeOutput {
            pixels: Cow::Owned(self.pixels.into_owned()),
            width: self.width,
            height: self.height,
            layout: self.layout,
        }
    }

    /// Whether the pixel data is borrowed (zero-copy from input).
    pub fn is_borrowed(&self) -> bool {
        matches!(self.pixels, Cow::Borrowed(_))
    }

    pub(crate) fn borrowed(data: &'a [u8], width: u32, height: u32, layout: PixelLayout) -> Self {
        Self {
            pixels: Cow::Borrowed(data),
            width,
            height,
            layout,
        }
    }

    pub(crate) fn owned(data: Vec<u8>, width: u32, height: u32, layout: PixelLayout) -> Self {
        Self {
            pixels: Cow::Owned(data),
            width,
            height,
            layout,
        }
    }

    /// Reinterpret pixel data as typed pixel slice.
    ///
    /// Returns [`KtxError::InvalidData`] if the pixel layout doesn't match `P`.
    #[cfg(feature = "rgb")]
    pub fn as_pixels<P: crate::DecodePixel>(&self) -> Result<&[P], KtxError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        if self.layout != P::layout() {
            return Err(KtxError::InvalidData(alloc::format!(
                "pixel layout is {:?}, requested {:?}",
                self.layout,
                P::layout()
            )));
        }
        Ok(self.pixels().as_pixels())
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn as_imgref<P: crate::DecodePixel>(&self) -> Result<imgref::ImgRef<'_, P>, KtxError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgRef::new(
            pixels,
            self.width as usize,
            self.height as usize,
        ))
    }

    /// Convert to an [`imgref::ImgVec`] of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec<P: crate::DecodePixel>(&self) -> Result<imgref::ImgVec<P>, KtxError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgVec::new(
            pixels.to_vec(),
            self.width as usize,
            self.height as usize,
        ))
    }
}

/// One-shot decode of the top-level image of an in-memory KTX file.
///
/// ```no_run
/// use zenktx::{DecodeRequest, Limits, Unstoppable};
///
/// let data: &[u8] = &[]; // your KTX bytes
/// let limits = Limits {
///     max_pixels: Some(4096 * 4096),
///     ..Default::default()
/// };
/// let decoded = DecodeRequest::new(data).with_limits(&limits).decode(Unstoppable)?;
/// println!("{}x{} {:?}", decoded.width, decoded.height, decoded.layout);
/// # Ok::<(), zenktx::KtxError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode mipmap level 0.
    ///
    /// Uncompressed images with packed rows and no vertical flip are
    /// returned borrowed from the input.
    pub fn decode(self, stop: impl Stop) -> Result<DecodeOutput<'a>, KtxError> {
        let data = self.data;
        let header = KtxHeader::parse(data)?;
        let kv = match ktx::key_value_block_len(&header) {
            Some(len) => match data.get(ktx::HEADER_SIZE..ktx::HEADER_SIZE + len) {
                Some(block) => KeyValueData::parse(block, header.needs_byteswap()),
                None => {
                    log::debug!("KTX key/value block truncated: {len} bytes declared");
                    KeyValueData::default()
                }
            },
            None => KeyValueData::default(),
        };

        let layout = ktx::TextureLayout::locate(&header, data.len() as u64)?;
        if let Some(limits) = self.limits {
            layout.check_limits(limits)?;
        }

        let size_at = layout.size_field_offset as usize;
        let size_field = data
            .get(size_at..size_at + 4)
            .ok_or(KtxError::UnexpectedEof)?;
        layout.verify_declared_size(header.fix_u32(u32::from_ne_bytes([
            size_field[0],
            size_field[1],
            size_field[2],
            size_field[3],
        ])))?;

        let payload_at = layout.payload_offset() as usize;
        let payload = data
            .get(payload_at..payload_at + layout.expected_size)
            .ok_or(KtxError::UnexpectedEof)?;

        let orientation = kv.orientation();
        if let Some(native) = layout.passthrough(orientation) {
            return Ok(DecodeOutput::borrowed(
                payload,
                layout.width,
                layout.height,
                native,
            ));
        }
        layout.decode(payload, orientation, &stop)
    }
}
