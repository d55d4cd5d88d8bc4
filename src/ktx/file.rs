use alloc::string::String;
use alloc::vec;

use enough::Unstoppable;

use super::header::{HEADER_SIZE, KtxHeader};
use super::kv::{KeyValueData, Orientation};
use super::layout::{TextureLayout, key_value_block_len};
use crate::decode::DecodeOutput;
use crate::error::KtxError;
use crate::info::{Endianness, ImageInfo, pixel_format_label};
use crate::limits::Limits;
use crate::source::KtxSource;

/// An opened KTX file.
///
/// The header is read and validated on construction. The key/value block
/// and the top-level image are loaded on first use and cached; a failed
/// image load is cached too and reported by [`KtxFile::try_image`].
#[derive(Debug)]
pub struct KtxFile<S> {
    source: S,
    header: KtxHeader,
    file_size: u64,
    limits: Option<Limits>,
    kv: Option<KeyValueData>,
    image: Option<Result<DecodeOutput<'static>, KtxError>>,
}

impl<'a> KtxFile<&'a [u8]> {
    pub fn from_bytes(data: &'a [u8]) -> Result<Self, KtxError> {
        Self::new(data)
    }
}

#[cfg(feature = "std")]
impl<R: std::io::Read + std::io::Seek> KtxFile<crate::source::IoSource<R>> {
    pub fn from_reader(reader: R) -> Result<Self, KtxError> {
        Self::new(crate::source::IoSource::new(reader))
    }
}

impl<S: KtxSource> KtxFile<S> {
    /// Read and validate the 64-byte header.
    pub fn new(mut source: S) -> Result<Self, KtxError> {
        let file_size = source.size()?;
        let mut raw = [0u8; HEADER_SIZE];
        source.read_exact_at(0, &mut raw)?;
        let header = KtxHeader::parse(&raw)?;
        Ok(Self {
            source,
            header,
            file_size,
            limits: None,
            kv: None,
            image: None,
        })
    }

    /// Apply caller limits on top of the fixed sanity ceilings.
    ///
    /// Only affects an image that has not been loaded yet.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn header(&self) -> &KtxHeader {
        &self.header
    }

    pub fn texture_format_name(&self) -> &'static str {
        "Khronos KTX"
    }

    /// GL name of `glInternalFormat`, or `Unknown (0xNNNN)`.
    pub fn pixel_format(&self) -> String {
        pixel_format_label(self.header.gl_internal_format)
    }

    pub fn mipmap_count(&self) -> u32 {
        self.header.number_of_mipmap_levels
    }

    pub fn endianness(&self) -> Endianness {
        self.header.endianness()
    }

    pub fn texture_data_offset(&self) -> u64 {
        self.header.texture_data_offset()
    }

    pub fn info(&self) -> ImageInfo {
        ImageInfo::from_header(&self.header)
    }

    /// Parsed key/value entries. A block that cannot be read in full
    /// yields no entries.
    pub fn key_values(&mut self) -> &KeyValueData {
        let kv = match self.kv.take() {
            Some(kv) => kv,
            None => self.load_key_values(),
        };
        self.kv.insert(kv)
    }

    pub fn orientation(&mut self) -> Orientation {
        self.key_values().orientation()
    }

    /// The decoded top-level image, or `None` if it cannot be decoded.
    pub fn image(&mut self) -> Option<&DecodeOutput<'static>> {
        self.try_image().ok()
    }

    /// Only level 0 is decoded; other levels are always `None`.
    pub fn mipmap(&mut self, level: u32) -> Option<&DecodeOutput<'static>> {
        if level != 0 {
            return None;
        }
        self.image()
    }

    /// Like [`KtxFile::image`], but reports why the image is missing.
    pub fn try_image(&mut self) -> Result<&DecodeOutput<'static>, &KtxError> {
        let result = match self.image.take() {
            Some(result) => result,
            None => {
                let result = self.load_image();
                if let Err(e) = &result {
                    log::debug!("KTX image unavailable: {e}");
                }
                result
            }
        };
        self.image.insert(result).as_ref()
    }

    /// Release the file and return the underlying source.
    pub fn into_source(self) -> S {
        self.source
    }

    fn load_key_values(&mut self) -> KeyValueData {
        let Some(len) = key_value_block_len(&self.header) else {
            return KeyValueData::default();
        };
        let mut block = vec![0u8; len];
        let read = match self.source.read_at(HEADER_SIZE as u64, &mut block) {
            Ok(n) => n,
            Err(e) => {
                log::debug!("KTX key/value block read failed: {e}");
                return KeyValueData::default();
            }
        };
        if read < len {
            log::debug!("KTX key/value block truncated: {read} of {len} bytes");
            return KeyValueData::default();
        }
        KeyValueData::parse(&block, self.header.needs_byteswap())
    }

    fn load_image(&mut self) -> Result<DecodeOutput<'static>, KtxError> {
        let layout = TextureLayout::locate(&self.header, self.file_size)?;
        if let Some(limits) = &self.limits {
            layout.check_limits(limits)?;
        }

        let mut size_field = [0u8; 4];
        self.source
            .read_exact_at(layout.size_field_offset, &mut size_field)?;
        layout.verify_declared_size(self.header.fix_u32(u32::from_ne_bytes(size_field)))?;

        let mut payload = vec![0u8; layout.expected_size];
        self.source
            .read_exact_at(layout.payload_offset(), &mut payload)?;

        let orientation = self.orientation();
        if let Some(native) = layout.passthrough(orientation) {
            return Ok(DecodeOutput::owned(
                payload,
                layout.width,
                layout.height,
                native,
            ));
        }
        layout.decode(&payload, orientation, &Unstoppable)
    }
}
