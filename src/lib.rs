//! # zenktx
//!
//! Khronos KTX (version 1.1) texture container parser and decoder.
//!
//! Reads the fixed header in either byte order, the key/value metadata
//! block, and decodes the top-level image of the first face into 8-bit
//! pixels.
//!
//! ## Supported Formats
//!
//! ### Uncompressed
//! - `GL_RGB`, `GL_RGBA`, `GL_LUMINANCE` with 8-bit channels
//!
//! ### Block-compressed (4x4 blocks)
//! - **S3TC**: DXT1 (opaque and 1-bit alpha), DXT3, DXT5
//! - **ETC**: ETC1, ETC2 RGB, ETC2 punchthrough alpha, ETC2 RGBA (EAC alpha)
//! - **RGTC**: BC4 (red), BC5 (red + green)
//! - **LATC**: LATC1 (luminance), LATC2 (luminance + alpha)
//!
//! EAC R11/RG11 are recognized and sized but not decoded.
//!
//! ## Non-Goals
//!
//! - Mipmap levels beyond level 0
//! - Cubemap faces and array elements
//! - Encoding
//!
//! ## Orientation
//!
//! The `KTXorientation` key is honoured for the vertical axis only: images
//! are flipped top-to-bottom unless the file says `T=d`. Horizontal flips are
//! parsed but not applied.
//!
//! ## Usage
//!
//! ```no_run
//! use zenktx::{DecodeRequest, KtxFile, Unstoppable};
//!
//! let data: &[u8] = &[]; // your KTX bytes
//!
//! // Probe without decoding
//! let info = zenktx::probe(data)?;
//! println!("{}x{} {}", info.width, info.height, info.pixel_format());
//!
//! // One-shot decode (zero-copy for packed, unflipped uncompressed data)
//! let decoded = DecodeRequest::new(data).decode(Unstoppable)?;
//! println!("{:?}", decoded.layout);
//!
//! // Lazy, cached access to metadata and the image
//! let mut file = KtxFile::from_bytes(data)?;
//! for kv in file.key_values().entries() {
//!     println!("{} = {}", kv.key(), kv.value());
//! }
//! if let Some(image) = file.image() {
//!     println!("{} bytes", image.pixels().len());
//! }
//! # Ok::<(), zenktx::KtxError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod codec;
mod decode;
mod error;
mod info;
mod limits;
mod pixel;
mod source;

pub mod ktx;

// Re-exports
pub use decode::{DecodeOutput, DecodeRequest};
pub use enough::{Stop, Unstoppable};
pub use error::KtxError;
pub use info::{Endianness, ImageInfo};
pub use ktx::{
    Codec, KeyValue, KeyValueData, KtxFile, KtxHeader, Orientation, TextureFormat, is_supported,
};
pub use limits::{Limits, MAX_DIMENSION, MAX_FILE_SIZE, MAX_KEY_VALUE_DATA};
pub use pixel::PixelLayout;
#[cfg(feature = "rgb")]
pub use pixel::DecodePixel;
#[cfg(feature = "std")]
pub use source::IoSource;
pub use source::KtxSource;

/// File extensions handled by this crate.
pub static SUPPORTED_EXTENSIONS: &[&str] = &[".ktx"];

/// MIME types handled by this crate.
pub static SUPPORTED_MIME_TYPES: &[&str] = &["image/ktx"];

/// Read the header and describe the texture without decoding it.
pub fn probe(data: &[u8]) -> Result<ImageInfo, KtxError> {
    let header = KtxHeader::parse(data)?;
    Ok(ImageInfo::from_header(&header))
}

/// Decode the top-level image into an owned buffer.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<DecodeOutput<'static>, KtxError> {
    DecodeRequest::new(data)
        .decode(stop)
        .map(DecodeOutput::into_owned)
}
