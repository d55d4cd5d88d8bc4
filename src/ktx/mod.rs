//! Khronos KTX 1.1 container: header, key/value metadata, format
//! resolution, and the [`KtxFile`] object tying them to a byte source.

mod file;
mod format;
pub mod glenum;
mod header;
mod kv;
mod layout;

pub use file::KtxFile;
pub use format::{BlockFamily, Codec, TextureFormat};
pub use glenum::gl_enum_name;
pub use header::{HEADER_SIZE, KTX_ENDIAN_MAGIC, KTX_IDENTIFIER, KtxHeader, is_supported};
pub use kv::{KeyValue, KeyValueData, ORIENTATION_KEY, Orientation};

pub(crate) use layout::{TextureLayout, key_value_block_len};
