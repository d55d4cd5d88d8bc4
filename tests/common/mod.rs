#![allow(dead_code)]

use zenktx::ktx::KTX_IDENTIFIER;
use zenktx::ktx::glenum::*;

/// Serialize one key/value entry with its length prefix and padding.
pub fn kv_entry(key: &str, value: &[u8], foreign: bool) -> Vec<u8> {
    let size = (key.len() + 1 + value.len() + 1) as u32;
    let size = if foreign { size.swap_bytes() } else { size };
    let mut out = size.to_ne_bytes().to_vec();
    out.extend_from_slice(key.as_bytes());
    out.push(0);
    out.extend_from_slice(value);
    out.push(0);
    while out.len() % 4 != 0 {
        out.push(0);
    }
    out
}

/// Builds KTX 1.1 files in host byte order, or in the opposite byte order
/// with [`KtxBuilder::foreign`].
#[derive(Clone, Debug)]
pub struct KtxBuilder {
    pub gl_type: u32,
    pub gl_format: u32,
    pub gl_internal_format: u32,
    pub width: u32,
    pub height: u32,
    pub mipmap_levels: u32,
    pub foreign: bool,
    kv: Vec<u8>,
    kv_len: Option<u32>,
    image_size: Option<u32>,
    payload: Vec<u8>,
}

impl KtxBuilder {
    pub fn new(gl_format: u32, gl_internal_format: u32, width: u32, height: u32) -> Self {
        Self {
            gl_type: if gl_format == 0 { 0 } else { GL_UNSIGNED_BYTE },
            gl_format,
            gl_internal_format,
            width,
            height,
            mipmap_levels: 1,
            foreign: false,
            kv: Vec::new(),
            kv_len: None,
            image_size: None,
            payload: Vec::new(),
        }
    }

    pub fn rgba8(width: u32, height: u32) -> Self {
        Self::new(GL_RGBA, GL_RGBA8, width, height)
    }

    pub fn compressed(internal: u32, width: u32, height: u32) -> Self {
        Self::new(0, internal, width, height)
    }

    pub fn foreign(mut self) -> Self {
        self.foreign = true;
        self
    }

    /// Add a key/value entry. Call after [`KtxBuilder::foreign`].
    pub fn key_value(mut self, key: &str, value: &str) -> Self {
        self.kv
            .extend_from_slice(&kv_entry(key, value.as_bytes(), self.foreign));
        self
    }

    /// `KTXorientation` entry.
    pub fn orientation(self, value: &str) -> Self {
        self.key_value("KTXorientation", value)
    }

    /// Append raw bytes to the key/value block.
    pub fn raw_kv(mut self, bytes: &[u8]) -> Self {
        self.kv.extend_from_slice(bytes);
        self
    }

    /// Declare a key/value length different from the bytes written.
    pub fn kv_len(mut self, len: u32) -> Self {
        self.kv_len = Some(len);
        self
    }

    /// Declare an image size different from the payload length.
    pub fn image_size(mut self, size: u32) -> Self {
        self.image_size = Some(size);
        self
    }

    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = payload;
        self
    }

    fn u32(&self, v: u32) -> [u8; 4] {
        if self.foreign {
            v.swap_bytes().to_ne_bytes()
        } else {
            v.to_ne_bytes()
        }
    }

    pub fn header_only(&self) -> Vec<u8> {
        let mut out = KTX_IDENTIFIER.to_vec();
        let fields = [
            0x0403_0201,
            self.gl_type,
            1,
            self.gl_format,
            self.gl_internal_format,
            self.gl_format,
            self.width,
            self.height,
            0,
            0,
            1,
            self.mipmap_levels,
            self.kv_len.unwrap_or(self.kv.len() as u32),
        ];
        for v in fields {
            out.extend_from_slice(&self.u32(v));
        }
        out
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = self.header_only();
        out.extend_from_slice(&self.kv);
        while out.len() % 4 != 0 {
            out.push(0);
        }
        let size = self.image_size.unwrap_or(self.payload.len() as u32);
        out.extend_from_slice(&self.u32(size));
        out.extend_from_slice(&self.payload);
        out
    }
}

/// Distinct bytes for every position so row order is observable.
pub fn gradient(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 7 + i / 251) as u8).collect()
}

/// One DXT1 block of a single RGB565 colour.
pub fn dxt1_solid(color565: u16) -> [u8; 8] {
    let c = color565.to_le_bytes();
    [c[0], c[1], 0, 0, 0, 0, 0, 0]
}
