//! Random-access byte sources a [`crate::KtxFile`] reads from.

use alloc::vec::Vec;

use crate::error::KtxError;

/// A seekable, sized byte source.
///
/// Reads are positioned: every call names its own offset, so the source
/// needs no notion of a current position.
pub trait KtxSource {
    /// Total size in bytes.
    fn size(&mut self) -> Result<u64, KtxError>;

    /// Read up to `buf.len()` bytes at `offset`. Returns the number of bytes
    /// read, which is short only at end of input.
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, KtxError>;

    /// Read exactly `buf.len()` bytes at `offset`.
    fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), KtxError> {
        let n = self.read_at(offset, buf)?;
        if n != buf.len() {
            return Err(KtxError::UnexpectedEof);
        }
        Ok(())
    }
}

fn slice_read_at(data: &[u8], offset: u64, buf: &mut [u8]) -> usize {
    let Ok(start) = usize::try_from(offset) else {
        return 0;
    };
    let available = data.get(start..).unwrap_or(&[]);
    let n = available.len().min(buf.len());
    buf[..n].copy_from_slice(&available[..n]);
    n
}

impl KtxSource for &[u8] {
    fn size(&mut self) -> Result<u64, KtxError> {
        Ok(self.len() as u64)
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, KtxError> {
        Ok(slice_read_at(self, offset, buf))
    }
}

impl KtxSource for Vec<u8> {
    fn size(&mut self) -> Result<u64, KtxError> {
        Ok(self.len() as u64)
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, KtxError> {
        Ok(slice_read_at(self, offset, buf))
    }
}

/// Adapter for any `Read + Seek` (files, cursors).
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct IoSource<R> {
    inner: R,
}

#[cfg(feature = "std")]
impl<R: std::io::Read + std::io::Seek> IoSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

#[cfg(feature = "std")]
impl<R: std::io::Read + std::io::Seek> KtxSource for IoSource<R> {
    fn size(&mut self) -> Result<u64, KtxError> {
        Ok(self.inner.seek(std::io::SeekFrom::End(0))?)
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<usize, KtxError> {
        self.inner.seek(std::io::SeekFrom::Start(offset))?;
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }
}
