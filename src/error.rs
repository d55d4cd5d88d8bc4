use alloc::string::String;
use enough::StopReason;

/// Errors from KTX parsing and texture decoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum KtxError {
    #[error("unrecognized format magic bytes")]
    UnrecognizedFormat,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("invalid texture data: {0}")]
    InvalidData(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("image size field is {declared} bytes, expected {expected}")]
    SizeMismatch { declared: u64, expected: u64 },

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("operation cancelled")]
    Cancelled(StopReason),

    #[cfg(feature = "std")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StopReason> for KtxError {
    fn from(r: StopReason) -> Self {
        KtxError::Cancelled(r)
    }
}
