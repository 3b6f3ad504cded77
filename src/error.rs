// ─── Error ──────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("out of bounds: {len} byte(s) at offset {offset:#x} exceed buffer of {buf_len} bytes")]
    OutOfBounds {
        offset: usize,
        len: usize,
        buf_len: usize,
    },
    #[error("value {value:#x} does not fit in {width} byte(s)")]
    ValueOutOfRange { value: u64, width: usize },
    #[error("width of {width} bytes exceeds the 8-byte value limit")]
    UnsupportedWidth { width: usize },
    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("not a valid save file: {0}")]
    InvalidFormat(String),
    #[error("format config error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for SaveError {
    fn from(e: serde_json::Error) -> Self {
        SaveError::Config(e.to_string())
    }
}
