/// Errors that can occur while encoding or decoding frames.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// The stream closed mid-frame, before the expected byte count arrived.
    #[error("truncated frame (stream closed mid-frame)")]
    TruncatedFrame,

    /// The stream closed cleanly at a frame boundary.
    #[error("stream closed")]
    Closed,

    /// The payload exceeds the 16-bit length field.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// A payload field ended before its declared length.
    #[error("truncated payload field (wanted {wanted} bytes, {remaining} remaining)")]
    TruncatedPayload { wanted: usize, remaining: usize },

    /// A string field is not valid UTF-8.
    #[error("invalid UTF-8 in string field: {0}")]
    InvalidString(#[from] std::str::Utf8Error),

    /// An I/O error while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WireError>;
