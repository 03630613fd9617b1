use thiserror::Error;

/// Field-level failures raised by the byte readers in [`crate::field`] and
/// [`crate::time`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("requested bytes {offset}..{end} out of range (buffer is {available} bytes)")]
    OutOfRange {
        offset: usize,
        end: usize,
        available: usize,
    },

    #[error("unsupported width for numeric conversion: {0} bytes")]
    InvalidWidth(usize),

    #[error("timestamp field must be exactly 8 bytes, got {0}")]
    InvalidLength(usize),

    #[error("epoch value {0} does not map to a representable instant")]
    TimestampOutOfRange(u64),

    #[error("negative length {0} in header field")]
    NegativeLength(i64),

    #[error("fft_length {fft_length} is shorter than report_len {report_len}")]
    InvalidPadding { fft_length: i64, report_len: i64 },
}

/// A field-level failure tagged with the packet field that was being decoded.
///
/// Decoders stop at the first failing field; no partial record is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to decode field '{field}': {source}")]
pub struct DecodeError {
    pub field: &'static str,
    #[source]
    pub source: FieldError,
}

impl DecodeError {
    pub fn new(field: &'static str, source: FieldError) -> Self {
        Self { field, source }
    }
}

/// Errors from the output boundary.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown sink '{0}'")]
    UnknownSink(String),

    #[error("sink backend error: {0}")]
    Backend(String),
}
