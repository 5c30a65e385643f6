use std::io;
use thiserror::Error;

/// Errors produced while decoding a chunked transfer-coded body.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("invalid chunk size line: {reason}")]
    InvalidChunkSize { reason: String },

    #[error("metadata line too long, current: {current_size} exceed the limit {max_size}")]
    LineTooLong { current_size: usize, max_size: usize },

    #[error("invalid trailer line: {reason}")]
    InvalidTrailer { reason: String },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl DecodeError {
    pub fn invalid_chunk_size<S: ToString>(str: S) -> Self {
        Self::InvalidChunkSize { reason: str.to_string() }
    }

    pub fn line_too_long(current_size: usize, max_size: usize) -> Self {
        Self::LineTooLong { current_size, max_size }
    }

    pub fn invalid_trailer<S: ToString>(str: S) -> Self {
        Self::InvalidTrailer { reason: str.to_string() }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}
