//! Trailer header storage for chunked message bodies.
//!
//! After the last chunk, a chunked body may carry a block of header-like
//! trailer lines, terminated by an empty line
//! ([RFC 7230 Section 4.1.2](https://tools.ietf.org/html/rfc7230#section-4.1.2)).
//! This module provides the store those lines are recorded into, one raw line
//! at a time, as the decoder extracts them from the byte stream.

use bytes::BytesMut;
use http::{HeaderMap, HeaderName, HeaderValue};
use httparse::Status;

use crate::DecodeError;

/// A lazily-populated collection of trailer headers.
///
/// The store accepts one raw trailer line at a time via [`parse_header_line`]
/// and keeps the parsed result in an [`http::HeaderMap`]. Repeated header
/// names are appended, preserving every value.
///
/// Trailer semantics are not validated here: any syntactically well-formed
/// header line is recorded, including names that would be meaningless as a
/// trailer. That policy belongs to the caller.
///
/// [`parse_header_line`]: TrailerMap::parse_header_line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrailerMap {
    headers: HeaderMap,
}

impl TrailerMap {
    /// Creates an empty trailer store.
    pub fn new() -> Self {
        Self { headers: HeaderMap::new() }
    }

    /// Parses a single raw trailer line (without its CRLF terminator) and
    /// records the header it contains.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidTrailer`] if the line is not a valid
    /// header line, for example when the colon separator is missing or the
    /// name contains forbidden characters. A rejected line leaves the store
    /// unchanged.
    pub fn parse_header_line(&mut self, line: &[u8]) -> Result<(), DecodeError> {
        // httparse wants a terminated header block, so close the single line
        let mut raw = BytesMut::with_capacity(line.len() + 4);
        raw.extend_from_slice(line);
        raw.extend_from_slice(b"\r\n\r\n");

        let mut parsed = [httparse::EMPTY_HEADER; 1];
        match httparse::parse_headers(&raw, &mut parsed) {
            Ok(Status::Complete((_, headers))) => {
                for header in headers {
                    let name = HeaderName::from_bytes(header.name.as_bytes())
                        .map_err(|e| DecodeError::invalid_trailer(e.to_string()))?;
                    let value = HeaderValue::from_bytes(header.value)
                        .map_err(|e| DecodeError::invalid_trailer(e.to_string()))?;
                    self.headers.append(name, value);
                }
                Ok(())
            }
            Ok(Status::Partial) => Err(DecodeError::invalid_trailer("incomplete header line")),
            Err(e) => Err(DecodeError::invalid_trailer(e.to_string())),
        }
    }

    /// Returns the recorded trailer headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Consumes the store, returning the underlying header map.
    pub fn into_headers(self) -> HeaderMap {
        self.headers
    }

    /// Returns the number of recorded trailer values.
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Returns `true` if no trailer has been recorded.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}
