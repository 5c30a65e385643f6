//! Incremental decoder for HTTP chunked transfer encoding.
//!
//! This module provides the core state machine that converts a chunked
//! transfer-coded byte stream, as specified in
//! [RFC 7230 Section 4.1](https://tools.ietf.org/html/rfc7230#section-4.1),
//! back into the original content stream.
//!
//! The decoder works in place: each call rewrites the caller's buffer so that
//! decoded content accumulates contiguously at its start, with the chunk
//! metadata (size lines, extensions, trailer lines) physically removed. It
//! makes no assumption about how the stream is fragmented; any delimiter may
//! be split across calls.

use std::cmp;
use std::mem;

use bytes::BytesMut;
use tracing::{trace, warn};

use crate::ensure;
use crate::trailer::TrailerMap;
use crate::DecodeError;

/// A decoder for handling HTTP chunked transfer encoding.
///
/// The decoder consumes the chunked format incrementally:
/// - Each chunk starts with its size in hexadecimal, optionally followed by
///   `;`-delimited extensions and CRLF
/// - Then the chunk data and CRLF
/// - A zero-sized chunk introduces the trailer section, terminated by an
///   empty line
///
/// One instance corresponds to exactly one message body. Create it when
/// chunked transfer-coding is detected on a message, feed it buffers of
/// newly-received bytes via [`decode`], and poll [`reached_eof`] to learn
/// when the body is complete. Once complete the decoder is terminal: any
/// further bytes are reported as unconsumed, never decoded.
///
/// # Example
///
/// ```
/// use dechunk::ChunkedDecoder;
///
/// let mut decoder = ChunkedDecoder::new();
/// let mut buf = b"5\r\nhello\r\n0\r\n\r\n".to_vec();
///
/// let decoded = decoder.decode(&mut buf)?;
/// assert_eq!(&buf[..decoded.content_read], b"hello");
/// assert_eq!(decoded.content_remaining, 0);
/// assert!(decoder.reached_eof());
/// # Ok::<(), dechunk::DecodeError>(())
/// ```
///
/// [`decode`]: ChunkedDecoder::decode
/// [`reached_eof`]: ChunkedDecoder::reached_eof
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkedDecoder {
    /// Bytes of raw content still owed by the chunk currently being emitted.
    /// Zero means "between chunks" or "in the trailer section".
    chunk_remaining: u64,
    /// True after the zero-size chunk's size line: lines are now trailer
    /// lines until an empty line is seen.
    wait_eof: bool,
    /// True once the empty line terminating the trailer section was seen.
    /// Monotonic, never reset.
    reached_eof: bool,
    /// Carry-over for a line fragment that arrived without a terminator.
    /// Non-empty only between calls.
    line_buf: BytesMut,
    /// Trailer headers, allocated on demand when the first trailer arrives.
    trailers: Option<TrailerMap>,
    /// Optional cap on carry-over growth, for callers that want to bound
    /// what a peer can make us buffer before a line terminator shows up.
    max_line_bytes: Option<usize>,
}

/// Bookkeeping returned by [`ChunkedDecoder::decode`].
///
/// After a call, the caller's buffer holds `content_read` bytes of decoded
/// content at its start, immediately followed by `content_remaining`
/// unconsumed bytes. The remaining count is non-zero only once the end of the
/// body has been reached and the buffer contained bytes beyond it, such as a
/// pipelined message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    /// Number of decoded content bytes now at the start of the buffer
    pub content_read: usize,
    /// Number of unconsumed bytes following the decoded content
    pub content_remaining: usize,
}

impl ChunkedDecoder {
    /// Creates a new decoder, positioned before the first chunk-size line.
    pub fn new() -> Self {
        Self {
            chunk_remaining: 0,
            wait_eof: false,
            reached_eof: false,
            line_buf: BytesMut::new(),
            trailers: None,
            max_line_bytes: None,
        }
    }

    /// Creates a decoder that rejects any chunk-size or trailer line whose
    /// carried-over fragment grows beyond `max` bytes.
    ///
    /// The default decoder buffers an unterminated line without bound, which
    /// lets a hostile peer grow the carry-over buffer indefinitely. Callers
    /// that own message-size limits can cap it here; exceeding the cap fails
    /// the decode with [`DecodeError::LineTooLong`].
    pub fn with_max_line_bytes(max: usize) -> Self {
        Self { max_line_bytes: Some(max), ..Self::new() }
    }

    /// Decodes chunked content in place.
    ///
    /// Repeatedly hands the decoder newly-received bytes; it mutates `buf` so
    /// that its first [`Decoded::content_read`] bytes are decoded content and
    /// the following [`Decoded::content_remaining`] bytes were left
    /// unconsumed. The original chunked-encoded bytes are destroyed in the
    /// process; no second content buffer is ever allocated.
    ///
    /// Chunk data requires no transformation, so those spans are counted
    /// through as-is. Metadata spans (chunk-size lines, trailer lines) are
    /// consumed and the tail of the buffer is shifted leftward over them with
    /// an overlapping move, keeping the content prefix contiguous.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidChunkSize`] when a chunk-size line
    /// contains no parseable hex digits. The framing of the stream is
    /// unrecoverable at that point and the caller must abort the message.
    /// With an opted-in line cap, [`DecodeError::LineTooLong`] is returned
    /// when an unterminated line outgrows it.
    pub fn decode(&mut self, buf: &mut [u8]) -> Result<Decoded, DecodeError> {
        trace!(count = buf.len(), "handling chunked content");

        let mut read = 0;
        let mut count = buf.len();

        while count > 0 {
            if self.chunk_remaining > 0 {
                // chunk data is literal content, count it through untouched
                let amt = cmp::min(self.chunk_remaining, count as u64) as usize;

                self.chunk_remaining -= amt as u64;
                read += amt;
                count -= amt;
            } else if self.reached_eof {
                // bytes beyond the body (e.g. a pipelined request) stay unconsumed
                break;
            } else {
                let consumed = self.parse_chunk_remaining(&buf[read..read + count])?;
                count -= consumed;

                if count > 0 {
                    // shift the unprocessed tail over the metadata span so the
                    // content prefix stays contiguous
                    buf.copy_within(read + consumed..read + consumed + count, read);
                }
            }
        }

        Ok(Decoded { content_read: read, content_remaining: count })
    }

    /// Returns `true` once the empty line terminating the trailer section has
    /// been seen and the body is complete.
    pub fn reached_eof(&self) -> bool {
        self.reached_eof
    }

    /// Returns the trailer headers, if any trailer line has been recorded.
    pub fn trailers(&self) -> Option<&TrailerMap> {
        self.trailers.as_ref()
    }

    /// Takes ownership of the trailer headers, leaving the decoder without any.
    pub fn take_trailers(&mut self) -> Option<TrailerMap> {
        self.trailers.take()
    }

    /// Extracts one logical line from `buf` and returns how many bytes were
    /// consumed as metadata.
    ///
    /// If a line terminator is present, the line (prefixed with any fragment
    /// carried over from earlier calls) is processed and the bytes through
    /// the terminator are consumed. Otherwise the whole span is buffered as a
    /// partial line and reported as consumed, with a trailing lone CR dropped
    /// so a later-arriving LF still closes the line.
    fn parse_chunk_remaining(&mut self, buf: &[u8]) -> Result<usize, DecodeError> {
        debug_assert_eq!(self.chunk_remaining, 0, "chunk remaining should be zero");
        debug_assert!(!buf.is_empty(), "parse should be called with data");

        let Some(pos) = buf.iter().position(|&b| b == b'\n') else {
            // no terminator yet: save the partial line and wait for more data
            let mut tail = buf.len();
            if buf[tail - 1] == b'\r' {
                tail -= 1;
            }
            self.line_buf.extend_from_slice(&buf[..tail]);

            if let Some(max) = self.max_line_bytes {
                ensure!(self.line_buf.len() <= max, DecodeError::line_too_long(self.line_buf.len(), max));
            }
            return Ok(buf.len());
        };

        // eliminate a CR preceding the LF
        let line_end = if pos > 0 && buf[pos - 1] == b'\r' { pos - 1 } else { pos };

        if self.line_buf.is_empty() {
            self.process_line(&buf[..line_end])?;
        } else {
            let mut line = mem::take(&mut self.line_buf);
            line.extend_from_slice(&buf[..line_end]);

            let processed = self.process_line(&line);

            // the carry-over is cleared whatever the outcome; keep its allocation
            line.clear();
            self.line_buf = line;
            processed?;
        }

        Ok(pos + 1)
    }

    /// Processes one reconstructed logical line according to the current phase.
    fn process_line(&mut self, line: &[u8]) -> Result<(), DecodeError> {
        if self.wait_eof {
            if line.is_empty() {
                trace!("reached end of chunked body");
                self.wait_eof = false;
                self.reached_eof = true;
            } else {
                trace!(len = line.len(), "got trailer line");
                let trailers = self.trailers.get_or_insert_with(TrailerMap::new);
                if let Err(e) = trailers.parse_header_line(line) {
                    // trailer syntax is the store's contract; a rejected line is dropped
                    warn!(cause = %e, "ignoring malformed trailer line");
                }
            }
            return Ok(());
        }

        // a stray blank line while expecting a chunk-size is absorbed
        if line.is_empty() {
            return Ok(());
        }

        // chunk-extensions are never interpreted
        let size_part = match line.iter().position(|&b| b == b';') {
            Some(pos) => &line[..pos],
            None => line,
        };

        self.chunk_remaining = parse_hex_size(size_part)?;

        // the last chunk: trailer lines follow, then the final empty line
        if self.chunk_remaining == 0 {
            self.wait_eof = true;
        }

        Ok(())
    }
}

/// Parses a chunk-size as an unsigned hexadecimal integer.
///
/// Leading and trailing ASCII whitespace is ignored and the hex run ends at
/// the first non-hex byte, so trailing junk after at least one digit is
/// tolerated. No digits at all is a fatal decode error, and so is a value
/// that overflows `u64`.
fn parse_hex_size(line: &[u8]) -> Result<u64, DecodeError> {
    let digits = line.trim_ascii();

    let mut size: u64 = 0;
    let mut parsed = 0;
    for &b in digits {
        let digit = match b {
            b'0'..=b'9' => b - b'0',
            b'a'..=b'f' => b - b'a' + 10,
            b'A'..=b'F' => b - b'A' + 10,
            _ => break,
        };

        size = size
            .checked_mul(16)
            .and_then(|s| s.checked_add(u64::from(digit)))
            .ok_or_else(|| DecodeError::invalid_chunk_size("value overflows u64"))?;
        parsed += 1;
    }

    ensure!(parsed > 0, DecodeError::invalid_chunk_size(format!("no hex digits in {:?}", String::from_utf8_lossy(line))));

    Ok(size)
}
