//! Stream-friendly wrapper around the in-place chunked decoder.
//!
//! The core [`ChunkedDecoder`] works on caller-owned byte slices. This module
//! adapts it to the [`tokio_util::codec::Decoder`] trait so a chunked body
//! can be consumed through `FramedRead` or any other codec-driven pipeline,
//! yielding owned [`Bytes`] chunks followed by an end-of-body marker.

use bytes::{Bytes, BytesMut};
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::decoder::ChunkedDecoder;
use crate::trailer::TrailerMap;
use crate::DecodeError;

/// An item produced while draining a chunked body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyItem {
    /// A run of decoded content bytes
    Chunk(Bytes),
    /// Marks the end of the body
    Eof,
}

impl BodyItem {
    /// Returns true if this item marks the end of the body
    #[inline]
    pub fn is_eof(&self) -> bool {
        matches!(self, BodyItem::Eof)
    }

    /// Returns true if this item contains content bytes
    #[inline]
    pub fn is_chunk(&self) -> bool {
        matches!(self, BodyItem::Chunk(_))
    }

    /// Returns the content bytes if this item is a chunk
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            BodyItem::Chunk(bytes) => Some(bytes),
            BodyItem::Eof => None,
        }
    }
}

/// A [`Decoder`] that strips the chunked transfer-coding from a body stream.
///
/// Decoded content is handed out as [`BodyItem::Chunk`]; once the last chunk
/// and the trailer section have been consumed a single [`BodyItem::Eof`] is
/// emitted. Bytes arriving after the end of the body are left untouched in
/// the source buffer, where the owner of the connection can pick them up
/// (they typically belong to the next pipelined message).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkedBodyDecoder {
    inner: ChunkedDecoder,
    eof_emitted: bool,
}

impl ChunkedBodyDecoder {
    /// Creates a new decoder positioned before the first chunk-size line.
    pub fn new() -> Self {
        Self { inner: ChunkedDecoder::new(), eof_emitted: false }
    }

    /// Creates a decoder with a cap on carried-over metadata lines, see
    /// [`ChunkedDecoder::with_max_line_bytes`].
    pub fn with_max_line_bytes(max: usize) -> Self {
        Self { inner: ChunkedDecoder::with_max_line_bytes(max), eof_emitted: false }
    }

    /// Returns the trailer headers, if any trailer line has been recorded.
    pub fn trailers(&self) -> Option<&TrailerMap> {
        self.inner.trailers()
    }

    /// Takes ownership of the trailer headers.
    pub fn take_trailers(&mut self) -> Option<TrailerMap> {
        self.inner.take_trailers()
    }
}

impl Decoder for ChunkedBodyDecoder {
    type Item = BodyItem;
    type Error = DecodeError;

    /// Decodes as much of the source buffer as possible.
    ///
    /// # Returns
    /// - `Ok(Some(BodyItem::Chunk(bytes)))` when content was decoded
    /// - `Ok(Some(BodyItem::Eof))` once, when the body is complete
    /// - `Ok(None)` when more data is needed
    /// - `Err(DecodeError)` if the chunked framing is invalid
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let decoded = self.inner.decode(src.as_mut())?;

        let content = src.split_to(decoded.content_read);
        // everything past the unconsumed tail was metadata, drop it
        src.truncate(decoded.content_remaining);

        if !content.is_empty() {
            trace!(len = content.len(), "read chunked bytes");
            return Ok(Some(BodyItem::Chunk(content.freeze())));
        }

        if self.inner.reached_eof() && !self.eof_emitted {
            trace!("finished reading chunked body");
            self.eof_emitted = true;
            return Ok(Some(BodyItem::Eof));
        }

        Ok(None)
    }
}
