//! An incremental decoder for the HTTP/1.1 chunked transfer-coding
//!
//! This crate turns a byte stream encoded with the "chunked" transfer-coding
//! ([RFC 7230 Section 4.1](https://tools.ietf.org/html/rfc7230#section-4.1))
//! back into the original content stream. It is transport-agnostic: the bytes
//! can come from a socket, a file, a test vector — the decoder only ever sees
//! the buffers it is handed, and any chunk-size line, CRLF terminator, or
//! trailer line may be split across calls at any byte boundary.
//!
//! # Features
//!
//! - Incremental decoding across arbitrarily-fragmented input buffers
//! - In-place operation: decoded content accumulates contiguously at the
//!   start of the caller's buffer, no second content buffer is allocated
//! - Chunk-extensions stripped, never interpreted
//! - Trailer headers captured into an [`http::HeaderMap`]-backed store
//! - Optional cap on how much metadata a peer can make the decoder buffer
//! - A [`tokio_util::codec::Decoder`] adapter for stream pipelines
//!
//! # Example
//!
//! ```no_run
//! use std::io::Read;
//! use tracing::{info, Level};
//! use tracing_subscriber::FmtSubscriber;
//! use dechunk::ChunkedDecoder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Initialize logging
//!     let subscriber = FmtSubscriber::builder()
//!         .with_max_level(Level::INFO)
//!         .finish();
//!     tracing::subscriber::set_global_default(subscriber)
//!         .expect("setting default subscriber failed");
//!
//!     let mut source = std::io::stdin();
//!     let mut decoder = ChunkedDecoder::new();
//!     let mut content = Vec::new();
//!     let mut buf = vec![0u8; 4096];
//!     let mut pending = 0;
//!
//!     // feed the decoder whatever the transport hands us, as it arrives
//!     while !decoder.reached_eof() {
//!         let n = source.read(&mut buf[pending..])?;
//!         if n == 0 {
//!             break;
//!         }
//!
//!         let decoded = decoder.decode(&mut buf[..pending + n])?;
//!         content.extend_from_slice(&buf[..decoded.content_read]);
//!
//!         // carry unconsumed bytes into the next read
//!         buf.copy_within(decoded.content_read..decoded.content_read + decoded.content_remaining, 0);
//!         pending = decoded.content_remaining;
//!     }
//!
//!     info!(len = content.len(), "decoded chunked body");
//!     if let Some(trailers) = decoder.trailers() {
//!         info!(count = trailers.len(), "received trailers");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The crate is organized into a few small modules:
//!
//! - [`decoder`]: The core state machine, [`ChunkedDecoder`], with its
//!   in-place buffer-driving loop and cross-call line reassembly
//! - [`trailer`]: [`TrailerMap`], the store trailer header lines are parsed
//!   into
//! - [`codec`]: [`ChunkedBodyDecoder`], a `tokio_util` codec adapter over the
//!   core decoder
//! - [`error`]: [`DecodeError`]
//!
//! # Decoding model
//!
//! A chunked body interleaves three kinds of bytes: chunk-size lines
//! (hexadecimal, with optional `;`-delimited extensions), raw content octets,
//! and a trailing block of header lines terminated by an empty line. Content
//! octets are already in their final form, so [`ChunkedDecoder::decode`]
//! never copies them anywhere new; it only shifts the not-yet-processed tail
//! of the buffer leftward over each consumed metadata span. The result after
//! every call: decoded content at the front of the buffer, unconsumed bytes
//! (if any) right behind it, and an explicit count of each.
//!
//! A single decoder instance serves a single message body, driven
//! sequentially by its owner. Every call is a pure, bounded computation over
//! the bytes supplied; the decoder never blocks or waits for more input.
//!
//! # Limits
//!
//! By default nothing caps how much metadata a peer can send before a line
//! terminator, mirroring the permissiveness of the classic implementations;
//! callers that own message-size policy can opt into a bound with
//! [`ChunkedDecoder::with_max_line_bytes`]. Chunk sizes are `u64`; a size
//! line whose value overflows is rejected as malformed.

pub mod codec;
pub mod decoder;
pub mod error;
pub mod trailer;

mod utils;
pub(crate) use utils::ensure;

pub use codec::{BodyItem, ChunkedBodyDecoder};
pub use decoder::{ChunkedDecoder, Decoded};
pub use error::DecodeError;
pub use trailer::TrailerMap;
