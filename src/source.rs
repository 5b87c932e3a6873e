//! Input boundary
//!
//! The parser is driven cooperatively by whoever supplies chunks; this
//! module is the seam where a transport plugs in. A source yields an
//! ordered sequence of byte chunks terminated by end-of-stream
//! (`Ok(None)`) or a transport error. Transport failures are distinct,
//! pre-parse/abort error kinds: they short-circuit before or abort an
//! in-flight parse, and are never confused with structural errors or
//! with traversal cancellation.

use std::io::Read;

use crate::error::ParseError;
use crate::tree::builder::TreeBuilder;
use crate::tree::node::TreeNode;

/// Buffer size for reading chunks
const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Failure reported by the byte source rather than the parser.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The exchange did not complete in time.
    #[error("transport timeout")]
    Timeout,

    /// The response carried a non-success status code.
    #[error("unsuccessful response status {0}")]
    Status(u16),

    /// The underlying stream failed.
    #[error("transport i/o: {0}")]
    Io(#[from] std::io::Error),
}

/// An ordered sequence of byte chunks with an explicit end.
///
/// Chunk sizes carry no meaning: a chunk may be empty and tag boundaries
/// never align with chunk boundaries on purpose.
pub trait ChunkSource {
    /// Produce the next chunk, `Ok(None)` at end of stream.
    fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, TransportError>;
}

/// Adapter that chunks any `Read` implementor with a fixed-size buffer.
pub struct ReadSource<R: Read> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: Read> ReadSource<R> {
    pub fn new(reader: R) -> Self {
        Self::with_chunk_size(reader, DEFAULT_CHUNK_SIZE)
    }

    pub fn with_chunk_size(reader: R, size: usize) -> Self {
        ReadSource {
            reader,
            buf: vec![0u8; size],
        }
    }
}

impl<R: Read> ChunkSource for ReadSource<R> {
    fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, TransportError> {
        let read = self.reader.read(&mut self.buf)?;
        if read == 0 {
            Ok(None)
        } else {
            Ok(Some(self.buf[..read].to_vec()))
        }
    }
}

/// Drive a builder to completion from a chunk source.
///
/// A transport failure aborts the in-flight parse and surfaces as
/// `ParseError::Transport`, distinct from any structural error.
pub fn parse_source<S: ChunkSource>(
    mut builder: TreeBuilder,
    mut source: S,
) -> Result<TreeNode, ParseError> {
    while let Some(chunk) = source.next_chunk()? {
        builder.push_chunk(&chunk)?;
    }
    builder.finish()
}
