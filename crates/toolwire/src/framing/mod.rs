//! Inbound message framing.
//!
//! Each message on the wire is a header block (at minimum a
//! `Content-Length` field) ended by a blank line, followed by exactly that
//! many bytes of UTF-8 body:
//!
//! ```text
//! Content-Length: <length>\r\n
//! \r\n
//! <body>
//! ```

pub mod header;

use std::string::FromUtf8Error;

use tokio::io::{AsyncRead, AsyncReadExt};

pub use header::{
    find_terminator, parse_content_length, Terminator, TerminatorKind, DEFAULT_MAX_HEADER_BYTES,
};

const READ_CHUNK: usize = 8 * 1024;

/// Failure to extract one message from the stream.
#[derive(Debug, thiserror::Error)]
pub enum FramingError {
    /// No terminator within the header byte cap.
    #[error("header exceeds {limit} bytes without a terminator")]
    HeaderTooLarge {
        /// Configured cap.
        limit: usize,
    },

    /// Header block has no `Content-Length` value.
    #[error("no Content-Length in header")]
    MissingLength,

    /// `Content-Length` digits do not fit in a `usize`.
    #[error("invalid Content-Length value: {0}")]
    InvalidLength(String),

    /// Stream ended inside a header block.
    #[error("stream ended after {received} header bytes")]
    TruncatedHeader {
        /// Header bytes seen before end-of-stream.
        received: usize,
    },

    /// Stream ended before the announced body length was read.
    #[error("stream ended after {received} of {expected} body bytes")]
    UnexpectedEof {
        /// Announced `Content-Length`.
        expected: usize,
        /// Body bytes actually available.
        received: usize,
    },

    /// Body is not valid UTF-8.
    #[error("body is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] FromUtf8Error),

    /// Reading from the stream failed.
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
}

impl FramingError {
    /// Whether the loop may try to read another message after this error.
    ///
    /// Only a failing reader is unrecoverable; every other error discards the
    /// offending bytes and leaves the stream positioned for the next attempt.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, FramingError::Io(_))
    }
}

/// Reads length-prefixed message bodies from a byte stream.
///
/// Bytes read past the end of one message are kept for the next call, so
/// the framer must be the only reader of the stream.
pub struct Framer<R> {
    reader: R,
    buffer: Vec<u8>,
    max_header_bytes: usize,
}

impl<R: AsyncRead + Unpin> Framer<R> {
    /// Create a framer with the default header cap.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            max_header_bytes: DEFAULT_MAX_HEADER_BYTES,
        }
    }

    /// Override the header byte cap.
    pub fn with_max_header_bytes(mut self, max_header_bytes: usize) -> Self {
        self.max_header_bytes = max_header_bytes;
        self
    }

    /// Read the next complete message body.
    ///
    /// Returns `Ok(None)` at a clean end-of-stream (nothing but whitespace
    /// left). After any recoverable error the framer can be called again.
    pub async fn next_message(&mut self) -> Result<Option<String>, FramingError> {
        let terminator = match self.read_header().await? {
            Some(terminator) => terminator,
            None => return Ok(None),
        };

        let length = match parse_content_length(&self.buffer[..terminator.start]) {
            Ok(length) => length,
            Err(e) => {
                self.buffer.drain(..terminator.end());
                return Err(e);
            }
        };

        let body_start = terminator.end();
        tracing::trace!(
            terminator = ?terminator.kind,
            header_len = terminator.start,
            content_length = length,
            "Header parsed"
        );

        while self.buffer.len() - body_start < length {
            if self.fill().await? == 0 {
                let received = self.buffer.len() - body_start;
                self.buffer.clear();
                return Err(FramingError::UnexpectedEof {
                    expected: length,
                    received,
                });
            }
        }

        let body: Vec<u8> = self
            .buffer
            .drain(..body_start + length)
            .skip(body_start)
            .collect();

        Ok(Some(String::from_utf8(body)?))
    }

    /// Accumulate bytes until a terminator is buffered.
    async fn read_header(&mut self) -> Result<Option<Terminator>, FramingError> {
        loop {
            if let Some(terminator) = find_terminator(&self.buffer) {
                if terminator.start > self.max_header_bytes {
                    return Err(self.reject_oversized_header());
                }
                return Ok(Some(terminator));
            }

            if self.buffer.len() > self.max_header_bytes {
                return Err(self.reject_oversized_header());
            }

            if self.fill().await? == 0 {
                if self.buffer.iter().all(u8::is_ascii_whitespace) {
                    self.buffer.clear();
                    return Ok(None);
                }
                let received = self.buffer.len();
                self.buffer.clear();
                return Err(FramingError::TruncatedHeader { received });
            }
        }
    }

    fn reject_oversized_header(&mut self) -> FramingError {
        tracing::debug!(
            discarded = self.buffer.len(),
            "Discarding oversized header"
        );
        self.buffer.clear();
        FramingError::HeaderTooLarge {
            limit: self.max_header_bytes,
        }
    }

    async fn fill(&mut self) -> Result<usize, FramingError> {
        self.buffer.reserve(READ_CHUNK);
        Ok(self.reader.read_buf(&mut self.buffer).await?)
    }
}
