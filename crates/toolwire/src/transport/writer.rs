//! Outbound framing: header and body written as one unit.

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::protocol::codec;
use crate::types::Response;

/// Which write path delivered a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePath {
    /// Header and body went out in one write.
    Single,
    /// The single write failed; header and body were written and flushed
    /// separately.
    Split,
}

/// Build the header line for a body of `len` bytes.
pub fn frame_header(len: usize) -> String {
    format!("Content-Length: {len}\r\n\r\n")
}

/// Frames responses onto an output stream.
///
/// A frame is first written with a single `write_all` of header and body
/// together. If that fails, the writer retries with the header and body as
/// two writes, flushing after each. A failure partway through the first
/// attempt can leave a partial frame on the stream before the retry; the host
/// sees that as a framing error on its side.
pub struct ResponseWriter<W> {
    writer: W,
}

impl<W: AsyncWrite + Unpin> ResponseWriter<W> {
    /// Wrap an output stream.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Recover the underlying stream.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Encode and send a response. Failures are logged, never returned.
    pub async fn send(&mut self, response: &Response) {
        let body = match codec::encode(response) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(id = %response.id(), error = %e, "Failed to encode response");
                return;
            }
        };

        match self.write_frame(&body).await {
            Ok(path) => tracing::debug!(
                id = %response.id(),
                content_length = body.len(),
                path = ?path,
                "Response sent"
            ),
            Err(e) => tracing::error!(
                id = %response.id(),
                error = %e,
                "Failed to send response"
            ),
        }
    }

    /// Write one frame around an already encoded body.
    pub async fn write_frame(&mut self, body: &[u8]) -> std::io::Result<WritePath> {
        let header = frame_header(body.len());

        let mut frame = Vec::with_capacity(header.len() + body.len());
        frame.extend_from_slice(header.as_bytes());
        frame.extend_from_slice(body);

        match self.write_flushed(&frame).await {
            Ok(()) => Ok(WritePath::Single),
            Err(e) => {
                tracing::warn!(error = %e, "Single write failed; retrying header and body separately");
                self.write_flushed(header.as_bytes()).await?;
                self.write_flushed(body).await?;
                Ok(WritePath::Split)
            }
        }
    }

    async fn write_flushed(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        self.writer.write_all(bytes).await?;
        self.writer.flush().await
    }
}
