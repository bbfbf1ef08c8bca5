//! The read → decode → dispatch → write loop over a duplex byte stream.

use tokio::io::{AsyncRead, AsyncWrite, Stdin, Stdout};

use crate::framing::{Framer, FramingError};
use crate::protocol::{codec, ProtocolHandler};
use crate::signal::ShutdownFlag;

use super::writer::ResponseWriter;

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// `exit` was received.
    Exit,
    /// A termination signal was observed between messages.
    Signal,
    /// The input stream ended.
    EndOfStream,
    /// Reading from the input stream failed.
    ReadFailure,
}

/// Serves one connection, one message at a time.
pub struct StdioTransport<R, W> {
    framer: Framer<R>,
    writer: ResponseWriter<W>,
    handler: ProtocolHandler,
    shutdown: ShutdownFlag,
}

impl StdioTransport<Stdin, Stdout> {
    /// Serve over the process's stdin and stdout.
    pub fn new(handler: ProtocolHandler, shutdown: ShutdownFlag) -> Self {
        Self::with_streams(tokio::io::stdin(), tokio::io::stdout(), handler, shutdown)
    }
}

impl<R, W> StdioTransport<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Serve over arbitrary streams.
    pub fn with_streams(
        reader: R,
        writer: W,
        handler: ProtocolHandler,
        shutdown: ShutdownFlag,
    ) -> Self {
        Self {
            framer: Framer::new(reader),
            writer: ResponseWriter::new(writer),
            handler,
            shutdown,
        }
    }

    /// Override the inbound header byte cap (default
    /// [`crate::framing::DEFAULT_MAX_HEADER_BYTES`]).
    pub fn with_max_header_bytes(mut self, max_header_bytes: usize) -> Self {
        self.framer = self.framer.with_max_header_bytes(max_header_bytes);
        self
    }

    /// The protocol handler, for inspecting state after the loop.
    pub fn handler(&self) -> &ProtocolHandler {
        &self.handler
    }

    /// Recover the output stream.
    pub fn into_writer(self) -> W {
        self.writer.into_inner()
    }

    /// Run until `exit`, a signal, or end-of-stream.
    pub async fn run(&mut self) -> ExitReason {
        tracing::info!(
            server = %self.handler.identity().name,
            version = %self.handler.identity().version,
            tools = self.handler.registry().len(),
            "Starting message loop"
        );

        let reason = loop {
            if self.shutdown.is_requested() {
                self.handler.signal_shutdown();
                break ExitReason::Signal;
            }

            let body = match self.framer.next_message().await {
                Ok(Some(body)) => body,
                Ok(None) => break ExitReason::EndOfStream,
                Err(e) if e.is_recoverable() => {
                    log_framing_error(&e);
                    continue;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Input stream failed");
                    break ExitReason::ReadFailure;
                }
            };

            let message = match codec::decode(&body) {
                Ok(message) => message,
                Err(e) => {
                    tracing::error!(error = %e, "Dropping undecodable message");
                    continue;
                }
            };

            if let Some(response) = self.handler.handle_message(message).await {
                self.writer.send(&response).await;
            }

            if self.handler.is_terminated() {
                break ExitReason::Exit;
            }
        };

        tracing::info!(reason = ?reason, state = %self.handler.state(), "Message loop stopped");
        reason
    }
}

fn log_framing_error(error: &FramingError) {
    tracing::error!(error = %error, "Failed to read a valid message; skipping");
}
