//! Message framing for the stdio transport
//!
//! MCP clients normally frame messages with LSP-style headers:
//!
//! ```text
//! Content-Length: 40\r\n
//! \r\n
//! {"jsonrpc":"2.0","id":1,"method":"ping"}
//! ```
//!
//! For local smoke tests we also accept one bare JSON object per line. The
//! framing is detected per message: a first line starting with `{` is a whole
//! message, anything else opens a header block. Responses are always written
//! with Content-Length framing.

use std::io;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::mcp::protocol::JsonRpcResponse;

/// Largest payload we are willing to allocate for a single frame
pub const MAX_FRAME_BYTES: usize = 64 * 1024 * 1024;

const CONTENT_LENGTH: &str = "Content-Length";

/// Errors raised while reading or writing frames
///
/// All of these are fatal for the serve loop.
#[derive(Error, Debug)]
pub enum FramingError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("received empty message")]
    EmptyMessage,

    #[error("missing Content-Length header")]
    MissingContentLength,

    #[error("invalid Content-Length value: {0:?}")]
    InvalidContentLength(String),

    #[error("frame of {0} bytes exceeds the maximum frame size")]
    FrameTooLarge(usize),

    #[error("stream ended in the middle of a header block")]
    Truncated,

    #[error("failed to read payload of {expected} bytes: {source}")]
    TruncatedPayload {
        expected: usize,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Reads one message payload at a time from a buffered byte stream
///
/// Every frame, whichever framing it uses, is bounded by `max_frame_bytes`:
/// a bare JSON line, the whole header block and a Content-Length payload are
/// each rejected once they would exceed it.
pub struct FrameReader<R> {
    reader: R,
    line: Vec<u8>,
    max_frame_bytes: usize,
}

impl<R> FrameReader<R>
where
    R: AsyncBufRead + Unpin,
{
    pub fn new(reader: R) -> Self {
        Self::with_max_frame_bytes(reader, MAX_FRAME_BYTES)
    }

    /// Create a reader with a custom frame size limit
    pub fn with_max_frame_bytes(reader: R, max_frame_bytes: usize) -> Self {
        Self {
            reader,
            line: Vec::new(),
            max_frame_bytes,
        }
    }

    /// Read the next frame
    ///
    /// Returns `Ok(None)` on a clean end of stream.
    pub async fn next_frame(&mut self) -> Result<Option<Vec<u8>>, FramingError> {
        let terminated = self.read_line(self.max_frame_bytes).await?;
        let first = trim_ascii(&self.line);

        if !terminated {
            if first.is_empty() {
                return Ok(None);
            }
            if first.starts_with(b"{") {
                return Ok(Some(first.to_vec()));
            }
            return Err(FramingError::Truncated);
        }

        if first.is_empty() {
            return Err(FramingError::EmptyMessage);
        }
        if first.starts_with(b"{") {
            return Ok(Some(first.to_vec()));
        }

        let mut header_bytes = self.line.len();
        let mut headers = vec![String::from_utf8_lossy(trim_line_end(&self.line)).into_owned()];
        loop {
            let budget = self.max_frame_bytes.saturating_sub(header_bytes);
            if !self.read_line(budget).await? {
                return Err(FramingError::Truncated);
            }
            header_bytes += self.line.len();
            let clean = trim_line_end(&self.line);
            if clean.is_empty() {
                break;
            }
            headers.push(String::from_utf8_lossy(clean).into_owned());
        }

        let length = parse_content_length(&headers)?;
        if length > self.max_frame_bytes {
            return Err(FramingError::FrameTooLarge(length));
        }
        let mut payload = vec![0u8; length];
        self.reader
            .read_exact(&mut payload)
            .await
            .map_err(|source| FramingError::TruncatedPayload {
                expected: length,
                source,
            })?;

        Ok(Some(payload))
    }

    /// Fill `self.line` with the next line of at most `budget` bytes;
    /// returns whether it ended in `\n`
    async fn read_line(&mut self, budget: usize) -> Result<bool, FramingError> {
        self.line.clear();
        let limit = u64::try_from(budget).unwrap_or(u64::MAX).saturating_add(1);
        (&mut self.reader)
            .take(limit)
            .read_until(b'\n', &mut self.line)
            .await?;
        if self.line.len() > budget {
            return Err(FramingError::FrameTooLarge(self.line.len()));
        }
        Ok(self.line.last() == Some(&b'\n'))
    }
}

/// Find and validate the Content-Length header
pub fn parse_content_length<S: AsRef<str>>(headers: &[S]) -> Result<usize, FramingError> {
    for header in headers {
        let Some((name, value)) = header.as_ref().split_once(':') else {
            continue;
        };
        if !name.trim().eq_ignore_ascii_case(CONTENT_LENGTH) {
            continue;
        }

        let raw = value.trim();
        let length = match raw.parse::<i64>() {
            Ok(n) if n > 0 => n,
            _ => return Err(FramingError::InvalidContentLength(raw.to_string())),
        };
        let length = usize::try_from(length)
            .map_err(|_| FramingError::InvalidContentLength(raw.to_string()))?;
        if length > MAX_FRAME_BYTES {
            return Err(FramingError::FrameTooLarge(length));
        }
        return Ok(length);
    }

    Err(FramingError::MissingContentLength)
}

/// Writes Content-Length framed responses
pub struct FrameWriter<W> {
    writer: W,
}

impl<W> FrameWriter<W>
where
    W: AsyncWrite + Unpin,
{
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Serialize, frame and flush a single response
    pub async fn write_response(&mut self, response: &JsonRpcResponse) -> Result<(), FramingError> {
        let payload = serde_json::to_vec(response)?;
        self.write_frame(&payload).await
    }

    /// Frame and flush an already-encoded payload
    pub async fn write_frame(&mut self, payload: &[u8]) -> Result<(), FramingError> {
        let header = format!("{}: {}\r\n\r\n", CONTENT_LENGTH, payload.len());
        self.writer.write_all(header.as_bytes()).await?;
        self.writer.write_all(payload).await?;
        self.writer.flush().await?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn trim_ascii(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}

fn trim_line_end(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|b| *b != b'\n' && *b != b'\r')
        .map_or(0, |i| i + 1);
    &bytes[..end]
}
