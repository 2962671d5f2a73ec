//! Content-Length framing for the JSON-RPC byte stream.
//!
//! A frame is a block of `Name: value` header lines, a blank line, and a
//! body of exactly `Content-Length` bytes:
//!
//! ```text
//! Content-Length: 52\r\n
//! \r\n
//! {"jsonrpc":"2.0","id":1,"method":"initialize", ...}
//! ```
//!
//! Header names are case-insensitive. `Content-Length` is required; other
//! headers (notably `Content-Type`) are ignored on input.

use std::io::{self, Read, Write};

use thiserror::Error;

/// A fatal framing problem. Any of these ends the connection.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("read: {0}")]
    Io(#[from] io::Error),
    #[error("bad header: {0}")]
    BadHeader(String),
    #[error("bad content-length: {0}")]
    BadContentLength(String),
    #[error("missing content-length header")]
    MissingContentLength,
}

const HEADER_DELIMITER: &[u8] = b"\r\n\r\n";

/// Incremental frame reader. Buffers raw input until a complete frame is
/// available; a partially received frame consumes nothing until the rest
/// arrives.
pub struct FrameReader<R> {
    reader: R,
    pending: Vec<u8>,
}

impl<R: Read> FrameReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: Vec::new(),
        }
    }

    /// Reads the next complete frame body. `Ok(None)` signals end of input.
    pub fn next_frame(&mut self) -> Result<Option<Vec<u8>>, TransportError> {
        loop {
            if let Some((body_start, length)) = parse_header(&self.pending)? {
                if self.pending.len() - body_start >= length {
                    let frame = self.pending[body_start..body_start + length].to_vec();
                    self.pending.drain(..body_start + length);
                    return Ok(Some(frame));
                }
            }

            let mut chunk = [0u8; 4096];
            let n = self.reader.read(&mut chunk)?;
            if n == 0 {
                // EOF; a trailing partial frame is dropped.
                return Ok(None);
            }
            self.pending.extend_from_slice(&chunk[..n]);
        }
    }
}

/// Looks for a complete header block. Returns the body start offset and the
/// declared content length once the terminating blank line has arrived.
fn parse_header(pending: &[u8]) -> Result<Option<(usize, usize)>, TransportError> {
    let Some(end) = find(pending, HEADER_DELIMITER) else {
        return Ok(None);
    };

    let headers = std::str::from_utf8(&pending[..end])
        .map_err(|_| TransportError::BadHeader("not valid utf-8".to_string()))?;

    for line in headers.split("\r\n") {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        if name.trim().eq_ignore_ascii_case("content-length") {
            let length = value
                .trim()
                .parse()
                .map_err(|_| TransportError::BadContentLength(value.trim().to_string()))?;
            return Ok(Some((end + HEADER_DELIMITER.len(), length)));
        }
    }

    Err(TransportError::MissingContentLength)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Writes one outbound frame. Every frame carries both headers so clients
/// never have to sniff the body encoding.
pub fn write_frame(writer: &mut impl Write, body: &[u8]) -> io::Result<()> {
    write!(
        writer,
        "Content-Length: {}\r\nContent-Type: application/vscode-jsonrpc; charset=utf-8\r\n\r\n",
        body.len()
    )?;
    writer.write_all(body)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Yields at most `step` bytes per read so frames arrive in pieces.
    struct Trickle<R> {
        inner: R,
        step: usize,
    }

    impl<R: Read> Read for Trickle<R> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let cap = buf.len().min(self.step);
            self.inner.read(&mut buf[..cap])
        }
    }

    fn frame(body: &str) -> Vec<u8> {
        format!("Content-Length: {}\r\n\r\n{}", body.len(), body).into_bytes()
    }

    #[test]
    fn reads_consecutive_frames() {
        let mut input = frame("{\"a\":1}");
        input.extend_from_slice(&frame("{\"b\":2}"));
        let mut reader = FrameReader::new(Cursor::new(input));
        assert_eq!(reader.next_frame().unwrap().unwrap(), b"{\"a\":1}");
        assert_eq!(reader.next_frame().unwrap().unwrap(), b"{\"b\":2}");
        assert!(reader.next_frame().unwrap().is_none());
    }

    #[test]
    fn buffers_partial_frames() {
        let mut input = frame("{\"slow\":true}");
        input.extend_from_slice(&frame("{}"));
        let mut reader = FrameReader::new(Trickle {
            inner: Cursor::new(input),
            step: 3,
        });
        assert_eq!(reader.next_frame().unwrap().unwrap(), b"{\"slow\":true}");
        assert_eq!(reader.next_frame().unwrap().unwrap(), b"{}");
        assert!(reader.next_frame().unwrap().is_none());
    }

    #[test]
    fn header_names_are_case_insensitive() {
        let input = b"CONTENT-LENGTH: 2\r\nContent-Type: application/vscode-jsonrpc\r\n\r\n{}".to_vec();
        let mut reader = FrameReader::new(Cursor::new(input));
        assert_eq!(reader.next_frame().unwrap().unwrap(), b"{}");
    }

    #[test]
    fn missing_content_length_is_fatal() {
        let input = b"Content-Type: application/vscode-jsonrpc\r\n\r\n{}".to_vec();
        let mut reader = FrameReader::new(Cursor::new(input));
        assert!(matches!(
            reader.next_frame(),
            Err(TransportError::MissingContentLength)
        ));
    }

    #[test]
    fn non_integer_content_length_is_fatal() {
        let input = b"Content-Length: nope\r\n\r\n{}".to_vec();
        let mut reader = FrameReader::new(Cursor::new(input));
        assert!(matches!(
            reader.next_frame(),
            Err(TransportError::BadContentLength(_))
        ));
    }

    #[test]
    fn eof_mid_frame_ends_the_stream() {
        let input = b"Content-Length: 100\r\n\r\n{\"truncated\":".to_vec();
        let mut reader = FrameReader::new(Cursor::new(input));
        assert!(reader.next_frame().unwrap().is_none());
    }

    #[test]
    fn written_frames_carry_both_headers() {
        let mut out = Vec::new();
        write_frame(&mut out, b"{}").unwrap();
        assert_eq!(
            out,
            b"Content-Length: 2\r\nContent-Type: application/vscode-jsonrpc; charset=utf-8\r\n\r\n{}"
        );
    }
}
