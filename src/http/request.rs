//! Http request message.
//!
//! A request is a start line, a header block terminated by a blank
//! line, and an optional body whose length is declared by the
//! `Content-Length` header:
//!
//! ```text
//! POST /hello HTTP/1.1\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 5\r\n
//! \r\n
//! hello
//! ```

use std::collections::HashMap;
use std::io::{ErrorKind, Read};

use crate::error::{Error, ParseError};

/// Chunk size for [`Request::read_from`].
pub(crate) const READ_CHUNK: usize = 4096;

/// A parsed http message: start line, header map and raw body.
///
/// Header names keep the case they arrived with and a duplicate name
/// overwrites the earlier value (last write wins). Lookups through
/// [`header`](Self::header) are exact-case, no normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Request {
    pub start_line: String,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Request {
    /// Parse a complete request out of `buf`.
    ///
    /// A pure function of its input: no side effects, deterministic.
    /// The start line runs up to the first CRLF
    /// ([`ParseError::MalformedStartLine`] when there is none); header
    /// lines split on their first colon with the value
    /// whitespace-trimmed ([`ParseError::MalformedHeaderLine`] on a line
    /// without one); a `Content-Length` header must parse as a
    /// non-negative base-10 integer ([`ParseError::InvalidContentLength`])
    /// and declares the exact body length
    /// ([`ParseError::TruncatedBody`] when `buf` holds fewer bytes).
    /// Without it the body is empty.
    pub fn parse(buf: &[u8]) -> Result<Self, ParseError> {
        let (start_line, headers, consumed) = parse_head(buf)?;

        let body = match content_length(&headers)? {
            Some(len) => {
                if buf.len() - consumed < len {
                    return Err(ParseError::TruncatedBody);
                }
                buf[consumed..consumed + len].to_vec()
            }
            None => Vec::new(),
        };

        Ok(Request {
            start_line,
            headers,
            body,
        })
    }

    /// Read one request off a blocking stream.
    ///
    /// Reads chunks until the blank line terminating the header block is
    /// seen, then reads exactly the declared `Content-Length`, so a body
    /// larger than one transport read arrives whole. An `EOF` before the
    /// declared length is [`ParseError::TruncatedBody`].
    ///
    /// No cap is placed on the header block size; a peer that never
    /// sends the blank line can grow the buffer until `EOF`.
    pub fn read_from<R: Read>(io: &mut R) -> Result<Self, Error> {
        let mut buf = Vec::with_capacity(READ_CHUNK);
        let mut chunk = [0u8; READ_CHUNK];

        while find_terminator(&buf).is_none() {
            let n = io.read(&mut chunk)?;
            if n == 0 {
                // EOF before the blank line: report what is malformed
                return Ok(Self::parse(&buf)?);
            }
            buf.extend_from_slice(&chunk[..n]);
        }

        let (start_line, headers, consumed) = parse_head(&buf)?;

        let body = match content_length(&headers)? {
            Some(len) => {
                let mut body = Vec::with_capacity(len);
                let have = buf.len() - consumed;
                if have >= len {
                    body.extend_from_slice(&buf[consumed..consumed + len]);
                } else {
                    body.extend_from_slice(&buf[consumed..]);
                    let mut rest = vec![0u8; len - have];
                    io.read_exact(&mut rest).map_err(|e| {
                        if e.kind() == ErrorKind::UnexpectedEof {
                            Error::Parse(ParseError::TruncatedBody)
                        } else {
                            Error::Io(e)
                        }
                    })?;
                    body.extend_from_slice(&rest);
                }
                body
            }
            None => Vec::new(),
        };

        Ok(Request {
            start_line,
            headers,
            body,
        })
    }

    /// Exact-case header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Route-table key: the start line up to its last space,
    /// i.e. `"METHOD path"`.
    pub fn route_key(&self) -> &str {
        match self.start_line.rsplit_once(' ') {
            Some((key, _)) => key,
            None => &self.start_line,
        }
    }
}

/// Parse the start line and header block, returns the parts plus the
/// count of consumed bytes including the blank line.
pub(crate) fn parse_head(
    buf: &[u8],
) -> Result<(String, HashMap<String, String>, usize), ParseError> {
    let line_end = find_crlf(buf).ok_or(ParseError::MalformedStartLine)?;
    let start_line = String::from_utf8_lossy(&buf[..line_end]).into_owned();

    let mut pos = line_end + 2;
    let mut headers = HashMap::new();

    loop {
        let rest = &buf[pos..];
        let line_end = find_crlf(rest).ok_or(ParseError::MalformedHeaderLine)?;
        let line = &rest[..line_end];
        pos += line_end + 2;

        // blank line: end of the header block
        if line.is_empty() {
            break;
        }

        let colon = line
            .iter()
            .position(|&b| b == b':')
            .ok_or(ParseError::MalformedHeaderLine)?;

        let name = String::from_utf8_lossy(&line[..colon]).into_owned();
        let value = String::from_utf8_lossy(&line[colon + 1..]).trim().to_owned();

        // last write wins
        headers.insert(name, value);
    }

    Ok((start_line, headers, pos))
}

/// `Content-Length` as a usize, `None` when absent.
pub(crate) fn content_length(headers: &HashMap<String, String>) -> Result<Option<usize>, ParseError> {
    match headers.get("Content-Length") {
        Some(v) => v
            .parse::<usize>()
            .map(Some)
            .map_err(|_| ParseError::InvalidContentLength),
        None => Ok(None),
    }
}

/// Position of the `\r\n\r\n` ending the header block.
pub(crate) fn find_terminator(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\r\n")
}
