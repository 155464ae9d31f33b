//! Async mirror of the request reader.

use std::io::ErrorKind;

use tokio::io::{AsyncRead, AsyncReadExt};

use super::request::{content_length, find_terminator, parse_head, Request, READ_CHUNK};
use crate::error::{Error, ParseError};

impl Request {
    /// Async version of [`read_from`](Self::read_from).
    pub async fn read_from_async<R>(io: &mut R) -> Result<Self, Error>
    where
        R: AsyncRead + Unpin,
    {
        let mut buf = Vec::with_capacity(READ_CHUNK);
        let mut chunk = [0u8; READ_CHUNK];

        while find_terminator(&buf).is_none() {
            let n = io.read(&mut chunk).await?;
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
                    io.read_exact(&mut rest).await.map_err(|e| {
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
}
