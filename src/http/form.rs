//! Multipart form-data decoding.
//!
//! A multipart body is a run of parts separated by the boundary
//! declared in `Content-Type`:
//!
//! ```text
//! --boundary\r\n
//! Content-Disposition: form-data; name="field"\r\n
//! \r\n
//! value\r\n
//! --boundary\r\n
//! Content-Disposition: form-data; name="file"; filename="x.txt"\r\n
//! \r\n
//! contents\r\n
//! --boundary--\r\n
//! ```
//!
//! A file part keeps its filename: the decoded value is
//! `"<filename>\r\n<contents>"`, trimmed.

use std::collections::HashMap;

use super::request::Request;
use crate::error::FormError;

impl Request {
    /// Decode the body as `multipart/form-data`.
    ///
    /// The boundary token is the suffix after `boundary=` in the
    /// `Content-Type` header; a missing header or parameter is
    /// [`FormError::MissingBoundary`]. Decoded on demand, never cached.
    /// Ordering is not significant and a duplicate field name
    /// overwrites the earlier value.
    pub fn form_data(&self) -> Result<HashMap<String, Vec<u8>>, FormError> {
        let boundary = self
            .header("Content-Type")
            .and_then(|ct| ct.split_once("boundary=").map(|(_, b)| b.to_owned()))
            .ok_or(FormError::MissingBoundary)?;

        let delim = format!("--{}", boundary).into_bytes();
        let fragments = split_on(&self.body, &delim);

        let mut result = HashMap::new();

        // the last fragment is the tail of the closing `--boundary--`
        for fragment in fragments.iter().take(fragments.len() - 1) {
            let part = trim_bytes(fragment);
            if part.is_empty() {
                continue;
            }

            // header line, then the blank line, then the value
            let (header, rest) = split_first_crlf(part).ok_or(FormError::InvalidPartFormat)?;
            let value = rest.get(2..).ok_or(FormError::InvalidPartFormat)?;

            let (name, filename) = parse_part_header(header)?;

            let value = match filename {
                Some(filename) => {
                    let mut joined = Vec::with_capacity(filename.len() + 2 + value.len());
                    joined.extend_from_slice(filename.as_bytes());
                    joined.extend_from_slice(b"\r\n");
                    joined.extend_from_slice(value);
                    trim_bytes(&joined).to_vec()
                }
                None => trim_bytes(value).to_vec(),
            };

            result.insert(name, value);
        }

        Ok(result)
    }
}

/// `name=` and `filename=` tokens of a part header, quotes stripped.
fn parse_part_header(header: &[u8]) -> Result<(String, Option<String>), FormError> {
    let header = String::from_utf8_lossy(header);

    let mut name = None;
    let mut filename = None;

    for token in header.split(';') {
        let token = token.trim();

        if let Some(v) = token.strip_prefix("name=") {
            name = Some(v.trim_matches('"').to_owned());
        } else if let Some(v) = token.strip_prefix("filename=") {
            filename = Some(v.trim_matches('"').to_owned());
        }
    }

    match name {
        Some(name) => Ok((name, filename)),
        None => Err(FormError::NoFieldName),
    }
}

/// Split on every occurrence of `delim`.
fn split_on<'a>(buf: &'a [u8], delim: &[u8]) -> Vec<&'a [u8]> {
    let mut fragments = Vec::new();
    let mut rest = buf;

    while let Some(at) = find(rest, delim) {
        fragments.push(&rest[..at]);
        rest = &rest[at + delim.len()..];
    }
    fragments.push(rest);

    fragments
}

fn split_first_crlf(buf: &[u8]) -> Option<(&[u8], &[u8])> {
    find(buf, b"\r\n").map(|at| (&buf[..at], &buf[at + 2..]))
}

fn find(buf: &[u8], needle: &[u8]) -> Option<usize> {
    buf.windows(needle.len()).position(|w| w == needle)
}

fn trim_bytes(buf: &[u8]) -> &[u8] {
    let start = buf
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(buf.len());
    let end = buf
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |at| at + 1);
    &buf[start..end]
}
