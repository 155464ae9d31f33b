//! Server handshake.
//!
//! From [RFC-6455 Section 4.2](https://datatracker.ietf.org/doc/html/rfc6455#section-4.2):
//!
//! When a client starts a WebSocket connection, it sends its part of the
//! opening handshake. The server must parse at least part of this
//! handshake in order to obtain the necessary information to generate
//! the server part of the handshake.
//!
//! Example response:
//!
//! ```text
//! HTTP/1.1 101 Switching Protocols
//! Upgrade: websocket
//! Connection: Upgrade
//! Sec-WebSocket-Accept: s3pPLMBiTxaQ9kYGzzhZRbK+xOo=
//! ```

use super::{derive_accept_key, HTTP_STATUS_LINE, WEBSOCKET_VERSION};
use crate::error::HandshakeError;
use crate::http::Request;

/// Validate `req` as an upgrade request and produce the literal bytes
/// of the `101 Switching Protocols` response.
///
/// Checks run in order:
///
/// 1. the start line begins with `GET` and ends with `HTTP/1.1`;
/// 2. `Upgrade` equals `websocket`;
/// 3. `Connection` equals `Upgrade`;
/// 4. `Sec-WebSocket-Version` equals `13`, anything else is the distinct
///    [`HandshakeError::UnsupportedVersion`] failure;
/// 5. `Sec-WebSocket-Key` is present and non-empty.
///
/// Header values are compared exactly as received, no case folding.
/// A failed handshake terminates the connection attempt; there is no
/// renegotiation.
pub fn upgrade_response(req: &Request) -> Result<Vec<u8>, HandshakeError> {
    if !req.start_line.starts_with("GET") || !req.start_line.ends_with("HTTP/1.1") {
        return Err(HandshakeError::StartLine);
    }

    if req.header("Upgrade") != Some("websocket") {
        return Err(HandshakeError::Upgrade);
    }

    if req.header("Connection") != Some("Upgrade") {
        return Err(HandshakeError::Connection);
    }

    if req.header("Sec-WebSocket-Version") != Some(WEBSOCKET_VERSION) {
        return Err(HandshakeError::UnsupportedVersion);
    }

    let key = match req.header("Sec-WebSocket-Key") {
        Some(key) if !key.is_empty() => key,
        _ => return Err(HandshakeError::SecWebSocketKey),
    };

    let accept = derive_accept_key(key.as_bytes());

    let response = format!(
        "{}\r\nUpgrade: websocket\r\nConnection: Upgrade\r\nSec-WebSocket-Accept: {}\r\n\r\n",
        HTTP_STATUS_LINE, accept
    );

    Ok(response.into_bytes())
}
