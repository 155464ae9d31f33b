//! Key exchange.

use super::GUID;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha1::{Digest, Sha1};

/// Derive `Sec-WebSocket-Accept` from `Sec-WebSocket-Key`.
///
/// The accept key is the base64-encoded 160-bit digest of the
/// received key concatenated with [`GUID`].
#[inline]
pub fn derive_accept_key(sec_key: &[u8]) -> String {
    let mut sha1 = Sha1::new();
    sha1.update(sec_key);
    sha1.update(GUID);
    STANDARD.encode(sha1.finalize())
}
