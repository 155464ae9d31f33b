use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeError {
    // http error
    StartLine,

    // websocket error
    Upgrade,

    Connection,

    SecWebSocketKey,

    // negotiable-version failure, not malformed input
    UnsupportedVersion,
}

impl Display for HandshakeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use HandshakeError::*;
        match self {
            StartLine => write!(f, "Illegal request line"),

            Upgrade => write!(f, "Missing or illegal upgrade header"),

            Connection => write!(f, "Missing or illegal connection header"),

            SecWebSocketKey => {
                write!(f, "Missing sec-websocket-key header")
            }

            UnsupportedVersion => {
                write!(f, "Unsupported websocket version")
            }
        }
    }
}

// use default impl
impl std::error::Error for HandshakeError {}
