#![allow(missing_docs)]
//! Errors

mod form;
mod frame;
mod handshake;
mod parse;

pub use form::FormError;
pub use frame::FrameError;
pub use handshake::HandshakeError;
pub use parse::ParseError;

use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum Error {
    Parse(ParseError),

    Form(FormError),

    Handshake(HandshakeError),

    Frame(FrameError),

    NotWebSocket,

    Io(std::io::Error),
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self { Error::Parse(e) }
}

impl From<FormError> for Error {
    fn from(e: FormError) -> Self { Error::Form(e) }
}

impl From<HandshakeError> for Error {
    fn from(e: HandshakeError) -> Self { Error::Handshake(e) }
}

impl From<FrameError> for Error {
    fn from(e: FrameError) -> Self { Error::Frame(e) }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error { Error::Io(e) }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use Error::*;
        match self {
            Parse(e) => write!(f, "Parse error: {}", e),
            Form(e) => write!(f, "Form error: {}", e),
            Handshake(e) => write!(f, "Handshake error: {}", e),
            Frame(e) => write!(f, "Frame error: {}", e),
            NotWebSocket => write!(f, "Not a websocket connection"),
            Io(e) => write!(f, "Io error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use Error::*;

        match self {
            Parse(e) => Some(e),
            Form(e) => Some(e),
            Handshake(e) => Some(e),
            Frame(e) => Some(e),
            NotWebSocket => None,
            Io(e) => Some(e),
        }
    }
}
