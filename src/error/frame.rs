use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    PayloadTooLarge(u64),
}

impl Display for FrameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use FrameError::*;
        match self {
            PayloadTooLarge(n) => write!(f, "Payload length {} exceeds limit", n),
        }
    }
}

// use default impl
impl std::error::Error for FrameError {}
