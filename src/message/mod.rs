//! Websocket messages.
//!
//! A logical message spans one or more frames and ends with a frame
//! whose fin bit is set. The assembler loop reads frames, answers
//! control frames transparently (ping begets pong, pong is dropped)
//! and accumulates data-frame payloads until the message completes.
//! A close frame ends the loop with a distinguished peer-closed
//! signal instead of a message.

pub mod assembler;

cfg_if::cfg_if! {
    if #[cfg(feature = "tokio")] {
        pub mod async_assembler;
    }
}

pub use assembler::{close, read_message, write_message};

use crate::frame::OpCode;

/// One reassembled logical message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub opcode: OpCode,
    pub payload: Vec<u8>,
}
