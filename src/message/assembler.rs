//! Message reassembly loop.

use std::io::{Read, Write};

use super::Message;
use crate::error::Error;
use crate::frame::codec::{read_frame, write_frame};
use crate::frame::{Fin, OpCode};

/// Read frames until one logical message completes.
///
/// `Ok(None)` is the peer-closed signal: a close frame arrived and no
/// message is surfaced. A ping is answered with a pong carrying the
/// same payload before the loop continues; a pong is discarded. The
/// first data frame fixes the message opcode and fragment payloads are
/// appended in frame order until a final frame arrives. Continuation
/// frames are not required to carry the continuation opcode; whatever
/// they carry is ignored in favor of the first frame's.
///
/// A frame-decode failure aborts the loop; the caller is expected to
/// run the connection-closing procedure.
pub fn read_message<IO>(io: &mut IO, ceiling: u64) -> Result<Option<Message>, Error>
where
    IO: Read + Write,
{
    let mut opcode = None;
    let mut payload = Vec::new();

    loop {
        let frame = read_frame(io, ceiling)?;

        match frame.head.opcode {
            OpCode::Close => return Ok(None),
            OpCode::Ping => write_frame(io, OpCode::Pong, &frame.payload)?,
            OpCode::Pong => {}
            op => {
                if opcode.is_none() {
                    opcode = Some(op);
                }
                payload.extend_from_slice(&frame.payload);

                if let Fin::Y = frame.head.fin {
                    return Ok(Some(Message {
                        opcode: opcode.unwrap_or(op),
                        payload,
                    }));
                }
            }
        }
    }
}

/// Write one message as a single final, unmasked frame.
pub fn write_message<W: Write>(io: &mut W, opcode: OpCode, payload: &[u8]) -> Result<(), Error> {
    write_frame(io, opcode, payload)
}

/// Closing procedure: send a close frame, then drain incoming frames
/// until the peer's close arrives. The caller shuts the transport down
/// afterwards.
pub fn close<IO>(io: &mut IO, ceiling: u64) -> Result<(), Error>
where
    IO: Read + Write,
{
    write_frame(io, OpCode::Close, &[])?;

    loop {
        let frame = read_frame(io, ceiling)?;
        if let OpCode::Close = frame.head.opcode {
            return Ok(());
        }
    }
}
