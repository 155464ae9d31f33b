//! Frame encode/decode over blocking byte streams.

use std::io::{Read, Write};

use super::mask::apply_mask;
use super::{Fin, FrameHead, Mask, OpCode, PayloadLen};
use crate::error::{Error, FrameError};

/// Default ceiling for a single frame payload, 16MiB.
///
/// A declared length above the ceiling is a protocol violation
/// and fails the decode; it is never silently truncated.
pub const DEFAULT_PAYLOAD_CEILING: u64 = 16 * 1024 * 1024;

/// One decoded frame, payload already unmasked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub head: FrameHead,
    pub payload: Vec<u8>,
}

impl Frame {
    #[inline]
    pub const fn is_final(&self) -> bool { self.head.fin.is_final() }

    #[inline]
    pub const fn opcode(&self) -> OpCode { self.head.opcode }
}

/// Decode a single frame off the stream.
///
/// Reads the two head bytes, the extended length (16 or 64 bit,
/// big endian) when the base length is 126 or 127, the mask key when
/// the mask bit is set, then exactly `length` payload bytes. A masked
/// payload is unmasked in place. Short reads surface as the underlying
/// [`std::io::Error`] and are not retried.
pub fn read_frame<R: Read>(io: &mut R, ceiling: u64) -> Result<Frame, Error> {
    let mut head = [0u8; 2];
    io.read_exact(&mut head)?;

    let fin = Fin::from_flag(head[0]);
    let opcode = OpCode::from_flag(head[0]);
    let masked = Mask::flag_set(head[1]);

    let mut length = PayloadLen::from_flag(head[1]);
    match length.extension_len() {
        0 => {}
        2 => {
            let mut ext = [0u8; 2];
            io.read_exact(&mut ext)?;
            length = PayloadLen::from_byte2(ext);
        }
        _ => {
            let mut ext = [0u8; 8];
            io.read_exact(&mut ext)?;
            length = PayloadLen::from_byte8(ext);
        }
    }

    let len = length.to_num();
    if len > ceiling {
        return Err(FrameError::PayloadTooLarge(len).into());
    }

    let mask = if masked {
        let mut key = [0u8; 4];
        io.read_exact(&mut key)?;
        Mask::Key(key)
    } else {
        Mask::None
    };

    let mut payload = vec![0u8; len as usize];
    io.read_exact(&mut payload)?;

    if let Mask::Key(key) = mask {
        apply_mask(key, &mut payload);
    }

    Ok(Frame {
        head: FrameHead::new(fin, opcode, mask, length),
        payload,
    })
}

/// Encode one outgoing frame.
///
/// Outgoing frames are always final and never masked; the payload
/// is written verbatim after the head.
pub fn encode_frame(opcode: OpCode, payload: &[u8]) -> Vec<u8> {
    let head = FrameHead::new(
        Fin::Y,
        opcode,
        Mask::None,
        PayloadLen::from_num(payload.len() as u64),
    );

    let mut buf = Vec::with_capacity(payload.len() + 10);
    head.encode_into(&mut buf);
    buf.extend_from_slice(payload);
    buf
}

/// Encode one outgoing frame and transfer it with a single write call,
/// keeping the frame atomic under the caller's write-lock discipline.
pub fn write_frame<W: Write>(io: &mut W, opcode: OpCode, payload: &[u8]) -> Result<(), Error> {
    io.write_all(&encode_frame(opcode, payload))?;
    Ok(())
}
