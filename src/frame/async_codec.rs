//! Async mirror of [`codec`](super::codec).

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::codec::{encode_frame, Frame};
use super::mask::apply_mask;
use super::{Fin, FrameHead, Mask, OpCode, PayloadLen};
use crate::error::{Error, FrameError};

/// Async version of [`codec::read_frame`](super::codec::read_frame).
pub async fn read_frame<R>(io: &mut R, ceiling: u64) -> Result<Frame, Error>
where
    R: AsyncRead + Unpin,
{
    let mut head = [0u8; 2];
    io.read_exact(&mut head).await?;

    let fin = Fin::from_flag(head[0]);
    let opcode = OpCode::from_flag(head[0]);
    let masked = Mask::flag_set(head[1]);

    let mut length = PayloadLen::from_flag(head[1]);
    match length.extension_len() {
        0 => {}
        2 => {
            let mut ext = [0u8; 2];
            io.read_exact(&mut ext).await?;
            length = PayloadLen::from_byte2(ext);
        }
        _ => {
            let mut ext = [0u8; 8];
            io.read_exact(&mut ext).await?;
            length = PayloadLen::from_byte8(ext);
        }
    }

    let len = length.to_num();
    if len > ceiling {
        return Err(FrameError::PayloadTooLarge(len).into());
    }

    let mask = if masked {
        let mut key = [0u8; 4];
        io.read_exact(&mut key).await?;
        Mask::Key(key)
    } else {
        Mask::None
    };

    let mut payload = vec![0u8; len as usize];
    io.read_exact(&mut payload).await?;

    if let Mask::Key(key) = mask {
        apply_mask(key, &mut payload);
    }

    Ok(Frame {
        head: FrameHead::new(fin, opcode, mask, length),
        payload,
    })
}

/// Async version of [`codec::write_frame`](super::codec::write_frame).
pub async fn write_frame<W>(io: &mut W, opcode: OpCode, payload: &[u8]) -> Result<(), Error>
where
    W: AsyncWrite + Unpin,
{
    io.write_all(&encode_frame(opcode, payload)).await?;
    Ok(())
}
