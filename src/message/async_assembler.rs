//! Async mirror of [`assembler`](super::assembler).

use tokio::io::{AsyncRead, AsyncWrite};

use super::Message;
use crate::error::Error;
use crate::frame::async_codec::{read_frame, write_frame};
use crate::frame::{Fin, OpCode};

/// Async version of [`assembler::read_message`](super::assembler::read_message).
pub async fn read_message<IO>(io: &mut IO, ceiling: u64) -> Result<Option<Message>, Error>
where
    IO: AsyncRead + AsyncWrite + Unpin,
{
    let mut opcode = None;
    let mut payload = Vec::new();

    loop {
        let frame = read_frame(io, ceiling).await?;

        match frame.head.opcode {
            OpCode::Close => return Ok(None),
            OpCode::Ping => write_frame(io, OpCode::Pong, &frame.payload).await?,
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

/// Async version of [`assembler::write_message`](super::assembler::write_message).
pub async fn write_message<W>(io: &mut W, opcode: OpCode, payload: &[u8]) -> Result<(), Error>
where
    W: AsyncWrite + Unpin,
{
    write_frame(io, opcode, payload).await
}

/// Async version of [`assembler::close`](super::assembler::close).
pub async fn close<IO>(io: &mut IO, ceiling: u64) -> Result<(), Error>
where
    IO: AsyncRead + AsyncWrite + Unpin,
{
    write_frame(io, OpCode::Close, &[]).await?;

    loop {
        let frame = read_frame(io, ceiling).await?;
        if let OpCode::Close = frame.head.opcode {
            return Ok(());
        }
    }
}
