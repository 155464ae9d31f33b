//! Websocket data frame.
//!
//! [RFC-6455 Section5](https://datatracker.ietf.org/doc/html/rfc6455#section-5)
//!
//! ```text
//! 0                   1                   2                   3
//! 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-------+-+-------------+-------------------------------+
//! |F|R|R|R| opcode|M| Payload len |    Extended payload length    |
//! |I|S|S|S|  (4)  |A|     (7)     |             (16/64)           |
//! |N|V|V|V|       |S|             |   (if payload len==126/127)   |
//! | |1|2|3|       |K|             |                               |
//! +-+-+-+-+-------+-+-------------+ - - - - - - - - - - - - - - - +
//! |     Extended payload length continued, if payload len == 127  |
//! + - - - - - - - - - - - - - - - +-------------------------------+
//! |                               |Masking-key, if MASK set to 1  |
//! +-------------------------------+-------------------------------+
//! | Masking-key (continued)       |          Payload Data         |
//! +-------------------------------- - - - - - - - - - - - - - - - +
//! :                     Payload Data continued ...                :
//! + - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - - +
//! |                     Payload Data continued ...                |
//! +---------------------------------------------------------------+
//! ```
//!
//! RSV bits are not interpreted.

pub mod codec;
pub mod flag;
pub mod length;
pub mod mask;

cfg_if::cfg_if! {
    if #[cfg(feature = "tokio")] {
        pub mod async_codec;
    }
}

pub use codec::Frame;
pub use flag::{Fin, OpCode};
pub use length::PayloadLen;
pub use mask::Mask;

/// Websocket frame head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHead {
    pub fin: Fin,
    pub opcode: OpCode,
    pub mask: Mask,
    pub length: PayloadLen,
}

impl FrameHead {
    /// Constructor.
    #[inline]
    pub const fn new(fin: Fin, opcode: OpCode, mask: Mask, length: PayloadLen) -> Self {
        Self {
            fin,
            opcode,
            mask,
            length,
        }
    }

    /// Append the encoded head to `buf`, returns the count of written bytes.
    pub fn encode_into(&self, buf: &mut Vec<u8>) -> usize {
        let start = buf.len();

        // fin, opcode
        buf.push(self.fin.to_flag() | self.opcode.to_flag());

        // mask, payload length
        buf.push(self.mask.to_flag() | self.length.to_flag());

        // extended payload length
        match self.length {
            PayloadLen::Standard(_) => {}
            PayloadLen::Extended1(v) => buf.extend_from_slice(&v.to_be_bytes()),
            PayloadLen::Extended2(v) => buf.extend_from_slice(&v.to_be_bytes()),
        };

        // mask key
        if let Mask::Key(k) = self.mask {
            buf.extend_from_slice(&k);
        }

        buf.len() - start
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn frame_head() {
        let head = FrameHead::new(
            Fin::Y,
            OpCode::Binary,
            Mask::None,
            PayloadLen::from_num(5),
        );

        let mut buf = Vec::new();
        let n = head.encode_into(&mut buf);

        assert_eq!(n, 2);
        assert_eq!(&buf, &[0x82, 0x05]);
    }

    #[test]
    fn frame_head_extended() {
        let head = FrameHead::new(
            Fin::N,
            OpCode::Text,
            Mask::None,
            PayloadLen::from_num(4096),
        );

        let mut buf = Vec::new();
        let n = head.encode_into(&mut buf);

        assert_eq!(n, 4);
        assert_eq!(&buf, &[0x01, 126, 0x10, 0x00]);

        let head = FrameHead::new(
            Fin::Y,
            OpCode::Binary,
            Mask::None,
            PayloadLen::from_num(65536),
        );

        let mut buf = Vec::new();
        let n = head.encode_into(&mut buf);

        assert_eq!(n, 10);
        assert_eq!(&buf, &[0x82, 127, 0, 0, 0, 0, 0, 1, 0, 0]);
    }

    #[test]
    fn frame_head_masked() {
        let key = [1, 2, 3, 4];
        let head = FrameHead::new(
            Fin::Y,
            OpCode::Text,
            Mask::Key(key),
            PayloadLen::from_num(3),
        );

        let mut buf = Vec::new();
        let n = head.encode_into(&mut buf);

        assert_eq!(n, 6);
        assert_eq!(&buf, &[0x81, 0x83, 1, 2, 3, 4]);
    }
}
