#![cfg(feature = "async")]

use tokio::io::AsyncWriteExt;

use lighthttp::frame::async_codec::{read_frame, write_frame};
use lighthttp::frame::codec::DEFAULT_PAYLOAD_CEILING;
use lighthttp::frame::{Fin, FrameHead, Mask, OpCode, PayloadLen};
use lighthttp::http::Request;
use lighthttp::message::async_assembler;

fn fragment(fin: Fin, opcode: OpCode, payload: &[u8]) -> Vec<u8> {
    let head = FrameHead::new(
        fin,
        opcode,
        Mask::None,
        PayloadLen::from_num(payload.len() as u64),
    );

    let mut buf = Vec::new();
    head.encode_into(&mut buf);
    buf.extend_from_slice(payload);
    buf
}

#[tokio::test]
async fn async_frame_round_trip() {
    let (mut client, mut server) = tokio::io::duplex(1 << 20);

    for n in [0_usize, 1, 125, 126, 65535, 65536] {
        let data: Vec<u8> = (0..n).map(|i| i as u8).collect();

        write_frame(&mut client, OpCode::Binary, &data).await.unwrap();
        let frame = read_frame(&mut server, DEFAULT_PAYLOAD_CEILING).await.unwrap();

        assert_eq!(frame.head.fin, Fin::Y);
        assert_eq!(frame.head.opcode, OpCode::Binary);
        assert_eq!(frame.payload, data);
    }
}

#[tokio::test]
async fn async_assembler_round_trip() {
    let (mut client, mut server) = tokio::io::duplex(1 << 16);

    let mut wire = Vec::new();
    wire.extend(fragment(Fin::Y, OpCode::Ping, b"beat"));
    wire.extend(fragment(Fin::N, OpCode::Text, b"hel"));
    wire.extend(fragment(Fin::Y, OpCode::Text, b"lo"));
    client.write_all(&wire).await.unwrap();

    let msg = async_assembler::read_message(&mut server, DEFAULT_PAYLOAD_CEILING)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(msg.opcode, OpCode::Text);
    assert_eq!(msg.payload, b"hello");

    // the pong is waiting on the client side
    let pong = read_frame(&mut client, DEFAULT_PAYLOAD_CEILING).await.unwrap();
    assert_eq!(pong.head.opcode, OpCode::Pong);
    assert_eq!(pong.payload, b"beat");

    // peer close surfaces as the distinguished signal
    client
        .write_all(&fragment(Fin::Y, OpCode::Close, &[]))
        .await
        .unwrap();
    let end = async_assembler::read_message(&mut server, DEFAULT_PAYLOAD_CEILING)
        .await
        .unwrap();
    assert!(end.is_none());
}

#[tokio::test]
async fn async_request_read() {
    let (mut client, mut server) = tokio::io::duplex(1 << 16);

    client
        .write_all(b"POST /hello HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello")
        .await
        .unwrap();

    let req = Request::read_from_async(&mut server).await.unwrap();

    assert_eq!(req.start_line, "POST /hello HTTP/1.1");
    assert_eq!(req.header("Content-Length"), Some("5"));
    assert_eq!(req.body, b"hello");
}
