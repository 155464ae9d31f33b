//! Connection state and IO discipline.

use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use log::{debug, error, info, warn};

use crate::error::Error;
use crate::frame::codec::{encode_frame, DEFAULT_PAYLOAD_CEILING};
use crate::frame::OpCode;
use crate::handshake;
use crate::http::{Request, Response};
use crate::message::{self, Message};
use crate::store::Store;

/// One accepted connection: the transport, the parsed request, the
/// per-connection store and the upgraded flag.
///
/// A single per-connection reader/writer lock serializes the wire:
/// every write transfers one complete preassembled byte run under the
/// exclusive lock, frame reads take the shared one. Response bytes and
/// frame bytes therefore never interleave. The connection is owned by
/// its serving thread; stages run over it strictly one after another.
pub struct Conn {
    stream: TcpStream,
    lock: RwLock<()>,
    store: Store,
    upgraded: AtomicBool,
    ceiling: u64,
    pub request: Request,
}

impl Conn {
    /// Constructor.
    pub fn new(stream: TcpStream, request: Request) -> Self {
        Self {
            stream,
            lock: RwLock::new(()),
            store: Store::new(),
            upgraded: AtomicBool::new(false),
            ceiling: DEFAULT_PAYLOAD_CEILING,
            request,
        }
    }

    /// The per-connection key/value store.
    pub fn store(&self) -> &Store { &self.store }

    /// Cap accepted frame payload lengths.
    pub fn set_payload_ceiling(&mut self, ceiling: u64) { self.ceiling = ceiling; }

    /// Whether the handshake upgraded this connection.
    pub fn is_websocket(&self) -> bool { self.upgraded.load(Ordering::SeqCst) }

    /// Encode and send an http response.
    pub fn write_response(&self, response: &Response) -> Result<(), Error> {
        self.write_locked(&response.encode())
    }

    /// Validate the stored request as a websocket handshake, send the
    /// `101 Switching Protocols` response and mark the connection
    /// upgraded. This is the handshake's only state transition; on
    /// failure the connection attempt is over.
    pub fn upgrade(&self) -> Result<(), Error> {
        let response = handshake::upgrade_response(&self.request)?;
        self.write_locked(&response)?;
        self.upgraded.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Read one logical websocket message.
    ///
    /// `Ok(None)` means the peer sent a close frame. Pings are answered
    /// transparently, see [`message::read_message`].
    pub fn read_message(&self) -> Result<Option<Message>, Error> {
        if !self.is_websocket() {
            return Err(Error::NotWebSocket);
        }
        let mut io = Guarded { conn: self };
        message::read_message(&mut io, self.ceiling)
    }

    /// Send one websocket message as a single final, unmasked frame.
    pub fn write_message(&self, opcode: OpCode, payload: &[u8]) -> Result<(), Error> {
        if !self.is_websocket() {
            return Err(Error::NotWebSocket);
        }
        self.write_locked(&encode_frame(opcode, payload))
    }

    /// Run the close handshake, then shut the transport down.
    pub fn close_websocket(&self) -> Result<(), Error> {
        if !self.is_websocket() {
            return Err(Error::NotWebSocket);
        }

        let mut io = Guarded { conn: self };
        let drained = message::close(&mut io, self.ceiling);

        // tear the transport down whether or not the peer answered
        let shutdown = self.stream.shutdown(Shutdown::Both);
        self.upgraded.store(false, Ordering::SeqCst);

        drained?;
        shutdown?;
        Ok(())
    }

    /// Classify and log a websocket IO failure, then tear the
    /// connection down. No reconnect, no retry.
    pub fn handle_ws_error(&self, err: &Error) {
        match err {
            Error::Io(e)
                if matches!(
                    e.kind(),
                    ErrorKind::UnexpectedEof | ErrorKind::ConnectionReset | ErrorKind::BrokenPipe
                ) =>
            {
                info!("connection closed by peer")
            }
            Error::Io(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => {
                warn!("connection timed out")
            }
            e => error!("unexpected websocket error: {}", e),
        }

        if let Err(e) = self.close_websocket() {
            debug!("teardown: {}", e);
        }
    }

    /// Transfer one complete byte run under the exclusive lock.
    fn write_locked(&self, bytes: &[u8]) -> Result<(), Error> {
        let _guard = self.lock.write().unwrap_or_else(PoisonError::into_inner);
        (&self.stream).write_all(bytes)?;
        Ok(())
    }
}

/// Read/write adapter enforcing the lock discipline for the message
/// loop: reads take the shared lock, each write takes the exclusive
/// lock and transfers its whole buffer.
struct Guarded<'a> {
    conn: &'a Conn,
}

impl Read for Guarded<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let _guard = self.conn.lock.read().unwrap_or_else(PoisonError::into_inner);
        (&self.conn.stream).read(buf)
    }
}

impl Write for Guarded<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let _guard = self.conn.lock.write().unwrap_or_else(PoisonError::into_inner);
        (&self.conn.stream).write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> { (&self.conn.stream).flush() }
}

#[cfg(test)]
pub(crate) fn test_pair() -> (Conn, TcpStream) {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let peer = TcpStream::connect(addr).unwrap();
    let (stream, _) = listener.accept().unwrap();
    (Conn::new(stream, Request::default()), peer)
}
