//! Lightweight http server with websocket upgrade support.
//!
//! ## Features
//! - Hand-written request parsing with multipart form-data decoding.
//! - RFC-6455 handshake, frame codec and message reassembly.
//! - Thread-per-connection server with per-connection key/value store.
//! - Sync core over `std::io`, async mirrors behind the `async` feature.
//!
//! ## High-level API
//!
//! - [`server`]
//!
//! ```ignore
//! {
//!     let mut router = Router::new();
//!     router.route("GET", "/", |conn: &Conn| {
//!         let _ = conn.write_response(&Response::new(200, "OK").body("hi"));
//!         Flow::Stop
//!     });
//!     Server::new("127.0.0.1:8080", router).listen_and_serve()?;
//! }
//! ```
//!
//! ## Low-level API
//!
//! - [`http`]
//! - [`frame`]
//! - [`handshake`]
//! - [`message`]
//!
//! Request:
//!
//! ```ignore
//! {
//!     // parse a buffered request
//!     let request = Request::parse(&buf)?;
//!
//!     // or read one off a stream
//!     let request = Request::read_from(&mut io)?;
//!     let form = request.form_data()?;
//! }
//! ```
//!
//! Frame and message:
//!
//! ```ignore
//! {
//!     // one frame
//!     let frame = codec::read_frame(&mut io, ceiling)?;
//!
//!     // one logical message, control frames handled transparently
//!     match message::read_message(&mut io, ceiling)? {
//!         Some(msg) => ...,
//!         None => ..., // peer sent close
//!     }
//! }
//! ```

pub mod error;
pub mod frame;
pub mod handshake;
pub mod http;
pub mod message;
pub mod server;
pub mod store;
