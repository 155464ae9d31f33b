//! Tcp accept loop and connection bootstrap.
//!
//! One thread per accepted connection; the only state shared across
//! connections is the route table, read-only once serving starts.
//! No IO timeouts are enforced anywhere: a stalled peer holds its
//! connection open indefinitely, and closing the transport is the
//! only cancellation mechanism.

pub mod conn;
pub mod middleware;
pub mod router;

pub use conn::Conn;
pub use middleware::{Chain, Flow, Stage};
pub use router::Router;

use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

use log::{debug, info, warn};

use crate::http::Request;

/// Listening server: an address and a route table.
pub struct Server {
    addr: String,
    router: Arc<Router>,
}

impl Server {
    /// Constructor.
    pub fn new(addr: &str, router: Router) -> Self {
        Self {
            addr: addr.to_owned(),
            router: Arc::new(router),
        }
    }

    /// Bind the address and serve until the process exits.
    pub fn listen_and_serve(&self) -> std::io::Result<()> {
        let listener = TcpListener::bind(&self.addr)?;
        info!("listening on {}", self.addr);

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let router = Arc::clone(&self.router);
                    thread::spawn(move || handle(stream, router));
                }
                Err(e) => warn!("accept failed: {}", e),
            }
        }

        Ok(())
    }
}

/// Read the request, build the connection state, dispatch. A request
/// that fails to parse is logged and the connection dropped.
fn handle(stream: TcpStream, router: Arc<Router>) {
    let request = match Request::read_from(&mut &stream) {
        Ok(request) => request,
        Err(e) => {
            warn!("request rejected: {}", e);
            return;
        }
    };

    debug!("{}", request.start_line);

    let conn = Conn::new(stream, request);
    router.serve(&conn);
}
