//! Route table.

use std::collections::HashMap;

use log::{debug, error};

use super::conn::Conn;
use super::middleware::Chain;
use crate::http::Response;

/// Methods accepted by [`Router::route`].
const METHODS: [&str; 7] = ["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];

/// Exact-match route table keyed by `"METHOD pattern"`.
///
/// No wildcard or parameter matching. Read-only once the server
/// starts serving.
#[derive(Default)]
pub struct Router {
    rules: HashMap<String, Chain>,
}

impl Router {
    pub fn new() -> Self { Self::default() }

    /// Register a stage chain for `"METHOD pattern"`. The chain is
    /// sealed here, at registration time. An unknown method is logged
    /// and the registration ignored.
    pub fn route<C: Into<Chain>>(&mut self, method: &str, pattern: &str, chain: C) {
        if !METHODS.contains(&method) {
            error!("method err: unsolved method {:?}", method);
            return;
        }

        self.rules
            .insert(format!("{} {}", method, pattern), chain.into().seal());
    }

    /// Look the request up and run its chain; answer `404` on a miss.
    pub fn serve(&self, conn: &Conn) {
        match self.rules.get(conn.request.route_key()) {
            Some(chain) => chain.run(conn),
            None => {
                let miss = Response::new(404, "Not Found").body("Not Found");
                if let Err(e) = conn.write_response(&miss) {
                    debug!("404 response failed: {}", e);
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::http::Request;
    use crate::server::conn::test_pair;
    use crate::server::middleware::Flow;
    use std::io::Read;

    #[test]
    fn route_hit_runs_the_chain() {
        let mut router = Router::new();
        router.route("GET", "/hit", |conn: &Conn| {
            conn.store().set("ran", true);
            Flow::Stop
        });

        let (mut conn, _peer) = test_pair();
        conn.request = Request::parse(b"GET /hit HTTP/1.1\r\n\r\n").unwrap();

        router.serve(&conn);

        assert!(*conn.store().get_as::<bool>("ran").unwrap());
    }

    #[test]
    fn route_miss_answers_404() {
        let router = Router::new();

        let (mut conn, mut peer) = test_pair();
        conn.request = Request::parse(b"GET /missing HTTP/1.1\r\n\r\n").unwrap();

        router.serve(&conn);
        drop(conn);

        let mut text = String::new();
        peer.read_to_string(&mut text).unwrap();

        assert!(text.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(text.ends_with("\r\n\r\nNot Found"));
    }

    #[test]
    fn unknown_method_is_ignored() {
        let mut router = Router::new();
        router.route("BREW", "/coffee", |_: &Conn| Flow::Stop);

        assert!(router.rules.is_empty());
    }

    #[test]
    fn lookup_is_exact() {
        let mut router = Router::new();
        router.route("GET", "/a", |conn: &Conn| {
            conn.store().set("which", "get-a");
            Flow::Stop
        });
        router.route("POST", "/a", |conn: &Conn| {
            conn.store().set("which", "post-a");
            Flow::Stop
        });

        let (mut conn, _peer) = test_pair();
        conn.request = Request::parse(b"POST /a HTTP/1.1\r\n\r\n").unwrap();

        router.serve(&conn);

        assert_eq!(*conn.store().get_as::<&str>("which").unwrap(), "post-a");
    }
}
