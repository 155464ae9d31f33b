use std::io::{Read, Write};
use std::net::TcpStream;
use std::thread;
use std::time::Duration;

use log::debug;

use lighthttp::http::Response;
use lighthttp::server::{Chain, Conn, Flow, Router, Server};

const ADDR: &str = "127.0.0.1:10301";

fn index_stage(conn: &Conn) -> Flow {
    let _ = conn.write_response(&Response::new(200, "OK").body("<h1>Welcome to my website!</h1>"));
    Flow::Stop
}

fn logging_stage(conn: &Conn) -> Flow {
    debug!("request: {}", conn.request.start_line);
    Flow::Continue
}

fn name_stage(conn: &Conn) -> Flow {
    if let Ok(form) = conn.request.form_data() {
        if let Some(name) = form.get("name") {
            conn.store()
                .set("name", String::from_utf8_lossy(name).into_owned());
        }
    }
    Flow::Continue
}

fn hello_stage(conn: &Conn) -> Flow {
    let name = conn
        .store()
        .get_as::<String>("name")
        .map(|name| (*name).clone())
        .unwrap_or_else(|| "World".to_owned());

    let _ = conn.write_response(&Response::new(200, "OK").body(format!("Hello, {}!", name)));
    Flow::Stop
}

fn send(raw: &[u8]) -> String {
    let mut stream = TcpStream::connect(ADDR).unwrap();
    stream.write_all(raw).unwrap();

    let mut text = String::new();
    stream.read_to_string(&mut text).unwrap();
    text
}

#[test]
fn sync_http() {
    env_logger::init();

    let mut router = Router::new();
    router.route("GET", "/", index_stage);
    router.route(
        "POST",
        "/hello",
        Chain::new()
            .stage(logging_stage)
            .stage(name_stage)
            .stage(hello_stage),
    );

    let server = Server::new(ADDR, router);
    thread::spawn(move || server.listen_and_serve().unwrap());
    thread::sleep(Duration::from_millis(300));

    // plain route with content-type sniffing
    let text = send(b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n");
    assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(text.contains("Content-Type: text/html; charset=utf-8\r\n"));
    assert!(text.ends_with("<h1>Welcome to my website!</h1>"));

    // middleware chain passing a form field through the store
    let body = "--FORMBOUND\r\n\
                Content-Disposition: form-data; name=\"name\"\r\n\
                \r\n\
                Alice\r\n\
                --FORMBOUND--\r\n";
    let raw = format!(
        "POST /hello HTTP/1.1\r\n\
         Host: localhost\r\n\
         Content-Type: multipart/form-data; boundary=FORMBOUND\r\n\
         Content-Length: {}\r\n\r\n{}",
        body.len(),
        body
    );
    let text = send(raw.as_bytes());
    assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(text.ends_with("Hello, Alice!"));

    // the chain falls back without the form field
    let raw = "POST /hello HTTP/1.1\r\nHost: localhost\r\n\r\n";
    let text = send(raw.as_bytes());
    assert!(text.ends_with("Hello, World!"));

    // route miss
    let text = send(b"GET /nowhere HTTP/1.1\r\n\r\n");
    assert!(text.starts_with("HTTP/1.1 404 Not Found\r\n"));
}
