//! Http response encoding.

/// Response under construction.
///
/// Encodes to
/// `HTTP/1.1 <code> <text>\r\nContent-Type: ..\r\nContent-Length: ..\r\n
/// <extra headers..>\r\n\r\n<body>` with the content type sniffed from
/// the body.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    reason: String,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl Response {
    /// Constructor.
    pub fn new(status: u16, reason: &str) -> Self {
        Self {
            status,
            reason: reason.to_owned(),
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Append an extra header, written after the generated ones.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Set the body.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Encode to wire bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut head = format!("HTTP/1.1 {} {}\r\n", self.status, self.reason);

        head.push_str(&format!(
            "Content-Type: {}\r\n",
            detect_content_type(&self.body)
        ));
        head.push_str(&format!("Content-Length: {}\r\n", self.body.len()));

        for (name, value) in &self.headers {
            head.push_str(&format!("{}: {}\r\n", name, value));
        }

        head.push_str("\r\n");

        let mut buf = head.into_bytes();
        buf.extend_from_slice(&self.body);
        buf
    }
}

/// Content type sniffed from the first body byte.
pub fn detect_content_type(body: &[u8]) -> &'static str {
    match body.first() {
        None => "text/plain; charset=utf-8",
        Some(b'<') => "text/html; charset=utf-8",
        Some(b'{') | Some(b'[') => "application/json",
        Some(_) => "application/octet-stream",
    }
}
