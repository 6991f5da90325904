//! A one-shot HTTP server for tests. It accepts a single connection, reads one request off it,
//! writes back whatever the handler produced and closes the connection.
use std::io::{self, Read, Write};
use std::net;
use std::thread;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// Request line and headers, without the blank line.
    pub head: String,
    pub body: String,
}

impl RecordedRequest {
    pub fn content_length(&self) -> Option<usize> {
        self.head.split("\r\n").skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            if key.trim().eq_ignore_ascii_case("content-length") {
                value.trim().parse().ok()
            } else {
                None
            }
        })
    }
}

pub struct TestServer {
    addr: net::SocketAddr,
    handle: thread::JoinHandle<io::Result<RecordedRequest>>,
}

impl TestServer {
    pub fn start<H>(handler: H) -> io::Result<Self>
    where
        H: FnOnce(&RecordedRequest) -> String + Send + 'static,
    {
        TestServer::start_on("127.0.0.1:0", handler)
    }

    pub fn start_on<H>(bind_addr: &str, handler: H) -> io::Result<Self>
    where
        H: FnOnce(&RecordedRequest) -> String + Send + 'static,
    {
        let listener = net::TcpListener::bind(bind_addr)?;
        let addr = listener.local_addr()?;
        let handle = thread::spawn(move || -> io::Result<RecordedRequest> {
            let (mut stream, _) = listener.accept()?;
            let request = read_request(&mut stream)?;
            stream.write_all(handler(&request).as_bytes())?;
            stream.flush()?;
            Ok(request)
        });
        Ok(TestServer { addr, handle })
    }

    /// Answers the request with `response` verbatim.
    pub fn respond_with<S: Into<String>>(response: S) -> io::Result<Self> {
        let response = response.into();
        TestServer::start(move |_| response)
    }

    /// Answers `200 OK` with the request body as the response body.
    pub fn echo() -> io::Result<Self> {
        TestServer::start(|request| ok(&request.body))
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Waits for the exchange to finish and returns the request the server saw.
    pub fn finish(self) -> RecordedRequest {
        self.handle.join().unwrap().unwrap()
    }
}

pub fn ok(body: &str) -> String {
    format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\n\r\n{}",
        body.len(),
        body
    )
}

fn read_request<R: Read>(stream: &mut R) -> io::Result<RecordedRequest> {
    let mut data = Vec::new();
    let mut chunk = [0; 512];

    let head_end = loop {
        if let Some(pos) = find(&data, b"\r\n\r\n") {
            break pos;
        }
        let n = stream.read(&mut chunk)?;
        if n == 0 {
            return Err(io::ErrorKind::UnexpectedEof.into());
        }
        data.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&data[..head_end]).into_owned();
    let mut request = RecordedRequest {
        head,
        body: String::new(),
    };

    let mut body = data.split_off(head_end + 4);
    let length = request.content_length().unwrap_or(0);
    while body.len() < length {
        let n = stream.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }
    request.body = String::from_utf8_lossy(&body).into_owned();

    Ok(request)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::{read_request, RecordedRequest};

    #[test]
    fn read_request_with_body() {
        let mut input = "POST /a HTTP/1.1\r\nContent-Length: 3\r\n\r\nabc".as_bytes();
        let request = read_request(&mut input).unwrap();
        assert_eq!(
            request,
            RecordedRequest {
                head: "POST /a HTTP/1.1\r\nContent-Length: 3".into(),
                body: "abc".into(),
            }
        );
        assert_eq!(request.content_length(), Some(3));
    }

    #[test]
    fn read_request_without_body() {
        let mut input = "GET / HTTP/1.1\r\nHost: x\r\n\r\n".as_bytes();
        let request = read_request(&mut input).unwrap();
        assert_eq!(request.body, "");
        assert_eq!(request.content_length(), None);
    }

    #[test]
    fn read_request_truncated_head() {
        let mut input = "GET / HTTP/1.1\r\n".as_bytes();
        assert!(read_request(&mut input).is_err());
    }
}
