use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::str;

/// Arguments sent as the form-urlencoded body of a POST.
pub type FormArgs = BTreeMap<String, String>;

const HEADER_DELIMITER: &str = "\r\n\r\n";

struct Parser<'a> {
    s: &'a str,
    position: usize,
}

fn is_token_separator(c: char) -> bool {
    c == ' ' || c == '\t'
}

impl<'a> Parser<'a> {
    fn new(s: &'a str) -> Self {
        Parser { s, position: 0 }
    }

    fn consume_whitespace(&mut self) {
        while self.s[self.position..].starts_with(is_token_separator) {
            self.position += 1
        }
    }

    fn parse_token(&mut self) -> Result<&'a str> {
        self.consume_whitespace();
        if self.position >= self.s.len() {
            return Err(Error::MalformedResponse("expected token".into()));
        }

        let remaining = &self.s[self.position..];
        let end = remaining
            .find(is_token_separator)
            .unwrap_or_else(|| remaining.len());
        let token = &remaining[..end];
        self.position += token.len();
        self.consume_whitespace();

        Ok(token)
    }

    fn parse_number(&mut self) -> Result<u32> {
        let token = self.parse_token()?;
        token
            .parse()
            .map_err(|_| Error::MalformedResponse(format!("expected number, got '{}'", token)))
    }
}


#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct HttpVersion {
    major: u32,
    minor: u32,
}

impl HttpVersion {
    fn new(major: u32, minor: u32) -> Self {
        HttpVersion { major, minor }
    }
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "HTTP/{}.{}", self.major, self.minor)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum HttpMethod {
    Get,
    Post,
}

impl str::FromStr for HttpMethod {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_ref() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            m => Err(Error::ParseError(format!("unknown method {}", m))),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}


#[derive(Debug, PartialEq, Eq)]
struct HttpHeader {
    key: String,
    value: String,
}

/// Header fields in the order they are written on the wire.
#[derive(Debug, PartialEq, Eq)]
struct HttpHeaders {
    headers: Vec<HttpHeader>,
}

impl HttpHeaders {
    fn new() -> Self {
        HttpHeaders {
            headers: Vec::new(),
        }
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.key.eq_ignore_ascii_case(key))
            .map(|h| h.value.as_ref())
    }

    fn push<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.headers.push(HttpHeader {
            key: key.into(),
            value: value.into(),
        });
    }
}

impl fmt::Display for HttpHeaders {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for header in &self.headers {
            write!(f, "{}: {}\r\n", header.key, header.value)?;
        }
        Ok(())
    }
}

/// Encodes `args` as `application/x-www-form-urlencoded`, in key order.
pub fn encode_form(args: &FormArgs) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in args {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// A fully formed request: request line, headers and body, ready to be written to a socket.
#[derive(Debug, PartialEq, Eq)]
pub struct HttpRequest {
    method: HttpMethod,
    uri: String,
    version: HttpVersion,
    headers: HttpHeaders,
    body: String,
}

impl fmt::Display for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}\r\n", self.method, self.uri, self.version)?;
        write!(f, "{}", self.headers)?;
        write!(f, "\r\n")?;
        write!(f, "{}", self.body)?;
        Ok(())
    }
}

impl HttpRequest {
    pub fn new<S: Into<String>>(method: HttpMethod, uri: S) -> Self {
        HttpRequest {
            method,
            uri: uri.into(),
            version: HttpVersion::new(1, 1),
            headers: HttpHeaders::new(),
            body: String::new(),
        }
    }

    pub fn get(host: &str, path: &str) -> Self {
        let mut request = HttpRequest::new(HttpMethod::Get, path);
        request.add_header("Host", host);
        request.add_header("Accept", "*/*");
        request.add_header("Connection", "close");
        request
    }

    /// Builds a POST whose body is `args` form-encoded. The `Content-Length` is the byte length
    /// of the encoded body.
    pub fn post(host: &str, path: &str, args: Option<&FormArgs>) -> Self {
        let body = args.map(encode_form).unwrap_or_default();

        let mut request = HttpRequest::new(HttpMethod::Post, path);
        request.add_header("Host", host);
        request.add_header("Content-Type", "application/x-www-form-urlencoded");
        request.add_header("Content-Length", body.len().to_string());
        request.add_header("Connection", "close");
        request.body = body;
        request
    }

    /// Builds the request for `method`. `args` only contribute to POST.
    pub fn build(method: HttpMethod, host: &str, path: &str, args: Option<&FormArgs>) -> Self {
        match method {
            HttpMethod::Get => HttpRequest::get(host, path),
            HttpMethod::Post => HttpRequest::post(host, path, args),
        }
    }

    pub fn add_header<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.headers.push(key, value);
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn get_header(&self, key: &str) -> Option<&str> {
        self.headers.get(key)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}


fn split_response(data: &str) -> Result<(&str, &str)> {
    let delimiter = data.find(HEADER_DELIMITER).ok_or_else(|| {
        Error::MalformedResponse("missing blank line between headers and body".into())
    })?;
    Ok((&data[..delimiter], &data[delimiter + HEADER_DELIMITER.len()..]))
}

/// Returns the status code: the second whitespace separated token of the status line.
pub fn get_code(data: &str) -> Result<u32> {
    let status_line = data.split("\r\n").next().unwrap_or_default();
    let mut parser = Parser::new(status_line);
    parser
        .parse_token()
        .map_err(|_| Error::MalformedResponse("missing status line".into()))?;
    parser.parse_number()
}

/// Returns the status line and header lines as one block, without the trailing blank line.
pub fn get_headers(data: &str) -> Result<&str> {
    Ok(split_response(data)?.0)
}

/// Returns everything after the first blank line.
pub fn get_body(data: &str) -> Result<&str> {
    Ok(split_response(data)?.1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    code: u32,
    headers: String,
    body: String,
}

impl HttpResponse {
    pub fn parse(data: &str) -> Result<Self> {
        let headers = get_headers(data)?;
        let code = get_code(data)?;
        let body = get_body(data)?;

        Ok(HttpResponse {
            code,
            headers: headers.into(),
            body: body.into(),
        })
    }

    pub fn code(&self) -> u32 {
        self.code
    }

    pub fn headers(&self) -> &str {
        &self.headers
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

impl fmt::Display for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\n{}\n{}", self.code, self.headers, self.body)
    }
}
