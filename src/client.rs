//! Runs one request end to end: parse the URL, connect, build and send the request, read the
//! whole response, close the connection and parse what came back.
//!
//! # Example
//! ```no_run
//! use httpclient::protocol::FormArgs;
//!
//! fn main() -> httpclient::error::Result<()> {
//!     let response = httpclient::client::get("http://example.com/")?;
//!     println!("{}", response.code());
//!
//!     let mut args = FormArgs::new();
//!     args.insert("msg".into(), "hi there".into());
//!     let response = httpclient::client::post("http://example.com/submit", Some(&args))?;
//!     println!("{}", response.body());
//!     Ok(())
//! }
//! ```
use crate::error::Result;
use crate::protocol::{FormArgs, HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Connection, StreamConnector};
use crate::url::parse_url;
use log::{debug, warn};
use std::marker::PhantomData;
use std::net;

/// Issues requests over streams opened by `S`, one fresh connection per request.
pub struct HttpClient<S: StreamConnector = net::TcpStream> {
    connector: PhantomData<S>,
}

impl<S: StreamConnector> HttpClient<S> {
    pub fn new() -> Self {
        HttpClient {
            connector: PhantomData,
        }
    }

    pub fn get(&self, url: &str) -> Result<HttpResponse> {
        self.command(HttpMethod::Get, url, None)
    }

    pub fn post(&self, url: &str, args: Option<&FormArgs>) -> Result<HttpResponse> {
        self.command(HttpMethod::Post, url, args)
    }

    pub fn command(
        &self,
        method: HttpMethod,
        url: &str,
        args: Option<&FormArgs>,
    ) -> Result<HttpResponse> {
        let target = parse_url(url)?;
        let mut connection = Connection::<S>::connect(&target.address, target.port)?;

        if method == HttpMethod::Get && args.map_or(false, |a| !a.is_empty()) {
            warn!("ignoring form arguments for GET {}", url);
        }
        let request = HttpRequest::build(method, &target.host, &target.path, args);
        debug!("{} {} (host {})", request.method(), request.uri(), target.host);

        connection.send_all(&request.to_bytes())?;
        let raw = connection.recv_all()?;
        connection.close();

        let response = HttpResponse::parse(&raw)?;
        debug!("{} {} -> {}", method, url, response.code());
        Ok(response)
    }
}

impl<S: StreamConnector> Default for HttpClient<S> {
    fn default() -> Self {
        Self::new()
    }
}

pub fn get(url: &str) -> Result<HttpResponse> {
    HttpClient::<net::TcpStream>::new().get(url)
}

pub fn post(url: &str, args: Option<&FormArgs>) -> Result<HttpResponse> {
    HttpClient::<net::TcpStream>::new().post(url, args)
}

pub fn command(method: HttpMethod, url: &str, args: Option<&FormArgs>) -> Result<HttpResponse> {
    HttpClient::<net::TcpStream>::new().command(method, url, args)
}
