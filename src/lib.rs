//! A minimal HTTP/1.1 client that writes its requests and reads its responses by hand over a
//! plain TCP socket.
//!
//! See the `client` module to issue a GET or POST.
//! See the `url` module for how a URL becomes a host, port and request target.
//! See the `protocol` module for request serialization and response parsing.
//! See the `transport` module for the single-use connection underneath.

pub mod cli;
pub mod client;
pub mod error;
pub mod logger;
pub mod protocol;
pub mod transport;
pub mod url;

#[cfg(test)]
mod server;
