//! A single-use connection: one request written, one response read to EOF, then closed.
//!
//! All calls block. There is no timeout on connect or on reads, and no cap on the size of the
//! response; the peer is expected to close the stream after answering (the client always asks for
//! `Connection: close`). A peer that keeps the connection open blocks `recv_all` forever.
use crate::error::{Error, Result};
use log::{debug, trace};
use std::io;
use std::net;
use std::str;

const CHUNK_SIZE: usize = 1024;

/// Opens a stream to `(host, port)`.
pub trait StreamConnector: io::Read + io::Write + Sized {
    fn connect(host: &str, port: u16) -> Result<Self>;

    /// Releases the stream. The default simply drops it.
    fn disconnect(self) -> io::Result<()> {
        Ok(())
    }
}

impl StreamConnector for net::TcpStream {
    fn connect(host: &str, port: u16) -> Result<Self> {
        net::TcpStream::connect((host, port)).map_err(Error::ConnectionError)
    }

    fn disconnect(self) -> io::Result<()> {
        match self.shutdown(net::Shutdown::Both) {
            // The peer closing first is the normal end of an exchange.
            Err(e) if e.kind() == io::ErrorKind::NotConnected => Ok(()),
            r => r,
        }
    }
}

pub struct Connection<S> {
    stream: S,
    sent: bool,
}

impl<S: StreamConnector> Connection<S> {
    pub fn connect(host: &str, port: u16) -> Result<Self> {
        debug!("connecting to {}:{}", host, port);
        let stream = S::connect(host, port)?;
        Ok(Connection::new(stream))
    }

    /// Releases the underlying stream. Taking `self` means a closed connection cannot be used
    /// again.
    pub fn close(self) {
        debug!("closing connection");
        if let Err(e) = self.stream.disconnect() {
            debug!("error while closing connection: {}", e);
        }
    }
}

impl<S: io::Read + io::Write> Connection<S> {
    pub fn new(stream: S) -> Self {
        Connection {
            stream,
            sent: false,
        }
    }

    /// Writes all of `data`. Only one request may be sent per connection.
    pub fn send_all(&mut self, data: &[u8]) -> Result<()> {
        if self.sent {
            return Err(Error::SendError(io::Error::new(
                io::ErrorKind::Other,
                "a request was already sent on this connection",
            )));
        }
        self.sent = true;

        self.stream.write_all(data).map_err(Error::SendError)?;
        self.stream.flush().map_err(Error::SendError)?;
        debug!("sent {} bytes", data.len());
        Ok(())
    }

    /// Reads until the peer closes its side, then decodes everything read as UTF-8.
    pub fn recv_all(&mut self) -> Result<String> {
        let mut buffer = Vec::new();
        let mut chunk = [0; CHUNK_SIZE];
        loop {
            match self.stream.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => {
                    trace!("read {} bytes", n);
                    buffer.extend_from_slice(&chunk[..n]);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::ReceiveError(e)),
            }
        }
        debug!("received {} bytes", buffer.len());
        Ok(str::from_utf8(&buffer)?.to_owned())
    }
}
