use std::convert;
use std::error;
use std::fmt;
use std::io;
use std::str;

#[derive(Debug)]
pub enum Error {
    InvalidUrl(String),
    ConnectionError(io::Error),
    SendError(io::Error),
    ReceiveError(io::Error),
    MalformedResponse(String),
    Utf8Error(str::Utf8Error),
    ParseError(String),
    ConfigError(String),
}

pub type Result<R> = std::result::Result<R, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidUrl(msg) => write!(f, "invalid url: {}", msg),
            Error::ConnectionError(e) => write!(f, "failed to connect: {}", e),
            Error::SendError(e) => write!(f, "failed to send request: {}", e),
            Error::ReceiveError(e) => write!(f, "failed to receive response: {}", e),
            Error::MalformedResponse(msg) => write!(f, "malformed response: {}", msg),
            Error::Utf8Error(e) => write!(f, "response is not valid utf-8: {}", e),
            Error::ParseError(msg) => write!(f, "{}", msg),
            Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::ConnectionError(e) | Error::SendError(e) | Error::ReceiveError(e) => Some(e),
            Error::Utf8Error(e) => Some(e),
            Error::InvalidUrl(_)
            | Error::MalformedResponse(_)
            | Error::ParseError(_)
            | Error::ConfigError(_) => None,
        }
    }
}

impl convert::From<str::Utf8Error> for Error {
    fn from(e: str::Utf8Error) -> Self {
        Error::Utf8Error(e)
    }
}

impl convert::From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Error::InvalidUrl(e.to_string())
    }
}

impl convert::From<log::SetLoggerError> for Error {
    fn from(e: log::SetLoggerError) -> Self {
        Error::ConfigError(e.to_string())
    }
}
