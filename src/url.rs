//! Decomposition of absolute `http`/`https` URLs into the pieces a request needs.
use crate::error::{Error, Result};
use std::fmt;
use std::str;
use url::{Host, Url};

#[derive(PartialEq, Debug, Clone)]
pub enum Scheme {
    Http,
    Https,
    Other(String),
}

impl Scheme {
    /// The port used when the URL does not name one.
    pub fn default_port(&self) -> Option<u16> {
        match self {
            Scheme::Http => Some(80),
            Scheme::Https => Some(443),
            Scheme::Other(_) => None,
        }
    }
}

impl str::FromStr for Scheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.to_lowercase().as_ref() {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            s => Scheme::Other(s.into()),
        })
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Scheme::Http => write!(f, "http"),
            Scheme::Https => write!(f, "https"),
            Scheme::Other(s) => write!(f, "{}", s),
        }
    }
}

/// Where a request goes.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Target {
    /// Host as named in the `Host` header. IPv6 literals keep their brackets.
    pub host: String,
    /// Host as handed to the resolver when connecting. IPv6 literals are bare.
    pub address: String,
    pub port: u16,
    /// Request target placed on the request line.
    pub path: String,
}

pub fn parse_url(input: &str) -> Result<Target> {
    let url = Url::parse(input)?;
    let scheme: Scheme = url.scheme().parse()?;

    let default_port = scheme
        .default_port()
        .ok_or_else(|| Error::InvalidUrl(format!("unsupported scheme '{}' in {}", scheme, input)))?;

    let (host, address) = match url.host() {
        Some(Host::Domain(domain)) if !domain.is_empty() => (domain.to_owned(), domain.to_owned()),
        Some(Host::Ipv4(addr)) => (addr.to_string(), addr.to_string()),
        Some(Host::Ipv6(addr)) => (format!("[{}]", addr), addr.to_string()),
        _ => return Err(Error::InvalidUrl(format!("no host in {}", input))),
    };

    let port = url.port().unwrap_or(default_port);

    let mut path = url.path().to_owned();
    if path.is_empty() {
        path.push('/');
    }
    if let Some(query) = url.query() {
        path.push('?');
        path.push_str(query);
    }

    Ok(Target {
        host,
        address,
        port,
        path,
    })
}
