//! Command line parsing, kept apart from the client so it can be tested without a process.
use crate::error::Result;
use crate::protocol::{FormArgs, HttpMethod};
use clap::Parser;
use std::ffi::OsString;

#[derive(Parser, Debug)]
#[command(
    name = "httpclient",
    version,
    about = "Send one HTTP/1.1 GET or POST request and print the response",
    override_usage = "httpclient [GET/POST] [URL]"
)]
pub struct Cli {
    /// Request method (GET or POST), or the URL when no method is given
    #[arg(value_name = "METHOD")]
    first: Option<String>,

    /// URL to request when a method is given
    #[arg(value_name = "URL")]
    second: Option<String>,

    /// Form argument sent in the body of a POST, may be repeated
    #[arg(short, long = "data", value_name = "KEY=VALUE", value_parser = parse_form_pair)]
    data: Vec<(String, String)>,

    /// Log level: off, error, warn, info, debug or trace
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Disable coloured log levels
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParams {
    pub method: HttpMethod,
    pub url: String,
    pub args: Option<FormArgs>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Nothing to request; print usage and fail.
    Usage,
    Request(RequestParams),
}

fn parse_form_pair(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    Ok((key.to_owned(), value.to_owned()))
}

pub fn parse_args<I, T>(args: I) -> std::result::Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args)
}

impl Cli {
    pub fn invocation(&self) -> Result<Invocation> {
        let (method, url) = match (&self.first, &self.second) {
            (None, _) => return Ok(Invocation::Usage),
            (Some(url), None) => (HttpMethod::Get, url.clone()),
            (Some(method), Some(url)) => (method.parse()?, url.clone()),
        };

        let args = if self.data.is_empty() {
            None
        } else {
            Some(self.data.iter().cloned().collect())
        };

        Ok(Invocation::Request(RequestParams { method, url, args }))
    }

    pub fn usage() -> String {
        use clap::CommandFactory;
        Cli::command().render_help().to_string()
    }
}
