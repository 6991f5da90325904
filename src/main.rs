use std::process;

use httpclient::cli::{self, Cli, Invocation};
use httpclient::error::Result;
use log::debug;

fn run(cli: &Cli) -> Result<i32> {
    let params = match cli.invocation()? {
        Invocation::Usage => {
            println!("{}", Cli::usage());
            return Ok(1);
        }
        Invocation::Request(params) => params,
    };

    let response = httpclient::client::command(params.method, &params.url, params.args.as_ref())?;
    println!("{}", response);
    Ok(0)
}

fn main() {
    let cli = match cli::parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    if let Err(e) = httpclient::logger::init(&cli.log_level, !cli.no_color) {
        eprintln!("error: {}", e);
        process::exit(1);
    }

    let code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            debug!("{:?}", e);
            eprintln!("error: {}", e);
            1
        }
    };
    process::exit(code);
}
