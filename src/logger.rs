//! Installs the log backend for the command line tool. Records go to stderr so stdout only
//! carries the response.
use crate::error::{Error, Result};
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use std::str::FromStr;

pub fn parse_level(level: &str) -> Result<LevelFilter> {
    LevelFilter::from_str(level)
        .map_err(|_| Error::ConfigError(format!("unknown log level '{}'", level)))
}

fn level_colors() -> ColoredLevelConfig {
    ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Cyan)
        .debug(Color::White)
        .trace(Color::BrightBlack)
}

/// Sends records at or above `level` to stderr as `HH:MM:SS.mmm LEVEL target: message`.
pub fn init(level: &str, colored: bool) -> Result<()> {
    let filter = parse_level(level)?;
    let colors = if colored { Some(level_colors()) } else { None };

    fern::Dispatch::new()
        .format(move |out, message, record| {
            let time = chrono::Local::now().format("%H:%M:%S%.3f");
            match &colors {
                Some(colors) => out.finish(format_args!(
                    "{} {:<5} {}: {}",
                    time,
                    colors.color(record.level()),
                    record.target(),
                    message
                )),
                None => out.finish(format_args!(
                    "{} {:<5} {}: {}",
                    time,
                    record.level(),
                    record.target(),
                    message
                )),
            }
        })
        .level(filter)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}
