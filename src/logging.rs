//! Logger setup for the CLI.
//!
//! Diagnostics (skipped documents, truncated pagination, HTTP requests) go
//! through the `log` facade to stderr. The inventory printed by [`crate::output`]
//! goes to stdout and is not affected by the log level.

use env_logger::{Builder, Env};
use log::LevelFilter;
use std::io::Write;
use std::time::Duration;

/// Install the global logger. `RUST_LOG` overrides the default `info` filter;
/// `quiet` drops everything below warn.
pub fn init_logging(quiet: bool) {
    let env = Env::default().filter_or("RUST_LOG", "info");
    let mut builder = Builder::from_env(env);
    if quiet {
        builder.filter_level(LevelFilter::Warn);
    }
    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {} {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.target().to_ascii_lowercase(),
                record.args()
            )
        })
        .init();
}

/// Short human form of a stage duration: `850ms`, `3s`, `2m`.
pub fn format_elapsed(elapsed: Duration) -> String {
    match elapsed.as_secs() {
        secs if secs >= 120 => format!("{}m", secs / 60),
        secs if secs > 0 => format!("{}s", secs),
        _ => match elapsed.as_millis() {
            millis if millis > 0 => format!("{}ms", millis),
            _ => format!("{}μs", elapsed.as_micros()),
        },
    }
}
