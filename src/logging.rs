//! File-backed tracing. The terminal belongs to the TUI while it runs, so the
//! only sink is a daily-rolling log under `~/.list-manager/logs/`.
//!
//! `RUST_LOG` overrides the default `info` filter, e.g.
//! `RUST_LOG=list_manager::store=debug`.

use std::fs;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::logs_dir;

const LOG_FILE_NAME: &str = "list-manager.log";

/// Install the global subscriber. Failing to create the log directory only
/// disables logging; the application keeps running.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = match logs_dir().and_then(|dir| {
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }) {
        Ok(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
            Some(
                fmt::layer()
                    .with_writer(appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_filter(filter),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry().with(file_layer).init();
}
