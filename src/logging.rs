// File: ./src/logging.rs
//! File logging for the binary. Library code only uses the `log` macros.
use crate::config::LogLevel;
use crate::context::AppContext;
use anyhow::{Context, Result};
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::OpenOptions;

/// Appends log records to `realtybook.log` in the data directory.
/// `LogLevel::Off` installs nothing.
pub fn init(ctx: &dyn AppContext, level: LogLevel) -> Result<()> {
    if level == LogLevel::Off {
        return Ok(());
    }
    let path = ctx.get_log_path()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    let config = ConfigBuilder::new()
        .set_target_level(log::LevelFilter::Error)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    WriteLogger::init(level.to_filter(), config, file)
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))
}
