//! Logging initialization
//!
//! This module provides:
//! - Runtime directory setup
//! - Logger initialization (console + size-rotated file)
//! - `RotatingFile`, the writer behind the file logger

use anyhow::{Context, Result};
use simplelog::*;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config;

/// Create the runtime directories the bot writes to.
pub fn setup_dirs(logs_dir: &str) -> Result<()> {
    fs::create_dir_all(logs_dir).with_context(|| format!("Failed to create logs directory {}", logs_dir))?;
    Ok(())
}

/// Parse a level name such as `debug` or `WARN`. Unknown values fall back to `Info`.
pub fn parse_level(raw: &str) -> LevelFilter {
    raw.trim().parse::<LevelFilter>().unwrap_or(LevelFilter::Info)
}

/// Initialize logger for both console and file output
///
/// The file lives at `<logs_dir>/bot.log` and is rotated at 1 MiB, keeping
/// four backups.
pub fn init_logger(logs_dir: &str, level: LevelFilter) -> Result<()> {
    let log_path = Path::new(logs_dir).join(config::logging::LOG_FILE_NAME);
    let log_file = RotatingFile::open(
        &log_path,
        config::logging::MAX_LOG_FILE_BYTES,
        config::logging::LOG_BACKUP_COUNT,
    )
    .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let log_config = ConfigBuilder::new()
        .set_time_format_custom(format_description!("[month].[day].[year] [hour]:[minute]:[second]"))
        .set_target_level(LevelFilter::Error)
        .add_filter_ignore_str("hyper")
        .add_filter_ignore_str("reqwest")
        .build();

    CombinedLogger::init(vec![
        TermLogger::new(level, log_config.clone(), TerminalMode::Mixed, ColorChoice::Auto),
        WriteLogger::new(level, log_config, log_file),
    ])
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Append-only log file that rolls over once it grows past `max_bytes`.
///
/// Backups are shifted `bot.log.1` -> `bot.log.2` ... and the oldest one is
/// dropped. Rollover only happens at a line boundary, so a record written
/// in several pieces is never split across files. With `backups == 0` the
/// file grows without limit.
#[derive(Debug)]
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
    file: File,
    written: u64,
    at_line_start: bool,
}

impl RotatingFile {
    pub fn open(path: impl Into<PathBuf>, max_bytes: u64, backups: usize) -> io::Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();

        Ok(Self {
            path,
            max_bytes,
            backups,
            file,
            written,
            at_line_start: true,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(format!(".{}", index));
        PathBuf::from(name)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        for index in (1..self.backups).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))?;

        self.file = OpenOptions::new().create(true).write(true).truncate(true).open(&self.path)?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.backups > 0
            && self.at_line_start
            && self.written > 0
            && self.written + buf.len() as u64 > self.max_bytes
        {
            self.rotate()?;
        }

        let n = self.file.write(buf)?;
        self.written += n as u64;
        if n > 0 {
            self.at_line_start = buf[n - 1] == b'\n';
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}
