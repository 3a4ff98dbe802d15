//! Logging configuration
//!
//! Describes where and how verbosely the host writes logs. The subscriber itself
//! is installed by the host binary.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;

const LOG_FILE_PREFIX: &str = "numtap_";
const LOG_FILE_SUFFIX: &str = ".log";

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Minimum level (trace, debug, info, warn, error)
    pub level: String,
    /// Write to stderr
    pub console_output: bool,
    /// Write to a daily file in `log_dir`
    pub file_output: bool,
    /// Directory holding log files
    pub log_dir: PathBuf,
    /// Number of log files kept on disk
    pub max_log_files: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console_output: true,
            file_output: true,
            log_dir: PathBuf::from("logs"),
            max_log_files: 7,
        }
    }
}

impl LogConfig {
    /// Parse the configured level, defaulting to INFO
    pub fn parse_level(&self) -> LevelFilter {
        LevelFilter::from_str(self.level.trim()).unwrap_or(LevelFilter::INFO)
    }

    /// Create the log directory if needed
    pub fn ensure_log_directory(&self) -> io::Result<()> {
        fs::create_dir_all(&self.log_dir)
    }

    /// Path of today's log file
    pub fn current_log_path(&self) -> PathBuf {
        let stamp = chrono::Local::now().format("%Y-%m-%d");
        self.log_dir
            .join(format!("{LOG_FILE_PREFIX}{stamp}{LOG_FILE_SUFFIX}"))
    }

    /// Remove the oldest log files beyond `max_log_files`.
    ///
    /// Returns the number of files removed.
    pub fn cleanup_old_logs(&self) -> io::Result<usize> {
        if !self.log_dir.exists() {
            return Ok(0);
        }

        let mut logs: Vec<PathBuf> = fs::read_dir(&self.log_dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .map(|name| name.starts_with(LOG_FILE_PREFIX) && name.ends_with(LOG_FILE_SUFFIX))
                    .unwrap_or(false)
            })
            .collect();

        if logs.len() <= self.max_log_files {
            return Ok(0);
        }

        // Date-stamped names sort chronologically
        logs.sort();
        let excess = logs.len() - self.max_log_files;
        let mut removed = 0;
        for path in logs.into_iter().take(excess) {
            fs::remove_file(&path)?;
            removed += 1;
        }
        Ok(removed)
    }
}
