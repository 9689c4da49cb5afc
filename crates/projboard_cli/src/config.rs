//! Runtime configuration resolved from flags and environment.

use anyhow::{Context, Result};
use projboard_core::{default_log_level, DB_FILE_NAME};
use std::path::{Path, PathBuf};

const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Absolute data directory holding the database and logs.
    pub data_dir: PathBuf,
    pub log_level: String,
}

impl CliConfig {
    /// Makes `data_dir` absolute against the working directory and fills in
    /// the build-mode default log level.
    pub fn resolve(data_dir: &Path, log_level: Option<&str>) -> Result<Self> {
        let data_dir = if data_dir.is_absolute() {
            data_dir.to_path_buf()
        } else {
            std::env::current_dir()
                .context("could not determine the working directory")?
                .join(data_dir)
        };
        Ok(Self {
            data_dir,
            log_level: log_level.unwrap_or(default_log_level()).to_string(),
        })
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }
}
