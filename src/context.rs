use std::path::{Path, PathBuf};
use chrono::Local;
use tracing::info;

use crate::error::Result;

const INPUT_DIR: &str = "input";
const OUTPUT_DIR: &str = "output";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.yaml";
const LOG_DIR: &str = "logs";

/// Paths and identity of a single invocation.
///
/// Built once in `main` and handed to every runner, so nothing depends on
/// process-wide state.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub root: PathBuf,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub config_path: PathBuf,
    pub log_dir: PathBuf,
    /// `YYYYMMDD_HHMMSS` at context creation
    pub timestamp: String,
}

impl RunContext {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        Self::with_timestamp(root, timestamp)
    }

    pub fn with_timestamp<P: AsRef<Path>>(root: P, timestamp: String) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            input_dir: root.join(INPUT_DIR),
            output_dir: root.join(OUTPUT_DIR),
            config_path: root.join(CONFIG_DIR).join(CONFIG_FILE),
            log_dir: root.join(LOG_DIR),
            root,
            timestamp,
        }
    }

    /// Use a config file other than `config/config.yaml`
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = path.as_ref().to_path_buf();
        self
    }

    pub fn log_file_name(&self) -> String {
        format!("{}_log.log", self.timestamp)
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_dir.join(self.log_file_name())
    }

    /// Create the folders a run writes into
    pub fn prepare(&self) -> Result<()> {
        std::fs::create_dir_all(&self.log_dir)?;
        std::fs::create_dir_all(&self.input_dir)?;
        std::fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }

    pub fn log_startup(&self) {
        info!("Starting Process");
        info!("Timestamp: {}", self.timestamp);
        info!("Project root: {}", self.root.display());
        info!("Input folder: {}", self.input_dir.display());
        info!("Output folder: {}", self.output_dir.display());
        info!("Config file: {}", self.config_path.display());
    }
}
