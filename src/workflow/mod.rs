// Batch workflows, one per subcommand
//
// Every workflow scans the input folder, matches files, makes one external
// call per item and records the outcome. A failed item is logged and the
// batch moves on.

pub mod burn;
pub mod generate;
pub mod translate;

use std::path::PathBuf;
use tracing::{info, warn};

pub use burn::BurnWorkflow;
pub use generate::GenerateWorkflow;
pub use translate::TranslateWorkflow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedItem {
    pub item: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedItem {
    pub item: String,
    pub error: String,
}

/// Per-item results of one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Output files written
    pub written: Vec<PathBuf>,
    pub skipped: Vec<SkippedItem>,
    pub failed: Vec<FailedItem>,
}

impl RunSummary {
    pub fn record_written(&mut self, path: PathBuf) {
        self.written.push(path);
    }

    pub fn record_skipped<S1: Into<String>, S2: Into<String>>(&mut self, item: S1, reason: S2) {
        self.skipped.push(SkippedItem {
            item: item.into(),
            reason: reason.into(),
        });
    }

    pub fn record_failed<S1: Into<String>, S2: ToString>(&mut self, item: S1, error: S2) {
        self.failed.push(FailedItem {
            item: item.into(),
            error: error.to_string(),
        });
    }

    /// File names of the written outputs
    pub fn written_names(&self) -> Vec<String> {
        self.written
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect()
    }

    pub fn log(&self) {
        info!(
            "Run finished: {} written, {} skipped, {} failed",
            self.written.len(),
            self.skipped.len(),
            self.failed.len()
        );
        for failed in &self.failed {
            warn!("Failed: {} ({})", failed.item, failed.error);
        }
    }
}
