// Subtitle translation
//
// - Argos: Argos Translate package manager CLI and per-pair translator processes
// - Registry: packages indexed by language pair, built once per run
// - Detect: source language detection from a subtitle sample
// - Plan: per-file fan-out into one job per target language
// - Document: line-preserving translation of an SRT body

pub mod argos;
pub mod detect;
pub mod document;
pub mod plan;
pub mod registry;

use async_trait::async_trait;
use std::fmt;

pub use detect::*;
pub use document::*;
pub use plan::*;
pub use registry::*;

use crate::config::ToolsConfig;
use crate::error::Result;

/// A translation direction between two language codes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguagePair {
    pub from: String,
    pub to: String,
}

impl LanguagePair {
    pub fn new<S1: Into<String>, S2: Into<String>>(from: S1, to: S2) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Package name in the Argos index, e.g. `translate-en_pt`
    pub fn package_code(&self) -> String {
        format!("translate-{}_{}", self.from, self.to)
    }

    /// Inverse of [`LanguagePair::package_code`]
    pub fn from_package_code(code: &str) -> Option<Self> {
        let codes = code.trim().trim_end_matches(':').strip_prefix("translate-")?;
        let (from, to) = codes.split_once('_')?;
        if from.is_empty() || to.is_empty() {
            return None;
        }
        Some(Self::new(from, to))
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Machine translation engine with installable language packages
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Refresh the remote package index
    async fn refresh_index(&self) -> Result<()>;

    /// Packages offered by the index
    async fn available_packages(&self) -> Result<Vec<LanguagePair>>;

    /// Install the package for `pair`
    async fn install(&self, pair: &LanguagePair) -> Result<()>;

    /// Translate a single line of text
    async fn translate(&self, pair: &LanguagePair, text: &str) -> Result<String>;
}

/// Factory for creating translation backends
pub struct TranslationBackendFactory;

impl TranslationBackendFactory {
    /// Create the default backend (Argos Translate)
    pub fn create_default(tools: &ToolsConfig) -> Box<dyn TranslationBackend> {
        Box::new(argos::ArgosBackend::new(&tools.argospm, &tools.python))
    }
}
