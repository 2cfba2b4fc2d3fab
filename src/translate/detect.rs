use tracing::debug;

use crate::error::{Result, SubkitError};

/// Identifies the language of a text sample as an ISO 639-1 code
#[cfg_attr(test, mockall::automock)]
pub trait LanguageDetector: Send + Sync {
    fn detect(&self, sample: &str) -> Result<String>;
}

/// Detector backed by the trigram models of `whatlang`
#[derive(Debug, Default)]
pub struct WhatlangDetector;

impl WhatlangDetector {
    pub fn new() -> Self {
        Self
    }
}

/// Map an ISO 639-3 code to the two-letter code translation packages use
pub fn to_iso639_1(code: &str) -> Option<&'static str> {
    // Macrolanguage members without a 639-1 code of their own
    match code {
        "cmn" => return Some("zh"),
        "pes" => return Some("fa"),
        _ => {}
    }
    isolang::Language::from_639_3(code)?.to_639_1()
}

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, sample: &str) -> Result<String> {
        if sample.trim().is_empty() {
            return Err(SubkitError::Detection("No text to sample".to_string()));
        }

        let info = whatlang::detect(sample)
            .ok_or_else(|| SubkitError::Detection("No language features found".to_string()))?;
        let code = info.lang().code();
        debug!("Detected {} (confidence {:.2}, reliable: {})", code, info.confidence(), info.is_reliable());

        to_iso639_1(code)
            .map(str::to_string)
            .ok_or_else(|| SubkitError::Detection(format!("No two-letter code for language '{}'", code)))
    }
}
