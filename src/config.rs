use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use crate::error::{Result, SubkitError};

fn default_subtitle_file() -> String {
    "subtitles.srt".to_string()
}

fn default_output_suffix() -> String {
    "_with_subs".to_string()
}

fn default_video_file() -> String {
    "video.mp4".to_string()
}

/// Run configuration read from `config/config.yaml`.
///
/// Every key is optional; a missing key falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Subtitle file burned by the single-pair burner
    #[serde(default = "default_subtitle_file")]
    pub subtitle_file: String,
    /// Video file read by the single-pair burner
    #[serde(default = "default_video_file")]
    pub video_file: String,
    /// Suffix appended to burned video names
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,
    /// Whisper model used by the generator
    pub model_size: ModelSize,
    /// Source language of subtitles to translate, or `auto`
    pub input_language: SourceLanguage,
    /// Target languages for translation
    pub output_languages: Vec<String>,
    /// External tool locations and options
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelSize {
    Tiny,
    Base,
    #[default]
    Small,
    Medium,
    Large,
}

impl ModelSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tiny => "tiny",
            Self::Base => "base",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl fmt::Display for ModelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Either a fixed language code or automatic detection per file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SourceLanguage {
    #[default]
    Auto,
    Code(String),
}

impl From<String> for SourceLanguage {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("auto") {
            Self::Auto
        } else {
            Self::Code(trimmed.to_string())
        }
    }
}

impl From<SourceLanguage> for String {
    fn from(value: SourceLanguage) -> Self {
        value.to_string()
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Code(code) => f.write_str(code),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Path to ffmpeg binary
    pub ffmpeg: String,
    /// Path to the argos package manager
    pub argospm: String,
    /// Python interpreter with `openai-whisper` and `argostranslate` installed
    pub python: String,
    /// Additional encoding options for subtitle burning
    /// Common options: ["-preset", "medium", "-crf", "23", "-pix_fmt", "yuv420p"]
    pub subtitle_options: Vec<String>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            argospm: "argospm".to_string(),
            python: "python3".to_string(),
            subtitle_options: Vec::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            subtitle_file: default_subtitle_file(),
            video_file: default_video_file(),
            output_suffix: default_output_suffix(),
            model_size: ModelSize::default(),
            input_language: SourceLanguage::default(),
            output_languages: Vec::new(),
            tools: ToolsConfig::default(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| SubkitError::Config(format!("Failed to read {}: {}", path.display(), e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document carries no keys, so every default applies
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(serde_yaml::from_str(content)?)
    }
}
