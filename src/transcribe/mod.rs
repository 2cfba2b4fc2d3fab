// Speech recognition
//
// The speech model is OpenAI Whisper, kept loaded in one Python process for
// the whole run. It reads audio straight from the video container, so no
// extraction step is needed.

pub mod whisper;

use async_trait::async_trait;
use std::path::Path;

use crate::config::{ModelSize, ToolsConfig};
use crate::error::Result;
use crate::subtitle::Segment;

/// Main trait for transcription operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpeechModel: Send + Sync {
    /// Transcribe the speech of a media file into timed segments
    async fn transcribe(&self, media_path: &Path) -> Result<Vec<Segment>>;

    /// Check if the model can be run
    async fn check_availability(&self) -> Result<()>;
}

/// Factory for creating speech model instances
pub struct SpeechModelFactory;

impl SpeechModelFactory {
    /// Create the default speech model (Whisper)
    pub fn create_default(tools: &ToolsConfig, model_size: ModelSize) -> Box<dyn SpeechModel> {
        Box::new(whisper::WhisperWorker::new(&tools.python, model_size))
    }
}
