// Media transcoding
//
// - Processor: ffmpeg-backed transcoder
// - Commands: command builders for the transcoder binary

pub mod commands;
pub mod processor;

use async_trait::async_trait;
use std::path::Path;

pub use commands::*;
pub use processor::*;

use crate::config::ToolsConfig;
use crate::error::Result;

/// Burns subtitles into video files
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Render `subtitle_path` onto the frames of `video_path`, writing `output_path`
    async fn burn_subtitles(
        &self,
        video_path: &Path,
        subtitle_path: &Path,
        output_path: &Path,
    ) -> Result<()>;

    /// Check if the transcoder can be executed
    async fn check_availability(&self) -> Result<()>;
}

/// Factory for creating transcoder instances
pub struct TranscoderFactory;

impl TranscoderFactory {
    /// Create the default transcoder implementation (FFmpeg-based)
    pub fn create_transcoder(config: &ToolsConfig) -> Box<dyn Transcoder> {
        Box::new(processor::FfmpegTranscoder::new(config))
    }
}
