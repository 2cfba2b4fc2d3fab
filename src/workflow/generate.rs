use tracing::{error, info};

use crate::context::RunContext;
use crate::error::Result;
use crate::matcher::{scan_dir, VIDEO_EXTENSIONS};
use crate::naming::OutputNamer;
use crate::subtitle::generate_srt;
use crate::transcribe::SpeechModel;
use super::RunSummary;

/// Generates SRT subtitles for every video in the input folder
pub struct GenerateWorkflow {
    model: Box<dyn SpeechModel>,
}

impl GenerateWorkflow {
    pub fn new(model: Box<dyn SpeechModel>) -> Self {
        Self { model }
    }

    pub async fn run(&self, ctx: &RunContext) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        let videos = scan_dir(&ctx.input_dir, VIDEO_EXTENSIONS)?;
        if videos.is_empty() {
            info!("No supported video files found in input folder");
            return Ok(summary);
        }
        info!("Found {} video files", videos.len());

        self.model.check_availability().await?;

        let namer = OutputNamer::new(&videos);
        for video in &videos {
            let output_name = namer.transcript(video);
            let output_path = ctx.output_dir.join(&output_name);
            info!("Processing {}...", video.file_name());

            let result = match self.model.transcribe(&video.path).await {
                Ok(segments) => generate_srt(&segments, &output_path),
                Err(e) => Err(e),
            };

            match result {
                Ok(()) => {
                    info!("Subtitles generated: {}", output_name);
                    summary.record_written(output_path);
                }
                Err(e) => {
                    error!("Failed to process {}: {}", video.file_name(), e);
                    summary.record_failed(video.file_name(), e);
                }
            }
        }

        info!("Subtitle Generation Completed");
        Ok(summary)
    }
}
