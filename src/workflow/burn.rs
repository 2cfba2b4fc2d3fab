use std::path::Path;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::context::RunContext;
use crate::error::Result;
use crate::matcher::{pair_by_base, scan_dir, InputFile, SUBTITLE_EXTENSIONS, VIDEO_EXTENSIONS};
use crate::media::Transcoder;
use crate::naming::OutputNamer;
use super::RunSummary;

/// Burns subtitle files into videos
pub struct BurnWorkflow {
    config: Config,
    transcoder: Box<dyn Transcoder>,
}

impl BurnWorkflow {
    pub fn new(config: Config, transcoder: Box<dyn Transcoder>) -> Self {
        Self { config, transcoder }
    }

    /// Burn the configured subtitle file into the configured video
    pub async fn run_single(&self, ctx: &RunContext) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        let video_path = ctx.input_dir.join(&self.config.video_file);
        let subtitle_path = ctx.input_dir.join(&self.config.subtitle_file);

        let video = match InputFile::from_path(&video_path) {
            Some(video) if video_path.is_file() => video,
            _ => {
                info!("No video file {} in input folder, nothing to do", video_path.display());
                return Ok(summary);
            }
        };

        if !subtitle_path.is_file() {
            warn!("Subtitle file {} not found, skipping {}", subtitle_path.display(), video.file_name());
            summary.record_skipped(video.file_name(), "subtitle file not found");
            return Ok(summary);
        }

        self.transcoder.check_availability().await?;

        let namer = OutputNamer::new(std::slice::from_ref(&video));
        let output_path = ctx.output_dir.join(namer.burned_video(&video, &self.config.output_suffix));
        self.burn_item(&video, &subtitle_path, &output_path, &mut summary).await;

        info!("Subtitle Burning Process Completed");
        Ok(summary)
    }

    /// Burn every video that has a subtitle file of the same base name
    pub async fn run_batch(&self, ctx: &RunContext) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        let videos = scan_dir(&ctx.input_dir, VIDEO_EXTENSIONS)?;
        if videos.is_empty() {
            info!("No supported video files found in input folder");
            return Ok(summary);
        }
        let subtitles = scan_dir(&ctx.input_dir, SUBTITLE_EXTENSIONS)?;
        info!("Found {} video files and {} subtitle files", videos.len(), subtitles.len());

        let outcome = pair_by_base(&videos, &subtitles);
        for unmatched in &outcome.unmatched {
            summary.record_skipped(unmatched.file_name(), "no subtitle with the same base name");
        }
        if outcome.pairs.is_empty() {
            info!("No video/subtitle pairs to process");
            return Ok(summary);
        }

        self.transcoder.check_availability().await?;

        let namer = OutputNamer::new(&videos);
        for pair in &outcome.pairs {
            let output_path = ctx
                .output_dir
                .join(namer.burned_video(&pair.media, &self.config.output_suffix));
            self.burn_item(&pair.media, &pair.subtitle.path, &output_path, &mut summary).await;
        }

        info!("Subtitle Burning Process Completed");
        Ok(summary)
    }

    async fn burn_item(
        &self,
        video: &InputFile,
        subtitle_path: &Path,
        output_path: &Path,
        summary: &mut RunSummary,
    ) {
        info!("Processing {}...", video.file_name());

        match self.transcoder.burn_subtitles(&video.path, subtitle_path, output_path).await {
            Ok(()) => {
                info!("Output saved to {}", output_path.display());
                summary.record_written(output_path.to_path_buf());
            }
            Err(e) => {
                error!("Error during subtitle burning for {}: {}", video.file_name(), e);
                summary.record_failed(video.file_name(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubkitError;
    use crate::media::MockTranscoder;
    use std::fs;

    fn project(files: &[&str]) -> (tempfile::TempDir, RunContext) {
        let root = tempfile::tempdir().unwrap();
        let ctx = RunContext::new(root.path());
        ctx.prepare().unwrap();
        for name in files {
            fs::write(ctx.input_dir.join(name), b"data").unwrap();
        }
        (root, ctx)
    }

    fn available() -> MockTranscoder {
        let mut transcoder = MockTranscoder::new();
        transcoder.expect_check_availability().returning(|| Ok(()));
        transcoder
    }

    #[tokio::test]
    async fn test_batch_skips_unmatched_video() {
        let (_root, ctx) = project(&["a.mp4", "a.srt", "b.mkv"]);
        let mut transcoder = available();
        transcoder
            .expect_burn_subtitles()
            .times(1)
            .withf(|video, subtitle, output| {
                video.ends_with("a.mp4") && subtitle.ends_with("a.srt") && output.ends_with("a_dub.mp4")
            })
            .returning(|_, _, _| Ok(()));

        let config = Config { output_suffix: "_dub".to_string(), ..Config::default() };
        let summary = BurnWorkflow::new(config, Box::new(transcoder)).run_batch(&ctx).await.unwrap();

        assert_eq!(summary.written_names(), vec!["a_dub.mp4"]);
        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(summary.skipped[0].item, "b.mkv");
        assert!(summary.failed.is_empty());
    }

    #[tokio::test]
    async fn test_batch_continues_after_failure() {
        let (_root, ctx) = project(&["a.mp4", "a.srt", "b.avi", "b.srt"]);
        let mut transcoder = available();
        transcoder
            .expect_burn_subtitles()
            .times(2)
            .returning(|video, _, _| {
                if video.ends_with("a.mp4") {
                    Err(SubkitError::Media("encoder crashed".to_string()))
                } else {
                    Ok(())
                }
            });

        let summary = BurnWorkflow::new(Config::default(), Box::new(transcoder))
            .run_batch(&ctx)
            .await
            .unwrap();

        assert_eq!(summary.written_names(), vec!["b_with_subs.mp4"]);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].item, "a.mp4");
    }

    #[tokio::test]
    async fn test_batch_without_videos_does_nothing() {
        let (_root, ctx) = project(&["a.srt"]);
        // Neither availability nor burning may be called
        let transcoder = MockTranscoder::new();

        let summary = BurnWorkflow::new(Config::default(), Box::new(transcoder))
            .run_batch(&ctx)
            .await
            .unwrap();
        assert_eq!(summary, RunSummary::default());
    }

    #[tokio::test]
    async fn test_unavailable_transcoder_is_fatal() {
        let (_root, ctx) = project(&["a.mp4", "a.srt"]);
        let mut transcoder = MockTranscoder::new();
        transcoder
            .expect_check_availability()
            .returning(|| Err(SubkitError::Media("not found".to_string())));

        let result = BurnWorkflow::new(Config::default(), Box::new(transcoder)).run_batch(&ctx).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_single_uses_configured_files() {
        let (_root, ctx) = project(&["video.mp4", "subs_pt.srt"]);
        let mut transcoder = available();
        transcoder
            .expect_burn_subtitles()
            .times(1)
            .withf(|video, subtitle, output| {
                video.ends_with("video.mp4")
                    && subtitle.ends_with("subs_pt.srt")
                    && output.ends_with("video_with_subs.mp4")
            })
            .returning(|_, _, _| Ok(()));

        let config = Config { subtitle_file: "subs_pt.srt".to_string(), ..Config::default() };
        let summary = BurnWorkflow::new(config, Box::new(transcoder)).run_single(&ctx).await.unwrap();
        assert_eq!(summary.written_names(), vec!["video_with_subs.mp4"]);
    }

    #[tokio::test]
    async fn test_single_missing_subtitle_is_skipped() {
        let (_root, ctx) = project(&["video.mp4"]);
        let transcoder = MockTranscoder::new();

        let summary = BurnWorkflow::new(Config::default(), Box::new(transcoder))
            .run_single(&ctx)
            .await
            .unwrap();
        assert!(summary.written.is_empty());
        assert_eq!(summary.skipped.len(), 1);
    }
}
