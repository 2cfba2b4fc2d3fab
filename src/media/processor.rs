use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{info, debug, warn};

use crate::config::ToolsConfig;
use crate::error::{Result, SubkitError};
use super::{Transcoder, MediaCommandBuilder};

/// Concrete implementation of the transcoder (FFmpeg-based)
pub struct FfmpegTranscoder {
    subtitle_options: Vec<String>,
    command_builder: MediaCommandBuilder,
}

impl FfmpegTranscoder {
    pub fn new(config: &ToolsConfig) -> Self {
        Self {
            subtitle_options: config.subtitle_options.clone(),
            command_builder: MediaCommandBuilder::new(&config.ffmpeg),
        }
    }
}

/// Hidden sibling the transcoder writes into before the final rename.
///
/// Keeps the real extension last so ffmpeg still picks the right container.
pub fn partial_output_path(output_path: &Path) -> Result<PathBuf> {
    let file_name = output_path
        .file_name()
        .ok_or_else(|| SubkitError::Media(format!("Invalid output path: {}", output_path.display())))?
        .to_string_lossy();
    let partial_name = match file_name.rsplit_once('.') {
        Some((stem, ext)) => format!(".{}.partial.{}", stem, ext),
        None => format!(".{}.partial", file_name),
    };
    Ok(output_path.with_file_name(partial_name))
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn burn_subtitles(
        &self,
        video_path: &Path,
        subtitle_path: &Path,
        output_path: &Path,
    ) -> Result<()> {
        info!("Burning subtitles from {} into {} -> {}",
              subtitle_path.display(), video_path.display(), output_path.display());

        let partial_path = partial_output_path(output_path)?;
        let command = self.command_builder.burn_subtitles(
            video_path,
            subtitle_path,
            partial_path.as_path(),
            &self.subtitle_options,
        );

        if let Err(e) = command.execute().await {
            if partial_path.exists() {
                if let Err(remove_err) = tokio::fs::remove_file(&partial_path).await {
                    warn!("Failed to remove partial output {}: {}", partial_path.display(), remove_err);
                }
            }
            return Err(e);
        }

        tokio::fs::rename(&partial_path, output_path).await?;
        debug!("Moved {} into place", partial_path.display());

        info!("Subtitle burning completed successfully");
        Ok(())
    }

    async fn check_availability(&self) -> Result<()> {
        self.command_builder
            .version_check()
            .execute()
            .await
            .map_err(|e| SubkitError::Media(format!("Media processor not available: {}", e)))?;

        info!("Media processor is available");
        Ok(())
    }
}
