use std::path::Path;
use tokio::process::Command;
use tracing::debug;

use crate::error::{Result, SubkitError};

/// Abstract media processing command representation
#[derive(Debug, Clone)]
pub struct MediaCommand {
    pub binary_path: String,
    pub args: Vec<String>,
    pub description: String,
}

impl MediaCommand {
    /// Create a new media processing command
    pub fn new<S1: Into<String>, S2: Into<String>>(binary_path: S1, description: S2) -> Self {
        Self {
            binary_path: binary_path.into(),
            args: Vec::new(),
            description: description.into(),
        }
    }

    /// Add an argument
    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(|s| s.into()));
        self
    }

    /// Add input file
    pub fn input<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg("-i").arg(path.as_ref().to_string_lossy().to_string())
    }

    /// Add output file
    pub fn output<P: AsRef<Path>>(self, path: P) -> Self {
        self.arg(path.as_ref().to_string_lossy().to_string())
    }

    /// Force overwrite output
    pub fn overwrite(self) -> Self {
        self.arg("-y")
    }

    /// Set video codec
    pub fn video_codec<S: Into<String>>(self, codec: S) -> Self {
        self.arg("-c:v").arg(codec)
    }

    /// Set audio codec
    pub fn audio_codec<S: Into<String>>(self, codec: S) -> Self {
        self.arg("-c:a").arg(codec)
    }

    /// Copy audio stream
    pub fn copy_audio(self) -> Self {
        self.audio_codec("copy")
    }

    /// Add video filter
    pub fn video_filter<S: Into<String>>(self, filter: S) -> Self {
        self.arg("-vf").arg(filter)
    }

    /// Execute the command
    pub async fn execute(&self) -> Result<()> {
        debug!("Executing media processing command: {} {:?}", self.binary_path, self.args);
        debug!("Description: {}", self.description);

        let output = Command::new(&self.binary_path)
            .args(&self.args)
            .output()
            .await
            .map_err(|e| SubkitError::Media(format!("Failed to execute media processor: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SubkitError::Media(format!(
                "{} failed: {}",
                self.description,
                stderr
            )));
        }

        Ok(())
    }
}

/// Builder for the transcoder commands this tool needs
pub struct MediaCommandBuilder {
    binary_path: String,
}

impl MediaCommandBuilder {
    /// Create a new command builder
    pub fn new<S: Into<String>>(binary_path: S) -> Self {
        Self {
            binary_path: binary_path.into(),
        }
    }

    /// Build subtitle burning command
    pub fn burn_subtitles<P: AsRef<Path>>(
        &self,
        video_path: P,
        subtitle_path: P,
        output_path: P,
        additional_options: &[String],
    ) -> MediaCommand {
        let subtitle = subtitle_path.as_ref().to_string_lossy();

        MediaCommand::new(&self.binary_path, "Subtitle burning")
            .overwrite()
            .input(&video_path)
            .video_filter(format!("subtitles={}", escape_filter_value(&subtitle)))
            .video_codec("libx264") // Filters require re-encoding
            .copy_audio()
            .args(additional_options.iter().cloned())
            .output(output_path)
    }

    /// Build version check command
    pub fn version_check(&self) -> MediaCommand {
        MediaCommand::new(&self.binary_path, "Version check")
            .arg("-version")
    }
}

/// Escape a filter option value for use inside a `-vf` filtergraph.
///
/// Two levels apply: the option value (`\`, `'`, `:`) and then the
/// filtergraph description (`\`, `'`, `[`, `]`, `,`, `;`).
pub fn escape_filter_value(value: &str) -> String {
    fn escape(input: &str, special: &[char]) -> String {
        let mut escaped = String::with_capacity(input.len());
        for c in input.chars() {
            if special.contains(&c) {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        escaped
    }

    let option_level = escape(value, &['\\', '\'', ':']);
    escape(&option_level, &['\\', '\'', '[', ']', ',', ';'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain_path_unchanged() {
        assert_eq!(escape_filter_value("/project/input/a.srt"), "/project/input/a.srt");
    }

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(escape_filter_value("C:/subs/a.srt"), "C\\\\:/subs/a.srt");
        assert_eq!(escape_filter_value("/in/a,b.srt"), "/in/a\\,b.srt");
        assert_eq!(escape_filter_value("/in/it's.srt"), "/in/it\\\\\\'s.srt");
    }

    #[test]
    fn test_burn_command_arguments() {
        let builder = MediaCommandBuilder::new("ffmpeg");
        let options = vec!["-crf".to_string(), "23".to_string()];
        let cmd = builder.burn_subtitles(
            Path::new("/in/a.mp4"),
            Path::new("/in/a.srt"),
            Path::new("/out/a_with_subs.mp4"),
            &options,
        );

        assert_eq!(cmd.binary_path, "ffmpeg");
        assert_eq!(
            cmd.args,
            vec![
                "-y", "-i", "/in/a.mp4",
                "-vf", "subtitles=/in/a.srt",
                "-c:v", "libx264", "-c:a", "copy",
                "-crf", "23",
                "/out/a_with_subs.mp4",
            ]
        );
    }

    #[test]
    fn test_version_check() {
        let cmd = MediaCommandBuilder::new("/opt/ffmpeg").version_check();
        assert_eq!(cmd.args, vec!["-version"]);
    }

    #[tokio::test]
    async fn test_execute_missing_binary() {
        let cmd = MediaCommand::new("/nonexistent/ffmpeg-binary", "Version check").arg("-version");
        let err = cmd.execute().await.unwrap_err();
        assert!(matches!(err, SubkitError::Media(_)));
    }
}
