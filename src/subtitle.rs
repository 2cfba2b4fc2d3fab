use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::error::{Result, SubkitError};

/// Separator between start and end time on an SRT timing line
pub const TIMING_ARROW: &str = "-->";

/// Number of text lines sampled for language detection
pub const DETECTION_SAMPLE_LINES: usize = 5;

/// One transcribed span of speech
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Seconds from the start of the media
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Role of a single line inside an SRT body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Index,
    Timing,
    Blank,
    Text,
}

impl LineKind {
    pub fn classify(line: &str) -> Self {
        let trimmed = line.trim_start_matches('\u{feff}').trim();
        if trimmed.is_empty() {
            Self::Blank
        } else if trimmed.chars().all(|c| c.is_ascii_digit()) {
            Self::Index
        } else if line.contains(TIMING_ARROW) {
            Self::Timing
        } else {
            Self::Text
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text)
    }
}

/// Render segments as an SRT document
pub fn render_srt(segments: &[Segment]) -> String {
    let mut srt_content = String::new();

    for (index, segment) in segments.iter().enumerate() {
        let start_time = format_srt_time(segment.start);
        let end_time = format_srt_time(segment.end);

        srt_content.push_str(&format!(
            "{}\n{} {} {}\n{}\n\n",
            index + 1,
            start_time,
            TIMING_ARROW,
            end_time,
            segment.text.trim()
        ));
    }

    srt_content
}

/// Generate SRT subtitle file from transcribed segments
pub fn generate_srt<P: AsRef<Path>>(segments: &[Segment], output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();
    info!("Generating SRT file: {}", output_path.display());

    write_atomic(output_path, render_srt(segments).as_bytes())?;

    info!("SRT file generated successfully");
    Ok(())
}

/// Format time in seconds to SRT time format (HH:MM:SS,mmm).
///
/// Milliseconds are truncated, never rounded.
pub fn format_srt_time(seconds: f64) -> String {
    let total_milliseconds = (seconds.max(0.0) * 1000.0) as u64;
    let hours = total_milliseconds / 3_600_000;
    let minutes = (total_milliseconds % 3_600_000) / 60_000;
    let secs = (total_milliseconds % 60_000) / 1_000;
    let millis = total_milliseconds % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

/// Split an SRT body into lines, each keeping its terminator
pub fn split_lines(content: &str) -> Vec<&str> {
    content.split_inclusive('\n').collect()
}

/// Join the first few text lines of an SRT body into a detection sample
pub fn detection_sample(lines: &[&str]) -> String {
    lines
        .iter()
        .filter(|line| LineKind::classify(line).is_text())
        .take(DETECTION_SAMPLE_LINES)
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Write `contents` to `path` through a temp file in the same folder, so a
/// failed write never leaves a truncated file behind.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| SubkitError::Config(format!("No parent folder for {}", path.display())))?;

    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    temp.write_all(contents)?;
    temp.flush()?;
    temp.persist(path).map_err(|e| SubkitError::Io(e.error))?;
    Ok(())
}
