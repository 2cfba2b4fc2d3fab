//! Directory scanning and base-name pairing of media and subtitle files.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Result, SubkitError};

/// Video containers picked up from the input folder
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi"];

/// Subtitle formats picked up from the input folder
pub const SUBTITLE_EXTENSIONS: &[&str] = &["srt"];

/// A file discovered in the input folder.
///
/// Used for both media and subtitle files; the base name is the join key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    /// File name without extension
    pub base: String,
    /// Lowercase extension without the leading dot
    pub extension: String,
    pub path: PathBuf,
}

impl InputFile {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let path = path.as_ref();
        let base = path.file_stem()?.to_str()?.to_string();
        let extension = path.extension()?.to_str()?.to_lowercase();
        Some(Self {
            base,
            extension,
            path: path.to_path_buf(),
        })
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("{}.{}", self.base, self.extension))
    }
}

pub type MediaItem = InputFile;
pub type SubtitleItem = InputFile;

/// A media file and the subtitle sharing its base name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
    pub media: MediaItem,
    pub subtitle: SubtitleItem,
}

#[derive(Debug, Clone, Default)]
pub struct MatchOutcome {
    pub pairs: Vec<Pairing>,
    /// Media files with no subtitle of the same base name
    pub unmatched: Vec<MediaItem>,
}

/// List regular files directly inside `dir` whose extension is in `extensions`.
///
/// Results are sorted by file name so runs are reproducible across platforms.
pub fn scan_dir<P: AsRef<Path>>(dir: P, extensions: &[&str]) -> Result<Vec<InputFile>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(SubkitError::FileNotFound(dir.display().to_string()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        match InputFile::from_path(entry.path()) {
            Some(file) if extensions.contains(&file.extension.as_str()) => {
                debug!("Found input file: {}", entry.path().display());
                files.push(file);
            }
            _ => debug!("Ignoring {}", entry.path().display()),
        }
    }

    Ok(files)
}

/// Pair each media file with the subtitle file of the same base name.
///
/// When several subtitle files share a base name the first one in scan order
/// is used. Unpaired media files are reported, not treated as errors.
pub fn pair_by_base(media: &[MediaItem], subtitles: &[SubtitleItem]) -> MatchOutcome {
    let mut by_base: HashMap<&str, &SubtitleItem> = HashMap::new();
    for subtitle in subtitles {
        by_base.entry(subtitle.base.as_str()).or_insert(subtitle);
    }

    let mut outcome = MatchOutcome::default();
    for item in media {
        match by_base.get(item.base.as_str()) {
            Some(subtitle) => outcome.pairs.push(Pairing {
                media: item.clone(),
                subtitle: (*subtitle).clone(),
            }),
            None => {
                warn!("No subtitle found for {}, skipping", item.file_name());
                outcome.unmatched.push(item.clone());
            }
        }
    }

    outcome
}

/// Count how many files share each base name
pub fn base_name_counts(files: &[InputFile]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for file in files {
        *counts.entry(file.base.clone()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn item(name: &str) -> InputFile {
        InputFile::from_path(Path::new("/in").join(name)).unwrap()
    }

    #[test]
    fn test_input_file_parts() {
        let file = item("Episode.01.MKV");
        assert_eq!(file.base, "Episode.01");
        assert_eq!(file.extension, "mkv");
        assert_eq!(file.file_name(), "Episode.01.MKV");
        assert!(InputFile::from_path("/in/noext").is_none());
    }

    #[test]
    fn test_scan_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.mp4", "b.MKV", "c.avi", "d.mov", "a.srt", "notes.txt"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("nested.mp4")).unwrap();

        let videos = scan_dir(dir.path(), VIDEO_EXTENSIONS).unwrap();
        let mut names: Vec<_> = videos.iter().map(|f| f.file_name()).collect();
        names.sort();
        assert_eq!(names, vec!["a.mp4", "b.MKV", "c.avi"]);

        let subtitles = scan_dir(dir.path(), SUBTITLE_EXTENSIONS).unwrap();
        assert_eq!(subtitles.len(), 1);
        assert_eq!(subtitles[0].base, "a");
    }

    #[test]
    fn test_scan_missing_dir() {
        let err = scan_dir("/definitely/not/here", VIDEO_EXTENSIONS).unwrap_err();
        assert!(matches!(err, SubkitError::FileNotFound(_)));
    }

    #[test]
    fn test_pairing_skips_unmatched_media() {
        let media = vec![item("a.mp4"), item("b.mkv")];
        let subtitles = vec![item("a.srt"), item("z.srt")];

        let outcome = pair_by_base(&media, &subtitles);
        assert_eq!(outcome.pairs.len(), 1);
        assert_eq!(outcome.pairs[0].media.base, "a");
        assert_eq!(outcome.pairs[0].subtitle.file_name(), "a.srt");
        assert_eq!(outcome.unmatched, vec![item("b.mkv")]);
    }

    #[test]
    fn test_pairing_shares_subtitle_between_extensions() {
        let media = vec![item("x.mp4"), item("x.avi")];
        let subtitles = vec![item("x.srt")];

        let outcome = pair_by_base(&media, &subtitles);
        assert_eq!(outcome.pairs.len(), 2);
        assert!(outcome.unmatched.is_empty());
    }

    #[test]
    fn test_base_name_counts() {
        let counts = base_name_counts(&[item("x.mp4"), item("x.mkv"), item("y.mp4")]);
        assert_eq!(counts["x"], 2);
        assert_eq!(counts["y"], 1);
    }
}
