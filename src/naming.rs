//! Output file names.
//!
//! Two inputs sharing a base name within one run get the original extension
//! embedded in their output name, so no output silently overwrites another.

use std::collections::HashMap;

use crate::matcher::{base_name_counts, InputFile};

/// Assigns output names for one run, given every input file of that run.
pub struct OutputNamer {
    counts: HashMap<String, usize>,
    extension_counts: HashMap<(String, String), usize>,
}

impl OutputNamer {
    pub fn new(files: &[InputFile]) -> Self {
        let mut extension_counts = HashMap::new();
        for file in files {
            *extension_counts
                .entry((file.base.clone(), file.extension.clone()))
                .or_insert(0) += 1;
        }

        Self {
            counts: base_name_counts(files),
            extension_counts,
        }
    }

    fn is_shared(&self, file: &InputFile) -> bool {
        self.counts.get(&file.base).copied().unwrap_or(0) > 1
    }

    /// `{base}` or `{base}_{ext}` when the base name is not unique
    fn stem(&self, file: &InputFile) -> String {
        if self.is_shared(file) {
            // `a.srt` and `a.SRT` only differ by case
            let case_clash = self
                .extension_counts
                .get(&(file.base.clone(), file.extension.clone()))
                .is_some_and(|count| *count > 1);
            let extension = match file.path.extension() {
                Some(raw) if case_clash => raw.to_string_lossy().into_owned(),
                _ => file.extension.clone(),
            };
            format!("{}_{}", file.base, extension)
        } else {
            file.base.clone()
        }
    }

    /// Burned video: `{base}{suffix}.mp4`
    pub fn burned_video(&self, file: &InputFile, suffix: &str) -> String {
        format!("{}{}.mp4", self.stem(file), suffix)
    }

    /// Generated subtitles: `{base}.srt`
    pub fn transcript(&self, file: &InputFile) -> String {
        format!("{}.srt", self.stem(file))
    }

    /// Translated subtitles: `{base}_{lang}.srt`
    pub fn translation(&self, file: &InputFile, language: &str) -> String {
        format!("{}_{}.srt", self.stem(file), language)
    }
}
