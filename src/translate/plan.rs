use std::path::PathBuf;
use tracing::{info, warn};

/// One `(file, source language, target language)` unit of work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationJob {
    pub source_path: PathBuf,
    pub source_language: String,
    pub target_language: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobPlan {
    pub jobs: Vec<TranslationJob>,
    /// Targets equal to the source language
    pub elided: Vec<String>,
    /// Targets listed more than once; only the first occurrence is kept
    pub duplicates: Vec<String>,
}

/// Expand one subtitle file into a job per target language.
///
/// `source` must already be resolved (never `auto`).
pub fn plan_jobs<P: Into<PathBuf>>(source_path: P, source: &str, targets: &[String]) -> JobPlan {
    let source_path = source_path.into();
    let file_label = source_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut plan = JobPlan::default();
    let mut seen: Vec<&str> = Vec::new();

    for target in targets {
        let target = target.trim();
        if seen.contains(&target) {
            warn!("[{}] Target '{}' listed more than once, ignoring repeat", file_label, target);
            plan.duplicates.push(target.to_string());
            continue;
        }
        seen.push(target);

        if target == source {
            info!("[{}] Skipping '{}' (same as input language)", file_label, target);
            plan.elided.push(target.to_string());
            continue;
        }

        plan.jobs.push(TranslationJob {
            source_path: source_path.clone(),
            source_language: source.to_string(),
            target_language: target.to_string(),
        });
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn langs(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_same_language_is_elided() {
        let plan = plan_jobs("/in/a.srt", "en", &langs(&["en", "pt"]));
        assert_eq!(plan.jobs.len(), 1);
        assert_eq!(plan.jobs[0].target_language, "pt");
        assert_eq!(plan.jobs[0].source_language, "en");
        assert_eq!(plan.elided, vec!["en"]);
    }

    #[test]
    fn test_one_job_per_target() {
        let plan = plan_jobs("/in/a.srt", "fr", &langs(&["en", "pt", "de"]));
        let targets: Vec<_> = plan.jobs.iter().map(|j| j.target_language.as_str()).collect();
        assert_eq!(targets, vec!["en", "pt", "de"]);
        assert!(plan.elided.is_empty());
        assert!(plan.jobs.iter().all(|j| j.source_path == PathBuf::from("/in/a.srt")));
    }

    #[test]
    fn test_duplicate_targets_collapse() {
        let plan = plan_jobs("/in/a.srt", "en", &langs(&["pt", "pt", "en", "en"]));
        assert_eq!(plan.jobs.len(), 1);
        assert_eq!(plan.elided, vec!["en"]);
        assert_eq!(plan.duplicates, vec!["pt", "en"]);
    }

    #[test]
    fn test_no_targets() {
        assert_eq!(plan_jobs("/in/a.srt", "en", &[]), JobPlan::default());
    }
}
