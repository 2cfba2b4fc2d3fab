use std::collections::HashMap;
use tracing::{error, info, warn};

use crate::config::{Config, SourceLanguage};
use crate::context::RunContext;
use crate::error::{Result, SubkitError};
use crate::matcher::{scan_dir, InputFile, SUBTITLE_EXTENSIONS};
use crate::naming::OutputNamer;
use crate::subtitle::{detection_sample, split_lines, write_atomic};
use crate::translate::{
    plan_jobs, translate_document, LanguageDetector, LanguagePair, PackageIndex,
    TranslationBackend, TranslationJob,
};
use super::RunSummary;

/// Translates every subtitle file into each configured language
pub struct TranslateWorkflow {
    config: Config,
    backend: Box<dyn TranslationBackend>,
    detector: Box<dyn LanguageDetector>,
}

/// Install state of a package within one run
#[derive(Debug, Clone)]
enum InstallState {
    Installed,
    Failed(String),
}

/// What every job of one run shares
struct TranslationRun<'a> {
    ctx: &'a RunContext,
    namer: OutputNamer,
    index: PackageIndex,
    installs: HashMap<LanguagePair, InstallState>,
}

impl TranslateWorkflow {
    pub fn new(
        config: Config,
        backend: Box<dyn TranslationBackend>,
        detector: Box<dyn LanguageDetector>,
    ) -> Self {
        Self { config, backend, detector }
    }

    pub async fn run(&self, ctx: &RunContext) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        info!("Input language: {}", self.config.input_language);
        info!("Output languages: {:?}", self.config.output_languages);

        let files = scan_dir(&ctx.input_dir, SUBTITLE_EXTENSIONS)?;
        if files.is_empty() {
            info!("No valid input files ({:?}) found in input folder", SUBTITLE_EXTENSIONS);
            return Ok(summary);
        }
        info!("Found {} subtitle files", files.len());

        self.backend.refresh_index().await?;
        let mut run = TranslationRun {
            ctx,
            namer: OutputNamer::new(&files),
            index: PackageIndex::new(self.backend.available_packages().await?),
            installs: HashMap::new(),
        };

        for file in &files {
            let label = file.file_name();
            info!(" - {}", label);

            let content = match tokio::fs::read_to_string(&file.path).await {
                Ok(content) => content,
                Err(e) => {
                    error!("Failed to read file {}: {}", label, e);
                    summary.record_failed(label, e);
                    continue;
                }
            };
            let lines = split_lines(&content);

            let source = match self.resolve_source(&label, &lines) {
                Ok(source) => source,
                Err(e) => {
                    error!("[{}] Failed to detect language: {}", label, e);
                    summary.record_failed(label, e);
                    continue;
                }
            };

            let plan = plan_jobs(&file.path, &source, &self.config.output_languages);
            for target in &plan.elided {
                summary.record_skipped(format!("{} -> {}", label, target), "same as input language");
            }

            for job in &plan.jobs {
                self.run_job(&mut run, file, job, &lines, &mut summary).await;
            }
        }

        info!("Subtitle Translation Completed");
        Ok(summary)
    }

    /// Source language for a file: configured, or detected from a text sample
    fn resolve_source(&self, label: &str, lines: &[&str]) -> Result<String> {
        match &self.config.input_language {
            SourceLanguage::Code(code) => {
                info!("[{}] Using configured input language: {}", label, code);
                Ok(code.clone())
            }
            SourceLanguage::Auto => {
                let sample = detection_sample(lines);
                if sample.is_empty() {
                    return Err(SubkitError::Detection("no text lines to sample".to_string()));
                }
                let detected = self.detector.detect(&sample)?;
                info!("[{}] Detected language: {}", label, detected);
                Ok(detected)
            }
        }
    }

    async fn run_job(
        &self,
        run: &mut TranslationRun<'_>,
        file: &InputFile,
        job: &TranslationJob,
        lines: &[&str],
        summary: &mut RunSummary,
    ) {
        let label = file.file_name();
        let item = format!("{} -> {}", label, job.target_language);

        let Some(pair) = run.index.lookup(&job.source_language, &job.target_language) else {
            warn!(
                "[{}] No valid translation path for {} -> {}",
                label, job.source_language, job.target_language
            );
            summary.record_skipped(item, "no translation package");
            return;
        };

        if let Err(e) = self.ensure_installed(pair, &mut run.installs).await {
            error!("[{}] Failed to install model {}: {}", label, pair, e);
            summary.record_failed(item, e);
            return;
        }

        info!("[{}] Starting translation: {}", label, pair);
        let output_name = run.namer.translation(file, &job.target_language);
        let output_path = run.ctx.output_dir.join(&output_name);

        let result = match translate_document(lines, self.backend.as_ref(), pair).await {
            Ok(translated) => write_atomic(&output_path, translated.as_bytes()),
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                info!("[{}] Translated file saved: {}", label, output_name);
                summary.record_written(output_path);
            }
            Err(e) => {
                error!("[{}] Failed to write translated file '{}': {}", label, output_name, e);
                summary.record_failed(item, e);
            }
        }
    }

    /// Install a package at most once per run
    async fn ensure_installed(
        &self,
        pair: &LanguagePair,
        installs: &mut HashMap<LanguagePair, InstallState>,
    ) -> Result<()> {
        match installs.get(pair) {
            Some(InstallState::Installed) => return Ok(()),
            Some(InstallState::Failed(reason)) => {
                return Err(SubkitError::Translation(format!("earlier install failed: {}", reason)));
            }
            None => {}
        }

        info!("Installing translation model: {}", pair);
        match self.backend.install(pair).await {
            Ok(()) => {
                installs.insert(pair.clone(), InstallState::Installed);
                Ok(())
            }
            Err(e) => {
                installs.insert(pair.clone(), InstallState::Failed(e.to_string()));
                Err(e)
            }
        }
    }
}
