use async_trait::async_trait;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tokio::process::Command;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::{Result, SubkitError};
use crate::worker::{LineWorker, WorkerCommand};
use super::{LanguagePair, TranslationBackend};

/// Translator loop run by the Python interpreter; source and target codes
/// follow the script as arguments.
const TRANSLATOR_SCRIPT: &str = r#"
import sys
import argostranslate.translate as argos

from_code, to_code = sys.argv[1], sys.argv[2]
languages = {language.code: language for language in argos.get_installed_languages()}
translation = languages[from_code].get_translation(languages[to_code])

while True:
    line = sys.stdin.readline()
    if not line:
        break
    result = translation.translate(line.rstrip("\n"))
    sys.stdout.write(" ".join(result.splitlines()) + "\n")
    sys.stdout.flush()
"#;

/// Argos Translate: packages through `argospm`, translation through one
/// in-process translator per language pair, loaded on first use and kept
/// for the rest of the run.
pub struct ArgosBackend {
    package_manager: String,
    translator: WorkerCommand,
    workers: Mutex<HashMap<LanguagePair, LineWorker>>,
}

impl ArgosBackend {
    pub fn new<S1: Into<String>, S2: Into<String>>(package_manager: S1, python: S2) -> Self {
        Self::with_translator(package_manager, WorkerCommand::python(python, TRANSLATOR_SCRIPT))
    }

    /// Use `translator` as the worker command; it receives the source and
    /// target codes as its last two arguments.
    pub fn with_translator<S: Into<String>>(package_manager: S, translator: WorkerCommand) -> Self {
        Self {
            package_manager: package_manager.into(),
            translator,
            workers: Mutex::new(HashMap::new()),
        }
    }

    async fn run(&self, binary: &str, args: &[&str], description: &str) -> Result<String> {
        debug!("Executing {} {:?}", binary, args);

        let output = Command::new(binary)
            .args(args)
            .output()
            .await
            .map_err(|e| SubkitError::Translation(format!("Failed to execute {}: {}", binary, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SubkitError::Translation(format!("{} failed: {}", description, stderr.trim())));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Pull every `translate-xx_yy` package code out of `argospm search` output
pub fn parse_package_listing(listing: &str) -> Vec<LanguagePair> {
    listing
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .filter_map(LanguagePair::from_package_code)
        .collect()
}

#[async_trait]
impl TranslationBackend for ArgosBackend {
    async fn refresh_index(&self) -> Result<()> {
        info!("Updating translation package index");
        self.run(&self.package_manager, &["update"], "Package index update").await?;
        Ok(())
    }

    async fn available_packages(&self) -> Result<Vec<LanguagePair>> {
        let listing = self.run(&self.package_manager, &["search"], "Package search").await?;
        let packages = parse_package_listing(&listing);
        info!("Translation index lists {} packages", packages.len());
        Ok(packages)
    }

    async fn install(&self, pair: &LanguagePair) -> Result<()> {
        let code = pair.package_code();
        self.run(&self.package_manager, &["install", code.as_str()], "Package install").await?;
        Ok(())
    }

    async fn translate(&self, pair: &LanguagePair, text: &str) -> Result<String> {
        let mut workers = self.workers.lock().await;

        let worker = match workers.entry(pair.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                info!("Loading translator {}", pair);
                let worker = LineWorker::spawn(&self.translator, &[pair.from.as_str(), pair.to.as_str()])
                    .map_err(|e| {
                        SubkitError::Translation(format!("Failed to start translator {}: {}", pair, e))
                    })?;
                entry.insert(worker)
            }
        };

        let result = worker.request(text).await;
        result.map_err(|e| {
            // A broken worker is replaced on the next request
            workers.remove(pair);
            SubkitError::Translation(format!("Translator {} failed: {}", pair, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_package_listing() {
        let listing = "translate-ar_en: Arabic -> English\n\
                       translate-en_pt: English -> Portuguese\n\
                       \n\
                       sbd-en: sentence boundary\n\
                       translate-pt_en\n";
        let packages = parse_package_listing(listing);
        assert_eq!(
            packages,
            vec![
                LanguagePair::new("ar", "en"),
                LanguagePair::new("en", "pt"),
                LanguagePair::new("pt", "en"),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_binaries() {
        let backend = ArgosBackend::new("/nonexistent/argospm", "/nonexistent/python");
        assert!(backend.refresh_index().await.is_err());
        let err = backend.translate(&LanguagePair::new("en", "pt"), "Hello").await.unwrap_err();
        assert!(matches!(err, SubkitError::Translation(_)));
    }

    #[cfg(unix)]
    mod worker_reuse {
        use super::*;
        use crate::subtitle::split_lines;
        use crate::translate::translate_document;
        use std::fs;
        use std::path::Path;

        /// Translator stand-in that records each start in `starts.log`
        fn fake_backend(dir: &Path) -> ArgosBackend {
            let script = dir.join("translator.sh");
            fs::write(
                &script,
                "echo \"$2 $3\" >> \"$1\"\n\
                 while IFS= read -r line; do\n  echo \"[$3] $line\"\ndone\n",
            )
            .unwrap();
            let starts = dir.join("starts.log");
            let command = WorkerCommand::new(
                "sh",
                vec![script.display().to_string(), starts.display().to_string()],
            );
            ArgosBackend::with_translator("/nonexistent/argospm", command)
        }

        fn starts(dir: &Path) -> Vec<String> {
            fs::read_to_string(dir.join("starts.log"))
                .unwrap_or_default()
                .lines()
                .map(str::to_string)
                .collect()
        }

        #[tokio::test]
        async fn test_one_translator_per_pair() {
            let dir = tempfile::tempdir().unwrap();
            let backend = fake_backend(dir.path());
            let body = "1\n00:00:01,000 --> 00:00:02,000\nOne\nTwo\n\n\
                        2\n00:00:03,000 --> 00:00:04,000\n- Three\n\n\
                        3\n00:00:05,000 --> 00:00:06,000\nFour\n";
            let lines = split_lines(body);

            let pt = LanguagePair::new("en", "pt");
            let translated = translate_document(&lines, &backend, &pt).await.unwrap();
            assert_eq!(
                translated,
                "1\n00:00:01,000 --> 00:00:02,000\n[pt] One\n[pt] Two\n\n\
                 2\n00:00:03,000 --> 00:00:04,000\n[pt] - Three\n\n\
                 3\n00:00:05,000 --> 00:00:06,000\n[pt] Four\n"
            );
            translate_document(&lines, &backend, &pt).await.unwrap();
            assert_eq!(starts(dir.path()), vec!["en pt"]);

            let es = LanguagePair::new("en", "es");
            translate_document(&lines, &backend, &es).await.unwrap();
            assert_eq!(starts(dir.path()), vec!["en pt", "en es"]);
        }
    }
}
