use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::process::Command;
use tokio::sync::Mutex;
use tracing::{info, debug};

use crate::config::ModelSize;
use crate::error::{Result, SubkitError};
use crate::subtitle::Segment;
use crate::worker::{LineWorker, WorkerCommand};
use super::SpeechModel;

/// Transcription loop run by the Python interpreter; the model size follows
/// the script as its only argument. Each request is a media path, each
/// response one JSON document. Anything Whisper prints goes to stderr.
const WHISPER_SCRIPT: &str = r#"
import json
import sys

responses = sys.stdout
sys.stdout = sys.stderr

import whisper

model = whisper.load_model(sys.argv[1])

while True:
    line = sys.stdin.readline()
    if not line:
        break
    try:
        result = model.transcribe(line.rstrip("\n"))
        response = {
            "text": result.get("text", ""),
            "language": result.get("language"),
            "segments": [
                {"id": s["id"], "start": s["start"], "end": s["end"], "text": s["text"]}
                for s in result["segments"]
            ],
        }
    except Exception as e:
        response = {"error": str(e)}
    responses.write(json.dumps(response) + "\n")
    responses.flush()
"#;

/// OpenAI Whisper specific JSON output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperOutput {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub segments: Vec<WhisperSegment>,
    pub language: Option<String>,
    /// Set instead of segments when the file could not be transcribed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// OpenAI Whisper specific segment format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhisperSegment {
    pub id: u64,
    pub start: f64,
    pub end: f64,
    pub text: String,
    pub avg_logprob: Option<f64>,
    pub no_speech_prob: Option<f64>,
}

impl From<WhisperOutput> for Vec<Segment> {
    fn from(output: WhisperOutput) -> Self {
        output
            .segments
            .into_iter()
            .map(|seg| Segment {
                start: seg.start,
                end: seg.end,
                text: seg.text.trim().to_string(),
            })
            .collect()
    }
}

/// Parse one Whisper JSON document into segments
pub fn parse_whisper_json(json_content: &str) -> Result<Vec<Segment>> {
    let output: WhisperOutput = serde_json::from_str(json_content)
        .map_err(|e| SubkitError::Transcriber(format!("Failed to parse Whisper JSON: {}", e)))?;

    if let Some(error) = output.error {
        return Err(SubkitError::Transcriber(format!("Whisper transcription failed: {}", error)));
    }

    if let Some(language) = &output.language {
        debug!("Whisper reported language: {}", language);
    }

    Ok(output.into())
}

/// OpenAI Whisper running in a single Python process, so the model is
/// loaded once and reused for every file of the run.
pub struct WhisperWorker {
    python: String,
    command: WorkerCommand,
    model_size: ModelSize,
    process: Mutex<Option<LineWorker>>,
}

impl WhisperWorker {
    pub fn new<S: Into<String>>(python: S, model_size: ModelSize) -> Self {
        let python = python.into();
        let command = WorkerCommand::python(python.clone(), WHISPER_SCRIPT);
        Self::with_command(python, command, model_size)
    }

    /// Use `command` as the worker; it receives the model size as its last argument.
    pub fn with_command<S: Into<String>>(python: S, command: WorkerCommand, model_size: ModelSize) -> Self {
        Self {
            python: python.into(),
            command,
            model_size,
            process: Mutex::new(None),
        }
    }
}

#[async_trait]
impl SpeechModel for WhisperWorker {
    async fn transcribe(&self, media_path: &Path) -> Result<Vec<Segment>> {
        let request = media_path
            .to_str()
            .ok_or_else(|| SubkitError::Transcriber(format!("Unsupported path: {}", media_path.display())))?;

        let mut process = self.process.lock().await;
        if process.is_none() {
            info!("Loading Whisper model: {}", self.model_size);
            let worker = LineWorker::spawn(&self.command, &[self.model_size.as_str()])
                .map_err(|e| SubkitError::Transcriber(format!("Failed to start Whisper: {}", e)))?;
            *process = Some(worker);
        }
        let Some(worker) = process.as_mut() else {
            return Err(SubkitError::Transcriber("Whisper worker unavailable".to_string()));
        };

        debug!("Transcribing {}", media_path.display());
        let response = match worker.request(request).await {
            Ok(response) => response,
            Err(e) => {
                // Started again on the next file
                *process = None;
                return Err(SubkitError::Transcriber(format!("Whisper worker failed: {}", e)));
            }
        };

        let segments = parse_whisper_json(&response)?;
        info!("Transcribed {} segments from {}", segments.len(), media_path.display());
        Ok(segments)
    }

    async fn check_availability(&self) -> Result<()> {
        let output = Command::new(&self.python)
            .args(["-c", "import whisper"])
            .output()
            .await
            .map_err(|e| SubkitError::Transcriber(format!("{} not found: {}", self.python, e)))?;

        if output.status.success() {
            info!("Whisper is available (model: {})", self.model_size);
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(SubkitError::Transcriber(format!(
                "Whisper not available. Install with: pip install openai-whisper\nError: {}",
                stderr
            )))
        }
    }
}
