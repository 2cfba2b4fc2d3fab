//! Long-lived helper processes driven one line at a time.
//!
//! A worker loads its model once at startup, then answers every request line
//! written to its stdin with exactly one response line on its stdout.

use std::io::{Error, ErrorKind};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tracing::debug;

/// Program and leading arguments used to start a worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl WorkerCommand {
    pub fn new<S: Into<String>>(program: S, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// `{interpreter} -c {script}`
    pub fn python<S: Into<String>>(interpreter: S, script: &str) -> Self {
        Self::new(interpreter, vec!["-c".to_string(), script.to_string()])
    }
}

pub struct LineWorker {
    // Kept so the process is killed when the worker is dropped
    _child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl LineWorker {
    /// Start `command` with `extra_args` appended after its own arguments
    pub fn spawn(command: &WorkerCommand, extra_args: &[&str]) -> std::io::Result<Self> {
        let mut child = Command::new(&command.program)
            .args(&command.args)
            .args(extra_args)
            .env("PYTHONIOENCODING", "utf-8")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()?;

        debug!("Started worker {} {:?} (pid {:?})", command.program, extra_args, child.id());

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::new(ErrorKind::BrokenPipe, "worker stdin unavailable"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::new(ErrorKind::BrokenPipe, "worker stdout unavailable"))?;

        Ok(Self {
            _child: child,
            stdin,
            stdout: BufReader::new(stdout),
        })
    }

    /// Send one request line and wait for its response line
    pub async fn request(&mut self, line: &str) -> std::io::Result<String> {
        if line.contains('\n') {
            return Err(Error::new(ErrorKind::InvalidInput, "request spans several lines"));
        }

        self.stdin.write_all(line.as_bytes()).await?;
        self.stdin.write_all(b"\n").await?;
        self.stdin.flush().await?;

        let mut response = String::new();
        if self.stdout.read_line(&mut response).await? == 0 {
            return Err(Error::new(ErrorKind::UnexpectedEof, "worker exited"));
        }

        Ok(response.trim_end_matches(['\r', '\n']).to_string())
    }
}
