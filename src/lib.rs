//! Subkit - batch subtitle burning, generation and translation
//!
//! Processes the files of a project's `input/` folder into `output/` using
//! ffmpeg, the Whisper CLI and Argos Translate.

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod matcher;
pub mod media;
pub mod naming;
pub mod subtitle;
pub mod transcribe;
pub mod worker;
pub mod translate;
pub mod workflow;
