use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Project root holding input/, output/, config/ and logs/
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    /// Configuration file path (defaults to <root>/config/config.yaml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Burn the configured subtitle file into the configured video
    Burn,

    /// Burn every video that has a subtitle file with the same base name
    BurnBatch,

    /// Generate SRT subtitles for every video with Whisper
    Generate,

    /// Translate every SRT file into the configured output languages
    Translate,
}

impl Commands {
    /// Name shown on every log line of a run
    pub fn program_name(&self) -> &'static str {
        match self {
            Self::Burn | Self::BurnBatch => "Subtitle Burner",
            Self::Generate => "Subtitle Generator",
            Self::Translate => "Subtitle Translator",
        }
    }
}
