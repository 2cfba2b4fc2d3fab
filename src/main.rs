//! Subkit - batch subtitle burning, generation and translation
//!
//! Entry point: builds the run context, sets up logging, loads the config and
//! dispatches to the workflow of the chosen subcommand.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, info_span, Instrument};

use subkit::cli::{Args, Commands};
use subkit::config::Config;
use subkit::context::RunContext;
use subkit::logging::setup_logging;
use subkit::media::TranscoderFactory;
use subkit::transcribe::SpeechModelFactory;
use subkit::translate::{TranslationBackendFactory, WhatlangDetector};
use subkit::workflow::{BurnWorkflow, GenerateWorkflow, RunSummary, TranslateWorkflow};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut ctx = RunContext::new(&args.root);
    if let Some(config_path) = &args.config {
        ctx = ctx.with_config_path(config_path);
    }

    let _guard = setup_logging(&ctx, args.verbose)?;

    let span = info_span!("run", program = args.command.program_name());
    let result = run(args.command, &ctx).instrument(span).await;

    if let Err(e) = &result {
        error!("{:#}", e);
    }
    result
}

async fn run(command: Commands, ctx: &RunContext) -> Result<()> {
    ctx.log_startup();
    ctx.prepare().context("Failed to create project folders")?;

    let config = Config::from_file(&ctx.config_path).context("Failed to load config.yaml")?;

    let summary: RunSummary = match command {
        Commands::Burn => {
            let transcoder = TranscoderFactory::create_transcoder(&config.tools);
            BurnWorkflow::new(config, transcoder).run_single(ctx).await?
        }
        Commands::BurnBatch => {
            let transcoder = TranscoderFactory::create_transcoder(&config.tools);
            BurnWorkflow::new(config, transcoder).run_batch(ctx).await?
        }
        Commands::Generate => {
            info!("Using Whisper model '{}'", config.model_size);
            let model = SpeechModelFactory::create_default(&config.tools, config.model_size);
            GenerateWorkflow::new(model).run(ctx).await?
        }
        Commands::Translate => {
            let backend = TranslationBackendFactory::create_default(&config.tools);
            let detector = Box::new(WhatlangDetector::new());
            TranslateWorkflow::new(config, backend, detector).run(ctx).await?
        }
    };

    summary.log();
    Ok(())
}
