use tracing::{info, Level};
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    field::RecordFields,
    fmt::{
        self,
        format::{DefaultFields, Writer},
        FormatFields,
    },
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::context::RunContext;
use crate::error::{Result, SubkitError};

/// Field formatter for the log file.
///
/// Formatted span fields are cached per formatter type, so the file layer
/// needs a type of its own or it would reuse the console's colored fields.
#[derive(Debug, Default)]
struct PlainFields(DefaultFields);

impl<'writer> FormatFields<'writer> for PlainFields {
    fn format_fields<R: RecordFields>(&self, writer: Writer<'writer>, fields: R) -> std::fmt::Result {
        self.0.format_fields(writer, fields)
    }
}

/// Setup logging to both console and the per-run log file.
///
/// `RUST_LOG` is honored; without it the level is INFO, or DEBUG with `-v`.
/// The returned guard flushes the file writer when dropped; keep it alive
/// until the run ends.
pub fn setup_logging(ctx: &RunContext, verbose: bool) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&ctx.log_dir)?;

    // One file per run, named after the run timestamp
    let file_appender = rolling::never(&ctx.log_dir, ctx.log_file_name());
    let (non_blocking_file, guard) = non_blocking(file_appender);

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    let mut filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();
    if verbose {
        filter = filter.add_directive(Level::DEBUG.into());
    }

    let console_layer = fmt::layer()
        .with_target(false);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .fmt_fields(PlainFields::default())
        .with_target(false)
        .with_ansi(false); // No ANSI colors in file

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| SubkitError::Config(format!("Failed to initialize logging: {}", e)))?;

    info!("Logging initialized - level: {}, file: {}", log_level, ctx.log_path().display());

    Ok(guard)
}
