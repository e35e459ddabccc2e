use std::{path::Path, sync::LazyLock};

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::fmt::{format::FmtSpan, writer::MakeWriterExt};

pub const LOG_FILE_PREFIX: &str = "wakelog";
const MAX_LOG_FILES: usize = 5;
const DEFAULT_LEVEL: LevelFilter = LevelFilter::WARN;

/// Sends logs into daily rotated `wakelog.*` files under `application_data_path/logs`.
/// `verbose` logs everything and mirrors it to stdout, otherwise `RUST_LOG` or `warn` is used.
pub fn enable_logging(application_data_path: &Path, verbose: bool) -> Result<()> {
    let appender = tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(MAX_LOG_FILES)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(application_data_path.join("logs"))?;

    let stdout = std::io::stdout.with_filter(move |_| verbose);

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(log_directive(
            verbose,
            std::env::var("RUST_LOG").ok(),
        )))
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(stdout.and(appender))
        .pretty()
        .init();
    Ok(())
}

/// Filter directive limited to this crate's targets.
fn log_directive(verbose: bool, env_level: Option<String>) -> String {
    let level = if verbose {
        LevelFilter::TRACE.to_string()
    } else {
        env_level
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
    };
    format!("{}={level}", env!("CARGO_PKG_NAME").replace('-', "_"))
}

pub static TEST_LOGGING: LazyLock<()> = LazyLock::new(|| {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_test_writer()
        .pretty()
        .init()
});
