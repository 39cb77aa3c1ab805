//! Structured logging for the fixtures.
//!
//! Stdout and stderr carry the fixture contract, so records only ever go to a
//! per-fixture file (`<dir>/<fixture>.log`). With no directory configured no
//! subscriber is installed and every `tracing` macro is a no-op.

use anyhow::Context;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

pub use tracing_appender::non_blocking::WorkerGuard;

/// Installs the global subscriber. Keep the returned guard alive until exit,
/// dropping it flushes pending records.
pub fn init_logging(cfg: &LogConfig, fixture: &str) -> anyhow::Result<Option<WorkerGuard>> {
    let Some(dir) = &cfg.dir else {
        return Ok(None);
    };

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(fixture)
        .filename_suffix("log")
        .build(dir)
        .with_context(|| format!("failed to open log file in {}", dir.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_new(&cfg.filter)
        .with_context(|| format!("invalid log filter: {}", cfg.filter))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install subscriber: {e}"))?;

    Ok(Some(guard))
}
