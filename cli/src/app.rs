use std::future::Future;

use stdio_fixtures_core::config::{self, FixtureConfig};
use stdio_fixtures_core::logging::{self, WorkerGuard};
use stdio_fixtures_core::{FixtureError, Pacer};

/// Config and logging for a binary. Never fails: a bad log directory or
/// filter only turns logging off, it must not change the exit status.
pub fn init_ambient(name: &str) -> (FixtureConfig, Option<WorkerGuard>) {
    let cfg = config::load_default().unwrap_or_default();
    let guard = logging::init_logging(&cfg.log, name).ok().flatten();
    (cfg, guard)
}

/// Shared start-up for every fixture binary: config, logging, then the
/// fixture itself. Any fixture error becomes a non-zero exit status via
/// `main`.
pub async fn run<F, Fut>(fixture: &'static str, body: F) -> anyhow::Result<()>
where
    F: FnOnce(Pacer) -> Fut,
    Fut: Future<Output = Result<(), FixtureError>>,
{
    // Opened before any fixture touches the standard streams.
    let (cfg, _guard) = init_ambient(fixture);
    tracing::info!(fixture, pid = std::process::id(), "starting");

    match body(Pacer::new(cfg.time_unit)).await {
        Ok(()) => {
            tracing::info!(fixture, "finished");
            Ok(())
        }
        Err(e) => {
            tracing::error!(fixture, error = %e, "failed");
            Err(e.into())
        }
    }
}
