use std::path::PathBuf;
use std::time::Duration;

/// One delay step. Harnesses assert on wall-clock time, so this is fixed.
pub const TIME_UNIT: Duration = Duration::from_secs(1);

pub const LOG_DIR_ENV: &str = "STDIO_FIXTURES_LOG_DIR";
pub const LOG_FILTER_ENV: &str = "STDIO_FIXTURES_LOG";

const DEFAULT_LOG_FILTER: &str = "debug";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureConfig {
    pub time_unit: Duration,
    pub log: LogConfig,
}

/// Logging never targets stdout/stderr; without a directory it is off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub dir: Option<PathBuf>,
    pub filter: String,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            time_unit: TIME_UNIT,
            log: LogConfig::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            dir: None,
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

pub fn load_default() -> anyhow::Result<FixtureConfig> {
    load_from(|key| std::env::var(key).ok())
}

pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<FixtureConfig> {
    let mut cfg = FixtureConfig::default();

    if let Some(v) = lookup(LOG_DIR_ENV) {
        if !v.trim().is_empty() {
            let dir = PathBuf::from(v.trim());
            if dir.exists() && !dir.is_dir() {
                anyhow::bail!("{LOG_DIR_ENV} is not a directory: {}", dir.display());
            }
            cfg.log.dir = Some(dir);
        }
    }
    if let Some(v) = lookup(LOG_FILTER_ENV) {
        if !v.trim().is_empty() {
            cfg.log.filter = v.trim().to_string();
        }
    }

    Ok(cfg)
}
