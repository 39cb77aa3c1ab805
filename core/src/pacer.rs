use std::time::Duration;

use crate::config::TIME_UNIT;

/// Deliberate latency between fixture steps, counted in whole time units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacer {
    unit: Duration,
}

impl Pacer {
    pub fn new(unit: Duration) -> Self {
        Self { unit }
    }

    pub fn unit(&self) -> Duration {
        self.unit
    }

    /// Not cancellable; the full delay always elapses.
    pub async fn wait(&self, units: u32) {
        let delay = self.unit * units;
        tracing::trace!(?delay, "waiting");
        tokio::time::sleep(delay).await;
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new(TIME_UNIT)
    }
}
