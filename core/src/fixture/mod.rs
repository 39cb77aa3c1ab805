//! The fixture behaviors, written against `tokio::io` traits so the binaries
//! can hand them the real standard streams and tests can hand them in-memory
//! ones.

pub mod closer;
pub mod sleepy;
pub mod stdin_echo;

#[cfg(test)]
pub(crate) mod test_support {
    use std::time::Duration;

    use tokio::io::{AsyncBufReadExt, BufReader, DuplexStream};
    use tokio::time::Instant;

    /// Paused-clock timers land on millisecond ticks.
    pub fn assert_at(start: Instant, secs: u64) {
        let elapsed = start.elapsed();
        let expected = Duration::from_secs(secs);
        assert!(
            elapsed >= expected && elapsed < expected + Duration::from_millis(5),
            "expected ~{expected:?}, got {elapsed:?}"
        );
    }

    /// Reads one line from the pipe, `None` at EOF.
    pub async fn next_line(reader: &mut BufReader<DuplexStream>) -> Option<String> {
        let mut line = String::new();
        match reader.read_line(&mut line).await.unwrap() {
            0 => None,
            _ => Some(line),
        }
    }
}
