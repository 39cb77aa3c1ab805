//! Echoes stdin back as numbered, whitespace-stripped lines, one per time
//! unit.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite};

use crate::error::FixtureError;
use crate::output::emit_line;
use crate::pacer::Pacer;

/// Unicode whitespace plus the ASCII information separators \x1c..=\x1f,
/// which line-oriented tools also treat as blank.
fn is_strippable(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

pub fn format_line(index: u64, raw: &str) -> String {
    format!("Line {index}: {}", raw.trim_matches(is_strippable))
}

/// Returns how many lines were echoed. A final line without a terminator
/// still counts; input that is not UTF-8 is a read error.
pub async fn run<R, W>(input: R, output: &mut W, pacer: &Pacer) -> Result<u64, FixtureError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut lines = input.lines();
    let mut index = 0;

    while let Some(line) = lines.next_line().await.map_err(FixtureError::Read)? {
        index += 1;
        emit_line(output, &format_line(index, &line))
            .await
            .map_err(FixtureError::write("stdout"))?;
        tracing::debug!(line = index, "echoed");
        pacer.wait(1).await;
    }

    tracing::info!(lines = index, "end of input");
    Ok(index)
}
