//! A slow, chatty process: five status lines spread over six time units,
//! one of which reports whether stdout is a terminal.

use tokio::io::AsyncWrite;

use crate::error::FixtureError;
use crate::output::emit_line;
use crate::pacer::Pacer;

pub const STARTING: &str = "Starting...";
pub const WORKING: &str = "Working...";
pub const TTY: &str = "Stdout is a tty";
pub const NOT_TTY: &str = "Stdout is not a tty";
pub const SHUTTING_DOWN: &str = "Shutting down...";

/// `stdout_is_tty` is queried once, right after `Working...` is written.
pub async fn run<W, F>(output: &mut W, stdout_is_tty: F, pacer: &Pacer) -> Result<(), FixtureError>
where
    W: AsyncWrite + Unpin + ?Sized,
    F: FnOnce() -> bool,
{
    pacer.wait(1).await;
    say(output, STARTING).await?;
    pacer.wait(2).await;
    say(output, WORKING).await?;

    let tty = stdout_is_tty();
    tracing::info!(tty, "checked stdout");
    say(output, if tty { TTY } else { NOT_TTY }).await?;

    pacer.wait(2).await;
    say(output, SHUTTING_DOWN).await?;
    pacer.wait(1).await;
    Ok(())
}

async fn say<W>(output: &mut W, line: &str) -> Result<(), FixtureError>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    emit_line(output, line)
        .await
        .map_err(FixtureError::write("stdout"))
}
