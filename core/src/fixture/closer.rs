//! Writes one line to each standard stream and closes them one at a time
//! while the process stays alive.

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::FixtureError;
use crate::output::emit_line;
use crate::pacer::Pacer;

pub const STDOUT_LINE: &str = "This is the last time I write to stdout!";
pub const STDERR_LINE: &str = "And THIS is the last time I write to stderr!";

pub async fn run<O, E>(stdout: &mut O, stderr: &mut E, pacer: &Pacer) -> Result<(), FixtureError>
where
    O: AsyncWrite + Unpin + ?Sized,
    E: AsyncWrite + Unpin + ?Sized,
{
    emit_line(stdout, STDOUT_LINE)
        .await
        .map_err(FixtureError::write("stdout"))?;
    stdout
        .shutdown()
        .await
        .map_err(FixtureError::close("stdout"))?;
    tracing::info!("stdout closed");
    pacer.wait(1).await;

    emit_line(stderr, STDERR_LINE)
        .await
        .map_err(FixtureError::write("stderr"))?;
    stderr
        .shutdown()
        .await
        .map_err(FixtureError::close("stderr"))?;
    tracing::info!("stderr closed");
    pacer.wait(1).await;

    Ok(())
}
