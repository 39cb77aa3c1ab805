use std::ffi::{OsStr, OsString};
use std::future::Future;
use std::io;
use std::process::{ExitStatus, Stdio};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tokio::time::{interval, Instant, MissedTickBehavior};

use super::format::Format;
use super::status::StatusLine;
use crate::config::TIME_UNIT;
use crate::error::RunnerError;

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub format: Format,
    /// Leave the final elapsed time on screen instead of erasing it.
    pub total: bool,
}

pub fn normalize_exit(status: ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(code) = status.code() {
            code
        } else if let Some(sig) = status.signal() {
            128 + sig
        } else {
            1
        }
    }
    #[cfg(windows)]
    {
        status.code().unwrap_or(1)
    }
}

/// Spawns `program` with piped stdout/stderr and relays both to this
/// process's own streams. Returns the child's normalized exit code.
pub async fn run_command(
    program: &OsStr,
    args: &[OsString],
    opts: &RunOptions,
) -> Result<i32, RunnerError> {
    let mut child = Command::new(program)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| RunnerError::Spawn {
            program: program.to_string_lossy().into_owned(),
            source,
        })?;
    tracing::info!(pid = ?child.id(), program = %program.to_string_lossy(), "spawned");

    let child_out = child
        .stdout
        .take()
        .ok_or_else(|| not_captured("child stdout"))?;
    let child_err = child
        .stderr
        .take()
        .ok_or_else(|| not_captured("child stderr"))?;
    let exit = async move { child.wait().await.map(normalize_exit) };

    relay(
        BufReader::new(child_out),
        BufReader::new(child_err),
        exit,
        &mut tokio::io::stdout(),
        &mut tokio::io::stderr(),
        opts,
    )
    .await
}

fn not_captured(stream: &'static str) -> RunnerError {
    RunnerError::StreamIo {
        stream,
        source: io::Error::other("stream was not captured"),
    }
}

/// Core loop: forwards complete lines from the child's streams, redraws the
/// status line on `out` every time unit, and finishes once the child has
/// exited and both of its streams have reached EOF. Output bytes are passed
/// through untouched; a final unterminated line gets a newline.
pub async fn relay<OR, ER, X, O, E>(
    mut child_out: OR,
    mut child_err: ER,
    exit: X,
    out: &mut O,
    err: &mut E,
    opts: &RunOptions,
) -> Result<i32, RunnerError>
where
    OR: AsyncBufRead + Unpin,
    ER: AsyncBufRead + Unpin,
    X: Future<Output = io::Result<i32>>,
    O: AsyncWrite + Unpin + ?Sized,
    E: AsyncWrite + Unpin + ?Sized,
{
    let mut status = StatusLine::new(opts.format.clone(), Instant::now());
    let mut ticker = interval(TIME_UNIT);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(exit);

    // `read_until` keeps partial data in the buffer when a select branch
    // loses, so the buffers must outlive each iteration.
    let mut out_line = Vec::new();
    let mut err_line = Vec::new();
    let mut out_open = true;
    let mut err_open = true;
    let mut exit_code = None;

    let code = loop {
        if let (Some(code), false, false) = (exit_code, out_open, err_open) {
            break code;
        }

        tokio::select! {
            _ = ticker.tick() => {
                status.draw(out).await.map_err(RunnerError::stream("stdout"))?;
            }
            r = child_out.read_until(b'\n', &mut out_line), if out_open => {
                let n = r.map_err(RunnerError::stream("child stdout"))?;
                if !out_line.is_empty() {
                    status.clear(out).await.map_err(RunnerError::stream("stdout"))?;
                    forward(&mut out_line, out).await.map_err(RunnerError::stream("stdout"))?;
                    status.draw(out).await.map_err(RunnerError::stream("stdout"))?;
                }
                if n == 0 {
                    tracing::debug!("child stdout closed");
                    out_open = false;
                }
            }
            r = child_err.read_until(b'\n', &mut err_line), if err_open => {
                let n = r.map_err(RunnerError::stream("child stderr"))?;
                if !err_line.is_empty() {
                    status.clear(out).await.map_err(RunnerError::stream("stdout"))?;
                    forward(&mut err_line, err).await.map_err(RunnerError::stream("stderr"))?;
                    status.draw(out).await.map_err(RunnerError::stream("stdout"))?;
                }
                if n == 0 {
                    tracing::debug!("child stderr closed");
                    err_open = false;
                }
            }
            r = &mut exit, if exit_code.is_none() => {
                let code = r.map_err(RunnerError::Wait)?;
                tracing::info!(code, "child exited");
                exit_code = Some(code);
            }
        }
    };

    if opts.total {
        status.draw(out).await.map_err(RunnerError::stream("stdout"))?;
        out.write_all(b"\n").await.map_err(RunnerError::stream("stdout"))?;
        out.flush().await.map_err(RunnerError::stream("stdout"))?;
    } else {
        status.clear(out).await.map_err(RunnerError::stream("stdout"))?;
    }

    Ok(code)
}

async fn forward<W>(line: &mut Vec<u8>, w: &mut W) -> io::Result<()>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    if !line.ends_with(b"\n") {
        line.push(b'\n');
    }
    w.write_all(line).await?;
    w.flush().await?;
    line.clear();
    Ok(())
}
