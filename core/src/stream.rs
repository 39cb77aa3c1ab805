use std::fmt;
use std::io;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

use tokio::io::AsyncWrite;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdStream {
    Stdout,
    Stderr,
}

impl StdStream {
    pub fn name(self) -> &'static str {
        match self {
            StdStream::Stdout => "stdout",
            StdStream::Stderr => "stderr",
        }
    }
}

impl fmt::Display for StdStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Live check, never cached: the answer follows redirections made by the
/// parent at spawn time.
pub fn is_terminal(stream: StdStream) -> bool {
    match stream {
        StdStream::Stdout => atty::is(atty::Stream::Stdout),
        StdStream::Stderr => atty::is(atty::Stream::Stderr),
    }
}

enum Handle {
    Stdout(tokio::io::Stdout),
    Stderr(tokio::io::Stderr),
}

/// Writer over one of the process's standard streams whose `shutdown`
/// releases the descriptor itself, so the peer reading the pipe sees EOF
/// while the process keeps running.
pub struct StdStreamWriter {
    stream: StdStream,
    handle: Option<Handle>,
}

impl StdStreamWriter {
    pub fn new(stream: StdStream) -> Self {
        let handle = match stream {
            StdStream::Stdout => Handle::Stdout(tokio::io::stdout()),
            StdStream::Stderr => Handle::Stderr(tokio::io::stderr()),
        };
        Self {
            stream,
            handle: Some(handle),
        }
    }

    pub fn stdout() -> Self {
        Self::new(StdStream::Stdout)
    }

    pub fn stderr() -> Self {
        Self::new(StdStream::Stderr)
    }

    pub fn stream(&self) -> StdStream {
        self.stream
    }

    pub fn is_closed(&self) -> bool {
        self.handle.is_none()
    }
}

fn closed_error(stream: StdStream) -> io::Error {
    io::Error::new(
        io::ErrorKind::BrokenPipe,
        format!("{stream} has been closed"),
    )
}

impl fmt::Debug for StdStreamWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdStreamWriter")
            .field("stream", &self.stream)
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl AsyncWrite for StdStreamWriter {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let stream = self.stream;
        match self.handle.as_mut() {
            Some(Handle::Stdout(h)) => Pin::new(h).poll_write(cx, buf),
            Some(Handle::Stderr(h)) => Pin::new(h).poll_write(cx, buf),
            None => Poll::Ready(Err(closed_error(stream))),
        }
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        let stream = self.stream;
        match self.handle.as_mut() {
            Some(Handle::Stdout(h)) => Pin::new(h).poll_flush(cx),
            Some(Handle::Stderr(h)) => Pin::new(h).poll_flush(cx),
            None => Poll::Ready(Err(closed_error(stream))),
        }
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.handle.as_mut() {
            Some(Handle::Stdout(h)) => ready!(Pin::new(h).poll_flush(cx))?,
            Some(Handle::Stderr(h)) => ready!(Pin::new(h).poll_flush(cx))?,
            None => return Poll::Ready(Ok(())),
        }
        // Nothing is in flight after the flush, so the tokio handle can go.
        self.handle = None;
        Poll::Ready(release(self.stream))
    }
}

#[cfg(unix)]
fn release(stream: StdStream) -> io::Result<()> {
    use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};

    let fd = match stream {
        StdStream::Stdout => io::stdout().as_raw_fd(),
        StdStream::Stderr => io::stderr().as_raw_fd(),
    };
    // SAFETY: the writer was the only user of this descriptor and drops its
    // handle before this point; nothing writes to it afterwards.
    drop(unsafe { OwnedFd::from_raw_fd(fd) });
    tracing::debug!(%stream, fd, "released standard stream");
    Ok(())
}

#[cfg(windows)]
fn release(stream: StdStream) -> io::Result<()> {
    use std::os::windows::io::{AsRawHandle, FromRawHandle, OwnedHandle};

    let handle = match stream {
        StdStream::Stdout => io::stdout().as_raw_handle(),
        StdStream::Stderr => io::stderr().as_raw_handle(),
    };
    if handle.is_null() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{stream} has no handle"),
        ));
    }
    // SAFETY: see the unix variant.
    drop(unsafe { OwnedHandle::from_raw_handle(handle) });
    tracing::debug!(%stream, "released standard stream");
    Ok(())
}
