use std::io;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::time::Instant;

use super::format::Format;

const CLEAR_LINE: &str = "\r\x1b[K";
const CLEAR_LINE_ABOVE: &str = "\x1b[A\x1b[K";

/// The elapsed-time text drawn after the last relayed line. It is erased
/// before anything else is written so output never interleaves with it.
#[derive(Debug)]
pub(crate) struct StatusLine {
    format: Format,
    start: Instant,
    shown: bool,
}

impl StatusLine {
    pub(crate) fn new(format: Format, start: Instant) -> Self {
        Self {
            format,
            start,
            shown: false,
        }
    }

    pub(crate) async fn clear<W>(&mut self, w: &mut W) -> io::Result<()>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        if !self.shown {
            return Ok(());
        }
        let mut seq = String::from(CLEAR_LINE);
        for _ in 0..self.format.newlines() {
            seq.push_str(CLEAR_LINE_ABOVE);
        }
        w.write_all(seq.as_bytes()).await?;
        w.flush().await?;
        self.shown = false;
        Ok(())
    }

    pub(crate) async fn draw<W>(&mut self, w: &mut W) -> io::Result<()>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        self.clear(w).await?;
        let text = self.format.render(self.start.elapsed());
        w.write_all(text.as_bytes()).await?;
        w.flush().await?;
        self.shown = true;
        Ok(())
    }
}
