use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Writes `line` plus a newline and flushes before returning, so the line is
/// visible to the reader before whatever delay follows.
pub async fn emit_line<W>(writer: &mut W, line: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut buf = Vec::with_capacity(line.len() + 1);
    buf.extend_from_slice(line.as_bytes());
    buf.push(b'\n');
    writer.write_all(&buf).await?;
    writer.flush().await
}
