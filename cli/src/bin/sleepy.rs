use stdio_fixtures::app;
use stdio_fixtures_core::fixture::sleepy;
use stdio_fixtures_core::{is_terminal, StdStream, StdStreamWriter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    app::run("sleepy", |pacer| async move {
        let mut stdout = StdStreamWriter::stdout();
        sleepy::run(&mut stdout, || is_terminal(StdStream::Stdout), &pacer).await
    })
    .await
}
