use stdio_fixtures::app;
use stdio_fixtures_core::fixture::closer;
use stdio_fixtures_core::StdStreamWriter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    app::run("closer", |pacer| async move {
        let mut stdout = StdStreamWriter::stdout();
        let mut stderr = StdStreamWriter::stderr();
        closer::run(&mut stdout, &mut stderr, &pacer).await
    })
    .await
}
