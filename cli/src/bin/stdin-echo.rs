use stdio_fixtures::app;
use stdio_fixtures_core::fixture::stdin_echo;
use stdio_fixtures_core::StdStreamWriter;
use tokio::io::BufReader;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    app::run("stdin-echo", |pacer| async move {
        let input = BufReader::new(tokio::io::stdin());
        let mut stdout = StdStreamWriter::stdout();
        stdin_echo::run(input, &mut stdout, &pacer).await.map(|_| ())
    })
    .await
}
