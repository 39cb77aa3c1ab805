use std::process::ExitCode;

use clap::Parser;
use stdio_fixtures::app;
use stdio_fixtures::elapsed::{self, ElapsedArgs};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = ElapsedArgs::parse();
    let (_cfg, _guard) = app::init_ambient("elapsed");
    tracing::info!(?args, "starting");
    elapsed::run(&args).await
}
