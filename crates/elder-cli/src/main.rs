use std::process::ExitCode;

use clap::Parser as _;
use color_eyre::eyre;
use elder_cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = run().await {
        eprintln!("{err:?}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn run() -> eyre::Result<()> {
    color_eyre::install()?;
    elder_cli::run(Cli::parse()).await
}
