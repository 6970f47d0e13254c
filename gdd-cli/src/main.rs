//! GDD CLI - fetch growing degree day data and render planting-date charts.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "gdd-cli",
    version,
    about = "Growing Degree Day accumulation toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: gdd_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    gdd_cmd::run(cli.command).await
}
