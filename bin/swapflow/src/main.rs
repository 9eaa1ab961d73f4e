//! swapflow binary.

mod cli;
mod simulate;

use clap::Parser;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let cli = cli::Cli::parse();
    swapflow_observability::init_logging(&cli.logs)?;

    match cli.command {
        cli::Commands::Simulate(args) => simulate::run(args).await,
    }
}
