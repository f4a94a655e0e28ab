use clap::Parser;
use pz_reviews::logging::init_logging;
use tracing::Level;

mod cli;

use cli::{handle_command, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(if cli.verbose { Level::DEBUG } else { Level::INFO });
    handle_command(cli.command).await
}
