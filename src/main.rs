//! Terminal client binary for the dominoes server.

use anyhow::Result;
use clap::Parser;

use dominoes_tui::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    dominoes_tui::tui::run(cli).await
}
