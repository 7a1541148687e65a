//! Command line interface for the dominoes client.

use clap::Parser;

/// Terminal client for a multiplayer dominoes server.
#[derive(Parser, Debug, Clone)]
#[command(name = "dominoes_tui")]
#[command(about = "Terminal client for a multiplayer dominoes server")]
#[command(version)]
pub struct Cli {
    /// Base URL of the dominoes server.
    #[arg(long, default_value = "http://localhost:8080")]
    pub server_url: String,

    /// Game to rejoin. Omit to let the server seat you in an open game.
    #[arg(long)]
    pub game_id: Option<String>,
}
