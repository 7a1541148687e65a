//! Terminal front end.
//!
//! The fixed page scaffolding the renderer attaches to, projected with
//! ratatui, plus the keyboard and mouse gesture sources. The event loop is
//! draw, drain settled replies, poll input. Replies arrive over the pipeline
//! channel between frames, so the terminal keeps drawing while a request is
//! out.

mod app;
mod draw;

pub use app::App;
pub use draw::HitMap;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::cli::Cli;
use crate::pipeline::ActionReply;

/// Runs the client until the player quits.
///
/// Sets up file logging and the terminal, kicks off the initial state fetch,
/// and drives the event loop. The terminal is restored before returning.
pub async fn run(cli: Cli) -> Result<()> {
    // Log to a file; stdout belongs to the terminal UI.
    let log_file = std::fs::File::create("dominoes_tui.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!(server_url = %cli.server_url, game_id = ?cli.game_id, "Starting dominoes client");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (mut app, mut reply_rx) = App::new(&cli.server_url, cli.game_id);
    app.request_initial_state();

    let res = run_loop(&mut terminal, &mut app, &mut reply_rx).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Event loop error");
        eprintln!("Error: {err:?}");
    }
    res
}

/// Draw, drain settled replies, poll input.
async fn run_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    reply_rx: &mut mpsc::UnboundedReceiver<ActionReply>,
) -> Result<()> {
    loop {
        let mut hits = HitMap::default();
        terminal.draw(|frame| hits = draw::draw(frame, app))?;

        while let Ok(reply) = reply_rx.try_recv() {
            app.handle_reply(reply);
        }

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                // Skip release events; Windows terminals fire both.
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if app.handle_key(key) {
                        info!("Player quit");
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse, &hits),
                _ => {}
            }
        }
    }
}
