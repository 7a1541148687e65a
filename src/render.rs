//! Renderer: projects a snapshot onto the view tree.
//!
//! [`render`] is a pure function of the snapshot. Identical snapshots
//! produce identical pages, and a snapshot whose version token matches the
//! session's is skipped without touching anything. Every region is rebuilt
//! wholesale; there is no diffing, so a render can never be half-applied.

use tracing::{debug, instrument, warn};

use crate::session::Session;
use crate::snapshot::GameSnapshot;
use crate::view::{
    ActionControl, BigMessage, PANEL_SLOTS, PageView, PanelHighlight, PlayerPanel, TileRegion,
    TileView,
};

/// Whether a render call changed the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The snapshot was applied and the session advanced to its token.
    Applied,
    /// The version token matched; nothing was touched.
    Skipped,
}

/// Applies `snapshot` to `page`, updating `session` on success.
///
/// This is the only writer of [`Session`]: the game id is adopted from the
/// snapshot and the version token recorded once the page has been rebuilt.
#[instrument(skip(page, session, snapshot), fields(token = %snapshot.last_update))]
pub fn render(
    page: &mut PageView,
    session: &mut Session,
    snapshot: &GameSnapshot,
) -> RenderOutcome {
    if session.is_current(&snapshot.last_update) {
        debug!("Version token unchanged; skipping render");
        return RenderOutcome::Skipped;
    }

    page.history = render_history(snapshot);
    page.board = render_board(snapshot);
    page.stock_line = stock_line(snapshot.stock_count);
    page.big_message = render_big_message(snapshot);
    page.panels = render_panels(snapshot);

    session.absorb(snapshot);
    debug!(
        players = snapshot.players.len(),
        board = snapshot.board.len(),
        "Render applied"
    );
    RenderOutcome::Applied
}

/// One line per history entry, oldest first.
fn render_history(snapshot: &GameSnapshot) -> Vec<String> {
    snapshot.history.iter().map(|entry| entry.line()).collect()
}

/// The played chain. Doubles rotate here and only here.
fn render_board(snapshot: &GameSnapshot) -> Vec<TileView> {
    snapshot
        .board
        .iter()
        .enumerate()
        .map(|(index, &tile)| TileView::new(TileRegion::Board, index, tile, false, false))
        .collect()
}

/// Stock counter with its fixed label.
fn stock_line(count: u32) -> String {
    format!("Dominoes in stack: {count}")
}

/// Start and game-over banner.
///
/// Precedence: an unstarted game shows the waiting panel even if a winner
/// message is somehow present; then the game-over panel; then nothing.
fn render_big_message(snapshot: &GameSnapshot) -> Option<BigMessage> {
    if !snapshot.started {
        return Some(BigMessage::Waiting {
            can_start: snapshot.players.len() > 1,
        });
    }
    snapshot.winner_message.as_ref().map(|message| {
        let viewer_won = snapshot.winner == Some(snapshot.viewer_number);
        let text = if viewer_won {
            format!("WINNER! {message}")
        } else {
            message.clone()
        };
        BigMessage::GameOver { text, viewer_won }
    })
}

/// Fills one panel slot per player and clears the rest.
fn render_panels(snapshot: &GameSnapshot) -> [Option<PlayerPanel>; PANEL_SLOTS] {
    let mut panels: [Option<PlayerPanel>; PANEL_SLOTS] = [None, None, None, None];
    for player in &snapshot.players {
        let Some(slot) = panels.get_mut(player.number) else {
            warn!(number = player.number, "Player number beyond panel slots");
            continue;
        };
        let on_turn = snapshot.next_player_number == Some(player.number);
        let highlight = if snapshot.winner == Some(player.number) {
            PanelHighlight::Winner
        } else if on_turn && snapshot.winner.is_none() {
            PanelHighlight::Turn
        } else {
            PanelHighlight::Neutral
        };
        *slot = Some(if player.number == snapshot.viewer_number {
            viewer_panel(snapshot, &player.name, on_turn, highlight)
        } else {
            PlayerPanel::opponent(player.number, &player.name, player.tile_count, on_turn, highlight)
        });
    }
    panels
}

/// The viewer's panel: interactive hand plus at most one control.
///
/// Hand tiles are draggable exactly when it is the viewer's turn, and the
/// control is `Pick Up` when the server allows drawing, `Pass` otherwise.
fn viewer_panel(
    snapshot: &GameSnapshot,
    name: &str,
    on_turn: bool,
    highlight: PanelHighlight,
) -> PlayerPanel {
    let hand = snapshot
        .your_tiles
        .iter()
        .enumerate()
        .map(|(index, &tile)| {
            let highlighted = snapshot.highlight_tile == Some(tile);
            TileView::new(TileRegion::Hand, index, tile, on_turn, highlighted)
        })
        .collect();
    let control = on_turn.then(|| {
        if snapshot.can_pick_up {
            ActionControl::PickUp
        } else {
            ActionControl::Pass
        }
    });
    PlayerPanel::viewer(snapshot.viewer_number, name, hand, control, highlight)
}
