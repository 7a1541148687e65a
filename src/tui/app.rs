//! Application state and gesture handling.
//!
//! [`App`] glues the pieces together: the session, the rendered page, the
//! drag controller, and the action pipeline. Input handlers translate
//! terminal events into player actions; [`App::handle_reply`] routes settled
//! actions back into the renderer or onto the alert surface.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::client::{ActionClient, ActionOutcome};
use crate::drag::{DragController, DragPayload, DropZone};
use crate::pipeline::{ActionPipeline, ActionReply, PlayerAction};
use crate::render::{RenderOutcome, render};
use crate::session::Session;
use crate::view::{ActionControl, BigMessage, PageView};

use super::draw::HitMap;

/// Top-level client state.
pub struct App {
    session: Session,
    page: PageView,
    drag: DragController,
    pipeline: ActionPipeline,
    alert: Option<String>,
    hover_zone: Option<DropZone>,
}

impl App {
    /// Creates the app and the reply channel its pipeline reports on.
    pub fn new(
        server_url: &str,
        game_id: Option<String>,
    ) -> (Self, mpsc::UnboundedReceiver<ActionReply>) {
        let (pipeline, reply_rx) = ActionPipeline::new(ActionClient::new(server_url));
        let app = Self {
            session: Session::new(game_id),
            page: PageView::default(),
            drag: DragController::new(),
            pipeline,
            alert: None,
            hover_zone: None,
        };
        (app, reply_rx)
    }

    /// The rendered page the front end draws from.
    pub fn page(&self) -> &PageView {
        &self.page
    }

    /// Session as of the last applied snapshot.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Message for the alert surface, when one is open.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// True while an action is awaiting its response.
    pub fn is_waiting(&self) -> bool {
        self.pipeline.is_busy()
    }

    /// True while a drag gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Payload of the tile currently being carried, if any.
    pub fn carried(&self) -> Option<&DragPayload> {
        self.drag.payload()
    }

    /// Drop zone currently under the carried tile, if any.
    pub fn hover_zone(&self) -> Option<DropZone> {
        self.hover_zone
    }

    /// Issues the initial, non-blocking state fetch.
    pub fn request_initial_state(&mut self) {
        self.dispatch(PlayerAction::FetchState);
    }

    /// Routes a settled action back into the view.
    ///
    /// Exactly one thing happens per reply: a render for a fresh snapshot, a
    /// verbatim rejection alert, or a generic failure alert. Transport and
    /// payload errors only log; the page and session stay as they were.
    #[instrument(skip(self, reply))]
    pub fn handle_reply(&mut self, reply: ActionReply) {
        self.pipeline.settle();
        match reply {
            Ok(ActionOutcome::Applied(snapshot)) => {
                match render(&mut self.page, &mut self.session, &snapshot) {
                    RenderOutcome::Applied => debug!("Snapshot applied"),
                    RenderOutcome::Skipped => debug!("Snapshot unchanged"),
                }
            }
            Ok(ActionOutcome::Rejected(reason)) => {
                info!(reason = %reason, "Move rejected by server");
                self.alert = Some(reason);
            }
            Ok(ActionOutcome::Failed(status)) => {
                warn!(%status, "Unexpected server status");
                self.alert = Some(format!(
                    "Unexpected error from server: {}",
                    status.as_u16()
                ));
            }
            Err(err) => {
                warn!(error = %err, "Action did not complete");
            }
        }
    }

    /// Handles a key event. Returns `true` when the player quits.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // An open alert swallows the key that dismisses it.
        if self.alert.take().is_some() {
            return false;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            KeyCode::Esc => self.cancel_drag(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.dispatch(PlayerAction::FetchState),
            KeyCode::Char('s') | KeyCode::Char('S') => {
                if matches!(
                    self.page.big_message(),
                    Some(BigMessage::Waiting { can_start: true })
                ) {
                    self.dispatch(PlayerAction::StartGame);
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                if matches!(self.page.big_message(), Some(BigMessage::GameOver { .. })) {
                    self.dispatch(PlayerAction::JoinNewGame);
                }
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                if let Some(control) = self.viewer_control() {
                    let action = match control {
                        ActionControl::PickUp => PlayerAction::PickUp,
                        ActionControl::Pass => PlayerAction::Pass,
                    };
                    self.dispatch(action);
                }
            }
            _ => {}
        }
        false
    }

    /// Handles a mouse event against the hit map of the last drawn frame.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, hits: &HitMap) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.alert.take().is_some() {
                    return;
                }
                // Gestures are suspended while an action is in flight.
                if self.is_waiting() {
                    return;
                }
                if let Some(tile) = hits.tile_at(mouse.column, mouse.row) {
                    self.drag.begin(tile);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.hover_zone = hits
                    .zone_at(mouse.column, mouse.row)
                    .filter(|zone| self.drag.drag_over(*zone));
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let zone = hits.zone_at(mouse.column, mouse.row);
                self.hover_zone = None;
                match zone {
                    Some(zone) => {
                        if let Some(intent) = self.drag.drop_on(zone) {
                            self.dispatch(PlayerAction::SubmitMove {
                                is_left_end: intent.is_left_end,
                                left: intent.left,
                                right: intent.right,
                            });
                        }
                    }
                    None => self.drag.cancel(),
                }
            }
            _ => {}
        }
    }

    fn cancel_drag(&mut self) {
        self.hover_zone = None;
        self.drag.cancel();
    }

    /// The control rendered for the viewer, if any.
    fn viewer_control(&self) -> Option<ActionControl> {
        self.page
            .panels()
            .iter()
            .flatten()
            .find(|panel| *panel.is_viewer())
            .and_then(|panel| *panel.control())
    }

    /// Sends a gesture down the single-slot pipeline.
    #[instrument(skip(self))]
    fn dispatch(&mut self, action: PlayerAction) {
        if self.drag.is_dragging() && !matches!(action, PlayerAction::SubmitMove { .. }) {
            self.cancel_drag();
        }
        let game_id = self.session.game_id().clone();
        if !self.pipeline.try_dispatch(action, game_id) {
            debug!("Gesture ignored; an action is already in flight");
        }
    }
}
