//! Single-slot action pipeline.
//!
//! The conversation with the server is strictly half-duplex: one outstanding
//! request, then its response, then the next gesture. Dispatch refuses while
//! the slot is occupied instead of queueing, so a stale gesture can never
//! fire against a view it was not made on. Requests run on spawned tasks and
//! report back over a channel, which keeps the terminal drawing while a
//! request is out; only gestures are suspended.

use tokio::sync::mpsc;
use tracing::{debug, instrument, warn};

use crate::client::{ActionClient, ActionOutcome};
use crate::error::ClientError;

/// A player intent ready to be encoded and sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    /// Read the current view. Used for the initial load and manual refresh.
    FetchState,
    /// Play a tile against one board end.
    SubmitMove {
        /// True for the left end of the chain, false for the right.
        is_left_end: bool,
        /// Left pip value exactly as the dragged tile recorded it.
        left: u8,
        /// Right pip value exactly as the dragged tile recorded it.
        right: u8,
    },
    /// Draw a tile from the stock.
    PickUp,
    /// Pass the turn.
    Pass,
    /// Start the game.
    StartGame,
    /// Leave for a fresh game. Sends no game id.
    JoinNewGame,
}

impl PlayerAction {
    /// Short label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::FetchState => "fetch-state",
            Self::SubmitMove { .. } => "submit-move",
            Self::PickUp => "pick-up",
            Self::Pass => "pass",
            Self::StartGame => "start-game",
            Self::JoinNewGame => "join-new-game",
        }
    }
}

/// Result of one settled action, delivered back to the event loop.
pub type ActionReply = Result<ActionOutcome, ClientError>;

/// Owns the in-flight slot and the sending half of the reply channel.
#[derive(Debug)]
pub struct ActionPipeline {
    client: ActionClient,
    reply_tx: mpsc::UnboundedSender<ActionReply>,
    in_flight: Option<&'static str>,
}

impl ActionPipeline {
    /// Creates a pipeline and the receiving half of its reply channel.
    pub fn new(client: ActionClient) -> (Self, mpsc::UnboundedReceiver<ActionReply>) {
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        let pipeline = Self {
            client,
            reply_tx,
            in_flight: None,
        };
        (pipeline, reply_rx)
    }

    /// True while an action is awaiting its response.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Dispatches `action`, or refuses it when the slot is occupied.
    ///
    /// Returns whether the action was accepted. `game_id` rides along on
    /// every request except [`PlayerAction::JoinNewGame`], which must let the
    /// server assign a new one.
    #[instrument(skip(self))]
    pub fn try_dispatch(&mut self, action: PlayerAction, game_id: Option<String>) -> bool {
        if let Some(pending) = self.in_flight {
            warn!(pending, refused = action.label(), "Action already in flight");
            return false;
        }
        self.in_flight = Some(action.label());
        debug!(action = action.label(), ?game_id, "Dispatching action");

        let client = self.client.clone();
        let reply_tx = self.reply_tx.clone();
        tokio::spawn(async move {
            let id = game_id.as_deref();
            let reply = match action {
                PlayerAction::FetchState => client.fetch_state(id).await,
                PlayerAction::SubmitMove {
                    is_left_end,
                    left,
                    right,
                } => client.submit_move(id, is_left_end, left, right).await,
                PlayerAction::PickUp => client.submit_pick_up(id).await,
                PlayerAction::Pass => client.submit_pass(id).await,
                PlayerAction::StartGame => client.submit_start_game(id).await,
                PlayerAction::JoinNewGame => client.join_new_game().await,
            };
            // The receiver only disappears during shutdown.
            let _ = reply_tx.send(reply);
        });
        true
    }

    /// Frees the slot. Call exactly once per received reply.
    pub fn settle(&mut self) {
        self.in_flight = None;
    }
}
