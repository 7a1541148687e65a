//! Client-side session state.
//!
//! The only data that outlives a snapshot: which game this client is in and
//! the version token of the last view it applied. The renderer is the sole
//! writer, via [`Session::absorb`], and only after a snapshot has actually
//! been rendered. Failed or rejected actions never touch the session.

use derive_getters::Getters;
use tracing::{debug, instrument};

use crate::snapshot::GameSnapshot;

/// Game identifier plus last-applied version token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct Session {
    /// Current game, if any.
    game_id: Option<String>,
    /// Version token of the last snapshot applied to the view.
    version_token: Option<String>,
}

impl Session {
    /// Creates a session from the entry-point game identifier, if one was
    /// given on the command line.
    #[instrument]
    pub fn new(game_id: Option<String>) -> Self {
        debug!(?game_id, "Initializing session");
        Self {
            game_id,
            version_token: None,
        }
    }

    /// True when `token` matches the last applied version token.
    pub fn is_current(&self, token: &str) -> bool {
        self.version_token.as_deref() == Some(token)
    }

    /// Records a successfully rendered snapshot.
    ///
    /// Adopts the snapshot's game id when it carries one, which is how the
    /// client learns the id assigned by a join, and stores the snapshot's
    /// version token for the skip check on the next render.
    #[instrument(skip(self, snapshot))]
    pub fn absorb(&mut self, snapshot: &GameSnapshot) {
        if let Some(id) = &snapshot.game_id {
            if self.game_id.as_deref() != Some(id) {
                debug!(game_id = %id, "Adopting game id from snapshot");
            }
            self.game_id = Some(id.clone());
        }
        self.version_token = Some(snapshot.last_update.clone());
    }
}
