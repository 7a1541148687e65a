//! Action client: encodes player intents as requests and routes responses.
//!
//! One request per player gesture, no retries, no optimistic updates. The
//! server is the only judge of legality, so a move submission carries exactly
//! what the gesture produced: the dragged tile's raw pip values and the
//! chosen board end.

use reqwest::StatusCode;
use tracing::{debug, instrument, warn};

use crate::error::ClientError;
use crate::snapshot::GameSnapshot;

/// How a completed request was classified.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// Success. Carries the fresh snapshot for the renderer.
    Applied(GameSnapshot),
    /// Domain rejection. Carries the server's reason, verbatim, for the
    /// player.
    Rejected(String),
    /// Any other status. Surfaced generically; the view is left alone.
    Failed(StatusCode),
}

/// HTTP client for the dominoes server.
#[derive(Debug, Clone)]
pub struct ActionClient {
    base_url: String,
    http: reqwest::Client,
}

impl ActionClient {
    /// Creates a client for the server at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Fetches the current game view.
    ///
    /// The read counterpart of the action posts: same outcome routing, no
    /// side effects on the server.
    #[instrument(skip(self))]
    pub async fn fetch_state(
        &self,
        game_id: Option<&str>,
    ) -> Result<ActionOutcome, ClientError> {
        let mut request = self.http.get(format!("{}/view", self.base_url));
        if let Some(id) = game_id {
            request = request.query(&[("game_id", id)]);
        }
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(%status, len = body.len(), "View response");
        route_response(status, &body)
    }

    /// Submits a move: play the dragged tile against the chosen board end.
    #[instrument(skip(self))]
    pub async fn submit_move(
        &self,
        game_id: Option<&str>,
        is_left_end: bool,
        left: u8,
        right: u8,
    ) -> Result<ActionOutcome, ClientError> {
        self.post("submit-move", move_form(game_id, is_left_end, left, right))
            .await
    }

    /// Draws one tile from the stock.
    #[instrument(skip(self))]
    pub async fn submit_pick_up(
        &self,
        game_id: Option<&str>,
    ) -> Result<ActionOutcome, ClientError> {
        self.post("pick-up", action_form(game_id)).await
    }

    /// Passes the turn.
    #[instrument(skip(self))]
    pub async fn submit_pass(
        &self,
        game_id: Option<&str>,
    ) -> Result<ActionOutcome, ClientError> {
        self.post("pass", action_form(game_id)).await
    }

    /// Starts the game once enough players have joined.
    #[instrument(skip(self))]
    pub async fn submit_start_game(
        &self,
        game_id: Option<&str>,
    ) -> Result<ActionOutcome, ClientError> {
        self.post("start-game", action_form(game_id)).await
    }

    /// Joins any open game. Deliberately carries no game id: the server
    /// assigns one and the snapshot that comes back announces it.
    #[instrument(skip(self))]
    pub async fn join_new_game(&self) -> Result<ActionOutcome, ClientError> {
        self.post("join-any-game", Vec::new()).await
    }

    async fn post(
        &self,
        path: &str,
        form: Vec<(&'static str, String)>,
    ) -> Result<ActionOutcome, ClientError> {
        let response = self
            .http
            .post(format!("{}/{}", self.base_url, path))
            .form(&form)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(path, %status, len = body.len(), "Action response");
        if status != StatusCode::OK && status != StatusCode::NOT_ACCEPTABLE {
            warn!(path, %status, "Unexpected server status");
        }
        route_response(status, &body)
    }
}

/// Form fields shared by every game-scoped action.
fn action_form(game_id: Option<&str>) -> Vec<(&'static str, String)> {
    match game_id {
        Some(id) => vec![("game_id", id.to_string())],
        None => Vec::new(),
    }
}

/// Form fields for a move submission.
///
/// `is_left` serializes as the strings `"true"` and `"false"`, matching what
/// the server parses.
fn move_form(
    game_id: Option<&str>,
    is_left_end: bool,
    left: u8,
    right: u8,
) -> Vec<(&'static str, String)> {
    let mut form = vec![
        ("domino_left", left.to_string()),
        ("domino_right", right.to_string()),
        ("is_left", is_left_end.to_string()),
    ];
    form.extend(action_form(game_id));
    form
}

/// Maps a response to its outcome.
///
/// `200` must parse as a snapshot. `406` is a domain rejection whose body is
/// the player-facing reason. Everything else is an unexpected failure and
/// never touches the view.
fn route_response(status: StatusCode, body: &str) -> Result<ActionOutcome, ClientError> {
    match status {
        StatusCode::OK => {
            let snapshot = serde_json::from_str::<GameSnapshot>(body)?;
            Ok(ActionOutcome::Applied(snapshot))
        }
        StatusCode::NOT_ACCEPTABLE => Ok(ActionOutcome::Rejected(body.to_string())),
        other => Ok(ActionOutcome::Failed(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;

    fn snapshot_body() -> String {
        serde_json::json!({
            "game_id": "g-1",
            "last_update": "v1",
            "history": [["Game", "Game starts"]],
            "played_dominoes": [],
            "remaining_dominoes": 14,
            "players": [{"number": 0, "name": "Alice", "dominoes": 7}],
            "your_dominoes": [],
            "player_number": 0,
            "next_player_number": null,
            "can_pick_up": false,
            "is_started": false,
            "winner": null,
            "winner_message": null
        })
        .to_string()
    }

    #[test]
    fn test_route_ok_parses_snapshot() {
        let outcome =
            route_response(StatusCode::OK, &snapshot_body()).expect("routable");
        match outcome {
            ActionOutcome::Applied(snapshot) => {
                assert_eq!(snapshot.game_id.as_deref(), Some("g-1"));
                assert_eq!(snapshot.stock_count, 14);
            }
            other => panic!("expected Applied, got {other:?}"),
        }
    }

    #[test]
    fn test_route_not_acceptable_keeps_body_verbatim() {
        let outcome = route_response(
            StatusCode::NOT_ACCEPTABLE,
            "Domino [2|5] does not match left end 3\n",
        )
        .expect("routable");
        assert_eq!(
            outcome,
            ActionOutcome::Rejected("Domino [2|5] does not match left end 3\n".to_string())
        );
    }

    #[test]
    fn test_route_other_statuses_fail_generically() {
        for code in [400, 404, 500, 503] {
            let status = StatusCode::from_u16(code).expect("valid status");
            let outcome = route_response(status, "whatever").expect("routable");
            assert_eq!(outcome, ActionOutcome::Failed(status));
        }
    }

    #[test]
    fn test_route_ok_with_bad_body_is_payload_error() {
        let err = route_response(StatusCode::OK, "<html>not json</html>")
            .expect_err("unreadable body");
        assert!(matches!(err, ClientError::Payload { .. }));
    }

    #[test]
    fn test_action_form_includes_game_id_only_when_set() {
        assert_eq!(action_form(None), Vec::<(&str, String)>::new());
        assert_eq!(
            action_form(Some("g-3")),
            vec![("game_id", "g-3".to_string())]
        );
    }

    #[test]
    fn test_move_form_field_order_and_values() {
        let form = move_form(Some("g-3"), true, 2, 5);
        assert_eq!(
            form,
            vec![
                ("domino_left", "2".to_string()),
                ("domino_right", "5".to_string()),
                ("is_left", "true".to_string()),
                ("game_id", "g-3".to_string()),
            ]
        );
    }

    #[test]
    fn test_move_form_right_end_is_false() {
        let form = move_form(None, false, 6, 6);
        assert_eq!(
            form,
            vec![
                ("domino_left", "6".to_string()),
                ("domino_right", "6".to_string()),
                ("is_left", "false".to_string()),
            ]
        );
    }
}
