//! Snapshot wire model for the dominoes server.
//!
//! The server answers every successful request with the complete view of one
//! game as seen by the requesting player. Snapshots replace the previous view
//! wholesale; nothing is merged field by field, and the client never computes
//! game state on its own.

use serde::{Deserialize, Serialize};

use crate::tile::Tile;

/// One history line: who acted and what happened.
///
/// Arrives on the wire as a two-element array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry(
    /// Actor column.
    pub String,
    /// Event description column.
    pub String,
);

impl HistoryEntry {
    /// The actor column of the entry.
    pub fn actor(&self) -> &str {
        &self.0
    }

    /// The event description column of the entry.
    pub fn description(&self) -> &str {
        &self.1
    }

    /// Formats the entry the way the history region shows it.
    pub fn line(&self) -> String {
        format!("{}: {}", self.0, self.1)
    }
}

/// Public facts about one seated player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    /// Player number, stable for the life of the game.
    pub number: usize,
    /// Display name.
    pub name: String,
    /// Tile count; all the client ever learns about another player's hand.
    #[serde(rename = "dominoes")]
    pub tile_count: usize,
}

/// Complete game view delivered by the server.
///
/// Hidden information never reaches this struct. `your_tiles` is always the
/// viewer's own hand; other hands exist only as counts in [`PlayerSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Identifier of the game this snapshot belongs to, once assigned.
    #[serde(default)]
    pub game_id: Option<String>,
    /// Opaque version token; equal tokens mean an identical view.
    pub last_update: String,
    /// Append-only event log, oldest first.
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    /// The played chain from the left open end to the right open end.
    #[serde(rename = "played_dominoes", default)]
    pub board: Vec<Tile>,
    /// Tiles still face down in the stock.
    #[serde(rename = "remaining_dominoes", default)]
    pub stock_count: u32,
    /// Everyone at the table, unique by `number`.
    #[serde(default)]
    pub players: Vec<PlayerSummary>,
    /// The viewer's hand.
    #[serde(rename = "your_dominoes", default)]
    pub your_tiles: Vec<Tile>,
    /// The viewer's own player number.
    #[serde(rename = "player_number")]
    pub viewer_number: usize,
    /// Whose turn it is; absent before the game starts.
    #[serde(default)]
    pub next_player_number: Option<usize>,
    /// Whether the viewer may draw from the stock. Meaningful only on the
    /// viewer's turn.
    #[serde(default)]
    pub can_pick_up: bool,
    /// Whether the game has been started.
    #[serde(rename = "is_started", default)]
    pub started: bool,
    /// Player number of the winner, if the game is over.
    #[serde(default)]
    pub winner: Option<usize>,
    /// Server-composed description of how the game ended.
    #[serde(default)]
    pub winner_message: Option<String>,
    /// Tile the viewer just drew; present only in pick-up responses.
    #[serde(rename = "highlight_domino", default)]
    pub highlight_tile: Option<Tile>,
}

impl GameSnapshot {
    /// True when it is the viewer's turn to act.
    pub fn is_viewer_turn(&self) -> bool {
        self.next_player_number == Some(self.viewer_number)
    }

    /// Looks up a player by number.
    pub fn player(&self, number: usize) -> Option<&PlayerSummary> {
        self.players.iter().find(|player| player.number == number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIRE_SNAPSHOT: &str = r#"{
        "game_id": "g-7",
        "last_update": "2026-02-11 09:15:02.114511",
        "history": [["Game", "Game starts"], ["Alice", "played domino [3|4]"]],
        "played_dominoes": [{"l": 3, "r": 4}, {"l": 4, "r": 4}],
        "remaining_dominoes": 14,
        "players": [
            {"number": 0, "name": "Alice", "dominoes": 6},
            {"number": 1, "name": "Bob", "dominoes": 7}
        ],
        "your_dominoes": [{"l": 1, "r": 2}],
        "player_number": 0,
        "next_player_number": 1,
        "can_pick_up": false,
        "is_started": true,
        "winner": null,
        "winner_message": null
    }"#;

    #[test]
    fn test_decodes_wire_field_names() {
        let snapshot: GameSnapshot =
            serde_json::from_str(WIRE_SNAPSHOT).expect("snapshot decodes");
        assert_eq!(snapshot.game_id.as_deref(), Some("g-7"));
        assert_eq!(snapshot.board, vec![Tile::new(3, 4), Tile::new(4, 4)]);
        assert_eq!(snapshot.stock_count, 14);
        assert_eq!(snapshot.your_tiles, vec![Tile::new(1, 2)]);
        assert_eq!(snapshot.viewer_number, 0);
        assert_eq!(snapshot.next_player_number, Some(1));
        assert!(snapshot.started);
        assert!(!snapshot.can_pick_up);
        assert_eq!(snapshot.winner, None);
        assert_eq!(snapshot.highlight_tile, None);
    }

    #[test]
    fn test_history_entries_decode_as_pairs() {
        let snapshot: GameSnapshot =
            serde_json::from_str(WIRE_SNAPSHOT).expect("snapshot decodes");
        assert_eq!(snapshot.history.len(), 2);
        assert_eq!(snapshot.history[1].actor(), "Alice");
        assert_eq!(snapshot.history[1].description(), "played domino [3|4]");
        assert_eq!(snapshot.history[0].line(), "Game: Game starts");
    }

    #[test]
    fn test_optional_fields_default() {
        let minimal = r#"{"last_update": "v1", "player_number": 2}"#;
        let snapshot: GameSnapshot =
            serde_json::from_str(minimal).expect("minimal snapshot decodes");
        assert_eq!(snapshot.game_id, None);
        assert!(snapshot.board.is_empty());
        assert!(snapshot.players.is_empty());
        assert!(!snapshot.started);
        assert_eq!(snapshot.next_player_number, None);
    }

    #[test]
    fn test_pick_up_response_carries_highlight() {
        let body = r#"{
            "last_update": "v9",
            "player_number": 1,
            "your_dominoes": [{"l": 2, "r": 2}, {"l": 0, "r": 5}],
            "highlight_domino": {"l": 0, "r": 5}
        }"#;
        let snapshot: GameSnapshot = serde_json::from_str(body).expect("decodes");
        assert_eq!(snapshot.highlight_tile, Some(Tile::new(0, 5)));
    }

    #[test]
    fn test_viewer_turn_helper() {
        let mut snapshot: GameSnapshot =
            serde_json::from_str(WIRE_SNAPSHOT).expect("snapshot decodes");
        assert!(!snapshot.is_viewer_turn());
        snapshot.next_player_number = Some(0);
        assert!(snapshot.is_viewer_turn());
        assert_eq!(snapshot.player(1).map(|p| p.name.as_str()), Some("Bob"));
    }
}
