//! Structured view tree.
//!
//! The renderer never concatenates markup. It fills these typed regions and
//! the front end projects them onto the terminal however it likes. Every
//! tile view carries a synthetic instance id plus its two pip values as
//! plain attributes, so the drag controller can read a dragged tile back
//! without consulting the snapshot it was rendered from.

use derive_getters::Getters;

use crate::tile::Tile;

/// Number of player panel slots the page provides, regardless of how many
/// players have joined.
pub const PANEL_SLOTS: usize = 4;

/// Where a tile view lives, for instance-id purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileRegion {
    /// The played chain.
    Board,
    /// The viewer's hand.
    Hand,
}

impl TileRegion {
    fn prefix(self) -> &'static str {
        match self {
            Self::Board => "board",
            Self::Hand => "hand",
        }
    }
}

/// One rendered tile.
///
/// Two physical tiles showing the same pip pair stay separately addressable:
/// the instance id is positional (`board-2`, `hand-0`), while the asset name
/// still follows the pip-based naming contract.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct TileView {
    /// Synthetic per-render identifier.
    instance: String,
    /// Asset name from the tile art contract.
    asset: String,
    /// Left pip attribute, readable by the drag controller.
    left: u8,
    /// Right pip attribute, readable by the drag controller.
    right: u8,
    /// Doubles on the board present rotated.
    rotated: bool,
    /// Hand tiles are draggable only on the viewer's turn.
    draggable: bool,
    /// Set on the tile the viewer just picked up.
    highlighted: bool,
}

impl TileView {
    /// Builds the view of `tile` at position `index` within `region`.
    pub fn new(
        region: TileRegion,
        index: usize,
        tile: Tile,
        draggable: bool,
        highlighted: bool,
    ) -> Self {
        let on_board = region == TileRegion::Board;
        Self {
            instance: format!("{}-{}", region.prefix(), index),
            asset: tile.asset_name(on_board),
            left: tile.left,
            right: tile.right,
            rotated: on_board && tile.is_double(),
            draggable,
            highlighted,
        }
    }
}

/// The one action control a panel can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionControl {
    /// Draw a tile from the stock.
    PickUp,
    /// Pass the turn.
    Pass,
}

impl ActionControl {
    /// Player-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::PickUp => "Pick Up",
            Self::Pass => "Pass",
        }
    }
}

/// Visual emphasis of one player panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelHighlight {
    /// This player won.
    Winner,
    /// This player is on turn and nobody has won yet.
    Turn,
    /// Nothing special.
    #[default]
    Neutral,
}

/// One player's panel.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct PlayerPanel {
    /// Player number; panels are addressed by it.
    number: usize,
    /// Panel heading.
    heading: String,
    /// Whether this panel belongs to the requesting client.
    is_viewer: bool,
    /// Emphasis per the winner, turn, neutral precedence.
    highlight: PanelHighlight,
    /// Face-down tile count for opponents; always zero for the viewer.
    hidden_tiles: usize,
    /// The viewer's interactive hand; empty for opponents.
    hand: Vec<TileView>,
    /// Turn line shown under an opponent's tiles while they are on turn.
    turn_label: Option<String>,
    /// The control offered to the viewer, at most one per render.
    control: Option<ActionControl>,
}

impl PlayerPanel {
    /// Builds an opponent's panel: a name and a count of face-down tiles.
    pub fn opponent(
        number: usize,
        name: &str,
        tile_count: usize,
        on_turn: bool,
        highlight: PanelHighlight,
    ) -> Self {
        Self {
            number,
            heading: name.to_string(),
            is_viewer: false,
            highlight,
            hidden_tiles: tile_count,
            hand: Vec::new(),
            turn_label: on_turn.then(|| format!("{name}'s turn")),
            control: None,
        }
    }

    /// Builds the viewer's panel with an interactive hand and at most one
    /// control.
    pub fn viewer(
        number: usize,
        name: &str,
        hand: Vec<TileView>,
        control: Option<ActionControl>,
        highlight: PanelHighlight,
    ) -> Self {
        Self {
            number,
            heading: format!("{name} (YOU)"),
            is_viewer: true,
            highlight,
            hidden_tiles: 0,
            hand,
            turn_label: None,
            control,
        }
    }
}

/// Start and game-over banner region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BigMessage {
    /// Game not started yet: the waiting panel.
    Waiting {
        /// The start control appears once a second player has joined.
        can_start: bool,
    },
    /// Game over: win or loss panel with the new-game control.
    GameOver {
        /// Banner text, prefixed `WINNER!` when the viewer won.
        text: String,
        /// Styles the panel as a win for the viewer.
        viewer_won: bool,
    },
}

/// The whole rendered page: fixed attachment points, rebuilt wholesale on
/// every applied snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct PageView {
    /// History lines, oldest first.
    pub(crate) history: Vec<String>,
    /// The played chain, left end first.
    pub(crate) board: Vec<TileView>,
    /// Stock counter line.
    pub(crate) stock_line: String,
    /// Start or game-over banner; `None` mid-game.
    pub(crate) big_message: Option<BigMessage>,
    /// Panel slots addressed by player number; unused slots stay `None`.
    pub(crate) panels: [Option<PlayerPanel>; PANEL_SLOTS],
}

impl Default for PageView {
    fn default() -> Self {
        Self {
            history: Vec::new(),
            board: Vec::new(),
            stock_line: String::new(),
            big_message: None,
            panels: [None, None, None, None],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_ids_are_positional() {
        let a = TileView::new(TileRegion::Hand, 0, Tile::new(2, 2), true, false);
        let b = TileView::new(TileRegion::Hand, 1, Tile::new(2, 2), true, false);
        assert_eq!(a.instance(), "hand-0");
        assert_eq!(b.instance(), "hand-1");
        assert_ne!(a.instance(), b.instance());
        assert_eq!(a.asset(), b.asset());
    }

    #[test]
    fn test_board_double_is_rotated() {
        let tile = TileView::new(TileRegion::Board, 3, Tile::new(5, 5), false, false);
        assert!(*tile.rotated());
        assert_eq!(tile.asset(), "5-5-90");
        assert_eq!(tile.instance(), "board-3");
    }

    #[test]
    fn test_viewer_panel_heading_and_hidden_count() {
        let viewer = PlayerPanel::viewer(0, "Alice", Vec::new(), None, PanelHighlight::Neutral);
        assert_eq!(viewer.heading(), "Alice (YOU)");
        assert_eq!(*viewer.hidden_tiles(), 0);
        assert!(*viewer.is_viewer());

        let opponent = PlayerPanel::opponent(1, "Bob", 7, true, PanelHighlight::Turn);
        assert_eq!(opponent.heading(), "Bob");
        assert_eq!(*opponent.hidden_tiles(), 7);
        assert_eq!(opponent.turn_label().as_deref(), Some("Bob's turn"));
        assert!(!opponent.is_viewer());
    }
}
