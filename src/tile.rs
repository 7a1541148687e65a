//! Domino tile value model.

use serde::{Deserialize, Serialize};

/// A domino tile as the server deals it: two pip counts in a fixed order.
///
/// `(a, b)` and `(b, a)` name the same physical tile. The client keeps the
/// orientation it received and never normalizes, so a tile round-trips to the
/// server with the exact pip values it arrived with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    /// Left pip count.
    #[serde(rename = "l")]
    pub left: u8,
    /// Right pip count.
    #[serde(rename = "r")]
    pub right: u8,
}

impl Tile {
    /// Creates a tile from its two pip counts.
    pub fn new(left: u8, right: u8) -> Self {
        Self { left, right }
    }

    /// Returns both pip counts in received order.
    pub fn pips(&self) -> (u8, u8) {
        (self.left, self.right)
    }

    /// A double carries the same pip count on both halves.
    pub fn is_double(&self) -> bool {
        self.left == self.right
    }

    /// Deterministic asset name for this tile.
    ///
    /// Doubles present rotated a quarter turn when they sit on the board,
    /// which the art encodes with a `-90` suffix. Hand tiles always use the
    /// plain name, double or not.
    pub fn asset_name(&self, on_board: bool) -> String {
        if on_board && self.is_double() {
            format!("{}-{}-90", self.left, self.right)
        } else {
            format!("{}-{}", self.left, self.right)
        }
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}|{}]", self.left, self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_name_plain() {
        assert_eq!(Tile::new(3, 5).asset_name(false), "3-5");
        assert_eq!(Tile::new(3, 5).asset_name(true), "3-5");
    }

    #[test]
    fn test_asset_name_double_rotates_only_on_board() {
        let double = Tile::new(4, 4);
        assert_eq!(double.asset_name(true), "4-4-90");
        assert_eq!(double.asset_name(false), "4-4");
    }

    #[test]
    fn test_orientation_is_preserved() {
        let tile = Tile::new(6, 1);
        assert_eq!(tile.pips(), (6, 1));
        assert_eq!(tile.to_string(), "[6|1]");
    }
}
