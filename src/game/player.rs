//! Player identity, colors, and elimination status.

use serde::{Deserialize, Serialize};

/// Index of a player in the game's turn-order list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Returns the player's position in the turn order as a usize index.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One of the six player colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerColor {
    Red,
    Green,
    Blue,
    Yellow,
    Magenta,
    Cyan,
}

/// All colors in default-assignment order.
pub const ALL_COLORS: [PlayerColor; 6] = [
    PlayerColor::Red,
    PlayerColor::Green,
    PlayerColor::Blue,
    PlayerColor::Yellow,
    PlayerColor::Magenta,
    PlayerColor::Cyan,
];

impl PlayerColor {
    /// Returns the lowercase color name.
    pub const fn name(self) -> &'static str {
        match self {
            PlayerColor::Red => "red",
            PlayerColor::Green => "green",
            PlayerColor::Blue => "blue",
            PlayerColor::Yellow => "yellow",
            PlayerColor::Magenta => "magenta",
            PlayerColor::Cyan => "cyan",
        }
    }

    /// Returns the display hex value for this color.
    pub const fn hex(self) -> &'static str {
        match self {
            PlayerColor::Red => "#ff4444",
            PlayerColor::Green => "#44ff44",
            PlayerColor::Blue => "#4444ff",
            PlayerColor::Yellow => "#ffff44",
            PlayerColor::Magenta => "#ff44ff",
            PlayerColor::Cyan => "#44ffff",
        }
    }

    /// Parses a color from its lowercase name.
    pub fn from_name(name: &str) -> Option<PlayerColor> {
        ALL_COLORS.iter().find(|c| c.name() == name).copied()
    }

    /// Returns the default color for the player at the given turn-order index.
    pub const fn default_for(index: usize) -> PlayerColor {
        ALL_COLORS[index % ALL_COLORS.len()]
    }
}

/// Whether a player is still in the game.
///
/// A player becomes `Eliminated` when a conquest removes their last
/// territory; eliminated players are skipped in the turn order and cannot
/// win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    Active,
    Eliminated,
}

/// A player: name, color, and elimination status.
///
/// Identity (name, color) is fixed at game setup; only `status` changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub color: PlayerColor,
    pub status: PlayerStatus,
}

impl Player {
    /// Creates an active player.
    pub fn new(name: impl Into<String>, color: PlayerColor) -> Self {
        Player {
            name: name.into(),
            color,
            status: PlayerStatus::Active,
        }
    }

    /// Returns true if the player has not been eliminated.
    pub fn is_active(&self) -> bool {
        self.status == PlayerStatus::Active
    }
}
