//! Mutable game state.
//!
//! Contains the player roster, the territory ownership/army record, the
//! phase and turn counters, and the serializable snapshot used for
//! persistence.

pub mod player;
pub mod snapshot;
pub mod state;

pub use player::{Player, PlayerColor, PlayerId, PlayerStatus};
pub use snapshot::{Snapshot, SnapshotError};
pub use state::{GameState, Phase, TerritoryState};
