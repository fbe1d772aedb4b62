//! Serializable game-state snapshot.
//!
//! The snapshot is the persistence boundary: everything needed to resume a
//! game without replaying history. Territory owners are referenced by
//! player name and territories by string id, so the serialized form is
//! self-describing and stable across sessions. Active combat is not
//! persisted; abandon or complete the attack before saving.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::map::{Territory, ALL_TERRITORIES, TERRITORY_COUNT};

use super::player::{Player, PlayerId};
use super::state::{GameState, Phase, TerritoryState};

/// Errors that can occur when restoring a snapshot.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("unknown territory id '{0}'")]
    UnknownTerritory(String),

    #[error("snapshot is missing territory '{0}'")]
    MissingTerritory(String),

    #[error("unknown player name '{0}'")]
    UnknownPlayer(String),

    #[error("snapshot has {0} players, expected 2 to 6")]
    PlayerCount(usize),

    #[error("current player index {0} is out of range")]
    PlayerIndex(usize),

    #[error("per-player pool lists must match the player count")]
    PoolLength,

    #[error("owned territory '{0}' has no armies")]
    OwnedTerritoryWithoutArmies(String),

    #[error("unowned territory '{0}' has armies")]
    UnownedTerritoryWithArmies(String),
}

/// Ownership and army count of one territory in serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerritorySnapshot {
    /// Owning player's name, or None while unclaimed.
    pub owner: Option<String>,
    pub armies: u32,
}

/// A complete serializable game-state snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub players: Vec<Player>,
    pub current_player_index: usize,
    pub phase: Phase,
    pub turn_number: u32,
    /// Keyed by territory string id; always all 42 entries.
    pub territories: BTreeMap<String, TerritorySnapshot>,
    pub remaining_armies: Vec<u32>,
    pub reinforcements: Vec<u32>,
    pub initial_deployment_complete: bool,
    pub fortify_used: bool,
}

impl Snapshot {
    /// Captures the current game state.
    pub fn capture(state: &GameState) -> Snapshot {
        let territories = ALL_TERRITORIES
            .iter()
            .map(|t| {
                let record = state.territory(*t);
                let owner = record
                    .owner
                    .map(|p| state.players[p.index()].name.clone());
                (
                    t.id().to_string(),
                    TerritorySnapshot {
                        owner,
                        armies: record.armies,
                    },
                )
            })
            .collect();

        Snapshot {
            players: state.players.clone(),
            current_player_index: state.current_player_index,
            phase: state.phase,
            turn_number: state.turn_number,
            territories,
            remaining_armies: state.remaining_armies.clone(),
            reinforcements: state.reinforcements.clone(),
            initial_deployment_complete: state.initial_deployment_complete,
            fortify_used: state.fortify_used,
        }
    }

    /// Rebuilds a `GameState` from the snapshot, validating every reference.
    pub fn restore(&self) -> Result<GameState, SnapshotError> {
        if self.players.len() < 2 || self.players.len() > 6 {
            return Err(SnapshotError::PlayerCount(self.players.len()));
        }
        if self.current_player_index >= self.players.len() {
            return Err(SnapshotError::PlayerIndex(self.current_player_index));
        }
        if self.remaining_armies.len() != self.players.len()
            || self.reinforcements.len() != self.players.len()
        {
            return Err(SnapshotError::PoolLength);
        }
        for id in self.territories.keys() {
            if Territory::from_id(id).is_none() {
                return Err(SnapshotError::UnknownTerritory(id.clone()));
            }
        }

        let mut territories = [TerritoryState {
            owner: None,
            armies: 0,
        }; TERRITORY_COUNT];

        for t in ALL_TERRITORIES.iter() {
            let entry = self
                .territories
                .get(t.id())
                .ok_or_else(|| SnapshotError::MissingTerritory(t.id().to_string()))?;

            let owner = match &entry.owner {
                Some(name) => {
                    let index = self
                        .players
                        .iter()
                        .position(|p| &p.name == name)
                        .ok_or_else(|| SnapshotError::UnknownPlayer(name.clone()))?;
                    Some(PlayerId(index as u8))
                }
                None => None,
            };

            if owner.is_some() && entry.armies == 0 {
                return Err(SnapshotError::OwnedTerritoryWithoutArmies(
                    t.id().to_string(),
                ));
            }
            if owner.is_none() && entry.armies > 0 {
                return Err(SnapshotError::UnownedTerritoryWithArmies(
                    t.id().to_string(),
                ));
            }

            territories[*t as usize] = TerritoryState {
                owner,
                armies: entry.armies,
            };
        }

        Ok(GameState {
            players: self.players.clone(),
            current_player_index: self.current_player_index,
            phase: self.phase,
            turn_number: self.turn_number,
            territories,
            remaining_armies: self.remaining_armies.clone(),
            reinforcements: self.reinforcements.clone(),
            initial_deployment_complete: self.initial_deployment_complete,
            fortify_used: self.fortify_used,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::player::PlayerColor;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn sample_state() -> GameState {
        let players = vec![
            Player::new("alice", PlayerColor::Red),
            Player::new("bob", PlayerColor::Green),
            Player::new("carol", PlayerColor::Blue),
        ];
        let mut state = GameState::new(players).unwrap();
        let mut rng = SmallRng::seed_from_u64(11);
        state.assign_territories_randomly(&mut rng);
        state.phase = Phase::Reinforce;
        state.turn_number = 4;
        state.initial_deployment_complete = true;
        state
    }

    #[test]
    fn capture_restore_roundtrip() {
        let state = sample_state();
        let snapshot = Snapshot::capture(&state);
        let restored = snapshot.restore().unwrap();
        assert_eq!(state, restored);
    }

    #[test]
    fn json_roundtrip() {
        let state = sample_state();
        let snapshot = Snapshot::capture(&state);
        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.restore().unwrap(), state);
    }

    #[test]
    fn snapshot_records_all_territories() {
        let snapshot = Snapshot::capture(&sample_state());
        assert_eq!(snapshot.territories.len(), TERRITORY_COUNT);
        assert!(snapshot.territories.contains_key("kamchatka"));
    }

    #[test]
    fn restore_rejects_unknown_territory() {
        let mut snapshot = Snapshot::capture(&sample_state());
        let entry = snapshot.territories.remove("alaska").unwrap();
        snapshot.territories.insert("atlantis".to_string(), entry);
        assert_eq!(
            snapshot.restore().unwrap_err(),
            SnapshotError::UnknownTerritory("atlantis".to_string())
        );
    }

    #[test]
    fn restore_rejects_missing_territory() {
        let mut snapshot = Snapshot::capture(&sample_state());
        snapshot.territories.remove("japan");
        assert_eq!(
            snapshot.restore().unwrap_err(),
            SnapshotError::MissingTerritory("japan".to_string())
        );
    }

    #[test]
    fn restore_rejects_unknown_owner() {
        let mut snapshot = Snapshot::capture(&sample_state());
        snapshot.territories.get_mut("japan").unwrap().owner = Some("mallory".to_string());
        assert_eq!(
            snapshot.restore().unwrap_err(),
            SnapshotError::UnknownPlayer("mallory".to_string())
        );
    }

    #[test]
    fn restore_rejects_owned_territory_without_armies() {
        let mut snapshot = Snapshot::capture(&sample_state());
        snapshot.territories.get_mut("peru").unwrap().armies = 0;
        assert_eq!(
            snapshot.restore().unwrap_err(),
            SnapshotError::OwnedTerritoryWithoutArmies("peru".to_string())
        );
    }

    #[test]
    fn restore_rejects_out_of_range_player_index() {
        let mut snapshot = Snapshot::capture(&sample_state());
        snapshot.current_player_index = 9;
        assert_eq!(snapshot.restore().unwrap_err(), SnapshotError::PlayerIndex(9));
    }

    #[test]
    fn restore_rejects_pool_length_mismatch() {
        let mut snapshot = Snapshot::capture(&sample_state());
        snapshot.remaining_armies.pop();
        assert_eq!(snapshot.restore().unwrap_err(), SnapshotError::PoolLength);
    }
}
