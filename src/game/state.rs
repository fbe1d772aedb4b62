//! Game state representation.
//!
//! Holds the complete snapshot of a conquest game at a point in time:
//! players, territory ownership and army counts, the active phase, turn
//! counters, and per-player deployment pools.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::map::{Territory, ALL_TERRITORIES, TERRITORY_COUNT};
use crate::turn::reinforce::initial_armies;

use super::player::{Player, PlayerId, PlayerStatus};

/// The phase of the game.
///
/// `InitialSetup` and `InitialPlacement` occur once at game start;
/// `Deploy` is the first player's one-time variant of `Reinforce`;
/// `Reinforce`, `Attack`, and `Fortify` repeat per player turn.
/// `GameOver` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    InitialSetup,
    InitialPlacement,
    Deploy,
    Reinforce,
    Attack,
    Fortify,
    GameOver,
}

impl Phase {
    /// Returns the kebab-case string id for this phase.
    pub const fn id(self) -> &'static str {
        match self {
            Phase::InitialSetup => "initial-setup",
            Phase::InitialPlacement => "initial-placement",
            Phase::Deploy => "deploy",
            Phase::Reinforce => "reinforce",
            Phase::Attack => "attack",
            Phase::Fortify => "fortify",
            Phase::GameOver => "game-over",
        }
    }

    /// Parses a phase from its kebab-case string id.
    pub fn from_id(id: &str) -> Option<Phase> {
        match id {
            "initial-setup" => Some(Phase::InitialSetup),
            "initial-placement" => Some(Phase::InitialPlacement),
            "deploy" => Some(Phase::Deploy),
            "reinforce" => Some(Phase::Reinforce),
            "attack" => Some(Phase::Attack),
            "fortify" => Some(Phase::Fortify),
            "game-over" => Some(Phase::GameOver),
            _ => None,
        }
    }

    /// Returns true if armies are deployed from the pool during this phase.
    pub const fn is_deployment(self) -> bool {
        matches!(
            self,
            Phase::InitialPlacement | Phase::Deploy | Phase::Reinforce
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Ownership and army count of a single territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerritoryState {
    /// Owning player, or None while unclaimed during setup.
    pub owner: Option<PlayerId>,
    pub armies: u32,
}

const EMPTY_TERRITORY: TerritoryState = TerritoryState {
    owner: None,
    armies: 0,
};

/// Complete mutable game state.
///
/// Territory records live in a fixed-size array indexed by
/// `Territory as usize` for O(1) lookup, as with the static map tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Players in turn order. Identity is fixed after setup.
    pub players: Vec<Player>,
    /// Index of the player whose turn it is.
    pub current_player_index: usize,
    pub phase: Phase,
    /// Starts at 1; increments each time the turn order wraps past player 0.
    pub turn_number: u32,
    pub territories: [TerritoryState; TERRITORY_COUNT],
    /// Deployable armies per player (initial pool, then per-turn grant).
    pub remaining_armies: Vec<u32>,
    /// Total reinforcements granted to each player this turn (informational).
    pub reinforcements: Vec<u32>,
    /// Set once every starting army has been placed.
    pub initial_deployment_complete: bool,
    /// Set when the current player has used their fortification this turn.
    pub fortify_used: bool,
}

impl GameState {
    /// Creates a new game in `InitialSetup` with full starting pools.
    ///
    /// Requires 2-6 players with unique names.
    pub fn new(players: Vec<Player>) -> Result<GameState, GameError> {
        if players.len() < 2 || players.len() > 6 {
            return Err(GameError::PlayerCount(players.len()));
        }
        for (i, p) in players.iter().enumerate() {
            if players[..i].iter().any(|q| q.name == p.name) {
                return Err(GameError::DuplicatePlayerName(p.name.clone()));
            }
        }

        let pool = initial_armies(players.len());
        let count = players.len();
        Ok(GameState {
            players,
            current_player_index: 0,
            phase: Phase::InitialSetup,
            turn_number: 1,
            territories: [EMPTY_TERRITORY; TERRITORY_COUNT],
            remaining_armies: vec![pool; count],
            reinforcements: vec![0; count],
            initial_deployment_complete: false,
            fortify_used: false,
        })
    }

    /// Returns the id of the player whose turn it is.
    pub fn current_player_id(&self) -> PlayerId {
        PlayerId(self.current_player_index as u8)
    }

    /// Returns the player whose turn it is.
    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_index]
    }

    /// Returns the territory record.
    pub fn territory(&self, t: Territory) -> &TerritoryState {
        &self.territories[t as usize]
    }

    /// Returns the mutable territory record.
    pub fn territory_mut(&mut self, t: Territory) -> &mut TerritoryState {
        &mut self.territories[t as usize]
    }

    /// Returns the number of territories owned by the player.
    pub fn count_owned(&self, player: PlayerId) -> usize {
        self.territories
            .iter()
            .filter(|t| t.owner == Some(player))
            .count()
    }

    /// Returns all territories owned by the player, in map order.
    pub fn territories_owned_by(&self, player: PlayerId) -> Vec<Territory> {
        ALL_TERRITORIES
            .iter()
            .filter(|t| self.territory(**t).owner == Some(player))
            .copied()
            .collect()
    }

    /// Returns true if the player owns every territory on the map.
    pub fn owns_all_territories(&self, player: PlayerId) -> bool {
        self.territories.iter().all(|t| t.owner == Some(player))
    }

    /// Returns the number of players still in the game.
    pub fn active_player_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }

    /// Total armies on the board plus undeployed pools.
    ///
    /// Used by invariant checks: armies only enter through deployment and
    /// only leave through combat losses.
    pub fn total_armies(&self) -> u64 {
        let on_board: u64 = self.territories.iter().map(|t| u64::from(t.armies)).sum();
        let pooled: u64 = self.remaining_armies.iter().map(|a| u64::from(*a)).sum();
        on_board + pooled
    }

    /// Randomly distributes every territory among the players, one army on
    /// each, and debits the placed armies from the starting pools.
    ///
    /// Players earlier in turn order receive the extra territories when the
    /// count does not divide evenly. Enters `InitialPlacement`.
    pub fn assign_territories_randomly<R: Rng>(&mut self, rng: &mut R) {
        let mut order: Vec<Territory> = ALL_TERRITORIES.to_vec();
        order.shuffle(rng);

        let players = self.players.len();
        let per_player = TERRITORY_COUNT / players;
        let extras = TERRITORY_COUNT % players;

        let mut next = 0;
        for (i, _) in self.players.iter().enumerate() {
            let share = per_player + usize::from(i < extras);
            for t in &order[next..next + share] {
                self.territories[*t as usize] = TerritoryState {
                    owner: Some(PlayerId(i as u8)),
                    armies: 1,
                };
            }
            next += share;
            self.remaining_armies[i] -= share as u32;
        }

        self.phase = Phase::InitialPlacement;
    }

    /// Deploys `count` armies from the current player's pool onto an owned
    /// territory.
    pub fn deploy(&mut self, territory: Territory, count: u32) -> Result<(), GameError> {
        let player = self.current_player_id();
        if self.territory(territory).owner != Some(player) {
            return Err(GameError::NotYourTerritory);
        }
        if count < 1 {
            return Err(GameError::InvalidTransferCount {
                min: 1,
                max: self.remaining_armies[player.index()],
            });
        }
        if count > self.remaining_armies[player.index()] {
            return Err(GameError::NoReinforcementsLeft);
        }

        self.territory_mut(territory).armies += count;
        self.remaining_armies[player.index()] -= count;
        Ok(())
    }

    /// Advances `current_player_index` to the next active player, wrapping
    /// modulo the player count. Increments `turn_number` each time the
    /// order wraps past player 0.
    ///
    /// Leaves the index unchanged if no other player is active.
    pub fn next_active_player(&mut self) {
        debug_assert!(self.active_player_count() >= 1);
        let players = self.players.len();
        for _ in 0..players {
            self.current_player_index = (self.current_player_index + 1) % players;
            if self.current_player_index == 0 {
                self.turn_number += 1;
            }
            if self.players[self.current_player_index].is_active() {
                return;
            }
        }
    }

    /// Marks a player eliminated.
    pub fn eliminate(&mut self, player: PlayerId) {
        self.players[player.index()].status = PlayerStatus::Eliminated;
    }
}
