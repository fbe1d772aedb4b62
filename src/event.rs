//! Typed events published by the game session.
//!
//! External collaborators (statistics, animation, victory displays)
//! consume these instead of intercepting core calls: every mutating
//! operation appends the events it caused, and `GameSession::take_events`
//! drains the queue in order.

use crate::game::{Phase, PlayerId};
use crate::map::Territory;

/// Something that happened to the game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A starting army was placed during initial placement.
    ArmyPlaced {
        player: PlayerId,
        territory: Territory,
        remaining: u32,
    },

    /// Reinforcement armies were deployed onto a territory.
    ArmiesDeployed {
        player: PlayerId,
        territory: Territory,
        count: u32,
        remaining: u32,
    },

    /// A player's turn grant was computed and added to their pool.
    ReinforcementsGranted {
        player: PlayerId,
        base: u32,
        bonus: u32,
    },

    /// The phase changed.
    PhaseAdvanced { from: Phase, to: Phase },

    /// A new player's turn began.
    TurnStarted { player: PlayerId, turn_number: u32 },

    /// An attack was initiated between two territories.
    CombatStarted {
        attacker: Territory,
        defender: Territory,
    },

    /// One exchange round resolved.
    ExchangeResolved {
        attacker: Territory,
        defender: Territory,
        round: u32,
        attacker_losses: u32,
        defender_losses: u32,
    },

    /// The defender was reduced to zero armies; ownership transferred.
    TerritoryConquered {
        territory: Territory,
        conqueror: PlayerId,
        previous_owner: Option<PlayerId>,
    },

    /// The post-conquest army transfer completed.
    ConquestCompleted {
        from: Territory,
        to: Territory,
        armies_moved: u32,
    },

    /// An attack was abandoned without conquest.
    CombatAbandoned {
        attacker: Territory,
        defender: Territory,
    },

    /// A fortification move transferred armies.
    ArmiesFortified {
        from: Territory,
        to: Territory,
        count: u32,
    },

    /// A player lost their last territory.
    PlayerEliminated { player: PlayerId },

    /// A player owns the entire map.
    GameWon { player: PlayerId },
}
