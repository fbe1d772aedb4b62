//! Error taxonomy for the rules core.
//!
//! Every recoverable failure is returned as a `GameError` value; nothing in
//! the core panics on caller mistakes. Each variant corresponds to one
//! distinct validation or sequencing failure, and `kind()` gives the stable
//! discriminant string used on the wire.

use thiserror::Error;

use crate::game::state::Phase;

/// A recoverable rules violation: the operation does not apply and the game
/// state is unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("unknown territory '{0}'")]
    UnknownTerritory(String),

    #[error("a game needs 2 to 6 players, got {0}")]
    PlayerCount(usize),

    #[error("duplicate player name '{0}'")]
    DuplicatePlayerName(String),

    #[error("territory is not owned by the current player")]
    NotYourTerritory,

    #[error("cannot attack your own territory")]
    OwnTerritory,

    #[error("must have at least 2 armies to attack")]
    InsufficientAttackerForce,

    #[error("must leave at least 1 army in the attacking territory")]
    AttackerMustRetainForce,

    #[error("cannot have more armies after the battle than before")]
    ArmyCountIncreased,

    #[error("cannot have negative armies")]
    NegativeArmyCount,

    #[error("can only attack adjacent territories")]
    NotAdjacent,

    #[error("must move between {min} and {max} armies")]
    InvalidTransferCount { min: u32, max: u32 },

    #[error("must leave at least 1 army in the source territory")]
    InsufficientForce,

    #[error("territory is not reachable through your own territories")]
    NotConnected,

    #[error("no combat is in progress")]
    NoActiveCombat,

    #[error("a combat is already in progress")]
    CombatInProgress,

    #[error("no conquest is pending completion")]
    NoConquestPending,

    #[error("a conquered territory is awaiting its army transfer")]
    ConquestPending,

    #[error("no deployable armies remain")]
    NoReinforcementsLeft,

    #[error("only one fortification move is allowed per turn")]
    FortifyAlreadyUsed,

    #[error("select an attack source territory first")]
    NoSourceSelected,

    #[error("select a fortification source and destination first")]
    NoFortifySelection,

    #[error("operation is not legal during the {phase} phase")]
    PhaseMismatch { phase: Phase },

    #[error("the {phase} phase is not complete")]
    PhaseIncomplete { phase: Phase },

    #[error("no game in progress")]
    NotInGame,

    #[error("the game is over")]
    GameOver,
}

impl GameError {
    /// Returns the stable discriminant name for this error, used as the
    /// error kind on the wire and in result objects.
    pub fn kind(&self) -> &'static str {
        match self {
            GameError::UnknownTerritory(_) => "UnknownTerritory",
            GameError::PlayerCount(_) => "PlayerCount",
            GameError::DuplicatePlayerName(_) => "DuplicatePlayerName",
            GameError::NotYourTerritory => "NotYourTerritory",
            GameError::OwnTerritory => "OwnTerritory",
            GameError::InsufficientAttackerForce => "InsufficientAttackerForce",
            GameError::AttackerMustRetainForce => "AttackerMustRetainForce",
            GameError::ArmyCountIncreased => "ArmyCountIncreased",
            GameError::NegativeArmyCount => "NegativeArmyCount",
            GameError::NotAdjacent => "NotAdjacent",
            GameError::InvalidTransferCount { .. } => "InvalidTransferCount",
            GameError::InsufficientForce => "InsufficientForce",
            GameError::NotConnected => "NotConnected",
            GameError::NoActiveCombat => "NoActiveCombat",
            GameError::CombatInProgress => "CombatInProgress",
            GameError::NoConquestPending => "NoConquestPending",
            GameError::ConquestPending => "ConquestPending",
            GameError::NoReinforcementsLeft => "NoReinforcementsLeft",
            GameError::FortifyAlreadyUsed => "FortifyAlreadyUsed",
            GameError::NoSourceSelected => "NoSourceSelected",
            GameError::NoFortifySelection => "NoFortifySelection",
            GameError::PhaseMismatch { .. } => "PhaseMismatch",
            GameError::PhaseIncomplete { .. } => "PhaseIncomplete",
            GameError::NotInGame => "NotInGame",
            GameError::GameOver => "GameOver",
        }
    }
}
