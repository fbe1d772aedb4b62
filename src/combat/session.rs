//! Combat session: one attack between two territories.
//!
//! A session binds an attacker/defender pair across multiple exchange
//! rounds until conquest or abandonment, and is the only place combat
//! results are committed to the game state. At most one session exists at
//! a time for the whole game; the owning aggregate enforces that.

use crate::error::GameError;
use crate::game::{GameState, PlayerId};
use crate::map::{is_adjacent, Territory};

use super::resolver::resolve_exchange;

/// Lifecycle of a combat session.
///
/// `Initiated` -> `InProgress` (after the first non-conquering exchange)
/// -> `Conquered` (defender at zero, transfer pending) -> `Ended`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatState {
    Initiated,
    InProgress,
    Conquered,
    Ended,
}

/// Army counts and owners at the moment the attack began.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitialState {
    pub attacker_armies: u32,
    pub defender_armies: u32,
    pub attacker_owner: PlayerId,
    pub defender_owner: Option<PlayerId>,
}

/// One resolved exchange round. Immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleRound {
    /// 1-based round number.
    pub round: u32,
    pub attacker_initial: u32,
    pub defender_initial: u32,
    pub attacker_remaining: u32,
    pub defender_remaining: u32,
    pub attacker_losses: u32,
    pub defender_losses: u32,
    pub conquered: bool,
}

/// Result of a committed exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeReport {
    pub round: u32,
    pub attacker_losses: u32,
    pub defender_losses: u32,
    pub conquered: bool,
    /// True while another exchange is possible: not conquered and the
    /// attacker still has more than one army.
    pub can_continue: bool,
}

/// Result of a completed conquest transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConquestReport {
    pub territory: Territory,
    pub armies_moved: u32,
    pub attacker_remaining: u32,
    pub previous_owner: Option<PlayerId>,
}

/// A single active attack between two adjacent territories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatSession {
    pub attacker: Territory,
    pub defender: Territory,
    pub initial: InitialState,
    /// Append-only record of every exchange round.
    pub history: Vec<BattleRound>,
    state: CombatState,
}

impl CombatSession {
    /// Starts an attack after validating it against the game state:
    /// the attacker must belong to the current player, the defender must
    /// belong to someone else, the attacker needs at least 2 armies, and
    /// the territories must be adjacent.
    pub fn start(
        game: &GameState,
        attacker: Territory,
        defender: Territory,
    ) -> Result<CombatSession, GameError> {
        let current = game.current_player_id();
        let from = game.territory(attacker);
        let to = game.territory(defender);

        if from.owner != Some(current) {
            return Err(GameError::NotYourTerritory);
        }
        if from.owner == to.owner {
            return Err(GameError::OwnTerritory);
        }
        if from.armies < 2 {
            return Err(GameError::InsufficientAttackerForce);
        }
        if !is_adjacent(attacker, defender) {
            return Err(GameError::NotAdjacent);
        }

        Ok(CombatSession {
            attacker,
            defender,
            initial: InitialState {
                attacker_armies: from.armies,
                defender_armies: to.armies,
                attacker_owner: current,
                defender_owner: to.owner,
            },
            history: Vec::new(),
            state: CombatState::Initiated,
        })
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> CombatState {
        self.state
    }

    /// Returns true if the defender has been conquered and the army
    /// transfer is still pending.
    pub fn is_conquered(&self) -> bool {
        self.state == CombatState::Conquered
    }

    /// Resolves and commits one exchange round.
    ///
    /// On conquest, ownership of the defending territory transfers
    /// immediately but its army count stays at zero until
    /// `complete_conquest` moves armies in. A conquering exchange that
    /// would leave the attacker with a single army is rejected
    /// (`AttackerMustRetainForce`): the mandatory occupation move could
    /// not leave an army behind.
    pub fn execute_exchange(
        &mut self,
        game: &mut GameState,
        attacker_remaining: i64,
        defender_remaining: i64,
    ) -> Result<ExchangeReport, GameError> {
        match self.state {
            CombatState::Initiated | CombatState::InProgress => {}
            CombatState::Conquered => return Err(GameError::ConquestPending),
            CombatState::Ended => return Err(GameError::NoActiveCombat),
        }

        let attacker_armies = game.territory(self.attacker).armies;
        let defender_armies = game.territory(self.defender).armies;

        let outcome = resolve_exchange(
            attacker_armies,
            defender_armies,
            attacker_remaining,
            defender_remaining,
        )?;
        if outcome.conquered && outcome.attacker_remaining < 2 {
            return Err(GameError::AttackerMustRetainForce);
        }

        game.territory_mut(self.attacker).armies = outcome.attacker_remaining;
        game.territory_mut(self.defender).armies = outcome.defender_remaining;
        if outcome.conquered {
            let owner = game.territory(self.attacker).owner;
            game.territory_mut(self.defender).owner = owner;
            self.state = CombatState::Conquered;
        } else {
            self.state = CombatState::InProgress;
        }

        let round = BattleRound {
            round: self.history.len() as u32 + 1,
            attacker_initial: attacker_armies,
            defender_initial: defender_armies,
            attacker_remaining: outcome.attacker_remaining,
            defender_remaining: outcome.defender_remaining,
            attacker_losses: outcome.attacker_losses,
            defender_losses: outcome.defender_losses,
            conquered: outcome.conquered,
        };
        self.history.push(round);

        Ok(ExchangeReport {
            round: round.round,
            attacker_losses: outcome.attacker_losses,
            defender_losses: outcome.defender_losses,
            conquered: outcome.conquered,
            can_continue: !outcome.conquered && outcome.attacker_remaining > 1,
        })
    }

    /// Moves armies into the conquered territory and ends the session.
    ///
    /// Legal only in the `Conquered` state; the transfer must leave at
    /// least one army behind and move at least one in.
    pub fn complete_conquest(
        &mut self,
        game: &mut GameState,
        armies_to_move: u32,
    ) -> Result<ConquestReport, GameError> {
        if self.state != CombatState::Conquered {
            return Err(GameError::NoConquestPending);
        }

        let attacker_armies = game.territory(self.attacker).armies;
        let max = attacker_armies.saturating_sub(1);
        if armies_to_move < 1 || armies_to_move > max {
            return Err(GameError::InvalidTransferCount { min: 1, max });
        }

        game.territory_mut(self.attacker).armies -= armies_to_move;
        game.territory_mut(self.defender).armies = armies_to_move;
        self.state = CombatState::Ended;

        Ok(ConquestReport {
            territory: self.defender,
            armies_moved: armies_to_move,
            attacker_remaining: game.territory(self.attacker).armies,
            previous_owner: self.initial.defender_owner,
        })
    }

    /// Abandons the attack without conquering.
    ///
    /// Exchanges already committed stay committed. Illegal while a
    /// conquest transfer is pending: the conquered territory must receive
    /// its occupying armies first.
    pub fn end(&mut self) -> Result<(), GameError> {
        match self.state {
            CombatState::Initiated | CombatState::InProgress => {
                self.state = CombatState::Ended;
                Ok(())
            }
            CombatState::Conquered => Err(GameError::ConquestPending),
            CombatState::Ended => Err(GameError::NoActiveCombat),
        }
    }
}
