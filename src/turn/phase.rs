//! Phase sequencing.
//!
//! Drives the per-turn phase cycle and the one-time setup phases.
//! Each phase has a completion predicate; `advance_phase` refuses to move
//! until the predicate holds, then applies the transition's side effects
//! (turn rollover, reinforcement grants, flag resets).

use crate::error::GameError;
use crate::game::{GameState, Phase, PlayerId};
use crate::map::Territory;

use super::fortify::has_fortify_move;
use super::reinforce::{calculate_reinforcements, ReinforcementGrant};

/// The result of a successful phase advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseAdvance {
    pub from: Phase,
    pub to: Phase,
    /// True when the advance ended a turn and a new player is up.
    pub new_turn: bool,
    /// The grant computed for the player entering a deployment phase.
    pub reinforcements: Option<ReinforcementGrant>,
}

/// The result of placing one starting army.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementReport {
    /// The player who placed the army.
    pub player: PlayerId,
    pub territory: Territory,
    /// The placer's pool after this placement.
    pub remaining: u32,
    /// True once every starting pool is empty; the game has moved on to
    /// the first deployment turn.
    pub placement_complete: bool,
    /// Grant given to the first player when placement completes.
    pub reinforcements: Option<ReinforcementGrant>,
}

/// Returns true if the current phase's completion predicate holds.
///
/// Attacking is always optional, so `Attack` is always completable.
/// `Fortify` completes once the single allowed move is used or no legal
/// move exists.
pub fn phase_complete(game: &GameState) -> bool {
    match game.phase {
        Phase::InitialSetup => game.territories.iter().all(|t| t.owner.is_some()),
        Phase::InitialPlacement => game.remaining_armies.iter().all(|a| *a == 0),
        Phase::Deploy | Phase::Reinforce => {
            game.remaining_armies[game.current_player_index] == 0
        }
        Phase::Attack => true,
        Phase::Fortify => {
            game.fortify_used || !has_fortify_move(game, game.current_player_id())
        }
        Phase::GameOver => false,
    }
}

/// Computes and grants the player's reinforcements for a new turn.
pub fn grant_reinforcements(game: &mut GameState, player: PlayerId) -> ReinforcementGrant {
    let grant = calculate_reinforcements(game, player);
    game.reinforcements[player.index()] = grant.total();
    game.remaining_armies[player.index()] = grant.total();
    grant
}

/// Finishes initial placement: first player up, turn counter reset,
/// first deployment grant issued.
fn complete_initial_placement(game: &mut GameState) -> ReinforcementGrant {
    game.current_player_index = 0;
    game.turn_number = 1;
    game.phase = Phase::Deploy;
    game.initial_deployment_complete = true;
    grant_reinforcements(game, PlayerId(0))
}

/// Places one army from the current player's starting pool, then passes
/// placement to the next player who still has armies to place.
///
/// When the last pool empties, placement completes automatically and the
/// game enters the first deployment phase.
pub fn place_initial_army(
    game: &mut GameState,
    territory: Territory,
) -> Result<PlacementReport, GameError> {
    if game.phase != Phase::InitialPlacement {
        return Err(GameError::PhaseMismatch { phase: game.phase });
    }

    let player = game.current_player_id();
    game.deploy(territory, 1)?;
    let remaining = game.remaining_armies[player.index()];

    if game.remaining_armies.iter().all(|a| *a == 0) {
        let grant = complete_initial_placement(game);
        return Ok(PlacementReport {
            player,
            territory,
            remaining,
            placement_complete: true,
            reinforcements: Some(grant),
        });
    }

    // Pass to the next player with a non-empty pool. Turn counting does
    // not apply during setup.
    let players = game.players.len();
    let mut index = game.current_player_index;
    loop {
        index = (index + 1) % players;
        if game.remaining_armies[index] > 0 {
            break;
        }
    }
    game.current_player_index = index;

    Ok(PlacementReport {
        player,
        territory,
        remaining,
        placement_complete: false,
        reinforcements: None,
    })
}

/// Advances to the next phase if the current phase is complete.
///
/// Wrapping from `Fortify` back into a deployment phase rolls the turn
/// over: the next active player is selected, the turn number increments
/// when the order wraps past player 0, and the new player's
/// reinforcements are calculated and granted.
pub fn advance_phase(game: &mut GameState) -> Result<PhaseAdvance, GameError> {
    if game.phase == Phase::GameOver {
        return Err(GameError::GameOver);
    }
    if !phase_complete(game) {
        return Err(GameError::PhaseIncomplete { phase: game.phase });
    }

    let from = game.phase;
    let mut new_turn = false;
    let mut reinforcements = None;

    match from {
        Phase::InitialSetup => {
            game.phase = Phase::InitialPlacement;
        }
        Phase::InitialPlacement => {
            reinforcements = Some(complete_initial_placement(game));
        }
        Phase::Deploy | Phase::Reinforce => {
            game.phase = Phase::Attack;
        }
        Phase::Attack => {
            game.phase = Phase::Fortify;
            game.fortify_used = false;
        }
        Phase::Fortify => {
            game.next_active_player();
            game.fortify_used = false;
            game.phase = if game.initial_deployment_complete {
                Phase::Reinforce
            } else {
                Phase::Deploy
            };
            new_turn = true;
            let next = game.current_player_id();
            reinforcements = Some(grant_reinforcements(game, next));
        }
        Phase::GameOver => unreachable!(),
    }

    Ok(PhaseAdvance {
        from,
        to: game.phase,
        new_turn,
        reinforcements,
    })
}
