//! Direct-input exchange resolution.
//!
//! Validates a proposed attacker/defender army exchange and computes losses
//! and conquest, without touching game state. Remaining counts arrive as
//! signed integers because they are raw user input: a negative defender
//! count must be reported as `NegativeArmyCount`, not rejected upstream.

use crate::error::GameError;

/// The result of a successfully validated exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeOutcome {
    pub attacker_losses: u32,
    pub defender_losses: u32,
    pub attacker_remaining: u32,
    pub defender_remaining: u32,
    /// True iff the defender was reduced to exactly zero armies.
    pub conquered: bool,
    /// True once no further exchange is possible: conquest, or the
    /// attacker can no longer spare an army.
    pub battle_complete: bool,
}

/// Resolves one exchange round.
///
/// `attacker_armies`/`defender_armies` are the current counts in the two
/// territories; `attacker_remaining`/`defender_remaining` are the chosen
/// post-exchange counts. Validation failures leave nothing to apply:
///
/// - attacker below 2 armies cannot attack (`InsufficientAttackerForce`)
/// - the attacker must keep at least 1 army (`AttackerMustRetainForce`)
/// - neither side may end with more armies than it started with
///   (`ArmyCountIncreased`)
/// - the defender cannot go negative (`NegativeArmyCount`)
pub fn resolve_exchange(
    attacker_armies: u32,
    defender_armies: u32,
    attacker_remaining: i64,
    defender_remaining: i64,
) -> Result<ExchangeOutcome, GameError> {
    if attacker_armies < 2 {
        return Err(GameError::InsufficientAttackerForce);
    }
    if attacker_remaining < 1 {
        return Err(GameError::AttackerMustRetainForce);
    }
    if attacker_remaining > i64::from(attacker_armies) {
        return Err(GameError::ArmyCountIncreased);
    }
    if defender_remaining < 0 {
        return Err(GameError::NegativeArmyCount);
    }
    if defender_remaining > i64::from(defender_armies) {
        return Err(GameError::ArmyCountIncreased);
    }

    let attacker_remaining = attacker_remaining as u32;
    let defender_remaining = defender_remaining as u32;

    let conquered = defender_remaining == 0;
    Ok(ExchangeOutcome {
        attacker_losses: attacker_armies - attacker_remaining,
        defender_losses: defender_armies - defender_remaining,
        attacker_remaining,
        defender_remaining,
        conquered,
        battle_complete: conquered || attacker_remaining <= 1,
    })
}
