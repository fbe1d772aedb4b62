//! Fortification: army movement between connected owned territories.
//!
//! Armies may move through any chain of same-owner territories, not just
//! to direct neighbors, so destination validity is a breadth-first search
//! over edges whose endpoints share the source's owner.

use std::collections::VecDeque;

use crate::error::GameError;
use crate::game::{GameState, PlayerId};
use crate::map::{neighbors_of, Territory, TERRITORY_COUNT};

/// Returns every territory reachable from `source` through territories
/// owned by the same player, excluding the source itself.
///
/// Returns an empty vec if the source is unowned.
pub fn reachable_owned(game: &GameState, source: Territory) -> Vec<Territory> {
    let owner = match game.territory(source).owner {
        Some(owner) => owner,
        None => return Vec::new(),
    };

    let mut visited = [false; TERRITORY_COUNT];
    visited[source as usize] = true;
    let mut queue = VecDeque::from([source]);
    let mut reachable = Vec::new();

    while let Some(current) = queue.pop_front() {
        for neighbor in neighbors_of(current) {
            if visited[*neighbor as usize] {
                continue;
            }
            if game.territory(*neighbor).owner == Some(owner) {
                visited[*neighbor as usize] = true;
                queue.push_back(*neighbor);
                reachable.push(*neighbor);
            }
        }
    }

    reachable
}

/// Returns true if `dest` is reachable from `source` through the source
/// owner's territories.
pub fn is_connected(game: &GameState, source: Territory, dest: Territory) -> bool {
    source != dest && reachable_owned(game, source).contains(&dest)
}

/// Moves armies between two territories of the same owner.
///
/// Fails with `InvalidTransferCount` for a zero count and with
/// `InsufficientForce` when the move would empty the source. Ownership and
/// connectivity are the caller's responsibility; the per-turn single-move
/// limit is enforced by the phase machine's flag, not here.
pub fn move_armies(
    game: &mut GameState,
    source: Territory,
    dest: Territory,
    count: u32,
) -> Result<(), GameError> {
    debug_assert_eq!(game.territory(source).owner, game.territory(dest).owner);

    let available = game.territory(source).armies;
    if count < 1 {
        return Err(GameError::InvalidTransferCount {
            min: 1,
            max: available.saturating_sub(1),
        });
    }
    if count >= available {
        return Err(GameError::InsufficientForce);
    }

    game.territory_mut(source).armies -= count;
    game.territory_mut(dest).armies += count;
    Ok(())
}

/// Returns true if the player has any legal fortification move: an owned
/// territory with at least 2 armies and an owned neighbor to receive them.
pub fn has_fortify_move(game: &GameState, player: PlayerId) -> bool {
    game.territories_owned_by(player).iter().any(|t| {
        game.territory(*t).armies >= 2
            && neighbors_of(*t)
                .iter()
                .any(|n| game.territory(*n).owner == Some(player))
    })
}
