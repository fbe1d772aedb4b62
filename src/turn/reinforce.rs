//! Reinforcement calculation.
//!
//! Armies granted at the start of a turn: a territory-count base of
//! `max(3, owned / 3)` plus the bonus of every continent the player
//! controls outright. Continent bonuses are all-or-nothing: a single
//! territory held by anyone else voids that continent's bonus.

use crate::game::{GameState, PlayerId};
use crate::map::{Continent, ALL_CONTINENTS};

/// Starting army pool per player for a given player count.
///
/// Standard board-game table; unlisted counts fall back to the 4-player
/// value.
pub fn initial_armies(player_count: usize) -> u32 {
    match player_count {
        2 => 40,
        3 => 35,
        5 => 25,
        6 => 20,
        _ => 30,
    }
}

/// A turn's reinforcement grant, split into its components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReinforcementGrant {
    /// `max(3, territories owned / 3)`.
    pub base: u32,
    /// Sum of fully-controlled continent bonuses.
    pub bonus: u32,
}

impl ReinforcementGrant {
    pub fn total(self) -> u32 {
        self.base + self.bonus
    }
}

/// Returns true if every territory of the continent belongs to the player.
pub fn controls_continent(game: &GameState, player: PlayerId, continent: Continent) -> bool {
    continent
        .territories()
        .iter()
        .all(|t| game.territory(*t).owner == Some(player))
}

/// Sums the bonuses of all continents the player fully controls.
pub fn continent_bonus(game: &GameState, player: PlayerId) -> u32 {
    ALL_CONTINENTS
        .iter()
        .filter(|c| controls_continent(game, player, **c))
        .map(|c| c.bonus())
        .sum()
}

/// Computes the player's reinforcement grant for a new turn.
pub fn calculate_reinforcements(game: &GameState, player: PlayerId) -> ReinforcementGrant {
    let owned = game.count_owned(player) as u32;
    ReinforcementGrant {
        base: (owned / 3).max(3),
        bonus: continent_bonus(game, player),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Player, PlayerColor, TerritoryState};
    use crate::map::Territory;

    fn two_player_game() -> GameState {
        GameState::new(vec![
            Player::new("alice", PlayerColor::Red),
            Player::new("bob", PlayerColor::Green),
        ])
        .unwrap()
    }

    fn give(game: &mut GameState, player: PlayerId, territories: &[Territory]) {
        for t in territories {
            *game.territory_mut(*t) = TerritoryState {
                owner: Some(player),
                armies: 1,
            };
        }
    }

    #[test]
    fn initial_armies_table() {
        assert_eq!(initial_armies(2), 40);
        assert_eq!(initial_armies(3), 35);
        assert_eq!(initial_armies(4), 30);
        assert_eq!(initial_armies(5), 25);
        assert_eq!(initial_armies(6), 20);
        // Unlisted counts use the 4-player value.
        assert_eq!(initial_armies(9), 30);
    }

    #[test]
    fn base_has_a_floor_of_three() {
        let mut game = two_player_game();
        give(&mut game, PlayerId(0), &[Territory::Japan]);
        let grant = calculate_reinforcements(&game, PlayerId(0));
        assert_eq!(grant.base, 3);
        assert_eq!(grant.bonus, 0);
        assert_eq!(grant.total(), 3);
    }

    #[test]
    fn base_scales_with_territory_count() {
        let mut game = two_player_game();
        // 12 Asian territories: base 12 / 3 = 4.
        give(
            &mut game,
            PlayerId(0),
            Continent::Asia.territories(),
        );
        let grant = calculate_reinforcements(&game, PlayerId(0));
        assert_eq!(grant.base, 4);
    }

    #[test]
    fn full_continent_grants_its_bonus() {
        let mut game = two_player_game();
        give(&mut game, PlayerId(0), Continent::SouthAmerica.territories());
        assert!(controls_continent(&game, PlayerId(0), Continent::SouthAmerica));
        let grant = calculate_reinforcements(&game, PlayerId(0));
        assert_eq!(grant.base, 3);
        assert_eq!(grant.bonus, 2);
        assert_eq!(grant.total(), 5);
    }

    #[test]
    fn single_enemy_territory_voids_the_bonus() {
        let mut game = two_player_game();
        give(&mut game, PlayerId(0), Continent::SouthAmerica.territories());
        give(&mut game, PlayerId(1), &[Territory::Argentina]);
        assert!(!controls_continent(&game, PlayerId(0), Continent::SouthAmerica));
        assert_eq!(continent_bonus(&game, PlayerId(0)), 0);
    }

    #[test]
    fn single_unclaimed_territory_voids_the_bonus() {
        let mut game = two_player_game();
        give(&mut game, PlayerId(0), Continent::Australia.territories());
        *game.territory_mut(Territory::NewGuinea) = TerritoryState {
            owner: None,
            armies: 0,
        };
        assert_eq!(continent_bonus(&game, PlayerId(0)), 0);
    }

    #[test]
    fn bonuses_stack_across_continents() {
        let mut game = two_player_game();
        give(&mut game, PlayerId(0), Continent::SouthAmerica.territories());
        give(&mut game, PlayerId(0), Continent::Africa.territories());
        let grant = calculate_reinforcements(&game, PlayerId(0));
        // 10 territories: base 3, bonuses 2 + 3.
        assert_eq!(grant.base, 3);
        assert_eq!(grant.bonus, 5);
        assert_eq!(grant.total(), 8);
    }

    #[test]
    fn whole_map_grants_every_bonus() {
        let mut game = two_player_game();
        for t in crate::map::ALL_TERRITORIES.iter() {
            give(&mut game, PlayerId(0), &[*t]);
        }
        let grant = calculate_reinforcements(&game, PlayerId(0));
        assert_eq!(grant.base, 14); // 42 / 3
        assert_eq!(grant.bonus, 24); // 5 + 2 + 5 + 3 + 7 + 2
        assert_eq!(grant.total(), 38);
    }
}
