//! End-to-end rules scenarios driven through the `GameSession` aggregate.
//!
//! Exercises the canonical battle flows, reinforcement rules, fortify
//! connectivity, and the full phase cycle the way a UI would: clicks and
//! numeric submissions only.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use hegemon::error::GameError;
use hegemon::event::GameEvent;
use hegemon::game::{GameState, Phase, Player, PlayerColor, PlayerId, TerritoryState};
use hegemon::map::{Continent, Territory, ALL_TERRITORIES};
use hegemon::session::GameSession;
use hegemon::turn::reinforce::calculate_reinforcements;

fn players(n: usize) -> Vec<Player> {
    let names = ["alice", "bob", "carol", "dave"];
    names[..n]
        .iter()
        .enumerate()
        .map(|(i, name)| Player::new(*name, PlayerColor::default_for(i)))
        .collect()
}

fn set(state: &mut GameState, territory: Territory, owner: PlayerId, armies: u32) {
    *state.territory_mut(territory) = TerritoryState {
        owner: Some(owner),
        armies,
    };
}

/// Two-player attack-phase position: alice holds Alaska with the given
/// stack, bob holds everything else with 1 army except Northwest
/// Territory, which gets `defender_armies`.
fn attack_position(attacker_armies: u32, defender_armies: u32) -> GameSession {
    let mut state = GameState::new(players(2)).unwrap();
    for t in ALL_TERRITORIES.iter() {
        set(&mut state, *t, PlayerId(1), 1);
    }
    set(&mut state, Territory::Alaska, PlayerId(0), attacker_armies);
    set(
        &mut state,
        Territory::NorthwestTerritory,
        PlayerId(1),
        defender_armies,
    );
    state.phase = Phase::Attack;
    state.initial_deployment_complete = true;
    GameSession::from_state(state)
}

#[test]
fn five_versus_three_battle_plays_out_as_specified() {
    let mut session = attack_position(5, 3);
    session.territory_clicked(Territory::Alaska).unwrap();
    session
        .territory_clicked(Territory::NorthwestTerritory)
        .unwrap();

    // First exchange: attacker 5 -> 4, defender 3 -> 1.
    let report = session.exchange_submitted(4, 1).unwrap();
    assert_eq!(report.attacker_losses, 1);
    assert_eq!(report.defender_losses, 2);
    assert!(!report.conquered);
    assert!(report.can_continue);

    // Second exchange: defender to zero, territory conquered.
    let report = session.exchange_submitted(4, 0).unwrap();
    assert!(report.conquered);
    let state = session.state();
    assert_eq!(
        state.territory(Territory::NorthwestTerritory).owner,
        Some(PlayerId(0))
    );
    assert_eq!(state.territory(Territory::NorthwestTerritory).armies, 0);

    // Move two armies in: attacker keeps 2, the conquest holds 2.
    session.conquest_armies_submitted(2).unwrap();
    let state = session.state();
    assert_eq!(state.territory(Territory::Alaska).armies, 2);
    assert_eq!(state.territory(Territory::NorthwestTerritory).armies, 2);
    assert_eq!(
        state.territory(Territory::NorthwestTerritory).owner,
        Some(PlayerId(0))
    );
}

#[test]
fn attacker_with_two_armies_cannot_drop_to_zero() {
    let mut session = attack_position(2, 3);
    session.territory_clicked(Territory::Alaska).unwrap();
    session
        .territory_clicked(Territory::NorthwestTerritory)
        .unwrap();

    assert_eq!(
        session.exchange_submitted(0, 3).unwrap_err(),
        GameError::AttackerMustRetainForce
    );
    // State unchanged.
    let state = session.state();
    assert_eq!(state.territory(Territory::Alaska).armies, 2);
    assert_eq!(state.territory(Territory::NorthwestTerritory).armies, 3);
}

#[test]
fn conquest_transfer_boundaries() {
    let mut session = attack_position(5, 1);
    session.territory_clicked(Territory::Alaska).unwrap();
    session
        .territory_clicked(Territory::NorthwestTerritory)
        .unwrap();
    session.exchange_submitted(5, 0).unwrap();

    // Out-of-range counts are rejected; the bounds themselves succeed.
    assert_eq!(
        session.conquest_armies_submitted(0).unwrap_err(),
        GameError::InvalidTransferCount { min: 1, max: 4 }
    );
    assert_eq!(
        session.conquest_armies_submitted(5).unwrap_err(),
        GameError::InvalidTransferCount { min: 1, max: 4 }
    );
    session.conquest_armies_submitted(4).unwrap();
    assert_eq!(session.state().territory(Territory::Alaska).armies, 1);
    assert_eq!(
        session
            .state()
            .territory(Territory::NorthwestTerritory)
            .armies,
        4
    );
}

#[test]
fn exchange_conservation_holds_through_a_session() {
    let mut session = attack_position(7, 4);
    session.territory_clicked(Territory::Alaska).unwrap();
    session
        .territory_clicked(Territory::NorthwestTerritory)
        .unwrap();

    let total_before = session.state().total_armies();
    session.exchange_submitted(5, 2).unwrap();
    // Losses left the board; nothing else moved.
    assert_eq!(session.state().total_armies(), total_before - 2 - 2);
}

#[test]
fn continent_bonus_is_all_or_nothing() {
    let mut state = GameState::new(players(2)).unwrap();
    for t in Continent::SouthAmerica.territories() {
        set(&mut state, *t, PlayerId(0), 1);
    }

    let grant = calculate_reinforcements(&state, PlayerId(0));
    assert_eq!(grant.bonus, 2);

    // Losing a single territory of the continent voids the whole bonus.
    set(&mut state, Territory::Peru, PlayerId(1), 1);
    let grant = calculate_reinforcements(&state, PlayerId(0));
    assert_eq!(grant.bonus, 0);
}

#[test]
fn reachability_is_transitive_and_owner_bounded() {
    let mut state = GameState::new(players(2)).unwrap();
    // Chain: Brazil - North Africa - Egypt, all alice's.
    set(&mut state, Territory::Brazil, PlayerId(0), 4);
    set(&mut state, Territory::NorthAfrica, PlayerId(0), 1);
    set(&mut state, Territory::Egypt, PlayerId(0), 1);

    let reachable = hegemon::turn::fortify::reachable_owned(&state, Territory::Brazil);
    assert!(reachable.contains(&Territory::NorthAfrica));
    // A reaches C only through B.
    assert!(reachable.contains(&Territory::Egypt));
    assert!(!reachable.contains(&Territory::Brazil));
    for t in &reachable {
        assert_eq!(state.territory(*t).owner, Some(PlayerId(0)));
    }
}

#[test]
fn four_player_start_runs_placement_into_deploy() {
    let mut rng = SmallRng::seed_from_u64(21);
    let mut session = GameSession::new(players(4), &mut rng).unwrap();

    // Fixed table: four players start with 30 armies each; 42 territories
    // hold one army apiece already.
    let state = session.state();
    assert_eq!(state.phase, Phase::InitialPlacement);
    let placed: u64 = state.territories.iter().map(|t| u64::from(t.armies)).sum();
    let pooled: u64 = state.remaining_armies.iter().map(|a| u64::from(*a)).sum();
    assert_eq!(placed, 42);
    assert_eq!(placed + pooled, 4 * 30);

    // Click starting armies down to empty pools; the session flips to the
    // first deployment turn on its own.
    while session.state().phase == Phase::InitialPlacement {
        let player = session.state().current_player_id();
        let target = session.state().territories_owned_by(player)[0];
        session.territory_clicked(target).unwrap();
    }

    let state = session.state();
    assert_eq!(state.phase, Phase::Deploy);
    assert_eq!(state.current_player_index, 0);
    assert!(state.remaining_armies.iter().skip(1).all(|a| *a == 0));
    assert_eq!(state.remaining_armies[0], state.reinforcements[0]);
}

#[test]
fn phase_cycle_is_total_and_counts_turns() {
    let mut rng = SmallRng::seed_from_u64(22);
    let mut session = GameSession::new(players(3), &mut rng).unwrap();
    while session.state().phase == Phase::InitialPlacement {
        let player = session.state().current_player_id();
        let target = session.state().territories_owned_by(player)[0];
        session.territory_clicked(target).unwrap();
    }

    // Two full player cycles, always satisfying each phase's predicate.
    let start_turn = session.state().turn_number;
    for _ in 0..6 {
        // Deployment: click the pool dry.
        while session.state().remaining_armies[session.state().current_player_index] > 0 {
            let player = session.state().current_player_id();
            let target = session.state().territories_owned_by(player)[0];
            session.territory_clicked(target).unwrap();
        }
        session.advance_phase().unwrap(); // -> Attack
        session.advance_phase().unwrap(); // -> Fortify
        session.skip_fortify().unwrap();
        session.advance_phase().unwrap(); // -> next player's deployment
        assert!(session.state().phase.is_deployment());
    }

    // Three players, six turns played: the order wrapped exactly twice.
    assert_eq!(session.state().turn_number, start_turn + 2);
    assert_eq!(session.state().current_player_index, 0);
}

#[test]
fn conquering_the_final_territory_ends_the_game() {
    // Alice owns everything but the defender's last stand.
    let mut state = GameState::new(players(2)).unwrap();
    for t in ALL_TERRITORIES.iter() {
        set(&mut state, *t, PlayerId(0), 2);
    }
    set(&mut state, Territory::NorthwestTerritory, PlayerId(1), 1);
    set(&mut state, Territory::Alaska, PlayerId(0), 5);
    state.phase = Phase::Attack;
    state.initial_deployment_complete = true;
    let mut session = GameSession::from_state(state);

    session.territory_clicked(Territory::Alaska).unwrap();
    session
        .territory_clicked(Territory::NorthwestTerritory)
        .unwrap();
    session.exchange_submitted(5, 0).unwrap();
    session.conquest_armies_submitted(1).unwrap();

    assert_eq!(session.state().phase, Phase::GameOver);
    let events = session.take_events();
    assert!(events.contains(&GameEvent::PlayerEliminated {
        player: PlayerId(1)
    }));
    assert!(events.contains(&GameEvent::GameWon {
        player: PlayerId(0)
    }));
}

#[test]
fn non_adjacent_attacks_are_rejected() {
    let mut session = attack_position(5, 3);
    session.territory_clicked(Territory::Alaska).unwrap();
    // Japan is nowhere near Alaska's borders.
    assert_eq!(
        session.territory_clicked(Territory::Japan).unwrap_err(),
        GameError::NotAdjacent
    );
}

#[test]
fn snapshot_preserves_a_mid_game_position() {
    let mut session = attack_position(5, 3);
    session.territory_clicked(Territory::Alaska).unwrap();
    session
        .territory_clicked(Territory::NorthwestTerritory)
        .unwrap();
    session.exchange_submitted(4, 1).unwrap();
    // Abandon so the position is quiescent, then snapshot.
    session.end_combat().unwrap();

    let snapshot = session.snapshot();
    let restored = GameSession::restore(&snapshot).unwrap();
    assert_eq!(restored.state(), session.state());
    assert_eq!(
        restored.state().territory(Territory::Alaska).armies,
        4
    );
}
