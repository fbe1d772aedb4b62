//! The game session: owning aggregate for one running game.
//!
//! Bundles the game state, the single active combat session, the
//! two-click selection state for attacks and fortifications, and the
//! event queue. All UI-facing input events enter here and are routed by
//! the current phase; every mutation either fully applies or returns a
//! `GameError` leaving the state untouched.

use rand::Rng;

use crate::combat::{CombatSession, ConquestReport, ExchangeReport};
use crate::error::GameError;
use crate::event::GameEvent;
use crate::game::{GameState, Phase, Player, Snapshot, SnapshotError};
use crate::map::Territory;
use crate::turn::fortify::{is_connected, move_armies};
use crate::turn::phase::{advance_phase, place_initial_army, PhaseAdvance};

/// What a territory click did, for the caller to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A starting army was placed; `placement_complete` marks the end of
    /// the whole initial-placement phase.
    ArmyPlaced {
        territory: Territory,
        remaining: u32,
        placement_complete: bool,
    },

    /// One army deployed from the turn pool.
    ArmiesDeployed { territory: Territory, remaining: u32 },

    /// The territory is now armed as the attack source.
    AttackSourceSelected(Territory),

    /// The previously armed attack source was deselected.
    AttackSourceCleared,

    /// Combat began between the armed source and the clicked target.
    CombatStarted {
        attacker: Territory,
        defender: Territory,
    },

    /// The territory is now the fortification source.
    FortifySourceSelected(Territory),

    /// Source and destination are chosen; awaiting an army count.
    FortifyDestinationSelected {
        source: Territory,
        dest: Territory,
    },

    /// The fortification selection was cleared.
    FortifySelectionCleared,
}

/// Result of a completed fortification move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FortifyReport {
    pub source: Territory,
    pub dest: Territory,
    pub armies_moved: u32,
    pub source_armies: u32,
    pub dest_armies: u32,
}

/// One running game.
///
/// At most one combat session exists at a time, game-wide: play is
/// strictly sequential, so a second concurrent attack is a caller error
/// (`CombatInProgress`), not a supported mode.
#[derive(Debug)]
pub struct GameSession {
    state: GameState,
    combat: Option<CombatSession>,
    attack_source: Option<Territory>,
    fortify_source: Option<Territory>,
    fortify_dest: Option<Territory>,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Starts a new game: territories are randomly distributed and the
    /// game enters initial placement.
    pub fn new<R: Rng>(players: Vec<Player>, rng: &mut R) -> Result<GameSession, GameError> {
        let mut state = GameState::new(players)?;
        state.assign_territories_randomly(rng);
        let mut session = GameSession::from_state(state);
        session.events.push(GameEvent::PhaseAdvanced {
            from: Phase::InitialSetup,
            to: Phase::InitialPlacement,
        });
        Ok(session)
    }

    /// Wraps an existing game state (e.g. a restored snapshot).
    pub fn from_state(state: GameState) -> GameSession {
        GameSession {
            state,
            combat: None,
            attack_source: None,
            fortify_source: None,
            fortify_dest: None,
            events: Vec::new(),
        }
    }

    /// Restores a session from a snapshot.
    pub fn restore(snapshot: &Snapshot) -> Result<GameSession, SnapshotError> {
        Ok(GameSession::from_state(snapshot.restore()?))
    }

    /// Captures a snapshot of the game state.
    ///
    /// Active combat is not part of the snapshot; abandon or complete the
    /// attack before saving.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    /// Returns the game state for reading.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the active combat session, if any.
    pub fn combat(&self) -> Option<&CombatSession> {
        self.combat.as_ref()
    }

    /// Returns the armed attack source, if any.
    pub fn attack_source(&self) -> Option<Territory> {
        self.attack_source
    }

    /// Drains and returns all events since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn ensure_running(&self) -> Result<(), GameError> {
        if self.state.phase == Phase::GameOver {
            return Err(GameError::GameOver);
        }
        Ok(())
    }

    /// Handles a territory click. The interpretation depends on the
    /// current phase: deployment target, attack source/target selection,
    /// or fortification source/destination selection.
    pub fn territory_clicked(&mut self, territory: Territory) -> Result<ClickOutcome, GameError> {
        self.ensure_running()?;
        match self.state.phase {
            Phase::InitialPlacement => self.click_place(territory),
            Phase::Deploy | Phase::Reinforce => self.click_deploy(territory),
            Phase::Attack => self.click_attack(territory),
            Phase::Fortify => self.click_fortify(territory),
            phase => Err(GameError::PhaseMismatch { phase }),
        }
    }

    fn click_place(&mut self, territory: Territory) -> Result<ClickOutcome, GameError> {
        let report = place_initial_army(&mut self.state, territory)?;
        self.events.push(GameEvent::ArmyPlaced {
            player: report.player,
            territory,
            remaining: report.remaining,
        });
        if report.placement_complete {
            self.events.push(GameEvent::PhaseAdvanced {
                from: Phase::InitialPlacement,
                to: Phase::Deploy,
            });
            if let Some(grant) = report.reinforcements {
                self.events.push(GameEvent::ReinforcementsGranted {
                    player: self.state.current_player_id(),
                    base: grant.base,
                    bonus: grant.bonus,
                });
            }
            self.events.push(GameEvent::TurnStarted {
                player: self.state.current_player_id(),
                turn_number: self.state.turn_number,
            });
        }
        Ok(ClickOutcome::ArmyPlaced {
            territory,
            remaining: report.remaining,
            placement_complete: report.placement_complete,
        })
    }

    fn click_deploy(&mut self, territory: Territory) -> Result<ClickOutcome, GameError> {
        let player = self.state.current_player_id();
        self.state.deploy(territory, 1)?;
        let remaining = self.state.remaining_armies[player.index()];
        self.events.push(GameEvent::ArmiesDeployed {
            player,
            territory,
            count: 1,
            remaining,
        });
        Ok(ClickOutcome::ArmiesDeployed {
            territory,
            remaining,
        })
    }

    fn click_attack(&mut self, territory: Territory) -> Result<ClickOutcome, GameError> {
        if self.combat.is_some() {
            return Err(GameError::CombatInProgress);
        }

        let current = self.state.current_player_id();
        let record = self.state.territory(territory);

        if record.owner == Some(current) {
            // Clicking the armed source again disarms it.
            if self.attack_source == Some(territory) {
                self.attack_source = None;
                return Ok(ClickOutcome::AttackSourceCleared);
            }
            if record.armies < 2 {
                return Err(GameError::InsufficientAttackerForce);
            }
            self.attack_source = Some(territory);
            return Ok(ClickOutcome::AttackSourceSelected(territory));
        }

        let source = self.attack_source.ok_or(GameError::NoSourceSelected)?;
        let combat = CombatSession::start(&self.state, source, territory)?;
        self.attack_source = None;
        self.combat = Some(combat);
        self.events.push(GameEvent::CombatStarted {
            attacker: source,
            defender: territory,
        });
        Ok(ClickOutcome::CombatStarted {
            attacker: source,
            defender: territory,
        })
    }

    fn click_fortify(&mut self, territory: Territory) -> Result<ClickOutcome, GameError> {
        if self.state.fortify_used {
            return Err(GameError::FortifyAlreadyUsed);
        }
        let current = self.state.current_player_id();
        if self.state.territory(territory).owner != Some(current) {
            return Err(GameError::NotYourTerritory);
        }

        // A completed selection starts over on the next click.
        if self.fortify_source.is_some() && self.fortify_dest.is_some() {
            self.fortify_source = None;
            self.fortify_dest = None;
        }

        match self.fortify_source {
            None => {
                if self.state.territory(territory).armies < 2 {
                    return Err(GameError::InsufficientForce);
                }
                self.fortify_source = Some(territory);
                Ok(ClickOutcome::FortifySourceSelected(territory))
            }
            Some(source) if source == territory => {
                self.fortify_source = None;
                Ok(ClickOutcome::FortifySelectionCleared)
            }
            Some(source) => {
                if !is_connected(&self.state, source, territory) {
                    return Err(GameError::NotConnected);
                }
                self.fortify_dest = Some(territory);
                Ok(ClickOutcome::FortifyDestinationSelected {
                    source,
                    dest: territory,
                })
            }
        }
    }

    /// Applies a submitted exchange to the active combat.
    pub fn exchange_submitted(
        &mut self,
        attacker_remaining: i64,
        defender_remaining: i64,
    ) -> Result<ExchangeReport, GameError> {
        self.ensure_running()?;
        let combat = self.combat.as_mut().ok_or(GameError::NoActiveCombat)?;
        let report =
            combat.execute_exchange(&mut self.state, attacker_remaining, defender_remaining)?;

        let attacker = combat.attacker;
        let defender = combat.defender;
        self.events.push(GameEvent::ExchangeResolved {
            attacker,
            defender,
            round: report.round,
            attacker_losses: report.attacker_losses,
            defender_losses: report.defender_losses,
        });
        if report.conquered {
            self.events.push(GameEvent::TerritoryConquered {
                territory: defender,
                conqueror: combat.initial.attacker_owner,
                previous_owner: combat.initial.defender_owner,
            });
        } else if !report.can_continue {
            // Attacker can no longer press the attack; the session ends.
            combat.end()?;
            self.combat = None;
            self.events.push(GameEvent::CombatAbandoned { attacker, defender });
        }
        Ok(report)
    }

    /// Completes a pending conquest by moving armies into the captured
    /// territory, then checks elimination and victory.
    pub fn conquest_armies_submitted(&mut self, count: u32) -> Result<ConquestReport, GameError> {
        self.ensure_running()?;
        let combat = self.combat.as_mut().ok_or(GameError::NoConquestPending)?;
        let report = combat.complete_conquest(&mut self.state, count)?;
        let attacker = combat.attacker;
        self.combat = None;

        self.events.push(GameEvent::ConquestCompleted {
            from: attacker,
            to: report.territory,
            armies_moved: report.armies_moved,
        });

        if let Some(previous) = report.previous_owner {
            if self.state.count_owned(previous) == 0
                && self.state.players[previous.index()].is_active()
            {
                self.state.eliminate(previous);
                self.events.push(GameEvent::PlayerEliminated { player: previous });
            }
        }

        let current = self.state.current_player_id();
        if self.state.owns_all_territories(current) {
            self.state.phase = Phase::GameOver;
            self.events.push(GameEvent::GameWon { player: current });
        }

        Ok(report)
    }

    /// Abandons the active combat without conquering.
    pub fn end_combat(&mut self) -> Result<(), GameError> {
        self.ensure_running()?;
        let combat = self.combat.as_mut().ok_or(GameError::NoActiveCombat)?;
        combat.end()?;
        let attacker = combat.attacker;
        let defender = combat.defender;
        self.combat = None;
        self.events.push(GameEvent::CombatAbandoned { attacker, defender });
        Ok(())
    }

    /// Applies the submitted army count to the pending fortification
    /// selection. One fortification is allowed per turn.
    pub fn fortify_armies_submitted(&mut self, count: u32) -> Result<FortifyReport, GameError> {
        self.ensure_running()?;
        if self.state.phase != Phase::Fortify {
            return Err(GameError::PhaseMismatch {
                phase: self.state.phase,
            });
        }
        if self.state.fortify_used {
            return Err(GameError::FortifyAlreadyUsed);
        }
        let (source, dest) = match (self.fortify_source, self.fortify_dest) {
            (Some(s), Some(d)) => (s, d),
            _ => return Err(GameError::NoFortifySelection),
        };

        move_armies(&mut self.state, source, dest, count)?;
        self.state.fortify_used = true;
        self.fortify_source = None;
        self.fortify_dest = None;

        self.events.push(GameEvent::ArmiesFortified {
            from: source,
            to: dest,
            count,
        });
        Ok(FortifyReport {
            source,
            dest,
            armies_moved: count,
            source_armies: self.state.territory(source).armies,
            dest_armies: self.state.territory(dest).armies,
        })
    }

    /// Declines to fortify this turn, consuming the single allowed move.
    pub fn skip_fortify(&mut self) -> Result<(), GameError> {
        self.ensure_running()?;
        if self.state.phase != Phase::Fortify {
            return Err(GameError::PhaseMismatch {
                phase: self.state.phase,
            });
        }
        if self.state.fortify_used {
            return Err(GameError::FortifyAlreadyUsed);
        }
        self.state.fortify_used = true;
        self.fortify_source = None;
        self.fortify_dest = None;
        Ok(())
    }

    /// Advances the phase if its completion predicate holds.
    ///
    /// A still-open combat is abandoned on the way out of the attack
    /// phase; a pending conquest transfer blocks the advance.
    pub fn advance_phase(&mut self) -> Result<PhaseAdvance, GameError> {
        self.ensure_running()?;
        if let Some(combat) = self.combat.as_mut() {
            if combat.is_conquered() {
                return Err(GameError::ConquestPending);
            }
            combat.end()?;
            let attacker = combat.attacker;
            let defender = combat.defender;
            self.combat = None;
            self.events.push(GameEvent::CombatAbandoned { attacker, defender });
        }

        let advance = advance_phase(&mut self.state)?;
        self.attack_source = None;
        self.fortify_source = None;
        self.fortify_dest = None;

        self.events.push(GameEvent::PhaseAdvanced {
            from: advance.from,
            to: advance.to,
        });
        if let Some(grant) = advance.reinforcements {
            self.events.push(GameEvent::ReinforcementsGranted {
                player: self.state.current_player_id(),
                base: grant.base,
                bonus: grant.bonus,
            });
        }
        if advance.new_turn {
            self.events.push(GameEvent::TurnStarted {
                player: self.state.current_player_id(),
                turn_number: self.state.turn_number,
            });
        }
        Ok(advance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{PlayerColor, PlayerId, TerritoryState};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn players(n: usize) -> Vec<Player> {
        let names = ["alice", "bob", "carol"];
        names[..n]
            .iter()
            .enumerate()
            .map(|(i, name)| Player::new(*name, PlayerColor::default_for(i)))
            .collect()
    }

    fn new_session(n: usize) -> GameSession {
        let mut rng = SmallRng::seed_from_u64(5);
        GameSession::new(players(n), &mut rng).unwrap()
    }

    /// First territory of the player that borders an enemy. One always
    /// exists: the map is connected and nobody owns all of it here.
    fn border_territory(session: &GameSession, player: PlayerId) -> Territory {
        let state = session.state();
        state
            .territories_owned_by(player)
            .into_iter()
            .find(|t| {
                crate::map::neighbors_of(*t)
                    .iter()
                    .any(|n| state.territory(*n).owner != Some(player))
            })
            .expect("no border territory")
    }

    /// Places every starting army, then drains the first deploy pool onto
    /// a border territory, so the session sits at the start of player 0's
    /// attack phase with a usable attack stack.
    fn session_at_attack() -> GameSession {
        let mut session = new_session(2);
        while session.state().phase == Phase::InitialPlacement {
            let player = session.state().current_player_id();
            let target = border_territory(&session, player);
            session.territory_clicked(target).unwrap();
        }
        while session.state().remaining_armies[0] > 0 {
            let target = border_territory(&session, PlayerId(0));
            session.territory_clicked(target).unwrap();
        }
        session.advance_phase().unwrap();
        assert_eq!(session.state().phase, Phase::Attack);
        session
    }

    /// Finds an attack pair: a current-player territory with 2+ armies
    /// bordering an enemy territory.
    fn find_border(session: &GameSession) -> (Territory, Territory) {
        let state = session.state();
        let current = state.current_player_id();
        for from in state.territories_owned_by(current) {
            if state.territory(from).armies < 2 {
                continue;
            }
            for to in crate::map::neighbors_of(from) {
                if state.territory(*to).owner != Some(current) {
                    return (from, *to);
                }
            }
        }
        panic!("no attackable border found");
    }

    #[test]
    fn new_session_enters_initial_placement() {
        let mut session = new_session(2);
        assert_eq!(session.state().phase, Phase::InitialPlacement);
        let events = session.take_events();
        assert!(events.contains(&GameEvent::PhaseAdvanced {
            from: Phase::InitialSetup,
            to: Phase::InitialPlacement,
        }));
        // A second drain is empty.
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn clicks_are_rejected_before_the_game_starts() {
        let state = GameState::new(players(2)).unwrap();
        let mut session = GameSession::from_state(state);
        assert_eq!(
            session.territory_clicked(Territory::Japan).unwrap_err(),
            GameError::PhaseMismatch {
                phase: Phase::InitialSetup
            }
        );
    }

    #[test]
    fn placement_clicks_emit_events_and_alternate() {
        let mut session = new_session(2);
        let first = session.state().current_player_id();
        let target = session.state().territories_owned_by(first)[0];

        let outcome = session.territory_clicked(target).unwrap();
        assert!(matches!(outcome, ClickOutcome::ArmyPlaced { .. }));
        assert_eq!(session.state().current_player_index, 1);
        let events = session.take_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::ArmyPlaced { player, .. } if *player == first)));
    }

    #[test]
    fn deploy_click_places_one_army() {
        let mut session = session_at_attack();
        // Walk to the next reinforce phase for player 1.
        session.advance_phase().unwrap(); // -> Fortify (no combat started)
        session.state.fortify_used = true;
        session.advance_phase().unwrap(); // -> Reinforce, player 1
        assert_eq!(session.state().phase, Phase::Reinforce);
        let player = session.state().current_player_id();
        assert_eq!(player, PlayerId(1));

        let target = session.state().territories_owned_by(player)[0];
        let before = session.state().territory(target).armies;
        let pool = session.state().remaining_armies[player.index()];

        let outcome = session.territory_clicked(target).unwrap();
        assert_eq!(
            outcome,
            ClickOutcome::ArmiesDeployed {
                territory: target,
                remaining: pool - 1
            }
        );
        assert_eq!(session.state().territory(target).armies, before + 1);
    }

    #[test]
    fn attack_flow_select_start_exchange_conquer() {
        let mut session = session_at_attack();
        let (from, to) = find_border(&session);

        // Arm the source, then hit the target.
        assert_eq!(
            session.territory_clicked(from).unwrap(),
            ClickOutcome::AttackSourceSelected(from)
        );
        assert_eq!(
            session.territory_clicked(to).unwrap(),
            ClickOutcome::CombatStarted {
                attacker: from,
                defender: to
            }
        );
        assert!(session.combat().is_some());

        // Grind the defender to zero in one submitted exchange.
        let attacker_armies = session.state().territory(from).armies;
        let report = session
            .exchange_submitted(i64::from(attacker_armies), 0)
            .unwrap();
        assert!(report.conquered);

        let moved = 1;
        let report = session.conquest_armies_submitted(moved).unwrap();
        assert_eq!(report.territory, to);
        assert!(session.combat().is_none());
        assert_eq!(session.state().territory(to).owner, Some(PlayerId(0)));
        assert_eq!(session.state().territory(to).armies, moved);

        let events = session.take_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::TerritoryConquered { territory, .. } if *territory == to)));
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::ConquestCompleted { to: t, .. } if *t == to)));
    }

    #[test]
    fn clicking_source_again_disarms_it() {
        let mut session = session_at_attack();
        let (from, _) = find_border(&session);
        session.territory_clicked(from).unwrap();
        assert_eq!(
            session.territory_clicked(from).unwrap(),
            ClickOutcome::AttackSourceCleared
        );
        assert_eq!(session.attack_source(), None);
    }

    #[test]
    fn attacking_without_a_source_fails() {
        let mut session = session_at_attack();
        let (_, to) = find_border(&session);
        assert_eq!(
            session.territory_clicked(to).unwrap_err(),
            GameError::NoSourceSelected
        );
    }

    #[test]
    fn exchange_without_combat_fails() {
        let mut session = session_at_attack();
        assert_eq!(
            session.exchange_submitted(3, 1).unwrap_err(),
            GameError::NoActiveCombat
        );
    }

    #[test]
    fn clicks_are_ignored_while_combat_runs() {
        let mut session = session_at_attack();
        let (from, to) = find_border(&session);
        session.territory_clicked(from).unwrap();
        session.territory_clicked(to).unwrap();

        assert_eq!(
            session.territory_clicked(from).unwrap_err(),
            GameError::CombatInProgress
        );
    }

    #[test]
    fn failed_exchange_leaves_state_untouched() {
        let mut session = session_at_attack();
        let (from, to) = find_border(&session);
        session.territory_clicked(from).unwrap();
        session.territory_clicked(to).unwrap();

        let before_from = session.state().territory(from).armies;
        let before_to = session.state().territory(to).armies;
        assert_eq!(
            session.exchange_submitted(0, 0).unwrap_err(),
            GameError::AttackerMustRetainForce
        );
        assert_eq!(session.state().territory(from).armies, before_from);
        assert_eq!(session.state().territory(to).armies, before_to);
    }

    #[test]
    fn advance_blocks_on_pending_conquest() {
        let mut session = session_at_attack();
        let (from, to) = find_border(&session);
        session.territory_clicked(from).unwrap();
        session.territory_clicked(to).unwrap();
        let attacker_armies = session.state().territory(from).armies;
        session
            .exchange_submitted(i64::from(attacker_armies), 0)
            .unwrap();

        assert_eq!(
            session.advance_phase().unwrap_err(),
            GameError::ConquestPending
        );
        // Completing the transfer unblocks it.
        session.conquest_armies_submitted(1).unwrap();
        session.advance_phase().unwrap();
        assert_eq!(session.state().phase, Phase::Fortify);
    }

    #[test]
    fn advance_abandons_open_combat() {
        let mut session = session_at_attack();
        let (from, to) = find_border(&session);
        session.territory_clicked(from).unwrap();
        session.territory_clicked(to).unwrap();

        session.advance_phase().unwrap();
        assert!(session.combat().is_none());
        assert_eq!(session.state().phase, Phase::Fortify);
        let events = session.take_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::CombatAbandoned { .. })));
    }

    #[test]
    fn retreat_abandons_combat_explicitly() {
        let mut session = session_at_attack();
        let (from, to) = find_border(&session);
        session.territory_clicked(from).unwrap();
        session.territory_clicked(to).unwrap();

        session.end_combat().unwrap();
        assert!(session.combat().is_none());
        assert_eq!(session.end_combat().unwrap_err(), GameError::NoActiveCombat);
    }

    #[test]
    fn fortify_flow_moves_armies_once_per_turn() {
        // Hand-built position: alice holds an Alaska stack next to her
        // Alberta outpost; bob holds the rest.
        let mut state = GameState::new(players(2)).unwrap();
        for t in crate::map::ALL_TERRITORIES.iter() {
            *state.territory_mut(*t) = TerritoryState {
                owner: Some(PlayerId(1)),
                armies: 1,
            };
        }
        let (source, dest) = (Territory::Alaska, Territory::Alberta);
        *state.territory_mut(source) = TerritoryState {
            owner: Some(PlayerId(0)),
            armies: 6,
        };
        *state.territory_mut(dest) = TerritoryState {
            owner: Some(PlayerId(0)),
            armies: 1,
        };
        state.phase = Phase::Fortify;
        state.initial_deployment_complete = true;
        let mut session = GameSession::from_state(state);

        session.territory_clicked(source).unwrap();
        assert_eq!(
            session.territory_clicked(dest).unwrap(),
            ClickOutcome::FortifyDestinationSelected { source, dest }
        );

        let movable = session.state().territory(source).armies - 1;
        let report = session.fortify_armies_submitted(movable).unwrap();
        assert_eq!(report.armies_moved, movable);
        assert_eq!(report.source_armies, 1);
        assert!(session.state().fortify_used);

        // Second fortification in the same turn is refused.
        assert_eq!(
            session.territory_clicked(source).unwrap_err(),
            GameError::FortifyAlreadyUsed
        );
        assert_eq!(
            session.fortify_armies_submitted(1).unwrap_err(),
            GameError::FortifyAlreadyUsed
        );
    }

    #[test]
    fn fortify_submission_requires_selection() {
        let mut session = session_at_attack();
        session.advance_phase().unwrap();
        assert_eq!(
            session.fortify_armies_submitted(1).unwrap_err(),
            GameError::NoFortifySelection
        );
    }

    #[test]
    fn fortify_rejects_unreachable_destination() {
        // Split position: alice's Japan stack cannot reach her Brazil
        // across bob's territory.
        let mut state = GameState::new(players(2)).unwrap();
        for t in crate::map::ALL_TERRITORIES.iter() {
            *state.territory_mut(*t) = TerritoryState {
                owner: Some(PlayerId(1)),
                armies: 1,
            };
        }
        *state.territory_mut(Territory::Japan) = TerritoryState {
            owner: Some(PlayerId(0)),
            armies: 5,
        };
        *state.territory_mut(Territory::Brazil) = TerritoryState {
            owner: Some(PlayerId(0)),
            armies: 1,
        };
        state.phase = Phase::Fortify;
        state.initial_deployment_complete = true;
        let mut session = GameSession::from_state(state);

        session.territory_clicked(Territory::Japan).unwrap();
        assert_eq!(
            session.territory_clicked(Territory::Brazil).unwrap_err(),
            GameError::NotConnected
        );
    }

    #[test]
    fn conquering_the_last_territory_wins_the_game() {
        // Two players; bob holds only Kamchatka with 1 army.
        let mut state = GameState::new(players(2)).unwrap();
        for t in crate::map::ALL_TERRITORIES.iter() {
            *state.territory_mut(*t) = TerritoryState {
                owner: Some(PlayerId(0)),
                armies: 3,
            };
        }
        *state.territory_mut(Territory::Kamchatka) = TerritoryState {
            owner: Some(PlayerId(1)),
            armies: 1,
        };
        state.phase = Phase::Attack;
        state.initial_deployment_complete = true;
        let mut session = GameSession::from_state(state);

        session.territory_clicked(Territory::Alaska).unwrap();
        session.territory_clicked(Territory::Kamchatka).unwrap();
        session.exchange_submitted(3, 0).unwrap();
        session.conquest_armies_submitted(2).unwrap();

        assert_eq!(session.state().phase, Phase::GameOver);
        let events = session.take_events();
        assert!(events.contains(&GameEvent::PlayerEliminated { player: PlayerId(1) }));
        assert!(events.contains(&GameEvent::GameWon { player: PlayerId(0) }));

        // Everything is refused after the game ends.
        assert_eq!(
            session.territory_clicked(Territory::Alaska).unwrap_err(),
            GameError::GameOver
        );
        assert_eq!(session.advance_phase().unwrap_err(), GameError::GameOver);
    }

    #[test]
    fn snapshot_roundtrip_resumes_play() {
        let session = session_at_attack();
        let snapshot = session.snapshot();
        let restored = GameSession::restore(&snapshot).unwrap();
        assert_eq!(restored.state(), session.state());
        assert!(restored.combat().is_none());
    }
}
