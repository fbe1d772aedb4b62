//! Engine state management.
//!
//! Holds the live game session and engine options, and turns parsed CCP
//! commands into response lines. Mutating commands reply `ok ...` or
//! `error <kind> <message>`; events raised by the rules core are flushed
//! as `event ...` lines before the result.

use std::collections::HashMap;
use std::io::Write;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::error::GameError;
use crate::event::GameEvent;
use crate::game::{GameState, Player, PlayerColor, Snapshot};
use crate::map::Territory;
use crate::protocol::parser::PlayerSpec;
use crate::session::{ClickOutcome, GameSession};

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub session: Option<GameSession>,
    pub options: HashMap<String, String>,
    rng: SmallRng,
}

impl Engine {
    /// Creates a new engine with no game in progress.
    pub fn new() -> Self {
        Engine {
            session: None,
            options: HashMap::new(),
            rng: SmallRng::from_entropy(),
        }
    }

    /// Sets an engine option. A non-zero `Seed` reseeds the RNG used for
    /// territory assignment, making `newgame` deterministic.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        if name == "Seed" {
            let seed = value
                .as_deref()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(0);
            if seed != 0 {
                self.rng = SmallRng::seed_from_u64(seed);
            }
        }
        self.options.insert(name, value.unwrap_or_default());
    }

    /// Handles the CCP handshake: writes id, options, protocol_version,
    /// and ccpok.
    pub fn handle_ccp<W: Write>(&self, out: &mut W) {
        writeln!(out, "id name hegemon").unwrap();
        writeln!(out, "id author hegemon").unwrap();
        writeln!(
            out,
            "option name Seed type spin default 0 min 0 max 4294967295"
        )
        .unwrap();
        writeln!(out, "protocol_version 1").unwrap();
        writeln!(out, "ccpok").unwrap();
        out.flush().unwrap();
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) {
        writeln!(out, "readyok").unwrap();
        out.flush().unwrap();
    }

    /// Handles `newgame`, replacing any running game.
    pub fn handle_newgame<W: Write>(&mut self, out: &mut W, specs: &[PlayerSpec]) {
        let players: Vec<Player> = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                Player::new(
                    spec.name.clone(),
                    spec.color.unwrap_or_else(|| PlayerColor::default_for(i)),
                )
            })
            .collect();

        match GameSession::new(players, &mut self.rng) {
            Ok(session) => {
                self.session = Some(session);
                self.flush_events(out);
                let state = self.session.as_ref().unwrap().state();
                writeln!(
                    out,
                    "ok newgame players={} phase={}",
                    state.players.len(),
                    state.phase
                )
                .unwrap();
            }
            Err(e) => write_error(out, &e),
        }
        out.flush().unwrap();
    }

    /// Handles `click <territory-id>`.
    pub fn handle_click<W: Write>(&mut self, out: &mut W, territory: &str) {
        let Some(session) = self.session.as_mut() else {
            write_error(out, &GameError::NotInGame);
            out.flush().unwrap();
            return;
        };
        let Some(territory) = Territory::from_id(territory) else {
            write_error(out, &GameError::UnknownTerritory(territory.to_string()));
            out.flush().unwrap();
            return;
        };

        match session.territory_clicked(territory) {
            Ok(outcome) => {
                self.flush_events(out);
                write_click_outcome(out, outcome);
            }
            Err(e) => write_error(out, &e),
        }
        out.flush().unwrap();
    }

    /// Handles `exchange <attacker-remaining> <defender-remaining>`.
    pub fn handle_exchange<W: Write>(
        &mut self,
        out: &mut W,
        attacker_remaining: i64,
        defender_remaining: i64,
    ) {
        let Some(session) = self.session.as_mut() else {
            write_error(out, &GameError::NotInGame);
            out.flush().unwrap();
            return;
        };
        match session.exchange_submitted(attacker_remaining, defender_remaining) {
            Ok(report) => {
                self.flush_events(out);
                writeln!(
                    out,
                    "ok exchange round={} attacker-losses={} defender-losses={} conquered={} continue={}",
                    report.round,
                    report.attacker_losses,
                    report.defender_losses,
                    report.conquered,
                    report.can_continue
                )
                .unwrap();
            }
            Err(e) => write_error(out, &e),
        }
        out.flush().unwrap();
    }

    /// Handles `conquest <armies>`.
    pub fn handle_conquest<W: Write>(&mut self, out: &mut W, armies: u32) {
        let Some(session) = self.session.as_mut() else {
            write_error(out, &GameError::NotInGame);
            out.flush().unwrap();
            return;
        };
        match session.conquest_armies_submitted(armies) {
            Ok(report) => {
                self.flush_events(out);
                writeln!(
                    out,
                    "ok conquest {} moved={}",
                    report.territory.id(),
                    report.armies_moved
                )
                .unwrap();
            }
            Err(e) => write_error(out, &e),
        }
        out.flush().unwrap();
    }

    /// Handles `fortify <armies>`.
    pub fn handle_fortify<W: Write>(&mut self, out: &mut W, armies: u32) {
        let Some(session) = self.session.as_mut() else {
            write_error(out, &GameError::NotInGame);
            out.flush().unwrap();
            return;
        };
        match session.fortify_armies_submitted(armies) {
            Ok(report) => {
                self.flush_events(out);
                writeln!(
                    out,
                    "ok fortify {} {} moved={}",
                    report.source.id(),
                    report.dest.id(),
                    report.armies_moved
                )
                .unwrap();
            }
            Err(e) => write_error(out, &e),
        }
        out.flush().unwrap();
    }

    /// Handles `skip` (decline fortification).
    pub fn handle_skip<W: Write>(&mut self, out: &mut W) {
        let Some(session) = self.session.as_mut() else {
            write_error(out, &GameError::NotInGame);
            out.flush().unwrap();
            return;
        };
        match session.skip_fortify() {
            Ok(()) => writeln!(out, "ok skip").unwrap(),
            Err(e) => write_error(out, &e),
        }
        out.flush().unwrap();
    }

    /// Handles `retreat` (abandon the active combat).
    pub fn handle_retreat<W: Write>(&mut self, out: &mut W) {
        let Some(session) = self.session.as_mut() else {
            write_error(out, &GameError::NotInGame);
            out.flush().unwrap();
            return;
        };
        match session.end_combat() {
            Ok(()) => {
                self.flush_events(out);
                writeln!(out, "ok retreat").unwrap();
            }
            Err(e) => write_error(out, &e),
        }
        out.flush().unwrap();
    }

    /// Handles `advance`.
    pub fn handle_advance<W: Write>(&mut self, out: &mut W) {
        let Some(session) = self.session.as_mut() else {
            write_error(out, &GameError::NotInGame);
            out.flush().unwrap();
            return;
        };
        match session.advance_phase() {
            Ok(advance) => {
                self.flush_events(out);
                writeln!(out, "ok advance phase={}", advance.to).unwrap();
            }
            Err(e) => write_error(out, &e),
        }
        out.flush().unwrap();
    }

    /// Handles `state`: one line of snapshot JSON.
    pub fn handle_state<W: Write>(&self, out: &mut W) {
        match &self.session {
            Some(session) => {
                let snapshot = session.snapshot();
                let json = serde_json::to_string(&snapshot).unwrap();
                writeln!(out, "state {}", json).unwrap();
            }
            None => write_error(out, &GameError::NotInGame),
        }
        out.flush().unwrap();
    }

    /// Handles `load <json>`, replacing any running game on success.
    pub fn handle_load<W: Write>(&mut self, out: &mut W, json: &str) {
        let snapshot: Snapshot = match serde_json::from_str(json) {
            Ok(s) => s,
            Err(e) => {
                writeln!(out, "error InvalidSnapshot {}", e).unwrap();
                out.flush().unwrap();
                return;
            }
        };
        match GameSession::restore(&snapshot) {
            Ok(session) => {
                let (players, phase) = {
                    let state = session.state();
                    (state.players.len(), state.phase)
                };
                self.session = Some(session);
                writeln!(out, "ok load players={} phase={}", players, phase).unwrap();
            }
            Err(e) => writeln!(out, "error InvalidSnapshot {}", e).unwrap(),
        }
        out.flush().unwrap();
    }

    /// Drains the session's event queue and writes each as an `event` line.
    fn flush_events<W: Write>(&mut self, out: &mut W) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let events = session.take_events();
        let state = session.state();
        for event in &events {
            writeln!(out, "event {}", format_event(state, event)).unwrap();
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

/// Writes an `error <kind> <message>` line.
fn write_error<W: Write>(out: &mut W, error: &GameError) {
    writeln!(out, "error {} {}", error.kind(), error).unwrap();
}

/// Writes the `ok` line for a click outcome.
fn write_click_outcome<W: Write>(out: &mut W, outcome: ClickOutcome) {
    match outcome {
        ClickOutcome::ArmyPlaced {
            territory,
            remaining,
            ..
        } => writeln!(out, "ok placed {} remaining={}", territory.id(), remaining).unwrap(),
        ClickOutcome::ArmiesDeployed {
            territory,
            remaining,
        } => writeln!(out, "ok deployed {} remaining={}", territory.id(), remaining).unwrap(),
        ClickOutcome::AttackSourceSelected(t) => {
            writeln!(out, "ok source {}", t.id()).unwrap()
        }
        ClickOutcome::AttackSourceCleared => writeln!(out, "ok source cleared").unwrap(),
        ClickOutcome::CombatStarted { attacker, defender } => {
            writeln!(out, "ok combat {} {}", attacker.id(), defender.id()).unwrap()
        }
        ClickOutcome::FortifySourceSelected(t) => {
            writeln!(out, "ok fortify-source {}", t.id()).unwrap()
        }
        ClickOutcome::FortifyDestinationSelected { source, dest } => {
            writeln!(out, "ok fortify-target {} {}", source.id(), dest.id()).unwrap()
        }
        ClickOutcome::FortifySelectionCleared => {
            writeln!(out, "ok fortify-source cleared").unwrap()
        }
    }
}

/// Returns the display name of a player.
fn player_name(state: &GameState, player: crate::game::PlayerId) -> &str {
    &state.players[player.index()].name
}

/// Formats one event as the payload of an `event` line.
fn format_event(state: &GameState, event: &GameEvent) -> String {
    match event {
        GameEvent::ArmyPlaced {
            player,
            territory,
            remaining,
        } => format!(
            "placed {} {} remaining={}",
            player_name(state, *player),
            territory.id(),
            remaining
        ),
        GameEvent::ArmiesDeployed {
            player,
            territory,
            count,
            remaining,
        } => format!(
            "deployed {} {} count={} remaining={}",
            player_name(state, *player),
            territory.id(),
            count,
            remaining
        ),
        GameEvent::ReinforcementsGranted {
            player,
            base,
            bonus,
        } => format!(
            "reinforcements {} base={} bonus={}",
            player_name(state, *player),
            base,
            bonus
        ),
        GameEvent::PhaseAdvanced { from, to } => format!("phase {} {}", from, to),
        GameEvent::TurnStarted {
            player,
            turn_number,
        } => format!("turn {} number={}", player_name(state, *player), turn_number),
        GameEvent::CombatStarted { attacker, defender } => {
            format!("combat {} {}", attacker.id(), defender.id())
        }
        GameEvent::ExchangeResolved {
            attacker,
            defender,
            round,
            attacker_losses,
            defender_losses,
        } => format!(
            "exchange {} {} round={} attacker-losses={} defender-losses={}",
            attacker.id(),
            defender.id(),
            round,
            attacker_losses,
            defender_losses
        ),
        GameEvent::TerritoryConquered {
            territory,
            conqueror,
            ..
        } => format!(
            "conquered {} by {}",
            territory.id(),
            player_name(state, *conqueror)
        ),
        GameEvent::ConquestCompleted {
            from,
            to,
            armies_moved,
        } => format!("occupied {} from {} armies={}", to.id(), from.id(), armies_moved),
        GameEvent::CombatAbandoned { attacker, defender } => {
            format!("retreat {} {}", attacker.id(), defender.id())
        }
        GameEvent::ArmiesFortified { from, to, count } => {
            format!("fortified {} {} count={}", from.id(), to.id(), count)
        }
        GameEvent::PlayerEliminated { player } => {
            format!("eliminated {}", player_name(state, *player))
        }
        GameEvent::GameWon { player } => format!("victory {}", player_name(state, *player)),
    }
}
