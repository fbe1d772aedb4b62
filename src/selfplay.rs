//! Random self-play game generation.
//!
//! Plays complete games by feeding the session random legal actions:
//! random placement and deployment targets, random attack pairs with
//! randomly arbitrated exchange outcomes, random conquest transfers and
//! fortifications. Used to soak-test the rules core (armies conservation
//! and ownership invariants are asserted after every action) and to
//! benchmark full playouts.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::event::GameEvent;
use crate::game::{Phase, Player, PlayerColor};
use crate::map::{neighbors_of, Territory};
use crate::session::GameSession;
use crate::turn::fortify::reachable_owned;
use crate::turn::reinforce::initial_armies;

/// Configuration for self-play game generation.
#[derive(Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Players per game (2-6).
    pub players: usize,
    /// Turn cap: games still running after this many turns are draws.
    pub max_turns: u32,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            players: 4,
            max_turns: 200,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// Final standing of one player in a finished game.
#[derive(Clone, Serialize)]
pub struct PlayerStanding {
    pub name: String,
    pub territories: usize,
    pub armies: u64,
    pub eliminated: bool,
}

/// A complete self-play game record.
#[derive(Clone, Serialize)]
pub struct GameRecord {
    /// Sequential game ID.
    pub game_id: usize,
    /// The winning player's name, or None for a turn-capped draw.
    pub winner: Option<String>,
    /// Turn count when the game ended.
    pub turns: u32,
    /// Total exchange rounds resolved.
    pub exchanges: u64,
    /// Total conquests completed.
    pub conquests: u64,
    /// Players eliminated during the game.
    pub eliminations: u64,
    pub standings: Vec<PlayerStanding>,
}

/// Running totals drained from the event queue.
#[derive(Default)]
struct Tally {
    exchanges: u64,
    conquests: u64,
    eliminations: u64,
    winner: Option<String>,
    /// Expected army total: starts at the initial pools, grows with
    /// reinforcement grants, shrinks with combat losses.
    expected_armies: u64,
}

impl Tally {
    fn absorb(&mut self, session: &GameSession, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::ExchangeResolved {
                    attacker_losses,
                    defender_losses,
                    ..
                } => {
                    self.exchanges += 1;
                    self.expected_armies -=
                        u64::from(*attacker_losses) + u64::from(*defender_losses);
                }
                GameEvent::ReinforcementsGranted { base, bonus, .. } => {
                    self.expected_armies += u64::from(base + bonus);
                }
                GameEvent::ConquestCompleted { .. } => self.conquests += 1,
                GameEvent::PlayerEliminated { player } => {
                    self.eliminations += 1;
                    debug_assert!(!session.state().players[player.index()].is_active());
                }
                GameEvent::GameWon { player } => {
                    self.winner =
                        Some(session.state().players[player.index()].name.clone());
                }
                _ => {}
            }
        }
    }
}

/// Asserts the core invariants: armies are conserved, and every owned
/// territory keeps at least one army except a conquered territory whose
/// transfer is still pending.
fn check_invariants(session: &GameSession, tally: &Tally) {
    let state = session.state();
    assert_eq!(
        state.total_armies(),
        tally.expected_armies,
        "armies appeared or vanished outside deployment and combat"
    );

    let pending = session
        .combat()
        .filter(|c| c.is_conquered())
        .map(|c| c.defender);
    for t in crate::map::ALL_TERRITORIES.iter() {
        let record = state.territory(*t);
        if record.owner.is_some() && record.armies == 0 {
            assert_eq!(
                pending,
                Some(*t),
                "owned territory {} has no armies and no pending conquest",
                t.id()
            );
        }
    }
}

/// Enemy-bordering attack pairs for the current player: owned territory
/// with 2+ armies next to a territory someone else holds.
fn attack_pairs(session: &GameSession) -> Vec<(Territory, Territory)> {
    let state = session.state();
    let current = state.current_player_id();
    let mut pairs = Vec::new();
    for from in state.territories_owned_by(current) {
        if state.territory(from).armies < 2 {
            continue;
        }
        for to in neighbors_of(from) {
            if state.territory(*to).owner != Some(current) {
                pairs.push((from, *to));
            }
        }
    }
    pairs
}

/// Plays the randomly arbitrated exchanges of one combat to its end.
fn fight(session: &mut GameSession, from: Territory, to: Territory, rng: &mut SmallRng) {
    loop {
        let attacker = session.state().territory(from).armies;
        let defender = session.state().territory(to).armies;

        let mut attacker_remaining = rng.gen_range(1..=attacker);
        let mut defender_remaining = rng.gen_range(0..=defender);
        // Force progress: a no-loss exchange could repeat forever.
        if attacker_remaining == attacker && defender_remaining == defender {
            defender_remaining -= 1;
        }
        // A conquering exchange must keep an army to move in.
        if defender_remaining == 0 && attacker_remaining < 2 {
            attacker_remaining = 2;
        }

        let report = session
            .exchange_submitted(i64::from(attacker_remaining), i64::from(defender_remaining))
            .expect("arbitrated exchange was rejected");

        if report.conquered {
            let movable = session.state().territory(from).armies - 1;
            session
                .conquest_armies_submitted(rng.gen_range(1..=movable))
                .expect("conquest transfer was rejected");
            return;
        }
        if !report.can_continue {
            return;
        }
        if rng.gen_bool(0.3) {
            session.end_combat().expect("retreat was rejected");
            return;
        }
    }
}

/// Performs one random fortification, or declines it.
fn fortify_randomly(session: &mut GameSession, rng: &mut SmallRng) {
    let state = session.state();
    let current = state.current_player_id();
    let sources: Vec<Territory> = state
        .territories_owned_by(current)
        .into_iter()
        .filter(|t| state.territory(*t).armies >= 2 && !reachable_owned(state, *t).is_empty())
        .collect();

    if sources.is_empty() || rng.gen_bool(0.5) {
        session.skip_fortify().expect("skip was rejected");
        return;
    }

    let source = *sources.choose(rng).unwrap();
    let dest = *reachable_owned(session.state(), source).choose(rng).unwrap();
    let movable = session.state().territory(source).armies - 1;
    session
        .territory_clicked(source)
        .expect("fortify source click was rejected");
    session
        .territory_clicked(dest)
        .expect("fortify destination click was rejected");
    session
        .fortify_armies_submitted(rng.gen_range(1..=movable))
        .expect("fortify transfer was rejected");
}

/// Plays one full random game.
pub fn play_game(config: &SelfPlayConfig, game_id: usize, rng: &mut SmallRng) -> GameRecord {
    let players: Vec<Player> = (0..config.players)
        .map(|i| Player::new(format!("player-{}", i + 1), PlayerColor::default_for(i)))
        .collect();

    let mut session =
        GameSession::new(players, rng).expect("self-play player roster was rejected");
    let mut tally = Tally {
        expected_armies: config.players as u64 * u64::from(initial_armies(config.players)),
        ..Tally::default()
    };

    loop {
        let events = session.take_events();
        tally.absorb(&session, &events);
        check_invariants(&session, &tally);

        let state = session.state();
        if state.phase == Phase::GameOver || state.turn_number > config.max_turns {
            break;
        }

        match state.phase {
            Phase::InitialPlacement | Phase::Deploy | Phase::Reinforce => {
                let current = state.current_player_id();
                let target = *state
                    .territories_owned_by(current)
                    .choose(rng)
                    .expect("current player owns no territory");
                if state.phase != Phase::InitialPlacement
                    && state.remaining_armies[current.index()] == 0
                {
                    session.advance_phase().expect("deploy advance was rejected");
                } else {
                    session
                        .territory_clicked(target)
                        .expect("deployment click was rejected");
                }
            }
            Phase::Attack => {
                let pairs = attack_pairs(&session);
                if pairs.is_empty() || rng.gen_bool(0.25) {
                    session.advance_phase().expect("attack advance was rejected");
                } else {
                    let (from, to) = *pairs.choose(rng).unwrap();
                    session
                        .territory_clicked(from)
                        .expect("attack source click was rejected");
                    session
                        .territory_clicked(to)
                        .expect("attack target click was rejected");
                    fight(&mut session, from, to, rng);
                }
            }
            Phase::Fortify => {
                if !state.fortify_used {
                    fortify_randomly(&mut session, rng);
                }
                session
                    .advance_phase()
                    .expect("fortify advance was rejected");
            }
            Phase::InitialSetup | Phase::GameOver => unreachable!(),
        }
    }

    let events = session.take_events();
    tally.absorb(&session, &events);

    let state = session.state();
    let standings = state
        .players
        .iter()
        .enumerate()
        .map(|(i, p)| PlayerStanding {
            name: p.name.clone(),
            territories: state.count_owned(crate::game::PlayerId(i as u8)),
            armies: state
                .territories
                .iter()
                .filter(|t| t.owner == Some(crate::game::PlayerId(i as u8)))
                .map(|t| u64::from(t.armies))
                .sum(),
            eliminated: !p.is_active(),
        })
        .collect();

    GameRecord {
        game_id,
        winner: tally.winner,
        turns: state.turn_number,
        exchanges: tally.exchanges,
        conquests: tally.conquests,
        eliminations: tally.eliminations,
        standings,
    }
}

/// Runs self-play generation, producing multiple game records.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_self_play(config: &SelfPlayConfig) -> Vec<GameRecord> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| {
        games.push(game);
    });
    games
}

/// Runs self-play generation, calling `on_game` with each completed game.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    if config.threads > 1 {
        run_self_play_parallel(config, on_game);
    } else {
        run_self_play_sequential(config, on_game);
    }
}

/// Sequential self-play: plays games one at a time.
fn run_self_play_sequential<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord),
{
    let mut rng = if config.seed != 0 {
        SmallRng::seed_from_u64(config.seed)
    } else {
        SmallRng::from_entropy()
    };

    for i in 0..config.num_games {
        let game_start = Instant::now();
        let game = play_game(config, i, &mut rng);
        if !config.quiet {
            report_game(&game, i, config.num_games, game_start);
        }
        on_game(game);
    }
}

/// Parallel self-play: plays games concurrently using rayon.
/// Uses a channel to deliver completed games to the callback from worker
/// threads.
fn run_self_play_parallel<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<GameRecord>();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
        .expect("failed to build rayon thread pool");

    let config_clone = config.clone();
    let handle = std::thread::spawn(move || {
        pool.install(|| {
            (0..config_clone.num_games)
                .into_par_iter()
                .for_each_with(tx, |tx, i| {
                    let mut rng = if config_clone.seed != 0 {
                        SmallRng::seed_from_u64(config_clone.seed.wrapping_add(i as u64))
                    } else {
                        SmallRng::from_entropy()
                    };
                    let game_start = Instant::now();
                    let game = play_game(&config_clone, i, &mut rng);
                    if !config_clone.quiet {
                        let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        report_game(&game, n - 1, config_clone.num_games, game_start);
                    }
                    let _ = tx.send(game);
                });
        });
    });

    for game in rx {
        on_game(game);
    }

    handle.join().expect("self-play worker thread panicked");
}

/// Prints one line of per-game progress to stderr.
fn report_game(game: &GameRecord, index: usize, total: usize, started: Instant) {
    let outcome = match &game.winner {
        Some(name) => format!("{} wins", name),
        None => "draw".to_string(),
    };
    eprintln!(
        "Game {}/{}: {} after {} turns, {} exchanges ({:.1}s)",
        index + 1,
        total,
        outcome,
        game.turns,
        game.exchanges,
        started.elapsed().as_secs_f64(),
    );
}

/// Prints a win-distribution summary to stderr.
pub fn print_summary(games: &[GameRecord]) {
    let total = games.len();
    let decided = games.iter().filter(|g| g.winner.is_some()).count();
    eprintln!("=== Self-Play Summary ===");
    eprintln!("Games: {}", total);
    eprintln!("Decided: {}", decided);
    eprintln!("Draws (turn cap): {}", total - decided);

    let mut wins: Vec<(String, usize)> = Vec::new();
    for game in games {
        if let Some(winner) = &game.winner {
            match wins.iter_mut().find(|(name, _)| name == winner) {
                Some((_, count)) => *count += 1,
                None => wins.push((winner.clone(), 1)),
            }
        }
    }
    wins.sort_by(|a, b| b.1.cmp(&a.1));
    eprintln!("Win distribution:");
    for (name, count) in &wins {
        eprintln!("  {}: {}", name, count);
    }
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        let json = serde_json::to_string(game).expect("game record serialization failed");
        writeln!(out, "{}", json)?;
    }
    out.flush()
}
