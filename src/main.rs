//! Hegemon -- a territorial conquest engine speaking the CCP protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout,
//! following the CCP (Conquest Command Protocol) convention.

use std::io::{self, BufRead};

use hegemon::engine::Engine;
use hegemon::protocol::parser::{parse_command, Command};

/// Runs the main CCP protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Ccp => {
                engine.handle_ccp(&mut out);
            }
            Command::IsReady => {
                engine.handle_isready(&mut out);
            }
            Command::SetOption { name, value } => {
                engine.set_option(name, value);
            }
            Command::NewGame { players } => {
                engine.handle_newgame(&mut out, &players);
            }
            Command::Click { territory } => {
                engine.handle_click(&mut out, &territory);
            }
            Command::Exchange {
                attacker_remaining,
                defender_remaining,
            } => {
                engine.handle_exchange(&mut out, attacker_remaining, defender_remaining);
            }
            Command::Conquest { armies } => {
                engine.handle_conquest(&mut out, armies);
            }
            Command::Fortify { armies } => {
                engine.handle_fortify(&mut out, armies);
            }
            Command::Skip => {
                engine.handle_skip(&mut out);
            }
            Command::Retreat => {
                engine.handle_retreat(&mut out);
            }
            Command::Advance => {
                engine.handle_advance(&mut out);
            }
            Command::State => {
                engine.handle_state(&mut out);
            }
            Command::Load { json } => {
                engine.handle_load(&mut out, &json);
            }
            Command::Quit => {
                break;
            }
        }
    }
}
