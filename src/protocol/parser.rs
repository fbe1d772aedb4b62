//! CCP command parser.
//!
//! Parses incoming CCP protocol commands from raw text into structured
//! `Command` variants that the engine main loop can dispatch on.
//! Territory ids are passed through as strings: an unknown id is a game
//! validation error reported on stdout, not a parse failure.

use crate::game::PlayerColor;

/// One player entry in a `newgame` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSpec {
    pub name: String,
    /// Chosen color, or None to take the default for the seat.
    pub color: Option<PlayerColor>,
}

/// A parsed server-to-engine CCP command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Initialize the CCP protocol handshake.
    Ccp,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Start a new game: `newgame <name>[:<color>] <name>[:<color>] ...`.
    NewGame { players: Vec<PlayerSpec> },

    /// A territory click: `click <territory-id>`.
    Click { territory: String },

    /// Submit an exchange: `exchange <attacker-remaining> <defender-remaining>`.
    Exchange {
        attacker_remaining: i64,
        defender_remaining: i64,
    },

    /// Complete a conquest: `conquest <armies>`.
    Conquest { armies: u32 },

    /// Apply the pending fortification: `fortify <armies>`.
    Fortify { armies: u32 },

    /// Decline to fortify this turn.
    Skip,

    /// Abandon the active combat.
    Retreat,

    /// Request a phase advance.
    Advance,

    /// Emit the game-state snapshot as one line of JSON.
    State,

    /// Restore a game from a snapshot: `load <json>`.
    Load { json: String },

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging to stderr.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }

    match tokens[0] {
        "ccp" => Some(Command::Ccp),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "advance" => Some(Command::Advance),
        "retreat" => Some(Command::Retreat),
        "skip" => Some(Command::Skip),
        "state" => Some(Command::State),

        "setoption" => parse_setoption(&tokens),
        "newgame" => parse_newgame(&tokens),
        "click" => parse_click(&tokens),
        "exchange" => parse_exchange(&tokens),
        "conquest" => parse_count(&tokens, "conquest").map(|armies| Command::Conquest { armies }),
        "fortify" => parse_count(&tokens, "fortify").map(|armies| Command::Fortify { armies }),
        "load" => parse_load(trimmed),

        other => {
            eprintln!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        eprintln!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");
    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                eprintln!("malformed setoption: empty name");
                return None;
            }
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name_parts.join(" "), value)
        }
        None => (tokens[2..].join(" "), None),
    };

    Some(Command::SetOption { name, value })
}

/// Parses `newgame <name>[:<color>] ...`.
fn parse_newgame(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        eprintln!("malformed newgame: expected 'newgame <name>[:<color>] ...'");
        return None;
    }

    let mut players = Vec::with_capacity(tokens.len() - 1);
    for spec in &tokens[1..] {
        let (name, color) = match spec.split_once(':') {
            Some((name, color_name)) => match PlayerColor::from_name(color_name) {
                Some(color) => (name, Some(color)),
                None => {
                    eprintln!("malformed newgame: unknown color '{}'", color_name);
                    return None;
                }
            },
            None => (*spec, None),
        };
        if name.is_empty() {
            eprintln!("malformed newgame: empty player name");
            return None;
        }
        players.push(PlayerSpec {
            name: name.to_string(),
            color,
        });
    }

    Some(Command::NewGame { players })
}

/// Parses `click <territory-id>`.
fn parse_click(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 2 {
        eprintln!("malformed click: expected 'click <territory-id>'");
        return None;
    }
    Some(Command::Click {
        territory: tokens[1].to_string(),
    })
}

/// Parses `exchange <attacker-remaining> <defender-remaining>`.
///
/// The counts are signed so that negative input reaches the rules core
/// and is rejected there with a proper error kind.
fn parse_exchange(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 3 {
        eprintln!("malformed exchange: expected 'exchange <attacker> <defender>'");
        return None;
    }
    let attacker_remaining = match tokens[1].parse() {
        Ok(n) => n,
        Err(_) => {
            eprintln!("malformed exchange: invalid number '{}'", tokens[1]);
            return None;
        }
    };
    let defender_remaining = match tokens[2].parse() {
        Ok(n) => n,
        Err(_) => {
            eprintln!("malformed exchange: invalid number '{}'", tokens[2]);
            return None;
        }
    };
    Some(Command::Exchange {
        attacker_remaining,
        defender_remaining,
    })
}

/// Parses a single unsigned army-count argument.
fn parse_count(tokens: &[&str], command: &str) -> Option<u32> {
    if tokens.len() != 2 {
        eprintln!("malformed {}: expected '{} <armies>'", command, command);
        return None;
    }
    match tokens[1].parse() {
        Ok(n) => Some(n),
        Err(_) => {
            eprintln!("malformed {}: invalid number '{}'", command, tokens[1]);
            None
        }
    }
}

/// Parses `load <json>`: everything after the keyword is the payload.
fn parse_load(line: &str) -> Option<Command> {
    let json = line["load".len()..].trim();
    if json.is_empty() {
        eprintln!("malformed load: expected 'load <json>'");
        return None;
    }
    Some(Command::Load {
        json: json.to_string(),
    })
}
