//! Combat resolution.
//!
//! The resolver is a pure function over proposed army counts; the session
//! wraps one attacker/defender pair and commits resolved exchanges to the
//! game state. Combat uses direct army input: the caller supplies the
//! desired remaining count for each side instead of rolling dice.

pub mod resolver;
pub mod session;

pub use resolver::{resolve_exchange, ExchangeOutcome};
pub use session::{BattleRound, CombatSession, CombatState, ConquestReport, ExchangeReport};
