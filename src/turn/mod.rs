//! Per-turn rules: reinforcement, fortification, and phase sequencing.

pub mod fortify;
pub mod phase;
pub mod reinforce;

pub use fortify::{has_fortify_move, move_armies, reachable_owned};
pub use phase::{advance_phase, phase_complete, place_initial_army, PhaseAdvance, PlacementReport};
pub use reinforce::{calculate_reinforcements, initial_armies, ReinforcementGrant};
