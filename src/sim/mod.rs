//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One call to `tick` per frame
//! - Seeded RNG only
//! - Side effects are returned as events, never performed
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Outcome, evaluate, is_miss, overlaps};
pub use state::{Entity, GameEvent, GameMode, GameState, RoundState, SoundCue, Variant};
pub use tick::{KeyPress, TickInput, tick};
