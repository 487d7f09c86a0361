//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One `tick` call per frame, driven from outside
//! - Randomness only through the injected `Dice`
//! - Stable iteration order (creation order for every entity list)
//! - No rendering or platform dependencies

pub mod collision;
pub mod compact;
pub mod rng;
pub mod state;
pub mod tick;

pub use collision::{Rect, overlap};
pub use compact::compact;
pub use rng::{Dice, ScriptedDice, seeded};
pub use state::{Arena, Enemy, GamePhase, GameState, Laser, Player, SpriteSize};
pub use tick::{TickInput, TickOutcome, TickResult, tick};
