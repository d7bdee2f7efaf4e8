//! Deterministic minigame simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Explicit ticks driven by the host loop
//! - Seeded RNG only
//! - No rendering, scheduling, or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{circles_touch, resolve_collisions};
pub use state::{Block, BlockKind, Direction, GameEvent, GamePhase, GameState};
pub use tick::{skip_level, spawn_if_due, tick};
