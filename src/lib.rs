//! Beacon Guardian - arcade minigame plus a mock blockchain radar
//!
//! Core modules:
//! - `sim`: Deterministic minigame simulation (beacon, homing blocks, scoring)
//! - `radar`: Signal feed simulator and mock ledger records
//! - `renderer`: WebGPU rendering pipeline
//! - `highscores`: Persisted best-run score
//! - `settings`: Persisted preferences (radar filter, HUD)

pub mod highscores;
pub mod radar;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::HighScore;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal frame timestep (60 Hz reference for headless drivers)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Playfield dimensions (square, logical units)
    pub const GAME_SIZE: f32 = 400.0;

    /// Beacon defaults
    pub const BEACON_RADIUS: f32 = 10.0;
    /// Distance moved per directional input event
    pub const BEACON_STEP: f32 = 10.0;

    /// Block defaults
    pub const BLOCK_RADIUS: f32 = 10.0;
    /// Maximum live blocks at any spawn attempt
    pub const MAX_BLOCKS: usize = 10;
    /// Kind draw threshold (uniform draw above this is Good, 70/30)
    pub const BAD_BLOCK_CHANCE: f32 = 0.3;

    /// Homing speed at level 1 (units per second)
    pub const INITIAL_SPEED: f32 = 2.0;
    /// Speed gained per level
    pub const SPEED_STEP: f32 = 0.5;

    /// Spawn cadence at level 1
    pub const SPAWN_INTERVAL_START_MS: f32 = 1500.0;
    /// Spawn cadence reduction per level
    pub const SPAWN_INTERVAL_STEP_MS: f32 = 100.0;
    /// Spawn cadence floor
    pub const SPAWN_INTERVAL_MIN_MS: f32 = 300.0;

    /// Score that must be exceeded to earn a level (level * this)
    pub const LEVEL_SCORE_STEP: u32 = 10;
    /// Score granted by an explicit level skip
    pub const SKIP_LEVEL_BONUS: u32 = 10;

    /// Radar display dimensions (square, logical units)
    pub const RADAR_SIZE: f32 = 400.0;
    /// Fraction of the radar radius the signal spread covers
    pub const RADAR_SPREAD: f32 = 0.8;
    /// Rendered signal dot radius
    pub const SIGNAL_DOT_RADIUS: f32 = 5.0;
    /// Feed refresh cadence (independent of the frame loop)
    pub const FEED_REFRESH_MS: f64 = 3000.0;
}

/// Clamp a point so a circle of `radius` stays inside the square playfield
#[inline]
pub fn clamp_to_field(pos: Vec2, radius: f32) -> Vec2 {
    Vec2::new(
        pos.x.clamp(radius, consts::GAME_SIZE - radius),
        pos.y.clamp(radius, consts::GAME_SIZE - radius),
    )
}
