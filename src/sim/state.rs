//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::clamp_to_field;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the first start command
    NotStarted,
    /// Active gameplay
    Running,
    /// Run ended on a bad block; terminal until restarted
    GameOver,
}

/// Block kinds - collect the good ones, the bad ones end the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Good,
    Bad,
}

/// A homing block entity
#[derive(Debug, Clone, Copy)]
pub struct Block {
    pub pos: Vec2,
    pub kind: BlockKind,
}

/// Discrete directional input command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit offset for one input step (screen coords, y grows downward)
    pub fn offset(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// Events emitted by a simulation tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A good block was collected
    Collected { score: u32 },
    /// Difficulty stepped up
    LevelUp { level: u32 },
    /// A bad block hit the beacon; the run is over
    GameOver { final_score: u32 },
}

/// Complete minigame state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG for spawn edge / kind draws
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Good blocks collected this run
    pub score: u32,
    /// Current difficulty level (1-based)
    pub level: u32,
    /// Block homing speed, units per second
    pub speed: f32,
    /// Time between spawn attempts
    spawn_interval_ms: f32,
    /// Player beacon position
    pub beacon: Vec2,
    /// Live homing blocks (membership only, order irrelevant)
    pub blocks: Vec<Block>,
    /// Timestamp of the last spawn
    pub last_spawn_ms: f64,
}

impl GameState {
    /// Create a fresh state in `NotStarted` with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::NotStarted,
            score: 0,
            level: 1,
            speed: INITIAL_SPEED,
            spawn_interval_ms: SPAWN_INTERVAL_START_MS,
            beacon: Vec2::splat(GAME_SIZE / 2.0),
            blocks: Vec::with_capacity(MAX_BLOCKS),
            last_spawn_ms: 0.0,
        }
    }

    /// (Re)start a run from `NotStarted` or `GameOver`
    ///
    /// Ignored while a run is in progress. The RNG stream continues so
    /// consecutive runs under one seed stay reproducible as a sequence.
    pub fn start(&mut self) {
        if self.phase == GamePhase::Running {
            return;
        }
        self.phase = GamePhase::Running;
        self.score = 0;
        self.level = 1;
        self.speed = INITIAL_SPEED;
        self.spawn_interval_ms = SPAWN_INTERVAL_START_MS;
        self.beacon = Vec2::splat(GAME_SIZE / 2.0);
        self.blocks.clear();
        self.last_spawn_ms = 0.0;
    }

    /// Apply one directional input event: a fixed step, clamped to bounds
    ///
    /// Input is ignored unless the game is running.
    pub fn move_beacon(&mut self, dir: Direction) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.beacon = clamp_to_field(self.beacon + dir.offset() * BEACON_STEP, BEACON_RADIUS);
    }

    /// Current spawn interval
    pub fn spawn_interval_ms(&self) -> f32 {
        self.spawn_interval_ms
    }

    /// Set the spawn interval, clamped at the floor
    pub fn set_spawn_interval_ms(&mut self, interval: f32) {
        self.spawn_interval_ms = interval.max(SPAWN_INTERVAL_MIN_MS);
    }

    /// Number of live blocks
    pub fn live_blocks(&self) -> usize {
        self.blocks.len()
    }
}
