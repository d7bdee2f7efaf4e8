//! Per-frame simulation advance
//!
//! The driver loop owns scheduling; the simulator only exposes an explicit
//! `tick(now_ms, dt)` so it runs headless in tests at any cadence.

use glam::Vec2;
use rand::Rng;

use super::collision::resolve_collisions;
use super::state::{Block, BlockKind, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Advance the game by one frame
///
/// Order per tick: spawn if due, home every block toward the beacon,
/// resolve collisions, then the level check. Does nothing unless running.
pub fn tick(state: &mut GameState, now_ms: f64, dt_secs: f32) -> Vec<GameEvent> {
    if state.phase != GamePhase::Running {
        return Vec::new();
    }
    let dt = dt_secs.max(0.0);

    spawn_if_due(state, now_ms);

    // Home blocks toward the beacon's current position. A block sitting
    // exactly on the beacon has no defined direction; it skips the frame
    // instead of pushing NaN into its position.
    let beacon = state.beacon;
    let step = state.speed * dt;
    for block in &mut state.blocks {
        let to_beacon = beacon - block.pos;
        let dist = to_beacon.length();
        if dist > f32::EPSILON {
            block.pos += to_beacon / dist * step;
        }
    }

    let mut events = resolve_collisions(state);

    // At most one level-up per tick, and never after a terminal hit
    if state.phase == GamePhase::Running && state.score > state.level * LEVEL_SCORE_STEP {
        apply_level_up(state);
        events.push(GameEvent::LevelUp { level: state.level });
    }

    events
}

/// Spawn one block at the boundary when the timer elapses and there is room
pub fn spawn_if_due(state: &mut GameState, now_ms: f64) {
    if now_ms - state.last_spawn_ms <= f64::from(state.spawn_interval_ms()) {
        return;
    }
    if state.blocks.len() >= MAX_BLOCKS {
        return;
    }

    let pos = random_edge_position(state);
    let kind = if state.rng.random::<f32>() > BAD_BLOCK_CHANCE {
        BlockKind::Good
    } else {
        BlockKind::Bad
    };

    state.blocks.push(Block { pos, kind });
    state.last_spawn_ms = now_ms;
}

/// Uniform point on a uniformly chosen boundary edge, one block-radius out
fn random_edge_position(state: &mut GameState) -> Vec2 {
    let along = state.rng.random_range(0.0..GAME_SIZE);
    match state.rng.random_range(0..4u8) {
        0 => Vec2::new(along, -BLOCK_RADIUS),            // top
        1 => Vec2::new(GAME_SIZE + BLOCK_RADIUS, along), // right
        2 => Vec2::new(along, GAME_SIZE + BLOCK_RADIUS), // bottom
        _ => Vec2::new(-BLOCK_RADIUS, along),            // left
    }
}

/// Explicit mid-game level skip: +10 score plus the usual difficulty step
pub fn skip_level(state: &mut GameState) -> Option<GameEvent> {
    if state.phase != GamePhase::Running {
        return None;
    }
    state.score += SKIP_LEVEL_BONUS;
    apply_level_up(state);
    Some(GameEvent::LevelUp { level: state.level })
}

fn apply_level_up(state: &mut GameState) {
    state.level += 1;
    state.speed += SPEED_STEP;
    state.set_spawn_interval_ms(state.spawn_interval_ms() - SPAWN_INTERVAL_STEP_MS);
    log::debug!(
        "level {} (speed {:.1}, spawn every {:.0}ms)",
        state.level,
        state.speed,
        state.spawn_interval_ms()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Direction;
    use proptest::prelude::*;

    fn running_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start();
        state
    }

    /// Drive the spawn timer with a synthetic clock until a block appears,
    /// without ticking (a tick would move it off the edge immediately)
    fn spawn_one(state: &mut GameState) -> Block {
        let mut now = 0.0;
        while state.blocks.is_empty() {
            now += 100.0;
            spawn_if_due(state, now);
        }
        state.blocks[0]
    }

    #[test]
    fn test_tick_noop_unless_running() {
        let mut state = GameState::new(7);
        let events = tick(&mut state, 10_000.0, SIM_DT);
        assert!(events.is_empty());
        assert!(state.blocks.is_empty());

        state.phase = GamePhase::GameOver;
        let events = tick(&mut state, 20_000.0, SIM_DT);
        assert!(events.is_empty());
    }

    #[test]
    fn test_spawn_waits_for_interval() {
        let mut state = running_state(7);
        // Interval has not elapsed relative to the fresh spawn timer
        tick(&mut state, 1000.0, SIM_DT);
        assert!(state.blocks.is_empty());
        // Strictly past 1500ms it fires
        tick(&mut state, 1501.0, SIM_DT);
        assert_eq!(state.blocks.len(), 1);
        assert_eq!(state.last_spawn_ms, 1501.0);
    }

    #[test]
    fn test_spawn_capped_at_max_blocks() {
        let mut state = running_state(7);
        // Park the beacon in a corner so spawned blocks survive a while
        state.beacon = Vec2::new(BEACON_RADIUS, BEACON_RADIUS);

        let mut now = 0.0;
        for _ in 0..50 {
            now += 2000.0;
            spawn_if_due(&mut state, now);
            assert!(state.blocks.len() <= MAX_BLOCKS);
        }
        assert_eq!(state.blocks.len(), MAX_BLOCKS);
    }

    #[test]
    fn test_blocks_home_toward_beacon() {
        let mut state = running_state(7);
        state.blocks.push(Block {
            pos: Vec2::new(0.0, 200.0),
            kind: BlockKind::Good,
        });
        let before = state.beacon.distance(state.blocks[0].pos);

        tick(&mut state, 0.0, 1.0);
        let after = state.beacon.distance(state.blocks[0].pos);
        assert!((before - after - INITIAL_SPEED).abs() < 1e-4);
    }

    #[test]
    fn test_zero_distance_block_does_not_nan() {
        let mut state = running_state(7);
        // A block exactly on the beacon has no homing direction. Without
        // the guard its position would go NaN in the move phase and the
        // collision check below would silently never fire.
        state.blocks.push(Block {
            pos: state.beacon,
            kind: BlockKind::Good,
        });
        let events = tick(&mut state, 0.0, SIM_DT);
        assert_eq!(events, vec![GameEvent::Collected { score: 1 }]);
        assert!(state.blocks.is_empty());
    }

    #[test]
    fn test_level_up_scenario() {
        let mut state = running_state(7);

        // Three collections: no level yet
        for _ in 0..3 {
            state.blocks.push(Block {
                pos: state.beacon,
                kind: BlockKind::Good,
            });
            tick(&mut state, 0.0, SIM_DT);
        }
        assert_eq!(state.score, 3);
        assert_eq!(state.level, 1);

        // Jump the score so the next tick crosses the threshold
        state.score = 10;
        state.blocks.push(Block {
            pos: state.beacon,
            kind: BlockKind::Good,
        });
        let events = tick(&mut state, 0.0, SIM_DT);

        assert_eq!(state.score, 11);
        assert_eq!(state.level, 2);
        assert_eq!(state.speed, INITIAL_SPEED + SPEED_STEP);
        assert_eq!(
            state.spawn_interval_ms(),
            SPAWN_INTERVAL_START_MS - SPAWN_INTERVAL_STEP_MS
        );
        assert!(events.contains(&GameEvent::LevelUp { level: 2 }));
    }

    #[test]
    fn test_single_level_up_per_tick() {
        let mut state = running_state(7);
        // Far past several thresholds at once
        state.score = 55;
        tick(&mut state, 0.0, SIM_DT);
        assert_eq!(state.level, 2);
        tick(&mut state, 0.0, SIM_DT);
        assert_eq!(state.level, 3);
    }

    #[test]
    fn test_spawn_interval_floor() {
        let mut state = running_state(7);
        for _ in 0..20 {
            skip_level(&mut state);
        }
        assert_eq!(state.spawn_interval_ms(), SPAWN_INTERVAL_MIN_MS);
    }

    #[test]
    fn test_skip_level_scenario() {
        let mut state = running_state(7);
        state.score = 5;

        let event = skip_level(&mut state);
        assert_eq!(event, Some(GameEvent::LevelUp { level: 2 }));
        assert_eq!(state.score, 15);
        assert_eq!(state.level, 2);
        assert_eq!(state.speed, INITIAL_SPEED + SPEED_STEP);
        assert_eq!(
            state.spawn_interval_ms(),
            SPAWN_INTERVAL_START_MS - SPAWN_INTERVAL_STEP_MS
        );
    }

    #[test]
    fn test_skip_level_requires_running() {
        let mut state = GameState::new(7);
        assert_eq!(skip_level(&mut state), None);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut state = running_state(7);
        state.blocks.push(Block {
            pos: state.beacon,
            kind: BlockKind::Bad,
        });
        tick(&mut state, 0.0, SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);

        let score = state.score;
        let beacon = state.beacon;
        state.move_beacon(Direction::Up);
        let events = tick(&mut state, 60_000.0, SIM_DT);
        assert!(events.is_empty());
        assert_eq!(state.score, score);
        assert_eq!(state.beacon, beacon);
        assert!(state.blocks.is_empty());
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = running_state(7);
        state.score = 12;
        state.phase = GamePhase::GameOver;

        state.start();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.speed, INITIAL_SPEED);
        assert_eq!(state.spawn_interval_ms(), SPAWN_INTERVAL_START_MS);
    }

    #[test]
    fn test_determinism() {
        let mut a = running_state(99999);
        let mut b = running_state(99999);

        let mut now = 0.0;
        for i in 0..600 {
            now += 16.0;
            if i % 5 == 0 {
                a.move_beacon(Direction::Right);
                b.move_beacon(Direction::Right);
            }
            tick(&mut a, now, SIM_DT);
            tick(&mut b, now, SIM_DT);
        }

        assert_eq!(a.score, b.score);
        assert_eq!(a.level, b.level);
        assert_eq!(a.blocks.len(), b.blocks.len());
        assert_eq!(a.beacon, b.beacon);
    }

    proptest! {
        #[test]
        fn prop_beacon_stays_in_bounds(moves in proptest::collection::vec(0u8..4, 0..200)) {
            let mut state = running_state(3);
            for m in moves {
                let dir = match m {
                    0 => Direction::Up,
                    1 => Direction::Down,
                    2 => Direction::Left,
                    _ => Direction::Right,
                };
                state.move_beacon(dir);
                prop_assert!(state.beacon.x >= BEACON_RADIUS);
                prop_assert!(state.beacon.x <= GAME_SIZE - BEACON_RADIUS);
                prop_assert!(state.beacon.y >= BEACON_RADIUS);
                prop_assert!(state.beacon.y <= GAME_SIZE - BEACON_RADIUS);
            }
        }

        #[test]
        fn prop_spawns_pinned_to_an_edge(seed in 0u64..5000) {
            let mut state = running_state(seed);
            let block = spawn_one(&mut state);

            let pinned_x = block.pos.x == -BLOCK_RADIUS || block.pos.x == GAME_SIZE + BLOCK_RADIUS;
            let pinned_y = block.pos.y == -BLOCK_RADIUS || block.pos.y == GAME_SIZE + BLOCK_RADIUS;
            prop_assert!(pinned_x || pinned_y);

            let free = if pinned_x { block.pos.y } else { block.pos.x };
            prop_assert!((0.0..GAME_SIZE).contains(&free));
        }
    }
}
