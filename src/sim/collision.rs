//! Collision detection and response
//!
//! Blocks and the beacon are circles; a hit is centers closer than the sum
//! of radii. Resolution removes blocks back-to-front so removals never skip
//! an element mid-iteration.

use glam::Vec2;

use super::state::{BlockKind, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// True when two circles overlap
#[inline]
pub fn circles_touch(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    let threshold = radius_a + radius_b;
    a.distance_squared(b) < threshold * threshold
}

/// Resolve beacon/block collisions, mutating score and phase
///
/// Good blocks score one point each. The first bad hit ends the run: the
/// phase flips to `GameOver`, the score is left untouched, and any further
/// overlaps this frame are abandoned (the terminal state must not mutate).
pub fn resolve_collisions(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();

    for i in (0..state.blocks.len()).rev() {
        let block = state.blocks[i];
        if !circles_touch(block.pos, BLOCK_RADIUS, state.beacon, BEACON_RADIUS) {
            continue;
        }
        state.blocks.swap_remove(i);

        match block.kind {
            BlockKind::Good => {
                state.score += 1;
                events.push(GameEvent::Collected { score: state.score });
            }
            BlockKind::Bad => {
                state.phase = GamePhase::GameOver;
                events.push(GameEvent::GameOver {
                    final_score: state.score,
                });
                break;
            }
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Block;

    fn running_state() -> GameState {
        let mut state = GameState::new(1);
        state.start();
        state
    }

    #[test]
    fn test_circles_touch_threshold() {
        let a = Vec2::new(0.0, 0.0);

        // Just inside the 20-unit threshold
        assert!(circles_touch(a, 10.0, Vec2::new(19.9, 0.0), 10.0));
        // Exactly at the threshold is not a hit (strict less-than)
        assert!(!circles_touch(a, 10.0, Vec2::new(20.0, 0.0), 10.0));
        assert!(!circles_touch(a, 10.0, Vec2::new(25.0, 0.0), 10.0));
    }

    #[test]
    fn test_good_block_scores() {
        let mut state = running_state();
        state.blocks.push(Block {
            pos: state.beacon,
            kind: BlockKind::Good,
        });

        let events = resolve_collisions(&mut state);
        assert_eq!(state.score, 1);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.blocks.is_empty());
        assert_eq!(events, vec![GameEvent::Collected { score: 1 }]);
    }

    #[test]
    fn test_bad_block_ends_run_score_unchanged() {
        let mut state = running_state();
        state.score = 5;
        state.blocks.push(Block {
            pos: state.beacon,
            kind: BlockKind::Bad,
        });

        let events = resolve_collisions(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 5);
        assert_eq!(events, vec![GameEvent::GameOver { final_score: 5 }]);
    }

    #[test]
    fn test_bad_hit_abandons_remaining_overlaps() {
        let mut state = running_state();
        // Both overlap; the bad one is visited first (back-to-front)
        state.blocks.push(Block {
            pos: state.beacon,
            kind: BlockKind::Good,
        });
        state.blocks.push(Block {
            pos: state.beacon,
            kind: BlockKind::Bad,
        });

        resolve_collisions(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        // The good block was never collected
        assert_eq!(state.score, 0);
        assert_eq!(state.blocks.len(), 1);
    }

    #[test]
    fn test_distant_blocks_untouched() {
        let mut state = running_state();
        state.blocks.push(Block {
            pos: Vec2::new(0.0, 0.0),
            kind: BlockKind::Good,
        });

        let events = resolve_collisions(&mut state);
        assert!(events.is_empty());
        assert_eq!(state.blocks.len(), 1);
    }
}
