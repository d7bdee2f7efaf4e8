//! Stateless per-frame draw passes
//!
//! Pure functions from simulation state to vertex lists. The pipeline clears
//! the whole surface before drawing, so every frame is rebuilt from scratch;
//! nothing here holds state or mutates the simulators.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::radar::{SignalFeed, SignalFilter, SignalKind, project};
use crate::sim::{BlockKind, GamePhase, GameState};

const BLOCK_SEGMENTS: u32 = 24;
const BEACON_SEGMENTS: u32 = 32;
const SIGNAL_SEGMENTS: u32 = 16;
const RING_SEGMENTS: u32 = 64;
/// Stroke width on block and beacon outlines
const EDGE_WIDTH: f32 = 2.0;

/// Build the minigame frame: blocks first, beacon on top
pub fn game_frame(state: &GameState) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    if state.phase == GamePhase::NotStarted {
        return vertices;
    }

    for block in &state.blocks {
        let (fill, edge) = match block.kind {
            BlockKind::Good => (colors::GOOD_FILL, colors::GOOD_EDGE),
            BlockKind::Bad => (colors::BAD_FILL, colors::BAD_EDGE),
        };
        vertices.extend(shapes::circle(block.pos, BLOCK_RADIUS, fill, BLOCK_SEGMENTS));
        vertices.extend(shapes::ring(
            block.pos,
            BLOCK_RADIUS - EDGE_WIDTH / 2.0,
            BLOCK_RADIUS + EDGE_WIDTH / 2.0,
            edge,
            BLOCK_SEGMENTS,
        ));
    }

    // Glow fades from solid at a quarter of the halo to transparent at the
    // halo edge, then the solid body with its lighter stroke sits on top
    vertices.extend(shapes::glow(
        state.beacon,
        BEACON_RADIUS / 2.0,
        BEACON_RADIUS * 2.0,
        colors::BEACON,
        BEACON_SEGMENTS,
    ));
    vertices.extend(shapes::circle(
        state.beacon,
        BEACON_RADIUS,
        colors::BEACON,
        BEACON_SEGMENTS,
    ));
    vertices.extend(shapes::ring(
        state.beacon,
        BEACON_RADIUS - EDGE_WIDTH / 2.0,
        BEACON_RADIUS + EDGE_WIDTH / 2.0,
        colors::BEACON_EDGE,
        BEACON_SEGMENTS,
    ));

    vertices
}

fn signal_color(kind: SignalKind) -> [f32; 4] {
    match kind {
        SignalKind::Transaction => colors::SIGNAL_TRANSACTION,
        SignalKind::Block => colors::SIGNAL_BLOCK,
        SignalKind::Validator => colors::SIGNAL_VALIDATOR,
    }
}

/// Build the radar frame: range rings, center marker, then filtered signals
pub fn radar_frame(feed: &SignalFeed, filter: SignalFilter) -> Vec<Vertex> {
    let center = Vec2::splat(RADAR_SIZE / 2.0);
    let radius = RADAR_SIZE / 2.0;
    let mut vertices = Vec::new();

    for fraction in [0.375, 0.25, 0.125] {
        vertices.extend(shapes::ring(
            center,
            RADAR_SIZE * fraction - 1.0,
            RADAR_SIZE * fraction,
            colors::RADAR_RING,
            RING_SEGMENTS,
        ));
    }
    vertices.extend(shapes::ring(
        center,
        radius - 1.0,
        radius,
        colors::RADAR_RING,
        RING_SEGMENTS,
    ));
    vertices.extend(shapes::circle(center, 4.0, colors::RADAR_CENTER, SIGNAL_SEGMENTS));

    for signal in feed.filtered(filter) {
        let mut color = signal_color(signal.kind);
        // Weak signals render dimmer
        color[3] *= 0.5 + 0.5 * signal.strength;
        vertices.extend(shapes::circle(
            project(signal.pos, center),
            SIGNAL_DOT_RADIUS,
            color,
            SIGNAL_SEGMENTS,
        ));
    }

    vertices
}
