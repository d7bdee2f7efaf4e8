//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (stroked circle outline)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let inner1 = center + Vec2::new(inner_radius * theta1.cos(), inner_radius * theta1.sin());
        let outer1 = center + Vec2::new(outer_radius * theta1.cos(), outer_radius * theta1.sin());
        let inner2 = center + Vec2::new(inner_radius * theta2.cos(), inner_radius * theta2.sin());
        let outer2 = center + Vec2::new(outer_radius * theta2.cos(), outer_radius * theta2.sin());

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Generate vertices for a radial-gradient glow
///
/// Solid disc out to `core_radius`, then a band fading to fully transparent
/// at `outer_radius` - the two-stop gradient the canvas API would produce.
pub fn glow(
    center: Vec2,
    core_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = circle(center, core_radius, color, segments);
    let faded = [color[0], color[1], color[2], 0.0];

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let inner1 = center + Vec2::new(core_radius * theta1.cos(), core_radius * theta1.sin());
        let outer1 = center + Vec2::new(outer_radius * theta1.cos(), outer_radius * theta1.sin());
        let inner2 = center + Vec2::new(core_radius * theta2.cos(), core_radius * theta2.sin());
        let outer2 = center + Vec2::new(outer_radius * theta2.cos(), outer_radius * theta2.sin());

        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, faded));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, faded));
        vertices.push(Vertex::new(outer2.x, outer2.y, faded));
    }

    vertices
}
