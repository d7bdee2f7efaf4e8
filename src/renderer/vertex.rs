//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game and radar elements (the site palette)
pub mod colors {
    /// Good block fill (#3B82F6)
    pub const GOOD_FILL: [f32; 4] = [0.231, 0.510, 0.965, 1.0];
    /// Good block stroke (#60A5FA)
    pub const GOOD_EDGE: [f32; 4] = [0.376, 0.647, 0.980, 1.0];
    /// Bad block fill (#EF4444)
    pub const BAD_FILL: [f32; 4] = [0.937, 0.267, 0.267, 1.0];
    /// Bad block stroke (#F87171)
    pub const BAD_EDGE: [f32; 4] = [0.973, 0.443, 0.443, 1.0];
    /// Beacon body and glow (#F59E0B)
    pub const BEACON: [f32; 4] = [0.961, 0.620, 0.043, 1.0];
    /// Beacon stroke (#FBBF24)
    pub const BEACON_EDGE: [f32; 4] = [0.984, 0.749, 0.141, 1.0];

    /// Transaction signal dot (#3B82F6)
    pub const SIGNAL_TRANSACTION: [f32; 4] = [0.231, 0.510, 0.965, 1.0];
    /// Block signal dot (#F59E0B)
    pub const SIGNAL_BLOCK: [f32; 4] = [0.961, 0.620, 0.043, 1.0];
    /// Validator signal dot (#10B981)
    pub const SIGNAL_VALIDATOR: [f32; 4] = [0.063, 0.725, 0.506, 1.0];

    /// Radar range rings, faint primary blue
    pub const RADAR_RING: [f32; 4] = [0.231, 0.510, 0.965, 0.3];
    /// Radar center dot
    pub const RADAR_CENTER: [f32; 4] = [0.231, 0.510, 0.965, 1.0];

    /// Surface clear color, near-black navy
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
}
