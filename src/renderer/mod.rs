//! WebGPU rendering module
//!
//! Immediate-mode: each frame the draw passes in `frame` rebuild the full
//! vertex list from simulation state and the pipeline clears then redraws.

pub mod frame;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use frame::{game_frame, radar_frame};
pub use pipeline::RenderState;
pub use vertex::{Vertex, colors};
