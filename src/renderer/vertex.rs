//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Vertex with a 3D position and an RGB colour, laid out for direct upload
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 3]) -> Self {
        Self {
            position: [x, y, 0.0],
            color,
        }
    }

    /// Byte distance between consecutive vertices
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
    /// Byte offset of `color` inside a vertex
    pub const COLOR_OFFSET: usize = std::mem::size_of::<[f32; 3]>();
}

/// Colors for game elements
pub mod colors {
    pub const NEUTRAL_BRICK: [f32; 3] = [0.2, 0.2, 0.2];
    pub const RED: [f32; 3] = [0.8, 0.1, 0.1];
    pub const GREEN: [f32; 3] = [0.1, 0.8, 0.1];
    pub const WALL: [f32; 3] = [0.45, 0.45, 0.45];
    pub const BEAM: [f32; 3] = [0.35, 0.75, 1.0];
    pub const TURRET: [f32; 3] = [0.0, 0.5, 1.0];
    pub const MIRROR: [f32; 3] = [0.7, 0.7, 0.7];
}
