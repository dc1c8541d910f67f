//! Shape generation for the game's meshes
//!
//! Every entity is drawn from one of a handful of fixed meshes; the draw list
//! only refers to them by `MeshId`.

use serde::{Deserialize, Serialize};

use super::vertex::{Vertex, colors};

/// Identifies one of the static meshes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeshId {
    Mirror,
    Beam,
    /// The turret barrel
    Turret,
    /// Outline triangle fanned around the muzzle
    TurretHub,
    NeutralBrick,
    RedBrick,
    GreenBrick,
    Floor,
    RedBucket,
    GreenBucket,
    Wall,
}

impl MeshId {
    pub const ALL: [MeshId; 11] = [
        MeshId::Mirror,
        MeshId::Beam,
        MeshId::Turret,
        MeshId::TurretHub,
        MeshId::NeutralBrick,
        MeshId::RedBrick,
        MeshId::GreenBrick,
        MeshId::Floor,
        MeshId::RedBucket,
        MeshId::GreenBucket,
        MeshId::Wall,
    ];
}

/// How the triangles of a mesh are rasterised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    Fill,
    /// Edges only
    Line,
}

/// A coloured triangle list
#[derive(Debug, Clone)]
pub struct Mesh {
    pub id: MeshId,
    pub vertices: Vec<Vertex>,
    pub fill: FillMode,
}

impl Mesh {
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Two triangles covering the rectangle centred on the origin
pub fn rect(half_width: f32, half_height: f32, color: [f32; 3]) -> Vec<Vertex> {
    let (w, h) = (half_width, half_height);
    vec![
        Vertex::new(-w, -h, color),
        Vertex::new(w, -h, color),
        Vertex::new(w, h, color),
        Vertex::new(w, h, color),
        Vertex::new(-w, h, color),
        Vertex::new(-w, -h, color),
    ]
}

/// Equilateral triangle with one corner at the origin, lying on +x
pub fn hub_triangle(color: [f32; 3]) -> Vec<Vertex> {
    vec![
        Vertex::new(0.0, 0.0, color),
        Vertex::new(0.25, 0.433, color),
        Vertex::new(0.5, 0.0, color),
    ]
}

/// Build the mesh for `id`
pub fn build(id: MeshId) -> Mesh {
    let (vertices, fill) = match id {
        MeshId::Mirror => (rect(0.7, 0.02, colors::MIRROR), FillMode::Fill),
        MeshId::Beam => (rect(0.18, 0.06, colors::BEAM), FillMode::Fill),
        MeshId::Turret => (rect(0.75, 0.09, colors::TURRET), FillMode::Fill),
        MeshId::TurretHub => (hub_triangle(colors::TURRET), FillMode::Line),
        MeshId::NeutralBrick => (rect(0.15, 0.3, colors::NEUTRAL_BRICK), FillMode::Fill),
        MeshId::RedBrick => (rect(0.15, 0.3, colors::RED), FillMode::Fill),
        MeshId::GreenBrick => (rect(0.15, 0.3, colors::GREEN), FillMode::Fill),
        MeshId::Floor => (rect(4.0, 0.4, colors::WALL), FillMode::Fill),
        MeshId::RedBucket => (rect(0.38, 0.32, colors::RED), FillMode::Fill),
        MeshId::GreenBucket => (rect(0.38, 0.32, colors::GREEN), FillMode::Fill),
        MeshId::Wall => (rect(0.4, 4.0, colors::WALL), FillMode::Fill),
    };
    Mesh { id, vertices, fill }
}

/// Every mesh the scene can reference, in `MeshId::ALL` order
pub fn build_all() -> Vec<Mesh> {
    MeshId::ALL.iter().map(|&id| build(id)).collect()
}
