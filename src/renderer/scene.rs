//! Scene assembly: turn a `GameState` into an ordered list of draw calls.
//!
//! `render` is a pure projection of the state. It never mutates gameplay
//! data, so it can run (or not) independently of the simulation.

use glam::{Mat4, Vec3};

use super::shapes::MeshId;
use crate::consts::*;
use crate::sim::{BrickPool, GameState, MIRRORS};

/// Number of outline triangles fanned around the muzzle
pub const HUB_TRIANGLES: usize = 300;
/// Rotation between consecutive hub triangles, in degrees
pub const HUB_STEP_DEG: f32 = 1.0;

/// Half the height of a brick mesh; used to cull bricks off screen
const BRICK_MESH_HALF_HEIGHT: f32 = 0.3;

/// Fixed orthographic camera looking down -z at the field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub projection: Mat4,
    pub view: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        let eye = Vec3::new(0.0, 0.0, 3.0);
        let target = Vec3::new(0.0, 0.0, -1.0);
        Self {
            projection: Mat4::orthographic_rh_gl(
                -FIELD_HALF_EXTENT,
                FIELD_HALF_EXTENT,
                -FIELD_HALF_EXTENT,
                FIELD_HALF_EXTENT,
                NEAR_PLANE,
                FAR_PLANE,
            ),
            view: Mat4::look_at_rh(eye, eye + target, Vec3::Y),
        }
    }
}

impl Camera {
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

/// Model matrix: translate to `pos`, then rotate about z by `angle_deg`
#[inline]
pub fn model_matrix(pos: Vec3, angle_deg: f32) -> Mat4 {
    Mat4::from_translation(pos) * Mat4::from_rotation_z(angle_deg.to_radians())
}

/// A single draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    pub mesh: MeshId,
    /// World transform of the mesh
    pub model: Mat4,
}

/// Recorded draw stream for a frame, in paint order.
///
/// `clear()` keeps the allocation so the list can be reused every frame.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[inline]
    pub fn push(&mut self, mesh: MeshId, model: Mat4) {
        self.items.push(DrawItem { mesh, model });
    }

    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count(&self, mesh: MeshId) -> usize {
        self.items.iter().filter(|i| i.mesh == mesh).count()
    }
}

/// Record every visible entity of `state` into `list` (cleared first)
pub fn render(state: &GameState, list: &mut DrawList) {
    list.clear();

    for mirror in &MIRRORS {
        list.push(
            MeshId::Mirror,
            model_matrix(mirror.center.extend(0.0), mirror.angle),
        );
    }

    // Idle beams sit under the turret
    for beam in &state.beams {
        list.push(MeshId::Beam, model_matrix(beam.pos, beam.angle));
    }

    list.push(
        MeshId::Turret,
        model_matrix(state.turret.pos, state.turret.angle),
    );
    for i in 0..HUB_TRIANGLES {
        list.push(
            MeshId::TurretHub,
            model_matrix(state.turret.pos, i as f32 * HUB_STEP_DEG),
        );
    }

    push_bricks(list, &state.neutral, MeshId::NeutralBrick);
    push_bricks(list, &state.red, MeshId::RedBrick);
    push_bricks(list, &state.green, MeshId::GreenBrick);

    list.push(
        MeshId::Floor,
        model_matrix(Vec3::new(0.0, -FIELD_HALF_EXTENT, 0.0), 0.0),
    );
    list.push(
        MeshId::RedBucket,
        model_matrix(state.red_bucket.center().extend(0.0), 0.0),
    );
    list.push(
        MeshId::GreenBucket,
        model_matrix(state.green_bucket.center().extend(0.0), 0.0),
    );
    list.push(MeshId::Wall, model_matrix(Vec3::new(-4.3, 0.0, 0.0), 0.0));
}

/// Convenience wrapper allocating a fresh list
pub fn render_to_vec(state: &GameState) -> DrawList {
    let mut list = DrawList::new();
    render(state, &mut list);
    list
}

fn push_bricks(list: &mut DrawList, pool: &BrickPool, mesh: MeshId) {
    let limit = FIELD_HALF_EXTENT + BRICK_MESH_HALF_HEIGHT;
    for brick in pool.bricks.iter().filter(|b| b.pos.y.abs() < limit) {
        list.push(mesh, model_matrix(brick.pos, 0.0));
    }
}
