//! Collision tests for beams, bricks, buckets and mirrors
//!
//! All tests are plain inequalities on positions; nothing here mutates state.

use glam::Vec2;

use super::state::{Mirror, MirrorId};
use crate::consts::*;

/// Whether a brick centred at `brick_x` falls inside the bucket at `bucket_x`.
/// The window is closed on both ends.
#[inline]
pub fn in_bucket_window(brick_x: f32, bucket_x: f32) -> bool {
    brick_x >= bucket_x - BUCKET_HALF_WIDTH && brick_x <= bucket_x + BUCKET_HALF_WIDTH
}

/// Whether a brick is low enough and high enough to be shot at
#[inline]
pub fn brick_targetable(brick_y: f32) -> bool {
    (-BRICK_TARGET_BAND..=BRICK_TARGET_BAND).contains(&brick_y)
}

/// Axis-aligned overlap between a beam's hitbox and a brick's hitbox.
///
/// The brick box is narrower on its left side (0.13) than its right (0.16).
pub fn beam_hits_brick(beam: Vec2, brick: Vec2) -> bool {
    beam.x - BEAM_HIT_HALF_WIDTH <= brick.x + BRICK_HIT_RIGHT
        && beam.x + BEAM_HIT_HALF_WIDTH >= brick.x - BRICK_HIT_LEFT
        && beam.y - BEAM_HIT_HALF_HEIGHT <= brick.y + BRICK_HIT_HALF_HEIGHT
        && beam.y + BEAM_HIT_HALF_HEIGHT >= brick.y - BRICK_HIT_HALF_HEIGHT
}

/// Whether the beam centred at `beam` has reached `mirror`
pub fn mirror_struck(mirror: &Mirror, beam: Vec2) -> bool {
    match mirror.id {
        MirrorId::First => first_mirror_struck(mirror, beam),
        MirrorId::Second => second_mirror_struck(mirror, beam),
    }
}

/// The rising mirror: the beam's lower-right corner has crossed (or come
/// within tolerance of) the mirror line, past the mirror's lower-left end.
fn first_mirror_struck(mirror: &Mirror, beam: Vec2) -> bool {
    let slope = mirror.angle.to_radians().tan();
    let intercept = mirror.center.y - mirror.center.x * slope;
    let corner = Vec2::new(
        beam.x + BEAM_MESH_HALF_WIDTH,
        beam.y - BEAM_MESH_HALF_HEIGHT,
    );
    let reach = mirror.reach();

    corner.y - (corner.x * slope + intercept) < MIRROR_1_TOLERANCE
        && corner.x >= mirror.center.x - reach.x
        && beam.y + BEAM_MESH_HALF_HEIGHT >= mirror.center.y - reach.y
}

/// The falling mirror: the beam centre is on the far side of the mirror
/// line and strictly inside the mirror's bounding box.
fn second_mirror_struck(mirror: &Mirror, beam: Vec2) -> bool {
    let slope = mirror.angle.to_radians().tan();
    let reach = mirror.reach();

    (mirror.center.y - beam.y) - slope * (mirror.center.x - beam.x) <= MIRROR_2_TOLERANCE
        && beam.x > mirror.center.x - reach.x
        && beam.x < mirror.center.x + reach.x
        && beam.y < mirror.center.y + reach.y
        && beam.y > mirror.center.y - reach.y
}

/// Angle after bouncing off a mirror oriented at `mirror_angle`
#[inline]
pub fn reflect_angle(mirror_angle: f32, angle: f32) -> f32 {
    2.0 * mirror_angle - angle
}

/// Offset that steps a freshly reflected beam off the mirror surface
pub fn reflection_nudge(angle: f32) -> Vec2 {
    let rad = angle.to_radians();
    let (sin, cos) = rad.sin_cos();
    Vec2::new(
        BEAM_MESH_HALF_WIDTH * cos + BEAM_MESH_HALF_HEIGHT * sin,
        BEAM_MESH_HALF_WIDTH * sin + BEAM_MESH_HALF_HEIGHT * cos,
    )
}

/// Whether a beam has left the playable field
#[inline]
pub fn beam_out_of_field(beam: Vec2) -> bool {
    beam.x >= BEAM_MAX_X || beam.y >= BEAM_MAX_Y || beam.y <= BEAM_MIN_Y
}
