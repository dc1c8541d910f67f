//! Demo-mode player
//!
//! Steers each bucket under the lowest brick of its own colour, keeps it out
//! from under black bricks, and shoots at whatever black brick is closest to
//! landing. Used by the headless binary and handy for soak tests.

use glam::Vec2;

use super::collision::in_bucket_window;
use super::state::{BrickPool, Bucket, GameState};
use super::tick::Control;
use crate::consts::*;

/// Controls the autopilot wants for this tick
pub fn plan(state: &GameState) -> Vec<Control> {
    let mut controls = Vec::new();

    if let Some(dx) = bucket_move(&state.red, &state.neutral, &state.red_bucket) {
        controls.push(Control::MoveRedBucket(dx));
    }
    if let Some(dx) = bucket_move(&state.green, &state.neutral, &state.green_bucket) {
        controls.push(Control::MoveGreenBucket(dx));
    }

    if let Some(target) = lowest_in_field(&state.neutral) {
        let muzzle = state.turret.pos.truncate();
        let to_target = target - muzzle;
        let wanted = to_target.y.atan2(to_target.x).to_degrees();
        let error = wanted - state.turret.angle;

        if error > AIM_STEP / 2.0 && state.turret.angle < TURRET_MAX_ANGLE {
            controls.push(Control::AimLeft);
        } else if error < -AIM_STEP / 2.0 && state.turret.angle > -TURRET_MAX_ANGLE {
            controls.push(Control::AimRight);
        } else if state.turret.ready_to_fire(state.clock) {
            controls.push(Control::Fire);
        }

        // Slide the turret toward the target's height when the aim runs out
        if error.abs() > TURRET_MAX_ANGLE {
            let dy = (target.y - muzzle.y).clamp(-TURRET_KEY_STEP, TURRET_KEY_STEP);
            controls.push(Control::Lift(dy));
        }
    }

    controls
}

/// Lowest brick of a pool that is still above the catch line and on screen
fn lowest_in_field(pool: &BrickPool) -> Option<Vec2> {
    pool.bricks
        .iter()
        .map(|b| b.pos.truncate())
        .filter(|p| p.y > CATCH_LINE && p.y < FIELD_HALF_EXTENT)
        .min_by(|a, b| a.y.total_cmp(&b.y))
}

fn bucket_move(own: &BrickPool, neutral: &BrickPool, bucket: &Bucket) -> Option<f32> {
    // Dodge a black brick about to land in the bucket
    let threat = neutral.bricks.iter().find(|b| {
        b.pos.y > CATCH_LINE && b.pos.y < CATCH_LINE + 1.0 && in_bucket_window(b.pos.x, bucket.x)
    });
    if let Some(brick) = threat {
        let away = if brick.pos.x >= bucket.x {
            -BUCKET_STEP
        } else {
            BUCKET_STEP
        };
        // Against a wall, dodge the other way
        let away = if (bucket.x + away).abs() > BUCKET_LIMIT {
            -away
        } else {
            away
        };
        return Some(away);
    }

    let target = lowest_in_field(own)?;
    let dx = target.x - bucket.x;
    if dx.abs() < BUCKET_STEP {
        None
    } else {
        Some(BUCKET_STEP.copysign(dx))
    }
}
