//! Brick Breaker - a falling-brick arcade game
//!
//! Core modules:
//! - `sim`: Frame-synchronous simulation (bricks, beams, mirrors, scoring)
//! - `renderer`: Meshes, camera and the per-frame draw list
//! - `platform`: Input snapshots and console I/O
//! - `game`: The loop tying input, simulation and rendering together

pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{GameError, StartupError};
pub use game::{FrameOutcome, Game};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal frame time (vsync at 60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Visible field half-extent (orthographic volume is [-4, 4] on both axes)
    pub const FIELD_HALF_EXTENT: f32 = 4.0;
    pub const NEAR_PLANE: f32 = 0.1;
    pub const FAR_PLANE: f32 = 500.0;

    /// Pool sizes
    pub const NEUTRAL_POOL_SIZE: usize = 1001;
    pub const COLORED_POOL_SIZE: usize = 501;
    /// Vertical spacing between consecutive bricks of a pool
    pub const NEUTRAL_SPACING: f32 = 5.0;
    pub const COLORED_SPACING: f32 = 7.0;
    /// First brick height per pool
    pub const NEUTRAL_FIRST_Y: f32 = 0.0;
    pub const RED_FIRST_Y: f32 = 3.9;
    pub const GREEN_FIRST_Y: f32 = 5.9;
    /// Bricks spawn with x uniformly in [-LANE_HALF_WIDTH, LANE_HALF_WIDTH]
    pub const LANE_HALF_WIDTH: f32 = 2.0;

    /// Fall per tick at speed 1
    pub const FALL_STEP: f32 = 0.015;
    pub const MIN_SPEED: f32 = 1.0;
    pub const MAX_SPEED: f32 = 10.0;

    /// Bricks at or below this height can land in a bucket
    pub const CATCH_LINE: f32 = -2.7;
    /// Bricks at or below this height have fallen out of play
    pub const KILL_LINE: f32 = -3.4;

    /// Brick hitbox (asymmetric in x)
    pub const BRICK_HIT_LEFT: f32 = 0.13;
    pub const BRICK_HIT_RIGHT: f32 = 0.16;
    pub const BRICK_HIT_HALF_HEIGHT: f32 = 0.28;
    /// Bricks outside this band cannot be struck by a beam
    pub const BRICK_TARGET_BAND: f32 = 3.9;

    /// Beam pool and flight
    pub const BEAM_SLOTS: usize = 10;
    pub const BEAM_STEP: f32 = 0.15;
    pub const BEAM_HIT_HALF_WIDTH: f32 = 0.16;
    pub const BEAM_HIT_HALF_HEIGHT: f32 = 0.04;
    pub const BEAM_MESH_HALF_WIDTH: f32 = 0.18;
    pub const BEAM_MESH_HALF_HEIGHT: f32 = 0.06;
    /// Beams leave play beyond these bounds
    pub const BEAM_MAX_X: f32 = 3.9;
    pub const BEAM_MAX_Y: f32 = 3.9;
    pub const BEAM_MIN_Y: f32 = -3.5;

    /// Turret
    pub const TURRET_X: f32 = -4.0;
    pub const TURRET_MIN_Y: f32 = -2.8;
    pub const TURRET_MAX_Y: f32 = 3.0;
    pub const TURRET_MAX_ANGLE: f32 = 45.0;
    pub const AIM_STEP: f32 = 9.0;
    pub const TURRET_KEY_STEP: f32 = 0.5;
    pub const TURRET_CLICK_STEP: f32 = 0.2;
    /// Simulated seconds between shots
    pub const FIRE_COOLDOWN: f64 = 1.0;

    /// Buckets
    pub const BUCKET_Y: f32 = -3.278;
    pub const BUCKET_LIMIT: f32 = 2.0;
    pub const BUCKET_HALF_WIDTH: f32 = 0.38;
    pub const BUCKET_HALF_HEIGHT: f32 = 0.32;
    pub const BUCKET_STEP: f32 = 0.05;
    pub const RED_BUCKET_START: f32 = -1.0;
    pub const GREEN_BUCKET_START: f32 = 1.0;

    /// Mirrors
    pub const MIRROR_HALF_LENGTH: f32 = 0.7;
    /// Slack allowed on the mirror line tests
    pub const MIRROR_1_TOLERANCE: f32 = 0.01;
    pub const MIRROR_2_TOLERANCE: f32 = 0.001;

    /// Scoring
    pub const CATCH_REWARD: i32 = 100;
    pub const DESTROY_REWARD: i32 = 100;
    pub const PENALTY: i32 = -10;

    /// Default starting lives
    pub const DEFAULT_LIVES: i32 = 5;
}

/// Unit vector pointing along `angle_deg` (counter-clockwise from +x)
#[inline]
pub fn heading(angle_deg: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Map a cursor position in window pixels to world coordinates.
///
/// The window shows the whole [-4, 4] field, so one world unit spans
/// `width / 8` pixels and pixel y grows downward.
#[inline]
pub fn window_to_world(px: f32, py: f32, width: f32, height: f32) -> Vec2 {
    let span = 2.0 * consts::FIELD_HALF_EXTENT;
    Vec2::new(
        px / (width / span) - consts::FIELD_HALF_EXTENT,
        consts::FIELD_HALF_EXTENT - py / (height / span),
    )
}
