//! Frame-synchronous simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - One tick per displayed frame
//! - Seeded RNG only (brick lanes are drawn once at startup)
//! - Stable iteration order (pool index order, beams by slot)

pub mod autopilot;
pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{beam_hits_brick, in_bucket_window, mirror_struck, reflect_angle};
pub use state::{
    Beam, Brick, BrickKind, BrickPool, Bucket, GameEvent, GamePhase, GameState, MIRRORS, Mirror,
    MirrorId, Turret,
};
pub use tick::{Control, TickInput, apply_control, fire, tick};
