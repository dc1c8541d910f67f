//! Game state and core simulation types
//!
//! Every entity lives in a fixed-size pool owned by `GameState`. Nothing is
//! created or destroyed after startup; bricks are recycled in place.

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Bricks falling, player in control
    Playing,
    /// Lives exhausted
    GameOver,
}

/// Brick types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickKind {
    /// Black brick: shoot it, never catch it
    Neutral,
    Red,
    Green,
}

impl BrickKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrickKind::Neutral => "neutral",
            BrickKind::Red => "red",
            BrickKind::Green => "green",
        }
    }
}

/// A falling brick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub pos: Vec3,
}

impl Brick {
    /// Whether the brick centre sits inside a bucket's catch window
    pub fn over_bucket(&self, bucket: &Bucket) -> bool {
        super::collision::in_bucket_window(self.pos.x, bucket.x)
    }
}

/// A ring of perpetually falling bricks of one kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickPool {
    pub kind: BrickKind,
    /// Vertical distance between neighbouring slots
    pub spacing: f32,
    pub bricks: Vec<Brick>,
}

impl BrickPool {
    /// Lay out `capacity` bricks in a column starting at `first_y`, each in a
    /// random lane.
    pub fn spawn(
        kind: BrickKind,
        capacity: usize,
        first_y: f32,
        spacing: f32,
        rng: &mut Pcg32,
    ) -> Self {
        let mut bricks = Vec::with_capacity(capacity);
        let mut y = first_y;
        for i in 0..capacity {
            if i != 0 {
                y += spacing;
            }
            let x = rng.random_range(-LANE_HALF_WIDTH..=LANE_HALF_WIDTH);
            bricks.push(Brick {
                pos: Vec3::new(x, y, 0.0),
            });
        }
        Self {
            kind,
            spacing,
            bricks,
        }
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    /// Send brick `index` back to the top of the column.
    ///
    /// The new height is measured from the last slot of the pool so the
    /// column keeps its spacing. The lane (x) is kept.
    pub fn recycle(&mut self, index: usize) {
        let Some(top) = self.bricks.last().map(|b| b.pos.y) else {
            return;
        };
        self.bricks[index].pos.y = top + self.spacing * index as f32;
    }
}

/// A laser shot slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Beam {
    pub pos: Vec3,
    /// Travel direction in degrees
    pub angle: f32,
    pub active: bool,
}

impl Beam {
    pub fn at_muzzle(turret: &Turret) -> Self {
        Self {
            pos: turret.pos,
            angle: turret.angle,
            active: false,
        }
    }

    /// Pin an idle beam to the turret so the next shot leaves from the current aim
    pub fn track(&mut self, turret: &Turret) {
        self.angle = turret.angle;
        self.pos = turret.pos;
    }

    /// Stop the beam and park it at the muzzle (angle follows next tick)
    pub fn reset(&mut self, turret: &Turret) {
        self.pos.x = turret.pos.x;
        self.pos.y = turret.pos.y;
        self.active = false;
    }

    pub fn pos2(&self) -> Vec2 {
        self.pos.truncate()
    }
}

/// The laser turret on the left wall
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turret {
    pub pos: Vec3,
    /// Aim in degrees, positive is anticlockwise
    pub angle: f32,
    /// Simulated time of the last shot
    pub last_fire: f64,
    /// Beam slot the next shot uses
    pub next_slot: usize,
}

impl Default for Turret {
    fn default() -> Self {
        Self {
            pos: Vec3::new(TURRET_X, 0.0, 0.0),
            angle: 0.0,
            last_fire: 0.0,
            next_slot: 0,
        }
    }
}

impl Turret {
    /// Rotate anticlockwise by one step
    pub fn aim_left(&mut self) {
        self.set_angle(self.angle + AIM_STEP);
    }

    /// Rotate clockwise by one step
    pub fn aim_right(&mut self) {
        self.set_angle(self.angle - AIM_STEP);
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = angle.clamp(-TURRET_MAX_ANGLE, TURRET_MAX_ANGLE);
    }

    pub fn raise(&mut self) {
        self.lift(TURRET_KEY_STEP);
    }

    pub fn lower(&mut self) {
        self.lift(-TURRET_KEY_STEP);
    }

    /// Move vertically by `dy`, clamped to the rail
    pub fn lift(&mut self, dy: f32) {
        self.pos.y = (self.pos.y + dy).clamp(TURRET_MIN_Y, TURRET_MAX_Y);
    }

    pub fn ready_to_fire(&self, now: f64) -> bool {
        now - self.last_fire >= FIRE_COOLDOWN
    }
}

/// A catcher bucket; only its x moves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub x: f32,
}

impl Bucket {
    pub fn new(x: f32) -> Self {
        Self {
            x: x.clamp(-BUCKET_LIMIT, BUCKET_LIMIT),
        }
    }

    pub fn shift(&mut self, dx: f32) {
        self.x = (self.x + dx).clamp(-BUCKET_LIMIT, BUCKET_LIMIT);
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, BUCKET_Y)
    }
}

/// Which of the two mirrors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MirrorId {
    /// Lower right, 45°: turns rightward beams upward
    First,
    /// Upper right, 135°: turns upward beams leftward
    Second,
}

/// A fixed mirror segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mirror {
    pub id: MirrorId,
    pub center: Vec2,
    /// Orientation in degrees
    pub angle: f32,
    pub half_length: f32,
}

impl Mirror {
    /// Half-extent of the mirror's bounding box
    pub fn reach(&self) -> Vec2 {
        let rad = self.angle.to_radians();
        Vec2::new(rad.cos().abs(), rad.sin().abs()) * self.half_length
    }
}

pub const MIRRORS: [Mirror; 2] = [
    Mirror {
        id: MirrorId::First,
        center: Vec2::new(3.4, -2.0),
        angle: 45.0,
        half_length: MIRROR_HALF_LENGTH,
    },
    Mirror {
        id: MirrorId::Second,
        center: Vec2::new(3.4, 2.4),
        angle: 135.0,
        half_length: MIRROR_HALF_LENGTH,
    },
];

/// Something the player should hear about
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BeamFired { slot: usize },
    BeamReflected { slot: usize, mirror: MirrorId },
    /// Shot down by a beam
    BrickDestroyed { kind: BrickKind, delta: i32 },
    /// Landed in a bucket (right or wrong one)
    BrickCaught { kind: BrickKind, delta: i32 },
    /// Fell past the kill line
    BrickMissed { kind: BrickKind, delta: i32 },
    LifeLost,
    GameOver,
}

impl GameEvent {
    /// Score and life changes are reported to the player; the rest are internal
    pub fn is_reportable(&self) -> bool {
        match self {
            GameEvent::BrickDestroyed { .. }
            | GameEvent::BrickCaught { .. }
            | GameEvent::LifeLost => true,
            GameEvent::BrickMissed { delta, .. } => *delta != 0,
            _ => false,
        }
    }

    /// Score change carried by the event
    pub fn score_delta(&self) -> i32 {
        match self {
            GameEvent::BrickDestroyed { delta, .. }
            | GameEvent::BrickCaught { delta, .. }
            | GameEvent::BrickMissed { delta, .. } => *delta,
            _ => 0,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the brick lanes were drawn from
    pub seed: u64,
    pub phase: GamePhase,
    pub score: i32,
    pub lives: i32,
    /// Brick fall multiplier in [1, 10]
    pub speed: f32,
    /// Simulated seconds since start
    pub clock: f64,
    /// Ticks since start
    pub frame: u64,
    pub turret: Turret,
    pub beams: [Beam; BEAM_SLOTS],
    pub neutral: BrickPool,
    pub red: BrickPool,
    pub green: BrickPool,
    pub red_bucket: Bucket,
    pub green_bucket: Bucket,
    /// Events raised by the latest tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with the given lane seed and starting lives
    pub fn new(seed: u64, lives: i32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let neutral = BrickPool::spawn(
            BrickKind::Neutral,
            NEUTRAL_POOL_SIZE,
            NEUTRAL_FIRST_Y,
            NEUTRAL_SPACING,
            &mut rng,
        );
        let red = BrickPool::spawn(
            BrickKind::Red,
            COLORED_POOL_SIZE,
            RED_FIRST_Y,
            COLORED_SPACING,
            &mut rng,
        );
        let green = BrickPool::spawn(
            BrickKind::Green,
            COLORED_POOL_SIZE,
            GREEN_FIRST_Y,
            COLORED_SPACING,
            &mut rng,
        );

        let turret = Turret::default();
        let beams = [Beam::at_muzzle(&turret); BEAM_SLOTS];

        Self {
            seed,
            phase: if lives > 0 {
                GamePhase::Playing
            } else {
                GamePhase::GameOver
            },
            score: 0,
            lives,
            speed: MIN_SPEED,
            clock: 0.0,
            frame: 0,
            turret,
            beams,
            neutral,
            red,
            green,
            red_bucket: Bucket::new(RED_BUCKET_START),
            green_bucket: Bucket::new(GREEN_BUCKET_START),
            events: Vec::new(),
        }
    }

    pub fn pool(&self, kind: BrickKind) -> &BrickPool {
        match kind {
            BrickKind::Neutral => &self.neutral,
            BrickKind::Red => &self.red,
            BrickKind::Green => &self.green,
        }
    }

    pub fn pool_mut(&mut self, kind: BrickKind) -> &mut BrickPool {
        match kind {
            BrickKind::Neutral => &mut self.neutral,
            BrickKind::Red => &mut self.red,
            BrickKind::Green => &mut self.green,
        }
    }

    /// Clamp-adjust the brick fall multiplier
    pub fn change_speed(&mut self, delta: f32) {
        self.speed = (self.speed + delta).clamp(MIN_SPEED, MAX_SPEED);
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn active_beams(&self) -> usize {
        self.beams.iter().filter(|b| b.active).count()
    }
}
