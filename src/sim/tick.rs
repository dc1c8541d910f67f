//! Per-frame simulation tick
//!
//! One call advances the game by exactly one displayed frame: controls are
//! applied, beams fly and collide, then bricks fall and score.

use super::autopilot;
use super::collision::{
    beam_hits_brick, beam_out_of_field, brick_targetable, mirror_struck, reflect_angle,
    reflection_nudge,
};
use super::state::{BrickKind, GameEvent, GamePhase, GameState, MIRRORS};
use crate::consts::*;
use crate::heading;

/// A single player command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Control {
    /// Rotate the turret anticlockwise by one step
    AimLeft,
    /// Rotate the turret clockwise by one step
    AimRight,
    /// Move the turret up by the keyboard step
    Raise,
    /// Move the turret down by the keyboard step
    Lower,
    /// Move the turret by an arbitrary amount (mouse clicks use a finer step)
    Lift(f32),
    Fire,
    MoveRedBucket(f32),
    MoveGreenBucket(f32),
    /// Change brick speed by whole steps
    Speed(i32),
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Commands in the order they arrived
    pub controls: Vec<Control>,
    /// Demo mode - the autopilot plays this tick
    pub idle_mode: bool,
}

impl TickInput {
    pub fn with(controls: impl IntoIterator<Item = Control>) -> Self {
        Self {
            controls: controls.into_iter().collect(),
            idle_mode: false,
        }
    }
}

/// Advance the game state by one frame of `dt` simulated seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    if state.phase == GamePhase::GameOver {
        return;
    }

    state.frame += 1;
    state.clock += f64::from(dt);

    if input.idle_mode {
        for control in autopilot::plan(state) {
            apply_control(state, control);
        }
    }
    for &control in &input.controls {
        apply_control(state, control);
    }

    for slot in 0..BEAM_SLOTS {
        update_beam(state, slot);
    }

    update_neutral_bricks(state);
    update_colored_bricks(state, BrickKind::Red);
    update_colored_bricks(state, BrickKind::Green);

    if state.lives <= 0 {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver);
        log::info!(
            "Game over after {} frames, final score {}",
            state.frame,
            state.score
        );
    }
}

/// Apply one clamped control to the state
pub fn apply_control(state: &mut GameState, control: Control) {
    match control {
        Control::AimLeft => state.turret.aim_left(),
        Control::AimRight => state.turret.aim_right(),
        Control::Raise => state.turret.raise(),
        Control::Lower => state.turret.lower(),
        Control::Lift(dy) => state.turret.lift(dy),
        Control::Fire => {
            fire(state);
        }
        Control::MoveRedBucket(dx) => state.red_bucket.shift(dx),
        Control::MoveGreenBucket(dx) => state.green_bucket.shift(dx),
        Control::Speed(delta) => state.change_speed(delta as f32),
    }
}

/// Arm the next beam slot if the cooldown has elapsed.
///
/// A slot still in flight keeps its position and heading. Returns the slot
/// that fired.
pub fn fire(state: &mut GameState) -> Option<usize> {
    if !state.turret.ready_to_fire(state.clock) {
        return None;
    }

    let slot = state.turret.next_slot;
    let beam = &mut state.beams[slot];
    if !beam.active {
        beam.track(&state.turret);
    }
    beam.active = true;

    state.turret.next_slot = (slot + 1) % BEAM_SLOTS;
    state.turret.last_fire = state.clock;
    state.events.push(GameEvent::BeamFired { slot });
    log::debug!("Beam {} fired at {:.1}°", slot, state.turret.angle);
    Some(slot)
}

fn update_beam(state: &mut GameState, slot: usize) {
    if !state.beams[slot].active {
        state.beams[slot].track(&state.turret);
    } else {
        // Mirrors first, in fixed order
        for mirror in &MIRRORS {
            let beam = &mut state.beams[slot];
            if mirror_struck(mirror, beam.pos2()) {
                beam.angle = reflect_angle(mirror.angle, beam.angle);
                let nudge = reflection_nudge(beam.angle);
                beam.pos.x += nudge.x;
                beam.pos.y += nudge.y;
                state.events.push(GameEvent::BeamReflected {
                    slot,
                    mirror: mirror.id,
                });
            }
        }

        // Every brick is tested even after a hit; the beam is back at the muzzle by then
        strike_bricks(state, slot, BrickKind::Neutral);
        for index in 0..state.red.len().max(state.green.len()) {
            strike_brick(state, slot, BrickKind::Red, index);
            strike_brick(state, slot, BrickKind::Green, index);
        }

        let beam = &mut state.beams[slot];
        if beam.active {
            let step = heading(beam.angle) * BEAM_STEP;
            beam.pos.x += step.x;
            beam.pos.y += step.y;
        }
    }

    let beam = &mut state.beams[slot];
    if beam_out_of_field(beam.pos2()) {
        beam.reset(&state.turret);
    }
}

fn strike_bricks(state: &mut GameState, slot: usize, kind: BrickKind) {
    for index in 0..state.pool(kind).len() {
        strike_brick(state, slot, kind, index);
    }
}

fn strike_brick(state: &mut GameState, slot: usize, kind: BrickKind, index: usize) {
    let Some(brick) = state.pool(kind).bricks.get(index).copied() else {
        return;
    };
    if !brick_targetable(brick.pos.y) {
        return;
    }
    if !beam_hits_brick(state.beams[slot].pos2(), brick.pos.truncate()) {
        return;
    }

    state.beams[slot].reset(&state.turret);
    state.pool_mut(kind).recycle(index);

    let delta = match kind {
        BrickKind::Neutral => DESTROY_REWARD,
        BrickKind::Red | BrickKind::Green => PENALTY,
    };
    state.score += delta;
    state.events.push(GameEvent::BrickDestroyed { kind, delta });
    log::debug!("Beam {} destroyed {} brick {}", slot, kind.as_str(), index);
}

fn update_neutral_bricks(state: &mut GameState) {
    let fall = FALL_STEP * state.speed;

    for index in 0..state.neutral.len() {
        let brick = state.neutral.bricks[index];
        if brick.pos.y <= CATCH_LINE
            && (brick.over_bucket(&state.green_bucket) || brick.over_bucket(&state.red_bucket))
        {
            state.neutral.recycle(index);
            state.lives -= 1;
            state.events.push(GameEvent::LifeLost);
            log::debug!("Neutral brick {} caught, {} lives left", index, state.lives);
        }

        if state.neutral.bricks[index].pos.y <= KILL_LINE {
            state.neutral.recycle(index);
            state.score += PENALTY;
            state.events.push(GameEvent::BrickMissed {
                kind: BrickKind::Neutral,
                delta: PENALTY,
            });
        }

        state.neutral.bricks[index].pos.y -= fall;
    }
}

fn update_colored_bricks(state: &mut GameState, kind: BrickKind) {
    let fall = FALL_STEP * state.speed;
    let (own, other) = match kind {
        BrickKind::Green => (state.green_bucket, state.red_bucket),
        _ => (state.red_bucket, state.green_bucket),
    };

    for index in 0..state.pool(kind).len() {
        let brick = state.pool(kind).bricks[index];
        let caught = if brick.pos.y > CATCH_LINE {
            None
        } else if brick.over_bucket(&own) {
            Some(CATCH_REWARD)
        } else if brick.over_bucket(&other) {
            Some(PENALTY)
        } else {
            None
        };

        if let Some(delta) = caught {
            state.pool_mut(kind).recycle(index);
            state.score += delta;
            state.events.push(GameEvent::BrickCaught { kind, delta });
        }

        let pool = state.pool_mut(kind);
        if pool.bricks[index].pos.y <= KILL_LINE {
            pool.recycle(index);
            state.events.push(GameEvent::BrickMissed { kind, delta: 0 });
        }

        state.pool_mut(kind).bricks[index].pos.y -= fall;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Beam, MirrorId};
    use glam::Vec3;
    use proptest::prelude::*;

    /// A state with every brick lifted well above the field
    fn quiet_state(lives: i32) -> GameState {
        let mut state = GameState::new(12345, lives);
        for kind in [BrickKind::Neutral, BrickKind::Red, BrickKind::Green] {
            for brick in &mut state.pool_mut(kind).bricks {
                brick.pos.y += 100.0;
            }
        }
        state
    }

    fn step(state: &mut GameState, controls: &[Control]) {
        tick(state, &TickInput::with(controls.iter().copied()), FRAME_DT);
    }

    #[test]
    fn test_bricks_fall_by_speed() {
        let mut state = quiet_state(3);
        let before = state.red.bricks[4].pos.y;
        step(&mut state, &[]);
        assert!((state.red.bricks[4].pos.y - (before - FALL_STEP)).abs() < 1e-3);

        step(&mut state, &[Control::Speed(4)]);
        assert_eq!(state.speed, 5.0);
        let y = state.red.bricks[4].pos.y;
        step(&mut state, &[]);
        assert!((state.red.bricks[4].pos.y - (y - 5.0 * FALL_STEP)).abs() < 1e-3);
    }

    #[test]
    fn test_neutral_brick_past_kill_line() {
        let mut state = quiet_state(3);
        state.neutral.bricks[5].pos = Vec3::new(0.0, KILL_LINE, 0.0);

        step(&mut state, &[]);

        assert_eq!(state.score, -10);
        assert_eq!(state.lives, 3);
        assert!(state.neutral.bricks[5].pos.y > BRICK_TARGET_BAND);
        assert!(state.events.contains(&GameEvent::BrickMissed {
            kind: BrickKind::Neutral,
            delta: PENALTY
        }));
    }

    #[test]
    fn test_neutral_brick_in_bucket_costs_a_life() {
        let mut state = quiet_state(3);
        state.neutral.bricks[8].pos = Vec3::new(state.green_bucket.x, CATCH_LINE, 0.0);

        step(&mut state, &[]);

        assert_eq!(state.lives, 2);
        assert_eq!(state.score, 0);
        assert!(state.events.contains(&GameEvent::LifeLost));
        assert!(state.neutral.bricks[8].pos.y > BRICK_TARGET_BAND);
    }

    #[test]
    fn test_red_brick_in_red_bucket() {
        let mut state = quiet_state(3);
        state.red.bricks[2].pos = Vec3::new(state.red_bucket.x, CATCH_LINE, 0.0);

        step(&mut state, &[]);

        assert_eq!(state.score, 100);
        assert!(state.red.bricks[2].pos.y > BRICK_TARGET_BAND);
    }

    #[test]
    fn test_colored_brick_in_wrong_bucket() {
        let mut state = quiet_state(3);
        state.green.bricks[2].pos = Vec3::new(state.red_bucket.x, CATCH_LINE, 0.0);

        step(&mut state, &[]);

        assert_eq!(state.score, -10);
        assert!(state.events.contains(&GameEvent::BrickCaught {
            kind: BrickKind::Green,
            delta: PENALTY
        }));
    }

    #[test]
    fn test_colored_brick_missed_is_free() {
        let mut state = quiet_state(3);
        state.red.bricks[9].pos = Vec3::new(0.0, KILL_LINE, 0.0);

        step(&mut state, &[]);

        assert_eq!(state.score, 0);
        assert!(state.red.bricks[9].pos.y > BRICK_TARGET_BAND);
        assert!(!state.events.iter().any(GameEvent::is_reportable));
    }

    #[test]
    fn test_brick_between_lines_outside_buckets_keeps_falling() {
        let mut state = quiet_state(3);
        state.red.bricks[1].pos = Vec3::new(0.0, -3.0, 0.0);
        step(&mut state, &[]);
        assert!((state.red.bricks[1].pos.y - (-3.0 - FALL_STEP)).abs() < 1e-5);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_fire_cooldown() {
        let mut state = quiet_state(3);

        // Clock starts at zero and so does the last shot
        tick(&mut state, &TickInput::with([Control::Fire]), 0.5);
        assert_eq!(state.active_beams(), 0);

        tick(&mut state, &TickInput::with([Control::Fire]), 0.5);
        assert_eq!(state.active_beams(), 1);
        assert!(state.beams[0].active);
        assert_eq!(state.turret.next_slot, 1);

        tick(&mut state, &TickInput::with([Control::Fire]), 0.5);
        assert_eq!(state.turret.next_slot, 1);

        tick(&mut state, &TickInput::with([Control::Fire]), 0.5);
        assert_eq!(state.turret.next_slot, 2);
        assert!(state.beams[1].active);
    }

    #[test]
    fn test_round_robin_wraps() {
        let mut state = quiet_state(3);
        for _ in 0..(BEAM_SLOTS + 1) {
            tick(&mut state, &TickInput::with([Control::Fire]), 1.0);
        }
        assert_eq!(state.turret.next_slot, 1);
    }

    #[test]
    fn test_firing_busy_slot_keeps_beam_in_flight() {
        let mut state = quiet_state(3);
        state.clock = 5.0;
        state.beams[0] = Beam {
            pos: Vec3::new(-10.0, 1.0, 0.0),
            angle: 180.0,
            active: true,
        };
        step(&mut state, &[Control::AimLeft, Control::Fire]);

        let beam = state.beams[0];
        assert!(beam.active);
        assert_eq!(beam.angle, 180.0);
        assert!((beam.pos.x - (-10.0 - BEAM_STEP)).abs() < 1e-4);
        assert!((beam.pos.y - 1.0).abs() < 1e-4);
        assert_eq!(state.turret.next_slot, 1);
    }

    #[test]
    fn test_idle_beam_tracks_muzzle() {
        let mut state = quiet_state(3);
        step(&mut state, &[Control::AimLeft, Control::Raise]);
        for beam in &state.beams {
            assert_eq!(beam.angle, AIM_STEP);
            assert_eq!(beam.pos, state.turret.pos);
        }
    }

    #[test]
    fn test_beam_advances_along_angle() {
        let mut state = quiet_state(3);
        state.clock = 5.0;
        step(&mut state, &[Control::Fire]);
        let beam = state.beams[0];
        assert!(beam.active);
        assert!((beam.pos.x - (TURRET_X + BEAM_STEP)).abs() < 1e-5);
        assert!(beam.pos.y.abs() < 1e-5);

        // Turret movement no longer drags the live beam
        step(&mut state, &[Control::Raise]);
        assert!(state.beams[0].pos.y.abs() < 1e-5);
    }

    #[test]
    fn test_beam_destroys_green_brick() {
        let mut state = quiet_state(3);
        state.green.bricks[6].pos = Vec3::new(1.0, 1.0, 0.0);
        state.beams[3] = Beam {
            pos: Vec3::new(1.0, 1.0, 0.0),
            angle: 0.0,
            active: true,
        };

        step(&mut state, &[]);

        assert_eq!(state.score, -10);
        assert!(!state.beams[3].active);
        assert_eq!(state.beams[3].pos.x, TURRET_X);
        assert!(state.green.bricks[6].pos.y > BRICK_TARGET_BAND);
    }

    #[test]
    fn test_beam_destroys_neutral_brick() {
        let mut state = quiet_state(3);
        state.neutral.bricks[10].pos = Vec3::new(0.5, -1.0, 0.0);
        state.beams[0] = Beam {
            pos: Vec3::new(0.45, -1.1, 0.0),
            angle: 30.0,
            active: true,
        };

        step(&mut state, &[]);

        assert_eq!(state.score, 100);
        assert!(!state.beams[0].active);
        assert!(state.events.contains(&GameEvent::BrickDestroyed {
            kind: BrickKind::Neutral,
            delta: DESTROY_REWARD
        }));
    }

    #[test]
    fn test_beam_ignores_bricks_outside_band() {
        let mut state = quiet_state(3);
        state.red.bricks[0].pos = Vec3::new(0.0, 3.95, 0.0);
        state.beams[0] = Beam {
            pos: Vec3::new(0.0, 3.7, 0.0),
            angle: 0.0,
            active: true,
        };
        step(&mut state, &[]);
        assert!(state.beams[0].active);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_first_mirror_reflection() {
        let mut state = quiet_state(3);
        state.beams[2] = Beam {
            pos: Vec3::new(3.3, -2.0, 0.0),
            angle: 0.0,
            active: true,
        };

        step(&mut state, &[]);

        assert_eq!(state.beams[2].angle, 90.0);
        assert!(state.events.contains(&GameEvent::BeamReflected {
            slot: 2,
            mirror: MirrorId::First
        }));
        // Nudged off the surface and then advanced upward
        assert!(state.beams[2].pos.y > -2.0 + BEAM_MESH_HALF_WIDTH);
    }

    #[test]
    fn test_second_mirror_reflection() {
        let mut state = quiet_state(3);
        state.beams[4] = Beam {
            pos: Vec3::new(3.45, 2.4, 0.0),
            angle: 90.0,
            active: true,
        };

        step(&mut state, &[]);

        assert_eq!(state.beams[4].angle, 180.0);
        assert!(state.beams[4].active);
        assert!(state.beams[4].pos.x < 3.45);
    }

    #[test]
    fn test_beam_leaving_field_resets() {
        let mut state = quiet_state(3);
        state.beams[1] = Beam {
            pos: Vec3::new(0.0, 3.85, 0.0),
            angle: 90.0,
            active: true,
        };
        step(&mut state, &[]);
        assert!(!state.beams[1].active);
        assert_eq!(state.beams[1].pos.y, state.turret.pos.y);
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut state = quiet_state(1);
        state.neutral.bricks[3].pos = Vec3::new(state.red_bucket.x, CATCH_LINE, 0.0);
        step(&mut state, &[]);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::GameOver));

        let frame = state.frame;
        step(&mut state, &[Control::Fire]);
        assert_eq!(state.frame, frame);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999, 5);
        let mut state2 = GameState::new(99999, 5);

        let inputs = [
            TickInput::with([Control::AimLeft]),
            TickInput::with([Control::Fire, Control::MoveRedBucket(0.3)]),
            TickInput {
                controls: vec![],
                idle_mode: true,
            },
            TickInput::default(),
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut state1, input, 0.25);
                tick(&mut state2, input, 0.25);
            }
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.lives, state2.lives);
        assert_eq!(state1.beams, state2.beams);
        assert_eq!(state1.neutral.bricks, state2.neutral.bricks);
    }

    fn any_control() -> impl Strategy<Value = Control> {
        prop_oneof![
            Just(Control::AimLeft),
            Just(Control::AimRight),
            Just(Control::Raise),
            Just(Control::Lower),
            (-1.0f32..1.0).prop_map(Control::Lift),
            Just(Control::Fire),
            (-1.0f32..1.0).prop_map(Control::MoveRedBucket),
            (-1.0f32..1.0).prop_map(Control::MoveGreenBucket),
            (-3i32..3).prop_map(Control::Speed),
        ]
    }

    proptest! {
        #[test]
        fn prop_controls_stay_clamped(controls in prop::collection::vec(any_control(), 0..64)) {
            let mut state = quiet_state(3);
            for control in controls {
                apply_control(&mut state, control);
                prop_assert!(state.turret.angle >= -TURRET_MAX_ANGLE && state.turret.angle <= TURRET_MAX_ANGLE);
                prop_assert!(state.turret.pos.y >= TURRET_MIN_Y && state.turret.pos.y <= TURRET_MAX_Y);
                prop_assert!(state.red_bucket.x >= -BUCKET_LIMIT && state.red_bucket.x <= BUCKET_LIMIT);
                prop_assert!(state.green_bucket.x >= -BUCKET_LIMIT && state.green_bucket.x <= BUCKET_LIMIT);
                prop_assert!(state.speed >= MIN_SPEED && state.speed <= MAX_SPEED);
            }
        }

        #[test]
        fn prop_bricks_fall_or_recycle(speed in 1i32..=10, ticks in 1usize..20) {
            let mut state = GameState::new(4242, 1000);
            state.speed = speed as f32;
            for _ in 0..ticks {
                let before: Vec<f32> = state.red.bricks.iter().map(|b| b.pos.y).collect();
                tick(&mut state, &TickInput::default(), FRAME_DT);
                for (y0, brick) in before.iter().zip(&state.red.bricks) {
                    let fell = (brick.pos.y - (y0 - FALL_STEP * speed as f32)).abs() < 1e-2;
                    let recycled = brick.pos.y > BRICK_TARGET_BAND && *y0 <= CATCH_LINE;
                    prop_assert!(fell || recycled);
                }
            }
        }
    }
}
