//! Input snapshots
//!
//! A windowing layer collects raw input between frames and hands the game one
//! `InputSnapshot` per tick. The snapshot is translated into simulation
//! controls here, including the hover-and-scroll mouse gestures.

use std::collections::VecDeque;

use glam::Vec2;

use crate::consts::*;
use crate::sim::{Control, GameState, TickInput};
use crate::window_to_world;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    A,
    D,
    W,
    S,
    M,
    N,
    Space,
    Q,
    Escape,
}

/// Everything the input collector saw since the previous tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    /// Cursor position in window pixels (last value wins)
    pub cursor: Vec2,
    /// Vertical scroll since last tick; positive is up
    pub scroll: f32,
    pub left_click: bool,
    pub right_click: bool,
    /// Key presses and repeats, in arrival order
    pub keys: Vec<Key>,
    /// Modifiers held while the keys were pressed
    pub right_ctrl: bool,
    pub right_alt: bool,
    /// Window close was requested
    pub close_requested: bool,
    /// Let the autopilot play
    pub idle_mode: bool,
}

impl InputSnapshot {
    pub fn keys(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Whether the player asked to leave (window close, Q or Escape)
    pub fn wants_quit(&self) -> bool {
        self.close_requested || self.keys.iter().any(|k| matches!(k, Key::Q | Key::Escape))
    }

    /// Translate the snapshot into simulation controls.
    ///
    /// `window` is the window size in pixels; it maps the cursor into the field.
    pub fn to_tick_input(&self, state: &GameState, window: (u32, u32)) -> TickInput {
        let mut controls = Vec::new();
        let cursor = window_to_world(
            self.cursor.x,
            self.cursor.y,
            window.0 as f32,
            window.1 as f32,
        );

        let over_turret = hovering_turret(cursor, state);
        if over_turret {
            if self.left_click {
                controls.push(Control::Lift(TURRET_CLICK_STEP));
            }
            if self.right_click {
                controls.push(Control::Lift(-TURRET_CLICK_STEP));
            }
        }

        if self.scroll != 0.0 {
            let up = self.scroll > 0.0;
            let step = if up { BUCKET_STEP } else { -BUCKET_STEP };
            if over_turret {
                controls.push(if up {
                    Control::AimLeft
                } else {
                    Control::AimRight
                });
            } else if hovering_bucket(cursor, state.red_bucket.x) {
                controls.push(Control::MoveRedBucket(step));
            } else if hovering_bucket(cursor, state.green_bucket.x) {
                controls.push(Control::MoveGreenBucket(step));
            }
        }

        for key in &self.keys {
            match key {
                Key::Right | Key::Left => {
                    let step = if *key == Key::Right {
                        BUCKET_STEP
                    } else {
                        -BUCKET_STEP
                    };
                    if self.right_ctrl {
                        controls.push(Control::MoveRedBucket(step));
                    }
                    if self.right_alt {
                        controls.push(Control::MoveGreenBucket(step));
                    }
                }
                Key::M => controls.push(Control::Speed(1)),
                Key::N => controls.push(Control::Speed(-1)),
                Key::A => controls.push(Control::AimLeft),
                Key::D => controls.push(Control::AimRight),
                Key::Space => controls.push(Control::Fire),
                Key::W => controls.push(Control::Raise),
                Key::S => controls.push(Control::Lower),
                Key::Q | Key::Escape => {}
            }
        }

        TickInput {
            controls,
            idle_mode: self.idle_mode,
        }
    }
}

/// Cursor is over the turret's grip at the left edge
fn hovering_turret(cursor: Vec2, state: &GameState) -> bool {
    cursor.x > -FIELD_HALF_EXTENT
        && cursor.x < -FIELD_HALF_EXTENT + 1.0
        && (cursor.y - state.turret.pos.y).abs() < 0.5
}

fn hovering_bucket(cursor: Vec2, bucket_x: f32) -> bool {
    (cursor.x - bucket_x).abs() < BUCKET_HALF_WIDTH
        && (cursor.y - BUCKET_Y).abs() < BUCKET_HALF_HEIGHT
}

/// Supplies one snapshot per frame
pub trait InputSource {
    fn poll(&mut self, state: &GameState) -> InputSnapshot;
}

/// Replays queued snapshots, then a fallback snapshot forever
#[derive(Debug, Default)]
pub struct ScriptedInput {
    queue: VecDeque<InputSnapshot>,
    fallback: InputSnapshot,
}

impl ScriptedInput {
    pub fn new(snapshots: impl IntoIterator<Item = InputSnapshot>) -> Self {
        Self {
            queue: snapshots.into_iter().collect(),
            fallback: InputSnapshot::default(),
        }
    }

    /// Autopilot on every frame
    pub fn demo() -> Self {
        Self {
            queue: VecDeque::new(),
            fallback: InputSnapshot {
                idle_mode: true,
                ..Default::default()
            },
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _state: &GameState) -> InputSnapshot {
        self.queue
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: (u32, u32) = (800, 800);

    fn over_turret(state: &GameState) -> Vec2 {
        // 100 px per unit, pixel y grows downward
        Vec2::new(50.0, (FIELD_HALF_EXTENT - state.turret.pos.y) * 100.0)
    }

    fn over_bucket(x: f32) -> Vec2 {
        Vec2::new((x + FIELD_HALF_EXTENT) * 100.0, (FIELD_HALF_EXTENT - BUCKET_Y) * 100.0)
    }

    #[test]
    fn test_keyboard_mapping() {
        let state = GameState::new(1, 3);
        let snapshot = InputSnapshot::keys([Key::A, Key::Space, Key::W, Key::M, Key::N, Key::D, Key::S]);
        let input = snapshot.to_tick_input(&state, WINDOW);
        assert_eq!(
            input.controls,
            vec![
                Control::AimLeft,
                Control::Fire,
                Control::Raise,
                Control::Speed(1),
                Control::Speed(-1),
                Control::AimRight,
                Control::Lower,
            ]
        );
    }

    #[test]
    fn test_arrows_need_modifier() {
        let state = GameState::new(1, 3);
        let bare = InputSnapshot::keys([Key::Right]);
        assert!(bare.to_tick_input(&state, WINDOW).controls.is_empty());

        let both = InputSnapshot {
            keys: vec![Key::Left],
            right_ctrl: true,
            right_alt: true,
            ..Default::default()
        };
        assert_eq!(
            both.to_tick_input(&state, WINDOW).controls,
            vec![
                Control::MoveRedBucket(-BUCKET_STEP),
                Control::MoveGreenBucket(-BUCKET_STEP)
            ]
        );
    }

    #[test]
    fn test_clicks_over_turret_lift_it() {
        let state = GameState::new(1, 3);
        let snapshot = InputSnapshot {
            cursor: over_turret(&state),
            left_click: true,
            ..Default::default()
        };
        assert_eq!(
            snapshot.to_tick_input(&state, WINDOW).controls,
            vec![Control::Lift(TURRET_CLICK_STEP)]
        );

        let away = InputSnapshot {
            cursor: Vec2::new(400.0, 400.0),
            left_click: true,
            right_click: true,
            ..Default::default()
        };
        assert!(away.to_tick_input(&state, WINDOW).controls.is_empty());
    }

    #[test]
    fn test_scroll_targets_hovered_entity() {
        let state = GameState::new(1, 3);

        let aim = InputSnapshot {
            cursor: over_turret(&state),
            scroll: 1.0,
            ..Default::default()
        };
        assert_eq!(aim.to_tick_input(&state, WINDOW).controls, vec![Control::AimLeft]);

        let red = InputSnapshot {
            cursor: over_bucket(state.red_bucket.x),
            scroll: -1.0,
            ..Default::default()
        };
        assert_eq!(
            red.to_tick_input(&state, WINDOW).controls,
            vec![Control::MoveRedBucket(-BUCKET_STEP)]
        );

        let green = InputSnapshot {
            cursor: over_bucket(state.green_bucket.x),
            scroll: 2.0,
            ..Default::default()
        };
        assert_eq!(
            green.to_tick_input(&state, WINDOW).controls,
            vec![Control::MoveGreenBucket(BUCKET_STEP)]
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(InputSnapshot::keys([Key::Q]).wants_quit());
        assert!(InputSnapshot::keys([Key::Escape]).wants_quit());
        assert!(!InputSnapshot::keys([Key::Space]).wants_quit());
    }

    #[test]
    fn test_scripted_input_falls_back() {
        let state = GameState::new(1, 3);
        let mut source = ScriptedInput::new([InputSnapshot::keys([Key::Space])]);
        assert_eq!(source.poll(&state).keys, vec![Key::Space]);
        assert_eq!(source.poll(&state), InputSnapshot::default());

        let mut demo = ScriptedInput::demo();
        assert!(demo.poll(&state).idle_mode);
    }
}
