//! The game loop
//!
//! `Game` owns the simulation state and runs one frame at a time:
//! input snapshot, tick, console reports, draw list, present. A real
//! window drives `frame` from its redraw callback; the binary and the
//! tests drive `run` with a scripted input source and a headless surface.

use std::io::Write;

use crate::error::GameError;
use crate::platform::{Console, InputSnapshot, InputSource};
use crate::renderer::{Camera, DrawList, RenderSurface, SurfaceError, draw_frame, render};
use crate::settings::Settings;
use crate::sim::{GameState, tick};

/// What happened during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Keep running
    Continue,
    /// Lives ran out
    GameOver,
    /// The player closed the window or pressed quit
    Closed,
}

/// A running game bound to a console sink
pub struct Game<W: Write> {
    pub state: GameState,
    settings: Settings,
    camera: Camera,
    draw_list: DrawList,
    console: Console<W>,
}

impl<W: Write> Game<W> {
    /// Start a game with `lives` lives, writing reports to `out`
    pub fn new(settings: &Settings, lives: i32, out: W) -> Self {
        let mut state = GameState::new(settings.seed, lives);
        state.speed = settings.initial_speed;
        log::info!(
            "New game: seed {}, {} lives, speed {}",
            settings.seed,
            lives,
            state.speed
        );

        Self {
            state,
            settings: settings.clone(),
            camera: Camera::default(),
            draw_list: DrawList::new(),
            console: Console::new(out),
        }
    }

    pub fn into_console(self) -> Console<W> {
        self.console
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    /// Run one frame with the given input and present it on `surface`
    pub fn frame<S: RenderSurface + ?Sized>(
        &mut self,
        snapshot: &InputSnapshot,
        surface: &mut S,
    ) -> Result<FrameOutcome, GameError> {
        if self.state.is_over() {
            return Ok(FrameOutcome::GameOver);
        }
        if snapshot.wants_quit() {
            log::info!("Quit requested at frame {}", self.state.frame);
            return Ok(FrameOutcome::Closed);
        }

        let window = (self.settings.window_width, self.settings.window_height);
        let input = snapshot.to_tick_input(&self.state, window);
        tick(&mut self.state, &input, self.settings.frame_dt);
        self.console.report(&self.state)?;

        render(&self.state, &mut self.draw_list);
        match draw_frame(surface, &self.camera, &self.draw_list) {
            Ok(()) => {}
            Err(SurfaceError::Lost) => {
                log::warn!("Render surface lost, reconfiguring");
                surface.reconfigure();
            }
            Err(e) => {
                log::error!("Render error: {}", e);
                return Err(e.into());
            }
        }

        if self.state.is_over() {
            self.console.game_over(&self.state)?;
            return Ok(FrameOutcome::GameOver);
        }
        Ok(FrameOutcome::Continue)
    }

    /// Run frames until the game ends, the player quits or `max_frames` have run
    pub fn run<I, S>(
        &mut self,
        input: &mut I,
        surface: &mut S,
        max_frames: Option<u64>,
    ) -> Result<FrameOutcome, GameError>
    where
        I: InputSource + ?Sized,
        S: RenderSurface + ?Sized,
    {
        let mut frames = 0u64;
        loop {
            if max_frames.is_some_and(|max| frames >= max) {
                log::info!("Frame limit reached, score {}", self.state.score);
                return Ok(FrameOutcome::Continue);
            }
            let snapshot = input.poll(&self.state);
            let outcome = self.frame(&snapshot, surface)?;
            frames += 1;
            if outcome != FrameOutcome::Continue {
                return Ok(outcome);
            }
        }
    }
}
