//! Brick Breaker entry point
//!
//! Prompts for the number of lives, then runs the game headless with the
//! autopilot at the controls. A windowed front end plugs in its own
//! `InputSource` and `RenderSurface` the same way.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use brick_breaker::platform::console::{LIVES_PROMPT, read_starting_lives};
use brick_breaker::platform::{BANNER, ScriptedInput};
use brick_breaker::renderer::HeadlessSurface;
use brick_breaker::{FrameOutcome, Game, Settings};

#[derive(Parser, Debug)]
#[command(name = "brick-breaker")]
#[command(about = "Shoot the black bricks, catch the coloured ones")]
struct Args {
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the brick lanes (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,

    /// Starting lives; skips the prompt
    #[arg(long)]
    lives: Option<i32>,

    /// Take starting lives from the settings instead of asking
    #[arg(long)]
    no_prompt: bool,

    /// Stop after this many frames
    #[arg(long, default_value_t = 3600)]
    frames: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref()).context("failed to load settings")?;
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }

    println!("{BANNER}");
    let lives = if args.lives.is_some() || args.no_prompt {
        settings.resolve_lives(args.lives)?
    } else {
        print!("{LIVES_PROMPT} ");
        io::stdout().flush()?;
        read_starting_lives(io::stdin().lock()).context("failed to read starting lives")?
    };

    log::info!("Brick Breaker starting with {} lives", lives);
    let mut game = Game::new(&settings, lives, io::stdout());
    let mut input = ScriptedInput::demo();
    let mut surface = HeadlessSurface::open(settings.window_width, settings.window_height)
        .context("failed to open render surface")?;

    let outcome = game
        .run(&mut input, &mut surface, Some(args.frames))
        .context("game loop failed")?;

    match outcome {
        FrameOutcome::GameOver => {}
        FrameOutcome::Closed => println!("Bye"),
        FrameOutcome::Continue => println!(
            "Stopped after {} frames. SCORE: {} LIVES LEFT: {}",
            game.state.frame, game.state.score, game.state.lives
        ),
    }
    log::info!("Presented {} frames", surface.frames_presented);
    Ok(())
}
