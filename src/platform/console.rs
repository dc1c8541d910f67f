//! Console I/O
//!
//! The startup prompt for the number of lives and the plain-text score
//! reports printed while the game runs.

use std::io::{self, BufRead, Write};

use crate::error::StartupError;
use crate::sim::{GameEvent, GameState};

/// Instructions printed before the prompt
pub const BANNER: &str = "\
                        WELCOME TO BRICK BREAKER

Shoot the black bricks with the laser. Catch red bricks in the red bucket and
green bricks in the green bucket. A black brick landing in a bucket costs a life.

  A / D               rotate the turret
  W / S               move the turret up / down
  SPACE               fire (one shot per second)
  Right Ctrl + <- ->  move the red bucket
  Right Alt + <- ->   move the green bucket
  M / N               speed bricks up / slow them down
  Mouse scroll        over the turret: rotate, over a bucket: move it
  Mouse click         over the turret: left raises, right lowers
  Q / Esc             quit

Scoring: +100 per black brick shot or coloured brick caught in its own bucket,
-10 for a coloured brick shot, a wrong bucket or a black brick reaching the floor.
";

/// Prompt shown before reading the starting lives
pub const LIVES_PROMPT: &str = "Press number of lives to start the game with:";

/// Read the starting lives from the first line of `reader`
pub fn read_starting_lives<R: BufRead>(mut reader: R) -> Result<i32, StartupError> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    parse_lives(&line)
}

/// Parse a lives count; it must be a positive integer
pub fn parse_lives(text: &str) -> Result<i32, StartupError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(StartupError::MissingLives);
    }
    let lives: i32 = text
        .parse()
        .map_err(|_| StartupError::InvalidLives(text.to_string()))?;
    if lives <= 0 {
        return Err(StartupError::NonPositiveLives(lives));
    }
    Ok(lives)
}

/// Writes score reports to a text sink (stdout in the binary)
#[derive(Debug)]
pub struct Console<W: Write> {
    out: W,
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Print one report per score or life change of the last tick.
    ///
    /// Each report shows the running totals right after its event, replayed
    /// from the totals the tick started with.
    pub fn report(&mut self, state: &GameState) -> io::Result<()> {
        let lives_lost = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::LifeLost))
            .count() as i32;
        let mut score = state.score - state.events.iter().map(GameEvent::score_delta).sum::<i32>();
        let mut lives = state.lives + lives_lost;

        for event in state.events.iter().filter(|e| e.is_reportable()) {
            score += event.score_delta();
            if matches!(event, GameEvent::LifeLost) {
                lives -= 1;
                writeln!(self.out, "Life Lost :(")?;
            }
            writeln!(self.out, "SCORE: {}", score)?;
            writeln!(self.out, "LIVES LEFT: {}", lives)?;
            writeln!(self.out)?;
        }
        self.out.flush()
    }

    pub fn game_over(&mut self, state: &GameState) -> io::Result<()> {
        writeln!(self.out, "GAME OVER")?;
        writeln!(self.out, "FINAL SCORE: {}", state.score)?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
