//! Platform abstraction layer
//!
//! Handles the parts of the game that touch the outside world:
//! - Input snapshots and their mapping to simulation controls
//! - Console text (startup prompt, score reports)

pub mod console;
pub mod input;

pub use console::{BANNER, Console, read_starting_lives};
pub use input::{InputSnapshot, InputSource, Key, ScriptedInput};
