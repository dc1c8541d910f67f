//! Error types for startup and the running game loop

use std::fmt;
use std::io;

use crate::renderer::SurfaceError;

/// Problems detected before the first frame
#[derive(Debug)]
pub enum StartupError {
    /// Starting lives was not an integer
    InvalidLives(String),
    /// Starting lives must be at least one
    NonPositiveLives(i32),
    /// Nothing to read at the prompt
    MissingLives,
    ConfigRead { path: String, source: io::Error },
    ConfigParse { path: String, source: serde_json::Error },
    InvalidConfig(String),
    /// The render surface could not be acquired
    Surface(String),
    Io(io::Error),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLives(text) => write!(f, "starting lives must be a number, got {text:?}"),
            Self::NonPositiveLives(n) => write!(f, "starting lives must be positive, got {n}"),
            Self::MissingLives => write!(f, "no starting lives given"),
            Self::ConfigRead { path, source } => {
                write!(f, "failed to read config {path}: {source}")
            }
            Self::ConfigParse { path, source } => {
                write!(f, "failed to parse config {path}: {source}")
            }
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::Surface(msg) => write!(f, "failed to acquire render surface: {msg}"),
            Self::Io(e) => write!(f, "console error: {e}"),
        }
    }
}

impl std::error::Error for StartupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ConfigRead { source, .. } => Some(source),
            Self::ConfigParse { source, .. } => Some(source),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StartupError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Fatal errors while the game is running
#[derive(Debug)]
pub enum GameError {
    Surface(SurfaceError),
    Console(io::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surface(e) => write!(f, "{e}"),
            Self::Console(e) => write!(f, "console error: {e}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Surface(e) => Some(e),
            Self::Console(e) => Some(e),
        }
    }
}

impl From<SurfaceError> for GameError {
    fn from(e: SurfaceError) -> Self {
        Self::Surface(e)
    }
}

impl From<io::Error> for GameError {
    fn from(e: io::Error) -> Self {
        Self::Console(e)
    }
}
