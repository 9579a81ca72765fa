//! Error types for the platform side of the game

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// Terminal setup, drawing or teardown failed
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The logger could not be installed
    #[error("logger setup failed: {0}")]
    Logger(String),

    /// The input reader thread went away
    #[error("input reader disconnected")]
    InputDisconnected,
}

pub type Result<T> = std::result::Result<T, GameError>;
