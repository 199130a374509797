use thiserror::Error;

use crate::config::ConfigError;

/// Everything that can stop the game from starting or keep the terminal
/// from being driven. Gameplay itself never fails.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logger already initialised: {0}")]
    Logger(#[from] log::SetLoggerError),
}
