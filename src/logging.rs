//! Logger setup.
//!
//! The terminal is the game screen, so records are written to a file.

use std::fs::File;

use env_logger::{Builder, Env, Target};

use crate::config::LogConfig;
use crate::error::GameError;

/// Initialise the global logger from `config`. `RUST_LOG` overrides the
/// configured level.
pub fn init(config: &LogConfig) -> Result<(), GameError> {
    let file = File::create(&config.file)?;
    Builder::from_env(Env::default().default_filter_or(config.level.as_str()))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()?;
    Ok(())
}

/// Like [`init`], but a logger that cannot be set up only costs the log:
/// the reason goes to stderr and the game runs without one. Returns whether
/// logging is active.
pub fn init_or_warn(config: &LogConfig) -> bool {
    match init(config) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("warning: logging disabled ({}): {}", config.file.display(), e);
            false
        }
    }
}
