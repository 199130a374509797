//! Game configuration
//!
//! Every field has a default, so a missing `ninja_star.toml` (or a partial
//! one) plays exactly like the stock game.

use std::path::{Path, PathBuf};

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Default location of the optional config file, relative to the working directory.
pub const CONFIG_PATH: &str = "ninja_star.toml";

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// A value parsed but makes no sense for the game
    #[error("Invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },

    /// A key binding names a key we do not know
    #[error("Unknown key name: {0}")]
    UnknownKey(String),
}

/// Gameplay constants. Copied into each ninja so it can thrust and shoot
/// without outside help.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Velocity and spin multiplier applied every tick.
    pub friction: f64,
    /// Speed the ninja jumps to on thrust.
    pub thrust_speed: f64,
    /// Degrees turned per tick at full angular speed.
    pub turn_rate: f64,
    pub star_speed: f64,
    pub ninja_size: DVec2,
    pub star_size: DVec2,
    pub bat_size: DVec2,
    /// Bat velocity components are drawn from `[0, bat_max_speed)`.
    pub bat_max_speed: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            friction: 0.95,
            thrust_speed: 2.0,
            turn_rate: 2.0,
            star_speed: 4.0,
            ninja_size: DVec2::new(60.0, 60.0),
            star_size: DVec2::new(2.0, 2.0),
            bat_size: DVec2::new(30.0, 30.0),
            bat_max_speed: 2.0,
        }
    }
}

/// Key names bound to each action. See [`crate::input::parse_key`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    pub turn_left: Vec<String>,
    pub turn_right: Vec<String>,
    pub thrust: Vec<String>,
    pub shoot: Vec<String>,
    /// Keys that turn right once per press instead of while held.
    pub quick_turn_right: Vec<String>,
}

impl Default for KeyConfig {
    fn default() -> Self {
        let names =
            |list: &[&str]| -> Vec<String> { list.iter().map(|s| s.to_string()).collect() };
        Self {
            turn_left: names(&["left", "a"]),
            turn_right: names(&["right", "d"]),
            thrust: names(&["up", "w"]),
            shoot: names(&["space"]),
            quick_turn_right: names(&["e"]),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log records go here; the terminal itself is the game screen.
    pub file: PathBuf,
    /// Default filter when `RUST_LOG` is unset (`error` .. `trace`).
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("ninja_star.log"),
            level: "info".to_string(),
        }
    }
}

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Size of the playing field in world units.
    pub screen: DVec2,
    pub player_start: DVec2,
    pub bat_count: usize,
    /// Bat `i` starts at `i * bat_spacing`.
    pub bat_spacing: DVec2,
    /// Target frame duration in milliseconds.
    pub frame_ms: u64,
    /// Frames a key stays down after its last press or repeat event, for
    /// terminals that never report releases.
    pub hold_window: u64,
    pub tuning: Tuning,
    pub keys: KeyConfig,
    pub log: LogConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen: DVec2::new(800.0, 600.0),
            player_start: DVec2::new(100.0, 300.0),
            bat_count: 8,
            bat_spacing: DVec2::new(100.0, 50.0),
            frame_ms: 16,
            hold_window: 8,
            tuning: Tuning::default(),
            keys: KeyConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.screen.x > 0.0 && self.screen.y > 0.0 && self.screen.is_finite()) {
            return Err(invalid("screen", "both axes must be positive and finite"));
        }
        if !self.player_start.is_finite() {
            return Err(invalid("player_start", "must be finite"));
        }
        if !self.bat_spacing.is_finite() {
            return Err(invalid("bat_spacing", "must be finite"));
        }
        if self.frame_ms == 0 {
            return Err(invalid("frame_ms", "must be at least 1"));
        }
        if self.hold_window == 0 {
            return Err(invalid("hold_window", "must be at least 1"));
        }

        let t = &self.tuning;
        if !(0.0..=1.0).contains(&t.friction) {
            return Err(invalid("tuning.friction", "must lie in [0, 1]"));
        }
        for (field, size) in [
            ("tuning.ninja_size", t.ninja_size),
            ("tuning.star_size", t.star_size),
            ("tuning.bat_size", t.bat_size),
        ] {
            if !(size.x >= 0.0 && size.y >= 0.0 && size.is_finite()) {
                return Err(invalid(field, "must be non-negative and finite"));
            }
        }
        for (field, value) in [
            ("tuning.thrust_speed", t.thrust_speed),
            ("tuning.turn_rate", t.turn_rate),
            ("tuning.star_speed", t.star_speed),
        ] {
            if !value.is_finite() {
                return Err(invalid(field, "must be finite"));
            }
        }
        if !(t.bat_max_speed >= 0.0 && t.bat_max_speed.is_finite()) {
            return Err(invalid("tuning.bat_max_speed", "must be non-negative and finite"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}
