//! Held-key tracking.
//!
//! The frontend feeds raw key events in; the simulation only ever asks
//! questions.  Each key remembers the frame of its last press/repeat event,
//! and counts as down while that frame is no older than the hold window.
//! Terminals with keyboard-enhancement support send releases, so their keys
//! use [`InputState::with_release_events`] and stay down until released;
//! classic terminals only send repeated presses, so the key expires on its
//! own shortly after the repeats stop.

use std::collections::HashMap;

use crossterm::event::KeyCode;

use crate::config::{ConfigError, KeyConfig};

/// Logical things a key can ask the ninja to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    TurnLeft,
    TurnRight,
    Thrust,
    Shoot,
}

/// Mapping from key codes to actions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyBindings {
    held: HashMap<KeyCode, Action>,
    /// Keys acted on once per press rather than every held frame.
    pressed: HashMap<KeyCode, Action>,
}

impl KeyBindings {
    pub fn from_config(keys: &KeyConfig) -> Result<Self, ConfigError> {
        let mut bindings = Self::default();
        for (names, action) in [
            (&keys.turn_left, Action::TurnLeft),
            (&keys.turn_right, Action::TurnRight),
            (&keys.thrust, Action::Thrust),
            (&keys.shoot, Action::Shoot),
        ] {
            for name in names {
                bindings.bind(parse_key(name)?, action);
            }
        }
        for name in &keys.quick_turn_right {
            bindings.bind_press(parse_key(name)?, Action::TurnRight);
        }
        Ok(bindings)
    }

    /// Bind `code` to an action applied every frame it is held.
    pub fn bind(&mut self, code: KeyCode, action: Action) {
        self.held.insert(code, action);
    }

    /// Bind `code` to an action applied once per press event.
    pub fn bind_press(&mut self, code: KeyCode, action: Action) {
        self.pressed.insert(code, action);
    }

    pub fn held_action(&self, code: &KeyCode) -> Option<Action> {
        self.held.get(code).copied()
    }

    pub fn press_action(&self, code: &KeyCode) -> Option<Action> {
        self.pressed.get(code).copied()
    }

    fn codes_for(&self, action: Action) -> impl Iterator<Item = &KeyCode> {
        self.held
            .iter()
            .filter(move |(_, a)| **a == action)
            .map(|(code, _)| code)
    }
}

/// Turn a config key name into a key code.
///
/// Accepts `left`, `right`, `up`, `down`, `space`, `esc`, `enter`, `tab`
/// (any case) or a single character.
pub fn parse_key(name: &str) -> Result<KeyCode, ConfigError> {
    let code = match name.to_lowercase().as_str() {
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "space" => KeyCode::Char(' '),
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return Err(ConfigError::UnknownKey(name.to_string())),
            }
        }
    };
    Ok(code)
}

/// Keys currently held, as seen by the simulation.
#[derive(Clone, Debug)]
pub struct InputState {
    last_seen: HashMap<KeyCode, u64>,
    frame: u64,
    /// `None` when the terminal reports releases, so keys never expire.
    hold_window: Option<u64>,
    bindings: KeyBindings,
}

impl InputState {
    /// Keys expire `hold_window` frames after their last press or repeat.
    pub fn new(bindings: KeyBindings, hold_window: u64) -> Self {
        Self {
            last_seen: HashMap::new(),
            frame: 0,
            hold_window: Some(hold_window),
            bindings,
        }
    }

    /// Keys stay down until `key_up`, for terminals that send releases.
    pub fn with_release_events(bindings: KeyBindings) -> Self {
        Self {
            hold_window: None,
            ..Self::new(bindings, 1)
        }
    }

    /// Nothing held, nothing bound.
    pub fn empty() -> Self {
        Self::new(KeyBindings::default(), 1)
    }

    /// Advance the clock used to expire keys that never saw a release.
    pub fn begin_frame(&mut self) {
        self.frame += 1;
    }

    pub fn key_down(&mut self, code: KeyCode) {
        self.last_seen.insert(code, self.frame);
    }

    pub fn key_up(&mut self, code: KeyCode) {
        self.last_seen.remove(&code);
    }

    /// True while `code` is held: pressed and not released, and, without
    /// release events, seen within the hold window.
    pub fn is_down(&self, code: &KeyCode) -> bool {
        match (self.last_seen.get(code), self.hold_window) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(&last), Some(window)) => self.frame.saturating_sub(last) <= window,
        }
    }

    /// True if any key bound to `action` is down.
    pub fn is_held(&self, action: Action) -> bool {
        self.bindings.codes_for(action).any(|code| self.is_down(code))
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }
}
