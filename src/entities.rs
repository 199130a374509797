//! Game entities: the ninja, its stars and the bats.
//!
//! Each entity owns its kinematic state and implements [`Entity`]: one
//! `update` per tick, and `draw`, which describes what the renderer should
//! show without touching any output device.

use glam::DVec2;
use log::trace;
use rand::Rng;

use crate::collision::Body;
use crate::compute::{advance, angle_to_vector};
use crate::config::Tuning;
use crate::input::{Action, InputState};

// ── Shared interface ──────────────────────────────────────────────────────────

/// What every entity sees during a tick.
#[derive(Clone, Copy, Debug)]
pub struct TickContext<'a> {
    pub screen: DVec2,
    pub input: &'a InputState,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Ninja,
    Bat,
}

/// Renderer-independent description of one thing to draw.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// An image of `size`, centred on `center` and rotated by `angle` degrees.
    Sprite {
        kind: SpriteKind,
        center: DVec2,
        size: DVec2,
        angle: f64,
    },
    /// A single text glyph at `at`.
    Glyph { ch: char, at: DVec2 },
    /// Fixed text centred on `at`.
    Banner {
        text: &'static str,
        at: DVec2,
        font_size: u16,
    },
}

pub trait Entity: Body {
    fn update(&mut self, ctx: &TickContext<'_>);
    fn draw(&self, out: &mut Vec<DrawCommand>);
}

// ── Stars ─────────────────────────────────────────────────────────────────────

/// A thrown star. Flies straight and expires when it leaves the screen;
/// it never wraps.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    /// `None` once the star has left the screen.
    pub pos: Option<DVec2>,
    pub vel: DVec2,
    pub size: DVec2,
}

impl Star {
    /// A star leaving `pos` along `angle` degrees at `speed`.
    pub fn new(pos: DVec2, angle: f64, speed: f64, size: DVec2) -> Self {
        Self {
            pos: Some(pos),
            vel: angle_to_vector(angle) * speed,
            size,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.pos.is_none()
    }
}

impl Body for Star {
    fn position(&self) -> Option<DVec2> {
        self.pos
    }

    fn size(&self) -> DVec2 {
        self.size
    }
}

impl Entity for Star {
    fn update(&mut self, ctx: &TickContext<'_>) {
        let Some(pos) = self.pos else {
            return;
        };
        let next = pos + self.vel;
        // Hard boundary, edges inclusive
        let on_screen =
            (0.0..=ctx.screen.x).contains(&next.x) && (0.0..=ctx.screen.y).contains(&next.y);
        self.pos = on_screen.then_some(next);
    }

    fn draw(&self, out: &mut Vec<DrawCommand>) {
        if let Some(at) = self.pos {
            out.push(DrawCommand::Glyph { ch: '*', at });
        }
    }
}

// ── Bats ──────────────────────────────────────────────────────────────────────

/// A bat drifting forever across the torus.
#[derive(Clone, Debug, PartialEq)]
pub struct Bat {
    pub pos: DVec2,
    pub vel: DVec2,
    pub size: DVec2,
}

impl Bat {
    pub fn new(pos: DVec2, vel: DVec2, size: DVec2) -> Self {
        Self { pos, vel, size }
    }

    /// A bat at `pos` whose velocity components are drawn independently
    /// from `[0, max_speed)`.
    pub fn spawn(pos: DVec2, size: DVec2, max_speed: f64, rng: &mut impl Rng) -> Self {
        let mut component = || {
            if max_speed > 0.0 {
                rng.gen_range(0.0..max_speed)
            } else {
                0.0
            }
        };
        let vel = DVec2::new(component(), component());
        Self::new(pos, vel, size)
    }
}

impl Body for Bat {
    fn position(&self) -> Option<DVec2> {
        Some(self.pos)
    }

    fn size(&self) -> DVec2 {
        self.size
    }
}

impl Entity for Bat {
    fn update(&mut self, ctx: &TickContext<'_>) {
        self.pos = advance(self.pos, self.vel, ctx.screen);
    }

    fn draw(&self, out: &mut Vec<DrawCommand>) {
        out.push(DrawCommand::Sprite {
            kind: SpriteKind::Bat,
            center: self.pos,
            size: self.size,
            angle: 0.0,
        });
    }
}

// ── Ninja ─────────────────────────────────────────────────────────────────────

/// Direction of the ninja's spin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    /// Counter-clockwise on screen.
    Left,
    /// Clockwise on screen.
    Right,
}

impl Turn {
    pub fn sign(self) -> f64 {
        match self {
            Turn::Left => -1.0,
            Turn::Right => 1.0,
        }
    }
}

/// The player.
#[derive(Clone, Debug, PartialEq)]
pub struct Ninja {
    pub pos: DVec2,
    pub vel: DVec2,
    /// Heading in degrees; 0 points right, 90 points down.
    pub angle: f64,
    /// Spin speed, reset to 1 by every turn and decayed by friction.
    pub angle_vel: f64,
    pub angle_dir: Turn,
    pub size: DVec2,
    /// Stars in flight, oldest first.
    pub stars: Vec<Star>,
    pub tuning: Tuning,
}

impl Ninja {
    /// A ninja at `pos` facing right and drifting slowly that way.
    pub fn new(pos: DVec2, tuning: Tuning) -> Self {
        Self {
            pos,
            vel: DVec2::X,
            angle: 0.0,
            angle_vel: 0.0,
            angle_dir: Turn::Right,
            size: tuning.ninja_size,
            stars: Vec::new(),
            tuning,
        }
    }

    /// Start spinning in `direction` at unit speed.
    pub fn turn(&mut self, direction: Turn) {
        self.angle_dir = direction;
        self.angle_vel = 1.0;
    }

    /// Replace the current velocity with full thrust along the heading.
    pub fn thrust(&mut self) {
        self.vel = angle_to_vector(self.angle) * self.tuning.thrust_speed;
    }

    /// Throw a star from the current position along the heading.
    pub fn shoot(&mut self) {
        trace!(
            "star thrown at ({:.1}, {:.1}) heading {:.1}",
            self.pos.x,
            self.pos.y,
            self.angle
        );
        self.stars.push(Star::new(
            self.pos,
            self.angle,
            self.tuning.star_speed,
            self.tuning.star_size,
        ));
    }

    /// Apply a single action, as a key press does.
    pub fn act(&mut self, action: Action) {
        match action {
            Action::TurnLeft => self.turn(Turn::Left),
            Action::TurnRight => self.turn(Turn::Right),
            Action::Thrust => self.thrust(),
            Action::Shoot => self.shoot(),
        }
    }
}

impl Body for Ninja {
    fn position(&self) -> Option<DVec2> {
        Some(self.pos)
    }

    fn size(&self) -> DVec2 {
        self.size
    }
}

impl Entity for Ninja {
    fn update(&mut self, ctx: &TickContext<'_>) {
        // Held keys; no cooldown, so a held shoot key throws every tick
        for action in [Action::TurnLeft, Action::TurnRight, Action::Thrust, Action::Shoot] {
            if ctx.input.is_held(action) {
                self.act(action);
            }
        }

        self.angle += self.angle_dir.sign() * self.tuning.turn_rate * self.angle_vel;
        self.pos = advance(self.pos, self.vel, ctx.screen);

        self.vel *= self.tuning.friction;
        self.angle_vel *= self.tuning.friction;

        for star in &mut self.stars {
            star.update(ctx);
        }
        self.stars.retain(|star| !star.is_expired());
    }

    fn draw(&self, out: &mut Vec<DrawCommand>) {
        out.push(DrawCommand::Sprite {
            kind: SpriteKind::Ninja,
            center: self.pos,
            size: self.size,
            angle: self.angle,
        });
        for star in &self.stars {
            star.draw(out);
        }
    }
}
