//! The world: one ninja (until it dies), the surviving bats, and the
//! per-tick sequence that ties them together.
//!
//! Tick order is fixed: bats move, then the ninja (and its stars), then
//! stars knock out bats, then surviving bats may end the game.  Because
//! stars are resolved first, a bat shot on the same tick it reaches the
//! ninja dies harmlessly.

use glam::DVec2;
use log::{debug, info};
use rand::Rng;

use crate::collision::colliding;
use crate::config::{GameConfig, Tuning};
use crate::entities::{Bat, DrawCommand, Entity, Ninja, TickContext};
use crate::input::{Action, InputState};

pub const GAME_OVER_TEXT: &str = "GAME OVER";
pub const GAME_OVER_FONT_SIZE: u16 = 48;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

#[derive(Clone, Debug)]
pub struct World {
    /// `None` once a bat has caught the ninja. Never comes back.
    player: Option<Ninja>,
    bats: Vec<Bat>,
    screen: DVec2,
    /// Gameplay ticks run so far.
    frame: u64,
}

impl World {
    /// Build the opening layout: the ninja at its start position and a
    /// diagonal line of bats with random drift.
    pub fn new(config: &GameConfig, rng: &mut impl Rng) -> Self {
        let tuning: &Tuning = &config.tuning;
        let bats = (0..config.bat_count)
            .map(|i| {
                let pos = config.bat_spacing * i as f64;
                Bat::spawn(pos, tuning.bat_size, tuning.bat_max_speed, rng)
            })
            .collect();
        let player = Ninja::new(config.player_start, *tuning);

        info!(
            "world created: {}x{} screen, {} bats",
            config.screen.x, config.screen.y, config.bat_count
        );
        Self::with_entities(config.screen, Some(player), bats)
    }

    /// Assemble a world from explicit parts.
    pub fn with_entities(screen: DVec2, player: Option<Ninja>, bats: Vec<Bat>) -> Self {
        Self {
            player,
            bats,
            screen,
            frame: 0,
        }
    }

    /// Advance the simulation by one tick. Does nothing after game over.
    pub fn update(&mut self, input: &InputState) {
        let Some(player) = self.player.as_mut() else {
            return;
        };
        self.frame += 1;
        let ctx = TickContext {
            screen: self.screen,
            input,
        };

        for bat in &mut self.bats {
            bat.update(&ctx);
        }
        player.update(&ctx);

        // Stars are not used up by a hit
        let stars = &player.stars;
        let before = self.bats.len();
        self.bats
            .retain(|bat| !stars.iter().any(|star| colliding(bat, star)));
        let shot = before - self.bats.len();
        if shot > 0 {
            debug!("frame {}: {} bat(s) shot, {} left", self.frame, shot, self.bats.len());
        }

        let caught = self.bats.iter().any(|bat| colliding(&*player, bat));
        if caught {
            info!("GAME OVER at frame {}", self.frame);
            self.player = None;
        }
    }

    /// Apply a one-shot action from a discrete key press.
    pub fn keypress(&mut self, action: Action) {
        if let Some(player) = self.player.as_mut() {
            player.act(action);
        }
    }

    pub fn status(&self) -> GameStatus {
        match self.player {
            Some(_) => GameStatus::Playing,
            None => GameStatus::GameOver,
        }
    }

    pub fn player(&self) -> Option<&Ninja> {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> Option<&mut Ninja> {
        self.player.as_mut()
    }

    pub fn bats(&self) -> &[Bat] {
        &self.bats
    }

    pub fn screen(&self) -> DVec2 {
        self.screen
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Everything to draw this frame: the ninja and its stars (or the
    /// game-over banner), then the bats.
    pub fn draw_commands(&self) -> Vec<DrawCommand> {
        let mut out = Vec::new();
        match &self.player {
            Some(player) => player.draw(&mut out),
            None => out.push(DrawCommand::Banner {
                text: GAME_OVER_TEXT,
                at: self.screen / 2.0,
                font_size: GAME_OVER_FONT_SIZE,
            }),
        }
        for bat in &self.bats {
            bat.draw(&mut out);
        }
        out
    }
}
