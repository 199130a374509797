//! Rendering layer: all terminal I/O lives here.
//!
//! The world describes a frame as a list of draw commands in world units;
//! this module scales them onto the play area of whatever terminal size we
//! have and translates them into terminal commands.  No game logic here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use glam::DVec2;
use ninja_star::entities::{DrawCommand, SpriteKind};
use ninja_star::world::{GameStatus, World};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD: Color = Color::Yellow;
const C_NINJA: Color = Color::White;
const C_BAT: Color = Color::Magenta;
const C_STAR: Color = Color::Cyan;
const C_BANNER: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

/// Banners at or above this font size get a box drawn around them.
const BOXED_FONT_SIZE: u16 = 24;

/// Ninja glyphs for the eight compass headings, starting at 0° (right) and
/// turning clockwise on screen.
const HEADINGS: [char; 8] = ['→', '↘', '↓', '↙', '←', '↖', '↑', '↗'];

// ── Viewport ──────────────────────────────────────────────────────────────────

/// The rectangle of terminal cells inside the border.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Viewport {
    left: u16,
    top: u16,
    cols: u16,
    rows: u16,
}

impl Viewport {
    /// Row 0 is the HUD, row 1 and `height - 2` the border, the last row
    /// the controls hint.
    fn for_terminal(width: u16, height: u16) -> Self {
        Self {
            left: 1,
            top: 2,
            cols: width.saturating_sub(2).max(1),
            rows: height.saturating_sub(4).max(1),
        }
    }

    /// Cell showing the world point `p` on a field of size `screen`.
    fn cell(&self, p: DVec2, screen: DVec2) -> (u16, u16) {
        let scale = |v: f64, extent: f64, cells: u16| -> u16 {
            let c = (v / extent * f64::from(cells)).floor();
            c.clamp(0.0, f64::from(cells - 1)) as u16
        };
        (
            self.left + scale(p.x, screen.x, self.cols),
            self.top + scale(p.y, screen.y, self.rows),
        )
    }
}

fn heading_glyph(angle: f64) -> char {
    let octant = ((angle.rem_euclid(360.0) + 22.5) / 45.0).floor() as usize % 8;
    HEADINGS[octant]
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame onto a `width` x `height` terminal.
pub fn render<W: Write>(
    out: &mut W,
    world: &World,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let view = Viewport::for_terminal(width, height);
    draw_border(out, width, height)?;
    draw_hud(out, world, width)?;

    for command in world.draw_commands() {
        draw_command(out, &command, &view, world.screen())?;
    }

    draw_controls_hint(out, world, height)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, world: &World, width: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print("NINJA STAR"))?;

    let bats = format!("Bats: {}", world.bats().len());
    let rx = width.saturating_sub(bats.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(Print(&bats))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_command<W: Write>(
    out: &mut W,
    command: &DrawCommand,
    view: &Viewport,
    screen: DVec2,
) -> std::io::Result<()> {
    match command {
        DrawCommand::Sprite {
            kind: SpriteKind::Ninja,
            center,
            angle,
            ..
        } => {
            let (col, row) = view.cell(*center, screen);
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(style::SetForegroundColor(C_NINJA))?;
            out.queue(Print(heading_glyph(*angle)))?;
        }
        DrawCommand::Sprite {
            kind: SpriteKind::Bat,
            center,
            ..
        } => {
            //   ^v^    ← wings and body, centred on the bat
            let (col, row) = view.cell(*center, screen);
            let lx = col.saturating_sub(1).max(view.left);
            out.queue(cursor::MoveTo(lx, row))?;
            out.queue(style::SetForegroundColor(C_BAT))?;
            out.queue(Print("^v^"))?;
        }
        DrawCommand::Glyph { ch, at } => {
            let (col, row) = view.cell(*at, screen);
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(style::SetForegroundColor(C_STAR))?;
            out.queue(Print(*ch))?;
        }
        DrawCommand::Banner {
            text,
            at,
            font_size,
        } => draw_banner(out, text, view.cell(*at, screen), *font_size)?,
    }
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

/// Terminal text has one size, so large fonts are shown as a boxed banner.
fn draw_banner<W: Write>(
    out: &mut W,
    text: &str,
    (cx, cy): (u16, u16),
    font_size: u16,
) -> std::io::Result<()> {
    let inner = format!("    {}    ", text);
    let width = inner.chars().count();
    let lines = if font_size >= BOXED_FONT_SIZE {
        vec![
            format!("╔{}╗", "═".repeat(width)),
            format!("║{}║", inner),
            format!("╚{}╝", "═".repeat(width)),
        ]
    } else {
        vec![text.to_string()]
    };

    let start_row = cy.saturating_sub(lines.len() as u16 / 2);
    out.queue(style::SetForegroundColor(C_BANNER))?;
    for (i, line) in lines.iter().enumerate() {
        let col = cx.saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(line))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(
    out: &mut W,
    world: &World,
    height: u16,
) -> std::io::Result<()> {
    let hint = match world.status() {
        GameStatus::Playing => "← → : Turn   ↑ : Thrust   SPACE : Throw   E : Quick turn   Q : Quit",
        GameStatus::GameOver => "Q : Quit",
    };
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}
