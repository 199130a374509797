mod display;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{debug, info, warn};
use rand::thread_rng;

use ninja_star::config::{GameConfig, CONFIG_PATH};
use ninja_star::input::{InputState, KeyBindings};
use ninja_star::world::World;
use ninja_star::{logging, GameError};

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.  One tick per frame; after game over the
/// world stops changing and only the banner is redrawn.
///
/// Input model: every key event updates `input`, which tracks held keys
/// (expiring them after the hold window when the terminal never reports
/// releases).  The ninja then asks it which actions are held.  Keys bound as "press" keys act once per press event
/// instead.
fn game_loop<W: Write>(
    out: &mut W,
    world: &mut World,
    input: &mut InputState,
    rx: &mpsc::Receiver<Event>,
    frame_time: Duration,
) -> std::io::Result<()> {
    loop {
        let frame_start = Instant::now();
        input.begin_frame();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(event) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = event
            else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(());
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        _ => {}
                    }
                    if let Some(action) = input.bindings().press_action(&code) {
                        world.keypress(action);
                    }
                    input.key_down(code);
                }
                KeyEventKind::Repeat => input.key_down(code),
                KeyEventKind::Release => input.key_up(code),
            }
        }

        world.update(input);

        let (width, height) = terminal::size()?;
        display::render(out, world, width, height)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    let config = GameConfig::load_or_default(CONFIG_PATH)?;
    logging::init_or_warn(&config.log);
    info!(
        "configuration loaded ({} bats, {} ms frames)",
        config.bat_count, config.frame_ms
    );
    let bindings = KeyBindings::from_config(&config.keys)?;

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask for key-release events; terminals without support fall back to
    // the hold window.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    if keyboard_enhanced {
        debug!("keyboard enhancement enabled");
    } else {
        warn!("no key-release events; held keys expire after {} frames", config.hold_window);
    }

    // Blocking event reads live on their own thread so the frame loop never waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let mut world = World::new(&config, &mut thread_rng());
    let mut input = if keyboard_enhanced {
        InputState::with_release_events(bindings)
    } else {
        InputState::new(bindings, config.hold_window)
    };
    let result = game_loop(
        &mut out,
        &mut world,
        &mut input,
        &rx,
        Duration::from_millis(config.frame_ms),
    );

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!("session ended after {} frames ({:?})", world.frame(), world.status());
    result.map_err(GameError::from)
}
