use ninja_star::config::{GameConfig, Tuning};
use ninja_star::entities::*;
use ninja_star::input::{Action, InputState, KeyBindings};
use ninja_star::world::*;

use crossterm::event::KeyCode;
use glam::DVec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

const SCREEN: DVec2 = DVec2::new(800.0, 600.0);

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn still_bat(x: f64, y: f64) -> Bat {
    Bat::new(DVec2::new(x, y), DVec2::ZERO, DVec2::new(30.0, 30.0))
}

fn ninja_at(x: f64, y: f64) -> Ninja {
    let mut n = Ninja::new(DVec2::new(x, y), Tuning::default());
    n.vel = DVec2::ZERO;
    n
}

/// A star that hangs in place until something hits it.
fn parked_star(x: f64, y: f64) -> Star {
    Star::new(DVec2::new(x, y), 0.0, 0.0, DVec2::new(2.0, 2.0))
}

fn all_keys_held() -> InputState {
    let mut bindings = KeyBindings::default();
    bindings.bind(KeyCode::Left, Action::TurnLeft);
    bindings.bind(KeyCode::Up, Action::Thrust);
    bindings.bind(KeyCode::Char(' '), Action::Shoot);
    let mut input = InputState::new(bindings, 1000);
    input.key_down(KeyCode::Left);
    input.key_down(KeyCode::Up);
    input.key_down(KeyCode::Char(' '));
    input
}

// ── World::new ────────────────────────────────────────────────────────────────

#[test]
fn new_world_has_eight_bats_on_a_diagonal() {
    let w = World::new(&GameConfig::default(), &mut seeded_rng());
    assert_eq!(w.bats().len(), 8);
    for (i, bat) in w.bats().iter().enumerate() {
        let i = i as f64;
        assert_eq!(bat.pos, DVec2::new(i * 100.0, i * 50.0));
        assert_eq!(bat.size, DVec2::new(30.0, 30.0));
        assert!((0.0..2.0).contains(&bat.vel.x));
        assert!((0.0..2.0).contains(&bat.vel.y));
    }
}

#[test]
fn new_world_places_ninja_and_starts_playing() {
    let w = World::new(&GameConfig::default(), &mut seeded_rng());
    let n = w.player().expect("ninja present at start");
    assert_eq!(n.pos, DVec2::new(100.0, 300.0));
    assert_eq!(w.status(), GameStatus::Playing);
    assert_eq!(w.frame(), 0);
    assert_eq!(w.screen(), SCREEN);
}

#[test]
fn new_world_follows_config() {
    let config = GameConfig {
        bat_count: 3,
        bat_spacing: DVec2::new(10.0, 20.0),
        player_start: DVec2::new(400.0, 400.0),
        ..GameConfig::default()
    };
    let w = World::new(&config, &mut seeded_rng());
    assert_eq!(w.bats().len(), 3);
    assert_eq!(w.bats()[2].pos, DVec2::new(20.0, 40.0));
    assert_eq!(w.player().unwrap().pos, DVec2::new(400.0, 400.0));
}

#[test]
fn same_seed_same_world() {
    let a = World::new(&GameConfig::default(), &mut seeded_rng());
    let b = World::new(&GameConfig::default(), &mut seeded_rng());
    assert_eq!(a.bats(), b.bats());
}

// ── update ────────────────────────────────────────────────────────────────────

#[test]
fn quiet_tick_keeps_all_bats() {
    let mut w = World::new(&GameConfig::default(), &mut seeded_rng());
    w.update(&InputState::empty());
    assert_eq!(w.bats().len(), 8);
    assert_eq!(w.status(), GameStatus::Playing);
    assert_eq!(w.frame(), 1);
}

#[test]
fn bats_move_every_tick() {
    let bat = Bat::new(DVec2::new(500.0, 500.0), DVec2::new(1.5, 0.5), DVec2::new(30.0, 30.0));
    let mut w = World::with_entities(SCREEN, Some(ninja_at(100.0, 100.0)), vec![bat]);
    w.update(&InputState::empty());
    assert_eq!(w.bats()[0].pos, DVec2::new(501.5, 500.5));
}

#[test]
fn star_hit_removes_bat_but_keeps_star() {
    let mut ninja = ninja_at(100.0, 100.0);
    ninja.stars.push(parked_star(400.0, 300.0));
    let bats = vec![still_bat(400.0, 300.0), still_bat(600.0, 100.0)];
    let mut w = World::with_entities(SCREEN, Some(ninja), bats);

    w.update(&InputState::empty());

    assert_eq!(w.bats(), &[still_bat(600.0, 100.0)]);
    let n = w.player().unwrap();
    assert_eq!(n.stars.len(), 1);
    assert_eq!(n.stars[0].pos, Some(DVec2::new(400.0, 300.0)));
}

#[test]
fn one_star_can_take_out_several_bats() {
    let mut ninja = ninja_at(100.0, 100.0);
    ninja.stars.push(parked_star(400.0, 300.0));
    let bats = vec![
        still_bat(390.0, 300.0),
        still_bat(410.0, 300.0),
        still_bat(400.0, 290.0),
    ];
    let mut w = World::with_entities(SCREEN, Some(ninja), bats);
    w.update(&InputState::empty());
    assert!(w.bats().is_empty());
}

#[test]
fn bat_hit_by_several_stars_is_removed_once() {
    let mut ninja = ninja_at(100.0, 100.0);
    ninja.stars.push(parked_star(395.0, 300.0));
    ninja.stars.push(parked_star(405.0, 300.0));
    let bats = vec![still_bat(700.0, 500.0), still_bat(400.0, 300.0), still_bat(650.0, 50.0)];
    let mut w = World::with_entities(SCREEN, Some(ninja), bats);
    w.update(&InputState::empty());
    assert_eq!(w.bats(), &[still_bat(700.0, 500.0), still_bat(650.0, 50.0)]);
    assert_eq!(w.player().unwrap().stars.len(), 2);
}

#[test]
fn bat_touching_ninja_ends_the_game() {
    let mut w = World::with_entities(
        SCREEN,
        Some(ninja_at(300.0, 300.0)),
        vec![still_bat(340.0, 320.0)],
    );
    w.update(&InputState::empty());
    assert!(w.player().is_none());
    assert_eq!(w.status(), GameStatus::GameOver);
}

#[test]
fn game_over_is_terminal() {
    let bat = Bat::new(DVec2::new(300.0, 300.0), DVec2::new(1.0, 1.0), DVec2::new(30.0, 30.0));
    let mut w = World::with_entities(SCREEN, Some(ninja_at(300.0, 300.0)), vec![bat]);
    w.update(&InputState::empty());
    assert_eq!(w.status(), GameStatus::GameOver);
    let frame = w.frame();
    let bats = w.bats().to_vec();

    let input = all_keys_held();
    for _ in 0..10 {
        w.keypress(Action::Shoot);
        w.update(&input);
    }
    assert!(w.player().is_none());
    assert_eq!(w.frame(), frame);
    assert_eq!(w.bats(), bats.as_slice());
}

#[test]
fn star_kill_beats_ninja_death_on_the_same_tick() {
    let mut ninja = ninja_at(300.0, 300.0);
    ninja.stars.push(parked_star(300.0, 300.0));
    let mut w = World::with_entities(SCREEN, Some(ninja), vec![still_bat(300.0, 300.0)]);
    w.update(&InputState::empty());
    assert!(w.bats().is_empty());
    assert_eq!(w.status(), GameStatus::Playing);
}

#[test]
fn surviving_bat_still_kills_when_another_is_shot() {
    let mut ninja = ninja_at(300.0, 300.0);
    ninja.stars.push(parked_star(600.0, 300.0));
    let bats = vec![still_bat(600.0, 300.0), still_bat(310.0, 310.0)];
    let mut w = World::with_entities(SCREEN, Some(ninja), bats);
    w.update(&InputState::empty());
    assert_eq!(w.bats(), &[still_bat(310.0, 310.0)]);
    assert_eq!(w.status(), GameStatus::GameOver);
}

#[test]
fn held_input_reaches_the_ninja() {
    let mut w = World::with_entities(SCREEN, Some(ninja_at(100.0, 100.0)), Vec::new());
    w.update(&all_keys_held());
    let n = w.player().unwrap();
    assert_eq!(n.stars.len(), 1);
    assert_eq!(n.angle_dir, Turn::Left);
}

#[test]
fn stars_fly_off_and_disappear() {
    let mut ninja = ninja_at(790.0, 100.0);
    ninja.shoot();
    let mut w = World::with_entities(SCREEN, Some(ninja), Vec::new());
    let input = InputState::empty();
    w.update(&input);
    w.update(&input);
    assert_eq!(w.player().unwrap().stars.len(), 1);
    w.update(&input);
    assert!(w.player().unwrap().stars.is_empty());
}

// ── keypress ──────────────────────────────────────────────────────────────────

#[test]
fn keypress_applies_one_action() {
    let mut w = World::with_entities(SCREEN, Some(ninja_at(100.0, 100.0)), Vec::new());
    w.keypress(Action::TurnRight);
    w.keypress(Action::Shoot);
    let n = w.player().unwrap();
    assert_eq!(n.angle_dir, Turn::Right);
    assert_eq!(n.angle_vel, 1.0);
    assert_eq!(n.stars.len(), 1);
}

#[test]
fn player_mut_allows_direct_control() {
    let mut w = World::with_entities(SCREEN, Some(ninja_at(100.0, 100.0)), Vec::new());
    w.player_mut().unwrap().thrust();
    w.update(&InputState::empty());
    assert_eq!(w.player().unwrap().pos, DVec2::new(102.0, 100.0));
}

// ── draw_commands ─────────────────────────────────────────────────────────────

#[test]
fn playing_frame_draws_ninja_stars_then_bats() {
    let mut ninja = ninja_at(100.0, 100.0);
    ninja.shoot();
    let mut w = World::with_entities(SCREEN, Some(ninja), vec![still_bat(500.0, 500.0)]);
    w.keypress(Action::TurnLeft);
    let commands = w.draw_commands();
    assert_eq!(commands.len(), 3);
    assert!(matches!(commands[0], DrawCommand::Sprite { kind: SpriteKind::Ninja, .. }));
    assert!(matches!(commands[1], DrawCommand::Glyph { ch: '*', .. }));
    assert!(matches!(commands[2], DrawCommand::Sprite { kind: SpriteKind::Bat, .. }));
}

#[test]
fn game_over_frame_draws_banner_and_bats() {
    let w = World::with_entities(SCREEN, None, vec![still_bat(500.0, 500.0)]);
    let commands = w.draw_commands();
    assert_eq!(
        commands[0],
        DrawCommand::Banner {
            text: GAME_OVER_TEXT,
            at: DVec2::new(400.0, 300.0),
            font_size: GAME_OVER_FONT_SIZE,
        }
    );
    assert_eq!(commands.len(), 2);
    assert_eq!(GAME_OVER_TEXT, "GAME OVER");
}
