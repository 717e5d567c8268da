use std::path::Path;
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::{tempdir, TempDir};

use term_invaders::config::Config;
use term_invaders::display::FrameBuffer;
use term_invaders::entities::{Bullet, Position};
use term_invaders::game::*;
use term_invaders::highscores::{Highscore, Ledger};
use term_invaders::input::{translate, InputEvent, Key};
use term_invaders::menu::{MenuItem, Starfield, MAX_STARS};

const WIDTH: u16 = 100;
const HEIGHT: u16 = 40;

fn rng() -> StdRng {
    StdRng::seed_from_u64(11)
}

fn config(dir: &Path) -> Config {
    Config {
        highscore_path: dir.join("highscores"),
        freeze: Duration::ZERO,
        ..Config::default()
    }
}

fn game_with(ledger: Ledger) -> (Game, TempDir) {
    let dir = tempdir().unwrap();
    let game = Game::new(config(dir.path()), ledger, WIDTH, HEIGHT);
    (game, dir)
}

/// Start a round and drop the "Level 1" hold.
fn playing(game: &mut Game, rng: &mut StdRng) {
    game.handle_key(Key::Enter, rng);
    assert_eq!(game.mode_kind(), ModeKind::Play);
    game.take_freeze();
}

/// Put an alien bullet one row above the ship so the next step hits it.
fn doom_ship(game: &mut Game, score: u32) {
    let round = game.round_mut().unwrap();
    round.ship.lives = 1;
    round.ship.score = score;
    let target = round.ship.pos().offset(2, -1);
    round.alien_bullets[0] = Some(Bullet::from_alien(target));
}

fn name_entry_phase(game: &Game) -> bool {
    matches!(game.mode(), Mode::Play(session) if matches!(session.phase, PlayPhase::NameEntry(_)))
}

fn drawn(game: &Game) -> FrameBuffer {
    let mut frame = FrameBuffer::new(WIDTH, HEIGHT);
    game.draw(&mut frame);
    frame
}

// ── Viewport ──────────────────────────────────────────────────────────────────

#[test]
fn minimum_viewport() {
    assert!(fits(56, 30));
    assert!(!fits(55, 30));
    assert!(!fits(56, 29));
}

#[test]
fn starts_in_menu_when_the_viewport_fits() {
    let (game, _dir) = game_with(Ledger::default());
    assert_eq!(game.mode_kind(), ModeKind::Menu);
    assert_eq!(game.highlighted(), MenuItem::Play);
}

#[test]
fn starts_in_warn_when_the_viewport_is_too_small() {
    let dir = tempdir().unwrap();
    let game = Game::new(config(dir.path()), Ledger::default(), 40, 20);
    assert_eq!(game.mode_kind(), ModeKind::Warn);
}

#[test]
fn resizing_moves_between_warn_and_menu() {
    let mut rng = rng();
    let (mut game, _dir) = game_with(Ledger::default());

    game.resize(40, 20);
    assert_eq!(game.mode_kind(), ModeKind::Warn);

    game.handle_key(Key::Enter, &mut rng);
    assert_eq!(game.mode_kind(), ModeKind::Warn);

    game.resize(WIDTH, HEIGHT);
    assert_eq!(game.mode_kind(), ModeKind::Menu);
}

#[test]
fn shrinking_mid_round_abandons_it() {
    let mut rng = rng();
    let (mut game, _dir) = game_with(Ledger::default());
    game.handle_key(Key::Enter, &mut rng);
    assert!(game.freeze().is_some());

    game.resize(50, 20);

    assert_eq!(game.mode_kind(), ModeKind::Warn);
    assert!(game.round().is_none());
    assert!(game.freeze().is_none());
}

#[test]
fn growing_mid_round_keeps_playing() {
    let mut rng = rng();
    let (mut game, _dir) = game_with(Ledger::default());
    playing(&mut game, &mut rng);

    game.resize(120, 45);
    assert_eq!(game.mode_kind(), ModeKind::Play);
    assert_eq!(game.round().map(|round| round.width()), Some(120));
}

#[test]
fn shrinking_mid_round_keeps_the_ship_on_screen() {
    let mut rng = rng();
    let (mut game, _dir) = game_with(Ledger::default());
    playing(&mut game, &mut rng);

    game.resize(WIDTH, 32);
    assert_eq!(game.mode_kind(), ModeKind::Play);
    assert_eq!(game.round().map(|round| round.ship.pos().y), Some(27));

    let mut frame = FrameBuffer::new(WIDTH, 32);
    game.draw(&mut frame);
    assert_eq!(frame.row_text(29).trim(), "<====>");
}

// ── Menu ──────────────────────────────────────────────────────────────────────

#[test]
fn menu_highlight_wraps_both_ways() {
    let mut rng = rng();
    let (mut game, _dir) = game_with(Ledger::default());

    game.handle_key(Key::Left, &mut rng);
    assert_eq!(game.highlighted(), MenuItem::Howto);
    game.handle_key(Key::Right, &mut rng);
    assert_eq!(game.highlighted(), MenuItem::Play);
    game.handle_key(Key::Right, &mut rng);
    assert_eq!(game.highlighted(), MenuItem::Highscores);

    game.handle_key(Key::Up, &mut rng);
    assert_eq!(game.highlighted(), MenuItem::Highscores);
    assert_eq!(game.mode_kind(), ModeKind::Menu);
}

#[test]
fn howto_returns_to_menu_on_esc() {
    let mut rng = rng();
    let (mut game, _dir) = game_with(Ledger::default());
    game.handle_key(Key::Left, &mut rng);
    game.handle_key(Key::Space, &mut rng);
    assert_eq!(game.mode_kind(), ModeKind::Howto);

    game.handle_key(Key::Enter, &mut rng);
    assert_eq!(game.mode_kind(), ModeKind::Howto);

    game.handle_key(Key::Esc, &mut rng);
    assert_eq!(game.mode_kind(), ModeKind::Menu);
    assert_eq!(game.highlighted(), MenuItem::Howto);
}

#[test]
fn highscores_return_to_menu_on_esc() {
    let mut rng = rng();
    let (mut game, _dir) = game_with(Ledger::default());
    game.handle_key(Key::Right, &mut rng);
    game.handle_key(Key::Enter, &mut rng);
    assert_eq!(game.mode_kind(), ModeKind::Highscores);

    game.handle_key(Key::Esc, &mut rng);
    assert_eq!(game.mode_kind(), ModeKind::Menu);
    assert_eq!(game.highlighted(), MenuItem::Highscores);
}

#[test]
fn menu_items_cycle() {
    assert_eq!(MenuItem::Play.next(), MenuItem::Highscores);
    assert_eq!(MenuItem::Howto.next(), MenuItem::Play);
    assert_eq!(MenuItem::Play.prev(), MenuItem::Howto);
}

#[test]
fn starfield_grows_one_star_per_step_and_stays_on_screen() {
    let mut rng = rng();
    let mut stars = Starfield::default();
    for _ in 0..3 {
        stars.update(WIDTH, HEIGHT, &mut rng);
    }
    assert_eq!(stars.stars().len(), 3);

    for _ in 0..200 {
        stars.update(WIDTH, HEIGHT, &mut rng);
    }
    assert_eq!(stars.stars().len(), MAX_STARS);
    assert!(stars.stars().iter().all(|star| {
        (0..i32::from(WIDTH)).contains(&star.pos.x) && (0..i32::from(HEIGHT)).contains(&star.pos.y)
    }));
}

// ── Play ──────────────────────────────────────────────────────────────────────

#[test]
fn starting_play_announces_level_one() {
    let mut rng = rng();
    let (mut game, _dir) = game_with(Ledger::default());
    game.handle_key(Key::Enter, &mut rng);

    assert_eq!(game.mode_kind(), ModeKind::Play);
    assert_eq!(game.freeze().map(|freeze| freeze.banner.as_str()), Some("Level 1"));
    assert!(drawn(&game).contains_text("Level 1"));
}

#[test]
fn nothing_advances_while_frozen() {
    let mut rng = rng();
    let (mut game, _dir) = game_with(Ledger::default());
    game.handle_key(Key::Enter, &mut rng);

    game.update(&mut rng);
    game.update(&mut rng);
    assert_eq!(game.round().map(|round| round.frame), Some(0));

    assert!(game.take_freeze().is_some());
    game.update(&mut rng);
    assert_eq!(game.round().map(|round| round.frame), Some(1));
}

#[test]
fn play_keys_steer_and_fire() {
    let mut rng = rng();
    let (mut game, _dir) = game_with(Ledger::default());
    playing(&mut game, &mut rng);

    game.handle_key(Key::Left, &mut rng);
    game.handle_key(Key::Space, &mut rng);

    let round = game.round().unwrap();
    assert_eq!(round.ship.pos(), Position::new(45, 35));
    assert!(round.ship.bullet.is_some());
}

#[test]
fn losing_a_life_holds_the_level_banner() {
    let mut rng = rng();
    let (mut game, _dir) = game_with(Ledger::default());
    playing(&mut game, &mut rng);
    doom_ship(&mut game, 0);
    game.round_mut().unwrap().ship.lives = 3;

    game.update(&mut rng);

    assert_eq!(game.round().map(|round| round.ship.lives), Some(2));
    assert_eq!(game.freeze().map(|freeze| freeze.banner.as_str()), Some("Level 1"));
}

#[test]
fn qualifying_game_over_asks_for_a_name_and_saves_it() {
    let mut rng = rng();
    let (mut game, dir) = game_with(Ledger::default());
    playing(&mut game, &mut rng);
    doom_ship(&mut game, 500);

    game.update(&mut rng);
    assert_eq!(game.freeze().map(|freeze| freeze.banner.as_str()), Some("GAME OVER"));
    assert!(!name_entry_phase(&game));
    game.take_freeze();

    game.update(&mut rng);
    assert!(name_entry_phase(&game));
    assert!(game.accepts_text());
    assert!(drawn(&game).contains_text("You set a new highscore!"));

    for glyph in "q1".chars() {
        game.handle_key(Key::Char(glyph), &mut rng);
    }
    game.handle_key(Key::Enter, &mut rng);
    assert!(name_entry_phase(&game));
    assert!(drawn(&game).contains_text("Name must be 3-10 characters long!"));

    game.handle_key(Key::Char('x'), &mut rng);
    game.handle_key(Key::Enter, &mut rng);

    assert_eq!(game.mode_kind(), ModeKind::Menu);
    assert!(!game.accepts_text());
    assert_eq!(game.ledger().entries(), &[Highscore::new("q1x", 500)]);
    let saved = std::fs::read_to_string(dir.path().join("highscores")).unwrap();
    assert_eq!(saved, "q1x:500");
}

#[test]
fn non_qualifying_game_over_returns_to_menu() {
    let mut rng = rng();
    let (ledger, _) = Ledger::parse("aaa:50\nbbb:40\nccc:30\nddd:20\neee:10");
    let (mut game, dir) = game_with(ledger);
    playing(&mut game, &mut rng);
    doom_ship(&mut game, 10);

    game.update(&mut rng);
    game.take_freeze();
    game.update(&mut rng);

    assert_eq!(game.mode_kind(), ModeKind::Menu);
    assert_eq!(game.ledger().len(), 5);
    assert!(!dir.path().join("highscores").exists());
}

// ── Rendering ─────────────────────────────────────────────────────────────────

#[test]
fn menu_draws_logo_and_items() {
    let (game, _dir) = game_with(Ledger::default());
    let frame = drawn(&game);
    assert!(frame.contains_text("PLAY"));
    assert!(frame.contains_text("HIGHSCORES"));
    assert!(frame.contains_text("HOWTO"));
}

#[test]
fn highscores_panel_pads_with_placeholders() {
    let mut rng = rng();
    let (ledger, _) = Ledger::parse("alice:120");
    let (mut game, _dir) = game_with(ledger);
    game.handle_key(Key::Right, &mut rng);
    game.handle_key(Key::Enter, &mut rng);

    let frame = drawn(&game);
    assert!(frame.contains_text("alice      0000000120"));
    assert!(frame.contains_text("?????      0000000000"));
    assert!(frame.contains_text("Press ESC to exit"));
}

#[test]
fn howto_lists_rewards() {
    let mut rng = rng();
    let (mut game, _dir) = game_with(Ledger::default());
    game.handle_key(Key::Left, &mut rng);
    game.handle_key(Key::Enter, &mut rng);

    let frame = drawn(&game);
    assert!(frame.contains_text("= 10 pts"));
    assert!(frame.contains_text("= 30 pts"));
    assert!(frame.contains_text("Space to fire."));
}

#[test]
fn play_draws_the_hud() {
    let mut rng = rng();
    let (mut game, _dir) = game_with(Ledger::default());
    playing(&mut game, &mut rng);

    let frame = drawn(&game);
    assert!(frame.contains_text("Score: 0"));
    assert!(frame.contains_text("Level 1"));
    assert!(frame.contains_text("Lives: A A A A A "));
    assert!(frame.contains_text("<====>"));
}

#[test]
fn a_large_life_count_is_drawn_as_a_number() {
    let mut rng = rng();
    let dir = tempdir().unwrap();
    let config = Config {
        initial_lives: 40,
        ..config(dir.path())
    };
    let mut game = Game::new(config, Ledger::default(), WIDTH, HEIGHT);
    playing(&mut game, &mut rng);

    let frame = drawn(&game);
    let hud = frame.row_text(1);
    assert!(hud.trim_end().ends_with("Lives: A x40"), "{hud}");
    assert!(hud.contains("Score: 0"));
    assert!(hud.contains("Level 1"));
}

#[test]
fn warn_explains_the_problem() {
    let dir = tempdir().unwrap();
    let game = Game::new(config(dir.path()), Ledger::default(), 60, 20);
    let mut frame = FrameBuffer::new(60, 20);
    game.draw(&mut frame);
    assert!(frame.contains_text("Your terminal screen is too small."));
}

// ── Input translation ─────────────────────────────────────────────────────────

fn press(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

#[test]
fn keys_translate_to_game_keys() {
    assert_eq!(translate(press(KeyCode::Left)), Some(InputEvent::Key(Key::Left)));
    assert_eq!(translate(press(KeyCode::Char(' '))), Some(InputEvent::Key(Key::Space)));
    assert_eq!(translate(press(KeyCode::Char('q'))), Some(InputEvent::Key(Key::Char('q'))));
    assert_eq!(translate(press(KeyCode::Tab)), None);
}

#[test]
fn ctrl_c_interrupts() {
    let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert_eq!(translate(event), Some(InputEvent::Interrupt));
}

#[test]
fn releases_are_ignored() {
    let event = Event::Key(KeyEvent::new_with_kind(
        KeyCode::Enter,
        KeyModifiers::NONE,
        KeyEventKind::Release,
    ));
    assert_eq!(translate(event), None);
}

#[test]
fn resizes_pass_through() {
    assert_eq!(translate(Event::Resize(80, 24)), Some(InputEvent::Resize(80, 24)));
}
