/// Top-level game state machine.
///
/// Exactly one mode is active at a time. Each mode owns its key handler,
/// per-frame update and renderer; `Game` dispatches all three on the current
/// mode, and modes change only through the `go_*` transitions, which also
/// reset mode-local decoration (clear colours, highlighted menu item).

use std::time::Duration;

use crossterm::style::Color;
use rand::Rng;

use crate::config::Config;
use crate::display::{self, Canvas, C_MENU};
use crate::highscores::{Highscore, Ledger, NameEntry};
use crate::input::Key;
use crate::menu::{MenuItem, Starfield};
use crate::round::{Round, RoundEvent, RoundRules};
use crate::sprites::{self, LOGO_Y};

/// Smallest play field the formation and barricades are laid out for.
pub const MIN_PLAY_HEIGHT: u16 = 30;

/// Whether a viewport is large enough for the menu art and the play field.
pub fn fits(width: u16, height: u16) -> bool {
    let min_width = sprites::logo_width() + 8;
    let min_height = (LOGO_Y + sprites::logo_height() + 5 + 2).max(i32::from(MIN_PLAY_HEIGHT));
    i32::from(width) >= min_width && i32::from(height) >= min_height
}

// ── Modes ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeKind {
    Menu,
    Howto,
    Play,
    Highscores,
    Warn,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayPhase {
    Running,
    /// Lives ran out; waiting one step for the GAME OVER freeze to show.
    GameOver,
    NameEntry(NameEntry),
}

/// The Play mode's state: the round in progress and where in its life it is.
#[derive(Clone, Debug)]
pub struct PlaySession {
    pub round: Round,
    pub phase: PlayPhase,
}

#[derive(Clone, Debug)]
pub enum Mode {
    Menu,
    Howto,
    Play(Box<PlaySession>),
    Highscores,
    Warn,
}

impl Mode {
    pub fn kind(&self) -> ModeKind {
        match self {
            Mode::Menu => ModeKind::Menu,
            Mode::Howto => ModeKind::Howto,
            Mode::Play(_) => ModeKind::Play,
            Mode::Highscores => ModeKind::Highscores,
            Mode::Warn => ModeKind::Warn,
        }
    }
}

/// A banner shown while the simulation is held still.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Freeze {
    pub banner: String,
    pub duration: Duration,
}

// ── Game ──────────────────────────────────────────────────────────────────────

pub struct Game {
    mode: Mode,
    highlighted: MenuItem,
    clear_colors: (Color, Color),
    ledger: Ledger,
    stars: Starfield,
    width: u16,
    height: u16,
    config: Config,
    freeze: Option<Freeze>,
}

impl Game {
    /// Start in the menu, or in the warning screen if the viewport is too small.
    pub fn new(config: Config, ledger: Ledger, width: u16, height: u16) -> Self {
        let mut game = Self {
            mode: Mode::Menu,
            highlighted: MenuItem::Play,
            clear_colors: (C_MENU, Color::Black),
            ledger,
            stars: Starfield::default(),
            width,
            height,
            config,
            freeze: None,
        };
        if fits(width, height) {
            game.go_menu();
        } else {
            game.go_warn();
        }
        game
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn mode_kind(&self) -> ModeKind {
        self.mode.kind()
    }

    pub fn highlighted(&self) -> MenuItem {
        self.highlighted
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn round(&self) -> Option<&Round> {
        match &self.mode {
            Mode::Play(session) => Some(&session.round),
            _ => None,
        }
    }

    pub fn round_mut(&mut self) -> Option<&mut Round> {
        match &mut self.mode {
            Mode::Play(session) => Some(&mut session.round),
            _ => None,
        }
    }

    pub fn freeze(&self) -> Option<&Freeze> {
        self.freeze.as_ref()
    }

    /// Hand the pending freeze to the driver, which holds the frame for its
    /// duration before the next step.
    pub fn take_freeze(&mut self) -> Option<Freeze> {
        self.freeze.take()
    }

    /// While a name is being typed every character is text, `q` included.
    pub fn accepts_text(&self) -> bool {
        matches!(&self.mode, Mode::Play(session) if matches!(session.phase, PlayPhase::NameEntry(_)))
    }

    // ── Transitions ───────────────────────────────────────────────────────────

    pub fn go_menu(&mut self) {
        self.enter(Mode::Menu, (C_MENU, Color::Black));
        self.highlighted = MenuItem::Play;
    }

    pub fn go_howto(&mut self) {
        self.enter(Mode::Howto, (C_MENU, Color::Black));
    }

    pub fn go_highscores(&mut self) {
        self.enter(Mode::Highscores, (C_MENU, Color::Black));
    }

    pub fn go_warn(&mut self) {
        self.enter(Mode::Warn, (C_MENU, Color::Black));
    }

    /// Begin a fresh round and announce level 1.
    pub fn go_play(&mut self, rng: &mut impl Rng) {
        let round = Round::new(self.width, self.height, RoundRules::from(&self.config), rng);
        let banner = level_banner(round.level);
        self.enter(
            Mode::Play(Box::new(PlaySession {
                round,
                phase: PlayPhase::Running,
            })),
            (Color::Black, Color::Black),
        );
        self.hold(banner);
    }

    fn enter(&mut self, mode: Mode, clear_colors: (Color, Color)) {
        tracing::debug!(from = ?self.mode.kind(), to = ?mode.kind(), "mode change");
        self.mode = mode;
        self.clear_colors = clear_colors;
    }

    fn hold(&mut self, banner: String) {
        self.freeze = Some(Freeze {
            banner,
            duration: self.config.freeze,
        });
    }

    /// Adopt new viewport dimensions. Too small a viewport forces the warning
    /// screen; the warning screen leaves as soon as the viewport fits again.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;

        if !fits(width, height) {
            if self.mode_kind() != ModeKind::Warn {
                if self.mode_kind() == ModeKind::Play {
                    tracing::warn!(width, height, "viewport shrank mid-round; round abandoned");
                }
                self.freeze = None;
                self.go_warn();
            }
            return;
        }

        match &mut self.mode {
            Mode::Warn => self.go_menu(),
            Mode::Play(session) => session.round.resize(width, height),
            _ => {}
        }
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    pub fn handle_key(&mut self, key: Key, rng: &mut impl Rng) {
        match self.mode_kind() {
            ModeKind::Menu => self.handle_key_menu(key, rng),
            ModeKind::Howto => {
                if key == Key::Esc {
                    self.go_menu();
                    self.highlighted = MenuItem::Howto;
                }
            }
            ModeKind::Highscores => {
                if key == Key::Esc {
                    self.go_menu();
                    self.highlighted = MenuItem::Highscores;
                }
            }
            ModeKind::Play => self.handle_key_play(key),
            ModeKind::Warn => {
                if matches!(key, Key::Enter | Key::Space) && fits(self.width, self.height) {
                    self.go_menu();
                }
            }
        }
    }

    fn handle_key_menu(&mut self, key: Key, rng: &mut impl Rng) {
        match key {
            Key::Left => self.highlighted = self.highlighted.prev(),
            Key::Right => self.highlighted = self.highlighted.next(),
            Key::Enter | Key::Space => match self.highlighted {
                MenuItem::Play => self.go_play(rng),
                MenuItem::Highscores => self.go_highscores(),
                MenuItem::Howto => self.go_howto(),
            },
            _ => {}
        }
    }

    fn handle_key_play(&mut self, key: Key) {
        let Mode::Play(session) = &mut self.mode else {
            return;
        };

        let submitted = match &mut session.phase {
            PlayPhase::Running => {
                match key {
                    Key::Left => session.round.move_ship_left(),
                    Key::Right => session.round.move_ship_right(),
                    Key::Space => {
                        session.round.fire();
                    }
                    _ => {}
                }
                None
            }
            PlayPhase::GameOver => None,
            PlayPhase::NameEntry(entry) => match key {
                Key::Char(glyph) => {
                    entry.push(glyph);
                    None
                }
                Key::Backspace => {
                    entry.backspace();
                    None
                }
                Key::Enter => entry.submit().ok(),
                _ => None,
            },
        };

        if let Some(name) = submitted {
            let score = session.round.ship.score;
            self.record_highscore(Highscore::new(name, score));
            self.go_menu();
        }
    }

    fn record_highscore(&mut self, record: Highscore) {
        tracing::info!(name = %record.name, score = record.score, "new highscore");
        self.ledger.insert(record);
        if let Err(err) = self.ledger.save(&self.config.highscore_path) {
            tracing::error!(error = %err, "failed to save highscores");
        }
    }

    // ── Per-frame update ──────────────────────────────────────────────────────

    /// One fixed-rate step of the active mode. Nothing advances while a
    /// freeze is pending.
    pub fn update(&mut self, rng: &mut impl Rng) {
        if self.freeze.is_some() {
            return;
        }

        match &mut self.mode {
            Mode::Menu | Mode::Howto | Mode::Highscores => {
                self.stars.update(self.width, self.height, rng);
            }
            Mode::Play(session) => match session.phase {
                PlayPhase::Running => match session.round.update(rng) {
                    Some(RoundEvent::LevelStarted { level }) => self.hold(level_banner(level)),
                    Some(RoundEvent::LifeLost { .. }) => {
                        let banner = level_banner(session.round.level);
                        self.hold(banner);
                    }
                    Some(RoundEvent::GameOver { .. }) => {
                        session.phase = PlayPhase::GameOver;
                        self.hold("GAME OVER".to_string());
                    }
                    None => {}
                },
                PlayPhase::GameOver => {
                    if self.ledger.qualifies(session.round.ship.score) {
                        session.phase = PlayPhase::NameEntry(NameEntry::new());
                    } else {
                        self.go_menu();
                    }
                }
                PlayPhase::NameEntry(_) => {}
            },
            Mode::Warn => {}
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    pub fn draw<C: Canvas>(&self, canvas: &mut C) {
        let (fg, bg) = self.clear_colors;
        canvas.clear(fg, bg);

        match &self.mode {
            Mode::Menu => display::draw_menu(canvas, self.highlighted, self.stars.stars()),
            Mode::Howto => {
                display::draw_menu(canvas, self.highlighted, self.stars.stars());
                display::draw_howto(canvas);
            }
            Mode::Highscores => {
                display::draw_menu(canvas, self.highlighted, self.stars.stars());
                display::draw_highscores(canvas, &self.ledger);
            }
            Mode::Play(session) => {
                display::draw_play(canvas, &session.round);
                if let PlayPhase::NameEntry(entry) = &session.phase {
                    display::draw_name_entry(canvas, entry);
                }
            }
            Mode::Warn => display::draw_warn(canvas),
        }

        if let Some(freeze) = &self.freeze {
            display::draw_banner(canvas, &freeze.banner);
        }
    }
}

fn level_banner(level: u32) -> String {
    format!("Level {level}")
}
