/// Rendering layer.
///
/// Each function receives a `Canvas` and an immutable view of the state it
/// draws. No game logic is performed; this module only translates state
/// into painted cells.

mod frame;
pub mod terminal;

pub use frame::{Cell, FrameBuffer};

use crossterm::style::Color;

use crate::entities::AlienTier;
use crate::highscores::{Ledger, NameEntry, MAX_HIGHSCORES, NAME_MAX};
use crate::menu::{MenuItem, Star};
use crate::round::Round;
use crate::sprites::{self, LOGO, LOGO_Y};

// ── Paint interface ───────────────────────────────────────────────────────────

/// A character-cell surface the game paints onto.
pub trait Canvas {
    /// Viewport width and height in cells.
    fn size(&self) -> (u16, u16);

    /// Write one cell. Callers only pass coordinates inside `size()`.
    fn paint(&mut self, x: i32, y: i32, fg: Color, bg: Color, glyph: char);

    /// Fill the whole surface with blanks in the given colours.
    fn clear(&mut self, fg: Color, bg: Color);

    fn contains(&self, x: i32, y: i32) -> bool {
        let (width, height) = self.size();
        x >= 0 && y >= 0 && x < i32::from(width) && y < i32::from(height)
    }

    /// Paint a single line of text, spaces included. Clipped to the viewport.
    fn paint_text(&mut self, x: i32, y: i32, fg: Color, bg: Color, text: &str) {
        for (dx, glyph) in text.chars().enumerate() {
            let cx = x + dx as i32;
            if self.contains(cx, y) {
                self.paint(cx, y, fg, bg, glyph);
            }
        }
    }

    /// Paint a multi-line sprite block. Spaces are transparent.
    fn paint_block(&mut self, x: i32, y: i32, fg: Color, bg: Color, block: &str) {
        for (dx, dy, glyph) in sprites::cells(block) {
            if self.contains(x + dx, y + dy) {
                self.paint(x + dx, y + dy, fg, bg, glyph);
            }
        }
    }
}

// ── Colour palette ────────────────────────────────────────────────────────────

pub const C_MENU: Color = Color::AnsiValue(197);
pub const C_HIGHLIGHT_BG: Color = Color::AnsiValue(83);
pub const C_NEON: Color = Color::AnsiValue(83);
pub const C_ACCENT: Color = Color::Magenta;
const C_BACKDROP: Color = Color::Black;
const C_STAR: Color = Color::White;
const C_BARRICADE: Color = Color::Red;
const C_TEXT: Color = Color::White;

const MENU_PAD: i32 = 10;
const BARRICADE_GLYPH: char = '#';

fn centered(width: u16, len: usize) -> i32 {
    i32::from(width) / 2 - len as i32 / 2
}

/// Bordered, filled rectangle. The border sits one row above and below
/// the `h` body rows.
fn draw_panel<C: Canvas>(canvas: &mut C, x: i32, y: i32, w: usize, h: i32, fg: Color, bg: Color) {
    let edge = format!(" {}", "_".repeat(w));
    let body = format!("|{}|", " ".repeat(w));
    canvas.paint_text(x, y - 1, fg, bg, &edge);
    for row in 0..h {
        canvas.paint_text(x, y + row, fg, bg, &body);
    }
    canvas.paint_text(x, y + h, fg, bg, &edge);
}

// ── Menu ──────────────────────────────────────────────────────────────────────

pub fn draw_menu<C: Canvas>(canvas: &mut C, highlighted: MenuItem, stars: &[Star]) {
    let (width, _) = canvas.size();
    let logo_x = centered(width, sprites::logo_width() as usize);
    for (row, line) in LOGO.iter().enumerate() {
        canvas.paint_text(logo_x, LOGO_Y + row as i32, C_MENU, C_BACKDROP, line);
    }

    let total: usize = MenuItem::ALL.iter().map(|item| item.label().len()).sum::<usize>()
        + MENU_PAD as usize * (MenuItem::ALL.len() - 1);
    let mut x = centered(width, total);
    let y = LOGO_Y + sprites::logo_height() + 5;
    for item in MenuItem::ALL {
        let (fg, bg) = if item == highlighted {
            (C_BACKDROP, C_HIGHLIGHT_BG)
        } else {
            (C_MENU, C_BACKDROP)
        };
        canvas.paint_text(x, y, fg, bg, item.label());
        x += item.label().len() as i32 + MENU_PAD;
    }

    for star in stars {
        if canvas.contains(star.pos.x, star.pos.y) {
            canvas.paint(star.pos.x, star.pos.y, C_STAR, C_BACKDROP, '*');
        }
    }
}

// ── Howto ─────────────────────────────────────────────────────────────────────

fn instructions() -> Vec<String> {
    let mut lines = Vec::new();
    for tier in [AlienTier::Small, AlienTier::Medium, AlienTier::Large] {
        for (row, line) in tier.frames()[0].split('\n').enumerate() {
            if row == 2 {
                lines.push(format!("{line:<11}= {} pts", tier.reward()));
            } else {
                lines.push(line.to_string());
            }
        }
        lines.push(String::new());
    }
    for (row, line) in sprites::UFO.split('\n').enumerate() {
        if row == 1 {
            lines.push(format!("{line:<11}= ?? pts"));
        } else {
            lines.push(line.to_string());
        }
    }
    lines.extend(
        [
            "",
            "",
            "Left/Right Arrow to move.",
            "Space to fire.",
            "",
            "Press ESC to close",
            "this window.",
        ]
        .map(String::from),
    );
    lines
}

pub fn draw_howto<C: Canvas>(canvas: &mut C) {
    const W_PAD: usize = 20;
    const H_PAD: i32 = 2;

    let (width, _) = canvas.size();
    let lines = instructions();
    let text_width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
    let w = text_width + W_PAD;
    let x = centered(width, w);
    let y = LOGO_Y;

    draw_panel(canvas, x, y, w, lines.len() as i32 + H_PAD, C_NEON, C_BACKDROP);

    for (row, line) in lines.iter().enumerate() {
        canvas.paint_text(x + (W_PAD / 2) as i32, y + H_PAD / 2 + row as i32, C_NEON, C_BACKDROP, line);
    }
}

// ── Highscores ────────────────────────────────────────────────────────────────

pub fn draw_highscores<C: Canvas>(canvas: &mut C, ledger: &Ledger) {
    const W_PAD: usize = 7;
    const TITLE: &str = "HIGHSCORES";

    let (width, _) = canvas.size();
    let w = 10 + 1 + 10 + 2 * W_PAD;
    let mut x = centered(width, w);
    let mut y = LOGO_Y;
    draw_panel(canvas, x, y, w, MAX_HIGHSCORES as i32 + 6, C_NEON, C_BACKDROP);

    y += 2;
    canvas.paint_text(centered(width, TITLE.len()), y, C_NEON, C_BACKDROP, TITLE);

    y += 2;
    x += W_PAD as i32;
    for entry in ledger.entries() {
        let line = format!("{:<10} {:010}", entry.name, entry.score);
        canvas.paint_text(x, y, C_NEON, C_BACKDROP, &line);
        y += 1;
    }
    for _ in ledger.len()..MAX_HIGHSCORES {
        canvas.paint_text(x, y, C_NEON, C_BACKDROP, &format!("{:<10} {:010}", "?????", 0));
        y += 1;
    }

    y += 1;
    draw_hint(canvas, y, C_NEON, ["Press ", "ESC ", "to exit"]);
}

/// Three-part centred line with the middle part (the key) accented.
fn draw_hint<C: Canvas>(canvas: &mut C, y: i32, fg: Color, parts: [&str; 3]) {
    let (width, _) = canvas.size();
    let mut x = centered(width, parts.iter().map(|part| part.len()).sum());
    for (index, part) in parts.iter().enumerate() {
        let color = if index == 1 { C_ACCENT } else { fg };
        canvas.paint_text(x, y, color, C_BACKDROP, part);
        x += part.len() as i32;
    }
}

// ── Warn ──────────────────────────────────────────────────────────────────────

pub fn draw_warn<C: Canvas>(canvas: &mut C) {
    const LINES: [&str; 3] = [
        "Your terminal screen is too small.",
        "Please make the screen wider/taller",
        "and/or reduce your font size.",
    ];

    let (width, height) = canvas.size();
    let mut y = i32::from(height) / 2;
    for line in LINES {
        canvas.paint_text(centered(width, line.len()), y, C_TEXT, C_BACKDROP, line);
        y += 1;
    }
    draw_hint(canvas, y, C_TEXT, ["Press ", "Space/Enter ", "to retry loading."]);
}

// ── Play ──────────────────────────────────────────────────────────────────────

pub fn draw_play<C: Canvas>(canvas: &mut C, round: &Round) {
    let ship = &round.ship;
    let e = &ship.entity;
    canvas.paint_block(e.pos.x, e.pos.y, e.fg, e.bg, e.sprite(0));

    for pos in round.barricades.cells() {
        if canvas.contains(pos.x, pos.y) {
            canvas.paint(pos.x, pos.y, C_BARRICADE, C_BACKDROP, BARRICADE_GLYPH);
        }
    }

    for bullet in round.alien_bullets.iter().flatten() {
        let e = &bullet.entity;
        canvas.paint_block(e.pos.x, e.pos.y, e.fg, e.bg, e.sprite(0));
    }

    if let Some(ufo) = round.ufo.ufo() {
        let e = &ufo.entity;
        canvas.paint_block(e.pos.x, e.pos.y, e.fg, e.bg, e.sprite(0));
    }

    let frame = round.formation.frame();
    for alien in round.formation.slots().iter().flatten() {
        let e = &alien.entity;
        canvas.paint_block(e.pos.x, e.pos.y, e.fg, e.bg, e.sprite(frame));
    }

    if let Some(bullet) = &ship.bullet {
        let e = &bullet.entity;
        canvas.paint_block(e.pos.x, e.pos.y, e.fg, e.bg, e.sprite(0));
    }

    draw_hud(canvas, round);
}

fn draw_hud<C: Canvas>(canvas: &mut C, round: &Round) {
    const SCORE_X: i32 = 10;
    const HUD_Y: i32 = 1;
    // Beyond this the count is shown as a number so the HUD keeps its width.
    const MAX_LIFE_GLYPHS: u32 = 5;

    let (width, _) = canvas.size();
    canvas.paint_text(SCORE_X, HUD_Y, C_NEON, C_BACKDROP, &format!("Score: {}", round.ship.score));

    let lives = if round.ship.lives <= MAX_LIFE_GLYPHS {
        format!("Lives: {}", sprites::LIFE.repeat(round.ship.lives as usize))
    } else {
        format!("Lives: {}x{}", sprites::LIFE, round.ship.lives)
    };
    let x = i32::from(width) - lives.chars().count() as i32;
    canvas.paint_text(x, HUD_Y, C_NEON, C_BACKDROP, &lives);

    let level = format!("Level {}", round.level);
    canvas.paint_text(centered(width, level.len()), HUD_Y, C_NEON, C_BACKDROP, &level);
}

/// Prompt box for a new highscore, drawn over the final play field.
pub fn draw_name_entry<C: Canvas>(canvas: &mut C, entry: &NameEntry) {
    const MESSAGE: &str = "You set a new highscore!";
    const PROMPT: &str = "Please enter a name 3-10 characters long:";
    const LENGTH_WARNING: &str = "Name must be 3-10 characters long!";
    const W_PAD: usize = 4;

    let (width, height) = canvas.size();
    let w = PROMPT.len() + W_PAD;
    let h = if entry.warning() { 11 } else { 8 };
    let mut x = centered(width, w);
    let mut y = i32::from(height) / 2 - h / 2;
    draw_panel(canvas, x, y, w, h, C_TEXT, C_BACKDROP);

    x += (W_PAD / 2) as i32 + 1;
    y += 2;
    canvas.paint_text(x, y, C_TEXT, C_BACKDROP, MESSAGE);
    y += 2;
    canvas.paint_text(x, y, C_TEXT, C_BACKDROP, PROMPT);

    let mut name = entry.name().to_string();
    if name.chars().count() < NAME_MAX {
        name.push('_');
    }
    y += 2;
    canvas.paint_text(centered(width, name.chars().count()), y, C_NEON, C_BACKDROP, &name);

    if entry.warning() {
        y += 3;
        canvas.paint_text(centered(width, LENGTH_WARNING.len()), y, C_TEXT, C_BACKDROP, LENGTH_WARNING);
    }
}

/// Freeze-frame message centred on the screen.
pub fn draw_banner<C: Canvas>(canvas: &mut C, text: &str) {
    let (width, height) = canvas.size();
    canvas.paint_text(
        centered(width, text.chars().count()),
        i32::from(height) / 2,
        C_NEON,
        C_BACKDROP,
        text,
    );
}
