/// Menu items and the drifting starfield behind the menu screens.

use rand::Rng;

use crate::entities::Position;

pub const MAX_STARS: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuItem {
    Play,
    Highscores,
    Howto,
}

impl MenuItem {
    /// Items in the order they appear, left to right.
    pub const ALL: [MenuItem; 3] = [MenuItem::Play, MenuItem::Highscores, MenuItem::Howto];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Play => "PLAY",
            MenuItem::Highscores => "HIGHSCORES",
            MenuItem::Howto => "HOWTO",
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|item| *item == self).unwrap_or(0)
    }
}

// ── Starfield ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Star {
    pub pos: Position,
    pub vx: i32,
    pub vy: i32,
}

impl Star {
    /// A star at a random position with a random diagonal heading.
    fn random(width: u16, height: u16, rng: &mut impl Rng) -> Self {
        let pos = Position::new(
            rng.gen_range(0..i32::from(width.max(1))),
            rng.gen_range(0..i32::from(height.max(1))),
        );
        let mut pick = || if rng.gen_bool(0.5) { 1 } else { -1 };
        Self {
            pos,
            vx: pick(),
            vy: pick(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Add one star until the field is full, then move every star and
    /// respawn those that drifted off screen.
    pub fn update(&mut self, width: u16, height: u16, rng: &mut impl Rng) {
        if self.stars.len() < MAX_STARS {
            self.stars.push(Star::random(width, height, rng));
        }

        for star in &mut self.stars {
            star.pos = star.pos.offset(star.vx, star.vy);
            let Position { x, y } = star.pos;
            if x < 0 || x >= i32::from(width) || y < 0 || y >= i32::from(height) {
                *star = Star::random(width, height, rng);
            }
        }
    }
}
