/// One run of play, from ship spawn to game over, across every level.
///
/// `Round::update` is the fixed-rate simulation step. Per frame it runs, in
/// order: bullet collisions, UFO movement, the formation step (with level
/// completion on its cadence) and the UFO countdown.

use rand::Rng;

use crate::barricade::{barricade_row, BarricadeField, SHIP_BOTTOM_OFFSET};
use crate::collision::{self, Volley};
use crate::config::Config;
use crate::entities::{Bullet, Position, Ship};
use crate::formation::{Advance, Formation, Layout};
use crate::sprites::{SHIP_HEIGHT, SHIP_WIDTH};
use crate::ufo::UfoSpawner;

pub const SHIP_MOVE_SPEED: i32 = 2;

/// Knobs a round is played under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundRules {
    pub initial_lives: u32,
    /// A transiting UFO holds back level completion until it is gone.
    pub ufo_delays_level_clear: bool,
    pub fps: u32,
}

impl Default for RoundRules {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for RoundRules {
    fn from(config: &Config) -> Self {
        Self {
            initial_lives: config.initial_lives,
            ufo_delays_level_clear: config.ufo_delays_level_clear,
            fps: config.fps,
        }
    }
}

/// Notable things that happened during a simulation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundEvent {
    LevelStarted { level: u32 },
    LifeLost { lives: u32 },
    GameOver { score: u32 },
}

#[derive(Clone, Debug)]
pub struct Round {
    pub ship: Ship,
    pub formation: Formation,
    pub alien_bullets: Vec<Option<Bullet>>,
    pub barricades: BarricadeField,
    pub ufo: UfoSpawner,
    pub layout: Layout,
    pub level: u32,
    pub frame: u64,
    pub rules: RoundRules,
    width: u16,
    height: u16,
}

impl Round {
    /// Fresh round at level 1 for the given viewport.
    pub fn new(width: u16, height: u16, rules: RoundRules, rng: &mut impl Rng) -> Self {
        let layout = Layout::for_viewport(width, height);
        let start = Position::new(i32::from(width) / 2 - SHIP_WIDTH / 2, ship_row(height));

        tracing::info!(
            width,
            height,
            columns = layout.columns,
            rows = layout.rows(),
            "round started"
        );

        Self {
            ship: Ship::new(start, rules.initial_lives),
            formation: Formation::new(&layout),
            alien_bullets: vec![None; layout.bullet_slots()],
            barricades: BarricadeField::generate(width, height),
            ufo: UfoSpawner::new(rules.fps, rng),
            layout,
            level: 1,
            frame: 0,
            rules,
            width,
            height,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Adopt new viewport dimensions. The ship returns to its row above the
    /// bottom edge and the barricade line follows it, eroded cells included;
    /// cover pushed past the viewport is lost.
    pub fn resize(&mut self, width: u16, height: u16) {
        let dy = barricade_row(height) - barricade_row(self.height);
        self.barricades = self.barricades.shifted(dy, width, height);
        self.width = width;
        self.height = height;
        self.ship.entity.pos.y = ship_row(height);
        self.clamp_ship();
    }

    /// Row at which an alien counts as having reached the ship.
    pub fn invasion_row(&self) -> i32 {
        self.ship.pos().y - SHIP_HEIGHT
    }

    // ── Ship controls ─────────────────────────────────────────────────────────

    pub fn move_ship_left(&mut self) {
        self.ship.entity.pos.x -= SHIP_MOVE_SPEED;
        self.clamp_ship();
    }

    pub fn move_ship_right(&mut self) {
        self.ship.entity.pos.x += SHIP_MOVE_SPEED;
        self.clamp_ship();
    }

    /// Fire from the ship's centre. Refused while the previous bullet is live.
    pub fn fire(&mut self) -> bool {
        if self.ship.bullet.is_some() {
            return false;
        }
        let pos = self.ship.pos().offset(SHIP_WIDTH / 2, 0);
        self.ship.bullet = Some(Bullet::from_ship(pos));
        true
    }

    fn clamp_ship(&mut self) {
        let max_x = (i32::from(self.width) - SHIP_WIDTH).max(0);
        let pos = &mut self.ship.entity.pos;
        pos.x = pos.x.clamp(0, max_x);
    }

    // ── Simulation step ───────────────────────────────────────────────────────

    pub fn update(&mut self, rng: &mut impl Rng) -> Option<RoundEvent> {
        self.frame += 1;
        let mut event = None;

        let volley = collision::resolve_alien_bullets(
            &mut self.alien_bullets,
            &mut self.ship,
            &mut self.barricades,
            self.width,
            self.height,
        );
        match volley {
            Volley::ShipHit { lives: 0 } => return Some(self.game_over()),
            Volley::ShipHit { lives } => event = Some(RoundEvent::LifeLost { lives }),
            Volley::Missed => {
                collision::resolve_ship_bullet(
                    &mut self.ship,
                    &mut self.formation,
                    &mut self.ufo,
                    &self.barricades,
                    self.width,
                    self.height,
                );
            }
        }

        self.ufo.advance(self.frame, self.width, rng);

        if self.formation.is_due(self.frame) {
            let invasion_row = self.invasion_row();
            let advance = self
                .formation
                .advance(self.width, invasion_row, &mut self.alien_bullets, rng);
            match advance {
                Advance::Invaded => return Some(self.game_over()),
                Advance::Cleared if self.level_complete() => {
                    self.begin_next_level();
                    event = Some(RoundEvent::LevelStarted { level: self.level });
                }
                Advance::Cleared | Advance::Moved => {}
            }
        }

        self.ufo.tick(rng);
        event
    }

    /// The formation is empty and no UFO is still collectable (when the rules
    /// make a transiting UFO hold the level open).
    pub fn level_complete(&self) -> bool {
        self.formation.is_cleared() && !(self.rules.ufo_delays_level_clear && self.ufo.is_transiting())
    }

    fn begin_next_level(&mut self) {
        self.level += 1;
        self.formation.speed_up();
        collision::wipe_bullets(&mut self.ship, &mut self.alien_bullets);
        self.formation.repopulate(&self.layout);
        tracing::info!(level = self.level, cadence = self.formation.cadence(), "level started");
    }

    fn game_over(&self) -> RoundEvent {
        tracing::info!(score = self.ship.score, level = self.level, "game over");
        RoundEvent::GameOver {
            score: self.ship.score,
        }
    }
}

/// Top row of the ship sprite for a viewport of the given height.
fn ship_row(height: u16) -> i32 {
    i32::from(height) - SHIP_BOTTOM_OFFSET - SHIP_HEIGHT
}
