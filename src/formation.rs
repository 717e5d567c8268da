/// The alien swarm, moved and animated as one rigid body.
///
/// Aliens live in fixed slots for the whole round. A destroyed alien leaves
/// its slot empty; slots are never compacted, because occupancy grids
/// address aliens by slot index.

use rand::Rng;

use crate::barricade::barricade_row;
use crate::entities::{Alien, AlienTier, Bullet, Position, Velocity};
use crate::sprites::{ALIEN_HEIGHT, ALIEN_WIDTH};

// ── Tuning ────────────────────────────────────────────────────────────────────

/// Frames between formation steps at level 1.
pub const INITIAL_CADENCE: u64 = 15;
/// Fastest cadence reachable by clearing levels.
pub const MIN_CADENCE: u64 = 2;
/// Each live alien fires with probability 1 / ALIEN_FIRE_ODDS per step.
pub const ALIEN_FIRE_ODDS: u32 = 100;

pub const ORIGIN: Position = Position::new(10, 7);
const PAD_HORIZONTAL: i32 = 3;
const PAD_VERTICAL: i32 = 1;
const MAX_ROW_BANDS: usize = 5;

// ── Layout ────────────────────────────────────────────────────────────────────

/// Row and column composition of a formation. Computed once per round from
/// the viewport and reused for every level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub columns: usize,
    pub large_rows: usize,
    pub medium_rows: usize,
    pub small_rows: usize,
}

impl Layout {
    pub fn for_viewport(width: u16, height: u16) -> Self {
        let half = i32::from(width) / 2;
        let columns = (0..half)
            .step_by((ALIEN_WIDTH + PAD_HORIZONTAL) as usize)
            .count()
            .saturating_sub(1);

        let limit = barricade_row(height) - ALIEN_HEIGHT - PAD_VERTICAL;
        let bands = (ORIGIN.y..limit)
            .step_by((ALIEN_HEIGHT + PAD_VERTICAL) as usize)
            .count()
            .min(MAX_ROW_BANDS);

        let (small_rows, medium_rows) = match bands {
            0..=3 => (1, 1),
            4 => (2, 1),
            _ => (2, 2),
        };

        Self {
            columns,
            large_rows: 1,
            medium_rows,
            small_rows,
        }
    }

    pub fn rows(&self) -> usize {
        self.large_rows + self.medium_rows + self.small_rows
    }

    pub fn capacity(&self) -> usize {
        self.rows() * self.columns
    }

    /// Number of alien bullets that may be in flight at once.
    pub fn bullet_slots(&self) -> usize {
        (self.capacity() / 10).max(1)
    }

    /// Tier of every row, top to bottom.
    pub fn tiers(&self) -> impl Iterator<Item = AlienTier> {
        std::iter::repeat(AlienTier::Large)
            .take(self.large_rows)
            .chain(std::iter::repeat(AlienTier::Medium).take(self.medium_rows))
            .chain(std::iter::repeat(AlienTier::Small).take(self.small_rows))
    }
}

// ── Formation ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
}

/// Result of one formation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    Moved,
    /// No slot was occupied; nothing moved.
    Cleared,
    /// An alien reached the ship's rows.
    Invaded,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Formation {
    slots: Vec<Option<Alien>>,
    velocity: Velocity,
    frame: usize,
    cadence: u64,
}

impl Formation {
    pub fn new(layout: &Layout) -> Self {
        Self {
            slots: spawn(layout),
            velocity: Velocity::RIGHT,
            frame: 0,
            cadence: INITIAL_CADENCE,
        }
    }

    pub fn with_slots(slots: Vec<Option<Alien>>, velocity: Velocity) -> Self {
        Self {
            slots,
            velocity,
            frame: 0,
            cadence: INITIAL_CADENCE,
        }
    }

    /// Refill every slot with a fresh alien at its starting position.
    pub fn repopulate(&mut self, layout: &Layout) {
        self.slots = spawn(layout);
    }

    pub fn slots(&self) -> &[Option<Alien>] {
        &self.slots
    }

    pub fn alien(&self, slot: usize) -> Option<&Alien> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Empty the slot, returning the alien that occupied it.
    pub fn destroy(&mut self, slot: usize) -> Option<Alien> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    pub fn is_cleared(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    /// Current animation frame index (0 or 1).
    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn cadence(&self) -> u64 {
        self.cadence
    }

    pub fn set_cadence(&mut self, cadence: u64) {
        self.cadence = cadence.max(MIN_CADENCE);
    }

    /// Shorten the cadence by one frame, never below `MIN_CADENCE`.
    pub fn speed_up(&mut self) {
        self.set_cadence(self.cadence.saturating_sub(1));
    }

    pub fn is_due(&self, frame: u64) -> bool {
        frame % self.cadence == 0
    }

    /// Step every live alien by the shared velocity and let each roll to fire.
    ///
    /// A lateral step that leaves any alien touching a viewport edge turns
    /// the next step into a descent; a descent resumes sweeping away from
    /// the last edge touched. Shots go into the first free slot of `bullets`
    /// and are dropped when none is free.
    pub fn advance(
        &mut self,
        width: u16,
        invasion_row: i32,
        bullets: &mut [Option<Bullet>],
        rng: &mut impl Rng,
    ) -> Advance {
        self.frame = (self.frame + 1) % 2;

        let velocity = self.velocity;
        let mut breach = None;
        let mut any_alive = false;

        for alien in self.slots.iter_mut().flatten() {
            any_alive = true;
            let pos = alien.entity.pos.offset(velocity.dx, velocity.dy);
            alien.entity.pos = pos;

            if pos.x <= 0 {
                breach = Some(Edge::Left);
            } else if pos.x + ALIEN_WIDTH >= i32::from(width) {
                breach = Some(Edge::Right);
            }

            if pos.y >= invasion_row {
                return Advance::Invaded;
            }

            if rng.gen_ratio(1, ALIEN_FIRE_ODDS) {
                if let Some(free) = bullets.iter_mut().find(|slot| slot.is_none()) {
                    *free = Some(Bullet::from_alien(pos.offset(ALIEN_WIDTH / 2, 0)));
                }
            }
        }

        if velocity == Velocity::DOWN {
            self.velocity = match breach {
                Some(Edge::Left) => Velocity::RIGHT,
                _ => Velocity::LEFT,
            };
        } else if breach.is_some() {
            self.velocity = Velocity::DOWN;
        }

        if any_alive {
            Advance::Moved
        } else {
            Advance::Cleared
        }
    }
}

fn spawn(layout: &Layout) -> Vec<Option<Alien>> {
    let mut slots = Vec::with_capacity(layout.capacity());
    for (row, tier) in layout.tiers().enumerate() {
        let y = ORIGIN.y + row as i32 * (ALIEN_HEIGHT + PAD_VERTICAL);
        for column in 0..layout.columns {
            let x = ORIGIN.x + column as i32 * (ALIEN_WIDTH + PAD_HORIZONTAL);
            slots.push(Some(Alien::new(Position::new(x, y), tier)));
        }
    }
    slots
}
