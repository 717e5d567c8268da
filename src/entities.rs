/// Game entity data: ship, bullets, aliens and the UFO. No behaviour lives here.
///
/// Positions are character cells with the origin at the top-left corner of
/// the viewport and `y` growing downward.

use crossterm::style::Color;

use crate::sprites;

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Shared step applied to every live alien on a formation cadence tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Velocity {
    pub dx: i32,
    pub dy: i32,
}

impl Velocity {
    pub const RIGHT: Velocity = Velocity { dx: 1, dy: 0 };
    pub const LEFT: Velocity = Velocity { dx: -1, dy: 0 };
    pub const DOWN: Velocity = Velocity { dx: 0, dy: 1 };
}

// ── Base entity ───────────────────────────────────────────────────────────────

/// Sprite data of an entity: one fixed block or two animation frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Frames {
    Fixed(&'static str),
    Animated([&'static str; 2]),
}

impl Frames {
    /// The block shown for the given animation index. Fixed sprites ignore it.
    pub fn frame(&self, index: usize) -> &'static str {
        match self {
            Frames::Fixed(block) => block,
            Frames::Animated(blocks) => blocks[index % 2],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub pos: Position,
    pub fg: Color,
    pub bg: Color,
    pub frames: Frames,
}

impl Entity {
    pub fn sprite(&self, frame: usize) -> &'static str {
        self.frames.frame(frame)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Ship,
    Alien,
}

pub const SHIP_BULLET_SPEED: i32 = -1;
pub const ALIEN_BULLET_SPEED: i32 = 1;

/// A single-cell projectile. Negative `vy` travels up (ship), positive down (aliens).
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub entity: Entity,
    pub vy: i32,
}

impl Bullet {
    pub fn from_ship(pos: Position) -> Self {
        Self {
            entity: Entity {
                pos,
                fg: Color::Cyan,
                bg: Color::Black,
                frames: Frames::Fixed(sprites::SHIP_BULLET),
            },
            vy: SHIP_BULLET_SPEED,
        }
    }

    pub fn from_alien(pos: Position) -> Self {
        Self {
            entity: Entity {
                pos,
                fg: Color::White,
                bg: Color::Black,
                frames: Frames::Fixed(sprites::ALIEN_BULLET),
            },
            vy: ALIEN_BULLET_SPEED,
        }
    }

    pub fn pos(&self) -> Position {
        self.entity.pos
    }

    pub fn owner(&self) -> BulletOwner {
        if self.vy < 0 {
            BulletOwner::Ship
        } else {
            BulletOwner::Alien
        }
    }
}

// ── Ship ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub entity: Entity,
    pub score: u32,
    pub lives: u32,
    /// Single-shot: a new bullet is refused while this is `Some`.
    pub bullet: Option<Bullet>,
}

impl Ship {
    pub fn new(pos: Position, lives: u32) -> Self {
        Self {
            entity: Entity {
                pos,
                fg: Color::Green,
                bg: Color::Black,
                frames: Frames::Fixed(sprites::SHIP),
            },
            score: 0,
            lives,
            bullet: None,
        }
    }

    pub fn pos(&self) -> Position {
        self.entity.pos
    }
}

// ── Aliens ────────────────────────────────────────────────────────────────────

/// Row tier of an alien. Higher rows are spawned from larger tiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlienTier {
    Small,
    Medium,
    Large,
}

impl AlienTier {
    pub fn reward(self) -> u32 {
        match self {
            AlienTier::Small => 10,
            AlienTier::Medium => 20,
            AlienTier::Large => 30,
        }
    }

    pub fn frames(self) -> [&'static str; 2] {
        match self {
            AlienTier::Small => sprites::SMALL_ALIEN,
            AlienTier::Medium => sprites::MEDIUM_ALIEN,
            AlienTier::Large => sprites::LARGE_ALIEN,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Alien {
    pub entity: Entity,
    pub tier: AlienTier,
    pub reward: u32,
}

impl Alien {
    pub fn new(pos: Position, tier: AlienTier) -> Self {
        Self {
            entity: Entity {
                pos,
                fg: Color::White,
                bg: Color::Black,
                frames: Frames::Animated(tier.frames()),
            },
            tier,
            reward: tier.reward(),
        }
    }

    pub fn pos(&self) -> Position {
        self.entity.pos
    }
}

// ── UFO ───────────────────────────────────────────────────────────────────────

pub const UFO_REWARD: u32 = 100;

/// Bonus target crossing the top of the screen left to right.
#[derive(Clone, Debug, PartialEq)]
pub struct Ufo {
    pub entity: Entity,
    pub reward: u32,
}

impl Ufo {
    pub fn new(pos: Position) -> Self {
        Self {
            entity: Entity {
                pos,
                fg: Color::Magenta,
                bg: Color::Black,
                frames: Frames::Fixed(sprites::UFO),
            },
            reward: UFO_REWARD,
        }
    }

    pub fn pos(&self) -> Position {
        self.entity.pos
    }
}
