/// Per-frame occupancy grids used for collision queries.
///
/// A grid maps every viewport cell to whatever visible sprite glyph covers
/// it. Grids are rebuilt from current positions each frame and never kept
/// across frames.

use crate::entities::{Alien, Position, Ship, Ufo};
use crate::sprites;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Occupant {
    Empty,
    Ship,
    /// Slot index into the formation.
    Alien(usize),
    Ufo,
}

#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    width: i32,
    height: i32,
    cells: Vec<Occupant>,
}

impl OccupancyGrid {
    pub fn new(width: u16, height: u16) -> Self {
        let (width, height) = (i32::from(width), i32::from(height));
        Self {
            width,
            height,
            cells: vec![Occupant::Empty; (width * height) as usize],
        }
    }

    /// Grid holding only the ship's footprint.
    pub fn for_ship(ship: &Ship, width: u16, height: u16) -> Self {
        let mut grid = Self::new(width, height);
        grid.stamp(ship.pos(), ship.entity.sprite(0), Occupant::Ship);
        grid
    }

    /// Grid holding the UFO (only while it is fully on screen) and every live alien.
    ///
    /// Aliens are stamped after the UFO, so on overlap the alien wins.
    pub fn for_invaders(
        slots: &[Option<Alien>],
        frame: usize,
        ufo: Option<&Ufo>,
        width: u16,
        height: u16,
    ) -> Self {
        let mut grid = Self::new(width, height);

        if let Some(ufo) = ufo {
            let x = ufo.pos().x;
            if x > 0 && x < i32::from(width) - sprites::UFO_WIDTH {
                grid.stamp(ufo.pos(), ufo.entity.sprite(0), Occupant::Ufo);
            }
        }

        for (index, slot) in slots.iter().enumerate() {
            if let Some(alien) = slot {
                grid.stamp(alien.pos(), alien.entity.sprite(frame), Occupant::Alien(index));
            }
        }

        grid
    }

    /// Mark every visible glyph of `block` at `origin` as `occupant`.
    /// Cells falling outside the viewport are dropped.
    pub fn stamp(&mut self, origin: Position, block: &str, occupant: Occupant) {
        for (dx, dy, _) in sprites::cells(block) {
            if let Some(index) = self.index(origin.offset(dx, dy)) {
                self.cells[index] = occupant;
            }
        }
    }

    /// Occupant at `pos`; anything outside the viewport is `Empty`.
    pub fn get(&self, pos: Position) -> Occupant {
        self.index(pos)
            .map(|index| self.cells[index])
            .unwrap_or(Occupant::Empty)
    }

    /// Every non-empty cell in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Position, Occupant)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, occupant)| **occupant != Occupant::Empty)
            .map(move |(index, occupant)| {
                let index = index as i32;
                (Position::new(index % self.width, index / self.width), *occupant)
            })
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 || pos.x >= self.width || pos.y >= self.height {
            return None;
        }
        Some((pos.y * self.width + pos.x) as usize)
    }
}
