/// Destructible cover: individual cells, each belonging to one of a fixed
/// number of blocks. Cells are removed one at a time and never regrow
/// within a round.

use std::collections::HashMap;

use crate::entities::Position;
use crate::sprites::{self, BARRICADE_HEIGHT, BARRICADE_WIDTH, SHIP_HEIGHT};

pub const BARRICADE_COUNT: i32 = 4;

/// Rows between the bottom of the viewport and the ship sprite.
pub const SHIP_BOTTOM_OFFSET: i32 = 2;

/// Top row of the barricade line for a viewport of the given height.
pub fn barricade_row(height: u16) -> i32 {
    (i32::from(height) - SHIP_BOTTOM_OFFSET - SHIP_HEIGHT) - BARRICADE_HEIGHT - 2
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BarricadeField {
    cells: HashMap<Position, usize>,
}

impl BarricadeField {
    /// Lay out the blocks evenly across the viewport, separated by equal gaps.
    pub fn generate(width: u16, height: u16) -> Self {
        let gap = ((i32::from(width) - BARRICADE_COUNT * BARRICADE_WIDTH) / (BARRICADE_COUNT + 1)).max(0);
        let y = barricade_row(height);

        let mut cells = HashMap::new();
        for block in 0..BARRICADE_COUNT {
            let x = gap * (block + 1) + BARRICADE_WIDTH * block;
            for (dx, dy, _) in sprites::cells(sprites::BARRICADE) {
                cells.insert(Position::new(x + dx, y + dy), block as usize);
            }
        }
        Self { cells }
    }

    pub fn from_cells(cells: impl IntoIterator<Item = (Position, usize)>) -> Self {
        Self {
            cells: cells.into_iter().collect(),
        }
    }

    /// The same cells moved `dy` rows, keeping only those inside a viewport
    /// of the given size.
    pub fn shifted(&self, dy: i32, width: u16, height: u16) -> Self {
        let (width, height) = (i32::from(width), i32::from(height));
        Self::from_cells(
            self.cells
                .iter()
                .map(|(pos, block)| (pos.offset(0, dy), *block))
                .filter(|(pos, _)| pos.x >= 0 && pos.y >= 0 && pos.x < width && pos.y < height),
        )
    }

    /// Block index of the intact cell at `pos`, if any.
    pub fn block_at(&self, pos: Position) -> Option<usize> {
        self.cells.get(&pos).copied()
    }

    /// Remove the cell at `pos`, returning the block it belonged to.
    pub fn erode(&mut self, pos: Position) -> Option<usize> {
        self.cells.remove(&pos)
    }

    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
