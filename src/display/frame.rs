use crossterm::style::Color;

use super::Canvas;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub fg: Color,
    pub bg: Color,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        glyph: ' ',
        fg: Color::Reset,
        bg: Color::Reset,
    };
}

/// In-memory grid of painted cells, one per viewport character.
///
/// Every frame is painted here first and then presented to the terminal
/// in a single pass.
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; usize::from(width) * usize::from(height)],
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        *self = Self::new(width, height);
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|index| self.cells[index])
    }

    pub fn row(&self, y: u16) -> &[Cell] {
        let start = usize::from(y) * usize::from(self.width);
        self.cells
            .get(start..start + usize::from(self.width))
            .unwrap_or(&[])
    }

    /// Glyphs of one row as a string.
    pub fn row_text(&self, y: u16) -> String {
        self.row(y).iter().map(|cell| cell.glyph).collect()
    }

    /// Whether `needle` appears on any single row.
    pub fn contains_text(&self, needle: &str) -> bool {
        (0..self.height).any(|y| self.row_text(y).contains(needle))
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return None;
        }
        Some(y as usize * usize::from(self.width) + x as usize)
    }
}

impl Canvas for FrameBuffer {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn paint(&mut self, x: i32, y: i32, fg: Color, bg: Color, glyph: char) {
        if let Some(index) = self.index(x, y) {
            self.cells[index] = Cell { glyph, fg, bg };
        }
    }

    fn clear(&mut self, fg: Color, bg: Color) {
        self.cells.fill(Cell { glyph: ' ', fg, bg });
    }
}
