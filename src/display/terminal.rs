/// Terminal presenter. The only place frames touch the real terminal.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Colors, Print},
    QueueableCommand,
};

use super::FrameBuffer;

/// Write a complete frame, row by row, switching colours only when they change.
pub fn present<W: Write>(out: &mut W, frame: &FrameBuffer) -> std::io::Result<()> {
    let mut colors = None;

    for y in 0..frame.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for cell in frame.row(y) {
            if colors != Some((cell.fg, cell.bg)) {
                out.queue(style::SetColors(Colors::new(cell.fg, cell.bg)))?;
                colors = Some((cell.fg, cell.bg));
            }
            out.queue(Print(cell.glyph))?;
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, frame.height().saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}
