use crossterm::style::Color;

use term_invaders::display::{Canvas, FrameBuffer};
use term_invaders::entities::*;
use term_invaders::grid::{Occupant, OccupancyGrid};
use term_invaders::sprites;

fn alien_at(x: i32, y: i32, tier: AlienTier) -> Option<Alien> {
    Some(Alien::new(Position::new(x, y), tier))
}

// ── stamp / get ───────────────────────────────────────────────────────────────

#[test]
fn stamp_marks_exactly_the_visible_glyphs() {
    let mut grid = OccupancyGrid::new(40, 20);
    let origin = Position::new(5, 5);
    grid.stamp(origin, sprites::SHIP, Occupant::Ship);

    let expected: Vec<Position> = sprites::cells(sprites::SHIP)
        .map(|(dx, dy, _)| origin.offset(dx, dy))
        .collect();

    for pos in &expected {
        assert_eq!(grid.get(*pos), Occupant::Ship);
    }
    let stamped: Vec<Position> = grid.occupied().map(|(pos, _)| pos).collect();
    assert_eq!(stamped.len(), expected.len());
    for pos in stamped {
        assert!(expected.contains(&pos));
    }
}

#[test]
fn whitespace_inside_a_sprite_stays_empty() {
    let mut grid = OccupancyGrid::new(40, 20);
    grid.stamp(Position::new(0, 0), sprites::SHIP, Occupant::Ship);
    // the two leading spaces of "  ||" are transparent
    assert_eq!(grid.get(Position::new(0, 0)), Occupant::Empty);
    assert_eq!(grid.get(Position::new(1, 0)), Occupant::Empty);
    assert_eq!(grid.get(Position::new(2, 0)), Occupant::Ship);
}

#[test]
fn lookups_outside_the_viewport_are_empty() {
    let grid = OccupancyGrid::new(10, 10);
    assert_eq!(grid.get(Position::new(-1, 0)), Occupant::Empty);
    assert_eq!(grid.get(Position::new(0, -1)), Occupant::Empty);
    assert_eq!(grid.get(Position::new(10, 0)), Occupant::Empty);
    assert_eq!(grid.get(Position::new(0, 10)), Occupant::Empty);
}

#[test]
fn stamping_past_the_edge_is_clipped() {
    let mut grid = OccupancyGrid::new(10, 10);
    grid.stamp(Position::new(-3, 8), sprites::SHIP, Occupant::Ship);
    // rows 8 and 9 keep their rightmost glyphs, row 10 falls off the bottom
    assert_eq!(grid.get(Position::new(0, 8)), Occupant::Ship);
    assert_eq!(grid.get(Position::new(0, 9)), Occupant::Ship);
    assert_eq!(grid.get(Position::new(1, 9)), Occupant::Ship);
    assert_eq!(grid.get(Position::new(2, 9)), Occupant::Empty);
    assert_eq!(grid.occupied().count(), 3);
}

#[test]
fn later_stamps_win_on_overlap() {
    let mut grid = OccupancyGrid::new(10, 10);
    grid.stamp(Position::new(0, 0), "xx", Occupant::Ufo);
    grid.stamp(Position::new(1, 0), "x", Occupant::Alien(4));
    assert_eq!(grid.get(Position::new(0, 0)), Occupant::Ufo);
    assert_eq!(grid.get(Position::new(1, 0)), Occupant::Alien(4));
}

// ── per-frame builders ────────────────────────────────────────────────────────

#[test]
fn ship_grid_covers_the_ship_footprint() {
    let ship = Ship::new(Position::new(47, 35), 3);
    let grid = OccupancyGrid::for_ship(&ship, 100, 40);
    assert_eq!(grid.get(Position::new(49, 35)), Occupant::Ship);
    assert_eq!(grid.get(Position::new(47, 37)), Occupant::Ship);
    assert_eq!(grid.get(Position::new(47, 35)), Occupant::Empty);
    assert_eq!(grid.occupied().count(), sprites::cells(sprites::SHIP).count());
}

#[test]
fn invader_grid_encodes_slot_indices() {
    let slots = vec![
        alien_at(10, 7, AlienTier::Large),
        None,
        alien_at(40, 10, AlienTier::Medium),
    ];
    let grid = OccupancyGrid::for_invaders(&slots, 0, None, 100, 40);

    // large frame 0 row 0 is "  _/\_"
    assert_eq!(grid.get(Position::new(12, 7)), Occupant::Alien(0));
    // medium frame 0 row 1 is " [o##o]"
    assert_eq!(grid.get(Position::new(42, 11)), Occupant::Alien(2));
    assert!(grid.occupied().all(|(_, occupant)| occupant != Occupant::Alien(1)));
}

#[test]
fn invader_grid_follows_the_animation_frame() {
    let slots = vec![alien_at(40, 10, AlienTier::Medium)];
    // medium frame 0 row 0 " \    /", frame 1 row 0 " /    \"
    let frame0 = OccupancyGrid::for_invaders(&slots, 0, None, 100, 40);
    let frame1 = OccupancyGrid::for_invaders(&slots, 1, None, 100, 40);
    assert_eq!(frame0.get(Position::new(41, 10)), Occupant::Alien(0));
    assert_eq!(frame1.get(Position::new(41, 10)), Occupant::Alien(0));
    assert_eq!(frame0.get(Position::new(42, 13)), Occupant::Alien(0)); // "  /  \"
    assert_eq!(frame1.get(Position::new(42, 13)), Occupant::Alien(0)); // "  \  /"
}

#[test]
fn ufo_is_stamped_only_when_fully_on_screen() {
    let on_screen = Ufo::new(Position::new(20, 4));
    let grid = OccupancyGrid::for_invaders(&[], 0, Some(&on_screen), 100, 40);
    assert_eq!(grid.get(Position::new(21, 5)), Occupant::Ufo);

    let entering = Ufo::new(Position::new(0, 4));
    let grid = OccupancyGrid::for_invaders(&[], 0, Some(&entering), 100, 40);
    assert_eq!(grid.occupied().count(), 0);

    let leaving = Ufo::new(Position::new(100 - sprites::UFO_WIDTH, 4));
    let grid = OccupancyGrid::for_invaders(&[], 0, Some(&leaving), 100, 40);
    assert_eq!(grid.occupied().count(), 0);
}

// ── paint interface ───────────────────────────────────────────────────────────

#[test]
fn paint_block_treats_spaces_as_transparent() {
    let mut frame = FrameBuffer::new(10, 3);
    frame.clear(Color::White, Color::Black);
    frame.paint_text(0, 0, Color::White, Color::Black, "zzzzz");
    frame.paint_block(0, 0, Color::Red, Color::Black, "a b");

    assert_eq!(frame.row_text(0), "azbzz     ");
    assert_eq!(frame.cell(1, 0).map(|cell| cell.fg), Some(Color::White));
    assert_eq!(frame.cell(2, 0).map(|cell| cell.fg), Some(Color::Red));
}

#[test]
fn painting_is_clipped_to_the_viewport() {
    let mut frame = FrameBuffer::new(4, 2);
    frame.paint_text(-2, 0, Color::White, Color::Black, "abcdef");
    frame.paint_block(3, 1, Color::White, Color::Black, "xy\nzz");
    assert_eq!(frame.row_text(0), "cdef");
    assert_eq!(frame.row_text(1), "   x");
}
