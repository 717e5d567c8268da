/// Sprite art and the fixed dimensions the simulation lays out around.
///
/// Blocks are newline-delimited rows. Whitespace is transparent: it is
/// neither painted nor stamped into an occupancy grid.

pub const SHIP: &str = "  ||\n /##\\\n<====>";
pub const SHIP_WIDTH: i32 = 6;
pub const SHIP_HEIGHT: i32 = 3;

pub const SHIP_BULLET: &str = "|";
pub const ALIEN_BULLET: &str = "!";

pub const ALIEN_WIDTH: i32 = 8;
pub const ALIEN_HEIGHT: i32 = 4;

pub const SMALL_ALIEN: [&str; 2] = [
    "   ()\n  {oo}\n <{~~}>\n  /  \\",
    "   ()\n  {oo}\n <{~~}>\n  \\  /",
];

pub const MEDIUM_ALIEN: [&str; 2] = [
    " \\    /\n [o##o]\n  ####\n  /  \\",
    " /    \\\n [o##o]\n  ####\n  \\  /",
];

pub const LARGE_ALIEN: [&str; 2] = [
    "  _/\\_\n {@  @}\n (####)\n  /||\\",
    "  _/\\_\n {@  @}\n (####)\n  \\||/",
];

pub const UFO: &str = "  _===_\n<(o o o)>\n  ~   ~";
pub const UFO_WIDTH: i32 = 9;

pub const BARRICADE: &str = " ###### \n########\n##    ##";
pub const BARRICADE_WIDTH: i32 = 8;
pub const BARRICADE_HEIGHT: i32 = 3;

pub const LIFE: &str = "A ";

pub const LOGO: [&str; 5] = [
    r" ___ _   ___     ___    ____  _____ ____  ____  ",
    r"|_ _| \ | \ \   / / \  |  _ \| ____|  _ \/ ___| ",
    r" | ||  \| |\ \ / / _ \ | | | |  _| | |_) \___ \ ",
    r" | || |\  | \ V / ___ \| |_| | |___|  _ < ___) |",
    r"|___|_| \_|  \_/_/   \_\____/|_____|_| \_\____/ ",
];
pub const LOGO_Y: i32 = 3;

pub fn logo_width() -> i32 {
    LOGO.iter().map(|line| line.chars().count()).max().unwrap_or(0) as i32
}

pub fn logo_height() -> i32 {
    LOGO.len() as i32
}

/// Visible glyphs of a block as `(dx, dy, glyph)` offsets from its top-left corner.
pub fn cells(block: &str) -> impl Iterator<Item = (i32, i32, char)> + '_ {
    block.split('\n').enumerate().flat_map(|(dy, line)| {
        line.chars()
            .enumerate()
            .filter(|(_, glyph)| !glyph.is_whitespace())
            .map(move |(dx, glyph)| (dx as i32, dy as i32, glyph))
    })
}
