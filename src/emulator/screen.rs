use crate::emulator::quirks::SpriteEdges;
use std::fmt;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;

/// One row of pixels per entry, `true` meaning drawn.
pub type Pixels = [[bool; SCREEN_WIDTH]; SCREEN_HEIGHT];
const EMPTY_SCREEN: Pixels = [[false; SCREEN_WIDTH]; SCREEN_HEIGHT];

/// The 64x32 monochrome display buffer.
///
/// Only the executor writes to it, through `clear` and `draw_sprite`.
/// Renderers get a read-only view once per frame.
#[derive(Clone, PartialEq, Eq)]
pub struct Screen {
    pixels: Pixels,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    pub fn new() -> Screen {
        Screen {
            pixels: EMPTY_SCREEN,
        }
    }

    pub fn clear(&mut self) {
        self.pixels = EMPTY_SCREEN;
    }

    /// Get a single pixel. Out of range coordinates are never set.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.pixels
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    pub fn pixels(&self) -> &Pixels {
        &self.pixels
    }

    /// XOR a sprite onto the screen with its top left corner at `(x, y)`.
    /// Each byte of `rows` is one 8 pixel row, most significant bit leftmost.
    ///
    /// The starting coordinate always wraps around the screen; `edges` decides
    /// whether the rest of the sprite is clipped or wraps too.
    /// Returns whether any set pixel was unset.
    pub fn draw_sprite(&mut self, x: u8, y: u8, rows: &[u8], edges: SpriteEdges) -> bool {
        let x_coord = x as usize % SCREEN_WIDTH;
        let y_coord = y as usize % SCREEN_HEIGHT;

        let mut any_collisions = false;
        for (dy, row) in rows.iter().enumerate() {
            let py = match wrap_or_clip(y_coord + dy, SCREEN_HEIGHT, edges) {
                Some(py) => py,
                None => break,
            };
            for dx in 0..8 {
                if (*row >> (7 - dx)) & 1 == 0 {
                    continue;
                }
                let px = match wrap_or_clip(x_coord + dx, SCREEN_WIDTH, edges) {
                    Some(px) => px,
                    None => break,
                };
                let pixel = &mut self.pixels[py][px];
                if *pixel {
                    any_collisions = true;
                }
                *pixel = !*pixel;
            }
        }

        any_collisions
    }
}

fn wrap_or_clip(coord: usize, size: usize, edges: SpriteEdges) -> Option<usize> {
    match edges {
        SpriteEdges::Wrap => Some(coord % size),
        SpriteEdges::Clip if coord < size => Some(coord),
        SpriteEdges::Clip => None,
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.pixels.iter() {
            for pixel in row.iter() {
                write!(f, "{}", if *pixel { "#" } else { " " })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Screen\n{}", self)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use proptest::prelude::*;

    const GLYPH_ZERO: [u8; 5] = [0xF0, 0x90, 0x90, 0x90, 0xF0];

    fn lit(screen: &Screen) -> usize {
        screen.pixels().iter().flatten().filter(|p| **p).count()
    }

    #[test]
    fn clear_screen_clears_screen() {
        let mut screen = Screen::new();
        screen.draw_sprite(0, 0, &GLYPH_ZERO, SpriteEdges::Clip);
        assert!(screen.get(0, 0));
        screen.clear();
        assert_eq!(lit(&screen), 0);
    }

    #[test]
    fn drawing_sets_pixels_from_most_significant_bit() {
        let mut screen = Screen::new();
        let collision = screen.draw_sprite(10, 5, &[0b1000_0001], SpriteEdges::Clip);
        assert!(!collision);
        assert!(screen.get(10, 5));
        assert!(screen.get(17, 5));
        assert_eq!(lit(&screen), 2);
    }

    #[test]
    fn drawing_twice_erases_and_collides() {
        let mut screen = Screen::new();
        assert!(!screen.draw_sprite(3, 4, &GLYPH_ZERO, SpriteEdges::Clip));
        assert!(screen.draw_sprite(3, 4, &GLYPH_ZERO, SpriteEdges::Clip));
        assert_eq!(lit(&screen), 0);
    }

    #[test]
    fn overlap_without_unsetting_is_not_a_collision() {
        let mut screen = Screen::new();
        screen.draw_sprite(0, 0, &[0b1000_0000], SpriteEdges::Clip);
        assert!(!screen.draw_sprite(1, 0, &[0b1000_0000], SpriteEdges::Clip));
    }

    #[test]
    fn clipping_drops_pixels_past_the_edges() {
        let mut screen = Screen::new();
        screen.draw_sprite(60, 30, &[0xFF, 0xFF, 0xFF], SpriteEdges::Clip);
        assert_eq!(lit(&screen), 4 * 2);
        assert!(!screen.get(0, 30));
        assert!(!screen.get(60, 0));
    }

    #[test]
    fn wrapping_moves_pixels_to_the_opposite_edge() {
        let mut screen = Screen::new();
        screen.draw_sprite(60, 31, &[0xFF, 0xFF], SpriteEdges::Wrap);
        assert_eq!(lit(&screen), 16);
        assert!(screen.get(63, 31));
        assert!(screen.get(0, 31));
        assert!(screen.get(3, 0));
        assert!(!screen.get(4, 0));
    }

    #[test]
    fn start_coordinates_wrap_in_both_modes() {
        let mut clipped = Screen::new();
        clipped.draw_sprite(64 + 2, 32 + 1, &[0x80], SpriteEdges::Clip);
        assert!(clipped.get(2, 1));
    }

    #[test]
    fn display_prints_hashes() {
        let mut screen = Screen::new();
        screen.draw_sprite(0, 0, &[0xC0], SpriteEdges::Clip);
        let text = screen.to_string();
        assert!(text.starts_with("##  "));
        assert_eq!(text.lines().count(), SCREEN_HEIGHT);
    }

    proptest! {
        #[test]
        fn drawing_is_an_involution(x in any::<u8>(), y in any::<u8>(), rows in proptest::collection::vec(any::<u8>(), 0..16), wrap in any::<bool>()) {
            let edges = if wrap { SpriteEdges::Wrap } else { SpriteEdges::Clip };
            let mut screen = Screen::new();
            screen.draw_sprite(x, y, &rows, edges);
            let drawn = lit(&screen);
            let collided = screen.draw_sprite(x, y, &rows, edges);
            prop_assert_eq!(lit(&screen), 0);
            prop_assert_eq!(collided, drawn > 0);
        }
    }
}
