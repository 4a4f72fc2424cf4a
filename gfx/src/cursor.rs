//! Arrow mouse cursor bitmap.

use strata_abi::draw::{Canvas, PixelColor};
use strata_abi::{PixelFormat, Point, VideoResult};

use crate::window::Window;

pub const MOUSE_CURSOR_WIDTH: usize = 15;
pub const MOUSE_CURSOR_HEIGHT: usize = 24;

/// Chroma key for the cursor background. Never used as a visible color.
pub const MOUSE_TRANSPARENT_COLOR: PixelColor = PixelColor::rgb(0, 0, 1);

const OUTLINE: PixelColor = PixelColor::BLACK;
const FILL: PixelColor = PixelColor::WHITE;

// '@' outline, '.' fill, ' ' transparent.
const MOUSE_CURSOR_SHAPE: [&[u8; MOUSE_CURSOR_WIDTH]; MOUSE_CURSOR_HEIGHT] = [
    b"@              ",
    b"@@             ",
    b"@.@            ",
    b"@..@           ",
    b"@...@          ",
    b"@....@         ",
    b"@.....@        ",
    b"@......@       ",
    b"@.......@      ",
    b"@........@     ",
    b"@.........@    ",
    b"@..........@   ",
    b"@...........@  ",
    b"@............@ ",
    b"@......@@@@@@@@",
    b"@......@       ",
    b"@....@@.@      ",
    b"@...@ @.@      ",
    b"@..@   @.@     ",
    b"@.@    @.@     ",
    b"@@      @.@    ",
    b"@       @.@    ",
    b"         @.@   ",
    b"         @@@   ",
];

/// Paint the cursor with its hot spot at `pos`.
///
/// Background cells are written with [`MOUSE_TRANSPARENT_COLOR`] so that a
/// window holding the cursor composites as an arrow shape.
pub fn draw_mouse_cursor<T: Canvas + ?Sized>(target: &mut T, pos: Point) {
    for (dy, row) in MOUSE_CURSOR_SHAPE.iter().enumerate() {
        for (dx, cell) in row.iter().enumerate() {
            let color = match cell {
                b'@' => OUTLINE,
                b'.' => FILL,
                _ => MOUSE_TRANSPARENT_COLOR,
            };
            target.write(pos + Point::new(dx as i32, dy as i32), color);
        }
    }
}

/// Build a chroma-keyed window holding the cursor image.
pub fn new_cursor_window(format: PixelFormat) -> VideoResult<Window> {
    let mut window = Window::new(
        MOUSE_CURSOR_WIDTH as u32,
        MOUSE_CURSOR_HEIGHT as u32,
        format,
    )?;
    window.set_transparent_color(Some(MOUSE_TRANSPARENT_COLOR));
    draw_mouse_cursor(&mut window, Point::ORIGIN);
    Ok(window)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_window_shape() {
        let Ok(w) = new_cursor_window(PixelFormat::Bgrx8888) else {
            panic!("alloc");
        };
        assert_eq!(w.transparent_color(), Some(MOUSE_TRANSPARENT_COLOR));
        assert_eq!(w.at(Point::new(0, 0)), Some(OUTLINE));
        assert_eq!(w.at(Point::new(1, 2)), Some(FILL));
        assert_eq!(w.at(Point::new(14, 0)), Some(MOUSE_TRANSPARENT_COLOR));
        assert_eq!(w.at(Point::new(11, 23)), Some(OUTLINE));
    }
}
