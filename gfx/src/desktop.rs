//! Flat desktop and window chrome painters.

use strata_abi::draw::{Canvas, PixelColor};
use strata_abi::{Point, Rect};

use crate::canvas_ops::{draw_rectangle, fill_rectangle};

pub const DESKTOP_BG_COLOR: PixelColor = PixelColor::rgb(45, 118, 237);

pub const TASKBAR_HEIGHT: i32 = 50;
const TASKBAR_COLOR: PixelColor = PixelColor::rgb(1, 8, 17);
const START_AREA_COLOR: PixelColor = PixelColor::rgb(80, 80, 80);
const START_BUTTON_COLOR: PixelColor = PixelColor::rgb(160, 160, 160);

pub const TITLE_BAR_HEIGHT: i32 = 18;
const FRAME_FACE: PixelColor = PixelColor::from_u32(0xC6_C6_C6);
const FRAME_LIGHT: PixelColor = PixelColor::from_u32(0xFF_FF_FF);
const FRAME_SHADE: PixelColor = PixelColor::from_u32(0x84_84_84);
const FRAME_DARK: PixelColor = PixelColor::from_u32(0x00_00_00);
const TITLE_BAR_COLOR: PixelColor = PixelColor::from_u32(0x00_00_84);

/// Paint the desktop background with a task bar along the bottom edge.
pub fn draw_desktop<T: Canvas + ?Sized>(target: &mut T, background: PixelColor) {
    let w = target.width() as i32;
    let h = target.height() as i32;

    fill_rectangle(target, Point::new(0, 0), Point::new(w, h - TASKBAR_HEIGHT), background);
    fill_rectangle(
        target,
        Point::new(0, h - TASKBAR_HEIGHT),
        Point::new(w, TASKBAR_HEIGHT),
        TASKBAR_COLOR,
    );
    fill_rectangle(
        target,
        Point::new(0, h - TASKBAR_HEIGHT),
        Point::new(w / 5, TASKBAR_HEIGHT),
        START_AREA_COLOR,
    );
    draw_rectangle(
        target,
        Point::new(10, h - 40),
        Point::new(30, 30),
        START_BUTTON_COLOR,
    );
}

/// Paint flat window chrome over the whole target: a bevelled border, a face
/// color for the client area and a solid title band.
pub fn draw_window_frame<T: Canvas + ?Sized>(target: &mut T) {
    let w = target.width() as i32;
    let h = target.height() as i32;

    let mut band = |x: i32, y: i32, bw: i32, bh: i32, color: PixelColor| {
        target.fill_rect(Rect::new(x, y, bw, bh), color);
    };

    band(0, 0, w, 1, FRAME_FACE);
    band(1, 1, w - 2, 1, FRAME_LIGHT);
    band(0, 0, 1, h, FRAME_FACE);
    band(1, 1, 1, h - 2, FRAME_LIGHT);
    band(w - 2, 1, 1, h - 2, FRAME_SHADE);
    band(w - 1, 0, 1, h, FRAME_DARK);
    band(2, 2, w - 4, h - 4, FRAME_FACE);
    band(3, 3, w - 6, TITLE_BAR_HEIGHT, TITLE_BAR_COLOR);
    band(1, h - 2, w - 2, 1, FRAME_SHADE);
    band(0, h - 1, w, 1, FRAME_DARK);
}
