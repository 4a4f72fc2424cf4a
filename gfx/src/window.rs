use alloc::vec::Vec;

use strata_abi::draw::{Canvas, PixelColor};
use strata_abi::{PixelFormat, Point, Rect, VideoError, VideoResult};

use crate::frame_buffer::{FrameBuffer, clip_copy};

/// A rectangular content buffer that layers composite onto the screen.
///
/// Pixels are kept twice: as plain colors for reads and chroma-key tests, and
/// pre-encoded in a shadow [`FrameBuffer`] using the screen's layout so that
/// opaque windows are presented with row copies. Dimensions are fixed at
/// construction.
pub struct Window {
    width: u32,
    height: u32,
    data: Vec<PixelColor>,
    transparent_color: Option<PixelColor>,
    shadow: FrameBuffer,
}

impl Window {
    /// Create a `width × height` window whose shadow copy uses `shadow_format`.
    pub fn new(width: u32, height: u32, shadow_format: PixelFormat) -> VideoResult<Self> {
        let shadow = FrameBuffer::with_size(width, height, shadow_format)?;
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or(VideoError::InvalidGeometry)?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| VideoError::OutOfMemory)?;
        data.resize(len, PixelColor::BLACK);

        Ok(Self {
            width,
            height,
            data,
            transparent_color: None,
            shadow,
        })
    }

    #[inline]
    pub fn size(&self) -> Point {
        Point::new(self.width as i32, self.height as i32)
    }

    /// Set or clear the chroma key skipped while compositing.
    pub fn set_transparent_color(&mut self, color: Option<PixelColor>) {
        self.transparent_color = color;
    }

    #[inline]
    pub fn transparent_color(&self) -> Option<PixelColor> {
        self.transparent_color
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width as usize + x
    }

    /// Color stored at `pos`, or `None` outside the window.
    pub fn at(&self, pos: Point) -> Option<PixelColor> {
        if !self.bounds().contains(pos) {
            return None;
        }
        Some(self.data[self.index(pos.x as usize, pos.y as usize)])
    }

    /// Shadow copy encoded in the screen layout.
    #[inline]
    pub fn shadow(&self) -> &FrameBuffer {
        &self.shadow
    }

    /// Move `src` to `dst_pos` inside this window.
    ///
    /// Overlapping source and destination are handled like `memmove`; this is
    /// what scrolls a console window's content.
    pub fn move_rect(&mut self, dst_pos: Point, src: Rect) {
        let bounds = self.bounds();
        let Some((src_clip, dst)) = clip_copy(src, bounds, dst_pos, bounds) else {
            return;
        };

        let width = self.width as usize;
        let row_len = src_clip.size.x as usize;
        let rows = src_clip.size.y as usize;
        let upward = dst.y <= src_clip.pos.y;

        for i in 0..rows {
            let row = if upward { i } else { rows - 1 - i };
            let src_off = (src_clip.pos.y as usize + row) * width + src_clip.pos.x as usize;
            let dst_off = (dst.y as usize + row) * width + dst.x as usize;
            self.data.copy_within(src_off..src_off + row_len, dst_off);
        }

        self.shadow.move_rect(dst_pos, src);
    }

    /// Shift the whole content up by `rows`, filling the vacated bottom band.
    pub fn scroll_up(&mut self, rows: i32, fill: PixelColor) {
        if rows <= 0 {
            return;
        }
        let size = self.size();
        if rows >= size.y {
            self.clear(fill);
            return;
        }
        self.move_rect(Point::ORIGIN, Rect::new(0, rows, size.x, size.y - rows));
        self.fill_rect(Rect::new(0, size.y - rows, size.x, rows), fill);
    }

    /// Composite onto an off-screen buffer; the layer compositing path.
    #[inline]
    pub fn draw_to(&self, dst: &mut FrameBuffer, pos: Point, area: Rect) {
        self.draw_into(dst, pos, area);
    }

    /// Composite this window onto `sink` with its top-left corner at `offset`.
    ///
    /// Only the part inside `area` (sink coordinates) and inside the sink is
    /// touched. Pixels equal to the transparent color are skipped, leaving
    /// whatever the sink already holds.
    pub fn draw_into<C: Canvas + ?Sized>(&self, sink: &mut C, offset: Point, area: Rect) {
        let clip = Rect::from_parts(offset, self.size())
            .intersect(&area)
            .intersect(&sink.bounds());
        if clip.is_empty() {
            return;
        }

        let Some(key) = self.transparent_color else {
            self.shadow.copy_to(sink, clip.pos, clip.offset(-offset));
            return;
        };

        for y in clip.pos.y..clip.bottom() {
            let local_y = (y - offset.y) as usize;
            for x in clip.pos.x..clip.right() {
                let color = self.data[self.index((x - offset.x) as usize, local_y)];
                if color != key {
                    sink.write_pixel(x as usize, y as usize, color);
                }
            }
        }
    }
}

impl Canvas for Window {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn pixel_format(&self) -> PixelFormat {
        self.shadow.pixel_format()
    }

    #[inline]
    fn write_pixel(&mut self, x: usize, y: usize, color: PixelColor) {
        let idx = self.index(x, y);
        if let Some(slot) = self.data.get_mut(idx) {
            *slot = color;
            self.shadow.write_pixel(x, y, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: PixelColor = PixelColor::rgb(10, 20, 30);
    const KEY: PixelColor = PixelColor::rgb(0, 0, 1);
    const INK: PixelColor = PixelColor::rgb(200, 100, 50);

    fn window(width: u32, height: u32) -> Window {
        match Window::new(width, height, PixelFormat::Bgrx8888) {
            Ok(w) => w,
            Err(err) => panic!("window alloc failed: {}", err),
        }
    }

    fn screen(width: u32, height: u32) -> FrameBuffer {
        match FrameBuffer::with_size(width, height, PixelFormat::Bgrx8888) {
            Ok(fb) => fb,
            Err(err) => panic!("buffer alloc failed: {}", err),
        }
    }

    #[test]
    fn test_write_and_read_back() {
        let mut w = window(8, 4);
        w.write(Point::new(7, 3), INK);
        assert_eq!(w.at(Point::new(7, 3)), Some(INK));
        assert_eq!(w.shadow().pixel(Point::new(7, 3)), Some(INK));
        assert_eq!(w.at(Point::new(8, 3)), None);
    }

    #[test]
    fn test_out_of_range_write_does_not_spill() {
        let mut w = window(4, 4);
        // (4, 0) would alias (0, 1) with a naive row-major index.
        w.write(Point::new(4, 0), INK);
        w.write(Point::new(-1, 1), INK);
        w.write(Point::new(0, 4), INK);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(w.at(Point::new(x, y)), Some(PixelColor::BLACK));
            }
        }
    }

    #[test]
    fn test_move_rect_scroll_matches_row_copy() {
        const ROWS: i32 = 6;
        let mut w = window(5, ROWS as u32);
        for y in 0..ROWS {
            for x in 0..5 {
                w.write(Point::new(x, y), PixelColor::rgb(x as u8, y as u8, 7));
            }
        }

        // Reference: copy row by row through a temporary.
        let mut expected = Vec::new();
        for y in 0..ROWS {
            let src_y = if y < ROWS - 1 { y + 1 } else { y };
            for x in 0..5 {
                expected.push(PixelColor::rgb(x as u8, src_y as u8, 7));
            }
        }

        w.move_rect(Point::ORIGIN, Rect::new(0, 1, 5, ROWS - 1));

        let mut actual = Vec::new();
        for y in 0..ROWS {
            for x in 0..5 {
                actual.push(w.at(Point::new(x, y)).unwrap_or_default());
            }
        }
        assert_eq!(actual, expected);
        assert_eq!(w.shadow().pixel(Point::new(2, 0)), Some(PixelColor::rgb(2, 1, 7)));
    }

    #[test]
    fn test_move_rect_overlapping_right() {
        let mut w = window(6, 1);
        for x in 0..6 {
            w.write(Point::new(x, 0), PixelColor::rgb(x as u8, 0, 0));
        }
        w.move_rect(Point::new(2, 0), Rect::new(0, 0, 4, 1));
        let reds: Vec<u8> = (0..6)
            .filter_map(|x| w.at(Point::new(x, 0)))
            .map(|c| c.r)
            .collect();
        assert_eq!(reds, [0, 1, 0, 1, 2, 3]);
    }

    #[test]
    fn test_scroll_up_fills_bottom() {
        let mut w = window(2, 3);
        w.write(Point::new(0, 2), INK);
        w.scroll_up(1, BG);
        assert_eq!(w.at(Point::new(0, 1)), Some(INK));
        assert_eq!(w.at(Point::new(0, 2)), Some(BG));
        assert_eq!(w.at(Point::new(1, 2)), Some(BG));
    }

    #[test]
    fn test_transparent_pixels_keep_destination() {
        let mut w = window(4, 4);
        w.clear(KEY);
        w.fill_rect(Rect::new(1, 1, 2, 2), INK);
        w.set_transparent_color(Some(KEY));

        let mut fb = screen(10, 10);
        fb.clear(BG);
        let area = fb.bounds();
        w.draw_into(&mut fb, Point::new(3, 3), area);

        for y in 0..10 {
            for x in 0..10 {
                let inside = (4..6).contains(&x) && (4..6).contains(&y);
                let expected = if inside { INK } else { BG };
                assert_eq!(fb.pixel(Point::new(x, y)), Some(expected), "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_draw_into_clips_to_area_and_sink() {
        let mut w = window(4, 4);
        w.clear(INK);

        let mut fb = screen(6, 6);
        fb.clear(BG);
        // Partly off the left/top edge, area limited to one column.
        w.draw_into(&mut fb, Point::new(-2, -2), Rect::new(1, 0, 1, 6));

        assert_eq!(fb.pixel(Point::new(1, 0)), Some(INK));
        assert_eq!(fb.pixel(Point::new(1, 1)), Some(INK));
        assert_eq!(fb.pixel(Point::new(1, 2)), Some(BG));
        assert_eq!(fb.pixel(Point::new(0, 0)), Some(BG));
    }

    #[test]
    fn test_zero_size_window_is_rejected() {
        assert!(matches!(
            Window::new(0, 5, PixelFormat::Rgbx8888),
            Err(VideoError::InvalidGeometry)
        ));
    }
}
