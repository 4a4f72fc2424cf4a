use crate::geometry::{Point, Rect};
use crate::pixel::PixelFormat;

/// Canonical color representation: an opaque RGB triple.
///
/// The compositor never blends; transparency is a chroma key, so two colors
/// are either identical or the source wins.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PixelColor {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(0xFF, 0xFF, 0xFF);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Construct from a `0xRRGGBB` value; the top byte is ignored.
    #[inline]
    pub const fn from_u32(value: u32) -> Self {
        Self {
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        }
    }

    /// Pack as `0x00RRGGBB`.
    #[inline]
    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }
}

#[inline]
fn clip_row_span_bounds(
    width: u32,
    height: u32,
    row: i32,
    x0: i32,
    x1: i32,
) -> Option<(usize, usize, usize)> {
    if row < 0 || row >= height as i32 {
        return None;
    }
    let w = width as i32;
    let x0 = x0.max(0);
    let x1 = x1.min(w - 1);
    if x0 > x1 {
        return None;
    }
    Some((row as usize, x0 as usize, x1 as usize))
}

/// Pixel sink trait.
///
/// Every surface the compositor can paint into implements this: the physical
/// `ScreenSurface`, off-screen `FrameBuffer`s and `Window` content buffers.
/// Implementors provide one in-bounds write primitive; clipping and the
/// higher-level helpers are default methods built on it, so out-of-range
/// coordinates are always dropped rather than reaching pixel memory.
pub trait Canvas {
    /// Surface width in pixels.
    fn width(&self) -> u32;

    /// Surface height in pixels.
    fn height(&self) -> u32;

    /// Memory layout used by this surface.
    fn pixel_format(&self) -> PixelFormat;

    /// Store `color` at column `x`, row `y`.
    ///
    /// Callers must ensure `x < width()` and `y < height()`.
    fn write_pixel(&mut self, x: usize, y: usize, color: PixelColor);

    /// Copy one row of pixels encoded as `src_format` starting at (`x`, `y`).
    ///
    /// The span must already be clipped to this surface. The default decodes
    /// and writes pixel by pixel; buffer-backed surfaces override it with a
    /// plain byte copy when the formats agree.
    fn copy_row(&mut self, x: usize, y: usize, src: &[u8], src_format: PixelFormat) {
        let bpp = src_format.bytes_per_pixel() as usize;
        for (i, px) in src.chunks_exact(bpp).enumerate() {
            self.write_pixel(x + i, y, src_format.decode(px));
        }
    }

    #[inline]
    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width() as i32, self.height() as i32)
    }

    #[inline]
    fn clip_row_span(&self, row: i32, x0: i32, x1: i32) -> Option<(usize, usize, usize)> {
        clip_row_span_bounds(self.width(), self.height(), row, x0, x1)
    }

    /// Draw a single pixel. Out-of-bounds silently ignored.
    #[inline]
    fn put_pixel(&mut self, x: i32, y: i32, color: PixelColor) {
        if x < 0 || y < 0 || x >= self.width() as i32 || y >= self.height() as i32 {
            return;
        }
        self.write_pixel(x as usize, y as usize, color);
    }

    /// Point form of [`Canvas::put_pixel`].
    #[inline]
    fn write(&mut self, pos: Point, color: PixelColor) {
        self.put_pixel(pos.x, pos.y, color);
    }

    /// Fill pixels from column `x0` to `x1` (inclusive) on `row`.
    /// Out-of-bounds coordinates are clipped.
    #[inline]
    fn fill_row_span(&mut self, row: i32, x0: i32, x1: i32, color: PixelColor) {
        let Some((row, x0, x1)) = self.clip_row_span(row, x0, x1) else {
            return;
        };
        for x in x0..=x1 {
            self.write_pixel(x, row, color);
        }
    }

    /// Draw a horizontal line from `x0` to `x1` (inclusive).
    #[inline]
    fn hline(&mut self, x0: i32, x1: i32, y: i32, color: PixelColor) {
        let (x0, x1) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        self.fill_row_span(y, x0, x1, color);
    }

    /// Draw a vertical line from `y0` to `y1` (inclusive).
    #[inline]
    fn vline(&mut self, x: i32, y0: i32, y1: i32, color: PixelColor) {
        if x < 0 || x >= self.width() as i32 {
            return;
        }
        let (y0, y1) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        let y0 = y0.max(0);
        let y1 = y1.min(self.height() as i32 - 1);
        for y in y0..=y1 {
            self.write_pixel(x as usize, y as usize, color);
        }
    }

    /// Fill a rectangle, clipped to the surface.
    #[inline]
    fn fill_rect(&mut self, rect: Rect, color: PixelColor) {
        let r = rect.intersect(&self.bounds());
        if r.is_empty() {
            return;
        }
        for row in r.pos.y..r.bottom() {
            self.fill_row_span(row, r.pos.x, r.right() - 1, color);
        }
    }

    /// Paint the whole surface with one color.
    #[inline]
    fn clear(&mut self, color: PixelColor) {
        let bounds = self.bounds();
        self.fill_rect(bounds, color);
    }
}
