use alloc::vec::Vec;

use strata_abi::draw::{Canvas, PixelColor};
use strata_abi::{DisplayInfo, PixelFormat, Point, Rect, VideoError, VideoResult};

/// Clip a rectangular copy against both the source and destination bounds.
///
/// `src_rect` is moved so that its origin lands on `dst_pos`. Returns the
/// surviving source rectangle and the destination origin matching it, or
/// `None` when nothing remains.
pub(crate) fn clip_copy(
    src_rect: Rect,
    src_bounds: Rect,
    dst_pos: Point,
    dst_bounds: Rect,
) -> Option<(Rect, Point)> {
    let delta = dst_pos - src_rect.pos;
    let src = src_rect.intersect(&src_bounds);
    if src.is_empty() {
        return None;
    }
    let dst = src.offset(delta).intersect(&dst_bounds);
    if dst.is_empty() {
        return None;
    }
    Some((dst.offset(-delta), dst.pos))
}

/// An off-screen pixel surface owning its memory.
///
/// Used as the compositor's back buffer and as every window's shadow copy.
/// The layout (`DisplayInfo`) normally mirrors the physical display so that
/// presenting a region is a row-wise byte copy.
pub struct FrameBuffer {
    info: DisplayInfo,
    data: Vec<u8>,
}

impl FrameBuffer {
    /// Allocate a zero-filled buffer described by `info`.
    pub fn new(info: DisplayInfo) -> VideoResult<Self> {
        if !info.is_valid() {
            return Err(VideoError::InvalidGeometry);
        }
        let size = info.buffer_size().ok_or(VideoError::InvalidGeometry)?;

        let mut data = Vec::new();
        data.try_reserve_exact(size)
            .map_err(|_| VideoError::OutOfMemory)?;
        data.resize(size, 0);

        Ok(Self { info, data })
    }

    /// Tightly packed buffer of the given size and layout.
    pub fn with_size(width: u32, height: u32, format: PixelFormat) -> VideoResult<Self> {
        Self::new(DisplayInfo::new(width, height, format))
    }

    #[inline]
    pub fn info(&self) -> &DisplayInfo {
        &self.info
    }

    #[inline]
    pub fn pitch(&self) -> usize {
        self.info.pitch as usize
    }

    #[inline]
    pub fn size(&self) -> Point {
        self.info.size()
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    fn bytes_pp(&self) -> usize {
        self.info.bytes_per_pixel() as usize
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        y * self.pitch() + x * self.bytes_pp()
    }

    /// Read back one pixel; `None` outside the buffer.
    pub fn pixel(&self, pos: Point) -> Option<PixelColor> {
        if !self.bounds().contains(pos) {
            return None;
        }
        let off = self.offset(pos.x as usize, pos.y as usize);
        Some(self.info.format.decode(&self.data[off..off + self.bytes_pp()]))
    }

    /// Encoded bytes of `width` pixels starting at (`x`, `y`).
    #[inline]
    fn row_bytes(&self, x: usize, y: usize, width: usize) -> &[u8] {
        let off = self.offset(x, y);
        &self.data[off..off + width * self.bytes_pp()]
    }

    /// Copy `src_rect` of this buffer to `dst_pos` on any pixel sink.
    ///
    /// Clipped to both surfaces; converts the pixel layout when the
    /// destination format differs.
    pub fn copy_to<C: Canvas + ?Sized>(&self, dst: &mut C, dst_pos: Point, src_rect: Rect) {
        let Some((src, dst_pos)) = clip_copy(src_rect, self.bounds(), dst_pos, dst.bounds())
        else {
            return;
        };

        let width = src.size.x as usize;
        for row in 0..src.size.y {
            let bytes = self.row_bytes(src.pos.x as usize, (src.pos.y + row) as usize, width);
            dst.copy_row(
                dst_pos.x as usize,
                (dst_pos.y + row) as usize,
                bytes,
                self.info.format,
            );
        }
    }

    /// Copy `src_rect` of `src` into this buffer at `dst_pos`.
    pub fn blit_from(&mut self, dst_pos: Point, src: &FrameBuffer, src_rect: Rect) {
        src.copy_to(self, dst_pos, src_rect);
    }

    /// Move a rectangular region within this buffer.
    ///
    /// Source and destination may overlap; rows are walked away from the
    /// destination so no source row is overwritten before it is read.
    pub fn move_rect(&mut self, dst_pos: Point, src_rect: Rect) {
        let bounds = self.bounds();
        let Some((src, dst)) = clip_copy(src_rect, bounds, dst_pos, bounds) else {
            return;
        };

        let pitch = self.pitch();
        let bytes_pp = self.bytes_pp();
        let row_len = src.size.x as usize * bytes_pp;
        let rows = src.size.y as usize;
        let upward = dst.y <= src.pos.y;

        for i in 0..rows {
            let row = if upward { i } else { rows - 1 - i };
            let src_off = (src.pos.y as usize + row) * pitch + src.pos.x as usize * bytes_pp;
            let dst_off = (dst.y as usize + row) * pitch + dst.x as usize * bytes_pp;
            self.data.copy_within(src_off..src_off + row_len, dst_off);
        }
    }
}

impl Canvas for FrameBuffer {
    #[inline]
    fn width(&self) -> u32 {
        self.info.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.info.height
    }

    #[inline]
    fn pixel_format(&self) -> PixelFormat {
        self.info.format
    }

    #[inline]
    fn write_pixel(&mut self, x: usize, y: usize, color: PixelColor) {
        let off = self.offset(x, y);
        let bpp = self.bytes_pp();
        if let Some(px) = self.data.get_mut(off..off + bpp) {
            self.info.format.encode_into(color, px);
        }
    }

    fn copy_row(&mut self, x: usize, y: usize, src: &[u8], src_format: PixelFormat) {
        let off = self.offset(x, y);
        if src_format == self.info.format {
            if let Some(dst) = self.data.get_mut(off..off + src.len()) {
                dst.copy_from_slice(src);
            }
            return;
        }

        let src_bpp = src_format.bytes_per_pixel() as usize;
        for (i, px) in src.chunks_exact(src_bpp).enumerate() {
            self.write_pixel(x + i, y, src_format.decode(px));
        }
    }
}
