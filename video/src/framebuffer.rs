//! Physical framebuffer surface.

use core::ptr::{self, NonNull};

use strata_abi::draw::{Canvas, PixelColor};
use strata_abi::{DisplayInfo, PixelFormat, VideoError, VideoResult};
use strata_lib::{klog_debug, klog_warn};

pub const MIN_FRAMEBUFFER_WIDTH: u32 = 320;
pub const MIN_FRAMEBUFFER_HEIGHT: u32 = 240;
const MAX_BUFFER_SIZE: usize = 64 * 1024 * 1024;

/// The display memory handed over by the bootloader.
///
/// Channel order comes from `DisplayInfo::format` and is fixed for the life of
/// the surface. All stores are volatile.
pub struct ScreenSurface {
    base: NonNull<u8>,
    info: DisplayInfo,
}

// SAFETY: the surface is the sole owner of the mapped range (see `new`).
unsafe impl Send for ScreenSurface {}

impl ScreenSurface {
    /// Wrap mapped framebuffer memory.
    ///
    /// # Safety
    ///
    /// `base` must point to at least `info.buffer_size()` writable bytes that
    /// stay mapped for the lifetime of the surface and are not accessed
    /// through any other path while it exists.
    pub unsafe fn new(base: *mut u8, info: DisplayInfo) -> VideoResult<Self> {
        let Some(base) = NonNull::new(base) else {
            klog_warn!("Framebuffer init failed: null base address");
            return Err(VideoError::NoFramebuffer);
        };
        if !info.is_valid()
            || info.width < MIN_FRAMEBUFFER_WIDTH
            || info.height < MIN_FRAMEBUFFER_HEIGHT
        {
            klog_warn!(
                "Framebuffer init failed: {}x{} pitch={} bpp={}",
                info.width,
                info.height,
                info.pitch,
                info.bytes_per_pixel() * 8
            );
            return Err(VideoError::InvalidGeometry);
        }
        match info.buffer_size() {
            Some(size) if size <= MAX_BUFFER_SIZE => {}
            _ => return Err(VideoError::InvalidGeometry),
        }

        klog_debug!(
            "Framebuffer init: virt=0x{:x} {}x{} pitch={} format={:?}",
            base.as_ptr() as usize,
            info.width,
            info.height,
            info.pitch,
            info.format
        );

        Ok(Self { base, info })
    }

    /// Wrap mapped framebuffer memory described by raw boot parameters.
    ///
    /// `format_code` is the `PixelFormat` discriminant reported by platform
    /// bring-up.
    ///
    /// # Safety
    ///
    /// Same contract as [`ScreenSurface::new`].
    pub unsafe fn from_raw_parts(
        base: *mut u8,
        width: u32,
        height: u32,
        pitch: u32,
        format_code: u32,
    ) -> VideoResult<Self> {
        let Some(format) = PixelFormat::from_u32(format_code) else {
            klog_warn!("Framebuffer init failed: unknown pixel format {}", format_code);
            return Err(VideoError::UnsupportedFormat);
        };
        let info = DisplayInfo::with_pitch(width, height, pitch, format);
        // SAFETY: forwarded from the caller.
        unsafe { Self::new(base, info) }
    }

    #[inline]
    pub fn info(&self) -> &DisplayInfo {
        &self.info
    }

    #[inline]
    fn bytes_pp(&self) -> usize {
        self.info.bytes_per_pixel() as usize
    }

    #[inline]
    fn checked_ptr(&self, offset: usize, len: usize) -> Option<*mut u8> {
        let end = offset.checked_add(len)?;
        if end > self.info.buffer_size()? {
            return None;
        }
        // SAFETY: offset and len were bounds-checked against the mapped size.
        Some(unsafe { self.base.as_ptr().add(offset) })
    }
}

impl Canvas for ScreenSurface {
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
        let bpp = self.bytes_pp();
        let offset = y * self.info.pitch as usize + x * bpp;
        let Some(dst) = self.checked_ptr(offset, bpp) else {
            return;
        };
        let mut px = [0u8; 4];
        self.info.format.encode_into(color, &mut px);
        for (i, byte) in px.iter().take(bpp).enumerate() {
            // SAFETY: `checked_ptr` validated `bpp` bytes starting at `dst`.
            unsafe { dst.add(i).write_volatile(*byte) };
        }
    }

    fn copy_row(&mut self, x: usize, y: usize, src: &[u8], src_format: PixelFormat) {
        if src_format != self.info.format {
            let src_bpp = src_format.bytes_per_pixel() as usize;
            for (i, px) in src.chunks_exact(src_bpp).enumerate() {
                self.write_pixel(x + i, y, src_format.decode(px));
            }
            return;
        }

        let offset = y * self.info.pitch as usize + x * self.bytes_pp();
        let Some(dst) = self.checked_ptr(offset, src.len()) else {
            return;
        };
        // SAFETY: destination range checked above; `src` is a separate slice.
        unsafe { ptr::copy_nonoverlapping(src.as_ptr(), dst, src.len()) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec;
    use strata_abi::Point;

    #[test]
    fn test_rejects_null_and_tiny_surfaces() {
        let info = DisplayInfo::new(640, 480, PixelFormat::Rgbx8888);
        let err = unsafe { ScreenSurface::new(ptr::null_mut(), info) }.err();
        assert_eq!(err, Some(VideoError::NoFramebuffer));

        let mut mem = vec![0u8; 64];
        let tiny = DisplayInfo::new(4, 4, PixelFormat::Rgbx8888);
        let err = unsafe { ScreenSurface::new(mem.as_mut_ptr(), tiny) }.err();
        assert_eq!(err, Some(VideoError::InvalidGeometry));
    }

    #[test]
    fn test_raw_parts_validate_format_code() {
        let mut mem = vec![0u8; 320 * 4 * 240];
        let err = unsafe { ScreenSurface::from_raw_parts(mem.as_mut_ptr(), 320, 240, 1280, 9) }
            .err();
        assert_eq!(err, Some(VideoError::UnsupportedFormat));

        let Ok(screen) =
            (unsafe { ScreenSurface::from_raw_parts(mem.as_mut_ptr(), 320, 240, 1280, 1) })
        else {
            panic!("surface init");
        };
        assert_eq!(screen.pixel_format(), PixelFormat::Bgrx8888);
        assert_eq!(screen.info().pitch, 1280);
    }

    #[test]
    fn test_channel_order_follows_format() {
        let info = DisplayInfo::new(320, 240, PixelFormat::Bgrx8888);
        let mut mem = vec![0u8; info.buffer_size().unwrap_or(0)];
        let Ok(mut screen) = (unsafe { ScreenSurface::new(mem.as_mut_ptr(), info) }) else {
            panic!("surface init");
        };

        screen.write(Point::new(1, 0), PixelColor::rgb(0x10, 0x20, 0x30));
        screen.write(Point::new(320, 0), PixelColor::WHITE);
        drop(screen);

        assert_eq!(&mem[4..8], &[0x30, 0x20, 0x10, 0x00]);
        assert!(mem[8..].iter().all(|&b| b == 0));
    }
}
