//! Display geometry handed over by platform bring-up.

use crate::geometry::Point;
use crate::pixel::PixelFormat;

/// Geometry and layout of a pixel surface.
///
/// Reported once at boot for the physical display; off-screen buffers are
/// created from the same description so that both sides agree on layout.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DisplayInfo {
    pub width: u32,
    pub height: u32,
    /// Row stride in bytes.
    pub pitch: u32,
    pub format: PixelFormat,
}

impl DisplayInfo {
    pub const MAX_DIMENSION: u32 = 8192;

    /// Tightly packed description: `pitch = width * bytes_per_pixel`.
    #[inline]
    pub const fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            pitch: width * format.bytes_per_pixel() as u32,
            format,
        }
    }

    /// Description with an explicit stride, e.g. a GOP framebuffer whose
    /// scan lines are wider than the visible resolution.
    #[inline]
    pub const fn with_pitch(width: u32, height: u32, pitch: u32, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            pitch,
            format,
        }
    }

    #[inline]
    pub const fn bytes_per_pixel(&self) -> u8 {
        self.format.bytes_per_pixel()
    }

    /// Total bytes covered by the surface, or `None` on overflow.
    #[inline]
    pub fn buffer_size(&self) -> Option<usize> {
        (self.pitch as usize).checked_mul(self.height as usize)
    }

    /// Check dimensions and stride for consistency.
    pub fn is_valid(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.width <= Self::MAX_DIMENSION
            && self.height <= Self::MAX_DIMENSION
            && (self.pitch as u64) >= self.width as u64 * self.bytes_per_pixel() as u64
    }

    #[inline]
    pub fn size(&self) -> Point {
        Point::new(self.width as i32, self.height as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_pitch() {
        let info = DisplayInfo::new(800, 600, PixelFormat::Bgrx8888);
        assert_eq!(info.pitch, 3200);
        assert_eq!(info.buffer_size(), Some(3200 * 600));
        assert!(info.is_valid());
    }

    #[test]
    fn test_short_pitch_is_invalid() {
        let info = DisplayInfo::with_pitch(800, 600, 100, PixelFormat::Rgbx8888);
        assert!(!info.is_valid());
        assert!(!DisplayInfo::new(0, 600, PixelFormat::Rgbx8888).is_valid());
    }
}
