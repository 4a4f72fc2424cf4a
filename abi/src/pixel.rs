//! Pixel format definitions

use crate::draw::PixelColor;

/// Memory layout of one pixel in a framebuffer or off-screen buffer.
///
/// The physical display reports one of these at boot; off-screen buffers
/// pick the same value so that presenting is a plain row copy.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelFormat {
    /// 32-bit, 8 bits per channel plus a reserved byte.
    /// Memory layout: [R, G, B, X]
    #[default]
    Rgbx8888 = 0,
    /// 32-bit, 8 bits per channel plus a reserved byte.
    /// Memory layout: [B, G, R, X]
    Bgrx8888 = 1,
    /// 24-bit packed.
    /// Memory layout: [R, G, B]
    Rgb888 = 2,
    /// 24-bit packed.
    /// Memory layout: [B, G, R]
    Bgr888 = 3,
}

impl PixelFormat {
    /// Convert from u32 representation
    #[inline]
    pub fn from_u32(val: u32) -> Option<Self> {
        match val {
            0 => Some(Self::Rgbx8888),
            1 => Some(Self::Bgrx8888),
            2 => Some(Self::Rgb888),
            3 => Some(Self::Bgr888),
            _ => None,
        }
    }

    /// Get bytes per pixel for this format
    #[inline]
    pub const fn bytes_per_pixel(self) -> u8 {
        match self {
            Self::Rgbx8888 | Self::Bgrx8888 => 4,
            Self::Rgb888 | Self::Bgr888 => 3,
        }
    }

    /// Check if format uses BGR byte order (vs RGB)
    #[inline]
    pub const fn is_bgr_order(self) -> bool {
        matches!(self, Self::Bgrx8888 | Self::Bgr888)
    }

    /// Write `color` into `out` using this layout.
    ///
    /// `out` must hold at least `bytes_per_pixel()` bytes; shorter slices are
    /// left untouched.
    #[inline]
    pub fn encode_into(self, color: PixelColor, out: &mut [u8]) {
        let bpp = self.bytes_per_pixel() as usize;
        if out.len() < bpp {
            return;
        }
        let (first, last) = if self.is_bgr_order() {
            (color.b, color.r)
        } else {
            (color.r, color.b)
        };
        out[0] = first;
        out[1] = color.g;
        out[2] = last;
        if bpp == 4 {
            out[3] = 0;
        }
    }

    /// Read a color back out of `bytes` stored in this layout.
    #[inline]
    pub fn decode(self, bytes: &[u8]) -> PixelColor {
        if bytes.len() < 3 {
            return PixelColor::BLACK;
        }
        if self.is_bgr_order() {
            PixelColor::rgb(bytes[2], bytes[1], bytes[0])
        } else {
            PixelColor::rgb(bytes[0], bytes[1], bytes[2])
        }
    }
}
