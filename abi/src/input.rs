//! Pointer input records produced by the input driver.

use bitflags::bitflags;

use crate::geometry::Point;

bitflags! {
    /// Button state of one pointer report.
    ///
    /// Bit layout follows the HID boot protocol and PS/2 packet byte 0.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MouseButtons: u8 {
        /// Primary (left) button.
        const LEFT   = 1 << 0;
        const RIGHT  = 1 << 1;
        const MIDDLE = 1 << 2;
    }
}

/// One decoded pointer report: button mask plus relative motion.
///
/// The displacement is a single hardware report's worth of motion, not an
/// absolute position.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PointerEvent {
    pub buttons: MouseButtons,
    pub dx: i8,
    pub dy: i8,
}

impl PointerEvent {
    #[inline]
    pub const fn new(buttons: MouseButtons, dx: i8, dy: i8) -> Self {
        Self { buttons, dx, dy }
    }

    /// Build from a raw report; unknown button bits are dropped.
    #[inline]
    pub const fn from_raw(buttons: u8, dx: i8, dy: i8) -> Self {
        Self {
            buttons: MouseButtons::from_bits_truncate(buttons),
            dx,
            dy,
        }
    }

    #[inline]
    pub fn displacement(&self) -> Point {
        Point::new(self.dx as i32, self.dy as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_truncates_unknown_bits() {
        let ev = PointerEvent::from_raw(0xF9, -3, 4);
        assert_eq!(ev.buttons, MouseButtons::LEFT);
        assert_eq!(ev.displacement(), Point::new(-3, 4));
    }
}
