//! Integer screen geometry.
//!
//! All coordinates are signed so that layers may sit partly off-screen; every
//! consumer clips against its own bounds before touching pixel memory.

use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A position or a 2-D extent in pixels.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
        }
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
        }
    }

    /// Clamp both axes into `[lo, hi]` (inclusive).
    #[inline]
    pub fn clamp(self, lo: Self, hi: Self) -> Self {
        self.max(lo).min(hi)
    }
}

impl Add for Point {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x.saturating_add(rhs.x),
            y: self.y.saturating_add(rhs.y),
        }
    }
}

impl AddAssign for Point {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Point {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x.saturating_sub(rhs.x),
            y: self.y.saturating_sub(rhs.y),
        }
    }
}

impl SubAssign for Point {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Point {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            x: self.x.saturating_neg(),
            y: self.y.saturating_neg(),
        }
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle: origin plus size. The far edges are exclusive.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub pos: Point,
    pub size: Point,
}

impl Rect {
    /// The canonical empty rectangle returned by `intersect` for disjoint inputs.
    pub const EMPTY: Self = Self {
        pos: Point::ORIGIN,
        size: Point::ORIGIN,
    };

    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            pos: Point { x, y },
            size: Point {
                x: width,
                y: height,
            },
        }
    }

    #[inline]
    pub const fn from_parts(pos: Point, size: Point) -> Self {
        Self { pos, size }
    }

    /// Rectangle anchored at the origin with the given extent.
    #[inline]
    pub const fn with_size(size: Point) -> Self {
        Self {
            pos: Point::ORIGIN,
            size,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.x <= 0 || self.size.y <= 0
    }

    /// Exclusive right edge.
    #[inline]
    pub fn right(&self) -> i32 {
        self.pos.x.saturating_add(self.size.x)
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.pos.y.saturating_add(self.size.y)
    }

    /// Exclusive far corner.
    #[inline]
    pub fn end(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    #[inline]
    pub fn area(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.size.x as i64 * self.size.y as i64
        }
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        !self.is_empty()
            && p.x >= self.pos.x
            && p.x < self.right()
            && p.y >= self.pos.y
            && p.y < self.bottom()
    }

    /// Overlap of two rectangles.
    ///
    /// Returns [`Rect::EMPTY`] when the inputs are disjoint, only touch along an
    /// edge, or either of them is degenerate.
    pub fn intersect(&self, other: &Self) -> Self {
        if self.is_empty() || other.is_empty() {
            return Self::EMPTY;
        }
        let pos = self.pos.max(other.pos);
        let end = self.end().min(other.end());
        let size = end - pos;
        if size.x <= 0 || size.y <= 0 {
            return Self::EMPTY;
        }
        Self { pos, size }
    }

    /// Smallest rectangle covering both inputs. Empty inputs are ignored.
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let pos = self.pos.min(other.pos);
        let end = self.end().max(other.end());
        Self {
            pos,
            size: end - pos,
        }
    }

    /// Same rectangle shifted by `delta`.
    #[inline]
    pub fn offset(&self, delta: Point) -> Self {
        Self {
            pos: self.pos + delta,
            size: self.size,
        }
    }
}
