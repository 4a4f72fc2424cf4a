//! Strata shared types
//!
//! Canonical definitions for everything that crosses a crate boundary in the
//! compositor stack: geometry, colors and pixel formats, the `Canvas` pixel
//! sink, display geometry reported by platform bring-up, pointer events and
//! the error type returned by constructors.

#![no_std]
#![forbid(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod display;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod input;
pub mod pixel;

pub use display::DisplayInfo;
pub use draw::{Canvas, PixelColor};
pub use error::{VideoError, VideoResult};
pub use geometry::{Point, Rect};
pub use input::{MouseButtons, PointerEvent};
pub use pixel::PixelFormat;
