#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod canvas_ops;
pub mod cursor;
pub mod desktop;
pub mod frame_buffer;
pub mod window;

pub use canvas_ops::{draw_rectangle, fill_rectangle};
pub use frame_buffer::FrameBuffer;
pub use window::Window;
