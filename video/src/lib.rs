#![no_std]
#![forbid(unsafe_op_in_unsafe_fn)]

extern crate alloc;

#[cfg(test)]
extern crate std;

use strata_abi::VideoResult;
use strata_abi::draw::Canvas;
use strata_lib::klog_warn;

pub mod config;
pub mod desktop;
pub mod framebuffer;
pub mod layer;
pub mod layer_manager;
pub mod pointer;


pub use config::{CompositorConfig, config_from_cmdline};
pub use desktop::Desktop;
pub use framebuffer::ScreenSurface;
pub use layer::{Layer, LayerId, SharedWindow, share_window};
pub use layer_manager::LayerManager;
pub use pointer::{DragState, PointerController};

/// Bring up the desktop on `screen` using options from the kernel command line.
pub fn init<S: Canvas>(screen: S, cmdline: Option<&str>) -> VideoResult<Desktop<S>> {
    let config = config_from_cmdline(cmdline);
    Desktop::new(screen, config).inspect_err(|err| {
        klog_warn!("video: desktop init failed: {}", err);
    })
}
