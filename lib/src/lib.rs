#![no_std]

#[cfg(test)]
extern crate std;

pub mod klog;

pub use klog::{
    KlogLevel, klog_dropped_lines, klog_get_level, klog_init, klog_is_enabled,
    klog_register_backend, klog_set_level,
};
