//! Kernel logging subsystem.
//!
//! All log output funnels through a single **backend** function. Platform
//! bring-up registers one (typically a serial or console writer) once it is
//! ready; until then lines are discarded and only counted, so the compositor
//! can log freely from the very first frame and from host-side tests.
//!
//! # Backend contract
//!
//! The backend receives the pre-formatted arguments for a **single log line**
//! and is responsible for writing the text followed by a trailing newline
//! without interleaving with other lines.
//!
//! # Registration
//!
//! ```ignore
//! // In your serial driver init:
//! strata_lib::klog::klog_register_backend(my_backend_fn);
//! ```

use core::fmt;
use core::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

use spin::RwLock;

// ---------------------------------------------------------------------------
// Log levels
// ---------------------------------------------------------------------------

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum KlogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl KlogLevel {
    fn from_raw(raw: u8) -> Self {
        match raw {
            0 => KlogLevel::Error,
            1 => KlogLevel::Warn,
            2 => KlogLevel::Info,
            3 => KlogLevel::Debug,
            _ => KlogLevel::Trace,
        }
    }

    /// Parse a level name as used on the kernel command line.
    pub fn parse(value: &str) -> Option<Self> {
        const NAMES: [(&str, KlogLevel); 5] = [
            ("error", KlogLevel::Error),
            ("warn", KlogLevel::Warn),
            ("info", KlogLevel::Info),
            ("debug", KlogLevel::Debug),
            ("trace", KlogLevel::Trace),
        ];
        NAMES
            .iter()
            .find(|(name, _)| value.eq_ignore_ascii_case(name))
            .map(|&(_, level)| level)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KlogLevel::Error => "error",
            KlogLevel::Warn => "warn",
            KlogLevel::Info => "info",
            KlogLevel::Debug => "debug",
            KlogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for KlogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static CURRENT_LEVEL: AtomicU8 = AtomicU8::new(KlogLevel::Info as u8);
static DROPPED_LINES: AtomicUsize = AtomicUsize::new(0);

#[inline(always)]
fn is_enabled(level: KlogLevel) -> bool {
    level as u8 <= CURRENT_LEVEL.load(Ordering::Relaxed)
}

// ---------------------------------------------------------------------------
// Backend dispatch
// ---------------------------------------------------------------------------

/// Signature of a klog backend.
///
/// The backend must write the formatted text **and** a trailing newline.
pub type KlogBackend = fn(fmt::Arguments<'_>);

static BACKEND: RwLock<Option<KlogBackend>> = RwLock::new(None);

/// Dispatch a log line through the active backend.
#[inline]
fn dispatch(args: fmt::Arguments<'_>) {
    let backend = *BACKEND.read();
    match backend {
        Some(backend) => backend(args),
        None => {
            DROPPED_LINES.fetch_add(1, Ordering::Relaxed);
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Register the backend that receives every enabled log line.
///
/// A later registration replaces the earlier one.
pub fn klog_register_backend(backend: KlogBackend) {
    *BACKEND.write() = Some(backend);
}

/// Initialise klog (sets default level).  Called very early in boot.
pub fn klog_init() {
    CURRENT_LEVEL.store(KlogLevel::Info as u8, Ordering::Relaxed);
}

pub fn klog_set_level(level: KlogLevel) {
    CURRENT_LEVEL.store(level as u8, Ordering::Relaxed);
}

pub fn klog_get_level() -> KlogLevel {
    KlogLevel::from_raw(CURRENT_LEVEL.load(Ordering::Relaxed))
}

pub fn klog_is_enabled(level: KlogLevel) -> bool {
    is_enabled(level)
}

/// Number of enabled lines emitted before any backend was registered.
pub fn klog_dropped_lines() -> usize {
    DROPPED_LINES.load(Ordering::Relaxed)
}

/// Emit a formatted log line at the given level.
///
/// The backend appends a trailing newline — callers should **not** include
/// one in their format string.
pub fn log_args(level: KlogLevel, args: fmt::Arguments<'_>) {
    if !is_enabled(level) {
        return;
    }
    dispatch(args);
}

// ---------------------------------------------------------------------------
// Macros
// ---------------------------------------------------------------------------

#[macro_export]
macro_rules! klog {
    ($level:expr, $($arg:tt)*) => {{
        $crate::klog::log_args($level, ::core::format_args!($($arg)*));
    }};
}

#[macro_export]
macro_rules! klog_error {
    ($($arg:tt)*) => {
        $crate::klog::log_args($crate::klog::KlogLevel::Error, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! klog_warn {
    ($($arg:tt)*) => {
        $crate::klog::log_args($crate::klog::KlogLevel::Warn, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! klog_info {
    ($($arg:tt)*) => {
        $crate::klog::log_args($crate::klog::KlogLevel::Info, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! klog_debug {
    ($($arg:tt)*) => {
        $crate::klog::log_args($crate::klog::KlogLevel::Debug, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! klog_trace {
    ($($arg:tt)*) => {
        $crate::klog::log_args($crate::klog::KlogLevel::Trace, ::core::format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::String;
    use std::vec::Vec;

    static CAPTURED: spin::Mutex<Vec<String>> = spin::Mutex::new(Vec::new());

    fn capture_backend(args: fmt::Arguments<'_>) {
        CAPTURED.lock().push(std::format!("{}", args));
    }

    #[test]
    fn test_level_filter_and_backend() {
        klog_set_level(KlogLevel::Warn);
        let dropped_before = klog_dropped_lines();
        crate::klog_error!("before backend {}", 1);
        assert_eq!(klog_dropped_lines(), dropped_before + 1);

        klog_register_backend(capture_backend);
        crate::klog_warn!("layer {} unknown", 7);
        crate::klog_info!("filtered out");
        crate::klog_debug!("filtered out too");

        let lines = CAPTURED.lock().clone();
        assert_eq!(lines, std::vec![String::from("layer 7 unknown")]);

        klog_set_level(KlogLevel::Trace);
        assert!(klog_is_enabled(KlogLevel::Trace));
        assert_eq!(klog_get_level(), KlogLevel::Trace);
        klog_init();
        assert_eq!(klog_get_level(), KlogLevel::Info);
    }

    #[test]
    fn test_parse_level_names() {
        assert_eq!(KlogLevel::parse("DEBUG"), Some(KlogLevel::Debug));
        assert_eq!(KlogLevel::parse("warn"), Some(KlogLevel::Warn));
        assert_eq!(KlogLevel::parse("loud"), None);
    }
}
