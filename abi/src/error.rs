use core::fmt;

/// Failures surfaced by constructors in the video stack.
///
/// Drawing never fails: out-of-range coordinates are clipped. Only creating
/// a surface (window, back buffer, physical framebuffer binding) can report
/// an error, once, to the caller deciding whether to continue booting.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VideoError {
    /// No output surface has been bound yet.
    NoFramebuffer,
    /// Zero or oversized dimensions, or a stride too small for the width.
    InvalidGeometry,
    /// Pixel layout the surface cannot produce.
    UnsupportedFormat,
    /// Backing storage could not be reserved.
    OutOfMemory,
}

impl VideoError {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoFramebuffer => "no framebuffer",
            Self::InvalidGeometry => "invalid geometry",
            Self::UnsupportedFormat => "unsupported pixel format",
            Self::OutOfMemory => "out of memory",
        }
    }
}

impl fmt::Display for VideoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type VideoResult<T = ()> = Result<T, VideoError>;
