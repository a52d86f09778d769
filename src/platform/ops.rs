//! OS capability interface
//!
//! The core only talks to the desktop through these traits. The Win32
//! backend implements them for real windows; tests use a recording mock.

use std::path::{Path, PathBuf};

use crate::domain::core::{Rect, Size};
use crate::domain::style::WindowStyleBits;

/// Native top-level window handle, stored as its raw integer value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub isize);

/// Operating system process identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcessId(pub u32);

/// A running process together with its main window and that window's title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessWindow {
    pub pid: ProcessId,
    pub window: WindowHandle,
    pub title: String,
}

/// Errors reported by the desktop backend
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("Invalid window handle {0:?}")]
    InvalidHandle(WindowHandle),

    #[error("Failed to read the style of window {0:?}")]
    StyleReadFailed(WindowHandle),

    #[error("Failed to write the style of window {0:?}")]
    StyleWriteFailed(WindowHandle),

    #[error("Failed to get bounds of window {0:?}")]
    BoundsFailed(WindowHandle),

    #[error("Failed to position window {0:?}")]
    PositionFailed(WindowHandle),

    #[error("Failed to reparent window {child:?} under {parent:?}")]
    ReparentFailed {
        child: WindowHandle,
        parent: WindowHandle,
    },

    #[error("No primary monitor found")]
    NoPrimaryMonitor,

    #[error("Failed to launch {path}: {source}")]
    LaunchFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Foreign window manipulation
pub trait WindowOps {
    /// Reads the current style bit field
    fn get_style(&self, window: WindowHandle) -> Result<WindowStyleBits, PlatformError>;

    /// Writes a new style bit field
    fn set_style(&mut self, window: WindowHandle, style: WindowStyleBits) -> Result<(), PlatformError>;

    /// Moves and resizes the window without touching its z-order
    fn set_position_and_size(&mut self, window: WindowHandle, rect: Rect) -> Result<(), PlatformError>;

    /// Makes `child` render inside `parent`
    fn reparent(&mut self, child: WindowHandle, parent: WindowHandle) -> Result<(), PlatformError>;

    /// Current window rectangle in screen coordinates
    fn get_bounds(&self, window: WindowHandle) -> Result<Rect, PlatformError>;

    /// False once the window has been destroyed
    fn is_window(&self, window: WindowHandle) -> bool;

    /// Size of the primary display
    fn primary_screen_size(&self) -> Result<Size, PlatformError>;
}

/// Process launch, lookup and liveness queries
pub trait ProcessOps {
    /// Starts `path` with `working_dir` as its current directory
    fn launch(&mut self, path: &Path, working_dir: &Path) -> Result<ProcessId, PlatformError>;

    /// Main window of a process, if it has one yet
    fn main_window(&mut self, pid: ProcessId) -> Option<WindowHandle>;

    /// True once the process has terminated or can no longer be queried
    fn has_exited(&mut self, pid: ProcessId) -> bool;

    /// Every running process that currently owns a titled main window
    ///
    /// The order is whatever the OS enumerates; callers must not rely on it.
    fn process_windows(&self) -> Vec<ProcessWindow>;

    /// Drops any handle held for `pid`
    fn release(&mut self, pid: ProcessId);
}

/// User-visible, fire-and-forget error surface
pub trait Notifier {
    fn show_error(&mut self, caption: &str, message: &str);
}

/// Everything the host controller needs from the desktop
pub trait Desktop: WindowOps + ProcessOps + Notifier {}

impl<T: WindowOps + ProcessOps + Notifier> Desktop for T {}
