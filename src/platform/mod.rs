//! Desktop access
//!
//! `ops` holds the capability traits the core is written against. Everything
//! else is the Win32 backend and only builds on Windows.

pub mod ops;

#[cfg(windows)]
pub mod desktop;
#[cfg(windows)]
pub mod host_window;
#[cfg(windows)]
pub mod monitors;
#[cfg(windows)]
pub mod process;
#[cfg(windows)]
pub mod window;
#[cfg(windows)]
pub mod windows;
