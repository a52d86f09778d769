//! Borderless host: runs another program's window borderless inside a
//! fullscreen host window and stays open exactly as long as that program.
//!
//! The core (`app`, `config`, `domain`) is platform independent and talks to
//! the desktop through the traits in `platform::ops`. The Win32 backend lives
//! in the rest of `platform` and only builds on Windows.

pub mod app;
pub mod config;
pub mod crash_log;
pub mod domain;
pub mod logging;
pub mod platform;

#[cfg(test)]
mod test_support;
