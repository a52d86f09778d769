//! Application orchestration layer
//!
//! Ties the settings, the embedding steps and the monitor loop to the host
//! window's lifecycle. Nothing in here touches Win32 directly; every OS call
//! goes through the capability traits in `platform::ops`.

pub mod controller;
pub mod discovery;
pub mod embedding;
pub mod monitor;
pub mod state;

pub use controller::HostController;
pub use state::{CloseDecision, HostCommand, HostState};
