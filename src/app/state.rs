//! Host lifecycle state
//!
//! The host moves strictly forward through these states; there is no way
//! back to `Idle` once the window has been shown.

use std::time::Duration;

/// Lifecycle of the host window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostState {
    /// Created, not yet shown
    #[default]
    Idle,
    /// Settings validated, process being started
    Launching,
    /// Fitting the launched process's own window
    Embedding,
    /// Polling for discovery or exit
    Monitoring,
    /// Close decided, waiting for the window to go away
    Closing,
    /// Window destroyed, resources released
    Closed,
}

impl HostState {
    pub fn is_shutting_down(self) -> bool {
        matches!(self, HostState::Closing | HostState::Closed)
    }
}

/// What the host window must do after handing an event to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    /// Arm the polling timer with this period
    StartPolling(Duration),
    /// Nothing changes; keep the timer as it is
    Continue,
    /// Close the host window
    Close,
}

/// Answer to a close request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    Allow,
    /// A tracked process is still running; the host stays open
    Veto,
}
