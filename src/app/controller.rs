//! Host controller
//!
//! Owns the settings, the monitor loop (and through it the tracked process)
//! and reacts to the host window's lifecycle events. The window layer only
//! forwards events here and carries out the returned commands, which keeps
//! every decision testable without a real desktop.

use std::path::PathBuf;

use tracing::{debug, error, info, warn};

use crate::app::embedding::{EmbeddingController, STYLE_FAILURE_CAPTION, STYLE_FAILURE_MESSAGE};
use crate::app::monitor::{MonitorLoop, TickOutcome, TrackedProcess, POLL_INTERVAL};
use crate::app::state::{CloseDecision, HostCommand, HostState};
use crate::config::Settings;
use crate::platform::ops::{Desktop, WindowHandle};

/// Dialog shown when the configured executable cannot be started
pub const LAUNCH_FAILURE_CAPTION: &str = "Launch failed";

pub struct HostController<P: Desktop> {
    platform: P,
    /// None when the settings file was missing or unreadable
    settings: Option<Settings>,
    /// Directory the host executable lives in
    base_dir: PathBuf,
    state: HostState,
    host: Option<WindowHandle>,
    embedder: Option<EmbeddingController>,
    monitor: Option<MonitorLoop>,
}

impl<P: Desktop> HostController<P> {
    pub fn new(platform: P, settings: Option<Settings>, base_dir: PathBuf) -> Self {
        Self {
            platform,
            settings,
            base_dir,
            state: HostState::Idle,
            host: None,
            embedder: None,
            monitor: None,
        }
    }

    pub fn state(&self) -> HostState {
        self.state
    }

    /// Host window handle, between `on_shown` and `on_closed`
    pub fn host(&self) -> Option<WindowHandle> {
        self.host
    }

    pub fn monitor(&self) -> Option<&MonitorLoop> {
        self.monitor.as_ref()
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Host window became visible: launch and start polling, or close
    pub fn on_shown(&mut self, host: WindowHandle) -> HostCommand {
        if self.state != HostState::Idle {
            debug!(state = ?self.state, "host already shown");
            return HostCommand::Continue;
        }

        self.host = Some(host);
        self.state = HostState::Launching;

        let Some(settings) = self.settings.clone() else {
            warn!("no settings available, closing host");
            return self.begin_closing();
        };

        let executable = settings.resolve_executable(&self.base_dir);
        if !executable.is_file() {
            warn!(path = %executable.display(), "executable not found, closing host");
            return self.begin_closing();
        }

        let pid = match self.platform.launch(&executable, &self.base_dir) {
            Ok(pid) => pid,
            Err(err) => {
                error!(%err, "could not launch executable");
                self.platform
                    .show_error(LAUNCH_FAILURE_CAPTION, &err.to_string());
                return self.begin_closing();
            }
        };

        let embedder = EmbeddingController::new(host, &settings);
        let monitor = match settings.title_filter() {
            Some(title) => {
                info!(pid = pid.0, title, "launched, waiting for a matching window");
                MonitorLoop::awaiting(title)
            }
            None => {
                self.state = HostState::Embedding;
                let window = self.platform.main_window(pid);
                match window {
                    Some(window) => {
                        embedder.embed(&mut self.platform, window);
                    }
                    None => {
                        warn!(pid = pid.0, "launched process has no main window, tracking exit only");
                        self.platform
                            .show_error(STYLE_FAILURE_CAPTION, STYLE_FAILURE_MESSAGE);
                    }
                }
                MonitorLoop::tracking(TrackedProcess::new(pid, window))
            }
        };

        self.embedder = Some(embedder);
        self.monitor = Some(monitor);
        self.state = HostState::Monitoring;
        HostCommand::StartPolling(POLL_INTERVAL)
    }

    /// One timer period elapsed
    pub fn on_tick(&mut self) -> HostCommand {
        if self.state != HostState::Monitoring {
            return HostCommand::Continue;
        }

        let (Some(monitor), Some(embedder)) = (self.monitor.as_mut(), self.embedder.as_ref()) else {
            return HostCommand::Continue;
        };

        match monitor.tick(&mut self.platform, embedder) {
            TickOutcome::Exited => {
                info!("tracked process is gone, closing host");
                self.state = HostState::Closing;
                HostCommand::Close
            }
            TickOutcome::Waiting | TickOutcome::Found(_) | TickOutcome::Running => {
                HostCommand::Continue
            }
        }
    }

    /// The user (or the system) asked the host window to close
    ///
    /// Vetoed while a tracked process is still running; it is the child's
    /// exit that closes the host.
    pub fn on_close_requested(&mut self) -> CloseDecision {
        if self.state.is_shutting_down() {
            return CloseDecision::Allow;
        }

        if self
            .monitor
            .as_ref()
            .is_some_and(MonitorLoop::holds_live_process)
        {
            info!("close vetoed, tracked process still running");
            return CloseDecision::Veto;
        }

        self.begin_closing();
        CloseDecision::Allow
    }

    /// The host window is gone: stop polling and let go of everything
    pub fn on_closed(&mut self) {
        if let Some(mut monitor) = self.monitor.take() {
            monitor.stop();
            if let Some(process) = monitor.tracked() {
                self.platform.release(process.pid());
            }
        }

        self.embedder = None;
        self.host = None;
        self.state = HostState::Closed;
        info!("host closed");
    }

    fn begin_closing(&mut self) -> HostCommand {
        if let Some(monitor) = self.monitor.as_mut() {
            monitor.stop();
        }
        self.state = HostState::Closing;
        HostCommand::Close
    }
}
