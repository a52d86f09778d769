//! Polling loop tying the tracked process to the host's lifetime
//!
//! The loop is stepped by the host's timer, one `tick` per interval. It never
//! runs on its own thread and never overlaps with itself: a slow tick only
//! delays the next one.

use std::time::Duration;

use tracing::{debug, info};

use crate::app::discovery::find_by_title;
use crate::app::embedding::EmbeddingController;
use crate::platform::ops::{Desktop, ProcessId, ProcessOps, WindowHandle, WindowOps};

/// Fixed period between ticks
///
/// Bounds the latency of both "window found" and "process exited".
pub const POLL_INTERVAL: Duration = Duration::from_millis(3000);

/// The one process whose lifetime the host follows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedProcess {
    pid: ProcessId,
    /// The embedded window, when there is one
    window: Option<WindowHandle>,
    exited: bool,
}

impl TrackedProcess {
    pub fn new(pid: ProcessId, window: Option<WindowHandle>) -> Self {
        Self {
            pid,
            window,
            exited: false,
        }
    }

    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    pub fn window(&self) -> Option<WindowHandle> {
        self.window
    }

    /// Last observed state; only updated by `poll_exited`
    pub fn exited(&self) -> bool {
        self.exited
    }

    /// Queries the platform and caches the answer
    ///
    /// A destroyed tracked window counts as an exit. Once exited, the flag
    /// sticks and the platform is not asked again.
    pub fn poll_exited<P: ProcessOps + WindowOps + ?Sized>(&mut self, platform: &mut P) -> bool {
        if !self.exited {
            let window_gone = self.window.is_some_and(|window| !platform.is_window(window));
            self.exited = window_gone || platform.has_exited(self.pid);
        }
        self.exited
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorPhase {
    /// Discovery mode, nothing found yet
    AwaitingProcess,
    /// Watching the tracked process for exit
    Tracking,
    /// Terminal
    Exited,
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Discovery found nothing this time
    Waiting,
    /// Discovery matched a window; it has been embedded and is now tracked
    Found(ProcessId),
    /// The tracked process is still alive
    Running,
    /// The tracked process is gone; the host should close
    Exited,
}

#[derive(Debug, Clone)]
pub struct MonitorLoop {
    phase: MonitorPhase,
    /// Title substring used while awaiting a process
    title: Option<String>,
    tracked: Option<TrackedProcess>,
    ticks: u64,
}

impl MonitorLoop {
    /// Starts in discovery mode, looking for `title`
    pub fn awaiting(title: impl Into<String>) -> Self {
        Self {
            phase: MonitorPhase::AwaitingProcess,
            title: Some(title.into()),
            tracked: None,
            ticks: 0,
        }
    }

    /// Starts by watching an already known process
    pub fn tracking(process: TrackedProcess) -> Self {
        Self {
            phase: MonitorPhase::Tracking,
            title: None,
            tracked: Some(process),
            ticks: 0,
        }
    }

    pub fn phase(&self) -> MonitorPhase {
        self.phase
    }

    pub fn tracked(&self) -> Option<&TrackedProcess> {
        self.tracked.as_ref()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// True while a tracked process has not been seen exiting
    pub fn holds_live_process(&self) -> bool {
        self.phase == MonitorPhase::Tracking
            && self.tracked.as_ref().is_some_and(|process| !process.exited())
    }

    /// Runs one polling step
    pub fn tick<P: Desktop + ?Sized>(
        &mut self,
        platform: &mut P,
        embedder: &EmbeddingController,
    ) -> TickOutcome {
        self.ticks += 1;

        match self.phase {
            MonitorPhase::AwaitingProcess => {
                let Some(title) = self.title.as_deref() else {
                    return TickOutcome::Waiting;
                };

                let Some(found) = find_by_title(platform, title) else {
                    debug!(tick = self.ticks, title, "no matching window yet");
                    return TickOutcome::Waiting;
                };

                info!(
                    pid = found.pid.0,
                    title = %found.title,
                    "found matching window"
                );
                embedder.embed(platform, found.window);
                self.tracked = Some(TrackedProcess::new(found.pid, Some(found.window)));
                self.phase = MonitorPhase::Tracking;
                TickOutcome::Found(found.pid)
            }
            MonitorPhase::Tracking => {
                let exited = self
                    .tracked
                    .as_mut()
                    .is_none_or(|process| process.poll_exited(platform));

                if exited {
                    info!(tick = self.ticks, "tracked process exited");
                    self.phase = MonitorPhase::Exited;
                    TickOutcome::Exited
                } else {
                    TickOutcome::Running
                }
            }
            MonitorPhase::Exited => TickOutcome::Exited,
        }
    }

    /// Forces the terminal phase; the tracked process is kept for release
    pub fn stop(&mut self) {
        self.phase = MonitorPhase::Exited;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::domain::core::{Rect, Size};
    use crate::test_support::{MockDesktop, HOST};

    fn embedder() -> EmbeddingController {
        let settings = Settings {
            executable_path: "launcher.exe".into(),
            process_title: Some("Game".into()),
            fullscreen_width: None,
            fullscreen_height: None,
        };
        EmbeddingController::new(HOST, &settings)
    }

    #[test]
    fn awaiting_keeps_polling_without_match() {
        let mut desktop = MockDesktop::new(Size::new(1920, 1080));
        desktop.list_process(ProcessId(5), WindowHandle(50), "Game - Steam");
        let mut monitor = MonitorLoop::awaiting("Game");

        for _ in 0..5 {
            assert_eq!(monitor.tick(&mut desktop, &embedder()), TickOutcome::Waiting);
        }
        assert_eq!(monitor.phase(), MonitorPhase::AwaitingProcess);
        assert_eq!(monitor.ticks(), 5);
        assert!(!monitor.holds_live_process());
    }

    #[test]
    fn match_embeds_and_starts_tracking() {
        let mut desktop = MockDesktop::new(Size::new(1920, 1080));
        let window = desktop.add_window(Rect::new(0, 0, 1280, 720));
        desktop.list_process(ProcessId(7), window, "Game");
        let mut monitor = MonitorLoop::awaiting("Game");

        assert_eq!(
            monitor.tick(&mut desktop, &embedder()),
            TickOutcome::Found(ProcessId(7))
        );
        assert_eq!(monitor.phase(), MonitorPhase::Tracking);
        assert!(monitor.holds_live_process());
        assert_eq!(desktop.window(window).parent, Some(HOST));
        assert_eq!(desktop.window(window).rect, Rect::new(320, 180, 1280, 720));
    }

    #[test]
    fn style_failure_still_tracks_process() {
        let mut desktop = MockDesktop::new(Size::new(1920, 1080));
        let window = desktop.add_window(Rect::new(0, 0, 640, 480));
        desktop.list_process(ProcessId(7), window, "Game");
        desktop.fail_set_style = true;
        let mut monitor = MonitorLoop::awaiting("Game");

        assert_eq!(
            monitor.tick(&mut desktop, &embedder()),
            TickOutcome::Found(ProcessId(7))
        );
        assert_eq!(desktop.errors.len(), 1);
        assert_eq!(monitor.phase(), MonitorPhase::Tracking);
        assert_eq!(monitor.tick(&mut desktop, &embedder()), TickOutcome::Running);
    }

    #[test]
    fn tracking_reports_exit() {
        let mut desktop = MockDesktop::new(Size::new(1920, 1080));
        let mut monitor = MonitorLoop::tracking(TrackedProcess::new(ProcessId(9), None));

        assert_eq!(monitor.tick(&mut desktop, &embedder()), TickOutcome::Running);
        desktop.mark_exited(ProcessId(9));
        assert_eq!(monitor.tick(&mut desktop, &embedder()), TickOutcome::Exited);
        assert_eq!(monitor.phase(), MonitorPhase::Exited);
        assert_eq!(monitor.tick(&mut desktop, &embedder()), TickOutcome::Exited);
    }

    #[test]
    fn destroyed_window_counts_as_exit() {
        let mut desktop = MockDesktop::new(Size::new(1920, 1080));
        let window = desktop.add_window(Rect::new(0, 0, 640, 480));
        let mut monitor =
            MonitorLoop::tracking(TrackedProcess::new(ProcessId(9), Some(window)));

        assert_eq!(monitor.tick(&mut desktop, &embedder()), TickOutcome::Running);
        desktop.destroy_window(window);
        assert_eq!(monitor.tick(&mut desktop, &embedder()), TickOutcome::Exited);
    }

    #[test]
    fn exit_flag_sticks_once_observed() {
        let mut desktop = MockDesktop::new(Size::new(1920, 1080));
        let mut process = TrackedProcess::new(ProcessId(3), None);
        desktop.mark_exited(ProcessId(3));

        assert!(process.poll_exited(&mut desktop));
        desktop.exited.clear();
        assert!(process.poll_exited(&mut desktop));
        assert_eq!(desktop.call_count("has_exited"), 1);
    }

    #[test]
    fn exit_is_detected_within_one_interval() {
        let interval_ms = POLL_INTERVAL.as_millis() as u64;
        for exit_at_ms in [1, 2999, 3000, 3001, 7500, 11999] {
            let mut desktop = MockDesktop::new(Size::new(1920, 1080));
            let mut monitor = MonitorLoop::tracking(TrackedProcess::new(ProcessId(1), None));

            let mut now_ms = 0;
            let detected_at = loop {
                now_ms += interval_ms;
                if now_ms >= exit_at_ms {
                    desktop.mark_exited(ProcessId(1));
                }
                if monitor.tick(&mut desktop, &embedder()) == TickOutcome::Exited {
                    break now_ms;
                }
            };

            assert!(detected_at >= exit_at_ms);
            assert!(detected_at - exit_at_ms <= interval_ms, "exit at {exit_at_ms}");
        }
    }

    #[test]
    fn stop_is_terminal_but_keeps_process() {
        let mut desktop = MockDesktop::new(Size::new(1920, 1080));
        let mut monitor = MonitorLoop::tracking(TrackedProcess::new(ProcessId(4), None));

        monitor.stop();

        assert_eq!(monitor.phase(), MonitorPhase::Exited);
        assert!(!monitor.holds_live_process());
        assert_eq!(monitor.tracked().map(TrackedProcess::pid), Some(ProcessId(4)));
        assert_eq!(monitor.tick(&mut desktop, &embedder()), TickOutcome::Exited);
        assert!(!desktop.calls_contains("has_exited"));
    }
}
