//! Win32 implementation of the desktop capability traits

use std::collections::HashMap;
use std::path::Path;
use std::process::Child;
use std::time::Duration;

use crate::domain::core::{Rect, Size};
use crate::domain::style::WindowStyleBits;
use crate::platform::monitors::primary_monitor;
use crate::platform::ops::{
    Notifier, PlatformError, ProcessId, ProcessOps, ProcessWindow, WindowHandle, WindowOps,
};
use crate::platform::process::{self, ProcessHandle};
use crate::platform::window;
use crate::platform::windows::{to_hwnd, to_wstring};
use tracing::{debug, info};
use windows::core::PCWSTR;
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::{MessageBoxW, MB_ICONERROR, MB_OK};

/// Upper bound on how long a freshly launched process may take to show a window
pub const LAUNCH_IDLE_TIMEOUT: Duration = Duration::from_secs(10);

/// The real desktop
#[derive(Default)]
pub struct Win32Desktop {
    /// Processes started by this host
    launched: HashMap<ProcessId, Child>,
    /// Query handles for discovered processes, opened lazily
    opened: HashMap<ProcessId, ProcessHandle>,
}

impl Win32Desktop {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WindowOps for Win32Desktop {
    fn get_style(&self, window: WindowHandle) -> Result<WindowStyleBits, PlatformError> {
        window::get_window_style(to_hwnd(window))
    }

    fn set_style(&mut self, window: WindowHandle, style: WindowStyleBits) -> Result<(), PlatformError> {
        window::set_window_style(to_hwnd(window), style)
    }

    fn set_position_and_size(&mut self, window: WindowHandle, rect: Rect) -> Result<(), PlatformError> {
        window::position_window(to_hwnd(window), rect)
    }

    fn reparent(&mut self, child: WindowHandle, parent: WindowHandle) -> Result<(), PlatformError> {
        window::reparent_window(to_hwnd(child), to_hwnd(parent))
    }

    fn get_bounds(&self, window: WindowHandle) -> Result<Rect, PlatformError> {
        window::get_window_rect(to_hwnd(window))
    }

    fn is_window(&self, window: WindowHandle) -> bool {
        window::is_window(to_hwnd(window))
    }

    fn primary_screen_size(&self) -> Result<Size, PlatformError> {
        Ok(primary_monitor()?.physical_rect.size())
    }
}

impl ProcessOps for Win32Desktop {
    fn launch(&mut self, path: &Path, working_dir: &Path) -> Result<ProcessId, PlatformError> {
        let child = process::spawn(path, working_dir)?;
        let pid = ProcessId(child.id());
        info!(pid = pid.0, path = %path.display(), "launched process");
        self.launched.insert(pid, child);
        Ok(pid)
    }

    fn main_window(&mut self, pid: ProcessId) -> Option<WindowHandle> {
        if let Some(child) = self.launched.get(&pid) {
            process::wait_for_input_idle(child, LAUNCH_IDLE_TIMEOUT);
        }
        process::main_window_of(pid).map(|entry| entry.window)
    }

    fn has_exited(&mut self, pid: ProcessId) -> bool {
        if let Some(child) = self.launched.get_mut(&pid) {
            return !matches!(child.try_wait(), Ok(None));
        }

        if !self.opened.contains_key(&pid) {
            match ProcessHandle::open(pid) {
                Some(handle) => {
                    self.opened.insert(pid, handle);
                }
                None => {
                    debug!(pid = pid.0, "process can no longer be opened");
                    return true;
                }
            }
        }

        self.opened.get(&pid).is_none_or(ProcessHandle::has_exited)
    }

    fn process_windows(&self) -> Vec<ProcessWindow> {
        process::process_windows()
    }

    fn release(&mut self, pid: ProcessId) {
        // Dropping a Child neither kills nor waits for the process
        self.launched.remove(&pid);
        self.opened.remove(&pid);
    }
}

impl Notifier for Win32Desktop {
    fn show_error(&mut self, caption: &str, message: &str) {
        show_error_dialog(caption, message);
    }
}

/// Modal error box with no owner window
pub fn show_error_dialog(caption: &str, message: &str) {
    let text = to_wstring(message);
    let caption = to_wstring(caption);
    unsafe {
        MessageBoxW(
            HWND(0),
            PCWSTR(text.as_ptr()),
            PCWSTR(caption.as_ptr()),
            MB_OK | MB_ICONERROR,
        );
    }
}
