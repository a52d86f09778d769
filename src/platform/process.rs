//! Process launch and discovery on Win32
//!
//! A process's "main window" is its first visible, unowned, titled top-level
//! window, which is what users see in the taskbar.

use std::collections::HashSet;
use std::os::windows::io::AsRawHandle;
use std::path::Path;
use std::process::{Child, Command};
use std::time::Duration;

use crate::platform::ops::{PlatformError, ProcessId, ProcessWindow};
use crate::platform::window::window_title;
use crate::platform::windows::from_hwnd;
use tracing::debug;
use windows::Win32::Foundation::*;
use windows::Win32::System::Threading::{
    GetExitCodeProcess, OpenProcess, PROCESS_QUERY_LIMITED_INFORMATION,
};
use windows::Win32::UI::WindowsAndMessaging::*;

/// Exit code reported while a process is still running
const STILL_ACTIVE: u32 = 259;

/// Starts `path` with `working_dir` as its current directory
pub fn spawn(path: &Path, working_dir: &Path) -> Result<Child, PlatformError> {
    Command::new(path)
        .current_dir(working_dir)
        .spawn()
        .map_err(|source| PlatformError::LaunchFailed {
            path: path.to_path_buf(),
            source,
        })
}

/// Blocks until the child is waiting for user input, or `timeout` elapses
///
/// Console programs return immediately; that is fine, they have no window
/// to wait for anyway.
pub fn wait_for_input_idle(child: &Child, timeout: Duration) {
    let handle = HANDLE(child.as_raw_handle() as isize);
    let millis = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
    let result = unsafe { WaitForInputIdle(handle, millis) };
    debug!(pid = child.id(), result, "input idle wait finished");
}

/// Owned query handle to a process this program did not start
pub struct ProcessHandle(HANDLE);

impl ProcessHandle {
    pub fn open(pid: ProcessId) -> Option<Self> {
        unsafe {
            OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, FALSE, pid.0)
                .ok()
                .map(Self)
        }
    }

    /// True once the process has terminated or its exit code is unreadable
    pub fn has_exited(&self) -> bool {
        let mut code = 0u32;
        unsafe {
            match GetExitCodeProcess(self.0, &mut code) {
                Ok(()) => code != STILL_ACTIVE,
                Err(_) => true,
            }
        }
    }
}

impl Drop for ProcessHandle {
    fn drop(&mut self) {
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

struct EnumContext {
    entries: Vec<ProcessWindow>,
    seen: HashSet<ProcessId>,
    /// This process; the host window must never be a candidate
    own_pid: ProcessId,
}

unsafe extern "system" fn enum_windows_proc(hwnd: HWND, lparam: LPARAM) -> BOOL {
    unsafe {
        let context = &mut *(lparam.0 as *mut EnumContext);

        if !IsWindowVisible(hwnd).as_bool() || GetWindow(hwnd, GW_OWNER).0 != 0 {
            return TRUE;
        }

        let mut process_id = 0u32;
        GetWindowThreadProcessId(hwnd, Some(&mut process_id as *mut u32));
        let pid = ProcessId(process_id);
        if process_id == 0 || pid == context.own_pid || context.seen.contains(&pid) {
            return TRUE;
        }

        if let Some(title) = window_title(hwnd) {
            context.seen.insert(pid);
            context.entries.push(ProcessWindow {
                pid,
                window: from_hwnd(hwnd),
                title,
            });
        }

        TRUE
    }
}

/// Main window of every other process that has one, in z-order
pub fn process_windows() -> Vec<ProcessWindow> {
    let mut context = EnumContext {
        entries: Vec::new(),
        seen: HashSet::new(),
        own_pid: ProcessId(std::process::id()),
    };

    unsafe {
        if let Err(err) = EnumWindows(
            Some(enum_windows_proc),
            LPARAM(&mut context as *mut _ as isize),
        ) {
            debug!(%err, "window enumeration stopped early");
        }
    }

    context.entries
}

/// Main window of a single process
pub fn main_window_of(pid: ProcessId) -> Option<ProcessWindow> {
    process_windows().into_iter().find(|entry| entry.pid == pid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_process_is_running() {
        let handle = ProcessHandle::open(ProcessId(std::process::id()))
            .expect("own process should be queryable");
        assert!(!handle.has_exited());
    }

    #[test]
    fn enumerated_windows_are_unique_per_process() {
        let entries = process_windows();
        let pids: HashSet<_> = entries.iter().map(|e| e.pid).collect();
        assert_eq!(pids.len(), entries.len());
    }

    #[test]
    fn own_process_is_never_listed() {
        let own = ProcessId(std::process::id());
        assert!(process_windows().iter().all(|entry| entry.pid != own));
        assert!(main_window_of(own).is_none());
    }
}
