//! In-memory desktop for unit tests
//!
//! Records every trait call by name so tests can assert on what the core
//! asked the desktop to do.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

use crate::domain::core::{Rect, Size};
use crate::domain::style::WindowStyleBits;
use crate::platform::ops::{
    Notifier, PlatformError, ProcessId, ProcessOps, ProcessWindow, WindowHandle, WindowOps,
};

/// Handle used for the host window in tests
pub const HOST: WindowHandle = WindowHandle(1);

/// WS_OVERLAPPEDWINDOW | WS_VISIBLE
pub const OVERLAPPED_STYLE: WindowStyleBits = WindowStyleBits(0x10CF_0000);

/// Pid handed out for the first launch; later launches count up from it
pub const FIRST_PID: ProcessId = ProcessId(1000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockWindow {
    pub style: WindowStyleBits,
    pub rect: Rect,
    pub parent: Option<WindowHandle>,
    pub alive: bool,
}

pub struct MockDesktop {
    screen: Size,
    windows: HashMap<WindowHandle, MockWindow>,
    next_handle: isize,
    listed: Vec<ProcessWindow>,
    main_windows: HashMap<ProcessId, WindowHandle>,
    calls: RefCell<Vec<&'static str>>,

    pub exited: HashSet<ProcessId>,
    pub launched: Vec<(PathBuf, PathBuf)>,
    pub released: Vec<ProcessId>,
    pub errors: Vec<(String, String)>,

    pub fail_launch: bool,
    pub fail_set_style: bool,
    pub fail_reparent: bool,
}

impl MockDesktop {
    pub fn new(screen: Size) -> Self {
        Self {
            screen,
            windows: HashMap::new(),
            next_handle: 0x100,
            listed: Vec::new(),
            main_windows: HashMap::new(),
            calls: RefCell::new(Vec::new()),
            exited: HashSet::new(),
            launched: Vec::new(),
            released: Vec::new(),
            errors: Vec::new(),
            fail_launch: false,
            fail_set_style: false,
            fail_reparent: false,
        }
    }

    /// Creates a decorated top-level window at `rect`
    pub fn add_window(&mut self, rect: Rect) -> WindowHandle {
        let handle = WindowHandle(self.next_handle);
        self.next_handle += 1;
        self.windows.insert(
            handle,
            MockWindow {
                style: OVERLAPPED_STYLE,
                rect,
                parent: None,
                alive: true,
            },
        );
        handle
    }

    pub fn window(&self, handle: WindowHandle) -> &MockWindow {
        &self.windows[&handle]
    }

    pub fn destroy_window(&mut self, handle: WindowHandle) {
        if let Some(window) = self.windows.get_mut(&handle) {
            window.alive = false;
        }
    }

    /// Makes `pid` show up in `process_windows` with this window and title
    pub fn list_process(&mut self, pid: ProcessId, window: WindowHandle, title: &str) {
        self.listed.push(ProcessWindow {
            pid,
            window,
            title: title.to_string(),
        });
    }

    pub fn set_main_window(&mut self, pid: ProcessId, window: WindowHandle) {
        self.main_windows.insert(pid, window);
    }

    pub fn mark_exited(&mut self, pid: ProcessId) {
        self.exited.insert(pid);
    }

    pub fn calls_contains(&self, name: &str) -> bool {
        self.calls.borrow().iter().any(|call| *call == name)
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls.borrow().iter().filter(|call| **call == name).count()
    }

    fn record(&self, name: &'static str) {
        self.calls.borrow_mut().push(name);
    }

    fn live(&self, handle: WindowHandle) -> Option<&MockWindow> {
        self.windows.get(&handle).filter(|window| window.alive)
    }

    fn live_mut(&mut self, handle: WindowHandle) -> Option<&mut MockWindow> {
        self.windows.get_mut(&handle).filter(|window| window.alive)
    }
}

impl WindowOps for MockDesktop {
    fn get_style(&self, window: WindowHandle) -> Result<WindowStyleBits, PlatformError> {
        self.record("get_style");
        self.live(window)
            .map(|state| state.style)
            .ok_or(PlatformError::StyleReadFailed(window))
    }

    fn set_style(&mut self, window: WindowHandle, style: WindowStyleBits) -> Result<(), PlatformError> {
        self.record("set_style");
        if self.fail_set_style {
            return Err(PlatformError::StyleWriteFailed(window));
        }
        let state = self
            .live_mut(window)
            .ok_or(PlatformError::StyleWriteFailed(window))?;
        state.style = style;
        Ok(())
    }

    fn set_position_and_size(&mut self, window: WindowHandle, rect: Rect) -> Result<(), PlatformError> {
        self.record("set_position_and_size");
        let state = self
            .live_mut(window)
            .ok_or(PlatformError::PositionFailed(window))?;
        state.rect = rect;
        Ok(())
    }

    fn reparent(&mut self, child: WindowHandle, parent: WindowHandle) -> Result<(), PlatformError> {
        self.record("reparent");
        let failure = PlatformError::ReparentFailed { child, parent };
        if self.fail_reparent {
            return Err(failure);
        }
        let state = self.live_mut(child).ok_or(failure)?;
        state.parent = Some(parent);
        Ok(())
    }

    fn get_bounds(&self, window: WindowHandle) -> Result<Rect, PlatformError> {
        self.record("get_bounds");
        self.live(window)
            .map(|state| state.rect)
            .ok_or(PlatformError::BoundsFailed(window))
    }

    fn is_window(&self, window: WindowHandle) -> bool {
        self.record("is_window");
        self.live(window).is_some()
    }

    fn primary_screen_size(&self) -> Result<Size, PlatformError> {
        self.record("primary_screen_size");
        Ok(self.screen)
    }
}

impl ProcessOps for MockDesktop {
    fn launch(&mut self, path: &Path, working_dir: &Path) -> Result<ProcessId, PlatformError> {
        self.record("launch");
        if self.fail_launch {
            return Err(PlatformError::LaunchFailed {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "access denied"),
            });
        }
        let pid = ProcessId(FIRST_PID.0 + self.launched.len() as u32);
        self.launched
            .push((path.to_path_buf(), working_dir.to_path_buf()));
        Ok(pid)
    }

    fn main_window(&mut self, pid: ProcessId) -> Option<WindowHandle> {
        self.record("main_window");
        self.main_windows.get(&pid).copied()
    }

    fn has_exited(&mut self, pid: ProcessId) -> bool {
        self.record("has_exited");
        self.exited.contains(&pid)
    }

    fn process_windows(&self) -> Vec<ProcessWindow> {
        self.record("process_windows");
        self.listed
            .iter()
            .filter(|entry| !self.exited.contains(&entry.pid))
            .cloned()
            .collect()
    }

    fn release(&mut self, pid: ProcessId) {
        self.record("release");
        self.released.push(pid);
    }
}

impl Notifier for MockDesktop {
    fn show_error(&mut self, caption: &str, message: &str) {
        self.record("show_error");
        self.errors.push((caption.to_string(), message.to_string()));
    }
}
