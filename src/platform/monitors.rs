//! Monitor enumeration
//!
//! This module is responsible for:
//! - Enumerating all connected monitors
//! - Locating the primary monitor, the only placement target
//!
//! Coordinates are real pixels because the process declares per-monitor DPI
//! awareness at startup.

use crate::domain::core::Rect;
use crate::platform::ops::PlatformError;
use crate::platform::windows::win32_rect_to_rect;
use windows::Win32::Foundation::*;
use windows::Win32::Graphics::Gdi::*;

/// Matches MONITORINFOF_PRIMARY
const PRIMARY_FLAG: u32 = 1;

/// A connected display
#[derive(Debug, Clone)]
pub struct Monitor {
    /// Full monitor rectangle
    pub physical_rect: Rect,
    pub is_primary: bool,
}

/// Context for monitor enumeration callback
struct EnumContext {
    monitors: Vec<Monitor>,
}

/// Callback function for monitor enumeration
///
/// A monitor whose info cannot be read is skipped; enumeration continues.
unsafe extern "system" fn enum_monitor_proc(
    hmonitor: HMONITOR,
    _hdc: HDC,
    _rect: *mut RECT,
    lparam: LPARAM,
) -> BOOL {
    unsafe {
        let context = &mut *(lparam.0 as *mut EnumContext);

        let mut monitor_info = MONITORINFO {
            cbSize: std::mem::size_of::<MONITORINFO>() as u32,
            ..Default::default()
        };

        if GetMonitorInfoW(hmonitor, &mut monitor_info) == FALSE {
            return TRUE;
        }

        context.monitors.push(Monitor {
            physical_rect: win32_rect_to_rect(&monitor_info.rcMonitor),
            is_primary: (monitor_info.dwFlags & PRIMARY_FLAG) != 0,
        });

        TRUE
    }
}

/// Enumerates all monitors
pub fn enumerate_monitors() -> Result<Vec<Monitor>, PlatformError> {
    let mut context = EnumContext {
        monitors: Vec::new(),
    };

    unsafe {
        if EnumDisplayMonitors(
            None,
            None,
            Some(enum_monitor_proc),
            LPARAM(&mut context as *mut _ as isize),
        ) == FALSE
        {
            return Err(PlatformError::NoPrimaryMonitor);
        }
    }

    Ok(context.monitors)
}

/// The primary display
pub fn primary_monitor() -> Result<Monitor, PlatformError> {
    enumerate_monitors()?
        .into_iter()
        .find(|m| m.is_primary)
        .ok_or(PlatformError::NoPrimaryMonitor)
}
