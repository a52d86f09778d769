//! Foreign window manipulation
//!
//! This module handles:
//! - Reading and writing a window's style bits
//! - Moving and resizing windows to specific rectangles
//! - Reparenting a window under the host
//!
//! The windows touched here belong to another process. Every call validates
//! the handle first because the owner may destroy it at any moment.

use crate::domain::core::Rect;
use crate::domain::style::WindowStyleBits;
use crate::platform::ops::{PlatformError, WindowHandle};
use crate::platform::windows::win32_rect_to_rect;
use windows::Win32::Foundation::*;
use windows::Win32::UI::WindowsAndMessaging::*;

/// Returns false for null or destroyed windows
pub fn is_window(hwnd: HWND) -> bool {
    hwnd.0 != 0 && unsafe { IsWindow(hwnd).as_bool() }
}

fn ensure_window(hwnd: HWND) -> Result<(), PlatformError> {
    if is_window(hwnd) {
        Ok(())
    } else {
        Err(PlatformError::InvalidHandle(WindowHandle(hwnd.0)))
    }
}

/// Reads `GWL_STYLE`
///
/// A zero result is ambiguous (a style of zero is legal), so the last error
/// is cleared beforehand and checked afterwards.
pub fn get_window_style(hwnd: HWND) -> Result<WindowStyleBits, PlatformError> {
    ensure_window(hwnd)?;

    unsafe {
        SetLastError(WIN32_ERROR(0));
        let style = GetWindowLongW(hwnd, GWL_STYLE);
        if style == 0 && GetLastError().is_err() {
            return Err(PlatformError::StyleReadFailed(WindowHandle(hwnd.0)));
        }

        Ok(WindowStyleBits(style as u32))
    }
}

/// Writes `GWL_STYLE`
///
/// `SetWindowLongW` returns the previous value, which may itself be zero;
/// failure is only reported when the last error is also set.
pub fn set_window_style(hwnd: HWND, style: WindowStyleBits) -> Result<(), PlatformError> {
    ensure_window(hwnd)?;

    unsafe {
        SetLastError(WIN32_ERROR(0));
        let previous = SetWindowLongW(hwnd, GWL_STYLE, style.0 as i32);
        if previous == 0 && GetLastError().is_err() {
            return Err(PlatformError::StyleWriteFailed(WindowHandle(hwnd.0)));
        }
    }

    Ok(())
}

/// Current window rectangle in screen coordinates
pub fn get_window_rect(hwnd: HWND) -> Result<Rect, PlatformError> {
    ensure_window(hwnd)?;

    let mut window_rect = RECT::default();
    unsafe {
        if GetWindowRect(hwnd, &mut window_rect).is_err() {
            return Err(PlatformError::BoundsFailed(WindowHandle(hwnd.0)));
        }
    }

    Ok(win32_rect_to_rect(&window_rect))
}

/// Moves and resizes a window to the specified rectangle
///
/// - Preserves the window's Z-order
/// - Applies any pending style change (`SWP_FRAMECHANGED`)
/// - Shows the window if it was hidden
pub fn position_window(hwnd: HWND, target_rect: Rect) -> Result<(), PlatformError> {
    ensure_window(hwnd)?;

    unsafe {
        let result = SetWindowPos(
            hwnd,
            HWND(0), // Ignored due to SWP_NOZORDER flag
            target_rect.x,
            target_rect.y,
            target_rect.w,
            target_rect.h,
            SWP_NOZORDER | SWP_FRAMECHANGED | SWP_SHOWWINDOW,
        );

        if result.is_err() {
            return Err(PlatformError::PositionFailed(WindowHandle(hwnd.0)));
        }
    }

    Ok(())
}

/// Makes `child` a child of `parent`
pub fn reparent_window(child: HWND, parent: HWND) -> Result<(), PlatformError> {
    ensure_window(child)?;
    ensure_window(parent)?;

    unsafe {
        SetLastError(WIN32_ERROR(0));
        let previous = SetParent(child, parent);
        // The previous parent of a top-level window is null, so only the
        // last error distinguishes failure.
        if previous.0 == 0 && GetLastError().is_err() {
            return Err(PlatformError::ReparentFailed {
                child: WindowHandle(child.0),
                parent: WindowHandle(parent.0),
            });
        }
    }

    Ok(())
}

/// Title of a window, or None when it has none
pub fn window_title(hwnd: HWND) -> Option<String> {
    let mut title_buffer = [0u16; 512];
    let title_length = unsafe { GetWindowTextW(hwnd, &mut title_buffer) };
    if title_length > 0 {
        Some(String::from_utf16_lossy(&title_buffer[..title_length as usize]))
    } else {
        None
    }
}
