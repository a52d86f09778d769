//! General Windows platform utilities
//!
//! Conversions between Win32 types and the crate's own handle and
//! geometry types.

use crate::domain::core::Rect;
use crate::platform::ops::WindowHandle;
use windows::Win32::Foundation::{HWND, RECT};

/// Converts a Windows RECT to domain rectangle
pub fn win32_rect_to_rect(rect: &RECT) -> Rect {
    Rect {
        x: rect.left,
        y: rect.top,
        w: rect.right - rect.left,
        h: rect.bottom - rect.top,
    }
}

pub fn to_hwnd(window: WindowHandle) -> HWND {
    HWND(window.0)
}

pub fn from_hwnd(hwnd: HWND) -> WindowHandle {
    WindowHandle(hwnd.0)
}

/// Null-terminated UTF-16 copy of `input` for wide-string APIs
pub fn to_wstring(input: &str) -> Vec<u16> {
    input.encode_utf16().chain(std::iter::once(0)).collect()
}
