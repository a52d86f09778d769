//! The borderless host window
//!
//! A frameless popup covering the primary monitor with a black background.
//! It owns the message loop for the whole process: lifecycle events are
//! forwarded to the `HostController` and the returned commands are carried
//! out here (timer arming, closing).
//!
//! The poll timer is killed while a tick runs and re-armed afterwards, so a
//! tick that pumps messages (an error dialog) never overlaps with the next.

#![allow(unsafe_op_in_unsafe_fn)]

use std::cell::{Cell, RefCell};
use std::time::Duration;

use tracing::{debug, error, warn};
use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{GetLastError, HINSTANCE, HWND, LPARAM, LRESULT, WIN32_ERROR, WPARAM};
use windows::Win32::Graphics::Gdi::{GetStockObject, BLACK_BRUSH, HBRUSH};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::*;

use crate::app::{CloseDecision, HostCommand, HostController};
use crate::domain::core::Rect;
use crate::platform::desktop::Win32Desktop;
use crate::platform::monitors::primary_monitor;
use crate::platform::ops::PlatformError;
use crate::platform::windows::from_hwnd;

const CLASS_NAME: PCWSTR = w!("BorderlessHostWindow");
const POLL_TIMER_ID: usize = 1;
/// Posted once right after the window is first shown
const WM_HOST_SHOWN: u32 = WM_APP + 1;
// Matches the Win32 ERROR_CLASS_ALREADY_EXISTS (1410) code.
const CLASS_ALREADY_EXISTS_ERR: WIN32_ERROR = WIN32_ERROR(1410);

#[derive(Debug, thiserror::Error)]
pub enum HostWindowError {
    #[error("Failed to register host window class")]
    ClassRegistrationFailed,

    #[error("Failed to create host window")]
    WindowCreationFailed,

    #[error("Windows API error: {0}")]
    Win32Error(String),

    #[error(transparent)]
    Platform(#[from] PlatformError),
}

struct HostWindowState {
    controller: RefCell<HostController<Win32Desktop>>,
    /// Period of the poll timer once polling has started
    poll_interval: Cell<Option<Duration>>,
}

/// Entry point for the host window
pub struct HostWindow;

impl HostWindow {
    /// Creates the window, runs the message loop until it is destroyed
    pub fn run(controller: HostController<Win32Desktop>) -> Result<(), HostWindowError> {
        let screen = primary_monitor()?.physical_rect;

        let state = HostWindowState {
            controller: RefCell::new(controller),
            poll_interval: Cell::new(None),
        };
        let state_ptr = Box::into_raw(Box::new(state));

        let result = unsafe { create_host_window(state_ptr, screen) }.map(|hwnd| unsafe {
            let _ = ShowWindow(hwnd, SW_SHOW);
            if let Err(err) = PostMessageW(hwnd, WM_HOST_SHOWN, WPARAM(0), LPARAM(0)) {
                error!(%err, "could not post shown notification");
            }
            run_message_loop();
        });

        // The window procedure no longer references the state past WM_NCDESTROY
        drop(unsafe { Box::from_raw(state_ptr) });
        result
    }
}

unsafe fn create_host_window(
    state_ptr: *mut HostWindowState,
    screen: Rect,
) -> Result<HWND, HostWindowError> {
    let module = GetModuleHandleW(PCWSTR::null())
        .map_err(|e| HostWindowError::Win32Error(format!("{:?}", e)))?;
    let instance: HINSTANCE = module.into();

    register_host_class(instance)?;

    let hwnd = CreateWindowExW(
        WS_EX_APPWINDOW,
        CLASS_NAME,
        w!("Borderless Host"),
        WS_POPUP | WS_CLIPCHILDREN,
        screen.x,
        screen.y,
        screen.w,
        screen.h,
        None,
        None,
        instance,
        Some(state_ptr as *const _ as *mut _),
    );

    if hwnd.0 == 0 {
        return Err(HostWindowError::WindowCreationFailed);
    }

    debug!(?screen, "created host window");
    Ok(hwnd)
}

unsafe fn register_host_class(instance: HINSTANCE) -> Result<(), HostWindowError> {
    let wnd_class = WNDCLASSW {
        style: CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: Some(host_wnd_proc),
        hInstance: instance,
        lpszClassName: CLASS_NAME,
        hbrBackground: HBRUSH(GetStockObject(BLACK_BRUSH).0),
        hCursor: LoadCursorW(None, IDC_ARROW).unwrap_or_default(),
        ..Default::default()
    };

    if RegisterClassW(&wnd_class) == 0 {
        match GetLastError() {
            Err(err) if err.code() == CLASS_ALREADY_EXISTS_ERR.to_hresult() => {}
            _ => return Err(HostWindowError::ClassRegistrationFailed),
        }
    }

    Ok(())
}

fn run_message_loop() {
    let mut msg = MSG::default();
    loop {
        let result = unsafe { GetMessageW(&mut msg, None, 0, 0) };
        if result.0 == 0 || result.0 == -1 {
            break;
        }
        unsafe {
            TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

unsafe fn host_state<'a>(hwnd: HWND) -> Option<&'a HostWindowState> {
    let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *const HostWindowState;
    if ptr.is_null() { None } else { Some(&*ptr) }
}

unsafe extern "system" fn host_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_CREATE => {
            let createstruct = &*(lparam.0 as *const CREATESTRUCTW);
            SetWindowLongPtrW(hwnd, GWLP_USERDATA, createstruct.lpCreateParams as isize);
            LRESULT(0)
        }
        WM_HOST_SHOWN => {
            if let Some(state) = host_state(hwnd) {
                let command = match state.controller.try_borrow_mut() {
                    Ok(mut controller) => controller.on_shown(from_hwnd(hwnd)),
                    Err(_) => HostCommand::Continue,
                };
                apply_command(hwnd, state, command);
            }
            LRESULT(0)
        }
        WM_TIMER if wparam.0 == POLL_TIMER_ID => {
            if let Some(state) = host_state(hwnd) {
                let _ = KillTimer(hwnd, POLL_TIMER_ID);
                let command = match state.controller.try_borrow_mut() {
                    Ok(mut controller) => controller.on_tick(),
                    Err(_) => {
                        debug!("tick skipped, controller busy");
                        HostCommand::Continue
                    }
                };
                apply_command(hwnd, state, command);
            }
            LRESULT(0)
        }
        WM_CLOSE => {
            let decision = match host_state(hwnd).map(|state| state.controller.try_borrow_mut()) {
                Some(Ok(mut controller)) => controller.on_close_requested(),
                // Busy inside a tick or a dialog; the next tick decides
                Some(Err(_)) => CloseDecision::Veto,
                None => CloseDecision::Allow,
            };
            if decision == CloseDecision::Allow {
                let _ = DestroyWindow(hwnd);
            }
            LRESULT(0)
        }
        WM_DESTROY => {
            let _ = KillTimer(hwnd, POLL_TIMER_ID);
            if let Some(state) = host_state(hwnd) {
                state.poll_interval.set(None);
                match state.controller.try_borrow_mut() {
                    Ok(mut controller) => controller.on_closed(),
                    Err(_) => warn!("host destroyed while controller busy"),
                }
            }
            PostQuitMessage(0);
            LRESULT(0)
        }
        WM_NCDESTROY => {
            SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0);
            DefWindowProcW(hwnd, msg, wparam, lparam)
        }
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

/// Carries out a controller command; the controller must not be borrowed
unsafe fn apply_command(hwnd: HWND, state: &HostWindowState, command: HostCommand) {
    match command {
        HostCommand::StartPolling(interval) => {
            state.poll_interval.set(Some(interval));
            arm_poll_timer(hwnd, interval);
        }
        HostCommand::Continue => {
            if let Some(interval) = state.poll_interval.get() {
                arm_poll_timer(hwnd, interval);
            }
        }
        HostCommand::Close => {
            state.poll_interval.set(None);
            if let Err(err) = PostMessageW(hwnd, WM_CLOSE, WPARAM(0), LPARAM(0)) {
                error!(%err, "could not post close request");
            }
        }
    }
}

unsafe fn arm_poll_timer(hwnd: HWND, interval: Duration) {
    let millis = u32::try_from(interval.as_millis()).unwrap_or(u32::MAX);
    if SetTimer(hwnd, POLL_TIMER_ID, millis, None) == 0 {
        error!("could not arm the poll timer");
    }
}
