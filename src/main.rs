//! Borderless host executable
//!
//! Reads `borderless-host.json` from its own directory, launches the
//! configured program and keeps it borderless-fullscreen until it exits.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::PathBuf;
use std::process::ExitCode;

use borderless_host::logging::init_logging;
use tracing::error;

/// Directory holding the host executable, falling back to the working directory
fn host_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_default()
}

#[cfg(windows)]
fn run(dir: PathBuf) -> ExitCode {
    use borderless_host::app::HostController;
    use borderless_host::config::Settings;
    use borderless_host::crash_log;
    use borderless_host::platform::desktop::{show_error_dialog, Win32Desktop};
    use borderless_host::platform::host_window::HostWindow;
    use windows::Win32::UI::HiDpi::{
        SetProcessDpiAwarenessContext, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2,
    };

    // Must happen before any window exists so geometry is in physical pixels
    if let Err(err) = unsafe { SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2) } {
        error!(%err, "could not enable per-monitor DPI awareness");
    }

    crash_log::install(dir.clone(), show_error_dialog);

    let settings = match Settings::load_from_dir(&dir) {
        Ok(settings) => Some(settings),
        Err(err) => {
            error!(%err, "settings unavailable");
            show_error_dialog("Settings not found", &err.to_string());
            None
        }
    };

    let controller = HostController::new(Win32Desktop::new(), settings, dir);
    match HostWindow::run(controller) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "host window failed");
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(windows))]
fn run(_dir: PathBuf) -> ExitCode {
    error!("borderless-host only runs on Windows");
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    init_logging();
    run(host_dir())
}
