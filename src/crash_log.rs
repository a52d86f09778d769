//! Crash reporting
//!
//! On a panic the host writes a timestamped report next to its executable and
//! tells the user something went wrong. Panics are not caught; the process
//! still unwinds afterwards.

use std::backtrace::Backtrace;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use thiserror::Error;
use tracing::error;

pub const CRASH_DIALOG_CAPTION: &str = "Exception thrown";
pub const CRASH_DIALOG_MESSAGE: &str = "An exception was thrown";

const FILE_NAME_FORMAT: &str = "crashlog_%d-%m-%Y_%H-%M-%S.txt";

#[derive(Debug, Error)]
pub enum CrashLogError {
    #[error("Failed to write crash log {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// `crashlog_dd-MM-yyyy_HH-mm-ss.txt` for the given local time
pub fn crash_log_file_name(at: NaiveDateTime) -> String {
    at.format(FILE_NAME_FORMAT).to_string()
}

/// Report body: message, location, then the captured backtrace
pub fn crash_report(message: &str, location: Option<&str>, backtrace: &str) -> String {
    let mut report = String::from(message);
    if let Some(location) = location {
        report.push_str("\n   at ");
        report.push_str(location);
    }
    if !backtrace.is_empty() {
        report.push_str("\n\n");
        report.push_str(backtrace);
    }
    report
}

/// Writes `report` into `dir`, replacing any file of the same name
pub fn write_crash_log(dir: &Path, at: NaiveDateTime, report: &str) -> Result<PathBuf, CrashLogError> {
    let path = dir.join(crash_log_file_name(at));
    fs::write(&path, report).map_err(|source| CrashLogError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Installs a panic hook that logs, writes the crash file and then calls `notify`
pub fn install(dir: PathBuf, notify: fn(&str, &str)) {
    std::panic::set_hook(Box::new(move |info| {
        let payload = info.payload();
        let message = payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
            .unwrap_or("panic with non-string payload");
        let location = info.location().map(ToString::to_string);
        let backtrace = Backtrace::force_capture().to_string();

        error!(message, location = location.as_deref(), "host panicked");

        let report = crash_report(message, location.as_deref(), &backtrace);
        if let Err(err) = write_crash_log(&dir, Local::now().naive_local(), &report) {
            error!(%err, "could not write crash log");
        }

        notify(CRASH_DIALOG_CAPTION, CRASH_DIALOG_MESSAGE);
    }));
}
