//! Host settings
//!
//! A small JSON record placed next to the host executable. It is read once
//! before the host window is shown and never written back.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::domain::core::Size;

/// File name looked up in the host executable's directory
pub const SETTINGS_FILE_NAME: &str = "borderless-host.json";

/// Older installs kept their settings under this name
pub const LEGACY_SETTINGS_FILE_NAME: &str = "fullscreenMakerSettings.json";

/// What to launch and how to fit it
///
/// The legacy PascalCase keys (`ExecutablePath`, `ProcessName`, ...) are
/// accepted alongside the camelCase ones.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Executable to start, relative to the host's own directory
    #[serde(alias = "ExecutablePath")]
    pub executable_path: String,

    /// When set, the window to embed is found by title instead of taken
    /// from the launched process
    #[serde(default, alias = "ProcessName", alias = "ProcessTitle")]
    pub process_title: Option<String>,

    #[serde(default, alias = "FullscreenWidth")]
    pub fullscreen_width: Option<u32>,

    #[serde(default, alias = "FullscreenHeight")]
    pub fullscreen_height: Option<u32>,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("{} could not be found", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Settings {
    /// Loads the settings file at `path`
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.is_file() {
            return Err(SettingsError::NotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `SETTINGS_FILE_NAME` from `dir`, or the legacy file when only
    /// that one exists
    pub fn load_from_dir(dir: &Path) -> Result<Self, SettingsError> {
        let path = dir.join(SETTINGS_FILE_NAME);
        let legacy = dir.join(LEGACY_SETTINGS_FILE_NAME);
        if !path.is_file() && legacy.is_file() {
            debug!(path = %legacy.display(), "using legacy settings file");
            return Self::load(&legacy);
        }
        Self::load(&path)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Absolute path of the executable to launch
    pub fn resolve_executable(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.executable_path)
    }

    /// Title substring to discover, ignoring blank values
    pub fn title_filter(&self) -> Option<&str> {
        self.process_title
            .as_deref()
            .filter(|title| !title.trim().is_empty())
    }

    /// Explicit target size; only when both dimensions are configured
    pub fn explicit_size(&self) -> Option<Size> {
        match (self.fullscreen_width, self.fullscreen_height) {
            (Some(w), Some(h)) => Some(Size::from_unsigned(w, h)),
            _ => None,
        }
    }
}
