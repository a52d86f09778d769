//! Configuration module for borderless-host
//!
//! The settings record is materialized once at startup; the rest of the
//! application only ever reads it.

pub mod settings;

pub use settings::{Settings, SettingsError, LEGACY_SETTINGS_FILE_NAME, SETTINGS_FILE_NAME};
