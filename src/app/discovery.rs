//! Locating the window to embed by its title
//!
//! Used when the configured executable is only a launcher and the real
//! window belongs to another process that shows up later.

use crate::platform::ops::{ProcessOps, ProcessWindow};

/// Titles ending with this belong to the storefront client, not the game
pub const STOREFRONT_SUFFIX: &str = " - Steam";

/// True when `title` contains `needle` and is not a storefront window
pub fn title_matches(title: &str, needle: &str) -> bool {
    title.contains(needle) && !title.ends_with(STOREFRONT_SUFFIX)
}

/// First matching entry in enumeration order
pub fn select_first<I>(candidates: I, needle: &str) -> Option<ProcessWindow>
where
    I: IntoIterator<Item = ProcessWindow>,
{
    candidates
        .into_iter()
        .find(|candidate| title_matches(&candidate.title, needle))
}

/// Scans the running processes for a main window whose title contains `needle`
///
/// When several match, whichever the OS enumerates first wins; that choice is
/// not stable across runs.
pub fn find_by_title<P: ProcessOps + ?Sized>(platform: &P, needle: &str) -> Option<ProcessWindow> {
    select_first(platform.process_windows(), needle)
}
