//! Fitting a foreign window into the host
//!
//! Embedding is three steps: strip the decoration, center (and optionally
//! resize) on the primary screen, then reparent under the host window. A
//! failed style change aborts the rest for that window; the host itself
//! keeps running.

use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::domain::core::{Rect, Size};
use crate::domain::geometry::centered_rect;
use crate::domain::style::WindowStyleBits;
use crate::platform::ops::{Notifier, PlatformError, WindowHandle, WindowOps};

/// Dialog shown when decoration cannot be removed
pub const STYLE_FAILURE_CAPTION: &str = "Borderless Fullscreen failed";
pub const STYLE_FAILURE_MESSAGE: &str = "Could not force borderless fullscreen";

#[derive(Debug, thiserror::Error)]
pub enum EmbedError {
    #[error("Could not remove decoration from window {window:?}: {source}")]
    StyleChangeFailed {
        window: WindowHandle,
        #[source]
        source: PlatformError,
    },

    #[error(transparent)]
    Platform(#[from] PlatformError),
}

/// Clears caption, border and thick-frame bits on `window`
///
/// Returns the style that was written. Reapplying is harmless: the bits are
/// already clear and the same value is written again.
pub fn remove_decoration<W: WindowOps + ?Sized>(
    ops: &mut W,
    window: WindowHandle,
) -> Result<WindowStyleBits, EmbedError> {
    let current = ops
        .get_style(window)
        .map_err(|source| EmbedError::StyleChangeFailed { window, source })?;

    let stripped = current.without_decoration();
    ops.set_style(window, stripped)
        .map_err(|source| EmbedError::StyleChangeFailed { window, source })?;

    debug!(?window, old = current.0, new = stripped.0, "removed window decoration");
    Ok(stripped)
}

/// Fits tracked windows into one host window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddingController {
    host: WindowHandle,
    /// Both configured dimensions, or None to keep the window's own size
    explicit_size: Option<Size>,
}

impl EmbeddingController {
    pub fn new(host: WindowHandle, settings: &Settings) -> Self {
        Self {
            host,
            explicit_size: settings.explicit_size(),
        }
    }

    pub fn host(&self) -> WindowHandle {
        self.host
    }

    /// Strips, centers and reparents `window`, returning the applied rectangle
    ///
    /// Without an explicit size the window's bounds are read after the style
    /// change, so the size observed at fit time wins.
    pub fn fit<W: WindowOps + ?Sized>(
        &self,
        ops: &mut W,
        window: WindowHandle,
    ) -> Result<Rect, EmbedError> {
        remove_decoration(ops, window)?;

        let target = match self.explicit_size {
            Some(size) => size,
            None => ops.get_bounds(window)?.size(),
        };
        let screen = ops.primary_screen_size()?;
        let rect = centered_rect(target, screen);

        ops.set_position_and_size(window, rect)?;
        ops.reparent(window, self.host)?;

        info!(
            ?window,
            x = rect.x,
            y = rect.y,
            w = rect.w,
            h = rect.h,
            "embedded window"
        );
        Ok(rect)
    }

    /// `fit` with reporting
    ///
    /// A failed style change is shown to the user. Anything later means the
    /// window went away mid-fit; that is only logged, the next tick notices.
    pub fn embed<P: WindowOps + Notifier + ?Sized>(
        &self,
        platform: &mut P,
        window: WindowHandle,
    ) -> Option<Rect> {
        match self.fit(platform, window) {
            Ok(rect) => Some(rect),
            Err(err @ EmbedError::StyleChangeFailed { .. }) => {
                warn!(%err, "borderless fullscreen failed");
                platform.show_error(STYLE_FAILURE_CAPTION, STYLE_FAILURE_MESSAGE);
                None
            }
            Err(err) => {
                warn!(%err, "embedding interrupted");
                None
            }
        }
    }
}
