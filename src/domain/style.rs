//! Window style bit field
//!
//! Mirrors the layout of the Win32 `GWL_STYLE` value so the platform layer
//! can pass it through unchanged.

/// Opaque style bits of a foreign top-level window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WindowStyleBits(pub u32);

impl WindowStyleBits {
    /// Title bar (border + dialog frame)
    pub const CAPTION: u32 = 0x00C0_0000;
    /// Thin-line border
    pub const BORDER: u32 = 0x0080_0000;
    /// Sizing border
    pub const THICK_FRAME: u32 = 0x0004_0000;

    /// All decoration bits removed for borderless fullscreen
    pub const DECORATION: u32 = Self::CAPTION | Self::BORDER | Self::THICK_FRAME;

    /// Returns these bits with caption, border and thick frame cleared
    pub fn without_decoration(self) -> Self {
        Self(self.0 & !Self::DECORATION)
    }

    pub fn has_decoration(self) -> bool {
        self.0 & Self::DECORATION != 0
    }
}
