//! Core domain types
//!
//! Pure geometric types in screen pixels. Nothing here knows about Win32
//! handles or the embedded process.

/// Rectangle in screen coordinates
///
/// Produced fresh by the geometry calculator and never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    /// Creates a new rectangle
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Returns the right edge coordinate
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Returns the bottom edge coordinate
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Width and height of the rectangle
    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }
}

/// Width/height pair, used for target sizes and screen bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub w: i32,
    pub h: i32,
}

impl Size {
    pub fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }

    /// Builds a size from unsigned configuration values, saturating at `i32::MAX`
    pub fn from_unsigned(w: u32, h: u32) -> Self {
        Self {
            w: i32::try_from(w).unwrap_or(i32::MAX),
            h: i32::try_from(h).unwrap_or(i32::MAX),
        }
    }

    /// Same size with negative dimensions clamped to zero
    pub fn non_negative(self) -> Self {
        Self {
            w: self.w.max(0),
            h: self.h.max(0),
        }
    }
}
