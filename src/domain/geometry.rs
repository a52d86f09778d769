//! Centering geometry for the embedded window
//!
//! Maps a target size onto the primary screen. Offsets are clamped to zero
//! when the target is larger than the screen, so the window is pinned to the
//! top-left corner instead of being pushed off-screen.

use crate::domain::core::{Rect, Size};

/// Computes the rectangle that centers `target` on a screen of size `screen`
///
/// Integer division floors, so an odd remainder leaves the extra pixel on the
/// right/bottom side.
///
/// ```
/// use borderless_host::domain::core::Size;
/// use borderless_host::domain::geometry::centered_rect;
///
/// let rect = centered_rect(Size::new(800, 600), Size::new(1920, 1080));
/// assert_eq!((rect.x, rect.y, rect.w, rect.h), (560, 240, 800, 600));
/// ```
pub fn centered_rect(target: Size, screen: Size) -> Rect {
    let target = target.non_negative();
    let screen = screen.non_negative();

    let x = ((screen.w - target.w) / 2).max(0);
    let y = ((screen.h - target.h) / 2).max(0);

    Rect::new(x, y, target.w, target.h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centers_smaller_target() {
        let rect = centered_rect(Size::new(800, 600), Size::new(1920, 1080));
        assert_eq!(rect, Rect::new(560, 240, 800, 600));
    }

    #[test]
    fn odd_remainder_floors() {
        let rect = centered_rect(Size::new(101, 51), Size::new(200, 100));
        assert_eq!(rect.x, 49);
        assert_eq!(rect.y, 24);
        assert!(rect.right() <= 200);
        assert!(rect.bottom() <= 100);
    }

    #[test]
    fn oversized_target_is_clamped_to_origin() {
        let rect = centered_rect(Size::new(1920, 1080), Size::new(800, 600));
        assert_eq!(rect, Rect::new(0, 0, 1920, 1080));
    }

    #[test]
    fn clamps_each_axis_independently() {
        // Wider than the screen but shorter
        let rect = centered_rect(Size::new(2560, 400), Size::new(1920, 1080));
        assert_eq!(rect.x, 0);
        assert_eq!(rect.y, 340);
    }

    #[test]
    fn exact_fit_sits_at_origin() {
        let rect = centered_rect(Size::new(1920, 1080), Size::new(1920, 1080));
        assert_eq!(rect, Rect::new(0, 0, 1920, 1080));
    }

    #[test]
    fn fits_inside_screen_for_sampled_sizes() {
        let screens = [(640, 480), (1366, 768), (1920, 1080), (3840, 2160)];
        for &(sw, sh) in &screens {
            for w in (0..=sw).step_by(97) {
                for h in (0..=sh).step_by(89) {
                    let rect = centered_rect(Size::new(w, h), Size::new(sw, sh));
                    assert_eq!(rect.x, (sw - w) / 2);
                    assert_eq!(rect.y, (sh - h) / 2);
                    assert!(rect.right() <= sw, "{w}x{h} on {sw}x{sh}");
                    assert!(rect.bottom() <= sh, "{w}x{h} on {sw}x{sh}");
                }
            }
        }
    }

    #[test]
    fn negative_dimensions_never_produce_negative_rect() {
        let rect = centered_rect(Size::new(-10, -10), Size::new(100, 100));
        assert_eq!(rect, Rect::new(50, 50, 0, 0));
    }
}
