//! Portable screen-space geometry.
//!
//! Mirrors the Win32 `RECT` layout (left/top inclusive, right/bottom
//! exclusive) so conversions in the Win32 backend are field-for-field.

use serde::Serialize;

/// Rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// Width/height pair in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

/// Screen position in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle anchored at `origin` with the given `size`.
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            right: origin.x + size.width,
            bottom: origin.y + size.height,
        }
    }

    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub const fn size(&self) -> Size {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Like [`Rect::size`], but `None` when an extent overflows `i32`.
    pub fn checked_size(&self) -> Option<Size> {
        Some(Size {
            width: self.right.checked_sub(self.left)?,
            height: self.bottom.checked_sub(self.top)?,
        })
    }

    pub const fn origin(&self) -> Point {
        Point {
            x: self.left,
            y: self.top,
        }
    }

    /// True when the rectangle has no area.
    pub const fn is_degenerate(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Top-left position that centres `outer` on a display of size `display`.
///
/// Each coordinate is clamped to 0 when the window does not fit, so the
/// caption bar never ends up off-screen.
pub fn centered_origin(display: Size, outer: Size) -> Point {
    Point {
        x: ((display.width - outer.width) / 2).max(0),
        y: ((display.height - outer.height) / 2).max(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_dimensions() {
        let r = Rect::new(-8, -31, 1288, 728);
        assert_eq!(r.width(), 1296);
        assert_eq!(r.height(), 759);
        assert_eq!(r.size(), Size::new(1296, 759));
        assert_eq!(r.origin(), Point { x: -8, y: -31 });
        assert!(!r.is_degenerate());
    }

    #[test]
    fn test_checked_size_overflow() {
        assert_eq!(Rect::new(-8, -31, 1288, 728).checked_size(), Some(Size::new(1296, 759)));
        assert_eq!(Rect::new(-8, 0, i32::MAX, 10).checked_size(), None);
        assert_eq!(Rect::new(0, i32::MIN, 10, 1).checked_size(), None);
    }

    #[test]
    fn test_degenerate_rects() {
        assert!(Rect::default().is_degenerate());
        assert!(Rect::new(10, 10, 10, 50).is_degenerate());
        assert!(Rect::new(10, 10, 50, 5).is_degenerate());
    }

    #[test]
    fn test_from_origin_size() {
        let r = Rect::from_origin_size(Point { x: 100, y: 50 }, Size::new(640, 480));
        assert_eq!(r, Rect::new(100, 50, 740, 530));
    }

    #[test]
    fn test_centered_origin_fits() {
        let origin = centered_origin(Size::new(1920, 1080), Size::new(1296, 759));
        assert_eq!(origin, Point { x: 312, y: 160 });
    }

    #[test]
    fn test_centered_origin_clamps_each_axis() {
        let wide = centered_origin(Size::new(1024, 768), Size::new(2000, 400));
        assert_eq!(wide, Point { x: 0, y: 184 });

        let tall = centered_origin(Size::new(1024, 768), Size::new(400, 1000));
        assert_eq!(tall, Point { x: 312, y: 0 });
    }

    #[test]
    fn test_rect_serialization() {
        let json = serde_json::to_string(&Rect::new(0, 0, 1920, 1080)).unwrap();
        assert_eq!(json, r#"{"left":0,"top":0,"right":1920,"bottom":1080}"#);
    }
}
