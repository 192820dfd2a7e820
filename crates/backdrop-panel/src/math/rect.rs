//! Positions, sizes and panel rectangles

use serde::{Deserialize, Serialize};

/// 2D vector for pointer positions and offsets
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// Zero vector
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Create a new vector
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Panel rectangle in device-independent pixels, top-left origin
///
/// Fractional while a gesture is live; [`Rect::rounded`] gives the
/// integer form written at commit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Rect {
    fn default() -> Self {
        Self::new(100.0, 100.0, 320.0, 240.0)
    }
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Top-left corner
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    /// Width and height
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Same rectangle moved by `delta`
    pub fn translated(&self, delta: Vec2) -> Rect {
        Rect::new(self.left + delta.x, self.top + delta.y, self.width, self.height)
    }

    /// Same origin with the size multiplied per axis
    ///
    /// Negative factors collapse the axis to zero rather than flipping it.
    pub fn scaled(&self, scale_x: f64, scale_y: f64) -> Rect {
        Rect::new(
            self.left,
            self.top,
            (self.width * scale_x).max(0.0),
            (self.height * scale_y).max(0.0),
        )
    }

    /// Integer-valued copy used for committed coordinates
    pub fn rounded(&self) -> Rect {
        Rect::new(
            self.left.round(),
            self.top.round(),
            self.width.round(),
            self.height.round(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_default_matches_initial_coords() {
        let rect = Rect::default();
        assert_eq!(rect, Rect::new(100.0, 100.0, 320.0, 240.0));
    }

    #[test]
    fn test_rect_translated() {
        let rect = Rect::new(100.0, 100.0, 320.0, 240.0).translated(Vec2::new(100.0, -50.0));
        assert_eq!(rect.origin(), Vec2::new(200.0, 50.0));
        assert_eq!(rect.size(), Size::new(320.0, 240.0));
    }

    #[test]
    fn test_rect_scaled_floors_at_zero() {
        let rect = Rect::new(0.0, 0.0, 320.0, 240.0);
        let grown = rect.scaled(2.0, 1.5);
        assert!((grown.width - 640.0).abs() < 0.001);
        assert!((grown.height - 360.0).abs() < 0.001);

        let collapsed = rect.scaled(-0.5, 0.0);
        assert_eq!(collapsed.width, 0.0);
        assert_eq!(collapsed.height, 0.0);
    }

    #[test]
    fn test_rect_rounded() {
        let rect = Rect::new(10.4, 10.6, 320.5, 239.49).rounded();
        assert_eq!(rect, Rect::new(10.0, 11.0, 321.0, 239.0));
    }
}
