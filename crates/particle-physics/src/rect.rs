//! Axis-aligned world rectangle

use crate::vector::Point;

/// Rectangle with its origin at the top-left corner.
///
/// Width and height never go negative: negative writes clamp to zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    origin: Point,
    width: f64,
    height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        let mut rect = Self {
            origin: Point::new(x, y),
            width: 0.0,
            height: 0.0,
        };
        rect.set_width(width);
        rect.set_height(height);
        rect
    }

    /// Rectangle of the given size anchored at the origin
    pub fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn set_width(&mut self, width: f64) {
        self.width = if width > 0.0 { width } else { 0.0 };
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn set_height(&mut self, height: f64) {
        self.height = if height > 0.0 { height } else { 0.0 };
    }

    pub fn left(&self) -> f64 {
        self.origin.x
    }

    pub fn top(&self) -> f64 {
        self.origin.y
    }

    pub fn right(&self) -> f64 {
        self.origin.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.origin.y + self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.left(), 10.0);
        assert_eq!(rect.top(), 20.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.bottom(), 70.0);
    }

    #[test]
    fn test_negative_size_clamps_to_zero() {
        let mut rect = Rect::new(0.0, 0.0, -5.0, -1.0);
        assert_eq!(rect.width(), 0.0);
        assert_eq!(rect.height(), 0.0);

        rect.set_width(30.0);
        rect.set_width(-30.0);
        assert_eq!(rect.width(), 0.0);
        assert_eq!(rect.right(), rect.left());
    }

    #[test]
    fn test_contains() {
        let rect = Rect::sized(10.0, 10.0);
        assert!(rect.contains(Point::new(5.0, 5.0)));
        assert!(rect.contains(Point::new(10.0, 0.0)));
        assert!(!rect.contains(Point::new(10.5, 5.0)));
    }
}
