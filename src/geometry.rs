//! Integer screen-space geometry: points and axis-aligned rectangles

use serde::{Deserialize, Serialize};

/// A pixel coordinate on a surface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Inclusive axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    /// Rectangle spanned by two opposite corners given in any order
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Width in pixels (inclusive bounds)
    #[inline]
    pub fn width(&self) -> u32 {
        (self.max.x - self.min.x + 1) as u32
    }

    /// Height in pixels (inclusive bounds)
    #[inline]
    pub fn height(&self) -> u32 {
        (self.max.y - self.min.y + 1) as u32
    }

    /// Overlap of two rectangles, or None if they are disjoint
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let min = Point::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y));
        let max = Point::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y));
        if min.x > max.x || min.y > max.y {
            None
        } else {
            Some(Rect { min, max })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_in_any_order() {
        let r = Rect::from_corners(Point::new(10, 2), Point::new(3, 8));
        assert_eq!(r.min, Point::new(3, 2));
        assert_eq!(r.max, Point::new(10, 8));
        assert_eq!((r.width(), r.height()), (8, 7));
        assert!(r.contains(Point::new(3, 8)));
        assert!(!r.contains(Point::new(11, 8)));
    }

    #[test]
    fn disjoint_rects_do_not_intersect() {
        let a = Rect::from_corners(Point::new(0, 0), Point::new(4, 4));
        let b = Rect::from_corners(Point::new(5, 0), Point::new(9, 4));
        assert_eq!(a.intersect(&b), None);
        let c = Rect::from_corners(Point::new(2, 2), Point::new(9, 9));
        assert_eq!(
            a.intersect(&c),
            Some(Rect::from_corners(Point::new(2, 2), Point::new(4, 4)))
        );
    }

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(Point::new(0, 0).distance_to(&Point::new(3, 4)), 5.0);
    }
}
