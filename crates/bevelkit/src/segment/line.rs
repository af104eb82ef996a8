//! Straight line segments.

use crate::geometry::{Point, Rect};

/// A straight segment from `p0` to `p1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    p0: Point,
    p1: Point,
    bbox: Rect,
}

impl Line {
    pub fn new(p0: Point, p1: Point) -> Self {
        Self { p0, p1, bbox: Rect::from_points(p0, p1) }
    }

    #[inline]
    pub fn bbox(&self) -> Rect {
        self.bbox
    }

    #[inline]
    pub fn at(&self, t: f64) -> Point {
        self.p0.lerp(self.p1, t)
    }

    /// Constant along the whole line.
    #[inline]
    pub fn tangent(&self, _t: f64) -> Point {
        self.p1 - self.p0
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.p0
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.p1
    }
}
