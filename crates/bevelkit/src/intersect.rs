//! Bounded segment-segment intersection.
//!
//! Used by the bevel generator to spot a miter quad that folds over itself.

use crate::geometry::Point;

// ============================================================================
// LINE-LINE INTERSECTION
// ============================================================================

/// Find where segment `a-b` crosses segment `c-d`.
///
/// The infinite lines are intersected with Cramer's rule, then the point is
/// checked against the extent of both segments (inclusive). Parallel and
/// coincident segments have a zero determinant and never intersect.
pub fn segment_intersection(a: Point, b: Point, c: Point, d: Point) -> Option<Point> {
    let div = (a.x - b.x) * (c.y - d.y) - (a.y - b.y) * (c.x - d.x);
    if div == 0.0 {
        return None;
    }

    let ab = a.x * b.y - a.y * b.x;
    let cd = c.x * d.y - c.y * d.x;
    let x = (ab * (c.x - d.x) - (a.x - b.x) * cd) / div;
    let y = (ab * (c.y - d.y) - (a.y - b.y) * cd) / div;

    let within = |p: Point, q: Point| {
        between(x, p.x, q.x) && between(y, p.y, q.y)
    };
    if within(a, b) && within(c, d) {
        Some(Point::new(x, y))
    } else {
        None
    }
}

/// Convenience wrapper when only the yes/no answer matters.
#[inline]
pub fn segments_intersect(a: Point, b: Point, c: Point, d: Point) -> bool {
    segment_intersection(a, b, c, d).is_some()
}

#[inline]
fn between(v: f64, e0: f64, e1: f64) -> bool {
    e0.min(e1) <= v && v <= e0.max(e1)
}
