//! Parametric 2D segments: the building blocks of an outline.
//!
//! A segment is either a straight [`Line`] or a cubic Bézier [`Curve`].
//! Both are parameterized over `t` in `0..=1` and expose the same
//! capabilities: position, tangent, normal, bounding box, plus the wall and
//! bevel generators.
//!
//! ## Rust Lesson #10: Closed Enums vs Trait Objects
//!
//! A `Box<dyn Trait>` lets anyone add new segment kinds later. We don't
//! want that - there are exactly two kinds, and callers only ever ask
//! "is this a line?". An enum keeps it closed, stack-allocated, and the
//! compiler checks every `match` covers both variants.

mod curve;
mod line;

pub use curve::{Curve, MIN_PARAM_STEP};
pub use line::Line;

use crate::error::MeshError;
use crate::extrude;
use crate::geometry::{Point, Rect, Triangle3};

/// One piece of an outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line(Line),
    Curve(Curve),
}

/// Output of a single segment's wall or bevel generation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentMesh {
    /// Wall or bevel faces for this segment.
    pub triangles: Vec<Triangle3>,
    /// 2D contour points for the cap triangulation, in outline order.
    pub contour: Vec<Point>,
}

impl Segment {
    /// A straight segment from `p0` to `p1`.
    pub fn line(p0: Point, p1: Point) -> Self {
        Segment::Line(Line::new(p0, p1))
    }

    /// A cubic Bézier segment (see [`Curve::new`] for handle repair).
    pub fn curve(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Segment::Curve(Curve::new(p0, p1, p2, p3))
    }

    pub fn bbox(&self) -> Rect {
        match self {
            Segment::Line(l) => l.bbox(),
            Segment::Curve(c) => c.bbox(),
        }
    }

    /// Point on the segment. `t` outside `0..=1` extrapolates.
    pub fn at(&self, t: f64) -> Point {
        match self {
            Segment::Line(l) => l.at(t),
            Segment::Curve(c) => c.at(t),
        }
    }

    /// Un-normalized tangent (derivative) at `t`.
    pub fn tangent(&self, t: f64) -> Point {
        match self {
            Segment::Line(l) => l.tangent(t),
            Segment::Curve(c) => c.tangent(t),
        }
    }

    #[inline]
    pub fn normalized_tangent(&self, t: f64) -> Point {
        self.tangent(t).normalize()
    }

    /// Tangent rotated 90 degrees to the left (un-normalized).
    #[inline]
    pub fn normal(&self, t: f64) -> Point {
        self.tangent(t).rotate_90_left()
    }

    #[inline]
    pub fn normalized_normal(&self, t: f64) -> Point {
        self.normal(t).normalize()
    }

    pub fn start(&self) -> Point {
        match self {
            Segment::Line(l) => l.start(),
            Segment::Curve(c) => c.start(),
        }
    }

    pub fn end(&self) -> Point {
        match self {
            Segment::Line(l) => l.end(),
            Segment::Curve(c) => c.end(),
        }
    }

    /// Lines have zero curvature and never need subdividing.
    #[inline]
    pub fn is_line(&self) -> bool {
        matches!(self, Segment::Line(_))
    }

    /// Slice boundaries along the segment.
    ///
    /// A line is a single slice `[0, 1]`; a curve is subdivided by turning
    /// angle (see [`Curve::subdivide`]).
    pub fn subdivide(&self, max_degrees: f64) -> Vec<f64> {
        match self {
            Segment::Line(_) => vec![0.0, 1.0],
            Segment::Curve(c) => c.subdivide(max_degrees),
        }
    }

    /// Vertical wall from z = 0 to z = `height`.
    ///
    /// Returns the wall triangles and the floor contour points (the far end
    /// of every slice).
    pub fn wall(&self, height: f64, max_degrees: f64, flip_normals: bool) -> SegmentMesh {
        extrude::wall(self, height, max_degrees, flip_normals)
    }

    /// Angled skirt starting at z = `height`, pushed `offset` along the
    /// normal and rising by `offset * tan(degrees)`.
    ///
    /// `prev_normal` is the previous segment's unit normal at its end and
    /// `next_normal` the next segment's unit normal at its start, both
    /// already flipped to match `flip_normals`.
    #[allow(clippy::too_many_arguments)]
    pub fn bevel(
        &self,
        height: f64,
        offset: f64,
        degrees: f64,
        max_degrees: f64,
        flip_normals: bool,
        prev_normal: Point,
        next_normal: Point,
    ) -> Result<SegmentMesh, MeshError> {
        extrude::bevel(
            self,
            &extrude::BevelParams { height, offset, degrees, max_degrees, flip_normals },
            prev_normal,
            next_normal,
        )
    }
}

impl From<Line> for Segment {
    fn from(line: Line) -> Self {
        Segment::Line(line)
    }
}

impl From<Curve> for Segment {
    fn from(curve: Curve) -> Self {
        Segment::Curve(curve)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_1_SQRT_2;

    fn sample_curve() -> Segment {
        Segment::curve(
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(2.0, 1.0),
            Point::new(2.0, 0.0),
        )
    }

    fn sample_line() -> Segment {
        Segment::line(Point::new(0.0, 1.0), Point::new(2.0, -1.0))
    }

    fn assert_point_eq(got: Point, want: Point) {
        assert_abs_diff_eq!(got.x, want.x, epsilon = 1e-12);
        assert_abs_diff_eq!(got.y, want.y, epsilon = 1e-12);
    }

    #[test]
    fn curve_at_and_derivatives() {
        let c = sample_curve();
        assert_point_eq(c.at(0.5), Point::new(1.0, 0.75));
        assert_point_eq(c.tangent(0.5), Point::new(3.0, 0.0));
        assert_point_eq(c.normalized_tangent(0.5), Point::new(1.0, 0.0));
        assert_point_eq(c.normal(0.5), Point::new(0.0, 3.0));
        assert_point_eq(c.normalized_normal(0.5), Point::new(0.0, 1.0));
        assert!(!c.is_line());
    }

    #[test]
    fn curve_bbox_uses_samples() {
        let bbox = sample_curve().bbox();
        assert_point_eq(bbox.min, Point::new(0.0, 0.0));
        assert_point_eq(bbox.max, Point::new(2.0, 0.75));
    }

    #[test]
    fn curve_subdivide_45_degrees() {
        let ts = sample_curve().subdivide(45.0);
        assert_eq!(ts, vec![0.0, 0.125, 0.25, 0.5, 0.75, 0.875, 1.0]);
    }

    #[test]
    fn subdivide_stops_at_minimum_step() {
        // A zero tolerance can never be met on a curved segment
        let ts = sample_curve().subdivide(0.0);
        assert_eq!(ts.first(), Some(&0.0));
        assert_eq!(ts.last(), Some(&1.0));
        for w in ts.windows(2) {
            assert!(w[1] > w[0]);
            assert!(w[1] - w[0] >= MIN_PARAM_STEP / 2.0);
        }
    }

    #[test]
    fn degenerate_handles_are_repaired() {
        let c = Curve::new(
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(2.0, 1.0),
            Point::new(2.0, 1.0),
        );
        let [_, c1, c2, _] = c.control_points();
        assert_eq!(c1, Point::new(2.0, 1.0));
        assert_eq!(c2, Point::new(0.0, 0.0));
        let seg = Segment::from(c);
        assert!(seg.tangent(0.0).length() > 0.0);
        assert!(seg.tangent(1.0).length() > 0.0);
    }

    #[test]
    fn line_at_and_derivatives() {
        let l = sample_line();
        assert_eq!(l.at(0.5), Point::new(1.0, 0.0));
        assert_eq!(l.tangent(0.5), Point::new(2.0, -2.0));
        assert_point_eq(l.normalized_tangent(0.5), Point::new(FRAC_1_SQRT_2, -FRAC_1_SQRT_2));
        assert_eq!(l.normal(0.5), Point::new(2.0, 2.0));
        assert_point_eq(l.normalized_normal(0.5), Point::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2));
        assert!(l.is_line());
        assert_eq!(l.subdivide(1.0), vec![0.0, 1.0]);
    }

    #[test]
    fn line_bbox() {
        let bbox = sample_line().bbox();
        assert_eq!(bbox.min, Point::new(0.0, -1.0));
        assert_eq!(bbox.max, Point::new(2.0, 1.0));
    }

    #[test]
    fn endpoints() {
        let c = sample_curve();
        assert_eq!(c.start(), Point::new(0.0, 0.0));
        assert_eq!(c.end(), Point::new(2.0, 0.0));
        let l = sample_line();
        assert_eq!(l.start(), Point::new(0.0, 1.0));
        assert_eq!(l.end(), Point::new(2.0, -1.0));
    }
}
