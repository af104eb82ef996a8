//! Cubic Bézier segments and adaptive subdivision.
//!
//! Evaluation is delegated to lyon_geom; what lives here is the bounding box
//! heuristic, the control point repair, and the turning-angle subdivision
//! that decides how many wall/bevel slices a curve gets.

use lyon_geom::{CubicBezierSegment, point};
use tracing::warn;

use crate::geometry::{Point, Rect};

/// Subdivision never splits an interval narrower than this.
pub const MIN_PARAM_STEP: f64 = 1e-2;

/// A cubic Bézier curve with control points `p0..p3`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curve {
    spline: CubicBezierSegment<f64>,
    bbox: Rect,
}

impl Curve {
    /// Build a curve, repairing collapsed control handles.
    ///
    /// A handle sitting on its endpoint (`p0 == p1` or `p2 == p3`) gives a
    /// zero tangent at that end, so it's replaced by the other inner control
    /// point. The bounding box is a cheap bound: the endpoints plus samples
    /// at t = 0.25, 0.5 and 0.75.
    pub fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        let mut ctrl1 = p1;
        let mut ctrl2 = p2;
        if p0 == p1 {
            warn!(?p0, ?p2, "cubic bezier p0 == p1, moving p1 onto p2");
            ctrl1 = p2;
        }
        if p2 == p3 {
            warn!(?p3, ?p1, "cubic bezier p2 == p3, moving p2 onto p1");
            ctrl2 = p1;
        }

        let spline = CubicBezierSegment {
            from: point(p0.x, p0.y),
            ctrl1: point(ctrl1.x, ctrl1.y),
            ctrl2: point(ctrl2.x, ctrl2.y),
            to: point(p3.x, p3.y),
        };

        let bbox = [0.25, 0.5, 0.75].iter().fold(Rect::from_points(p0, p3), |bbox, &t| {
            let p = spline.sample(t);
            bbox.include(Point::new(p.x, p.y))
        });
        Self { spline, bbox }
    }

    #[inline]
    pub fn bbox(&self) -> Rect {
        self.bbox
    }

    #[inline]
    pub fn at(&self, t: f64) -> Point {
        let p = self.spline.sample(t);
        Point::new(p.x, p.y)
    }

    /// Un-normalized derivative at `t`.
    #[inline]
    pub fn tangent(&self, t: f64) -> Point {
        let v = self.spline.derivative(t);
        Point::new(v.x, v.y)
    }

    #[inline]
    pub fn start(&self) -> Point {
        Point::new(self.spline.from.x, self.spline.from.y)
    }

    #[inline]
    pub fn end(&self) -> Point {
        Point::new(self.spline.to.x, self.spline.to.y)
    }

    /// Control points after repair, in order.
    pub fn control_points(&self) -> [Point; 4] {
        let s = &self.spline;
        [
            Point::new(s.from.x, s.from.y),
            Point::new(s.ctrl1.x, s.ctrl1.y),
            Point::new(s.ctrl2.x, s.ctrl2.y),
            Point::new(s.to.x, s.to.y),
        ]
    }

    /// Parameter values along the curve such that the tangent turns by no
    /// more than `max_degrees` between neighbours.
    ///
    /// # Algorithm
    ///
    /// 1. Start from t = {0, 0.5, 1}
    /// 2. Walk adjacent pairs; if their unit tangents differ by more than
    ///    the tolerance, insert the midpoint and re-check the left half
    /// 3. Otherwise move on to the next pair
    ///
    /// Intervals narrower than [`MIN_PARAM_STEP`] are never split, which
    /// keeps cusps and other pathological curvature from looping forever.
    pub fn subdivide(&self, max_degrees: f64) -> Vec<f64> {
        let mut ts = vec![0.0, 0.5, 1.0];
        let mut tangents: Vec<Point> = ts.iter().map(|&t| self.tangent(t).normalize()).collect();
        let max_radians = max_degrees.to_radians().abs();

        let mut i = 0;
        while i + 1 < ts.len() {
            if ts[i + 1] - ts[i] < MIN_PARAM_STEP {
                warn!(t0 = ts[i], t1 = ts[i + 1], "stopping subdivision at minimum step");
                i += 1;
                continue;
            }
            if tangents[i].angle_to(tangents[i + 1]) > max_radians {
                let mid = 0.5 * (ts[i] + ts[i + 1]);
                ts.insert(i + 1, mid);
                tangents.insert(i + 1, self.tangent(mid).normalize());
            } else {
                i += 1;
            }
        }
        ts
    }
}
