//! SVG outline import - turn SVG paths into [`Path`]s ready for extrusion.
//!
//! Two entry points:
//! - [`path_from_svg_data`] parses a bare `d="..."` attribute with svgtypes
//! - [`paths_from_svg`] resolves a whole document with usvg (CSS, shapes
//!   like `<rect>`/`<circle>` become paths) and walks the tree
//!
//! ## Curves Stay Curves
//!
//! Unlike a fill pipeline, nothing is flattened here. Cubic Béziers become
//! [`Segment::Curve`]s so the wall/bevel generators can subdivide them by
//! turning angle later; quadratics are elevated to cubics with lyon_geom.

use lyon_geom::{QuadraticBezierSegment, point};
use svgtypes::{SimplePathSegment, SimplifyingPathParser};
use thiserror::Error;
use tracing::{debug, warn};

use crate::geometry::Point;
use crate::path::Path;
use crate::segment::Segment;
use crate::subpath::SubPath;

/// Points closer than this are treated as the same point. usvg's arc
/// conversion lands a hair off the start point of a closed circle.
const SNAP_DISTANCE: f64 = 1e-4;

/// Error type for SVG import.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SvgError {
    #[error("SVG parse error: {0}")]
    Parse(String),
    #[error("No paths found in SVG")]
    NoPaths,
}

/// Build a [`Path`] from SVG path data (`d` attribute).
///
/// Each `M` starts a new ring. Rings are closed with a straight segment
/// back to their start when the pen isn't already (nearly) there, whether or not
/// the data has a `Z` (fills close implicitly).
pub fn path_from_svg_data(d: &str) -> Result<Path, SvgError> {
    let mut rings = RingBuilder::default();

    for seg in SimplifyingPathParser::from(d) {
        match seg.map_err(|e| SvgError::Parse(e.to_string()))? {
            SimplePathSegment::MoveTo { x, y } => rings.move_to(Point::new(x, y)),
            SimplePathSegment::LineTo { x, y } => rings.line_to(Point::new(x, y)),
            SimplePathSegment::Quadratic { x1, y1, x, y } => {
                rings.quad_to(Point::new(x1, y1), Point::new(x, y));
            }
            SimplePathSegment::CurveTo { x1, y1, x2, y2, x, y } => {
                rings.cubic_to(Point::new(x1, y1), Point::new(x2, y2), Point::new(x, y));
            }
            SimplePathSegment::ClosePath => rings.close(),
        }
    }

    Ok(Path::new(rings.finish()))
}

/// Extract one [`Path`] per path element of an SVG document.
pub fn paths_from_svg(svg_content: &str) -> Result<Vec<Path>, SvgError> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg_content, &options)
        .map_err(|e| SvgError::Parse(e.to_string()))?;

    let mut paths = Vec::new();
    extract_from_group(tree.root(), &mut paths);

    if paths.is_empty() {
        Err(SvgError::NoPaths)
    } else {
        Ok(paths)
    }
}

fn extract_from_group(group: &usvg::Group, paths: &mut Vec<Path>) {
    for child in group.children() {
        match child {
            usvg::Node::Group(group) => extract_from_group(group, paths),
            usvg::Node::Path(path) => {
                let converted = convert_path(path);
                if !converted.sub_paths.is_empty() {
                    paths.push(converted);
                }
            }
            // Ignore text, images, etc.
            _ => {}
        }
    }
}

/// Convert one usvg path, in document coordinates (group transforms applied).
fn convert_path(path: &usvg::Path) -> Path {
    use usvg::tiny_skia_path::PathSegment;

    let Some(data) = path.data().clone().transform(path.abs_transform()) else {
        warn!(id = path.id(), "path transform produced non-finite points, skipping");
        return Path::default();
    };

    let pt = |p: usvg::tiny_skia_path::Point| Point::new(p.x as f64, p.y as f64);
    let mut rings = RingBuilder::default();

    for cmd in data.segments() {
        match cmd {
            PathSegment::MoveTo(p) => rings.move_to(pt(p)),
            PathSegment::LineTo(p) => rings.line_to(pt(p)),
            PathSegment::QuadTo(ctrl, p) => rings.quad_to(pt(ctrl), pt(p)),
            PathSegment::CubicTo(c1, c2, p) => rings.cubic_to(pt(c1), pt(c2), pt(p)),
            PathSegment::Close => rings.close(),
        }
    }

    let sub_paths = rings.finish();
    debug!(id = path.id(), rings = sub_paths.len(), "converted svg path");
    Path::new(sub_paths)
}

/// Accumulates drawing commands into closed rings.
#[derive(Debug, Default)]
struct RingBuilder {
    rings: Vec<SubPath>,
    segments: Vec<Segment>,
    start: Option<Point>,
    pen: Option<Point>,
}

impl RingBuilder {
    fn move_to(&mut self, p: Point) {
        self.close();
        self.start = Some(p);
        self.pen = Some(p);
    }

    fn line_to(&mut self, p: Point) {
        let Some(pen) = self.pen else {
            return self.move_to(p);
        };
        // Zero-length lines have no normal
        if pen.distance(p) > SNAP_DISTANCE {
            self.segments.push(Segment::line(pen, p));
        }
        self.pen = Some(p);
    }

    fn quad_to(&mut self, ctrl: Point, p: Point) {
        let Some(pen) = self.pen else {
            return self.move_to(p);
        };
        let cubic = QuadraticBezierSegment {
            from: point(pen.x, pen.y),
            ctrl: point(ctrl.x, ctrl.y),
            to: point(p.x, p.y),
        }
        .to_cubic();
        self.segments.push(Segment::curve(
            pen,
            Point::new(cubic.ctrl1.x, cubic.ctrl1.y),
            Point::new(cubic.ctrl2.x, cubic.ctrl2.y),
            p,
        ));
        self.pen = Some(p);
    }

    fn cubic_to(&mut self, c1: Point, c2: Point, p: Point) {
        let Some(pen) = self.pen else {
            return self.move_to(p);
        };
        self.segments.push(Segment::curve(pen, c1, c2, p));
        self.pen = Some(p);
    }

    /// Close the current ring (if any) and keep the pen at its start.
    fn close(&mut self) {
        if self.segments.is_empty() {
            return;
        }
        if let (Some(start), Some(pen)) = (self.start, self.pen) {
            if pen.distance(start) > SNAP_DISTANCE {
                self.segments.push(Segment::line(pen, start));
            }
        }
        self.rings.push(SubPath::new(std::mem::take(&mut self.segments)));
        self.pen = self.start;
    }

    fn finish(mut self) -> Vec<SubPath> {
        self.close();
        self.rings
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_path_data() {
        let path = path_from_svg_data("M0,0 L10,0 L10,10 L0,10 Z").unwrap();
        assert_eq!(path.sub_paths.len(), 1);
        let ring = &path.sub_paths[0];
        assert_eq!(ring.segments.len(), 4);
        assert!(ring.segments.iter().all(Segment::is_line));
        assert_eq!(ring.segments[3].end(), Point::new(0.0, 0.0));
    }

    #[test]
    fn explicit_closing_line_is_not_doubled() {
        let path = path_from_svg_data("M0,0 L10,0 L10,10 L0,0 Z").unwrap();
        assert_eq!(path.sub_paths[0].segments.len(), 3);
    }

    #[test]
    fn unclosed_ring_is_closed() {
        let path = path_from_svg_data("M0,0 L10,0 L10,10").unwrap();
        let ring = &path.sub_paths[0];
        assert_eq!(ring.segments.len(), 3);
        assert_eq!(ring.segments[2].end(), Point::new(0.0, 0.0));
    }

    #[test]
    fn bezier_stays_a_curve() {
        let path = path_from_svg_data("M 10,10 C 40,10 60,90 90,90 L 90,10 Z").unwrap();
        let ring = &path.sub_paths[0];
        assert_eq!(ring.segments.len(), 3);
        assert!(!ring.segments[0].is_line());
        assert_eq!(ring.segments[0].end(), Point::new(90.0, 90.0));
    }

    #[test]
    fn quadratic_is_elevated() {
        let path = path_from_svg_data("M0 0 Q5 10 10 0 Z").unwrap();
        let ring = &path.sub_paths[0];
        assert_eq!(ring.segments.len(), 2);
        let curve = ring.segments[0];
        assert!(!curve.is_line());
        // Same apex as the quadratic: (5, 5) at t = 0.5
        let mid = curve.at(0.5);
        assert!((mid.x - 5.0).abs() < 1e-9 && (mid.y - 5.0).abs() < 1e-9, "{:?}", mid);
    }

    #[test]
    fn multiple_rings() {
        let path = path_from_svg_data("M0 0 H10 V10 H0 Z M4 4 V6 H6 V4 Z").unwrap();
        assert_eq!(path.sub_paths.len(), 2);
        assert_eq!(path.sub_paths[0].segments.len(), 4);
        assert_eq!(path.sub_paths[1].segments.len(), 4);
    }

    #[test]
    fn bad_path_data() {
        assert!(matches!(
            path_from_svg_data("M 0 0 L 10 foo"),
            Err(SvgError::Parse(_))
        ));
    }

    #[test]
    fn svg_rect_becomes_one_ring() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
                <rect x="10" y="10" width="80" height="80"/>
            </svg>
        "#;
        let paths = paths_from_svg(svg).unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].sub_paths.len(), 1);
        assert_eq!(paths[0].sub_paths[0].segments.len(), 4);
    }

    #[test]
    fn svg_circle_keeps_curves() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
                <circle cx="50" cy="50" r="40"/>
            </svg>
        "#;
        let paths = paths_from_svg(svg).unwrap();
        let ring = &paths[0].sub_paths[0];
        assert!(ring.segments.iter().filter(|s| !s.is_line()).count() >= 4);
    }

    #[test]
    fn group_transform_is_applied() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 400 100">
                <g transform="translate(200,0)">
                    <rect x="10" y="10" width="80" height="80"/>
                </g>
            </svg>
        "#;
        let paths = paths_from_svg(svg).unwrap();
        let bbox = paths[0].bbox();
        assert!((bbox.min.x - 210.0).abs() < 1e-4, "{:?}", bbox);
        assert!((bbox.max.x - 290.0).abs() < 1e-4, "{:?}", bbox);
        assert!((bbox.min.y - 10.0).abs() < 1e-4, "{:?}", bbox);
    }

    #[test]
    fn no_paths_error() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
            </svg>
        "#;
        assert!(matches!(paths_from_svg(svg), Err(SvgError::NoPaths)));
    }
}
