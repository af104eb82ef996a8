//! SubPath: one closed ring of segments.
//!
//! The caller is responsible for closing the ring (the last segment ends
//! where the first one starts). A sub-path generates walls and bevels for
//! the whole ring and knows which way its normals should face.

use tracing::debug;

use crate::error::MeshError;
use crate::geometry::{Point, Rect, Triangle3};
use crate::segment::Segment;

/// A closed ring of segments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubPath {
    pub segments: Vec<Segment>,
    /// Reverse the winding of every generated face and negate every normal.
    pub flip_normals: bool,
    /// Set on the enclosing ring by [`crate::Path::auto_flip_normals`].
    pub is_outer: bool,
}

/// What a ring produces for one wall or bevel pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RingMesh {
    /// Wall or bevel faces for the whole ring.
    pub triangles: Vec<Triangle3>,
    /// Cap contour handed to the triangulator.
    pub contour: Vec<Point>,
    /// Height of the cap plane (0 for floors, the bevel top for bevels).
    pub z: f64,
}

impl SubPath {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments, flip_normals: false, is_outer: false }
    }

    /// Union of all segment bounding boxes (empty ring gives a zero box).
    pub fn bbox(&self) -> Rect {
        let mut iter = self.segments.iter();
        let Some(first) = iter.next() else {
            return Rect::default();
        };
        iter.fold(first.bbox(), |acc, s| acc.join(&s.bbox()))
    }

    /// Vertical wall of the whole ring, floor at z = 0.
    pub fn wall(&self, height: f64, max_degrees: f64) -> RingMesh {
        let mut ring = RingMesh { z: 0.0, ..RingMesh::default() };
        for seg in &self.segments {
            let mesh = seg.wall(height, max_degrees, self.flip_normals);
            ring.triangles.extend(mesh.triangles);
            ring.contour.extend(mesh.contour);
        }
        ring
    }

    /// Bevel of the whole ring, mitered at every joint.
    ///
    /// Each segment's neighbours wrap around the ring, so the first segment
    /// is mitered against the last one.
    pub fn bevel(&self, height: f64, offset: f64, degrees: f64, max_degrees: f64) -> Result<RingMesh, MeshError> {
        let mut ring = RingMesh {
            z: height + offset * degrees.to_radians().tan(),
            ..RingMesh::default()
        };
        let n = self.segments.len();
        debug!(segments = n, flip = self.flip_normals, "bevel ring");

        for (i, seg) in self.segments.iter().enumerate() {
            let prev = &self.segments[(i + n - 1) % n];
            let next = &self.segments[(i + 1) % n];
            let mut prev_normal = prev.normalized_normal(1.0);
            let mut next_normal = next.normalized_normal(0.0);
            if self.flip_normals {
                prev_normal = -prev_normal;
                next_normal = -next_normal;
            }

            let mesh = seg
                .bevel(height, offset, degrees, max_degrees, self.flip_normals, prev_normal, next_normal)
                .map_err(|e| e.in_segment(i))?;
            ring.triangles.extend(mesh.triangles);
            ring.contour.extend(mesh.contour);
        }
        Ok(ring)
    }

    /// Decide whether this ring's normals need flipping.
    ///
    /// Every segment endpoint is pushed one unit along its normal and the
    /// pushed points are added to the ring's box. If the box doesn't grow,
    /// the normals face the way the generators expect and nothing changes;
    /// otherwise `flip_normals` is set. It is never cleared, so running
    /// this twice is harmless.
    pub fn auto_flip_normals(&mut self) {
        let bbox = self.bbox();
        let pushed = self.segments.iter().fold(bbox, |acc, seg| {
            let p0 = seg.at(0.0) + seg.normalized_normal(0.0);
            let p1 = seg.at(1.0) + seg.normalized_normal(1.0);
            acc.join(&Rect::from_points(p0, p1))
        });

        if bbox.contains(&pushed) {
            return;
        }
        debug!(?bbox, ?pushed, "normals point outward, flipping ring");
        self.flip_normals = true;
    }
}

impl From<Vec<Segment>> for SubPath {
    fn from(segments: Vec<Segment>) -> Self {
        SubPath::new(segments)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Closed polygon ring from a list of corners.
    fn ring(corners: &[(f64, f64)]) -> SubPath {
        let pts: Vec<Point> = corners.iter().map(|&(x, y)| Point::new(x, y)).collect();
        let segments = (0..pts.len())
            .map(|i| Segment::line(pts[i], pts[(i + 1) % pts.len()]))
            .collect();
        SubPath::new(segments)
    }

    fn ccw_square() -> SubPath {
        ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)])
    }

    fn cw_square() -> SubPath {
        ring(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)])
    }

    #[test]
    fn bbox_joins_segments() {
        let bbox = ccw_square().bbox();
        assert_eq!(bbox.min, Point::new(0.0, 0.0));
        assert_eq!(bbox.max, Point::new(10.0, 10.0));
        assert_eq!(SubPath::default().bbox(), Rect::default());
    }

    #[test]
    fn wall_covers_every_edge() {
        let mesh = ccw_square().wall(3.0, 5.0);
        assert_eq!(mesh.triangles.len(), 8);
        assert_eq!(mesh.z, 0.0);
        // Contour is the end point of every edge, in ring order
        assert_eq!(
            mesh.contour,
            vec![
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
                Point::new(0.0, 0.0),
            ]
        );
    }

    #[test]
    fn bevel_of_square_insets_corners() {
        let mesh = ccw_square().bevel(3.0, 1.0, 45.0, 5.0).unwrap();
        assert_eq!(mesh.triangles.len(), 8);
        assert_abs_diff_eq!(mesh.z, 4.0, epsilon = 1e-9);
        let want = [(9.0, 1.0), (9.0, 9.0), (1.0, 9.0), (1.0, 1.0)];
        assert_eq!(mesh.contour.len(), 4);
        for (got, (x, y)) in mesh.contour.iter().zip(want) {
            assert_abs_diff_eq!(got.x, x, epsilon = 1e-9);
            assert_abs_diff_eq!(got.y, y, epsilon = 1e-9);
        }
    }

    #[test]
    fn ccw_ring_keeps_normals() {
        let mut sp = ccw_square();
        sp.auto_flip_normals();
        assert!(!sp.flip_normals);
    }

    #[test]
    fn cw_ring_flips_normals() {
        let mut sp = cw_square();
        sp.auto_flip_normals();
        assert!(sp.flip_normals);
        // Running it again never toggles back
        sp.auto_flip_normals();
        assert!(sp.flip_normals);
    }

    #[test]
    fn flipped_cw_bevel_also_insets() {
        let mut sp = cw_square();
        sp.auto_flip_normals();
        let mesh = sp.bevel(0.0, 1.0, 45.0, 5.0).unwrap();
        for p in &mesh.contour {
            assert!(p.x > 0.5 && p.x < 9.5 && p.y > 0.5 && p.y < 9.5, "{:?} not inset", p);
        }
    }

    #[test]
    fn wall_normals_face_outward() {
        // Outward for the bottom edge of a CCW square is -y
        let mesh = ccw_square().wall(1.0, 5.0);
        assert!(mesh.triangles[0].normal().y < 0.0);
        assert!(mesh.triangles[1].normal().y < 0.0);

        let mut sp = cw_square();
        sp.auto_flip_normals();
        // First edge of the CW square is the left side, outward is -x
        let mesh = sp.wall(1.0, 5.0);
        assert!(mesh.triangles[0].normal().x < 0.0);
        assert!(mesh.triangles[1].normal().x < 0.0);
    }
}
