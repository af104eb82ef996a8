//! Wall extrusion and bevel miter generation for a single segment.
//!
//! Both generators walk the segment slice by slice (see
//! [`Segment::subdivide`]) and emit two triangles per slice. A line is just
//! the one-slice case of the same formulas.

use tracing::{debug, trace, warn};

use crate::error::MeshError;
use crate::geometry::{Point, Triangle3};
use crate::intersect::segment_intersection;
use crate::segment::{Segment, SegmentMesh};

/// Bevel inputs shared by every slice of a segment.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BevelParams {
    pub height: f64,
    pub offset: f64,
    pub degrees: f64,
    pub max_degrees: f64,
    pub flip_normals: bool,
}

/// Vertical extrusion from z = 0 up to `height`.
///
/// Each slice `p0 -> p1` becomes the quad
/// `[p0@0, p1@0, p1@height, p0@height]`, split along `p0@0 - p1@height`.
pub(crate) fn wall(seg: &Segment, height: f64, max_degrees: f64, flip: bool) -> SegmentMesh {
    let ts = seg.subdivide(max_degrees);
    let mut mesh = SegmentMesh {
        triangles: Vec::with_capacity(2 * ts.len()),
        contour: Vec::with_capacity(ts.len()),
    };

    for w in ts.windows(2) {
        let p0 = seg.at(w[0]);
        let p1 = seg.at(w[1]);

        mesh.triangles.push(
            Triangle3::new(p0.at_z(0.0), p1.at_z(height), p0.at_z(height)).oriented(flip),
        );
        mesh.triangles.push(
            Triangle3::new(p0.at_z(0.0), p1.at_z(0.0), p1.at_z(height)).oriented(flip),
        );
        mesh.contour.push(p1);
    }

    mesh
}

/// Angled skirt from z = `height` outward by `offset`, rising to
/// `height + offset * tan(degrees)`.
///
/// # Miter joins
///
/// Interior slice boundaries use the plain offset normal. The first and last
/// boundary are mitered against the neighbouring segment: the direction
/// becomes the bisector of the two normals and the length grows to
/// `offset / cos(angle / 2)` so the skirt keeps its width through the corner.
///
/// # Folded slices
///
/// If the two offset edges of a slice cross, the quad would fold over
/// itself. At the first or last slice this is patched with one triangle;
/// anywhere else it's [`MeshError::InteriorSelfIntersection`].
pub(crate) fn bevel(
    seg: &Segment,
    params: &BevelParams,
    prev_normal: Point,
    next_normal: Point,
) -> Result<SegmentMesh, MeshError> {
    let ts = seg.subdivide(params.max_degrees);
    let slices = ts.len() - 1;
    let bottom = params.height;
    let top = params.height + params.offset * params.degrees.to_radians().tan();

    let mut mesh = SegmentMesh {
        triangles: Vec::with_capacity(2 * slices),
        contour: Vec::with_capacity(slices),
    };

    for (i, w) in ts.windows(2).enumerate() {
        let first = i == 0;
        let last = i + 1 == slices;

        let p0 = seg.at(w[0]);
        let p1 = seg.at(w[1]);
        let mut n0 = seg.normalized_normal(w[0]);
        let mut n1 = seg.normalized_normal(w[1]);
        if params.flip_normals {
            n0 = -n0;
            n1 = -n1;
        }

        let (n0, len0) = if first { miter(n0, prev_normal, params.offset) } else { (n0, params.offset) };
        let (n1, len1) = if last { miter(n1, next_normal, params.offset) } else { (n1, params.offset) };

        let p2 = p0 + n0 * len0;
        let p3 = p1 + n1 * len1;

        let Some(hit) = segment_intersection(p0, p2, p1, p3) else {
            mesh.triangles.push(
                Triangle3::new(p0.at_z(bottom), p3.at_z(top), p2.at_z(top))
                    .oriented(params.flip_normals),
            );
            mesh.triangles.push(
                Triangle3::new(p0.at_z(bottom), p1.at_z(bottom), p3.at_z(top))
                    .oriented(params.flip_normals),
            );
            mesh.contour.push(p3);
            continue;
        };

        if last {
            // End of the segment: keep p3, it's this segment's contour point
            warn!(slice = i, ?hit, "bevel slice folds at segment end, patching");
            mesh.triangles.push(
                Triangle3::new(p0.at_z(bottom), p1.at_z(bottom), p3.at_z(top))
                    .oriented(params.flip_normals),
            );
            mesh.contour.push(p3);
        } else if first {
            // p2 is the previous segment's last contour point already
            warn!(slice = i, ?hit, "bevel slice folds at segment start, patching");
            mesh.triangles.push(
                Triangle3::new(p0.at_z(bottom), p1.at_z(bottom), p2.at_z(top))
                    .oriented(params.flip_normals),
            );
        } else {
            return Err(MeshError::InteriorSelfIntersection { ring: 0, segment: 0, slice: i });
        }
    }

    trace!(slices, triangles = mesh.triangles.len(), "bevel segment done");
    Ok(mesh)
}

/// Miter an end normal against its neighbour's normal.
///
/// Returns the new direction and the offset length along it. Equal normals
/// (a straight joint) are returned unchanged.
pub(crate) fn miter(normal: Point, neighbour: Point, offset: f64) -> (Point, f64) {
    if normal == neighbour {
        return (normal, offset);
    }

    let bisector = (normal + neighbour).normalize();
    if bisector == Point::default() {
        // Normals point in opposite directions: a full U-turn has no miter
        warn!(?normal, ?neighbour, "opposite normals at joint, skipping miter");
        return (normal, offset);
    }

    let angle = neighbour.angle_to(normal);
    let length = offset / (0.5 * angle).cos();
    debug!(?normal, ?neighbour, angle, length, "mitering joint");
    (bisector, length)
}

// ============================================================================
// TESTS
// ============================================================================
