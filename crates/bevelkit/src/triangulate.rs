//! Cap triangulation: turning floor and bevel contours into flat faces.
//!
//! The actual polygon-with-holes triangulation sits behind the
//! [`Triangulator`] trait so callers can swap in their own. The default is
//! [`EarcutTriangulator`], built on `earcutr`.

use tracing::debug;

use crate::error::MeshError;
use crate::geometry::{Point, Triangle3};

/// A constrained polygon triangulator.
///
/// Takes one outer contour plus zero or more holes strictly inside it and
/// returns triangles over the filled region.
pub trait Triangulator {
    fn triangulate(&self, outer: &[Point], holes: &[Vec<Point>]) -> Result<Vec<[Point; 3]>, MeshError>;
}

/// Ear-clipping triangulator (via `earcutr`).
#[derive(Debug, Clone, Copy, Default)]
pub struct EarcutTriangulator;

impl Triangulator for EarcutTriangulator {
    fn triangulate(&self, outer: &[Point], holes: &[Vec<Point>]) -> Result<Vec<[Point; 3]>, MeshError> {
        if outer.len() < 3 {
            return Ok(Vec::new());
        }

        // earcut wants one flat coordinate buffer with holes appended after
        // the outer ring, plus the vertex index where each hole starts.
        let mut vertices: Vec<Point> = Vec::with_capacity(outer.len());
        vertices.extend_from_slice(outer);
        let mut hole_starts = Vec::with_capacity(holes.len());
        for hole in holes.iter().filter(|h| h.len() >= 3) {
            hole_starts.push(vertices.len());
            vertices.extend_from_slice(hole);
        }
        let coords: Vec<f64> = vertices.iter().flat_map(|p| [p.x, p.y]).collect();

        let indices = earcutr::earcut(&coords, &hole_starts, 2).map_err(|_| {
            MeshError::Triangulation(format!(
                "earcut rejected contour of {} points with {} holes",
                outer.len(),
                hole_starts.len()
            ))
        })?;

        Ok(indices
            .chunks_exact(3)
            .map(|c| [vertices[c[0]], vertices[c[1]], vertices[c[2]]])
            .collect())
    }
}

/// Lift 2D triangles onto the plane `z` and append them to `out`.
pub fn lift_triangles(triangles: &[[Point; 3]], z: f64, out: &mut Vec<Triangle3>) {
    out.extend(
        triangles
            .iter()
            .map(|[a, b, c]| Triangle3::new(a.at_z(z), b.at_z(z), c.at_z(z))),
    );
}

/// One triangulator call in the making: an outer contour, its holes, and
/// the plane the result is lifted to.
#[derive(Debug, Clone, PartialEq)]
pub struct FillSession {
    outer: Vec<Point>,
    holes: Vec<Vec<Point>>,
    z: f64,
}

impl FillSession {
    pub fn open(outer: Vec<Point>, z: f64) -> Self {
        Self { outer, holes: Vec::new(), z }
    }

    pub fn add_hole(&mut self, hole: Vec<Point>) {
        self.holes.push(hole);
    }

    /// Plane the cap is lifted to.
    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn hole_count(&self) -> usize {
        self.holes.len()
    }

    /// Triangulate and append the lifted faces to `out`.
    pub fn finish(self, triangulator: &dyn Triangulator, out: &mut Vec<Triangle3>) -> Result<(), MeshError> {
        let triangles = triangulator.triangulate(&self.outer, &self.holes)?;
        debug!(
            points = self.outer.len(),
            holes = self.holes.len(),
            triangles = triangles.len(),
            z = self.z,
            "cap triangulated"
        );
        lift_triangles(&triangles, self.z, out);
        Ok(())
    }
}
