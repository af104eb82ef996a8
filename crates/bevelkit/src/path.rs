//! Path: a set of rings, some of which may be holes in others.
//!
//! Walls and bevels are generated ring by ring. Caps are trickier: the
//! triangulator takes one outer contour plus its holes per call, so rings
//! are batched into "outer + contained holes" runs before triangulating.
//!
//! ## Hole detection
//!
//! A ring counts as a hole when its bounding box sits inside the FIRST
//! ring's bounding box. That's a heuristic: sibling rings whose boxes
//! happen to nest get misread as holes, and true holes whose boxes poke out
//! don't. Run [`Path::auto_flip_normals`] first so the largest ring leads.

use tracing::debug;

use crate::config::ExtrudeConfig;
use crate::error::MeshError;
use crate::geometry::{Rect, Triangle3};
use crate::subpath::{RingMesh, SubPath};
use crate::triangulate::{FillSession, Triangulator};

/// An ordered collection of rings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    pub sub_paths: Vec<SubPath>,
}

impl Path {
    pub fn new(sub_paths: Vec<SubPath>) -> Self {
        Self { sub_paths }
    }

    /// Union of all ring bounding boxes.
    pub fn bbox(&self) -> Rect {
        let mut iter = self.sub_paths.iter();
        let Some(first) = iter.next() else {
            return Rect::default();
        };
        iter.fold(first.bbox(), |acc, sp| acc.join(&sp.bbox()))
    }

    /// Orient every ring from the outer ring's point of view.
    ///
    /// Rings are sorted by bounding box area, largest first. The largest is
    /// marked as the outer ring and decides for itself; if it flips, every
    /// other ring is flipped too so holes stay opposite to the boundary.
    pub fn auto_flip_normals(&mut self) {
        if self.sub_paths.is_empty() {
            return;
        }
        self.sub_paths
            .sort_by(|a, b| b.bbox().area().total_cmp(&a.bbox().area()));

        let (outer, rest) = self.sub_paths.split_at_mut(1);
        let outer = &mut outer[0];
        outer.is_outer = true;
        outer.auto_flip_normals();
        if outer.flip_normals {
            for sp in rest {
                sp.flip_normals = true;
            }
        }
    }

    /// Walls for every ring plus the triangulated floor caps at z = 0.
    pub fn wall(
        &self,
        height: f64,
        max_degrees: f64,
        triangulator: &dyn Triangulator,
    ) -> Result<Vec<Triangle3>, MeshError> {
        self.assemble(triangulator, |sp| Ok(sp.wall(height, max_degrees)))
    }

    /// Bevels for every ring plus the triangulated caps on the bevel top.
    pub fn bevel(
        &self,
        height: f64,
        offset: f64,
        degrees: f64,
        max_degrees: f64,
        triangulator: &dyn Triangulator,
    ) -> Result<Vec<Triangle3>, MeshError> {
        self.assemble(triangulator, |sp| sp.bevel(height, offset, degrees, max_degrees))
    }

    /// Full solid: optional auto-orientation, then walls, floor, bevel and
    /// bevel cap in one triangle list.
    pub fn extrude(
        &mut self,
        config: &ExtrudeConfig,
        triangulator: &dyn Triangulator,
    ) -> Result<Vec<Triangle3>, MeshError> {
        if config.auto_flip_normals {
            self.auto_flip_normals();
        }
        let mut triangles = self.wall(config.height, config.max_angle_degrees, triangulator)?;
        triangles.extend(self.bevel(
            config.height,
            config.bevel_offset,
            config.bevel_angle_degrees,
            config.max_angle_degrees,
            triangulator,
        )?);
        Ok(triangles)
    }

    /// Run `generate` on each ring, collecting its faces directly and
    /// batching its contour into fill sessions.
    ///
    /// The first ring opens a session. Each later ring either joins it as a
    /// hole (box inside the first ring's box) or closes it and opens a new
    /// one. Every session is lifted to the first ring's cap height.
    fn assemble<F>(&self, triangulator: &dyn Triangulator, mut generate: F) -> Result<Vec<Triangle3>, MeshError>
    where
        F: FnMut(&SubPath) -> Result<RingMesh, MeshError>,
    {
        let mut out = Vec::new();
        let Some(first) = self.sub_paths.first() else {
            return Ok(out);
        };
        let first_bbox = first.bbox();

        let mut session: Option<FillSession> = None;

        for (i, sp) in self.sub_paths.iter().enumerate() {
            let ring = generate(sp).map_err(|e| e.in_ring(i))?;
            out.extend(ring.triangles);

            let Some(open) = session.as_mut() else {
                debug!(points = ring.contour.len(), rings = self.sub_paths.len(), "opening cap session");
                session = Some(FillSession::open(ring.contour, ring.z));
                continue;
            };

            if first_bbox.contains(&sp.bbox()) {
                debug!(ring = i, points = ring.contour.len(), "adding hole");
                open.add_hole(ring.contour);
            } else {
                debug!(ring = i, holes = open.hole_count(), "ring outside the first ring, starting a new cap");
                let z = open.z();
                let done = std::mem::replace(open, FillSession::open(ring.contour, z));
                done.finish(triangulator, &mut out)?;
            }
        }

        if let Some(done) = session {
            done.finish(triangulator, &mut out)?;
        }
        Ok(out)
    }
}

impl From<Vec<SubPath>> for Path {
    fn from(sub_paths: Vec<SubPath>) -> Self {
        Path::new(sub_paths)
    }
}

// ============================================================================
// TESTS
// ============================================================================
