//! # bevelkit
//!
//! Mesh generation for raised map features: vertical walls plus a mitered
//! bevel along closed outlines made of straight lines and cubic Béziers,
//! with triangulated floor and bevel caps.
//!
//! ## Pipeline
//!
//! ```text
//! Segment (line | curve) -> SubPath (closed ring) -> Path (rings + holes)
//!        \ wall / bevel slices        \ contours        \ caps via Triangulator
//! ```
//!
//! ## Rust Lesson #7: Modules
//!
//! Every module is declared here. `extrude` stays private: siblings reach
//! it through `crate::extrude`, callers go through [`Segment::wall`] and
//! [`Segment::bevel`].

pub mod config;
pub mod error;
mod extrude;
pub mod geometry;
pub mod intersect;
pub mod path;
pub mod segment;
pub mod subpath;
pub mod svg;
pub mod triangulate;

// Re-export common types at crate root for convenience.
pub use config::ExtrudeConfig;
pub use error::MeshError;
pub use geometry::{Point, Point3, Rect, Triangle3};
pub use intersect::{segment_intersection, segments_intersect};
pub use path::Path;
pub use segment::{Curve, Line, Segment, SegmentMesh, MIN_PARAM_STEP};
pub use subpath::{RingMesh, SubPath};
pub use svg::{path_from_svg_data, paths_from_svg, SvgError};
pub use triangulate::{lift_triangles, EarcutTriangulator, FillSession, Triangulator};
