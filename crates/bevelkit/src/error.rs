//! Error type for mesh generation.
//!
//! Most geometric trouble is repaired locally (degenerate control points,
//! runaway subdivision, a folded miter at a segment end) and only shows up
//! as a `tracing` warning. What's left here can't be repaired.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    /// A bevel slice folds over itself away from either segment end.
    ///
    /// There's no local patch for this; use a smaller offset or a finer
    /// `max_angle_degrees`. `segment` and `ring` are filled in as the error
    /// travels up through `SubPath` and `Path`.
    #[error("bevel self-intersection inside ring {ring}, segment {segment}, slice {slice}")]
    InteriorSelfIntersection {
        ring: usize,
        segment: usize,
        slice: usize,
    },

    /// The triangulator could not fill a floor or bevel contour.
    #[error("triangulation failed: {0}")]
    Triangulation(String),
}

impl MeshError {
    /// Tag the error with the index of the segment it came from.
    pub fn in_segment(self, index: usize) -> Self {
        match self {
            MeshError::InteriorSelfIntersection { ring, slice, .. } => {
                MeshError::InteriorSelfIntersection { ring, segment: index, slice }
            }
            other => other,
        }
    }

    /// Tag the error with the index of the ring it came from.
    pub fn in_ring(self, index: usize) -> Self {
        match self {
            MeshError::InteriorSelfIntersection { segment, slice, .. } => {
                MeshError::InteriorSelfIntersection { ring: index, segment, slice }
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_is_filled_in_on_the_way_up() {
        let err = MeshError::InteriorSelfIntersection { ring: 0, segment: 0, slice: 3 }
            .in_segment(2)
            .in_ring(1);
        assert_eq!(
            err,
            MeshError::InteriorSelfIntersection { ring: 1, segment: 2, slice: 3 }
        );
        assert_eq!(
            err.to_string(),
            "bevel self-intersection inside ring 1, segment 2, slice 3"
        );
    }

    #[test]
    fn triangulation_errors_pass_through() {
        let err = MeshError::Triangulation("bad".into()).in_segment(4).in_ring(5);
        assert_eq!(err, MeshError::Triangulation("bad".into()));
    }
}
