//! Error types for triangulation operations.

use thiserror::Error;

/// Errors that can occur while assembling, triangulating, or validating
/// polygons.
///
/// Runtime errors describe problems with the input or the produced
/// triangulation and are recoverable by the caller (the top-level
/// [`triangulate`](crate::triangulate) retries through the backup
/// triangulator once). Logic errors indicate a broken invariant inside the
/// sweep or the monotone triangulator; they are never repaired in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TriangulateError {
    /// A vertex appears as the origin of more than one directed edge.
    #[error("polygon has duplicate vertices")]
    DuplicateVertices,

    /// An edge chain has no continuation and cannot close into a loop.
    #[error("nonmanifold edge")]
    NonmanifoldEdge,

    /// The halfedge set has an odd number of entries.
    #[error("odd number of halfedges")]
    OddHalfedgeCount,

    /// Fewer than half of the halfedges point in the forward direction.
    #[error("half of halfedges should be forward")]
    HalfShouldBeForward,

    /// Fewer than half of the halfedges point in the backward direction.
    #[error("half of halfedges should be backward")]
    HalfShouldBeBackward,

    /// A forward halfedge has no matching backward partner.
    #[error("forward and backward edges do not match")]
    ForwardBackwardMismatch,

    /// An undirected edge is shared by more than two halfedges.
    #[error("not a 2-manifold")]
    NotManifold,

    /// The triangulation bridged two vertices that already lie on the same
    /// polygon edge.
    #[error("added an interface edge")]
    InterfaceEdgeAdded,

    /// Two triangles bend across their shared edge in opposite senses.
    #[error("triangulation is folded")]
    TriangulationFolded,

    /// A monotone loop degenerated to two edges.
    #[error("two-edge monotone")]
    TwoEdgeMonotone,

    /// The left/right neighbor pointers of a sweep vertex disagree.
    #[error("monotone vertex neighbors disagree")]
    NeighborsDisagree,

    /// The sweep terminated on an event other than an end vertex.
    #[error("monotones did not finish with an end")]
    DidNotFinishWithEnd,

    /// The monotone triangulators emitted the wrong number of triangles.
    #[error("triangulation produced wrong number of triangles")]
    WrongTriangleCount,
}

impl TriangulateError {
    /// Returns true for errors that indicate a broken internal invariant
    /// rather than a problem with the input.
    pub fn is_logic_error(&self) -> bool {
        matches!(
            self,
            TriangulateError::TwoEdgeMonotone
                | TriangulateError::NeighborsDisagree
                | TriangulateError::DidNotFinishWithEnd
                | TriangulateError::WrongTriangleCount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logic_error_classification() {
        assert!(TriangulateError::TwoEdgeMonotone.is_logic_error());
        assert!(TriangulateError::WrongTriangleCount.is_logic_error());
        assert!(!TriangulateError::DuplicateVertices.is_logic_error());
        assert!(!TriangulateError::TriangulationFolded.is_logic_error());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            TriangulateError::NotManifold.to_string(),
            "not a 2-manifold"
        );
        assert_eq!(
            TriangulateError::NonmanifoldEdge.to_string(),
            "nonmanifold edge"
        );
    }
}
