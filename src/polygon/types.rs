//! Core data model shared by the triangulation pipeline.

use crate::primitives::Point2;
use num_traits::Float;
use std::fmt::Display;

/// Edge tag of a vertex with no associated boundary edge.
pub const EDGE_NO_IDX: i32 = -1;

/// Vacant slot in validator scratch space.
pub const EDGE_INVALID: i32 = -2;

/// Edge tag of a halfedge interior to a triangulation.
pub const EDGE_INTERIOR: i32 = -3;

/// A polygon vertex.
///
/// Carries a planar position, a caller-supplied identity that is stable
/// through triangulation, and the tag of the boundary edge leaving this
/// vertex (or [`EDGE_NO_IDX`]). All real edge tags are non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolyVert<F> {
    /// Planar position.
    pub pos: Point2<F>,
    /// Caller-supplied vertex identity, preserved in the output triangles.
    pub idx: i32,
    /// Tag of the outgoing boundary edge.
    pub next_edge: i32,
}

impl<F: Float> PolyVert<F> {
    /// Creates a vertex with an outgoing boundary edge tag.
    #[inline]
    pub fn new(pos: Point2<F>, idx: i32, next_edge: i32) -> Self {
        Self {
            pos,
            idx,
            next_edge,
        }
    }
}

/// An ordered vertex loop, interpreted cyclically.
///
/// Outer boundaries wind counter-clockwise, holes clockwise.
pub type SimplePolygon<F> = Vec<PolyVert<F>>;

/// One or more boundary loops: an outer boundary with zero or more holes,
/// or several disjoint boundaries. Loops may touch at isolated vertices.
pub type Polygons<F> = Vec<SimplePolygon<F>>;

/// A directed edge between two vertex identities, carrying an edge tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeVerts {
    /// Origin vertex identity.
    pub first: i32,
    /// Destination vertex identity.
    pub second: i32,
    /// Boundary edge tag, or one of the sentinel values.
    pub edge: i32,
}

/// A triangle as a triple of vertex identities, wound the same way as the
/// containing polygon (counter-clockwise for positive boundaries).
pub type Triangle = [i32; 3];

/// Cyclic successor of `i` in a loop of `n` vertices.
#[inline]
pub(crate) fn next(i: usize, n: usize) -> usize {
    if i + 1 >= n {
        0
    } else {
        i + 1
    }
}

/// Cyclic predecessor of `i` in a loop of `n` vertices.
#[inline]
pub(crate) fn prev(i: usize, n: usize) -> usize {
    if i == 0 {
        n - 1
    } else {
        i - 1
    }
}

/// True when the two edge-tag pairs have a real tag in common.
pub(crate) fn shared_edge(edges0: [i32; 2], edges1: [i32; 2]) -> bool {
    (edges0[0] != EDGE_NO_IDX && (edges0[0] == edges1[0] || edges0[0] == edges1[1]))
        || (edges0[1] != EDGE_NO_IDX && (edges0[1] == edges1[0] || edges0[1] == edges1[1]))
}

/// Expands polygon loops into directed boundary halfedges.
///
/// Each halfedge runs from a vertex to its successor and carries the
/// origin's `next_edge` tag.
pub fn polygons_to_edges<F: Float>(polys: &Polygons<F>) -> Vec<EdgeVerts> {
    let mut halfedges = Vec::new();
    for poly in polys {
        if poly.is_empty() {
            continue;
        }
        for i in 1..poly.len() {
            halfedges.push(EdgeVerts {
                first: poly[i - 1].idx,
                second: poly[i].idx,
                edge: poly[i - 1].next_edge,
            });
        }
        halfedges.push(EdgeVerts {
            first: poly[poly.len() - 1].idx,
            second: poly[0].idx,
            edge: poly[poly.len() - 1].next_edge,
        });
    }
    halfedges
}

/// Expands triangles into directed halfedges tagged [`EDGE_INTERIOR`].
pub fn triangles_to_edges(triangles: &[Triangle]) -> Vec<EdgeVerts> {
    let mut halfedges = Vec::with_capacity(triangles.len() * 3);
    for tri in triangles {
        halfedges.push(EdgeVerts {
            first: tri[0],
            second: tri[1],
            edge: EDGE_INTERIOR,
        });
        halfedges.push(EdgeVerts {
            first: tri[1],
            second: tri[2],
            edge: EDGE_INTERIOR,
        });
        halfedges.push(EdgeVerts {
            first: tri[2],
            second: tri[0],
            edge: EDGE_INTERIOR,
        });
    }
    halfedges
}

/// Logs a polygon set as copy-pasteable construction code.
///
/// Intended for bug reports: enable debug logging, reproduce the failure,
/// and paste the output into a test. Emitted at `debug` level.
pub fn dump<F: Float + Display>(polys: &Polygons<F>) {
    for poly in polys {
        log::debug!("polys.push(vec![");
        for v in poly {
            log::debug!(
                "    PolyVert::new(Point2::new({}, {}), {}, {}),",
                v.pos.x,
                v.pos.y,
                v.idx,
                v.next_edge
            );
        }
        log::debug!("]);");
    }
}
