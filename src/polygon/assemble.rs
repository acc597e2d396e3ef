//! Reconstruction of polygon loops from directed edges.

use crate::error::TriangulateError;
use crate::polygon::types::{EdgeVerts, PolyVert, Polygons, SimplePolygon};
use crate::primitives::Point2;
use num_traits::Float;
use std::collections::BTreeMap;

/// Assembles an unordered set of directed edges into closed polygon loops.
///
/// Every vertex may appear as the origin of at most one edge. Chains are
/// followed origin-to-destination until they close, then the next loop is
/// started from the lowest remaining vertex identity, so the output order
/// is deterministic.
///
/// The positions of the returned vertices are unknown to this function and
/// are set to infinity; only identities and edge tags are meaningful.
///
/// # Errors
///
/// [`TriangulateError::DuplicateVertices`] when a vertex originates two
/// edges, [`TriangulateError::NonmanifoldEdge`] when a chain has no
/// continuation.
///
/// # Example
///
/// ```
/// use monotri::{assemble, EdgeVerts, EDGE_NO_IDX};
///
/// let edges = vec![
///     EdgeVerts { first: 0, second: 1, edge: EDGE_NO_IDX },
///     EdgeVerts { first: 1, second: 2, edge: EDGE_NO_IDX },
///     EdgeVerts { first: 2, second: 0, edge: EDGE_NO_IDX },
/// ];
/// let polys = assemble::<f64>(&edges).unwrap();
/// assert_eq!(polys.len(), 1);
/// assert_eq!(polys[0].len(), 3);
/// ```
pub fn assemble<F: Float>(halfedges: &[EdgeVerts]) -> Result<Polygons<F>, TriangulateError> {
    let mut vert_edge: BTreeMap<i32, usize> = BTreeMap::new();
    for (i, halfedge) in halfedges.iter().enumerate() {
        if vert_edge.insert(halfedge.first, i).is_some() {
            return Err(TriangulateError::DuplicateVertices);
        }
    }

    let mut polys = Polygons::new();
    loop {
        let start = match vert_edge.values().next() {
            Some(&i) => i,
            None => break,
        };
        let mut poly = SimplePolygon::new();
        let mut this_edge = start;
        loop {
            poly.push(PolyVert::new(
                Point2::new(F::infinity(), F::infinity()),
                halfedges[this_edge].first,
                halfedges[this_edge].edge,
            ));
            let next_edge = vert_edge
                .remove(&halfedges[this_edge].second)
                .ok_or(TriangulateError::NonmanifoldEdge)?;
            if next_edge == start {
                break;
            }
            this_edge = next_edge;
        }
        polys.push(poly);
    }
    Ok(polys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::types::{polygons_to_edges, EDGE_NO_IDX};

    fn edge(first: i32, second: i32) -> EdgeVerts {
        EdgeVerts {
            first,
            second,
            edge: EDGE_NO_IDX,
        }
    }

    #[test]
    fn test_single_loop() {
        let edges = vec![edge(2, 0), edge(0, 1), edge(1, 2)];
        let polys = assemble::<f64>(&edges).unwrap();
        assert_eq!(polys.len(), 1);
        let ids: Vec<i32> = polys[0].iter().map(|v| v.idx).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_two_loops() {
        let edges = vec![
            edge(0, 1),
            edge(1, 2),
            edge(2, 0),
            edge(10, 11),
            edge(11, 12),
            edge(12, 10),
        ];
        let polys = assemble::<f64>(&edges).unwrap();
        assert_eq!(polys.len(), 2);
        assert_eq!(polys[0].len(), 3);
        assert_eq!(polys[1].len(), 3);
        assert_eq!(polys[0][0].idx, 0);
        assert_eq!(polys[1][0].idx, 10);
    }

    #[test]
    fn test_duplicate_origin_fails() {
        let edges = vec![edge(0, 1), edge(0, 2), edge(1, 0)];
        assert_eq!(
            assemble::<f64>(&edges),
            Err(TriangulateError::DuplicateVertices)
        );
    }

    #[test]
    fn test_broken_chain_fails() {
        let edges = vec![edge(0, 1), edge(1, 5)];
        assert_eq!(
            assemble::<f64>(&edges),
            Err(TriangulateError::NonmanifoldEdge)
        );
    }

    #[test]
    fn test_round_trip_preserves_loops() {
        let polys: Polygons<f64> = vec![
            vec![
                PolyVert::new(Point2::new(0.0, 0.0), 4, 0),
                PolyVert::new(Point2::new(1.0, 0.0), 7, 1),
                PolyVert::new(Point2::new(0.0, 1.0), 2, 2),
            ],
            vec![
                PolyVert::new(Point2::new(2.0, 2.0), 9, 3),
                PolyVert::new(Point2::new(3.0, 2.0), 8, 4),
                PolyVert::new(Point2::new(2.0, 3.0), 5, 5),
            ],
        ];
        let reassembled = assemble::<f64>(&polygons_to_edges(&polys)).unwrap();
        assert_eq!(reassembled.len(), 2);
        // Loops come back intact up to cyclic rotation; compare as rotations
        // of the identity sequence.
        for poly in &polys {
            let ids: Vec<i32> = poly.iter().map(|v| v.idx).collect();
            let found = reassembled.iter().any(|loop_verts| {
                let got: Vec<i32> = loop_verts.iter().map(|v| v.idx).collect();
                got.len() == ids.len()
                    && (0..ids.len()).any(|shift| {
                        (0..ids.len()).all(|i| got[i] == ids[(i + shift) % ids.len()])
                    })
            });
            assert!(found, "loop {:?} not reassembled", ids);
        }
    }

    #[test]
    fn test_edge_tags_follow_vertices() {
        let edges = vec![
            EdgeVerts {
                first: 0,
                second: 1,
                edge: 42,
            },
            EdgeVerts {
                first: 1,
                second: 0,
                edge: 43,
            },
        ];
        // Two-vertex loop: legal for assembly even though it cannot be
        // triangulated.
        let polys = assemble::<f64>(&edges).unwrap();
        assert_eq!(polys[0][0].next_edge, 42);
        assert_eq!(polys[0][1].next_edge, 43);
    }
}
