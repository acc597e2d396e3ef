//! Manifold and fold validation of triangulations.
//!
//! A triangulation is accepted only when its halfedges, together with the
//! reversed boundary halfedges of the input, pair into a 2-manifold, and
//! when adjacent triangles bend consistently across every interior edge.

use crate::error::TriangulateError;
use crate::polygon::types::{
    polygons_to_edges, shared_edge, triangles_to_edges, EdgeVerts, Polygons, Triangle,
    EDGE_INTERIOR, EDGE_INVALID,
};
use crate::primitives::Point2;
use crate::tolerance::ccw;
use num_traits::Float;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Checks that a halfedge multiset forms a 2-manifold.
///
/// Every undirected edge must appear exactly once in each direction, and
/// no interior edge may bridge two vertices that already lie on the same
/// polygon edge (tracked through the non-interior edge tags).
pub fn check_manifold_halfedges(halfedges: &[EdgeVerts]) -> Result<(), TriangulateError> {
    if halfedges.len() % 2 != 0 {
        return Err(TriangulateError::OddHalfedgeCount);
    }
    let n_edges = halfedges.len() / 2;

    let mut forward: Vec<EdgeVerts> = halfedges
        .iter()
        .copied()
        .filter(|e| e.second > e.first)
        .collect();
    if forward.len() != n_edges {
        return Err(TriangulateError::HalfShouldBeForward);
    }
    let mut backward: Vec<EdgeVerts> = halfedges
        .iter()
        .copied()
        .filter(|e| e.second < e.first)
        .collect();
    if backward.len() != n_edges {
        return Err(TriangulateError::HalfShouldBeBackward);
    }
    for e in &mut backward {
        std::mem::swap(&mut e.first, &mut e.second);
    }
    forward.sort_unstable_by_key(|e| (e.first, e.second));
    backward.sort_unstable_by_key(|e| (e.first, e.second));

    for i in 0..n_edges {
        if forward[i].first != backward[i].first || forward[i].second != backward[i].second {
            return Err(TriangulateError::ForwardBackwardMismatch);
        }
        if i > 0 {
            if forward[i - 1].first == forward[i].first
                && forward[i - 1].second == forward[i].second
            {
                return Err(TriangulateError::NotManifold);
            }
            if backward[i - 1].first == backward[i].first
                && backward[i - 1].second == backward[i].second
            {
                return Err(TriangulateError::NotManifold);
            }
        }
    }

    // Collect the (up to two) boundary edge tags incident to each vertex.
    let mut vert_edges: BTreeMap<i32, [i32; 2]> = BTreeMap::new();
    for halfedge in halfedges {
        if halfedge.edge == EDGE_INTERIOR {
            continue;
        }
        for &vert in &[halfedge.first, halfedge.second] {
            match vert_edges.entry(vert) {
                Entry::Vacant(entry) => {
                    entry.insert([halfedge.edge, EDGE_INVALID]);
                }
                Entry::Occupied(mut entry) => {
                    entry.get_mut()[1] = halfedge.edge;
                }
            }
        }
    }
    for i in 0..n_edges {
        if forward[i].edge == EDGE_INTERIOR && backward[i].edge == EDGE_INTERIOR {
            if let (Some(&tags0), Some(&tags1)) = (
                vert_edges.get(&forward[i].first),
                vert_edges.get(&forward[i].second),
            ) {
                if shared_edge(tags0, tags1) {
                    return Err(TriangulateError::InterfaceEdgeAdded);
                }
            }
        }
    }
    Ok(())
}

/// Checks that `triangles` and the boundary of `polys` together form a
/// 2-manifold.
///
/// Triangle halfedges are tagged interior; the boundary halfedges are
/// added reversed so that each boundary edge pairs with exactly one
/// triangle edge.
pub fn check_manifold<F: Float>(
    triangles: &[Triangle],
    polys: &Polygons<F>,
) -> Result<(), TriangulateError> {
    let mut halfedges = triangles_to_edges(triangles);
    for e in polygons_to_edges(polys) {
        halfedges.push(EdgeVerts {
            first: e.second,
            second: e.first,
            edge: e.edge,
        });
    }
    check_manifold_halfedges(&halfedges)
}

/// Checks that no pair of adjacent triangles is folded.
///
/// For every interior edge with a triangle on both sides, the two opposite
/// vertices must lie on opposite sides of the edge (or on it, within the
/// tolerance of [`ccw`]); a negative product of the two orientations means
/// the triangulation doubles back over itself.
pub fn check_folded<F: Float>(
    triangles: &[Triangle],
    polys: &Polygons<F>,
) -> Result<(), TriangulateError> {
    // Halfedges annotated with the opposite vertex, or -1 for boundary.
    let mut halfedges: Vec<[i32; 3]> = Vec::new();
    let mut vert_pos: BTreeMap<i32, Point2<F>> = BTreeMap::new();
    for tri in triangles {
        halfedges.push([tri[0], tri[1], tri[2]]);
        halfedges.push([tri[1], tri[2], tri[0]]);
        halfedges.push([tri[2], tri[0], tri[1]]);
    }
    for poly in polys {
        if poly.is_empty() {
            continue;
        }
        vert_pos.insert(poly[0].idx, poly[0].pos);
        for i in 1..poly.len() {
            halfedges.push([poly[i].idx, poly[i - 1].idx, -1]);
            vert_pos.insert(poly[i].idx, poly[i].pos);
        }
        halfedges.push([poly[0].idx, poly[poly.len() - 1].idx, -1]);
    }

    let mut forward: Vec<[i32; 3]> = halfedges.iter().copied().filter(|e| e[1] > e[0]).collect();
    let mut backward: Vec<[i32; 3]> = halfedges.iter().copied().filter(|e| e[1] < e[0]).collect();
    for e in &mut backward {
        e.swap(0, 1);
    }
    forward.sort_unstable_by_key(|e| (e[0], e[1]));
    backward.sort_unstable_by_key(|e| (e[0], e[1]));

    let pos = |idx: i32| {
        vert_pos
            .get(&idx)
            .copied()
            .unwrap_or_else(Point2::origin)
    };
    for (fwd, bwd) in forward.iter().zip(&backward) {
        if fwd[2] >= 0 && bwd[2] >= 0 {
            let origin = pos(fwd[0]);
            let dest = pos(fwd[1]);
            let opp_left = pos(fwd[2]);
            let opp_right = pos(bwd[2]);
            let ccw_left = ccw(origin, opp_left, dest);
            let ccw_right = ccw(origin, dest, opp_right);
            if ccw_left * ccw_right < 0 {
                return Err(TriangulateError::TriangulationFolded);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::types::{PolyVert, EDGE_NO_IDX};

    fn square_polys() -> Polygons<f64> {
        vec![vec![
            PolyVert::new(Point2::new(0.0, 0.0), 0, 0),
            PolyVert::new(Point2::new(1.0, 0.0), 1, 1),
            PolyVert::new(Point2::new(1.0, 1.0), 2, 2),
            PolyVert::new(Point2::new(0.0, 1.0), 3, 3),
        ]]
    }

    #[test]
    fn test_square_diagonal_is_manifold() {
        let triangles: Vec<Triangle> = vec![[0, 1, 2], [0, 2, 3]];
        check_manifold(&triangles, &square_polys()).unwrap();
        check_folded(&triangles, &square_polys()).unwrap();
    }

    #[test]
    fn test_odd_halfedge_count() {
        let halfedges = vec![EdgeVerts {
            first: 0,
            second: 1,
            edge: EDGE_NO_IDX,
        }];
        assert_eq!(
            check_manifold_halfedges(&halfedges),
            Err(TriangulateError::OddHalfedgeCount)
        );
    }

    #[test]
    fn test_unbalanced_directions() {
        let halfedges = vec![
            EdgeVerts {
                first: 0,
                second: 1,
                edge: EDGE_NO_IDX,
            },
            EdgeVerts {
                first: 2,
                second: 3,
                edge: EDGE_NO_IDX,
            },
        ];
        assert_eq!(
            check_manifold_halfedges(&halfedges),
            Err(TriangulateError::HalfShouldBeForward)
        );
    }

    #[test]
    fn test_mismatched_pairing() {
        let halfedges = vec![
            EdgeVerts {
                first: 0,
                second: 1,
                edge: EDGE_NO_IDX,
            },
            EdgeVerts {
                first: 3,
                second: 2,
                edge: EDGE_NO_IDX,
            },
        ];
        assert_eq!(
            check_manifold_halfedges(&halfedges),
            Err(TriangulateError::ForwardBackwardMismatch)
        );
    }

    #[test]
    fn test_edge_shared_three_ways() {
        // The edge {0, 1} appears twice forward and twice backward.
        let halfedges = vec![
            EdgeVerts {
                first: 0,
                second: 1,
                edge: EDGE_NO_IDX,
            },
            EdgeVerts {
                first: 0,
                second: 1,
                edge: EDGE_NO_IDX,
            },
            EdgeVerts {
                first: 1,
                second: 0,
                edge: EDGE_NO_IDX,
            },
            EdgeVerts {
                first: 1,
                second: 0,
                edge: EDGE_NO_IDX,
            },
        ];
        assert_eq!(
            check_manifold_halfedges(&halfedges),
            Err(TriangulateError::NotManifold)
        );
    }

    #[test]
    fn test_missing_boundary_pairing_fails() {
        // Triangle edges with no reversed boundary to pair against.
        let triangles: Vec<Triangle> = vec![[0, 1, 2]];
        let halfedges = triangles_to_edges(&triangles);
        assert!(check_manifold_halfedges(&halfedges).is_err());
    }

    #[test]
    fn test_interior_bridge_of_boundary_edge() {
        // Two triangles over a square whose diagonal endpoints both carry
        // the same boundary tag: the diagonal becomes an interface edge.
        let polys: Polygons<f64> = vec![vec![
            PolyVert::new(Point2::new(0.0, 0.0), 0, 9),
            PolyVert::new(Point2::new(1.0, 0.0), 1, 1),
            PolyVert::new(Point2::new(1.0, 1.0), 2, 9),
            PolyVert::new(Point2::new(0.0, 1.0), 3, 3),
        ]];
        let triangles: Vec<Triangle> = vec![[0, 1, 2], [0, 2, 3]];
        assert_eq!(
            check_manifold(&triangles, &polys),
            Err(TriangulateError::InterfaceEdgeAdded)
        );
    }

    #[test]
    fn test_folded_pair_detected() {
        // A self-overlapping quad: both opposite vertices of the diagonal
        // {0, 2} land on the same side, so the triangles fold over it.
        let polys: Polygons<f64> = vec![vec![
            PolyVert::new(Point2::new(0.0, 0.0), 0, EDGE_NO_IDX),
            PolyVert::new(Point2::new(2.0, 0.0), 1, EDGE_NO_IDX),
            PolyVert::new(Point2::new(1.0, 1.0), 2, EDGE_NO_IDX),
            PolyVert::new(Point2::new(2.0, -0.5), 3, EDGE_NO_IDX),
        ]];
        let triangles: Vec<Triangle> = vec![[0, 1, 2], [0, 2, 3]];
        assert_eq!(
            check_folded(&triangles, &polys),
            Err(TriangulateError::TriangulationFolded)
        );
    }

    #[test]
    fn test_unfolded_pair_passes() {
        // Same diagonal, but the fourth vertex sits on the far side.
        let polys: Polygons<f64> = vec![vec![
            PolyVert::new(Point2::new(0.0, 0.0), 0, EDGE_NO_IDX),
            PolyVert::new(Point2::new(2.0, 0.0), 1, EDGE_NO_IDX),
            PolyVert::new(Point2::new(1.0, 1.0), 2, EDGE_NO_IDX),
            PolyVert::new(Point2::new(-0.5, 1.0), 3, EDGE_NO_IDX),
        ]];
        let triangles: Vec<Triangle> = vec![[0, 1, 2], [0, 2, 3]];
        check_folded(&triangles, &polys).unwrap();
    }
}
