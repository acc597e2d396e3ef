//! Planar polygon triangulation with manifold guarantees.
//!
//! This module turns collections of boundary loops (outer boundaries
//! counter-clockwise, holes clockwise) into triangle sets that remain a
//! 2-manifold with respect to the boundary:
//!
//! - [`triangulate`] is the entry point: monotone decomposition, stack
//!   triangulation, validation, and a topological fallback.
//! - [`assemble`] stitches directed edges back into closed loops.
//! - [`check_manifold`], [`check_manifold_halfedges`] and [`check_folded`]
//!   validate a triangulation against its boundary.
//!
//! # Example
//!
//! ```
//! use monotri::{triangulate, Point2, PolyVert, EDGE_NO_IDX};
//!
//! // An L-shaped boundary, wound counter-clockwise.
//! let l_shape = vec![vec![
//!     PolyVert::new(Point2::new(0.0_f64, 0.0), 0, EDGE_NO_IDX),
//!     PolyVert::new(Point2::new(2.0, 0.0), 1, EDGE_NO_IDX),
//!     PolyVert::new(Point2::new(2.0, 1.0), 2, EDGE_NO_IDX),
//!     PolyVert::new(Point2::new(1.0, 1.0), 3, EDGE_NO_IDX),
//!     PolyVert::new(Point2::new(1.0, 2.0), 4, EDGE_NO_IDX),
//!     PolyVert::new(Point2::new(0.0, 2.0), 5, EDGE_NO_IDX),
//! ]];
//!
//! let triangles = triangulate(&l_shape).unwrap();
//! assert_eq!(triangles.len(), 4); // 6 vertices -> 4 triangles
//! ```

mod assemble;
mod monotone;
mod triangulate;
mod types;
mod validate;

pub use assemble::assemble;
pub use triangulate::triangulate;
pub use types::{
    dump, polygons_to_edges, triangles_to_edges, EdgeVerts, PolyVert, Polygons, SimplePolygon,
    Triangle, EDGE_INTERIOR, EDGE_INVALID, EDGE_NO_IDX,
};
pub use validate::{check_folded, check_manifold, check_manifold_halfedges};
