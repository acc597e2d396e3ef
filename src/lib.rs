//! monotri - Polygon triangulation for solid modeling
//!
//! Converts planar polygon sets (outer boundaries counter-clockwise, holes
//! clockwise, boundaries possibly touching at vertices, possibly nearly
//! degenerate) into consistently oriented triangle sets whose halfedges,
//! combined with the boundary, form a 2-manifold. Built for mesh builders
//! that stitch the resulting triangles into watertight 3D surfaces, where
//! a single non-manifold triangle corrupts the whole structure.
//!
//! The primary algorithm is a plane sweep that partitions the input into
//! y-monotone loops, each triangulated by a linear stack walk. Every
//! result is validated; inputs that defeat the sweep (self-touching
//! boundaries) fall back to a purely topological triangulator. Genuinely
//! self-overlapping input is reported as an error, never silently
//! repaired.
//!
//! ```
//! use monotri::{triangulate, Point2, PolyVert, EDGE_NO_IDX};
//!
//! let square = vec![vec![
//!     PolyVert::new(Point2::new(0.0_f64, 0.0), 0, EDGE_NO_IDX),
//!     PolyVert::new(Point2::new(1.0, 0.0), 1, EDGE_NO_IDX),
//!     PolyVert::new(Point2::new(1.0, 1.0), 2, EDGE_NO_IDX),
//!     PolyVert::new(Point2::new(0.0, 1.0), 3, EDGE_NO_IDX),
//! ]];
//! assert_eq!(triangulate(&square).unwrap().len(), 2);
//! ```

pub mod error;
pub mod polygon;
pub mod primitives;
pub mod tolerance;

pub use error::TriangulateError;
pub use polygon::{
    assemble, check_folded, check_manifold, check_manifold_halfedges, dump, polygons_to_edges,
    triangles_to_edges, triangulate, EdgeVerts, PolyVert, Polygons, SimplePolygon, Triangle,
    EDGE_INTERIOR, EDGE_INVALID, EDGE_NO_IDX,
};
pub use primitives::{Point2, Vec2};
pub use tolerance::ccw;
