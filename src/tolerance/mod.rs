//! Scale-aware geometric predicates.
//!
//! The tolerance here is not a caller-supplied epsilon: the collinearity
//! band scales with the magnitude of the input coordinates, so the
//! predicate stays meaningful from unit-sized geometry up to large scenes.

mod predicates;

pub use predicates::ccw;
