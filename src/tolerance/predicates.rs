//! Tolerant orientation predicate.

use crate::primitives::Point2;
use num_traits::Float;

/// Scale factor of the collinearity band. A determinant is treated as zero
/// when it is at least this many times smaller than the coordinate
/// magnitude of the inputs.
const TOLERANCE: f64 = 1e5;

/// Computes the orientation of three points with a scale-aware tolerance.
///
/// Returns the sign of the signed area of the triangle `(p0, p1, p2)`:
/// `1` for counter-clockwise, `-1` for clockwise, and `0` when the points
/// are collinear within tolerance.
///
/// The zero band grows with the magnitude of the inputs: the determinant
/// is compared against `|p0.x*p0.y| + |p1.x*p1.y| + |p2.x*p2.y|` scaled
/// down by the tolerance factor, which absorbs the rounding noise of
/// single-precision coordinates far from the origin. No clean nonzero
/// result exists for near-collinear triples; callers must handle the zero
/// case explicitly.
///
/// # Example
///
/// ```
/// use monotri::{ccw, Point2};
///
/// let a = Point2::new(0.0_f64, 0.0);
/// let b = Point2::new(1.0, 0.0);
/// assert_eq!(ccw(a, b, Point2::new(0.5, 1.0)), 1);
/// assert_eq!(ccw(a, b, Point2::new(0.5, -1.0)), -1);
/// assert_eq!(ccw(a, b, Point2::new(2.0, 0.0)), 0);
/// ```
#[inline]
pub fn ccw<F: Float>(p0: Point2<F>, p1: Point2<F>, p2: Point2<F>) -> i32 {
    let v1 = p1 - p0;
    let v2 = p2 - p0;
    let result = v1.cross(v2);
    let norm = (p0.x * p0.y).abs() + (p1.x * p1.y).abs() + (p2.x * p2.y).abs();
    if result.abs() * F::from(TOLERANCE).unwrap() <= norm {
        0
    } else if result > F::zero() {
        1
    } else {
        -1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ccw_counter_clockwise() {
        let a: Point2<f64> = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        let c = Point2::new(0.5, 1.0);
        assert_eq!(ccw(a, b, c), 1);
    }

    #[test]
    fn test_ccw_clockwise() {
        let a: Point2<f64> = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        let c = Point2::new(0.5, -1.0);
        assert_eq!(ccw(a, b, c), -1);
    }

    #[test]
    fn test_ccw_exactly_collinear() {
        let a: Point2<f64> = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 1.0);
        let c = Point2::new(2.0, 2.0);
        assert_eq!(ccw(a, b, c), 0);
    }

    #[test]
    fn test_ccw_antisymmetric() {
        let triples: [(Point2<f64>, Point2<f64>, Point2<f64>); 3] = [
            (
                Point2::new(0.0, 0.0),
                Point2::new(3.0, 1.0),
                Point2::new(1.0, 2.0),
            ),
            (
                Point2::new(-1.0, -1.0),
                Point2::new(2.0, 0.5),
                Point2::new(0.0, 4.0),
            ),
            (
                Point2::new(100.0, 100.0),
                Point2::new(200.0, 200.0),
                Point2::new(300.0, 300.0),
            ),
        ];
        for (p0, p1, p2) in triples {
            assert_eq!(ccw(p0, p1, p2), -ccw(p0, p2, p1));
        }
    }

    #[test]
    fn test_ccw_tolerance_scales_with_magnitude() {
        // Near the origin the same perpendicular offset is a clean turn.
        let small = ccw(
            Point2::new(0.0_f64, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 1e-6),
        );
        assert_eq!(small, 1);

        // Far from the origin a tiny determinant falls into the zero band.
        let large = ccw(
            Point2::new(100.0_f64, 100.0),
            Point2::new(200.0, 200.0),
            Point2::new(300.0, 300.000001),
        );
        assert_eq!(large, 0);
    }

    #[test]
    fn test_ccw_f32() {
        let a: Point2<f32> = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        let c = Point2::new(0.5, 1.0);
        assert_eq!(ccw(a, b, c), 1);
        assert_eq!(ccw(a, c, b), -1);
    }
}
