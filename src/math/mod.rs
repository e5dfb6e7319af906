/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Normalized position of parameter step `i` along a range of `order_u`
/// subdivisions, i.e. `i / order_u`.
///
/// `order_u` must be non-zero; callers validate it up front.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn step_fraction(i: usize, order_u: usize) -> f64 {
    debug_assert!(order_u > 0, "order_u must be validated before stepping");
    i as f64 / order_u as f64
}
