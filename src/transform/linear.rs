//! Linear vector helpers.
//!
//! These keep full `f64` precision. Flooring onto the pixel grid happens only where positions
//! become raster addresses (see [`crate::PixelPos::floor`]).

use crate::foundation::core::Vec2;
use crate::transform::matrix::TransformMatrix;

#[inline]
pub fn dot(u: Vec2, v: Vec2) -> f64 {
    u.x * v.x + u.y * v.y
}

/// Matrix-vector product: each output component is the dot of a matrix row with `v`.
#[inline]
pub fn apply(m: TransformMatrix, v: Vec2) -> Vec2 {
    let (r0, r1) = m.rows();
    Vec2::new(dot(r0, v), dot(r1, v))
}

#[inline]
pub fn scale(v: Vec2, k: f64) -> Vec2 {
    Vec2::new(v.x * k, v.y * k)
}

#[inline]
pub fn add(u: Vec2, v: Vec2) -> Vec2 {
    Vec2::new(u.x + v.x, u.y + v.y)
}

#[inline]
pub fn magnitude(v: Vec2) -> f64 {
    dot(v, v).sqrt()
}

/// Rotate `v` by 90 degrees: `(x, y) -> (-y, x)`.
#[inline]
pub fn normal(v: Vec2) -> Vec2 {
    apply(TransformMatrix::ROTATE_90, v)
}

#[cfg(test)]
#[path = "../../tests/unit/transform/linear.rs"]
mod tests;
