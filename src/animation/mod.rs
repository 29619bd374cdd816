//! Interpolation from the identity matrix to a target matrix.

/// Scalar tweening and [`tween::TransformPath`].
pub mod tween;
