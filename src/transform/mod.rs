//! 2x2 linear maps of the plane and the vector primitives they are built from.

/// Vector arithmetic over [`kurbo::Vec2`].
pub mod linear;
/// The [`matrix::TransformMatrix`] value type.
pub mod matrix;
