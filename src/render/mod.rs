//! Frame production: forward-mapping fields through matrices, frame sequences, overlays and the
//! render surfaces frames are presented on.

/// Forward mapping of a sample field through a matrix.
pub mod apply;
/// Eager and lazy frame sequences along a transform path.
pub mod frames;
/// Axis and grid arrows drawn onto the source canvas.
pub mod overlay;
/// Render surface trait and built-in surfaces.
pub mod surface;
