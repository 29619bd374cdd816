//! Images as ordered fields of position + color samples, and the conversions to and from rasters.

/// Raster buffers and raster/field conversion.
pub mod raster;
/// Sample and sample field types.
pub mod sample;
