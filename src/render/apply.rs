use rayon::prelude::*;

use crate::field::sample::{Sample, SampleField};
use crate::transform::matrix::TransformMatrix;

/// Below this many samples the rayon split overhead outweighs the per-sample work.
const PARALLEL_MIN_SAMPLES: usize = 16 * 1024;

/// Map every sample of `field` through `m`, flooring the new position and carrying the color.
///
/// Output order matches input order, so collisions resolve the same way whether or not the map
/// ran in parallel.
#[tracing::instrument(level = "trace", skip(field), fields(samples = field.len()))]
pub fn apply_transform(m: TransformMatrix, field: &SampleField) -> SampleField {
    let src = field.as_slice();
    if src.len() < PARALLEL_MIN_SAMPLES {
        return src.iter().map(|s| map_sample(m, s)).collect();
    }
    let mapped: Vec<Sample> = src.par_iter().map(|s| map_sample(m, s)).collect();
    SampleField::new(mapped)
}

#[inline]
fn map_sample(m: TransformMatrix, s: &Sample) -> Sample {
    s.moved_to(m.apply_to_pixel(s.pos))
}

#[cfg(test)]
#[path = "../../tests/unit/render/apply.rs"]
mod tests;
