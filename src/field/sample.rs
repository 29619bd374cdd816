use std::collections::HashSet;

use crate::foundation::core::{Canvas, PixelPos, Rgba8};
use crate::foundation::error::{PlanewarpError, PlanewarpResult};

/// One source pixel: an integer field position and the color it carries unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Sample {
    pub pos: PixelPos,
    pub color: Rgba8,
}

impl Sample {
    pub const fn new(pos: PixelPos, color: Rgba8) -> Self {
        Self { pos, color }
    }

    /// Same color at a new position. Samples are never edited in place.
    #[inline]
    pub fn moved_to(self, pos: PixelPos) -> Self {
        Self {
            pos,
            color: self.color,
        }
    }
}

/// Ordered collection of samples.
///
/// Iteration order is the order samples were inserted (row-major scan for fields built from a
/// raster) and decides which sample wins when several land on one destination pixel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SampleField {
    samples: Vec<Sample>,
}

impl SampleField {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            samples: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    pub fn into_vec(self) -> Vec<Sample> {
        self.samples
    }

    /// Check the source-field invariant: exactly one sample per canvas pixel, no duplicates,
    /// covering the full recentered index range.
    pub fn check_full_grid(&self, canvas: Canvas) -> PlanewarpResult<()> {
        if self.samples.len() != canvas.pixel_count() {
            return Err(PlanewarpError::config(format!(
                "source field has {} samples, expected {}",
                self.samples.len(),
                canvas.pixel_count()
            )));
        }
        let (ox, oy) = canvas.origin();
        let (w, h) = (i64::from(canvas.width), i64::from(canvas.height));
        let mut seen = HashSet::with_capacity(self.samples.len());
        for s in &self.samples {
            let (rx, ry) = (s.pos.x + ox, s.pos.y + oy);
            if !(0..w).contains(&rx) || !(0..h).contains(&ry) {
                return Err(PlanewarpError::config(format!(
                    "source sample at ({}, {}) lies outside the canvas",
                    s.pos.x, s.pos.y
                )));
            }
            if !seen.insert(s.pos) {
                return Err(PlanewarpError::config(format!(
                    "duplicate source sample at ({}, {})",
                    s.pos.x, s.pos.y
                )));
            }
        }
        Ok(())
    }
}

impl FromIterator<Sample> for SampleField {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SampleField {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/sample.rs"]
mod tests;
