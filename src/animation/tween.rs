use crate::foundation::core::StepIndex;
use crate::foundation::error::{PlanewarpError, PlanewarpResult};
use crate::transform::matrix::TransformMatrix;

/// `steps + 1` evenly spaced values from `a` to `b`, both endpoints included.
///
/// `steps == 0` is a configuration error.
pub fn tween_scalar(a: f64, b: f64, steps: u32) -> PlanewarpResult<Vec<f64>> {
    if steps == 0 {
        return Err(PlanewarpError::config("steps must be > 0"));
    }
    let n = f64::from(steps);
    let delta = b - a;
    let mut out = Vec::with_capacity(steps as usize + 1);
    for i in 0..=steps {
        out.push(a + f64::from(i) * delta / n);
    }
    // Pin the last value; `a + n * delta / n` can be off by an ulp.
    out[steps as usize] = b;
    Ok(out)
}

/// Four independently tweened coefficient sequences, one per matrix entry, in `[a, b, c, d]`
/// order.
///
/// Entry `0` of every sequence is the identity coefficient and entry `steps` is the target's.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformPath {
    coeffs: [Vec<f64>; 4],
    target: TransformMatrix,
}

impl TransformPath {
    /// Number of interpolation steps; the path has `steps() + 1` matrices.
    pub fn steps(&self) -> u32 {
        (self.coeffs[0].len() - 1) as u32
    }

    /// Number of matrices (and therefore frames) along the path.
    pub fn len(&self) -> usize {
        self.coeffs[0].len()
    }

    /// A path always holds at least the two endpoint matrices.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn target(&self) -> TransformMatrix {
        self.target
    }

    /// Interpolated value of coefficient `k` (`0..4`) at `step`.
    pub fn coeff(&self, k: usize, step: StepIndex) -> Option<f64> {
        self.coeffs.get(k)?.get(step.as_usize()).copied()
    }

    /// The full sequence for coefficient `k`.
    pub fn sequence(&self, k: usize) -> Option<&[f64]> {
        self.coeffs.get(k).map(Vec::as_slice)
    }

    /// The interpolated matrix at `step`, or `None` past the end of the path.
    pub fn matrix_at(&self, step: StepIndex) -> Option<TransformMatrix> {
        let i = step.as_usize();
        if i >= self.len() {
            return None;
        }
        Some(TransformMatrix::new(
            self.coeffs[0][i],
            self.coeffs[1][i],
            self.coeffs[2][i],
            self.coeffs[3][i],
        ))
    }

    /// All matrices in step order.
    pub fn matrices(&self) -> impl Iterator<Item = TransformMatrix> + '_ {
        (0..self.len() as u32).filter_map(|i| self.matrix_at(StepIndex(i)))
    }
}

/// Tween each coefficient from the identity matrix to `target` over `steps` steps.
pub fn build_transform_path(target: TransformMatrix, steps: u32) -> PlanewarpResult<TransformPath> {
    target.validate()?;
    let from = TransformMatrix::IDENTITY.coeffs();
    let to = target.coeffs();
    Ok(TransformPath {
        coeffs: [
            tween_scalar(from[0], to[0], steps)?,
            tween_scalar(from[1], to[1], steps)?,
            tween_scalar(from[2], to[2], steps)?,
            tween_scalar(from[3], to[3], steps)?,
        ],
        target,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
