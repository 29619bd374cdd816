use std::str::FromStr;

use crate::foundation::core::{PixelPos, Vec2};
use crate::foundation::error::{PlanewarpError, PlanewarpResult};
use crate::transform::linear;

/// A 2x2 linear map with rows `(a, b)` and `(c, d)`: `(x, y) -> (ax + by, cx + dy)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransformMatrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl TransformMatrix {
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    /// Quarter turn used for vector normals.
    pub const ROTATE_90: Self = Self::new(0.0, -1.0, 1.0, 0.0);

    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    pub fn from_rows(r0: Vec2, r1: Vec2) -> Self {
        Self::new(r0.x, r0.y, r1.x, r1.y)
    }

    /// Coefficients in row-major order `[a, b, c, d]`.
    pub fn coeffs(self) -> [f64; 4] {
        [self.a, self.b, self.c, self.d]
    }

    pub fn from_coeffs(c: [f64; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }

    pub fn rows(self) -> (Vec2, Vec2) {
        (Vec2::new(self.a, self.b), Vec2::new(self.c, self.d))
    }

    pub fn determinant(self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// True when the map (nearly) collapses the plane onto a line or a point.
    pub fn is_degenerate(self, eps: f64) -> bool {
        self.determinant().abs() <= eps
    }

    /// Reject NaN or infinite coefficients before any frame is computed.
    pub fn validate(self) -> PlanewarpResult<()> {
        for (name, v) in ["a", "b", "c", "d"].into_iter().zip(self.coeffs()) {
            if !v.is_finite() {
                return Err(PlanewarpError::config(format!(
                    "matrix coefficient {name} must be finite, got {v}"
                )));
            }
        }
        Ok(())
    }

    /// Map a pixel position and floor the result back onto the pixel grid.
    #[inline]
    pub fn apply_to_pixel(self, p: PixelPos) -> PixelPos {
        PixelPos::floor(linear::apply(self, p.to_vec2()))
    }
}

impl Default for TransformMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Parses `"a,b,c,d"` (whitespace around values is ignored).
impl FromStr for TransformMatrix {
    type Err = PlanewarpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s.split(',').map(str::trim).collect::<Vec<_>>();
        if parts.len() != 4 {
            return Err(PlanewarpError::config(format!(
                "matrix needs 4 comma-separated values, got {}",
                parts.len()
            )));
        }
        let mut coeffs = [0.0f64; 4];
        for (slot, part) in coeffs.iter_mut().zip(&parts) {
            *slot = part.parse::<f64>().map_err(|e| {
                PlanewarpError::config(format!("invalid matrix value '{part}': {e}"))
            })?;
        }
        let m = Self::from_coeffs(coeffs);
        m.validate()?;
        Ok(m)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/matrix.rs"]
mod tests;
