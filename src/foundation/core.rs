use std::time::Duration;

use crate::foundation::error::{PlanewarpError, PlanewarpResult};

pub use kurbo::{BezPath, Point, Vec2};

/// Position of a frame within one animation run; step `0` is the identity frame.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct StepIndex(pub u32);

impl StepIndex {
    /// Index as a `usize` for slice access.
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Playback rate as a rational number of frames per second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator.
    pub num: u32,
    /// Denominator, must be > 0.
    pub den: u32,
}

impl Fps {
    /// Validated constructor.
    pub fn new(num: u32, den: u32) -> PlanewarpResult<Self> {
        if den == 0 {
            return Err(PlanewarpError::config("fps den must be > 0"));
        }
        if num == 0 {
            return Err(PlanewarpError::config("fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frames per second as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Length of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Length of one frame; the playback tick interval.
    pub fn frame_interval(self) -> Duration {
        Duration::from_secs_f64(self.frame_duration_secs())
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 24, den: 1 }
    }
}

/// Size of the square (or rectangular) drawing surface the field lives on.
///
/// The field's origin sits at `(floor(width / 2), floor(height / 2))` in raster space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Validated constructor; zero-sized canvases are a configuration error.
    pub fn new(width: u32, height: u32) -> PlanewarpResult<Self> {
        let canvas = Self { width, height };
        canvas.validate()?;
        Ok(canvas)
    }

    /// Reject zero-sized canvases.
    pub fn validate(self) -> PlanewarpResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PlanewarpError::config(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Raster-space coordinates of the field origin.
    pub fn origin(self) -> (i64, i64) {
        (i64::from(self.width / 2), i64::from(self.height / 2))
    }

    /// Number of pixels.
    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Number of RGBA8 bytes in a raster of this size.
    pub fn byte_len(self) -> usize {
        self.pixel_count() * 4
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
        }
    }
}

/// Integer pixel position in field space (origin at the canvas center, y pointing down).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PixelPos {
    pub x: i64,
    pub y: i64,
}

impl PixelPos {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Floor a real-valued position onto the pixel grid.
    ///
    /// Non-finite components saturate (NaN becomes 0), which always lands out of bounds or on the
    /// origin rather than panicking.
    pub fn floor(v: Vec2) -> Self {
        Self {
            x: v.x.floor() as i64,
            y: v.y.floor() as i64,
        }
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x as f64, self.y as f64)
    }
}

/// Straight-alpha RGBA8 color carried verbatim by every sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent black; the value of every pixel no sample lands on.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black, used for overlay strokes.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Read one pixel from a 4-byte chunk.
    pub fn from_chunk(px: &[u8]) -> Self {
        Self::new(px[0], px[1], px[2], px[3])
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
