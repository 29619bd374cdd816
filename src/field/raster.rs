use crate::field::sample::{Sample, SampleField};
use crate::foundation::core::{Canvas, PixelPos, Rgba8};
use crate::foundation::error::{PlanewarpError, PlanewarpResult};

/// A decoded RGBA8 pixel buffer, straight alpha, tightly packed, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub data: Vec<u8>,
}

impl Raster {
    /// Zero-initialized (fully transparent) raster.
    pub fn transparent(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            data: vec![0u8; canvas.byte_len()],
        }
    }

    /// Wrap an existing buffer, checking its length.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> PlanewarpResult<Self> {
        let canvas = Canvas::new(width, height)?;
        if data.len() != canvas.byte_len() {
            return Err(PlanewarpError::render(format!(
                "raster byte length mismatch: got {}, expected {}",
                data.len(),
                canvas.byte_len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Color at raster coordinates, if in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some(Rgba8::from_chunk(&self.data[i..i + 4]))
    }

    /// Color at a field position (origin at the canvas center), if in bounds.
    pub fn pixel_at(&self, pos: PixelPos) -> Option<Rgba8> {
        let i = self.index_of(pos)?;
        Some(Rgba8::from_chunk(&self.data[i..i + 4]))
    }

    /// Reset every byte to zero.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Byte offset of a field position, or `None` when it falls outside the raster.
    ///
    /// Both axes are bounds-checked so a position past the right edge never wraps onto the next
    /// row.
    #[inline]
    pub fn index_of(&self, pos: PixelPos) -> Option<usize> {
        let (ox, oy) = self.canvas().origin();
        let rx = pos.x.checked_add(ox)?;
        let ry = pos.y.checked_add(oy)?;
        if rx < 0 || ry < 0 || rx >= i64::from(self.width) || ry >= i64::from(self.height) {
            return None;
        }
        Some((ry as usize * self.width as usize + rx as usize) * 4)
    }
}

/// Turn every pixel of `raster`, in row-major order, into a sample at its recentered position.
pub fn to_field(raster: &Raster) -> SampleField {
    let canvas = raster.canvas();
    let (ox, oy) = canvas.origin();
    let width = raster.width as usize;
    let mut field = SampleField::with_capacity(canvas.pixel_count());
    for (i, px) in raster.data.chunks_exact(4).enumerate() {
        let x = (i % width) as i64;
        let y = (i / width) as i64;
        field.push(Sample::new(
            PixelPos::new(x - ox, y - oy),
            Rgba8::from_chunk(px),
        ));
    }
    field
}

/// Forward-map `field` onto a fresh transparent raster of `canvas` size.
///
/// Later samples overwrite earlier ones on the same pixel; pixels no sample reaches stay
/// transparent; samples outside the raster are dropped.
pub fn to_raster(field: &SampleField, canvas: Canvas) -> Raster {
    let mut raster = Raster::transparent(canvas);
    let dropped = write_field(field, &mut raster);
    if dropped > 0 {
        tracing::debug!(dropped, total = field.len(), "samples fell outside the raster");
    }
    raster
}

/// Write `field` into an existing raster without clearing it. Returns the number of samples
/// dropped for being out of bounds.
pub fn write_field(field: &SampleField, raster: &mut Raster) -> usize {
    let mut dropped = 0usize;
    for s in field {
        match raster.index_of(s.pos) {
            Some(i) => raster.data[i..i + 4].copy_from_slice(&s.color.to_array()),
            None => dropped += 1,
        }
    }
    dropped
}

#[cfg(test)]
#[path = "../../tests/unit/field/raster.rs"]
mod tests;
