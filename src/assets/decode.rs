use std::path::Path;

use anyhow::Context;

use crate::config::AnimationConfig;
use crate::field::raster::{Raster, to_field};
use crate::field::sample::SampleField;
use crate::foundation::core::{Canvas, PixelPos};
use crate::foundation::error::{PlanewarpError, PlanewarpResult};
use crate::render::overlay::{draw_axes, draw_grid};

/// Decode encoded image bytes into a straight-alpha RGBA8 raster.
pub fn decode_image(bytes: &[u8]) -> PlanewarpResult<Raster> {
    let rgba = image::load_from_memory(bytes)
        .context("decode image from memory")?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(PlanewarpError::config("image has zero size"));
    }
    Raster::from_rgba8(width, height, rgba.into_raw())
}

/// Read and decode an image file.
pub fn load_image(path: &Path) -> PlanewarpResult<Raster> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes)
}

/// Copy `image` at its natural size onto a transparent canvas, centered on the origin.
///
/// The image's top-left corner lands at `(floor(-w/2), floor(-h/2))` in field coordinates.
/// Pixels falling outside the canvas are cropped.
pub fn place_centered(image: &Raster, canvas: Canvas) -> Raster {
    let mut out = Raster::transparent(canvas);
    let left = (-i64::from(image.width)).div_euclid(2);
    let top = (-i64::from(image.height)).div_euclid(2);

    for (i, px) in image.data.chunks_exact(4).enumerate() {
        let sx = (i % image.width as usize) as i64;
        let sy = (i / image.width as usize) as i64;
        if let Some(dst) = out.index_of(PixelPos::new(left + sx, top + sy)) {
            out.data[dst..dst + 4].copy_from_slice(px);
        }
    }
    out
}

/// The source canvas of a run: the centered image (if any), then the axes, then the grid when
/// enabled. Overlays are part of the canvas, so they move with the image.
#[tracing::instrument(level = "debug", skip_all, fields(image = image.is_some()))]
pub fn compose_canvas(image: Option<&Raster>, config: &AnimationConfig) -> PlanewarpResult<Raster> {
    config.canvas.validate()?;
    let mut canvas = match image {
        Some(img) => place_centered(img, config.canvas),
        None => Raster::transparent(config.canvas),
    };
    draw_axes(&mut canvas)?;
    if config.grid_enabled {
        draw_grid(&mut canvas, config.grid_spacing())?;
    }
    Ok(canvas)
}

/// Compose the canvas and sample it into the field every frame is mapped from.
pub fn prepare_source(
    image: Option<&Raster>,
    config: &AnimationConfig,
) -> PlanewarpResult<SampleField> {
    Ok(to_field(&compose_canvas(image, config)?))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
