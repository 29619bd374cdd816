use std::path::PathBuf;

use anyhow::Context as _;

use crate::field::raster::Raster;
use crate::foundation::core::{Canvas, Fps, StepIndex};
use crate::foundation::error::PlanewarpResult;

/// Configuration handed to a [`RenderSurface`] when a run starts playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceConfig {
    /// Raster size of every presented frame.
    pub canvas: Canvas,
    /// Playback rate.
    pub fps: Fps,
    /// Number of frames the run will present.
    pub frames: usize,
}

/// Display collaborator the playback scheduler blits frames to.
///
/// Ordering contract: within one run `present` is called with strictly increasing steps, each
/// preceded by `clear`. Only the scheduler's tick writes to a surface while a run is active.
pub trait RenderSurface {
    /// Called once when playback of a run starts.
    fn begin(&mut self, cfg: SurfaceConfig) -> PlanewarpResult<()>;
    /// Clear whatever the previous tick drew.
    fn clear(&mut self) -> PlanewarpResult<()>;
    /// Show one fully populated raster.
    fn present(&mut self, step: StepIndex, frame: &Raster) -> PlanewarpResult<()>;
    /// Called once after the last frame of a completed run.
    fn end(&mut self) -> PlanewarpResult<()>;
}

/// In-memory surface for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySurface {
    cfg: Option<SurfaceConfig>,
    clears: usize,
    ended: bool,
    pub(crate) frames: Vec<(StepIndex, Raster)>,
}

impl InMemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured by the last `begin`, if any.
    pub fn config(&self) -> Option<SurfaceConfig> {
        self.cfg
    }

    /// Frames presented since the last `begin`, in presentation order.
    pub fn frames(&self) -> &[(StepIndex, Raster)] {
        &self.frames
    }

    /// Number of `clear` calls since the last `begin`.
    pub fn clears(&self) -> usize {
        self.clears
    }

    /// Whether the last run reached `end`.
    pub fn ended(&self) -> bool {
        self.ended
    }
}

impl RenderSurface for InMemorySurface {
    fn begin(&mut self, cfg: SurfaceConfig) -> PlanewarpResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.clears = 0;
        self.ended = false;
        Ok(())
    }

    fn clear(&mut self) -> PlanewarpResult<()> {
        self.clears += 1;
        Ok(())
    }

    fn present(&mut self, step: StepIndex, frame: &Raster) -> PlanewarpResult<()> {
        self.frames.push((step, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> PlanewarpResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Writes every presented frame as `frame_00000.png`, `frame_00001.png`, ... into a directory.
#[derive(Debug)]
pub struct PngSequenceSurface {
    dir: PathBuf,
    written: usize,
}

impl PngSequenceSurface {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: 0,
        }
    }

    /// Number of frames written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Path the frame at `step` is written to.
    pub fn frame_path(&self, step: StepIndex) -> PathBuf {
        self.dir.join(format!("frame_{:05}.png", step.0))
    }
}

impl RenderSurface for PngSequenceSurface {
    fn begin(&mut self, _cfg: SurfaceConfig) -> PlanewarpResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create frame dir '{}'", self.dir.display()))?;
        self.written = 0;
        Ok(())
    }

    fn clear(&mut self) -> PlanewarpResult<()> {
        Ok(())
    }

    fn present(&mut self, step: StepIndex, frame: &Raster) -> PlanewarpResult<()> {
        let path = self.frame_path(step);
        image::save_buffer_with_format(
            &path,
            &frame.data,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> PlanewarpResult<()> {
        tracing::info!(frames = self.written, dir = %self.dir.display(), "frame sequence written");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
