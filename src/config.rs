use std::path::Path;

use anyhow::Context as _;

use crate::audio::sonify::{DEFAULT_FUNDAMENTALS, SILENCE_FLOOR, SonifySettings, VOICES};
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{PlanewarpError, PlanewarpResult};
use crate::render::frames::FrameMode;

/// Tunables for one animation run.
///
/// Every field has a default, so a JSON file only needs the values it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    /// Interpolation steps; a run has `steps + 1` frames.
    pub steps: u32,
    /// Playback rate.
    pub fps: Fps,
    /// Field and raster size.
    pub canvas: Canvas,
    /// Fade-in and fade-out window in seconds.
    pub decay_secs: f64,
    /// Per-note attack in seconds.
    pub note_secs: f64,
    /// Level the voices reach after fading in.
    pub max_volume: f64,
    /// Level used instead of `max_volume` when sound is disabled.
    pub muted_volume: f64,
    /// Base pitch (Hz) for each coefficient `a, b, c, d`.
    pub fundamentals: [f64; VOICES],
    /// Draw the reference grid onto the canvas before sampling.
    pub grid_enabled: bool,
    /// Grid cell size in pixels; defaults to a tenth of the canvas.
    pub grid_spacing: Option<u32>,
    /// Whether the sonification is audible.
    pub sound_enabled: bool,
    /// Lazy per-tick frames (default) or eager precomputation.
    pub frame_mode: FrameMode,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            steps: 100,
            fps: Fps::default(),
            canvas: Canvas::default(),
            decay_secs: 1.0,
            note_secs: 0.05,
            max_volume: 0.5,
            muted_volume: SILENCE_FLOOR,
            fundamentals: DEFAULT_FUNDAMENTALS,
            grid_enabled: false,
            grid_spacing: None,
            sound_enabled: true,
            frame_mode: FrameMode::Lazy,
        }
    }
}

impl AnimationConfig {
    /// Parse a JSON document of overrides.
    pub fn from_json_str(s: &str) -> PlanewarpResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| PlanewarpError::serde(format!("invalid animation config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a JSON config file.
    pub fn from_path(path: &Path) -> PlanewarpResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Reject anything that would fail a run before its first frame.
    pub fn validate(&self) -> PlanewarpResult<()> {
        if self.steps == 0 {
            return Err(PlanewarpError::config("steps must be > 0"));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        self.canvas.validate()?;
        positive_finite("decay_secs", self.decay_secs)?;
        positive_finite("note_secs", self.note_secs)?;
        if !(self.max_volume > 0.0 && self.max_volume <= 1.0) {
            return Err(PlanewarpError::config(format!(
                "max_volume must be in (0, 1], got {}",
                self.max_volume
            )));
        }
        if !(self.muted_volume > 0.0 && self.muted_volume <= self.max_volume) {
            return Err(PlanewarpError::config(format!(
                "muted_volume must be in (0, max_volume], got {}",
                self.muted_volume
            )));
        }
        for (k, &f) in self.fundamentals.iter().enumerate() {
            positive_finite(&format!("fundamentals[{k}]"), f)?;
        }
        if self.grid_spacing == Some(0) {
            return Err(PlanewarpError::config("grid_spacing must be > 0"));
        }
        Ok(())
    }

    /// Effective grid cell size.
    pub fn grid_spacing(&self) -> u32 {
        self.grid_spacing
            .unwrap_or(self.canvas.width.min(self.canvas.height) / 10)
            .max(1)
    }

    /// Settings for the sonification layer.
    pub fn sonify_settings(&self) -> SonifySettings {
        SonifySettings {
            fundamentals: self.fundamentals,
            decay_secs: self.decay_secs,
            note_secs: self.note_secs,
            max_volume: self.max_volume,
            muted_volume: self.muted_volume,
            enabled: self.sound_enabled,
        }
    }
}

fn positive_finite(name: &str, v: f64) -> PlanewarpResult<()> {
    if !v.is_finite() || v <= 0.0 {
        return Err(PlanewarpError::config(format!(
            "{name} must be finite and > 0, got {v}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
