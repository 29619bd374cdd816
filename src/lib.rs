//! Planewarp animates a 2x2 linear map of the plane and makes it audible.
//!
//! A raster image (plus reference axes and an optional grid) is turned into a field of
//! position + color samples. The identity matrix is interpolated toward a target matrix in a
//! fixed number of steps, every sample is forward-mapped through each intermediate matrix, and the
//! resulting frames are played back at a fixed rate while four tone generators track the four
//! matrix coefficients.
//!
//! # Pipeline overview
//!
//! 1. **Sample**: `Raster -> SampleField` ([`to_field`], [`prepare_source`])
//! 2. **Interpolate**: `TransformMatrix -> TransformPath` ([`build_transform_path`])
//! 3. **Map**: `TransformPath x SampleField -> frames` ([`apply_transform`], [`Precompute`])
//! 4. **Play**: frames are presented on a [`RenderSurface`] in lockstep with pitch updates sent to
//!    a [`ToneSink`] ([`Player`])
//!
//! Mapping is deliberately lossy: positions are floored, colliding samples resolve
//! last-write-wins in row-major source order, and pixels no sample lands on stay transparent.
#![forbid(unsafe_code)]

mod animation;
mod assets;
mod audio;
mod config;
mod field;
mod foundation;
mod playback;
mod render;

/// Matrices and the vector primitives they act on.
pub mod transform;

pub use animation::tween::{TransformPath, build_transform_path, tween_scalar};
pub use assets::decode::{compose_canvas, decode_image, load_image, place_centered, prepare_source};
pub use audio::sonify::{
    AudioCommand, AudioEvent, DEFAULT_FUNDAMENTALS, MAX_SEMITONES, RecordingToneSink,
    SILENCE_FLOOR, Sonifier, SonifySettings, ToneSink, VOICES, note_frequency, semitone_offset,
};
pub use audio::synth::{PcmSynth, SYNTH_SAMPLE_RATE, write_f32le};
pub use config::AnimationConfig;
pub use field::raster::{Raster, to_field, to_raster, write_field};
pub use field::sample::{Sample, SampleField};
pub use foundation::core::{BezPath, Canvas, Fps, PixelPos, Point, Rgba8, StepIndex, Vec2};
pub use foundation::error::{PlanewarpError, PlanewarpResult};
pub use playback::clock::{Clock, ManualClock, SystemClock};
pub use playback::scheduler::{
    Phase, PlaybackIo, PlaybackState, Player, RunEnd, RunId, RunSummary, TickOutcome,
};
pub use render::apply::apply_transform;
pub use render::frames::{
    Frame, FrameMode, FramePlan, Frames, NoProgress, Precompute, ProgressSink,
};
pub use render::overlay::{
    AXIS_THICKNESS, GRID_THICKNESS, arrow_path, axes_paths, draw_axes, draw_grid, draw_paths,
    grid_paths,
};
pub use render::surface::{InMemorySurface, PngSequenceSurface, RenderSurface, SurfaceConfig};
pub use transform::matrix::TransformMatrix;
