use std::time::Duration;

use crate::animation::tween::build_transform_path;
use crate::audio::sonify::{Sonifier, ToneSink};
use crate::config::AnimationConfig;
use crate::field::raster::{Raster, write_field};
use crate::field::sample::SampleField;
use crate::foundation::core::StepIndex;
use crate::foundation::error::{PlanewarpError, PlanewarpResult};
use crate::playback::clock::Clock;
use crate::render::frames::{FrameMode, FramePlan, Frames, Precompute, ProgressSink};
use crate::render::surface::{RenderSurface, SurfaceConfig};
use crate::transform::matrix::TransformMatrix;

/// Token identifying one animation run. Every tick carries the token of the run that scheduled
/// it; ticks from a superseded run are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(pub u64);

/// Where the player is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Precomputing,
    Playing,
}

/// Snapshot of the player's state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackState {
    /// The active run, if any.
    pub run: Option<RunId>,
    pub phase: Phase,
    /// Next frame to draw (or, while precomputing, frames computed so far).
    pub step: u32,
    /// Frames in the active run.
    pub frames: usize,
}

/// What the driver should do after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Tick this run again after `after`.
    Continue { after: Duration },
    /// The run drew its last frame and is over.
    Finished,
    /// The tick belonged to a run that is no longer active; nothing was done.
    Stale,
}

/// How a driven run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunEnd {
    Completed,
    Superseded,
}

/// Result of [`Player::drive`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub run: RunId,
    pub frames_drawn: usize,
    pub end: RunEnd,
}

/// Collaborators a tick writes to. Only ticks write to them while a run is active.
pub struct PlaybackIo<'a> {
    pub surface: &'a mut dyn RenderSurface,
    pub audio: &'a mut dyn ToneSink,
    pub progress: &'a mut dyn ProgressSink,
}

enum RunState {
    Idle,
    Precomputing {
        run: RunId,
        precompute: Precompute,
    },
    Playing {
        run: RunId,
        frames: Frames,
        step: u32,
    },
}

/// The frame playback state machine: `Idle -> Precomputing -> Playing -> Idle`.
///
/// A submit while a run is active cancels it; the old run's pending tick then reports
/// [`TickOutcome::Stale`] and never draws.
pub struct Player {
    config: AnimationConfig,
    sonifier: Sonifier,
    next_run: u64,
    state: RunState,
    scratch: Raster,
    playback_secs: f64,
}

impl Player {
    pub fn new(config: AnimationConfig) -> PlanewarpResult<Self> {
        config.validate()?;
        Ok(Self {
            sonifier: Sonifier::new(config.sonify_settings()),
            scratch: Raster::transparent(config.canvas),
            config,
            next_run: 0,
            state: RunState::Idle,
            playback_secs: 0.0,
        })
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Seconds of playback ticked so far across all runs; the timestamp of the next audio event.
    pub fn playback_secs(&self) -> f64 {
        self.playback_secs
    }

    pub fn state(&self) -> PlaybackState {
        match &self.state {
            RunState::Idle => PlaybackState {
                run: None,
                phase: Phase::Idle,
                step: 0,
                frames: 0,
            },
            RunState::Precomputing { run, precompute } => PlaybackState {
                run: Some(*run),
                phase: Phase::Precomputing,
                step: precompute.done() as u32,
                frames: precompute.total(),
            },
            RunState::Playing { run, frames, step } => PlaybackState {
                run: Some(*run),
                phase: Phase::Playing,
                step: *step,
                frames: frames.len(),
            },
        }
    }

    /// Start a new run animating `source` from the identity to `target`.
    ///
    /// Validation happens first: `source` must hold one sample per canvas pixel. On a
    /// configuration error nothing changes, any active run keeps going and no tick is scheduled. Otherwise an active run is cancelled before the new one
    /// starts.
    #[tracing::instrument(skip(self, source, audio), fields(samples = source.len()))]
    pub fn submit(
        &mut self,
        target: TransformMatrix,
        source: SampleField,
        audio: &mut dyn ToneSink,
    ) -> PlanewarpResult<RunId> {
        let path = build_transform_path(target, self.config.steps)?;
        if source.is_empty() {
            return Err(PlanewarpError::config("source field is empty"));
        }
        source.check_full_grid(self.config.canvas)?;
        if target.is_degenerate(1e-12) {
            tracing::info!(
                det = target.determinant(),
                "target collapses the plane; frames will overlap"
            );
        }

        self.cancel(audio)?;
        self.next_run += 1;
        let run = RunId(self.next_run);
        let plan = FramePlan::new(source, path);
        self.state = match self.config.frame_mode {
            FrameMode::Eager => RunState::Precomputing {
                run,
                precompute: Precompute::new(plan),
            },
            FrameMode::Lazy => RunState::Playing {
                run,
                frames: Frames::Lazy(plan),
                step: 0,
            },
        };
        tracing::info!(run = run.0, steps = self.config.steps, "run submitted");
        Ok(run)
    }

    /// Abandon the active run, if any. A run that was already playing fades its voices out.
    pub fn cancel(&mut self, audio: &mut dyn ToneSink) -> PlanewarpResult<()> {
        match std::mem::replace(&mut self.state, RunState::Idle) {
            RunState::Idle => {}
            RunState::Precomputing { run, precompute } => {
                tracing::info!(
                    run = run.0,
                    done = precompute.done(),
                    "run cancelled while precomputing"
                );
            }
            RunState::Playing { run, step, .. } => {
                tracing::info!(run = run.0, step, "run cancelled while playing");
                if step > 0 {
                    self.sonifier.stop(self.playback_secs, audio)?;
                } else {
                    self.sonifier.reset();
                }
            }
        }
        Ok(())
    }

    /// Advance `run` by one slice: one precomputed frame, or one drawn and sonified frame.
    pub fn tick(&mut self, run: RunId, io: &mut PlaybackIo<'_>) -> PlanewarpResult<TickOutcome> {
        let interval = self.config.fps.frame_interval();
        match &mut self.state {
            RunState::Idle => Ok(TickOutcome::Stale),
            RunState::Precomputing { run: active, .. } if *active != run => Ok(TickOutcome::Stale),
            RunState::Playing { run: active, .. } if *active != run => Ok(TickOutcome::Stale),
            RunState::Precomputing { precompute, .. } => {
                if !precompute.advance(&mut *io.progress) {
                    return Ok(TickOutcome::Continue {
                        after: Duration::ZERO,
                    });
                }
                let RunState::Precomputing { precompute, .. } =
                    std::mem::replace(&mut self.state, RunState::Idle)
                else {
                    return Ok(TickOutcome::Stale);
                };
                tracing::debug!(run = run.0, "precompute finished, playback starts");
                self.state = RunState::Playing {
                    run,
                    frames: precompute.finish(),
                    step: 0,
                };
                Ok(TickOutcome::Continue {
                    after: Duration::ZERO,
                })
            }
            RunState::Playing { .. } => {
                let finished = match self.draw_next(run, io) {
                    Ok(finished) => finished,
                    Err(err) => {
                        tracing::warn!(run = run.0, error = %err, "run aborted by a collaborator");
                        self.state = RunState::Idle;
                        self.sonifier.reset();
                        return Err(err);
                    }
                };
                if finished {
                    self.state = RunState::Idle;
                    tracing::info!(run = run.0, "run completed");
                    return Ok(TickOutcome::Finished);
                }
                Ok(TickOutcome::Continue { after: interval })
            }
        }
    }

    /// Tick `run` until it finishes or is superseded, waiting on `clock` between ticks.
    ///
    /// Time a tick spends drawing is taken off the following wait. A collaborator error ends the
    /// run and leaves the player idle.
    pub fn drive(
        &mut self,
        run: RunId,
        clock: &mut dyn Clock,
        io: &mut PlaybackIo<'_>,
    ) -> PlanewarpResult<RunSummary> {
        let mut frames_drawn = 0usize;
        loop {
            let before = self.state();
            let started = clock.elapsed();
            match self.tick(run, io)? {
                TickOutcome::Continue { after } => {
                    if before.phase == Phase::Playing {
                        frames_drawn += 1;
                    }
                    let spent = clock.elapsed().saturating_sub(started);
                    clock.sleep(after.saturating_sub(spent));
                }
                TickOutcome::Finished => {
                    return Ok(RunSummary {
                        run,
                        frames_drawn: frames_drawn + 1,
                        end: RunEnd::Completed,
                    });
                }
                TickOutcome::Stale => {
                    return Ok(RunSummary {
                        run,
                        frames_drawn,
                        end: RunEnd::Superseded,
                    });
                }
            }
        }
    }

    /// Draw and sonify the next frame of the playing run. Returns `true` after the last frame.
    fn draw_next(&mut self, run: RunId, io: &mut PlaybackIo<'_>) -> PlanewarpResult<bool> {
        let RunState::Playing { frames, step, .. } = &mut self.state else {
            return Ok(true);
        };
        let total = frames.len();
        let current = StepIndex(*step);
        let at_secs = self.playback_secs;

        if current.0 == 0 {
            io.surface.begin(SurfaceConfig {
                canvas: self.config.canvas,
                fps: self.config.fps,
                frames: total,
            })?;
            self.sonifier.start(at_secs, &mut *io.audio)?;
        }

        let Some(frame) = frames.frame(current) else {
            return Ok(true);
        };
        self.scratch.clear();
        let dropped = write_field(&frame, &mut self.scratch);
        tracing::trace!(run = run.0, step = current.0, dropped, "tick");

        io.surface.clear()?;
        io.surface.present(current, &self.scratch)?;
        self.sonifier
            .step(frames.path(), current, at_secs, &mut *io.audio)?;

        *step += 1;
        let last = *step as usize >= total;
        if last {
            self.sonifier.stop(at_secs, &mut *io.audio)?;
            io.surface.end()?;
        } else {
            self.playback_secs += self.config.fps.frame_duration_secs();
        }
        Ok(last)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/scheduler.rs"]
mod tests;
