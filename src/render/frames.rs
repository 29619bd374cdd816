use std::borrow::Cow;

use crate::animation::tween::TransformPath;
use crate::field::sample::SampleField;
use crate::foundation::core::StepIndex;
use crate::render::apply::apply_transform;

/// A frame is the source field mapped through the path matrix at one step.
pub type Frame = SampleField;

/// Receives `(done, total)` after every precomputed frame.
pub trait ProgressSink {
    fn progress(&mut self, done: usize, total: usize);
}

impl<F: FnMut(usize, usize)> ProgressSink for F {
    fn progress(&mut self, done: usize, total: usize) {
        self(done, total);
    }
}

/// Progress sink that ignores every report.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn progress(&mut self, _done: usize, _total: usize) {}
}

/// How a run obtains its frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameMode {
    /// Compute every frame before playback starts, reporting progress. Holds `steps + 1`
    /// frames at once.
    Eager,
    /// Compute each frame on demand at its tick; holds one frame at a time.
    #[default]
    Lazy,
}

/// Source field plus the path it is animated along.
#[derive(Clone, Debug)]
pub struct FramePlan {
    source: SampleField,
    path: TransformPath,
}

impl FramePlan {
    pub fn new(source: SampleField, path: TransformPath) -> Self {
        Self { source, path }
    }

    pub fn source(&self) -> &SampleField {
        &self.source
    }

    pub fn path(&self) -> &TransformPath {
        &self.path
    }

    /// Number of frames (`steps + 1`).
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Compute the frame at `step`, or `None` past the end of the path.
    pub fn frame(&self, step: StepIndex) -> Option<Frame> {
        let m = self.path.matrix_at(step)?;
        Some(apply_transform(m, &self.source))
    }
}

/// Frame-at-a-time eager precomputation, so callers can interleave other work between frames.
#[derive(Debug)]
pub struct Precompute {
    plan: FramePlan,
    frames: Vec<Frame>,
}

impl Precompute {
    pub fn new(plan: FramePlan) -> Self {
        let total = plan.len();
        Self {
            plan,
            frames: Vec::with_capacity(total),
        }
    }

    pub fn done(&self) -> usize {
        self.frames.len()
    }

    pub fn total(&self) -> usize {
        self.plan.len()
    }

    pub fn is_complete(&self) -> bool {
        self.done() >= self.total()
    }

    /// Compute the next frame and report progress. Returns `true` once every frame is ready.
    pub fn advance(&mut self, progress: &mut dyn ProgressSink) -> bool {
        if self.is_complete() {
            return true;
        }
        let step = StepIndex(self.frames.len() as u32);
        if let Some(frame) = self.plan.frame(step) {
            self.frames.push(frame);
        }
        tracing::debug!(step = step.0, total = self.total(), "precomputed frame");
        progress.progress(self.done(), self.total());
        self.is_complete()
    }

    /// Run [`Precompute::advance`] until every frame is ready.
    #[tracing::instrument(skip_all)]
    pub fn run_to_end(mut self, progress: &mut dyn ProgressSink) -> Frames {
        while !self.advance(progress) {}
        self.finish()
    }

    /// Hand over the computed frames. Only meaningful once [`Precompute::is_complete`].
    pub fn finish(self) -> Frames {
        Frames::Eager {
            path: self.plan.path,
            frames: self.frames,
        }
    }
}

/// The ordered frame sequence owned by one animation run.
#[derive(Debug)]
pub enum Frames {
    /// Every frame materialized up front.
    Eager {
        path: TransformPath,
        frames: Vec<Frame>,
    },
    /// Frames produced on demand from the plan.
    Lazy(FramePlan),
}

impl Frames {
    pub fn path(&self) -> &TransformPath {
        match self {
            Self::Eager { path, .. } => path,
            Self::Lazy(plan) => plan.path(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Eager { frames, .. } => frames.len(),
            Self::Lazy(plan) => plan.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Frame at `step`: borrowed when precomputed, freshly computed when lazy.
    pub fn frame(&self, step: StepIndex) -> Option<Cow<'_, Frame>> {
        match self {
            Self::Eager { frames, .. } => frames.get(step.as_usize()).map(Cow::Borrowed),
            Self::Lazy(plan) => plan.frame(step).map(Cow::Owned),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frames.rs"]
mod tests;
