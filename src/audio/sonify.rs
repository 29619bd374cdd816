use crate::animation::tween::TransformPath;
use crate::foundation::core::StepIndex;
use crate::foundation::error::{PlanewarpError, PlanewarpResult};

/// One tone generator per matrix coefficient.
pub const VOICES: usize = 4;

/// Base pitches (Hz) for coefficients `a, b, c, d`.
pub const DEFAULT_FUNDAMENTALS: [f64; VOICES] = [523.25, 329.63, 98.0, 32.7];

/// Level the master gain ramps toward when fading out; exponential ramps cannot reach zero.
pub const SILENCE_FLOOR: f64 = 0.0001;

/// Pitch offsets saturate at this many semitones (ten octaves) either way, so every pitch stays
/// finite however large the coefficient.
pub const MAX_SEMITONES: i64 = 12 * 10;

/// Semitone offset for a coefficient value: `round(coeff * 12)`, saturated to
/// `±MAX_SEMITONES`.
pub fn semitone_offset(coeff: f64) -> i64 {
    ((coeff * 12.0).round() as i64).clamp(-MAX_SEMITONES, MAX_SEMITONES)
}

/// Pitch of a voice whose coefficient currently equals `coeff`.
pub fn note_frequency(fundamental: f64, coeff: f64) -> f64 {
    fundamental * 2f64.powf(semitone_offset(coeff) as f64 / 12.0)
}

/// Commands sent to the audio collaborator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AudioCommand {
    /// Fade every voice in from silence to `level` over `ramp_secs`.
    Start { level: f64, ramp_secs: f64 },
    /// Retune one voice.
    SetFrequency { voice: usize, hz: f64 },
    /// Fade every voice out to [`SILENCE_FLOOR`] over `ramp_secs`.
    Decay { ramp_secs: f64 },
}

/// A command stamped with its time in seconds since the run started playing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AudioEvent {
    pub at_secs: f64,
    pub cmd: AudioCommand,
}

/// Audio collaborator the playback scheduler drives.
///
/// Only the scheduler's tick sends events while a run is active, in non-decreasing time order.
pub trait ToneSink {
    fn send(&mut self, event: AudioEvent) -> PlanewarpResult<()>;
}

/// Tone sink that records every event, for tests and debugging.
#[derive(Clone, Debug, Default)]
pub struct RecordingToneSink {
    events: Vec<AudioEvent>,
}

impl RecordingToneSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[AudioEvent] {
        &self.events
    }

    /// Frequency updates grouped per tick (one group of [`VOICES`] updates per frame).
    ///
    /// Updates for voices outside `0..VOICES` are skipped.
    pub fn frequency_ticks(&self) -> Vec<[f64; VOICES]> {
        let mut out = Vec::new();
        let mut current = [0.0; VOICES];
        for ev in &self.events {
            let AudioCommand::SetFrequency { voice, hz } = ev.cmd else {
                continue;
            };
            let Some(slot) = current.get_mut(voice) else {
                continue;
            };
            *slot = hz;
            if voice == VOICES - 1 {
                out.push(current);
            }
        }
        out
    }
}

impl ToneSink for RecordingToneSink {
    fn send(&mut self, event: AudioEvent) -> PlanewarpResult<()> {
        self.events.push(event);
        Ok(())
    }
}

/// Settings for the coefficient-to-pitch mapping and its fades.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SonifySettings {
    pub fundamentals: [f64; VOICES],
    pub decay_secs: f64,
    pub note_secs: f64,
    pub max_volume: f64,
    pub muted_volume: f64,
    pub enabled: bool,
}

impl Default for SonifySettings {
    fn default() -> Self {
        Self {
            fundamentals: DEFAULT_FUNDAMENTALS,
            decay_secs: 1.0,
            note_secs: 0.05,
            max_volume: 0.5,
            muted_volume: SILENCE_FLOOR,
            enabled: true,
        }
    }
}

impl SonifySettings {
    /// Level reached after the fade-in; muted runs keep the voices running near silence.
    pub fn target_level(&self) -> f64 {
        if self.enabled {
            self.max_volume
        } else {
            self.muted_volume
        }
    }
}

/// Per-run sonification state: which step the next pitch update belongs to.
///
/// The step counter must match the frame being drawn, so pitch updates can neither run ahead
/// of nor lag behind the visuals.
#[derive(Clone, Debug)]
pub struct Sonifier {
    settings: SonifySettings,
    next_step: u32,
}

impl Sonifier {
    pub fn new(settings: SonifySettings) -> Self {
        Self {
            settings,
            next_step: 0,
        }
    }

    pub fn settings(&self) -> &SonifySettings {
        &self.settings
    }

    /// Step the next [`Sonifier::step`] call must carry.
    pub fn next_step(&self) -> StepIndex {
        StepIndex(self.next_step)
    }

    /// Pitches of all voices at `step`.
    pub fn tones_at(&self, path: &TransformPath, step: StepIndex) -> Option<[f64; VOICES]> {
        let mut out = [0.0; VOICES];
        for (k, hz) in out.iter_mut().enumerate() {
            *hz = note_frequency(self.settings.fundamentals[k], path.coeff(k, step)?);
        }
        Some(out)
    }

    /// Fade in at the start of a run.
    pub fn start(&mut self, at_secs: f64, sink: &mut dyn ToneSink) -> PlanewarpResult<()> {
        self.next_step = 0;
        sink.send(AudioEvent {
            at_secs,
            cmd: AudioCommand::Start {
                level: self.settings.target_level(),
                ramp_secs: self.settings.decay_secs,
            },
        })
    }

    /// Retune every voice for the frame at `step`.
    pub fn step(
        &mut self,
        path: &TransformPath,
        step: StepIndex,
        at_secs: f64,
        sink: &mut dyn ToneSink,
    ) -> PlanewarpResult<()> {
        if step.0 != self.next_step {
            return Err(PlanewarpError::audio(format!(
                "pitch update for step {} while step {} was due",
                step.0, self.next_step
            )));
        }
        let tones = self.tones_at(path, step).ok_or_else(|| {
            PlanewarpError::audio(format!("step {} is past the end of the path", step.0))
        })?;
        for (voice, hz) in tones.into_iter().enumerate() {
            sink.send(AudioEvent {
                at_secs,
                cmd: AudioCommand::SetFrequency { voice, hz },
            })?;
        }
        self.next_step += 1;
        Ok(())
    }

    /// Rewind the step counter without emitting anything.
    pub fn reset(&mut self) {
        self.next_step = 0;
    }

    /// Fade out and rewind the step counter for the next run.
    pub fn stop(&mut self, at_secs: f64, sink: &mut dyn ToneSink) -> PlanewarpResult<()> {
        self.next_step = 0;
        sink.send(AudioEvent {
            at_secs,
            cmd: AudioCommand::Decay {
                ramp_secs: self.settings.decay_secs,
            },
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/sonify.rs"]
mod tests;
