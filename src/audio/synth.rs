//! Offline rendition of the audio command stream: four square-wave voices, panned in pairs,
//! summed through a master gain and a low-pass filter into interleaved stereo `f32` PCM.

use std::path::Path;

use crate::audio::sonify::{
    AudioCommand, AudioEvent, SILENCE_FLOOR, SonifySettings, ToneSink, VOICES,
};
use crate::foundation::error::{PlanewarpError, PlanewarpResult};

/// Output sample rate of [`PcmSynth`].
pub const SYNTH_SAMPLE_RATE: u32 = 48_000;
const LOWPASS_HZ: f64 = 700.0;
const CHANNELS: usize = 2;

/// Exponential gain ramp between two strictly positive levels.
#[derive(Clone, Copy, Debug)]
struct GainRamp {
    from: f64,
    to: f64,
    start: u64,
    len: u64,
}

impl GainRamp {
    fn hold(level: f64) -> Self {
        Self {
            from: level,
            to: level,
            start: 0,
            len: 0,
        }
    }

    fn value_at(&self, n: u64) -> f64 {
        if n <= self.start {
            return self.from;
        }
        if self.len == 0 || n >= self.start + self.len {
            return self.to;
        }
        let t = (n - self.start) as f64 / self.len as f64;
        self.from * (self.to / self.from).powf(t)
    }

    fn end(&self) -> u64 {
        self.start + self.len
    }
}

/// Renders [`AudioEvent`]s into interleaved stereo PCM at [`SYNTH_SAMPLE_RATE`].
///
/// Events are applied at their timestamps; audio between events is synthesized with the
/// parameters in effect. Even voices are panned hard left, odd voices hard right.
#[derive(Clone, Debug)]
pub struct PcmSynth {
    sample_rate: u32,
    voice_level: f64,
    note_secs: f64,
    freqs: [f64; VOICES],
    phases: [f64; VOICES],
    voice_env: GainRamp,
    master: GainRamp,
    lp_alpha: f64,
    lp_state: [f64; CHANNELS],
    cursor: u64,
    out: Vec<f32>,
}

impl PcmSynth {
    pub fn new(settings: &SonifySettings) -> Self {
        Self::with_sample_rate(settings, SYNTH_SAMPLE_RATE)
    }

    pub fn with_sample_rate(settings: &SonifySettings, sample_rate: u32) -> Self {
        let sr = f64::from(sample_rate.max(1));
        Self {
            sample_rate: sample_rate.max(1),
            voice_level: settings.max_volume,
            note_secs: settings.note_secs,
            freqs: settings.fundamentals,
            phases: [0.0; VOICES],
            voice_env: GainRamp::hold(SILENCE_FLOOR),
            master: GainRamp::hold(SILENCE_FLOOR),
            lp_alpha: 1.0 - (-2.0 * std::f64::consts::PI * LOWPASS_HZ / sr).exp(),
            lp_state: [0.0; CHANNELS],
            cursor: 0,
            out: Vec::new(),
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Current pitch of every voice.
    pub fn frequencies(&self) -> [f64; VOICES] {
        self.freqs
    }

    /// Samples rendered so far, interleaved stereo.
    pub fn samples(&self) -> &[f32] {
        &self.out
    }

    /// Render through the end of any pending fade and return the PCM buffer.
    pub fn finish(mut self) -> Vec<f32> {
        let end = self.master.end().max(self.voice_env.end());
        self.render_until(end);
        self.out
    }

    fn secs_to_samples(&self, secs: f64) -> u64 {
        (secs.max(0.0) * f64::from(self.sample_rate)).round() as u64
    }

    fn render_until(&mut self, target: u64) {
        if target <= self.cursor {
            return;
        }
        let sr = f64::from(self.sample_rate);
        let frames = (target - self.cursor) as usize;
        self.out.reserve(frames * CHANNELS);
        for n in self.cursor..target {
            let gain = self.master.value_at(n) * self.voice_env.value_at(n) * self.voice_level;
            let mut mix = [0.0f64; CHANNELS];
            for v in 0..VOICES {
                let square = if self.phases[v] < 0.5 { 1.0 } else { -1.0 };
                mix[v % CHANNELS] += square * gain;
                self.phases[v] = (self.phases[v] + self.freqs[v] / sr).fract();
            }
            for (ch, x) in mix.into_iter().enumerate() {
                self.lp_state[ch] += self.lp_alpha * (x - self.lp_state[ch]);
                self.out.push(self.lp_state[ch].clamp(-1.0, 1.0) as f32);
            }
        }
        self.cursor = target;
    }

    fn ramp(&self, current: &GainRamp, to: f64, len: u64) -> GainRamp {
        GainRamp {
            from: current.value_at(self.cursor).max(SILENCE_FLOOR),
            to: to.max(SILENCE_FLOOR),
            start: self.cursor,
            len,
        }
    }
}

impl Default for PcmSynth {
    fn default() -> Self {
        Self::new(&SonifySettings::default())
    }
}

impl ToneSink for PcmSynth {
    fn send(&mut self, event: AudioEvent) -> PlanewarpResult<()> {
        let at = self.secs_to_samples(event.at_secs);
        self.render_until(at);
        match event.cmd {
            AudioCommand::Start { level, ramp_secs } => {
                let len = self.secs_to_samples(ramp_secs);
                self.master = self.ramp(&self.master, level, len);
                let note_len = self.secs_to_samples(self.note_secs);
                self.voice_env = self.ramp(&self.voice_env, 1.0, note_len);
            }
            AudioCommand::SetFrequency { voice, hz } => {
                let slot = self.freqs.get_mut(voice).ok_or_else(|| {
                    PlanewarpError::audio(format!("voice {voice} out of range (0..{VOICES})"))
                })?;
                if !hz.is_finite() || hz < 0.0 {
                    return Err(PlanewarpError::audio(format!(
                        "voice {voice} frequency must be finite and >= 0, got {hz}"
                    )));
                }
                *slot = hz;
            }
            AudioCommand::Decay { ramp_secs } => {
                let len = self.secs_to_samples(ramp_secs);
                self.master = self.ramp(&self.master, SILENCE_FLOOR, len);
            }
        }
        Ok(())
    }
}

/// Write interleaved samples as raw little-endian `f32` PCM.
pub fn write_f32le(samples_interleaved: &[f32], out_path: &Path) -> PlanewarpResult<()> {
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            PlanewarpError::audio(format!(
                "failed to create audio output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }

    let mut bytes = Vec::<u8>::with_capacity(samples_interleaved.len() * 4);
    for &sample in samples_interleaved {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    std::fs::write(out_path, bytes).map_err(|e| {
        PlanewarpError::audio(format!(
            "failed to write audio file '{}': {e}",
            out_path.display()
        ))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/audio/synth.rs"]
mod tests;
