use super::*;

fn ev(at_secs: f64, cmd: AudioCommand) -> AudioEvent {
    AudioEvent { at_secs, cmd }
}

fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0f32, |m, &s| m.max(s.abs()))
}

#[test]
fn gain_ramp_is_exponential_between_endpoints() {
    let r = GainRamp {
        from: 0.01,
        to: 1.0,
        start: 100,
        len: 100,
    };
    assert_eq!(r.value_at(0), 0.01);
    assert_eq!(r.value_at(250), 1.0);
    assert!((r.value_at(150) - 0.1).abs() < 1e-12);
}

#[test]
fn silent_until_started() {
    let mut synth = PcmSynth::with_sample_rate(&SonifySettings::default(), 8_000);
    synth
        .send(ev(0.5, AudioCommand::SetFrequency { voice: 0, hz: 440.0 }))
        .unwrap();
    assert_eq!(synth.samples().len(), 4_000 * 2);
    assert!(peak(synth.samples()) < 1e-3);
}

#[test]
fn fade_in_then_decay_renders_tail() {
    let settings = SonifySettings::default();
    let mut synth = PcmSynth::with_sample_rate(&settings, 8_000);
    synth
        .send(ev(
            0.0,
            AudioCommand::Start {
                level: settings.max_volume,
                ramp_secs: 0.1,
            },
        ))
        .unwrap();
    synth
        .send(ev(0.5, AudioCommand::Decay { ramp_secs: 0.25 }))
        .unwrap();
    let pcm = synth.finish();
    assert_eq!(pcm.len(), 6_000 * 2);

    let loud = &pcm[2 * 2_000..2 * 4_000];
    assert!(peak(loud) > 0.05);
    let tail = &pcm[pcm.len() - 200..];
    assert!(peak(tail) < peak(loud) / 10.0);
}

#[test]
fn voices_are_panned_in_pairs() {
    let settings = SonifySettings::default();
    let mut synth = PcmSynth::with_sample_rate(&settings, 8_000);
    synth
        .send(ev(0.0, AudioCommand::Start { level: 0.5, ramp_secs: 0.0 }))
        .unwrap();
    // Silence the right channel's voices.
    for voice in [1, 3] {
        synth
            .send(ev(0.0, AudioCommand::SetFrequency { voice, hz: 0.0 }))
            .unwrap();
    }
    synth
        .send(ev(0.2, AudioCommand::SetFrequency { voice: 0, hz: 440.0 }))
        .unwrap();
    let pcm = synth.samples();
    let left: Vec<f32> = pcm.iter().step_by(2).copied().collect();
    let right: Vec<f32> = pcm.iter().skip(1).step_by(2).copied().collect();
    // A 0 Hz square is a constant; after the low-pass settles it has no swing.
    let swing = |xs: &[f32]| {
        let tail = &xs[xs.len() / 2..];
        let max = tail.iter().copied().fold(f32::MIN, f32::max);
        let min = tail.iter().copied().fold(f32::MAX, f32::min);
        max - min
    };
    assert!(swing(&left) > 0.05);
    assert!(swing(&right) < 1e-3);
}

#[test]
fn bad_voice_or_frequency_is_audio_error() {
    let mut synth = PcmSynth::default();
    let err = synth
        .send(ev(0.0, AudioCommand::SetFrequency { voice: 4, hz: 1.0 }))
        .unwrap_err();
    assert!(err.to_string().contains("audio error:"));
    assert!(
        synth
            .send(ev(0.0, AudioCommand::SetFrequency { voice: 0, hz: f64::NAN }))
            .is_err()
    );
}

#[test]
fn f32le_export_writes_four_bytes_per_sample() {
    let path = std::env::temp_dir().join(format!("planewarp_pcm_{}.f32le", std::process::id()));
    write_f32le(&[0.5, -0.25], &path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len(), 8);
    assert_eq!(f32::from_le_bytes(bytes[0..4].try_into().unwrap()), 0.5);
    assert_eq!(f32::from_le_bytes(bytes[4..8].try_into().unwrap()), -0.25);
    std::fs::remove_file(&path).unwrap();
}
