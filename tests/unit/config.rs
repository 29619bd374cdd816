use super::*;

#[test]
fn defaults_match_reference_constants() {
    let cfg = AnimationConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.steps, 100);
    assert_eq!(cfg.fps, Fps { num: 24, den: 1 });
    assert_eq!(cfg.canvas, Canvas { width: 500, height: 500 });
    assert_eq!(cfg.decay_secs, 1.0);
    assert_eq!(cfg.note_secs, 0.05);
    assert_eq!(cfg.max_volume, 0.5);
    assert_eq!(cfg.grid_spacing(), 50);
    assert_eq!(cfg.frame_mode, FrameMode::Lazy);
}

#[test]
fn json_overrides_only_named_fields() {
    let cfg = AnimationConfig::from_json_str(
        r#"{ "steps": 4, "canvas": { "width": 64, "height": 32 }, "frame_mode": "eager" }"#,
    )
    .unwrap();
    assert_eq!(cfg.steps, 4);
    assert_eq!(cfg.canvas, Canvas { width: 64, height: 32 });
    assert_eq!(cfg.frame_mode, FrameMode::Eager);
    assert_eq!(cfg.fps, Fps::default());
    assert_eq!(cfg.grid_spacing(), 3);
}

#[test]
fn invalid_json_is_serde_error() {
    let err = AnimationConfig::from_json_str(r#"{ "steps": "many" }"#).unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
    let err = AnimationConfig::from_json_str(r#"{ "stepz": 3 }"#).unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
}

#[test]
fn zero_steps_and_bad_audio_settings_are_config_errors() {
    let err = AnimationConfig::from_json_str(r#"{ "steps": 0 }"#).unwrap_err();
    assert!(err.is_config());

    let cases = [
        AnimationConfig {
            max_volume: 1.5,
            ..AnimationConfig::default()
        },
        AnimationConfig {
            decay_secs: 0.0,
            ..AnimationConfig::default()
        },
        AnimationConfig {
            muted_volume: 0.0,
            ..AnimationConfig::default()
        },
        AnimationConfig {
            fundamentals: [1.0, f64::NAN, 1.0, 1.0],
            ..AnimationConfig::default()
        },
        AnimationConfig {
            canvas: Canvas { width: 0, height: 10 },
            ..AnimationConfig::default()
        },
        AnimationConfig {
            fps: Fps { num: 24, den: 0 },
            ..AnimationConfig::default()
        },
        AnimationConfig {
            grid_spacing: Some(0),
            ..AnimationConfig::default()
        },
    ];
    for cfg in cases {
        assert!(cfg.validate().unwrap_err().is_config(), "{cfg:?}");
    }
}

#[test]
fn sound_toggle_maps_to_muted_level() {
    let cfg = AnimationConfig {
        sound_enabled: false,
        ..AnimationConfig::default()
    };
    assert_eq!(cfg.sonify_settings().target_level(), SILENCE_FLOOR);
}
