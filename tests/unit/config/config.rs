use super::*;

#[test]
fn defaults_match_reference_animation() {
    let cfg = AnimationConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.samples, 1000);
    assert_eq!(cfg.terms.len_frames(), 99);
    assert_eq!(cfg.interval_ms, 100);
    assert_eq!(cfg.fps, Some(10));
    assert_eq!(cfg.frame_delay_ms(), 100);
    assert_eq!(cfg.export_fps(), 10);
    assert_eq!(cfg.out_path, PathBuf::from("fourier_animation.gif"));
    assert_eq!(cfg.format, OutputFormat::Gif);
    assert_eq!(cfg.style.canvas.width, 1000);
    assert_eq!(cfg.style.canvas.height, 500);
    assert_eq!(cfg.sample_grid().unwrap().len(), 1000);
}

#[test]
fn partial_json_fills_defaults() {
    let cfg = AnimationConfig::from_json_str(
        r#"{ "terms": { "start": 1, "end": 11 }, "fps": 25, "style": { "line_width": 3.0 } }"#,
    )
    .unwrap();
    assert_eq!(cfg.terms.len_frames(), 10);
    assert_eq!(cfg.frame_delay_ms(), 40);
    assert_eq!(cfg.style.line_width, 3.0);
    assert_eq!(cfg.style.y_limits, [-1.5, 1.5]);
    assert_eq!(cfg.samples, 1000);
}

#[test]
fn interval_is_used_without_fps() {
    let cfg = AnimationConfig {
        fps: None,
        interval_ms: 250,
        ..AnimationConfig::default()
    };
    cfg.validate().unwrap();
    assert_eq!(cfg.frame_delay_ms(), 250);
    assert_eq!(cfg.export_fps(), 4);
}

#[test]
fn invalid_configs_fail_fast() {
    let bad_terms = AnimationConfig {
        terms: TermRange {
            start: crate::TermCount(0),
            end: crate::TermCount(10),
        },
        ..AnimationConfig::default()
    };
    assert!(matches!(
        bad_terms.validate(),
        Err(FourierError::Configuration(_))
    ));

    let empty_grid = AnimationConfig {
        samples: 0,
        ..AnimationConfig::default()
    };
    assert!(empty_grid.validate().is_err());

    let zero_fps = AnimationConfig {
        fps: Some(0),
        ..AnimationConfig::default()
    };
    assert!(zero_fps.validate().is_err());

    let mut flat_limits = AnimationConfig::default();
    flat_limits.style.y_limits = [1.0, 1.0];
    assert!(flat_limits.validate().is_err());

    let mut huge = AnimationConfig::default();
    huge.style.canvas.width = 70_000;
    assert!(huge.validate().is_err());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = AnimationConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, FourierError::Serde(_)));
}

#[test]
fn output_format_from_extension() {
    assert_eq!(
        OutputFormat::from_path(Path::new("a/b.GIF")),
        Some(OutputFormat::Gif)
    );
    assert_eq!(
        OutputFormat::from_path(Path::new("out.mp4")),
        Some(OutputFormat::Mp4)
    );
    assert_eq!(OutputFormat::from_path(Path::new("out.webm")), None);
    assert_eq!(OutputFormat::Mp4.extension(), "mp4");
}
