use super::*;

#[test]
fn empty_object_yields_production_defaults() {
    let cfg = HeroConfig::from_json("{}").unwrap();
    assert_eq!(cfg.sequence.base_path, "/hero");
    assert_eq!(cfg.sequence.prefix, "protfolio");
    assert_eq!(cfg.sequence.extension, "jpg");
    assert_eq!(cfg.sequence.frame_count, 80);
    assert_eq!(cfg.pin.span_viewports, 3.0);
    assert_eq!(cfg.pin.scrub_lag_secs, 1.0);
    assert_eq!(cfg.preloader.min_hold_secs, 2.0);
    assert_eq!(cfg.preloader.fade_secs, 0.8);
    assert_eq!(cfg.render.smoothing, Smoothing::High);
    assert_eq!(cfg, HeroConfig::default());
}

#[test]
fn partial_sections_keep_other_defaults() {
    let cfg = HeroConfig::from_json(
        r#"{ "sequence": { "base_path": "frames", "frame_count": 4 }, "render": { "clear_rgba": null } }"#,
    )
    .unwrap();
    assert_eq!(cfg.sequence.base_path, "frames");
    assert_eq!(cfg.sequence.frame_count, 4);
    assert_eq!(cfg.sequence.prefix, "protfolio");
    assert_eq!(cfg.render.clear_rgba, None);
    assert_eq!(cfg.render.smoothing, Smoothing::High);
}

#[test]
fn invalid_values_are_rejected() {
    for bad in [
        r#"{ "sequence": { "frame_count": 0 } }"#,
        r#"{ "sequence": { "frame_count": 1001 } }"#,
        r#"{ "sequence": { "prefix": "" } }"#,
        r#"{ "sequence": { "extension": ".jpg" } }"#,
        r#"{ "pin": { "span_viewports": 0.0 } }"#,
        r#"{ "pin": { "scrub_lag_secs": -1.0 } }"#,
        r#"{ "loader": { "threads": 0 } }"#,
        r#"{ "preloader": { "counter_tick_secs": 0.0 } }"#,
        r#"{ "preloader": { "counter_max_step": 0.0 } }"#,
        r#"{ "unknown": 1 }"#,
    ] {
        let err = HeroConfig::from_json(bad).unwrap_err();
        assert!(err.to_string().contains("config error:"), "{bad}: {err}");
    }
}

#[test]
fn from_path_reports_missing_file() {
    let err = HeroConfig::from_path("target/definitely/missing/config.json").unwrap_err();
    assert!(err.to_string().contains("read config"));
}
