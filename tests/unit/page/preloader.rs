use super::*;

fn cfg() -> PreloaderConfig {
    PreloaderConfig::default()
}

#[test]
fn rng_is_deterministic_per_seed() {
    let mut a = Rng64::new(123);
    let mut b = Rng64::new(123);
    for _ in 0..16 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
    let mut c = Rng64::new(7);
    for _ in 0..1000 {
        let v = c.next_f64_01();
        assert!((0.0..1.0).contains(&v));
    }
}

#[test]
fn counter_ticks_every_interval_and_caps_at_100() {
    let mut counter = LoadingCounter::new(&cfg(), 0.0);
    counter.advance_to(0.04);
    assert_eq!(counter.count(), 0.0);
    assert_eq!(counter.dash_offset(), RING_CIRCUMFERENCE);

    counter.advance_to(0.5);
    let early = counter.count();
    assert!(early > 0.0 && early <= 50.0, "{early}");

    counter.advance_to(1000.0);
    assert_eq!(counter.count(), 100.0);
    assert_eq!(counter.display(), 100);
    assert!(counter.is_done());
    assert_eq!(counter.dash_offset(), 0.0);
}

#[test]
fn counter_is_reproducible() {
    let mut a = LoadingCounter::new(&cfg(), 0.0);
    let mut b = LoadingCounter::new(&cfg(), 0.0);
    a.advance_to(0.73);
    b.advance_to(0.3);
    b.advance_to(0.73);
    assert_eq!(a.count(), b.count());
}

#[test]
fn counter_without_step_returns_after_long_gaps() {
    let stalled = PreloaderConfig {
        counter_max_step: 0.0,
        ..cfg()
    };
    let mut counter = LoadingCounter::new(&stalled, 0.0);
    counter.advance_to(1e12);
    assert_eq!(counter.count(), 0.0);
    counter.advance_to(f64::INFINITY);
    assert_eq!(counter.count(), 0.0);

    let mut p = Preloader::new(stalled, 1e17);
    p.tick(1e17 + 1.0);
    p.tick(2e17);
    assert_eq!(p.counter().count(), 0.0);
    assert_eq!(p.phase(), PreloaderPhase::Loading);
}

#[test]
fn counter_catches_up_after_a_long_gap() {
    let mut counter = LoadingCounter::new(&cfg(), 1e9);
    counter.advance_to(1e9 + 3600.0);
    assert!(counter.is_done());
}

#[test]
fn phases_follow_hold_and_fade() {
    let mut p = Preloader::new(cfg(), 0.0);
    p.tick(1.0);
    assert_eq!(p.phase(), PreloaderPhase::Loading);

    p.images_loaded(1.0);
    assert_eq!(p.phase(), PreloaderPhase::Loaded);
    p.tick(2.9);
    assert_eq!(p.phase(), PreloaderPhase::Loaded);
    assert_eq!(p.overlay_opacity(2.9), 1.0);

    p.tick(3.4);
    assert_eq!(p.phase(), PreloaderPhase::FadingOut);
    let o = p.overlay_opacity(3.4);
    assert!((o - 0.5).abs() < 1e-9, "{o}");
    assert!(p.intro_props(3.4).is_none());

    p.tick(3.85);
    assert_eq!(p.phase(), PreloaderPhase::Content);
    assert_eq!(p.overlay_opacity(3.85), 0.0);
    assert!((p.content_at().unwrap() - 3.8).abs() < 1e-9);
}

#[test]
fn intro_starts_half_a_second_after_content() {
    let mut p = Preloader::new(cfg(), 0.0);
    p.images_loaded(0.0);
    p.tick(2.9);
    let props = p.intro_props(3.0).unwrap();
    assert!(props.iter().all(|(_, pr)| pr.opacity == 0.0));
    let done = p.intro_props(2.8 + 0.5 + 1.9).unwrap();
    assert!(done.iter().all(|(_, pr)| (pr.opacity - 1.0).abs() < 1e-9));
}

#[test]
fn failure_pins_loading_forever() {
    let mut p = Preloader::new(cfg(), 0.0);
    p.load_failed(&LoadError::new(3, "/hero/protfolio_003.jpg", "corrupt"));
    p.images_loaded(1.0);
    p.tick(100.0);
    assert!(p.has_failed());
    assert_eq!(p.phase(), PreloaderPhase::Loading);
    assert_eq!(p.overlay_opacity(100.0), 1.0);
    assert!(p.intro_props(100.0).is_none());
}
