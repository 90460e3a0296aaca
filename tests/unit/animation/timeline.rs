use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn relative_positions_follow_the_timeline_end() {
    let tl = hero_intro(0.5);
    let starts = tl.start_times();
    let expected = [
        (".hero-line-1", 0.0),
        (".hero-line-2", 0.4),
        (".hero-line-3", 1.1),
        (".hero-subtitle", 0.8),
        (".hero-cta", 1.2),
    ];
    assert_eq!(starts.len(), expected.len());
    for ((name, got), (want_name, want)) in starts.iter().zip(expected) {
        assert_eq!(*name, want_name);
        assert!(approx(*got, want), "{name}: {got} != {want}");
    }
    assert!(approx(tl.duration(), 1.8));
    assert_eq!(tl.delay(), 0.5);
}

#[test]
fn everything_hidden_before_the_delay_elapses() {
    let tl = hero_intro(0.5);
    for (name, p) in tl.sample(0.25) {
        assert_eq!(p.opacity, 0.0, "{name}");
    }
    let line1 = tl.sample(0.25)[0].1;
    assert_eq!(line1.x, -150.0);
    assert_eq!(line1.scale, 0.9);
}

#[test]
fn everything_settles_at_identity() {
    let tl = hero_intro(0.5);
    assert!(!tl.is_complete(2.0));
    assert!(tl.is_complete(2.3));
    for (name, p) in tl.sample(10.0) {
        assert!(approx(p.opacity, 1.0), "{name}");
        assert!(approx(p.x, 0.0), "{name}");
        assert!(approx(p.y, 0.0), "{name}");
        assert!(approx(p.scale, 1.0), "{name}");
    }
}

#[test]
fn offsets_never_go_before_zero() {
    let mut tl = Timeline::new(0.0);
    tl.push(
        Tween::new("a", Props::HIDDEN, Props::IDENTITY, 0.2, Ease::Linear),
        Position::Offset(-5.0),
    );
    assert_eq!(tl.start_times()[0].1, 0.0);
    tl.push(
        Tween::new("b", Props::HIDDEN, Props::IDENTITY, 0.1, Ease::Linear),
        Position::At(3.0),
    );
    assert!(approx(tl.duration(), 3.1));
}

#[test]
fn zero_duration_tween_jumps() {
    let tw = Tween::new("a", Props::HIDDEN, Props::IDENTITY, 0.0, Ease::Linear);
    assert_eq!(tw.sample(-0.1).opacity, 0.0);
    assert_eq!(tw.sample(0.0).opacity, 1.0);
}

#[test]
fn linear_midpoint() {
    let tw = Tween::new(
        "a",
        Props::HIDDEN,
        Props {
            x: 100.0,
            ..Props::IDENTITY
        },
        2.0,
        Ease::Linear,
    );
    let p = tw.sample(1.0);
    assert!(approx(p.opacity, 0.5));
    assert!(approx(p.x, 50.0));
}
