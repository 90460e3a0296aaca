use super::*;

const EXACT: [Ease; 6] = [
    Ease::Linear,
    Ease::Power1Out,
    Ease::Power2Out,
    Ease::Power3Out,
    Ease::Power4Out,
    Ease::BackOut(1.2),
];

#[test]
fn endpoints_are_stable() {
    for ease in EXACT {
        assert!(ease.apply(0.0).abs() < 1e-12, "{ease:?}");
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-12, "{ease:?}");
    }
}

#[test]
fn input_is_clamped() {
    for ease in EXACT {
        assert_eq!(ease.apply(-3.0), ease.apply(0.0));
        assert_eq!(ease.apply(9.0), ease.apply(1.0));
        assert_eq!(ease.apply(f64::NAN), ease.apply(0.0));
    }
}

#[test]
fn power_outs_are_monotonic_and_ordered() {
    for ease in [Ease::Power1Out, Ease::Power2Out, Ease::Power3Out, Ease::Power4Out] {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b && b < c);
    }
    assert!(Ease::Power4Out.apply(0.3) > Ease::Power2Out.apply(0.3));
    assert_eq!(Ease::Power2Out.apply(0.5), 0.875);
}

#[test]
fn back_out_overshoots() {
    let peak = (1..100)
        .map(|i| Ease::BackOut(1.2).apply(i as f64 / 100.0))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.0);
}

#[test]
fn lenis_curve_starts_just_above_zero_and_saturates() {
    assert!((Ease::Lenis.apply(0.0) - 0.001).abs() < 1e-12);
    assert_eq!(Ease::Lenis.apply(1.0), 1.0);
    assert!(Ease::Lenis.apply(0.5) > 0.96);
}

#[test]
fn lerp_midpoint() {
    assert_eq!(lerp(-150.0, 0.0, 0.5), -75.0);
}
