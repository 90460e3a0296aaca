use super::*;

#[test]
fn parses_suffix_kind() {
    let c = StatCounter::parse(" 500+ ").unwrap();
    assert_eq!(c.target(), 500);
    assert_eq!(c.text_at(0.0), "500+");
    let p = StatCounter::parse("98%").unwrap();
    assert_eq!(p.target(), 98);
    assert!(StatCounter::parse("lots").is_err());
}

#[test]
fn counts_up_after_enter() {
    let mut c = StatCounter::parse("500+").unwrap();
    assert!(!c.is_started());
    c.on_toggle(Toggle::Leave, 1.0);
    assert!(!c.is_started());

    c.on_toggle(Toggle::Enter, 10.0);
    assert_eq!(c.text_at(10.0), "0+");
    // power2.out(0.5) = 0.875
    assert_eq!(c.text_at(11.0), "438+");
    assert_eq!(c.text_at(12.0), "500+");
    assert_eq!(c.text_at(99.0), "500+");
}

#[test]
fn percent_keeps_its_suffix() {
    let mut c = StatCounter::parse("98%").unwrap();
    c.on_toggle(Toggle::Enter, 0.0);
    assert_eq!(c.text_at(2.0), "98%");
}

#[test]
fn second_enter_does_not_restart() {
    let mut c = StatCounter::parse("50+").unwrap();
    c.on_toggle(Toggle::Enter, 0.0);
    c.on_toggle(Toggle::Enter, 5.0);
    assert_eq!(c.text_at(2.0), "50+");
}
