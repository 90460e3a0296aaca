use super::*;

#[test]
fn starts_hidden_and_offset() {
    let r = RevealState::new(".reveal");
    let p = r.props();
    assert_eq!(p.opacity, 0.0);
    assert_eq!(p.y, 60.0);
    assert_eq!(r.direction(), PlayDirection::Paused);
}

#[test]
fn enter_plays_to_the_end_and_pauses() {
    let mut r = RevealState::new(".reveal");
    r.on_toggle(Toggle::Enter);
    r.tick(0.5);
    assert!(r.props().opacity > 0.5);
    r.tick(1.0);
    assert_eq!(r.playhead(), 1.0);
    assert_eq!(r.props(), Props::IDENTITY);
    assert_eq!(r.direction(), PlayDirection::Paused);
}

#[test]
fn leave_back_reverses_and_other_toggles_do_nothing() {
    let mut r = RevealState::new(".reveal");
    r.on_toggle(Toggle::Enter);
    r.tick(2.0);

    r.on_toggle(Toggle::Leave);
    r.on_toggle(Toggle::EnterBack);
    assert_eq!(r.direction(), PlayDirection::Paused);
    assert_eq!(r.playhead(), 1.0);

    r.on_toggle(Toggle::LeaveBack);
    assert_eq!(r.direction(), PlayDirection::Reverse);
    r.tick(0.25);
    assert_eq!(r.playhead(), 0.75);
    r.tick(5.0);
    assert_eq!(r.playhead(), 0.0);
    assert_eq!(r.props().opacity, 0.0);
}
