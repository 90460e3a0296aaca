use super::*;
use crate::scroll::trigger::{Anchor, EndSpec};

fn vp(w: f64, h: f64) -> Viewport {
    Viewport::new(w, h, 1.0).unwrap()
}

fn hero_spec() -> TriggerSpec {
    TriggerSpec::new(0.0, 800.0)
        .start(Anchor::TOP_TOP)
        .end(EndSpec::Relative(3.0))
        .pinned()
}

fn recorder() -> (Rc<RefCell<Vec<TriggerUpdate>>>, impl FnMut(&TriggerUpdate) + 'static) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let l = Rc::clone(&log);
    (log, move |u: &TriggerUpdate| l.borrow_mut().push(u.clone()))
}

#[test]
fn add_trigger_evaluates_immediately() {
    let driver = ScrollDriver::new(vp(1280.0, 800.0));
    let (log, handler) = recorder();
    let sub = driver.add_trigger(hero_spec(), handler);
    assert!(sub.is_active());
    assert_eq!(log.borrow().len(), 1);
    assert_eq!(log.borrow()[0].toggles, vec![Toggle::Enter]);
    assert_eq!(driver.pin_spacing(), 2400.0);
}

#[test]
fn scroll_delivers_progress_in_order() {
    let driver = ScrollDriver::new(vp(1280.0, 800.0));
    let order = Rc::new(RefCell::new(Vec::new()));
    let o1 = Rc::clone(&order);
    let _a = driver.add_trigger(hero_spec(), move |u| o1.borrow_mut().push(("a", u.progress)));
    let o2 = Rc::clone(&order);
    let _b = driver.add_trigger(hero_spec(), move |u| o2.borrow_mut().push(("b", u.progress)));
    order.borrow_mut().clear();

    driver.scroll_to(1200.0);
    assert_eq!(*order.borrow(), vec![("a", 0.5), ("b", 0.5)]);

    driver.scroll_to(-50.0);
    assert_eq!(driver.scroll_y(), 0.0);
}

#[test]
fn non_finite_scroll_is_ignored() {
    let driver = ScrollDriver::new(vp(1280.0, 800.0));
    driver.scroll_to(100.0);
    driver.scroll_to(f64::NAN);
    assert_eq!(driver.scroll_y(), 100.0);
}

#[test]
fn resize_refreshes_extents_then_redelivers() {
    let driver = ScrollDriver::new(vp(1280.0, 800.0));
    let events = Rc::new(RefCell::new(Vec::new()));

    let e1 = Rc::clone(&events);
    let _r = driver.on_resize(move |v| e1.borrow_mut().push(format!("resize {}", v.height)));
    let e2 = Rc::clone(&events);
    let _t = driver.add_trigger(hero_spec(), move |u| {
        e2.borrow_mut().push(format!("progress {}", u.progress))
    });
    driver.scroll_to(1200.0);
    events.borrow_mut().clear();

    driver.resize(vp(1280.0, 400.0));
    assert_eq!(
        *events.borrow(),
        vec!["resize 400".to_owned(), "progress 1".to_owned()]
    );
    assert_eq!(driver.pin_spacing(), 1200.0);
}

#[test]
fn cancelled_trigger_receives_nothing() {
    let driver = ScrollDriver::new(vp(1280.0, 800.0));
    let (log, handler) = recorder();
    let sub = driver.add_trigger(hero_spec(), handler);
    sub.cancel();
    driver.scroll_to(500.0);
    driver.resize(vp(640.0, 480.0));
    assert_eq!(log.borrow().len(), 1);
    assert_eq!(driver.trigger_count(), 0);
}

#[test]
fn once_trigger_dies_after_enter() {
    let driver = ScrollDriver::new(vp(1280.0, 800.0));
    let spec = TriggerSpec::new(2000.0, 100.0)
        .start(Anchor::parse("top 80%").unwrap())
        .once();
    let (log, handler) = recorder();
    let sub = driver.add_trigger(spec, handler);
    assert!(log.borrow().is_empty() || log.borrow()[0].toggles.is_empty());
    log.borrow_mut().clear();

    driver.scroll_to(1500.0);
    assert_eq!(log.borrow().len(), 1);
    assert_eq!(log.borrow()[0].toggles, vec![Toggle::Enter]);
    assert!(!sub.is_active());

    driver.scroll_to(0.0);
    driver.scroll_to(1500.0);
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn handler_may_unsubscribe_itself() {
    let driver = ScrollDriver::new(vp(1280.0, 800.0));
    let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
    let calls = Rc::new(Cell::new(0));

    let s = Rc::clone(&slot);
    let c = Rc::clone(&calls);
    let sub = driver.add_trigger(hero_spec(), move |_| {
        c.set(c.get() + 1);
        if c.get() == 2 {
            s.borrow_mut().take();
        }
    });
    *slot.borrow_mut() = Some(sub);

    driver.scroll_to(100.0);
    driver.scroll_to(200.0);
    assert_eq!(calls.get(), 2);
}

#[test]
fn tick_delivers_scrubbed_progress() {
    let driver = ScrollDriver::new(vp(1280.0, 800.0));
    let (log, handler) = recorder();
    let _sub = driver.add_trigger(hero_spec().scrub(1.0), handler);
    driver.scroll_to(2400.0);
    assert_eq!(log.borrow().last().unwrap().scrubbed, 0.0);

    driver.tick(0.5);
    let mid = log.borrow().last().unwrap().scrubbed;
    assert!(mid > 0.0 && mid < 1.0);

    driver.tick(1.0);
    assert_eq!(log.borrow().last().unwrap().scrubbed, 1.0);
    let n = log.borrow().len();
    driver.tick(5.0);
    assert_eq!(log.borrow().len(), n);
}

#[test]
fn scroll_listeners_see_clamped_position() {
    let driver = ScrollDriver::new(vp(1280.0, 800.0));
    let seen = Rc::new(Cell::new(-1.0));
    let s = Rc::clone(&seen);
    let _sub = driver.on_scroll(move |y| s.set(*y));
    driver.scroll_to(-3.0);
    assert_eq!(seen.get(), 0.0);
}

#[test]
fn subscription_outliving_driver_is_harmless() {
    let driver = ScrollDriver::new(vp(1280.0, 800.0));
    let sub = driver.add_trigger(hero_spec(), |_| {});
    drop(driver);
    drop(sub);
}
