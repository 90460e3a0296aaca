use super::*;

#[test]
fn delivers_in_registration_order() {
    let listeners = Listeners::<u32>::new();
    let log = Rc::new(RefCell::new(Vec::new()));

    let l1 = Rc::clone(&log);
    let _a = listeners.subscribe(move |e| l1.borrow_mut().push(("a", *e)));
    let l2 = Rc::clone(&log);
    let _b = listeners.subscribe(move |e| l2.borrow_mut().push(("b", *e)));

    assert_eq!(listeners.emit(&7), 2);
    assert_eq!(*log.borrow(), vec![("a", 7), ("b", 7)]);
}

#[test]
fn dropping_detaches() {
    let listeners = Listeners::<()>::new();
    let hits = Rc::new(Cell::new(0));
    let h = Rc::clone(&hits);
    let sub = listeners.subscribe(move |_| h.set(h.get() + 1));
    listeners.emit(&());
    drop(sub);
    assert_eq!(listeners.emit(&()), 0);
    assert_eq!(hits.get(), 1);
    assert!(listeners.is_empty());
}

#[test]
fn cancel_during_dispatch_stops_later_handlers() {
    let listeners = Listeners::<()>::new();
    let second_hits = Rc::new(Cell::new(0));
    let held: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

    let h = Rc::clone(&held);
    let _first = listeners.subscribe(move |_| {
        if let Some(sub) = h.borrow_mut().take() {
            sub.cancel();
        }
    });
    let s = Rc::clone(&second_hits);
    let second = listeners.subscribe(move |_| s.set(s.get() + 1));
    *held.borrow_mut() = Some(second);

    assert_eq!(listeners.emit(&()), 1);
    assert_eq!(second_hits.get(), 0);
    assert_eq!(listeners.len(), 1);
}

#[test]
fn subscribe_during_dispatch_takes_effect_next_time() {
    let listeners = Rc::new(Listeners::<()>::new());
    let added: Rc<RefCell<Vec<Subscription>>> = Rc::new(RefCell::new(Vec::new()));

    let l = Rc::clone(&listeners);
    let a = Rc::clone(&added);
    let _outer = listeners.subscribe(move |_| {
        if a.borrow().is_empty() {
            a.borrow_mut().push(l.subscribe(|_| {}));
        }
    });

    assert_eq!(listeners.emit(&()), 1);
    assert_eq!(listeners.emit(&()), 2);
}

#[test]
fn subscription_outliving_registry_is_harmless() {
    let listeners = Listeners::<()>::new();
    let sub = listeners.subscribe(|_| {});
    assert!(sub.is_active());
    drop(listeners);
    sub.cancel();
}
