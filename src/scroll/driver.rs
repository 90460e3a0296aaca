use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::foundation::core::Viewport;
use crate::scroll::events::{Listeners, Subscription};
use crate::scroll::trigger::{ScrollTrigger, Toggle, TriggerSpec, TriggerUpdate};

type TriggerHandler = Rc<RefCell<dyn FnMut(&TriggerUpdate)>>;

struct TriggerSlot {
    id: u64,
    active: Rc<Cell<bool>>,
    trigger: ScrollTrigger,
    handler: TriggerHandler,
}

#[derive(Default)]
struct TriggerRegistry {
    next_id: u64,
    slots: Vec<TriggerSlot>,
}

struct Shared {
    viewport: Cell<Viewport>,
    scroll_y: Cell<f64>,
    now: Cell<f64>,
    triggers: RefCell<TriggerRegistry>,
    resize: Listeners<Viewport>,
    scroll: Listeners<f64>,
}

/// The page's scroll position, viewport, and clock, plus everything listening to them.
///
/// Cloning yields another handle to the same driver. All delivery is synchronous, on the calling
/// thread, in registration order.
#[derive(Clone)]
pub struct ScrollDriver {
    shared: Rc<Shared>,
}

impl std::fmt::Debug for ScrollDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollDriver")
            .field("viewport", &self.viewport())
            .field("scroll_y", &self.scroll_y())
            .field("now", &self.now())
            .field("triggers", &self.trigger_count())
            .finish()
    }
}

impl ScrollDriver {
    pub fn new(viewport: Viewport) -> Self {
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            dpr = viewport.dpr,
            "scroll driver initialized"
        );
        Self {
            shared: Rc::new(Shared {
                viewport: Cell::new(viewport),
                scroll_y: Cell::new(0.0),
                now: Cell::new(0.0),
                triggers: RefCell::new(TriggerRegistry::default()),
                resize: Listeners::new(),
                scroll: Listeners::new(),
            }),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.shared.viewport.get()
    }

    pub fn scroll_y(&self) -> f64 {
        self.shared.scroll_y.get()
    }

    /// Clock in seconds, as last passed to [`ScrollDriver::tick`].
    pub fn now(&self) -> f64 {
        self.shared.now.get()
    }

    /// Live triggers.
    pub fn trigger_count(&self) -> usize {
        self.shared
            .triggers
            .borrow()
            .slots
            .iter()
            .filter(|s| s.active.get())
            .count()
    }

    /// Page height added by pinned triggers.
    pub fn pin_spacing(&self) -> f64 {
        self.shared
            .triggers
            .borrow()
            .slots
            .iter()
            .filter(|s| s.active.get())
            .map(|s| s.trigger.pin_spacing())
            .sum()
    }

    /// Move to `y` (clamped to `>= 0`) and update every trigger. Non-finite positions are
    /// ignored.
    pub fn scroll_to(&self, y: f64) {
        if !y.is_finite() {
            tracing::warn!(y, "ignoring non-finite scroll position");
            return;
        }
        let y = y.max(0.0);
        self.shared.scroll_y.set(y);
        self.shared.scroll.emit(&y);
        let now = self.now();
        self.deliver(|_, t| Some(t.update(y, now)));
    }

    /// Apply a new viewport: refresh trigger extents, notify resize listeners, then re-deliver
    /// trigger state at the current scroll position.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn resize(&self, viewport: Viewport) {
        self.shared.viewport.set(viewport);
        {
            let mut reg = self.shared.triggers.borrow_mut();
            for slot in reg.slots.iter_mut() {
                slot.trigger.refresh(viewport.height);
            }
        }
        self.shared.resize.emit(&viewport);
        let (y, now) = (self.scroll_y(), self.now());
        self.deliver(|_, t| Some(t.update(y, now)));
    }

    /// Advance the clock to `now` seconds and deliver scrub-smoothing progress.
    pub fn tick(&self, now: f64) {
        if !now.is_finite() {
            return;
        }
        self.shared.now.set(now);
        self.deliver(|_, t| t.tick(now));
    }

    pub fn on_resize(&self, handler: impl FnMut(&Viewport) + 'static) -> Subscription {
        self.shared.resize.subscribe(handler)
    }

    /// Raw scroll position changes, before triggers update.
    pub fn on_scroll(&self, handler: impl FnMut(&f64) + 'static) -> Subscription {
        self.shared.scroll.subscribe(handler)
    }

    /// Register a trigger and evaluate it immediately at the current scroll position.
    pub fn add_trigger(
        &self,
        spec: TriggerSpec,
        handler: impl FnMut(&TriggerUpdate) + 'static,
    ) -> Subscription {
        let active = Rc::new(Cell::new(true));
        let id = {
            let mut reg = self.shared.triggers.borrow_mut();
            let id = reg.next_id;
            reg.next_id += 1;
            reg.slots.push(TriggerSlot {
                id,
                active: Rc::clone(&active),
                trigger: ScrollTrigger::new(spec, self.viewport().height),
                handler: Rc::new(RefCell::new(handler)),
            });
            id
        };
        tracing::debug!(id, pin = spec.pin, once = spec.once, "trigger added");

        let weak: Weak<Shared> = Rc::downgrade(&self.shared);
        let sub = Subscription::new(active, move || {
            if let Some(shared) = weak.upgrade()
                && let Ok(mut reg) = shared.triggers.try_borrow_mut()
            {
                reg.slots.retain(|s| s.id != id);
            }
        });

        let (y, now) = (self.scroll_y(), self.now());
        self.deliver(|slot_id, t| (slot_id == id).then(|| t.update(y, now)));
        sub
    }

    /// Compute updates with the registry borrowed, then run handlers with it released so they
    /// may scroll, subscribe, or cancel.
    fn deliver(&self, mut f: impl FnMut(u64, &mut ScrollTrigger) -> Option<TriggerUpdate>) {
        let pending: Vec<(Rc<Cell<bool>>, TriggerHandler, bool, TriggerUpdate)> = {
            let mut reg = self.shared.triggers.borrow_mut();
            reg.slots.retain(|s| s.active.get());
            reg.slots
                .iter_mut()
                .filter_map(|s| {
                    let once = s.trigger.spec().once;
                    f(s.id, &mut s.trigger)
                        .map(|u| (Rc::clone(&s.active), Rc::clone(&s.handler), once, u))
                })
                .collect()
        };

        for (active, handler, once, update) in pending {
            if !active.get() {
                continue;
            }
            match handler.try_borrow_mut() {
                Ok(mut h) => (&mut *h)(&update),
                Err(_) => tracing::warn!("trigger handler re-entered; update skipped"),
            }
            if once && update.toggles.contains(&Toggle::Enter) {
                tracing::debug!("once trigger fired; killing it");
                active.set(false);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/driver.rs"]
mod tests;
