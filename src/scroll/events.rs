//! Single-threaded listener registry with detach-on-drop subscriptions.
//!
//! Dispatch works on a snapshot of the registered handlers, so a handler may subscribe or cancel
//! (including itself) while an event is being delivered. A handler cancelled mid-dispatch does
//! not see the rest of that dispatch.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Handler<E> = Rc<RefCell<dyn FnMut(&E)>>;

struct Slot<E: 'static> {
    id: u64,
    active: Rc<Cell<bool>>,
    handler: Handler<E>,
}

struct Registry<E: 'static> {
    next_id: u64,
    slots: Vec<Slot<E>>,
}

/// Handlers for one event type.
pub struct Listeners<E: 'static> {
    registry: Rc<RefCell<Registry<E>>>,
}

impl<E: 'static> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: 'static> std::fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("active", &self.len())
            .finish()
    }
}

impl<E: 'static> Listeners<E> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                slots: Vec::new(),
            })),
        }
    }

    /// Register `handler`. It stays registered until the returned [`Subscription`] is cancelled
    /// or dropped.
    pub fn subscribe(&self, handler: impl FnMut(&E) + 'static) -> Subscription {
        let active = Rc::new(Cell::new(true));
        let id = {
            let mut reg = self.registry.borrow_mut();
            let id = reg.next_id;
            reg.next_id += 1;
            reg.slots.push(Slot {
                id,
                active: Rc::clone(&active),
                handler: Rc::new(RefCell::new(handler)),
            });
            id
        };

        let registry: Weak<RefCell<Registry<E>>> = Rc::downgrade(&self.registry);
        Subscription::new(active, move || {
            if let Some(registry) = registry.upgrade()
                && let Ok(mut reg) = registry.try_borrow_mut()
            {
                reg.slots.retain(|s| s.id != id);
            }
        })
    }

    /// Deliver `event` to every active handler in registration order. Returns how many handlers
    /// ran.
    pub fn emit(&self, event: &E) -> usize {
        let snapshot: Vec<(Rc<Cell<bool>>, Handler<E>)> = {
            let mut reg = self.registry.borrow_mut();
            reg.slots.retain(|s| s.active.get());
            reg.slots
                .iter()
                .map(|s| (Rc::clone(&s.active), Rc::clone(&s.handler)))
                .collect()
        };

        let mut delivered = 0;
        for (active, handler) in snapshot {
            if !active.get() {
                continue;
            }
            match handler.try_borrow_mut() {
                Ok(mut h) => {
                    (&mut *h)(event);
                    delivered += 1;
                }
                Err(_) => tracing::warn!("listener re-entered during its own dispatch; skipped"),
            }
        }
        delivered
    }

    /// Number of active handlers.
    pub fn len(&self) -> usize {
        self.registry
            .borrow()
            .slots
            .iter()
            .filter(|s| s.active.get())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle to a registered handler. Dropping it detaches the handler.
#[must_use = "dropping a Subscription detaches its handler immediately"]
pub struct Subscription {
    active: Rc<Cell<bool>>,
    detach: Option<Box<dyn FnOnce()>>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.active.get())
            .finish()
    }
}

impl Subscription {
    /// `active` is shared with the registry slot; `detach` removes the slot.
    pub(crate) fn new(active: Rc<Cell<bool>>, detach: impl FnOnce() + 'static) -> Self {
        Self {
            active,
            detach: Some(Box::new(detach)),
        }
    }

    /// `false` once cancelled, dropped, or killed by its owner (e.g. a `once` trigger).
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Detach the handler now.
    pub fn cancel(mut self) {
        self.detach_now();
    }

    fn detach_now(&mut self) {
        self.active.set(false);
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach_now();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/events.rs"]
mod tests;
