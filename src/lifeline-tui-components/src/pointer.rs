//! Pointer listener registry.
//!
//! A [`PointerHub`] is the "global input surface" of one UI loop: the host
//! feeds it every mouse event and it fans the event out to whoever is
//! subscribed. Subscriptions are scoped resources. [`PointerHub::subscribe`]
//! returns a [`ListenerGuard`] and dropping the guard ends the subscription,
//! so a component that stores its guard inside a state variant releases the
//! listener on every transition out of that variant and on drop.
//!
//! The hub is single-threaded (`Rc`/`RefCell`) like the event loop it serves.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crossterm::event::MouseEvent;

type Listener = Box<dyn FnMut(&MouseEvent)>;

struct Subscription {
    id: u64,
    alive: Rc<Cell<bool>>,
    listener: Rc<RefCell<Listener>>,
}

#[derive(Default)]
struct HubInner {
    next_id: u64,
    subscriptions: Vec<Subscription>,
}

impl HubInner {
    fn prune(&mut self) {
        self.subscriptions.retain(|s| s.alive.get());
    }
}

/// Registry of pointer listeners for one UI loop.
///
/// Cloning yields another handle to the same registry.
#[derive(Clone, Default)]
pub struct PointerHub {
    inner: Rc<RefCell<HubInner>>,
}

impl std::fmt::Debug for PointerHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl PointerHub {
    /// Create an empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` until the returned guard is dropped.
    #[must_use = "dropping the guard immediately unsubscribes the listener"]
    pub fn subscribe(&self, listener: impl FnMut(&MouseEvent) + 'static) -> ListenerGuard {
        let alive = Rc::new(Cell::new(true));
        let mut inner = self.inner.borrow_mut();
        inner.prune();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscriptions.push(Subscription {
            id,
            alive: Rc::clone(&alive),
            listener: Rc::new(RefCell::new(Box::new(listener))),
        });
        tracing::trace!(listener = id, "Pointer listener subscribed");

        ListenerGuard {
            id,
            alive,
            hub: Rc::downgrade(&self.inner),
        }
    }

    /// Deliver `event` to every live listener.
    ///
    /// Listeners may unsubscribe themselves or others while the event is being
    /// delivered; an unsubscribed listener is not called afterwards.
    pub fn dispatch(&self, event: &MouseEvent) {
        let snapshot: Vec<(Rc<Cell<bool>>, Rc<RefCell<Listener>>)> = {
            let mut inner = self.inner.borrow_mut();
            inner.prune();
            inner
                .subscriptions
                .iter()
                .map(|s| (Rc::clone(&s.alive), Rc::clone(&s.listener)))
                .collect()
        };

        for (alive, listener) in snapshot {
            if !alive.get() {
                continue;
            }
            // A listener that dispatches into its own hub is not re-entered.
            if let Ok(mut listener) = listener.try_borrow_mut() {
                (*listener)(event);
            }
        }
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.inner
            .borrow()
            .subscriptions
            .iter()
            .filter(|s| s.alive.get())
            .count()
    }
}

/// Keeps a pointer listener registered while alive.
#[derive(Debug)]
pub struct ListenerGuard {
    id: u64,
    alive: Rc<Cell<bool>>,
    hub: Weak<RefCell<HubInner>>,
}

impl ListenerGuard {
    /// Identifier of the subscription, unique per hub.
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.alive.set(false);
        // Pruned lazily if the hub is mid-dispatch.
        if let Some(hub) = self.hub.upgrade()
            && let Ok(mut inner) = hub.try_borrow_mut()
        {
            inner.subscriptions.retain(|s| s.id != self.id);
        }
        tracing::trace!(listener = self.id, "Pointer listener released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseButton, MouseEventKind};

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_guard_drop_unsubscribes() {
        let hub = PointerHub::new();
        let hits = Rc::new(Cell::new(0));

        let counter = Rc::clone(&hits);
        let guard = hub.subscribe(move |_| counter.set(counter.get() + 1));
        assert_eq!(hub.listener_count(), 1);

        hub.dispatch(&click(0, 0));
        assert_eq!(hits.get(), 1);

        drop(guard);
        assert_eq!(hub.listener_count(), 0);

        hub.dispatch(&click(0, 0));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_listener_can_release_its_own_guard() {
        let hub = PointerHub::new();
        let slot: Rc<RefCell<Option<ListenerGuard>>> = Rc::new(RefCell::new(None));
        let calls = Rc::new(Cell::new(0));

        let slot_in_listener = Rc::clone(&slot);
        let calls_in_listener = Rc::clone(&calls);
        let guard = hub.subscribe(move |_| {
            calls_in_listener.set(calls_in_listener.get() + 1);
            slot_in_listener.borrow_mut().take();
        });
        *slot.borrow_mut() = Some(guard);

        hub.dispatch(&click(1, 1));
        hub.dispatch(&click(1, 1));

        assert_eq!(calls.get(), 1);
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn test_listener_released_by_earlier_listener_is_skipped() {
        let hub = PointerHub::new();
        let second_calls = Rc::new(Cell::new(0));
        let second_slot: Rc<RefCell<Option<ListenerGuard>>> = Rc::new(RefCell::new(None));

        let slot = Rc::clone(&second_slot);
        let _first = hub.subscribe(move |_| {
            slot.borrow_mut().take();
        });
        let counter = Rc::clone(&second_calls);
        *second_slot.borrow_mut() = Some(hub.subscribe(move |_| counter.set(counter.get() + 1)));

        hub.dispatch(&click(0, 0));
        assert_eq!(second_calls.get(), 0);
        assert_eq!(hub.listener_count(), 1);
    }

    #[test]
    fn test_guard_outliving_hub() {
        let hub = PointerHub::new();
        let guard = hub.subscribe(|_| {});
        drop(hub);
        drop(guard);
    }
}
