// ============================================================================
// REACTIVITY - subscriber/notification cell backing the stores
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Subscriber = Rc<dyn Fn()>;

/// Identifier returned by `subscribe`, used to detach the callback again.
pub type SubscriptionId = u64;

/// Reactive value with change notifications. Clones share both the value
/// and the subscriber list, so a store handle captured in a closure
/// notifies the same observers as the original.
pub struct ReactiveState<T> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<RefCell<Vec<(SubscriptionId, Subscriber)>>>,
    next_id: Rc<Cell<SubscriptionId>>,
}

impl<T> ReactiveState<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
            next_id: Rc::new(Cell::new(0)),
        }
    }

    /// Read the value through a closure. The borrow is released before
    /// the closure's result is returned.
    pub fn with<R>(&self, reader: impl FnOnce(&T) -> R) -> R {
        reader(&self.value.borrow())
    }

    /// Replace the value and notify subscribers.
    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    /// Mutate the value in place and notify subscribers. The mutable
    /// borrow ends before any subscriber runs.
    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        updater(&mut self.value.borrow_mut());
        self.notify();
    }

    /// Subscribe to changes; returns an id for `unsubscribe`.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + 'static,
    {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(callback)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.borrow_mut().retain(|(sub_id, _)| *sub_id != id);
    }

    /// Two handles are the same state if they share the underlying value.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.value, &other.value)
    }

    fn notify(&self) {
        // Snapshot the list so a subscriber may (un)subscribe while running.
        let subscribers: Vec<Subscriber> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, cb)| cb.clone())
            .collect();
        for callback in subscribers {
            callback();
        }
    }
}

impl<T: Clone> ReactiveState<T> {
    pub fn get_cloned(&self) -> T {
        self.value.borrow().clone()
    }
}

impl<T> Clone for ReactiveState<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            subscribers: self.subscribers.clone(),
            next_id: self.next_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_value_and_subscribers() {
        let state = ReactiveState::new(0u32);
        let clone = state.clone();

        let seen = Rc::new(Cell::new(0u32));
        let seen_cb = seen.clone();
        let reader = clone.clone();
        state.subscribe(move || seen_cb.set(reader.get_cloned()));

        clone.update(|v| *v += 5);
        assert_eq!(state.get_cloned(), 5);
        assert_eq!(seen.get(), 5);
    }

    #[test]
    fn unsubscribe_detaches_the_callback() {
        let state = ReactiveState::new(0u32);
        let fired = Rc::new(Cell::new(0u32));

        let fired_cb = fired.clone();
        let id = state.subscribe(move || fired_cb.set(fired_cb.get() + 1));

        state.set(1);
        state.unsubscribe(id);
        state.set(2);

        assert_eq!(fired.get(), 1);
    }
}
