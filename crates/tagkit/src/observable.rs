//! # Observable State
//!
//! A minimal observer abstraction used to broadcast state changes to a UI layer
//! without depending on any reactive library.
//!
//! - [`Broadcast<T>`]: a list of listeners that receive every value passed to `emit`.
//!   Used for one-shot notifications (tag added, item changed, ...).
//! - [`Observable<T>`]: a current value plus a [`Broadcast<T>`]. Listeners are called
//!   with the new value after every `set`/`update`, never mid-mutation.
//!
//! Both hand out a [`Subscription`] guard. Dropping the guard, or calling
//! [`Subscription::unsubscribe`], removes the listener. Call [`Subscription::detach`]
//! to keep a listener for the lifetime of the broadcaster.
//!
//! Everything here is single-threaded (`Rc`/`RefCell`): the tagging model runs on one
//! owner thread. Listeners may subscribe or unsubscribe while being notified; the
//! change takes effect from the next notification.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<T> = Box<dyn FnMut(&T)>;

struct Registry<T> {
    next_id: u64,
    listeners: Vec<(u64, Listener<T>)>,
    // Ids unsubscribed while their listener was checked out for a notification.
    tombstones: HashSet<u64>,
    // Nesting level of `emit` calls currently running.
    depth: usize,
}

impl<T> Registry<T> {
    fn remove(&mut self, id: u64) {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        if self.listeners.len() == before && self.depth > 0 {
            self.tombstones.insert(id);
        }
    }
}

/// Fan-out of values to registered listeners.
pub struct Broadcast<T> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T: 'static> Default for Broadcast<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Broadcast<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                listeners: Vec::new(),
                tombstones: HashSet::new(),
                depth: 0,
            })),
        }
    }

    /// Registers `listener`; it stays active while the returned guard lives.
    pub fn subscribe(&self, listener: impl FnMut(&T) + 'static) -> Subscription {
        let id = {
            let mut reg = self.registry.borrow_mut();
            let id = reg.next_id;
            reg.next_id += 1;
            reg.listeners.push((id, Box::new(listener)));
            id
        };

        let weak: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.registry);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(registry) = weak.upgrade() {
                    registry.borrow_mut().remove(id);
                }
            })),
        }
    }

    /// Calls every listener with `value`, in subscription order.
    ///
    /// A listener may emit on the same broadcast; the nested call reaches only
    /// listeners that are not already being notified.
    pub fn emit(&self, value: &T) {
        let mut active = {
            let mut reg = self.registry.borrow_mut();
            reg.depth += 1;
            std::mem::take(&mut reg.listeners)
        };

        for (_, listener) in active.iter_mut() {
            listener(value);
        }

        let mut reg = self.registry.borrow_mut();
        reg.depth -= 1;
        active.retain(|(id, _)| !reg.tombstones.contains(id));
        // Outer passes still hold checked-out listeners that may be tombstoned.
        if reg.depth == 0 {
            reg.tombstones.clear();
        }
        // Listeners added during the notification go after the existing ones.
        active.append(&mut reg.listeners);
        reg.listeners = active;
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

impl<T> fmt::Debug for Broadcast<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Broadcast")
            .field("subscribers", &self.registry.borrow().listeners.len())
            .finish()
    }
}

/// A current value that notifies subscribers whenever it changes.
pub struct Observable<T> {
    value: T,
    changes: Broadcast<T>,
}

impl<T: 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            changes: Broadcast::new(),
        }
    }

    pub fn get_state(&self) -> &T {
        &self.value
    }

    /// Subscribes to future changes. The current value is not replayed.
    pub fn subscribe(&self, listener: impl FnMut(&T) + 'static) -> Subscription {
        self.changes.subscribe(listener)
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
        self.changes.emit(&self.value);
    }

    /// Mutates the value in place, then notifies once.
    pub fn update(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut self.value);
        self.changes.emit(&self.value);
    }

    pub fn subscriber_count(&self) -> usize {
        self.changes.subscriber_count()
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value)
            .field("changes", &self.changes)
            .finish()
    }
}

/// Guard returned by `subscribe`. Dropping it removes the listener.
#[must_use = "dropping a Subscription immediately unsubscribes the listener"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// Keeps the listener registered for as long as the broadcaster lives.
    pub fn detach(mut self) {
        self.cancel = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
