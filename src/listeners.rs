//! Multi-subscriber event lists.
//!
//! Delivery goes to a snapshot of the subscribers taken when dispatch starts,
//! in registration order. A listener can therefore remove itself (or others)
//! while an event is being delivered without disturbing that delivery.
//!
//! # Example
//!
//! ```ignore
//! let listeners: Subscribers<ScrollEvent> = Subscribers::new();
//! let handle = listeners.clone();
//! let slot = Rc::new(Cell::new(None));
//! let own_id = slot.clone();
//! let id = listeners.add(move |event| {
//!     // One-shot: stop listening after the first event.
//!     if let Some(id) = own_id.get() {
//!         handle.remove(id);
//!     }
//! });
//! slot.set(Some(id));
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::log;

/// Handle returned on registration, used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback<E> = Rc<RefCell<dyn FnMut(&E)>>;

struct Registry<E> {
    next_id: u64,
    entries: Vec<(ListenerId, Callback<E>)>,
}

/// Shared, cloneable list of event subscribers.
pub struct Subscribers<E> {
    inner: Rc<RefCell<Registry<E>>>,
}

impl<E> Clone for Subscribers<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E> fmt::Debug for Subscribers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("len", &self.inner.borrow().entries.len())
            .finish()
    }
}

impl<E: 'static> Default for Subscribers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: 'static> Subscribers<E> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Register a listener; it receives events after all earlier listeners.
    pub fn add<F>(&self, listener: F) -> ListenerId
    where
        F: FnMut(&E) + 'static,
    {
        let callback: Callback<E> = Rc::new(RefCell::new(listener));
        let mut registry = self.inner.borrow_mut();
        let id = ListenerId(registry.next_id);
        registry.next_id += 1;
        registry.entries.push((id, callback));
        id
    }

    /// Unregister a listener. Returns `false` if it was not registered.
    pub fn remove(&self, id: ListenerId) -> bool {
        let mut registry = self.inner.borrow_mut();
        let before = registry.entries.len();
        registry.entries.retain(|(entry_id, _)| *entry_id != id);
        registry.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deliver `event` to every listener registered when dispatch starts.
    pub fn dispatch(&self, event: &E) {
        let snapshot: Vec<Callback<E>> = self
            .inner
            .borrow()
            .entries
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();

        for callback in snapshot {
            match callback.try_borrow_mut() {
                Ok(mut listener) => (&mut *listener)(event),
                Err(_) => {
                    // The listener is further up the stack, delivering the
                    // event that caused this one.
                    log::log_warn("skipped re-entrant listener delivery");
                }
            }
        }
    }
}
