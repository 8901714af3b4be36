//! A single-threaded change-notification channel.
//!
//! Listeners are plain closures.  While a notification is being dispatched, the channel is
//! 'suspended': any further notification, registration or removal requested from inside a
//! listener is queued and applied once the current dispatch has finished.  Listeners therefore
//! never see the listener list change underneath them, and a listener that (indirectly) raises
//! another notification causes a second dispatch instead of recursion.

use std::{
    cell::RefCell,
    collections::VecDeque,
    fmt::{Debug, Formatter},
    rc::Rc,
};

use itertools::Itertools;
use log::debug;

type Listener = Rc<RefCell<dyn FnMut()>>;

/// Opaque handle returned when a listener is registered, used to remove it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId {
    idx: u64,
}

/// Raises payload-less 'something changed' notifications to a list of listeners.
///
/// Cloning a `ChangeRaiser` gives another handle onto the **same** channel.
#[derive(Clone, Default)]
pub struct ChangeRaiser {
    inner: Rc<RefCell<Inner>>,
}

#[derive(Default)]
struct Inner {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
    /// `true` whilst listeners are being called
    dispatching: bool,
    /// Commands deferred until the current dispatch finishes
    queue: VecDeque<Command>,
}

enum Command {
    Raise,
    Register(ListenerId, Listener),
    Unregister(ListenerId),
}

impl ChangeRaiser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a listener which will be called once per raised notification
    pub fn register(&self, listener: impl FnMut() + 'static) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId { idx: inner.next_id };
        inner.next_id += 1;
        let listener: Listener = Rc::new(RefCell::new(listener));
        if inner.dispatching {
            inner.queue.push_back(Command::Register(id, listener));
        } else {
            inner.listeners.push((id, listener));
        }
        id
    }

    /// Removes a listener.  Removing an unknown (or already removed) listener does nothing.
    pub fn unregister(&self, id: ListenerId) {
        let mut inner = self.inner.borrow_mut();
        if inner.dispatching {
            inner.queue.push_back(Command::Unregister(id));
        } else {
            inner.listeners.retain(|(l_id, _)| *l_id != id);
        }
    }

    /// The number of currently registered listeners
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Notify every listener that something has changed
    pub fn raise(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.dispatching {
                debug!("Change raised during dispatch; queueing it");
                inner.queue.push_back(Command::Raise);
                return;
            }
            inner.dispatching = true;
        }
        let _guard = DispatchGuard(&self.inner);

        let mut raise_pending = true;
        while raise_pending {
            // Snapshot the listeners so that no borrow is held whilst they run
            let listeners = self
                .inner
                .borrow()
                .listeners
                .iter()
                .map(|(_, l)| l.clone())
                .collect_vec();
            for listener in listeners {
                // A listener which re-entered itself would already be borrowed; it has been
                // called for this notification so it is skipped rather than panicking
                if let Ok(mut f) = listener.try_borrow_mut() {
                    (&mut *f)();
                }
            }
            raise_pending = self.flush_queue();
        }
    }

    /// Applies queued registrations and removals, returning `true` if at least one further
    /// notification was queued.  Queued raises are applied one at a time, so this returns as
    /// soon as it reaches one.
    fn flush_queue(&self) -> bool {
        let mut inner = self.inner.borrow_mut();
        while let Some(command) = inner.queue.pop_front() {
            match command {
                Command::Raise => return true,
                Command::Register(id, listener) => inner.listeners.push((id, listener)),
                Command::Unregister(id) => inner.listeners.retain(|(l_id, _)| *l_id != id),
            }
        }
        false
    }
}

/// Ends a dispatch, even if a listener panics part of the way through.  Registrations and
/// removals still queued at that point are applied; queued notifications are dropped.
struct DispatchGuard<'a>(&'a RefCell<Inner>);

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.0.try_borrow_mut() {
            inner.dispatching = false;
            while let Some(command) = inner.queue.pop_front() {
                match command {
                    Command::Raise => {}
                    Command::Register(id, listener) => inner.listeners.push((id, listener)),
                    Command::Unregister(id) => inner.listeners.retain(|(l_id, _)| *l_id != id),
                }
            }
        }
    }
}

impl Debug for ChangeRaiser {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ChangeRaiser")
            .field("listeners", &inner.listeners.len())
            .field("dispatching", &inner.dispatching)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter(raiser: &ChangeRaiser) -> (Rc<Cell<usize>>, ListenerId) {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let id = raiser.register(move || c.set(c.get() + 1));
        (count, id)
    }

    #[test]
    fn every_listener_is_called_once_per_raise() {
        let raiser = ChangeRaiser::new();
        let (a, _) = counter(&raiser);
        let (b, _) = counter(&raiser);
        raiser.raise();
        raiser.raise();
        assert_eq!(a.get(), 2);
        assert_eq!(b.get(), 2);
    }

    #[test]
    fn unregistered_listener_is_not_called() {
        let raiser = ChangeRaiser::new();
        let (a, id) = counter(&raiser);
        raiser.raise();
        raiser.unregister(id);
        raiser.raise();
        assert_eq!(a.get(), 1);
        assert_eq!(raiser.listener_count(), 0);
        // Removing twice is harmless
        raiser.unregister(id);
    }

    #[test]
    fn raise_from_inside_listener_is_queued_not_recursive() {
        let raiser = ChangeRaiser::new();
        let depth = Rc::new(Cell::new(0usize));
        let max_depth = Rc::new(Cell::new(0usize));
        let calls = Rc::new(Cell::new(0usize));

        let handle = raiser.clone();
        let (d, m, c) = (depth.clone(), max_depth.clone(), calls.clone());
        raiser.register(move || {
            d.set(d.get() + 1);
            m.set(m.get().max(d.get()));
            c.set(c.get() + 1);
            // Re-raise exactly once
            if c.get() == 1 {
                handle.raise();
            }
            d.set(d.get() - 1);
        });

        raiser.raise();
        assert_eq!(calls.get(), 2);
        assert_eq!(max_depth.get(), 1);
    }

    #[test]
    fn registration_during_dispatch_applies_afterwards() {
        let raiser = ChangeRaiser::new();
        let late = Rc::new(Cell::new(0usize));

        let handle = raiser.clone();
        let l = late.clone();
        let registered = Rc::new(Cell::new(false));
        let r = registered.clone();
        raiser.register(move || {
            if !r.get() {
                r.set(true);
                let l = l.clone();
                handle.register(move || l.set(l.get() + 1));
            }
        });

        raiser.raise();
        // The new listener wasn't part of the first dispatch
        assert_eq!(late.get(), 0);
        assert_eq!(raiser.listener_count(), 2);
        raiser.raise();
        assert_eq!(late.get(), 1);
    }

    #[test]
    fn panicking_listener_does_not_block_later_raises() {
        use std::panic::{catch_unwind, AssertUnwindSafe};

        let raiser = ChangeRaiser::new();
        let panicked = Rc::new(Cell::new(false));
        let p = panicked.clone();
        raiser.register(move || {
            if !p.get() {
                p.set(true);
                panic!("listener failed");
            }
        });
        let (a, _) = counter(&raiser);

        assert!(catch_unwind(AssertUnwindSafe(|| raiser.raise())).is_err());
        assert_eq!(a.get(), 0);

        raiser.raise();
        assert_eq!(a.get(), 1);
        let (b, _) = counter(&raiser);
        raiser.raise();
        assert_eq!((a.get(), b.get()), (2, 1));
    }

    #[test]
    fn removal_during_dispatch_applies_afterwards() {
        let raiser = ChangeRaiser::new();
        let (a, a_id) = counter(&raiser);
        let handle = raiser.clone();
        raiser.register(move || handle.unregister(a_id));

        raiser.raise();
        assert_eq!(a.get(), 1);
        raiser.raise();
        assert_eq!(a.get(), 1);
    }
}
