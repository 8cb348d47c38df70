//! Typed publish/subscribe channel.
//!
//! Delivery is synchronous and in-thread: every listener registered at the
//! moment of dispatch runs, in registration order, before `emit` returns.
//! A panicking listener is isolated and logged; it never stops delivery to
//! later listeners and never surfaces to the emitting caller. Emissions
//! made before a listener attaches are lost (no replay, no buffering).

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use log::warn;

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct ListenerEntry<T> {
    id: u64,
    callback: Callback<T>,
}

struct BusInner<T> {
    name: &'static str,
    listeners: Mutex<Vec<ListenerEntry<T>>>,
    next_id: AtomicU64,
}

impl<T> BusInner<T> {
    /// Lock the listener list, recovering from poison if necessary.
    ///
    /// Listener callbacks never run under this lock, so poison can only
    /// come from a panic between lock and unlock in the bus itself.
    fn lock_listeners(&self) -> MutexGuard<'_, Vec<ListenerEntry<T>>> {
        self.listeners.lock().unwrap_or_else(|poisoned| {
            warn!("{}: listener list mutex was poisoned, recovering", self.name);
            poisoned.into_inner()
        })
    }
}

/// Type-erased detach hook so [`Subscription`] handles need no event type.
trait Detach: Send + Sync {
    fn detach(&self, id: u64);
}

impl<T: 'static> Detach for BusInner<T> {
    fn detach(&self, id: u64) {
        self.lock_listeners().retain(|entry| entry.id != id);
    }
}

/// A typed event channel with explicit subscription handles.
///
/// The bus mutates no shared state itself; each subscriber is solely
/// responsible for updating its own view of the world in response to an
/// event.
pub struct EventBus<T> {
    inner: Arc<BusInner<T>>,
}

impl<T: 'static> EventBus<T> {
    /// Create an empty bus. The name only appears in logs.
    pub fn new(name: &'static str) -> Self {
        Self {
            inner: Arc::new(BusInner {
                name,
                listeners: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Register a listener. It receives every emission made while the
    /// returned [`Subscription`] is alive; dropping the handle detaches it.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.lock_listeners().push(ListenerEntry {
            id,
            callback: Arc::new(callback),
        });

        let erased: Arc<dyn Detach> = self.inner.clone();
        Subscription {
            id,
            bus: Arc::downgrade(&erased),
        }
    }

    /// Deliver an event to the listeners registered right now.
    ///
    /// A no-op when nobody is listening. The listener snapshot is taken
    /// under the lock and dispatch happens outside it, so a listener may
    /// subscribe or unsubscribe from within its own callback without
    /// deadlocking; such changes take effect from the next emission.
    pub fn emit(&self, event: &T) {
        let snapshot: Vec<Callback<T>> = self
            .inner
            .lock_listeners()
            .iter()
            .map(|entry| Arc::clone(&entry.callback))
            .collect();

        for callback in snapshot {
            let listener = callback.as_ref();
            if catch_unwind(AssertUnwindSafe(|| listener(event))).is_err() {
                warn!("{}: a listener panicked during dispatch", self.inner.name);
            }
        }
    }

    /// Number of attached listeners.
    pub fn len(&self) -> usize {
        self.inner.lock_listeners().len()
    }

    /// Returns true if no listener is attached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle for an active listener registration.
///
/// Dropping the handle (or consuming it with [`cancel`](Self::cancel))
/// removes the listener. A handle that outlives its bus detaches nothing.
pub struct Subscription {
    id: u64,
    bus: Weak<dyn Detach>,
}

impl Subscription {
    /// Listener id, unique within its bus.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Remove the listener now instead of at drop time.
    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.detach(self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
