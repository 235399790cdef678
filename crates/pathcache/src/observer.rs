//! Change observation over a subscribable state container.
//!
//! An observer watches either the whole state or the value under a
//! [`Selector`], and calls back only when the observed value is no longer the
//! *same reference* as the one seen last. Structural equality is not
//! consulted.
//!
//! Precondition: the code that mutates the container must update immutably.
//! Every logical change has to replace the containers along the changed path
//! (see [`Value::assoc_in`]); an in-place edit would go unnoticed.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};

use crate::address::Selector;
use crate::value::{same_reference, Value};

/// Callback registered with a container, invoked after every state change.
pub type Listener = Box<dyn FnMut() + Send>;

/// Detaches a listener from its container.
///
/// Calling it more than once is allowed; what that does is up to the
/// container (for [`MemoryStore`] it is a no-op).
pub struct Unsubscribe(Box<dyn Fn() + Send + Sync>);

impl Unsubscribe {
    pub fn new(detach: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Box::new(detach))
    }

    pub fn call(&self) {
        (self.0)()
    }
}

impl std::fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Unsubscribe")
    }
}

/// A state container that can be read and subscribed to.
pub trait StateContainer: Send + Sync {
    /// Current state snapshot. Cheap: containers inside are shared.
    fn get_state(&self) -> Value;

    /// Registers `listener` to run after each state change.
    fn subscribe(&self, listener: Listener) -> Unsubscribe;
}

// ---------------------------------------------------------------------------
// Observer
// ---------------------------------------------------------------------------

/// Observer bound to a container. Created by [`wrap`].
pub struct StoreObserver<C: ?Sized> {
    container: Arc<C>,
}

/// Binds an observer to `container`.
pub fn wrap<C>(container: Arc<C>) -> StoreObserver<C>
where
    C: StateContainer + ?Sized + 'static,
{
    StoreObserver { container }
}

impl<C> StoreObserver<C>
where
    C: StateContainer + ?Sized + 'static,
{
    /// Watches the whole state.
    pub fn observe<F>(&self, on_change: F) -> ObservationHandle
    where
        F: FnMut(Option<&Value>, Option<&Value>) + Send + 'static,
    {
        self.observe_selected(Selector::root(), on_change)
    }

    /// Watches the value under `selector`. The callback receives
    /// `(new, old)`; `None` means nothing resolves under the selector.
    pub fn observe_at<F>(&self, selector: impl Into<Selector>, on_change: F) -> ObservationHandle
    where
        F: FnMut(Option<&Value>, Option<&Value>) + Send + 'static,
    {
        self.observe_selected(selector.into(), on_change)
    }

    fn observe_selected<F>(&self, selector: Selector, mut on_change: F) -> ObservationHandle
    where
        F: FnMut(Option<&Value>, Option<&Value>) + Send + 'static,
    {
        let select = move |state: &Value| selector.select(state).cloned();
        let mut last = select(&self.container.get_state());
        let container: Weak<C> = Arc::downgrade(&self.container);

        let listener: Listener = Box::new(move || {
            let Some(container) = container.upgrade() else {
                return;
            };
            let current = select(&container.get_state());
            if same_reference(current.as_ref(), last.as_ref()) {
                return;
            }
            let previous = std::mem::replace(&mut last, current.clone());
            on_change(current.as_ref(), previous.as_ref());
        });

        ObservationHandle {
            unobserve: self.container.subscribe(listener),
        }
    }
}

/// A live observation. Observation continues until [`Self::unobserve`] is
/// called; dropping the handle does not stop it.
#[derive(Debug)]
pub struct ObservationHandle {
    unobserve: Unsubscribe,
}

impl ObservationHandle {
    /// Detaches the observer using the container's own unsubscribe.
    pub fn unobserve(&self) {
        self.unobserve.call();
    }
}

// ---------------------------------------------------------------------------
// In-memory container
// ---------------------------------------------------------------------------

/// A registered listener plus a flag for notifications that arrived while it
/// was running.
struct Subscriber {
    listener: Mutex<Listener>,
    pending: AtomicBool,
}

impl Subscriber {
    fn new(listener: Listener) -> Self {
        Self {
            listener: Mutex::new(listener),
            pending: AtomicBool::new(false),
        }
    }

    /// Runs the listener, or leaves the notification pending for whoever is
    /// running it. The lock holder replays until nothing is pending.
    fn notify(&self) {
        self.pending.store(true, Ordering::SeqCst);
        while self.pending.load(Ordering::SeqCst) {
            let Some(mut listener) = self.listener.try_lock() else {
                log::debug!("listener busy; notification queued for replay");
                return;
            };
            while self.pending.swap(false, Ordering::SeqCst) {
                (*listener)();
            }
        }
    }
}

type Registry = Mutex<Vec<(u64, Arc<Subscriber>)>>;

/// A minimal in-memory [`StateContainer`].
///
/// Listeners run synchronously after each update, outside the registry lock,
/// on a snapshot of the registry taken when the update lands. A notification
/// that reaches a listener still running (say, one that updates the store
/// from its callback) is replayed once the listener returns.
pub struct MemoryStore {
    state: RwLock<Value>,
    listeners: Arc<Registry>,
    next_listener_id: AtomicU64,
}

impl MemoryStore {
    pub fn new(initial: Value) -> Self {
        Self {
            state: RwLock::new(initial),
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_listener_id: AtomicU64::new(0),
        }
    }

    /// Replaces the state and notifies listeners.
    pub fn replace_state(&self, next: Value) {
        *self.state.write() = next;
        self.notify();
    }

    /// Derives the next state from the current one and notifies listeners.
    ///
    /// The reducer runs on a snapshot with no lock held, so it may read the
    /// store. Updates racing from other threads are last-writer-wins.
    pub fn update<F>(&self, reducer: F)
    where
        F: FnOnce(&Value) -> Value,
    {
        let current = self.get_state();
        let next = reducer(&current);
        *self.state.write() = next;
        self.notify();
    }

    /// Notifies listeners without changing the state.
    pub fn notify(&self) {
        let snapshot: Vec<Arc<Subscriber>> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, subscriber)| Arc::clone(subscriber))
            .collect();

        for subscriber in snapshot {
            subscriber.notify();
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(Value::empty_object())
    }
}

impl StateContainer for MemoryStore {
    fn get_state(&self) -> Value {
        self.state.read().clone()
    }

    fn subscribe(&self, listener: Listener) -> Unsubscribe {
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .push((id, Arc::new(Subscriber::new(listener))));

        let registry: Weak<Registry> = Arc::downgrade(&self.listeners);
        Unsubscribe::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.lock().retain(|(existing, _)| *existing != id);
            }
        })
    }
}
