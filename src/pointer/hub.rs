//! Host pointer-move notification channel
//!
//! Feeds dispatch coordinates into a [`PointerHub`]; consumers register a
//! listener and get back a [`Registration`] guard. Dropping the guard
//! deregisters the listener, so a consumer can never leak its subscription
//! past its own lifetime.

use super::types::PointerCoordinate;
use parking_lot::Mutex as ParkingMutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

/// Identifier handed out for each registered listener
pub type ListenerId = u64;

type Listener = Box<dyn Fn(PointerCoordinate) + Send + Sync>;

#[derive(Default)]
struct HubInner {
    listeners: ParkingMutex<Vec<(ListenerId, Listener)>>,
    next_id: AtomicU64,
    released: AtomicUsize,
}

/// Broadcaster for pointer-move notifications.
///
/// Cloning is cheap; all clones share the same listener set. Dispatch holds
/// the listener lock for the whole fan-out, so notifications are delivered
/// serially and a listener is never invoked after its deregistration returns.
#[derive(Clone, Default)]
pub struct PointerHub {
    inner: Arc<HubInner>,
}

impl PointerHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for pointer moves
    pub fn register<F>(&self, listener: F) -> Registration
    where
        F: Fn(PointerCoordinate) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst);
        self.inner.listeners.lock().push((id, Box::new(listener)));

        tracing::debug!("Pointer listener {} registered", id);

        Registration {
            id,
            hub: Arc::downgrade(&self.inner),
            released: false,
        }
    }

    /// Deliver a pointer move to every registered listener.
    ///
    /// Returns the number of listeners notified.
    pub fn dispatch(&self, coordinate: PointerCoordinate) -> usize {
        let listeners = self.inner.listeners.lock();
        for (_, listener) in listeners.iter() {
            listener(coordinate);
        }
        listeners.len()
    }

    /// Number of currently registered listeners
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().len()
    }

    /// Total number of listeners deregistered over the hub's lifetime
    pub fn released_count(&self) -> usize {
        self.inner.released.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for PointerHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerHub")
            .field("listeners", &self.listener_count())
            .field("released", &self.released_count())
            .finish()
    }
}

/// Scoped registration with a [`PointerHub`].
///
/// The listener is removed exactly once: on [`Registration::release`] or on
/// drop, whichever comes first.
#[derive(Debug)]
pub struct Registration {
    id: ListenerId,
    hub: Weak<HubInner>,
    released: bool,
}

impl Registration {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Deregister now instead of waiting for drop
    pub fn release(mut self) {
        self.release_inner();
    }

    fn release_inner(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        // Hub already gone: nothing left to deregister from
        let Some(hub) = self.hub.upgrade() else {
            return;
        };

        let mut listeners = hub.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(id, _)| *id != self.id);
        if listeners.len() < before {
            hub.released.fetch_add(1, Ordering::SeqCst);
            tracing::debug!("Pointer listener {} deregistered", self.id);
        }
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.release_inner();
    }
}
