//! Cart change notifications.
//!
//! [`CartEvents`] is a plain subject: a list of listener callbacks invoked
//! synchronously, in subscription order, after each cart mutation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tressa_core::LineItem;

/// The mutation that produced a [`CartChange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Added,
    Removed,
    QuantityUpdated,
    Cleared,
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Added => write!(f, "added"),
            Self::Removed => write!(f, "removed"),
            Self::QuantityUpdated => write!(f, "quantity_updated"),
            Self::Cleared => write!(f, "cleared"),
        }
    }
}

/// Payload delivered to listeners: the full cart after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartChange {
    pub kind: ChangeKind,
    pub items: Vec<LineItem>,
}

/// Handle returned by [`CartEvents::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&CartChange) + Send + Sync>;

/// Registry of cart change listeners.
#[derive(Default)]
pub struct CartEvents {
    next_id: AtomicU64,
    listeners: RwLock<Vec<(SubscriptionId, Listener)>>,
}

impl std::fmt::Debug for CartEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartEvents")
            .field("listeners", &self.listener_count())
            .finish_non_exhaustive()
    }
}

impl CartEvents {
    /// Create a subject with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It is called for every change until
    /// [`unsubscribe`](Self::unsubscribe) is called with the returned id.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&CartChange) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        match self.listeners.write() {
            Ok(mut listeners) => listeners.push((id, Arc::new(listener))),
            Err(poisoned) => poisoned.into_inner().push((id, Arc::new(listener))),
        }
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = match self.listeners.write() {
            Ok(listeners) => listeners,
            Err(poisoned) => poisoned.into_inner(),
        };
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.read().map_or(0, |listeners| listeners.len())
    }

    /// Deliver `change` to every listener.
    ///
    /// The listener list is snapshotted first, so a listener may subscribe
    /// or unsubscribe without deadlocking; such changes apply from the next
    /// emit.
    pub fn emit(&self, change: &CartChange) {
        let snapshot: Vec<Listener> = match self.listeners.read() {
            Ok(listeners) => listeners.iter().map(|(_, l)| Arc::clone(l)).collect(),
            Err(poisoned) => poisoned
                .into_inner()
                .iter()
                .map(|(_, l)| Arc::clone(l))
                .collect(),
        };

        tracing::trace!(kind = %change.kind, listeners = snapshot.len(), "Emitting cart change");

        for listener in snapshot {
            listener(change);
        }
    }
}
