use std::sync::{Arc, PoisonError, RwLock};

use super::{ClientEvent, Listener};

/// Listeners attached to one client context.
#[derive(Default)]
pub struct EventRegistry {
    listeners: RwLock<Vec<Arc<dyn Listener>>>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener to receive events.
    ///
    /// Listeners are called in the order they are registered.
    pub fn listen(&self, listener: impl Listener) -> &Self {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(listener));
        self
    }

    pub fn len(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dispatch an event to all registered listeners.
    pub async fn dispatch(&self, event: ClientEvent) {
        // snapshot so no lock is held while listeners run
        let listeners: Vec<Arc<dyn Listener>> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        for listener in listeners {
            listener.handle(&event).await;
        }
    }
}
