use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::events::{ClientEvent, Listener};

/// Keeps every event it receives. Clones share the same record.
#[derive(Clone, Default)]
pub struct RecordingListener {
    events: Arc<Mutex<Vec<ClientEvent>>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ClientEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.events().iter().map(ClientEvent::name).collect()
    }
}

#[async_trait]
impl Listener for RecordingListener {
    async fn handle(&self, event: &ClientEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
