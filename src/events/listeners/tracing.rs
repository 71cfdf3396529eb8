use async_trait::async_trait;

use crate::events::{ClientEvent, Listener};

/// Emits client events as tracing events.
///
/// Requires the `tracing` feature to be enabled.
pub struct TracingListener;

#[async_trait]
impl Listener for TracingListener {
    async fn handle(&self, event: &ClientEvent) {
        tracing::info!(
            target: "todo_client::events",
            event_name = event.name(),
            ?event,
            "client event"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_tracing_listener_handle() {
        let event = ClientEvent::TaskUpdated {
            task_id: 5,
            at: Utc::now(),
        };

        // should not panic
        TracingListener.handle(&event).await;
    }
}
