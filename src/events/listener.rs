use async_trait::async_trait;

use super::ClientEvent;

/// Handles client events asynchronously.
///
/// Listeners run in registration order, after the state change the event
/// describes has been applied.
#[async_trait]
pub trait Listener: Send + Sync + 'static {
    async fn handle(&self, event: &ClientEvent);
}
