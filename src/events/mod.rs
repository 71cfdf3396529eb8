//! Events emitted by client actions.
//!
//! Every action dispatches a [`ClientEvent`] to the listeners registered on
//! its [`ClientContext`](crate::ClientContext). With no listeners the
//! dispatch is a no-op.
//!
//! # Custom Listeners
//!
//! ```rust,ignore
//! use todo_client::events::{ClientEvent, Listener};
//! use async_trait::async_trait;
//!
//! struct RefreshView;
//!
//! #[async_trait]
//! impl Listener for RefreshView {
//!     async fn handle(&self, event: &ClientEvent) {
//!         if let ClientEvent::TasksLoaded { count, .. } = event {
//!             // redraw the list
//!         }
//!     }
//! }
//!
//! client.listen(RefreshView);
//! ```

mod event;
mod listener;
mod registry;

pub mod listeners;

pub use event::ClientEvent;
pub use listener::Listener;
pub use registry::EventRegistry;
