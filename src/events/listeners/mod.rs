//! Built-in event listeners.

mod logging;
#[cfg(any(test, feature = "mocks"))]
mod recording;
#[cfg(feature = "tracing")]
mod tracing;

pub use logging::LoggingListener;
#[cfg(any(test, feature = "mocks"))]
pub use recording::RecordingListener;
#[cfg(feature = "tracing")]
pub use self::tracing::TracingListener;
