//! Shared, in-memory holder of the current session.

use std::sync::{Arc, PoisonError, RwLock};

use super::Session;

/// Holds the session of one client context.
///
/// Clones share the same session. Access goes through short closures so a
/// lock is never held across an `.await`.
#[derive(Clone, Default)]
pub struct SessionStore {
    session: Arc<RwLock<Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the current session.
    pub fn snapshot(&self) -> Session {
        self.read(Session::clone)
    }

    pub fn read<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        let guard = self.session.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut guard = self.session.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    pub fn is_valid(&self) -> bool {
        self.read(Session::is_valid)
    }

    pub fn reset(&self) {
        self.update(Session::reset);
    }
}
