//! # Session State
//!
//! Shared-state wrapper around the session composer.
//!
//! ## Thread Safety
//! The composer is wrapped in `Arc<Mutex<T>>` because:
//! 1. UI events and the orchestrator both mutate the session
//! 2. Only one mutation may run at a time
//! 3. Async tasks (debounced search, checkout) run concurrently
//!
//! ## Why Not RwLock?
//! Session operations are quick and most of them write. A RwLock would
//! add complexity with minimal benefit.

pub mod composer;

use std::sync::{Arc, Mutex};

use composer::Composer;

/// Shared handle to the session composer.
#[derive(Debug, Clone)]
pub struct SessionState {
    composer: Arc<Mutex<Composer>>,
}

impl SessionState {
    /// Wraps a composer for shared access.
    pub fn new(composer: Composer) -> Self {
        SessionState {
            composer: Arc::new(Mutex::new(composer)),
        }
    }

    /// Executes a function with read access to the composer.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let total = session.with(|c| c.cart.total());
    /// ```
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Composer) -> R,
    {
        let composer = match self.composer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&composer)
    }

    /// Executes a function with write access to the composer.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// session.with_mut(|c| c.add_item(&item));
    /// ```
    pub fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Composer) -> R,
    {
        let mut composer = match self.composer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut composer)
    }
}
