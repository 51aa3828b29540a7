//! # Debounced Catalog Search
//!
//! Keystrokes arrive faster than catalog queries should. Each schedule
//! call cancels the pending delivery and starts a new quiet-period
//! timer; only the last query typed within the window reaches the
//! catalog.
//!
//! ```text
//! type "c"  ──► timer(400ms) ──✗ aborted
//! type "co" ──► timer(400ms) ──✗ aborted
//! type "coc"──► timer(400ms) ──► deliver("coc")
//! ```

use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use caja_core::validation::validate_search_query;

/// Cancellable delayed delivery of search queries.
pub struct DebouncedSearch {
    quiet_period: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl DebouncedSearch {
    pub fn new(quiet_period: Duration) -> Self {
        DebouncedSearch {
            quiet_period,
            pending: Mutex::new(None),
        }
    }

    /// Schedules `query` for delivery after the quiet period, replacing
    /// any pending delivery. Queries that fail validation (over-long)
    /// are dropped; the trimmed text is what gets delivered.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, query: &str, deliver: F)
    where
        F: FnOnce(String) + Send + 'static,
    {
        let trimmed = match validate_search_query(query) {
            Ok(trimmed) => trimmed,
            Err(err) => {
                debug!(%err, "search query dropped");
                return;
            }
        };

        let quiet_period = self.quiet_period;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            deliver(trimmed);
        });

        if let Some(previous) = self.replace_pending(Some(handle)) {
            previous.abort();
        }
    }

    /// Cancels any pending delivery.
    pub fn cancel(&self) {
        if let Some(previous) = self.replace_pending(None) {
            previous.abort();
        }
    }

    fn replace_pending(&self, handle: Option<JoinHandle<()>>) -> Option<JoinHandle<()>> {
        let mut pending = match self.pending.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        std::mem::replace(&mut *pending, handle)
    }
}

impl Drop for DebouncedSearch {
    fn drop(&mut self) {
        self.cancel();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn collector() -> (Arc<Mutex<Vec<String>>>, impl Fn() -> Vec<String>) {
        let delivered: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let reader = {
            let delivered = Arc::clone(&delivered);
            move || delivered.lock().unwrap().clone()
        };
        (delivered, reader)
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_only_last_query_survives() {
        let search = DebouncedSearch::new(Duration::from_millis(50));
        let (delivered, read) = collector();

        for query in ["c", "co", "coca"] {
            let delivered = Arc::clone(&delivered);
            search.schedule(query, move |q| delivered.lock().unwrap().push(q));
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(read(), vec!["coca"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_query_is_trimmed() {
        let search = DebouncedSearch::new(Duration::from_millis(10));
        let (delivered, read) = collector();

        {
            let delivered = Arc::clone(&delivered);
            search.schedule("  coca  ", move |q| delivered.lock().unwrap().push(q));
        }

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(read(), vec!["coca"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_cancel_drops_pending() {
        let search = DebouncedSearch::new(Duration::from_millis(30));
        let (delivered, read) = collector();

        {
            let delivered = Arc::clone(&delivered);
            search.schedule("coca", move |q| delivered.lock().unwrap().push(q));
        }
        search.cancel();

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(read().is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_overlong_query_dropped() {
        let search = DebouncedSearch::new(Duration::from_millis(10));
        let (delivered, read) = collector();

        let long = "x".repeat(500);
        {
            let delivered = Arc::clone(&delivered);
            search.schedule(&long, move |q| delivered.lock().unwrap().push(q));
        }

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(read().is_empty());
    }
}
