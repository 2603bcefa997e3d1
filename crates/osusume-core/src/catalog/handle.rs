use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use super::store::CatalogStore;

/// Publication point for the current catalog.
///
/// Requests take a [`snapshot`](Self::snapshot) and work on it to
/// completion. A reload builds a whole new store and swaps it in with
/// [`publish`](Self::publish); in-flight requests keep their old snapshot.
#[derive(Debug)]
pub struct CatalogHandle {
    current: RwLock<Arc<CatalogStore>>,
}

impl CatalogHandle {
    #[must_use]
    pub fn new(store: CatalogStore) -> Self {
        Self {
            current: RwLock::new(Arc::new(store)),
        }
    }

    /// The catalog as of this call.
    #[must_use]
    pub fn snapshot(&self) -> Arc<CatalogStore> {
        // The lock only guards an Arc swap, so a poisoned lock still holds a valid store.
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Replaces the current catalog, returning the previous one.
    pub fn publish(&self, store: CatalogStore) -> Arc<CatalogStore> {
        let next = Arc::new(store);
        info!(
            source = %next.source_name(),
            records = next.len(),
            "publishing catalog"
        );
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }
}

impl From<CatalogStore> for CatalogHandle {
    fn from(store: CatalogStore) -> Self {
        Self::new(store)
    }
}
