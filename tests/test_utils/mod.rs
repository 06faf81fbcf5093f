//! Test utilities shared across integration tests.

use std::sync::Arc;

use async_trait::async_trait;
use readmodel::config::AppConfig;
use readmodel::engine::OverviewEngine;
use readmodel::error::FetchError;
use readmodel::seeds::sample_store;
use readmodel::store::{Document, DocumentStore, Filter, MemoryStore};

/// An engine over the seeded sample store. Returns the store too so tests
/// can count reads or insert extra fixtures.
#[allow(dead_code)]
pub fn seeded_engine() -> (Arc<MemoryStore>, OverviewEngine) {
    let store = Arc::new(sample_store());
    let engine = OverviewEngine::new(store.clone(), &AppConfig::default());
    (store, engine)
}

/// An engine over an empty store.
#[allow(dead_code)]
pub fn empty_engine() -> (Arc<MemoryStore>, OverviewEngine) {
    let store = Arc::new(MemoryStore::new());
    let engine = OverviewEngine::new(store.clone(), &AppConfig::default());
    (store, engine)
}

/// A store double that fails every read against one collection and
/// delegates the rest to an inner [`MemoryStore`].
#[allow(dead_code)]
pub struct FailingStore {
    inner: MemoryStore,
    failing_collection: String,
}

#[allow(dead_code)]
impl FailingStore {
    pub fn wrapping(inner: MemoryStore, failing_collection: &str) -> Self {
        Self {
            inner,
            failing_collection: failing_collection.to_string(),
        }
    }
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn fetch(
        &self,
        collection: &str,
        filter: Option<&Filter>,
    ) -> Result<Vec<Document>, FetchError> {
        if collection == self.failing_collection {
            return Err(FetchError::new(collection, "simulated store outage"));
        }
        self.inner.fetch(collection, filter).await
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, FetchError> {
        if collection == self.failing_collection {
            return Err(FetchError::new(collection, "simulated store outage"));
        }
        self.inner.get(collection, id).await
    }
}
