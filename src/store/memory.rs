//! In-memory document store.
//!
//! Backs tests, seed fixtures, and local development. Collections are maps
//! of document ID to fields; iteration order is by ID so reads are
//! deterministic. The store counts reads so tests can assert how many
//! round trips an operation issued.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use super::{Document, DocumentStore, Filter, MutableStore};
use crate::error::FetchError;

/// An in-memory [`DocumentStore`] with write support for fixtures and
/// external-mutator tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Value>>>,
    reads: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document, minting an ID when the body does not carry one.
    /// Returns the document ID. The ID is also written into the body, as
    /// the marketplace stores it.
    pub fn insert<C: Into<String>>(&self, collection: C, mut fields: Value) -> String {
        let id = fields
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        if let Value::Object(map) = &mut fields {
            map.insert("id".to_string(), Value::String(id.clone()));
        }
        let mut collections = self.collections.write().expect("store lock poisoned");
        collections
            .entry(collection.into())
            .or_default()
            .insert(id.clone(), fields);
        id
    }

    /// Number of reads (`fetch` + `get`) served so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn record_read(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn fetch(
        &self,
        collection: &str,
        filter: Option<&Filter>,
    ) -> Result<Vec<Document>, FetchError> {
        self.record_read();
        let collections = self.collections.read().expect("store lock poisoned");
        let docs = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, fields)| filter.is_none_or(|f| f.matches(fields)))
                    .map(|(id, fields)| Document::new(id.clone(), fields.clone()))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        Ok(docs)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, FetchError> {
        self.record_read();
        let collections = self.collections.read().expect("store lock poisoned");
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|fields| Document::new(id, fields.clone())))
    }
}

#[async_trait]
impl MutableStore for MemoryStore {
    async fn update(&self, collection: &str, id: &str, changes: Value) -> Result<(), FetchError> {
        let mut collections = self.collections.write().expect("store lock poisoned");
        let fields = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| {
                FetchError::new(collection, format!("document `{id}` does not exist"))
            })?;
        if let (Value::Object(existing), Value::Object(changes)) = (fields, changes) {
            for (key, value) in changes {
                existing.insert(key, value);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_mints_an_id_when_absent() {
        let store = MemoryStore::new();
        let id = store.insert("properties", serde_json::json!({ "name": "Loft" }));
        assert!(!id.is_empty());
        let doc = store.get("properties", &id).await.unwrap().unwrap();
        assert_eq!(doc.fields.get("id"), Some(&Value::String(id)));
    }

    #[tokio::test]
    async fn fetch_filters_and_counts_reads() {
        let store = MemoryStore::new();
        store.insert(
            "properties",
            serde_json::json!({ "id": "prop-1", "landlordId": "user-1" }),
        );
        store.insert(
            "properties",
            serde_json::json!({ "id": "prop-2", "landlordId": "user-2" }),
        );

        let filter = Filter::eq("landlordId", "user-1");
        let docs = store.fetch("properties", Some(&filter)).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "prop-1");
        assert_eq!(store.reads(), 1);
    }

    #[tokio::test]
    async fn update_merges_fields() {
        let store = MemoryStore::new();
        store.insert(
            "viewingRequests",
            serde_json::json!({ "id": "vr-1", "status": "pending", "name": "Eve" }),
        );
        store
            .update(
                "viewingRequests",
                "vr-1",
                serde_json::json!({ "status": "confirmed" }),
            )
            .await
            .unwrap();
        let doc = store.get("viewingRequests", "vr-1").await.unwrap().unwrap();
        assert_eq!(doc.fields.get("status"), Some(&Value::String("confirmed".into())));
        assert_eq!(doc.fields.get("name"), Some(&Value::String("Eve".into())));
    }
}
