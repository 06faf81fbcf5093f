//! # Collection Accessor
//!
//! Thin read layer over the document store: filtered collection fetches and
//! point reads, decoded into typed models. The accessor enforces the
//! store's membership-query ceiling; splitting an oversized key set into
//! batches is the resolver's job, not the accessor's.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::AccessorError;
use crate::store::{Document, DocumentStore, Filter};

/// Read access to named collections with typed decoding.
#[derive(Clone)]
pub struct CollectionAccessor {
    store: Arc<dyn DocumentStore>,
    membership_limit: usize,
}

impl CollectionAccessor {
    /// Create an accessor with an explicit membership-query ceiling.
    pub fn new(store: Arc<dyn DocumentStore>, membership_limit: usize) -> Self {
        Self {
            store,
            membership_limit,
        }
    }

    /// Create an accessor configured from [`AppConfig`].
    pub fn from_config(store: Arc<dyn DocumentStore>, config: &AppConfig) -> Self {
        Self::new(store, config.membership_query_limit)
    }

    /// The store's per-query membership ceiling.
    pub fn membership_limit(&self) -> usize {
        self.membership_limit
    }

    /// Fetch raw documents matching `filter`.
    ///
    /// An `In` filter larger than the ceiling is rejected with
    /// [`AccessorError::ConstraintViolation`]; an empty `In` filter returns
    /// an empty sequence without a store round trip.
    pub async fn fetch_docs(
        &self,
        collection: &str,
        filter: Option<Filter>,
    ) -> Result<Vec<Document>, AccessorError> {
        if let Some(Filter::In { field, values }) = &filter {
            if values.is_empty() {
                return Ok(Vec::new());
            }
            if values.len() > self.membership_limit {
                return Err(AccessorError::ConstraintViolation {
                    collection: collection.to_string(),
                    field: field.clone(),
                    requested: values.len(),
                    limit: self.membership_limit,
                });
            }
        }

        debug!(
            collection,
            filter = filter.as_ref().map(Filter::describe).as_deref(),
            "fetching collection"
        );
        let docs = self
            .store
            .fetch(collection, filter.as_ref())
            .await
            .map_err(|err| match &filter {
                Some(f) => AccessorError::Fetch(err.with_filter(f.describe())),
                None => AccessorError::Fetch(err),
            })?;
        Ok(docs)
    }

    /// Fetch and decode documents matching `filter`.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        collection: &str,
        filter: Option<Filter>,
    ) -> Result<Vec<T>, AccessorError> {
        let docs = self.fetch_docs(collection, filter).await?;
        docs.iter()
            .map(|doc| decode_document(collection, doc))
            .collect()
    }

    /// Fetch documents where `field == value`.
    pub async fn fetch_eq<T: DeserializeOwned, V: Into<Value>>(
        &self,
        collection: &str,
        field: &str,
        value: V,
    ) -> Result<Vec<T>, AccessorError> {
        self.fetch(collection, Some(Filter::eq(field, value))).await
    }

    /// Fetch documents where `field` is one of `values`. The caller is
    /// responsible for staying under the ceiling; use the resolver for
    /// larger sets.
    pub async fn fetch_in<T: DeserializeOwned>(
        &self,
        collection: &str,
        field: &str,
        values: &[String],
    ) -> Result<Vec<T>, AccessorError> {
        let values = values
            .iter()
            .map(|v| Value::String(v.clone()))
            .collect::<Vec<_>>();
        self.fetch(collection, Some(Filter::any_of(field, values)))
            .await
    }

    /// Point read of a single document by ID.
    pub async fn get<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<T>, AccessorError> {
        debug!(collection, id, "fetching document");
        let doc = self.store.get(collection, id).await.map_err(|err| {
            AccessorError::Fetch(err.with_filter(format!("id == {id}")))
        })?;
        doc.as_ref()
            .map(|doc| decode_document(collection, doc))
            .transpose()
    }
}

pub(crate) fn decode_document<T: DeserializeOwned>(
    collection: &str,
    doc: &Document,
) -> Result<T, AccessorError> {
    doc.decode()
        .map_err(|err| AccessorError::malformed(collection, &doc.id, err.to_string()))
}
