//! # Batched Lookup Resolver
//!
//! Foreign-key resolution above the store's membership-query ceiling. Key
//! sets are de-duplicated into a stable order, sliced into contiguous
//! chunks of at most the ceiling, fetched concurrently, and merged. Keys
//! with no matching document are simply absent from the result; a
//! referenced document may have been deleted since the reference was
//! written.

use std::collections::HashMap;

use futures::future::try_join_all;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::accessor::{CollectionAccessor, decode_document};
use crate::error::AccessorError;
use crate::store::Filter;

/// De-duplicate keys into a stable (sorted) order and slice into contiguous
/// chunks of at most `limit`. The same input always produces the same
/// partition.
fn dedup_and_chunk(keys: &[String], limit: usize) -> Vec<Vec<String>> {
    let mut unique: Vec<String> = keys.to_vec();
    unique.sort();
    unique.dedup();
    unique.chunks(limit).map(<[String]>::to_vec).collect()
}

/// Resolve documents by ID into an ID-keyed map.
///
/// The returned map's key set is a subset of the de-duplicated input; an
/// empty input returns an empty map without touching the store.
pub async fn resolve_by_ids<T: DeserializeOwned>(
    accessor: &CollectionAccessor,
    collection: &str,
    ids: &[String],
) -> Result<HashMap<String, T>, AccessorError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let chunks = dedup_and_chunk(ids, accessor.membership_limit());
    debug!(
        collection,
        requested = ids.len(),
        chunks = chunks.len(),
        "resolving documents by id"
    );

    let fetches = chunks.iter().map(|chunk| {
        let values = chunk
            .iter()
            .map(|id| serde_json::Value::String(id.clone()))
            .collect::<Vec<_>>();
        accessor.fetch_docs(collection, Some(Filter::any_of("id", values)))
    });

    let mut resolved = HashMap::new();
    for docs in try_join_all(fetches).await? {
        for doc in docs {
            let value = decode_document(collection, &doc)?;
            resolved.insert(doc.id, value);
        }
    }
    Ok(resolved)
}

/// Fetch all documents whose `field` is one of `values`, chunking the value
/// set under the store ceiling. Used for foreign-key scans such as payments
/// by lease ID, where the key set can outgrow a single query.
pub async fn fetch_where_in<T: DeserializeOwned>(
    accessor: &CollectionAccessor,
    collection: &str,
    field: &str,
    values: &[String],
) -> Result<Vec<T>, AccessorError> {
    if values.is_empty() {
        return Ok(Vec::new());
    }

    let chunks = dedup_and_chunk(values, accessor.membership_limit());
    let fetches = chunks
        .iter()
        .map(|chunk| accessor.fetch_in::<T>(collection, field, chunk));

    let mut merged = Vec::new();
    for batch in try_join_all(fetches).await? {
        merged.extend(batch);
    }
    Ok(merged)
}
