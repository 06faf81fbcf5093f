//! # Document Store Seam
//!
//! Read-side contract over the backing document store. The engine is
//! store-agnostic: everything it knows about persistence is the
//! [`DocumentStore`] trait below. The store owns all entities; documents
//! returned here are transient projections that may be stale or partial.

pub mod memory;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::FetchError;

pub use memory::MemoryStore;

/// Collection names used by the rental marketplace.
pub mod collections {
    pub const USERS: &str = "users";
    pub const PROPERTIES: &str = "properties";
    pub const LEASES: &str = "leases";
    pub const PAYMENTS: &str = "payments";
    pub const VIEWING_REQUESTS: &str = "viewingRequests";
    pub const RENTAL_APPLICATIONS: &str = "rentalApplications";
}

/// A single predicate applied to a collection fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `field == value`
    Eq { field: String, value: Value },
    /// `field` is one of `values`
    In { field: String, values: Vec<Value> },
}

impl Filter {
    /// Equality predicate on a field.
    pub fn eq<F: Into<String>, V: Into<Value>>(field: F, value: V) -> Self {
        Self::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Set-membership predicate on a field.
    pub fn any_of<F: Into<String>>(field: F, values: Vec<Value>) -> Self {
        Self::In {
            field: field.into(),
            values,
        }
    }

    /// The field this predicate tests.
    pub fn field(&self) -> &str {
        match self {
            Filter::Eq { field, .. } | Filter::In { field, .. } => field,
        }
    }

    /// Whether a document's fields satisfy this predicate.
    pub fn matches(&self, fields: &Value) -> bool {
        match self {
            Filter::Eq { field, value } => fields.get(field) == Some(value),
            Filter::In { field, values } => fields
                .get(field)
                .is_some_and(|actual| values.contains(actual)),
        }
    }

    /// Short human-readable form for error context and logs.
    pub fn describe(&self) -> String {
        match self {
            Filter::Eq { field, value } => format!("{field} == {value}"),
            Filter::In { field, values } => format!("{field} in [{} values]", values.len()),
        }
    }
}

/// A raw document returned by the store: its ID plus its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Value,
}

impl Document {
    pub fn new<I: Into<String>>(id: I, fields: Value) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Decode into a typed model. The document ID is injected into the body
    /// when the body does not already carry one.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        let mut fields = self.fields.clone();
        if let Value::Object(map) = &mut fields {
            map.entry("id")
                .or_insert_with(|| Value::String(self.id.clone()));
        }
        serde_json::from_value(fields)
    }
}

/// Read access to the backing document store.
///
/// Implementations must be idempotent and side-effect-free; the engine may
/// issue independent calls concurrently.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch all documents in `collection` matching `filter`, or the whole
    /// collection when `filter` is `None`. No match is an empty sequence,
    /// not an error.
    async fn fetch(
        &self,
        collection: &str,
        filter: Option<&Filter>,
    ) -> Result<Vec<Document>, FetchError>;

    /// Point read of a single document by ID.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, FetchError>;
}

/// Write access used by external mutators (lease creation, status updates).
/// The aggregation engine itself never writes.
#[async_trait]
pub trait MutableStore: DocumentStore {
    /// Merge `changes` into the document's existing fields.
    async fn update(&self, collection: &str, id: &str, changes: Value) -> Result<(), FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_injects_document_id() {
        let doc = Document::new("user-3", serde_json::json!({ "name": "Ann" }));
        let decoded: serde_json::Map<String, Value> =
            serde_json::from_value(doc.fields.clone()).unwrap();
        assert!(!decoded.contains_key("id"));

        #[derive(serde::Deserialize)]
        struct Named {
            id: String,
            name: String,
        }
        let named: Named = doc.decode().expect("decode should inject id");
        assert_eq!(named.id, "user-3");
        assert_eq!(named.name, "Ann");
    }

    #[test]
    fn filter_matches_eq_and_membership() {
        let fields = serde_json::json!({ "landlordId": "user-1", "price": 2500 });
        assert!(Filter::eq("landlordId", "user-1").matches(&fields));
        assert!(!Filter::eq("landlordId", "user-2").matches(&fields));
        assert!(
            Filter::any_of("price", vec![serde_json::json!(1000), serde_json::json!(2500)])
                .matches(&fields)
        );
        assert!(!Filter::any_of("price", vec![serde_json::json!(1000)]).matches(&fields));
    }
}
