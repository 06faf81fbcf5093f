//! # Error Handling
//!
//! Unified error taxonomy for the read-model library: failed store reads,
//! accessor constraint violations, aborted multi-step joins, and rejected
//! viewing-request transitions. Errors are classified here and surfaced to
//! the caller unchanged; retry policy lives outside the library.

use std::fmt;

use thiserror::Error;

use crate::models::RequestStatus;

/// A failed read against the backing document store.
#[derive(Debug, Clone, Error)]
#[error("fetch from `{collection}` failed: {message}")]
pub struct FetchError {
    /// Collection the read targeted.
    pub collection: String,
    /// Description of the filter the read carried, when one was applied.
    pub filter: Option<String>,
    /// Underlying store failure (network, permission, timeout).
    pub message: String,
}

impl FetchError {
    /// Create a new fetch error for the given collection.
    pub fn new<C: Into<String>, M: Into<String>>(collection: C, message: M) -> Self {
        Self {
            collection: collection.into(),
            filter: None,
            message: message.into(),
        }
    }

    /// Attach the filter the failed read carried.
    pub fn with_filter<F: Into<String>>(mut self, filter: F) -> Self {
        self.filter = Some(filter.into());
        self
    }
}

/// Errors surfaced by the collection accessor layer.
#[derive(Debug, Clone, Error)]
pub enum AccessorError {
    /// The underlying store read failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// A membership filter exceeded the store's per-query ceiling. Oversized
    /// key sets must go through the resolver, which chunks them.
    #[error(
        "membership filter on `{collection}.{field}` has {requested} values, store ceiling is {limit}"
    )]
    ConstraintViolation {
        collection: String,
        field: String,
        requested: usize,
        limit: usize,
    },
    /// A returned document did not decode into the expected entity shape.
    #[error("malformed document `{id}` in `{collection}`: {message}")]
    Malformed {
        collection: String,
        id: String,
        message: String,
    },
}

impl AccessorError {
    /// Create a malformed-document error.
    pub fn malformed<C: Into<String>, I: Into<String>, M: Into<String>>(
        collection: C,
        id: I,
        message: M,
    ) -> Self {
        Self::Malformed {
            collection: collection.into(),
            id: id.into(),
            message: message.into(),
        }
    }
}

/// The constituent fetch at which a multi-step aggregate aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinStep {
    PropertiesForLandlord,
    LeasesForProperties,
    PaymentsForLeases,
    TenantsForLeases,
    ViewingRequestsForProperties,
    LeasesForLandlord,
    PropertiesForLeases,
    LeasesForTenant,
    PropertyForLease,
    PaymentsForLease,
    ApplicationsForTenant,
    PropertiesForApplications,
}

impl JoinStep {
    /// Return the canonical name for this step.
    pub const fn as_str(self) -> &'static str {
        match self {
            JoinStep::PropertiesForLandlord => "properties-for-landlord",
            JoinStep::LeasesForProperties => "leases-for-properties",
            JoinStep::PaymentsForLeases => "payments-for-leases",
            JoinStep::TenantsForLeases => "tenants-for-leases",
            JoinStep::ViewingRequestsForProperties => "viewing-requests-for-properties",
            JoinStep::LeasesForLandlord => "leases-for-landlord",
            JoinStep::PropertiesForLeases => "properties-for-leases",
            JoinStep::LeasesForTenant => "leases-for-tenant",
            JoinStep::PropertyForLease => "property-for-lease",
            JoinStep::PaymentsForLease => "payments-for-lease",
            JoinStep::ApplicationsForTenant => "applications-for-tenant",
            JoinStep::PropertiesForApplications => "properties-for-applications",
        }
    }
}

impl fmt::Display for JoinStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A multi-step aggregate aborted because one of its constituent fetches
/// failed. No partial aggregate is returned alongside this error.
#[derive(Debug, Clone, Error)]
#[error("aggregate aborted at `{step}`: {source}")]
pub struct JoinFailed {
    /// The fetch that failed.
    pub step: JoinStep,
    /// The originating accessor failure.
    #[source]
    pub source: AccessorError,
}

impl JoinFailed {
    /// Wrap an accessor failure with the step it occurred at.
    pub fn at(step: JoinStep, source: AccessorError) -> Self {
        Self { step, source }
    }
}

/// A status change was attempted from a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("viewing request is `{from}` and cannot move to `{attempted}`")]
    InvalidTransition {
        from: RequestStatus,
        attempted: RequestStatus,
    },
}
