//! Viewing-request status transitions.
//!
//! Landlords approve or reject pending viewing requests. `confirmed` and
//! `cancelled` are terminal: a transition attempted from either is rejected
//! before any write reaches the store, so a subsequent read observes the
//! unchanged status.

use serde_json::json;
use thiserror::Error;
use tracing::info;

use crate::accessor::decode_document;
use crate::error::{AccessorError, TransitionError};
use crate::models::{RequestStatus, ViewingRequest};
use crate::store::{MutableStore, collections};

/// Landlord decision on a pending viewing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestAction {
    Approve,
    Reject,
}

impl RequestAction {
    /// Status this action moves a pending request to.
    pub const fn target(self) -> RequestStatus {
        match self {
            RequestAction::Approve => RequestStatus::Confirmed,
            RequestAction::Reject => RequestStatus::Cancelled,
        }
    }
}

/// Validate a transition from `from` under `action`, returning the next
/// status.
pub fn transition(
    from: RequestStatus,
    action: RequestAction,
) -> Result<RequestStatus, TransitionError> {
    match from {
        RequestStatus::Pending => Ok(action.target()),
        RequestStatus::Confirmed | RequestStatus::Cancelled => {
            Err(TransitionError::InvalidTransition {
                from,
                attempted: action.target(),
            })
        }
    }
}

/// Errors from [`update_status`].
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("viewing request `{id}` not found")]
    NotFound { id: String },
    #[error(transparent)]
    Accessor(#[from] AccessorError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// Apply a landlord decision to a stored viewing request.
///
/// Reads the current status, validates the transition, and only then writes
/// the new status. An invalid transition leaves the stored document
/// untouched.
pub async fn update_status<S: MutableStore + ?Sized>(
    store: &S,
    request_id: &str,
    action: RequestAction,
) -> Result<ViewingRequest, RequestError> {
    let doc = store
        .get(collections::VIEWING_REQUESTS, request_id)
        .await
        .map_err(AccessorError::from)?
        .ok_or_else(|| RequestError::NotFound {
            id: request_id.to_string(),
        })?;
    let mut request: ViewingRequest = decode_document(collections::VIEWING_REQUESTS, &doc)?;

    let next = transition(request.status, action)?;
    store
        .update(
            collections::VIEWING_REQUESTS,
            request_id,
            json!({ "status": next }),
        )
        .await
        .map_err(AccessorError::from)?;

    request.status = next;
    info!(request_id, status = %next, "viewing request updated");
    Ok(request)
}
