//! Rental application entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::normalize;

/// Landlord decision state of a rental application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Declined,
}

/// A tenant's application for a property. Approval may trigger lease
/// creation externally; the two are not atomic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub property_id: String,
    pub tenant_id: String,
    pub status: ApplicationStatus,
    #[serde(deserialize_with = "normalize::datetime")]
    pub submitted_at: DateTime<Utc>,
}
