//! Lease entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::normalize;

/// A lease binding a tenant to a property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lease {
    pub id: String,
    pub property_id: String,
    pub landlord_id: String,
    pub tenant_id: String,
    #[serde(deserialize_with = "normalize::datetime")]
    pub start_date: DateTime<Utc>,
    #[serde(deserialize_with = "normalize::datetime")]
    pub end_date: DateTime<Utc>,
    /// Monthly rent in whole currency units.
    pub rent_amount: i64,
    /// A lease is active once both parties have signed.
    pub signed: bool,
}
