//! Payment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::normalize;

/// Settlement state of a rent payment. Transitions pending→paid or
/// pending→overdue happen outside this library and are reflected on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Overdue,
}

impl PaymentStatus {
    /// A payment still awaiting settlement.
    pub const fn is_due(self) -> bool {
        matches!(self, PaymentStatus::Pending | PaymentStatus::Overdue)
    }
}

/// One entry in a lease's append-only payment log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub lease_id: String,
    /// Amount in whole currency units.
    pub amount: i64,
    #[serde(deserialize_with = "normalize::datetime")]
    pub payment_date: DateTime<Utc>,
    pub status: PaymentStatus,
}
