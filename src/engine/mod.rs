//! # Join/Aggregation Engine
//!
//! Composes accessor and resolver reads into denormalized dashboard rows
//! and scalar aggregates for a single principal. Every aggregate is a pure
//! function of the reads it issues: no caching, no retries, no partial
//! results. A constituent fetch failure aborts the whole aggregate with
//! [`JoinFailed`](crate::error::JoinFailed) naming the failed step.

mod landlord;
mod tenant;

use std::sync::Arc;

pub use landlord::{LandlordOverview, PaymentRow, TenantRow};
pub use tenant::{ApplicationRow, TenantOverview};

use crate::accessor::CollectionAccessor;
use crate::config::AppConfig;
use crate::models::Payment;
use crate::store::DocumentStore;

/// Read-model engine over a document store. Cheap to clone; holds no
/// per-call state.
#[derive(Clone)]
pub struct OverviewEngine {
    accessor: CollectionAccessor,
    recent_payments_limit: usize,
    recent_applications_limit: usize,
}

impl OverviewEngine {
    /// Create an engine over the given store, configured from [`AppConfig`].
    pub fn new(store: Arc<dyn DocumentStore>, config: &AppConfig) -> Self {
        Self {
            accessor: CollectionAccessor::from_config(store, config),
            recent_payments_limit: config.recent_payments_limit,
            recent_applications_limit: config.recent_applications_limit,
        }
    }

    /// The accessor this engine reads through.
    pub fn accessor(&self) -> &CollectionAccessor {
        &self.accessor
    }
}

/// The next payment a tenant owes: earliest `paymentDate` among pending and
/// overdue payments, ties broken by ID ascending. `None` when nothing is
/// due.
pub fn next_due_payment(payments: &[Payment]) -> Option<&Payment> {
    payments
        .iter()
        .filter(|payment| payment.status.is_due())
        .min_by(|a, b| {
            a.payment_date
                .cmp(&b.payment_date)
                .then_with(|| a.id.cmp(&b.id))
        })
}

/// Order payments most recently dated first, ties by ID ascending.
fn most_recent_first(payments: &mut [Payment]) {
    payments.sort_by(|a, b| {
        b.payment_date
            .cmp(&a.payment_date)
            .then_with(|| a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentStatus;
    use chrono::{TimeZone, Utc};

    fn payment(id: &str, date: (i32, u32, u32), status: PaymentStatus) -> Payment {
        Payment {
            id: id.to_string(),
            lease_id: "lease-1".to_string(),
            amount: 2500,
            payment_date: Utc.with_ymd_and_hms(date.0, date.1, date.2, 0, 0, 0).unwrap(),
            status,
        }
    }

    #[test]
    fn next_due_skips_paid_and_picks_earliest() {
        let payments = vec![
            payment("pay-1", (2024, 1, 1), PaymentStatus::Paid),
            payment("pay-2", (2024, 2, 1), PaymentStatus::Pending),
            payment("pay-3", (2024, 3, 1), PaymentStatus::Overdue),
        ];

        let next = next_due_payment(&payments).expect("one payment should be due");
        assert_eq!(next.id, "pay-2");
        assert_eq!(next.status, PaymentStatus::Pending);
    }

    #[test]
    fn next_due_is_none_when_everything_is_paid() {
        let payments = vec![payment("pay-1", (2024, 1, 1), PaymentStatus::Paid)];
        assert!(next_due_payment(&payments).is_none());
    }

    #[test]
    fn next_due_breaks_date_ties_by_id() {
        let payments = vec![
            payment("pay-b", (2024, 2, 1), PaymentStatus::Overdue),
            payment("pay-a", (2024, 2, 1), PaymentStatus::Pending),
        ];
        assert_eq!(next_due_payment(&payments).unwrap().id, "pay-a");
    }

    #[test]
    fn recent_ordering_is_descending_with_id_ties() {
        let mut payments = vec![
            payment("pay-2", (2023, 12, 1), PaymentStatus::Paid),
            payment("pay-3", (2024, 1, 1), PaymentStatus::Pending),
            payment("pay-1", (2023, 12, 1), PaymentStatus::Paid),
        ];
        most_recent_first(&mut payments);
        let ids: Vec<&str> = payments.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["pay-3", "pay-1", "pay-2"]);
    }
}
