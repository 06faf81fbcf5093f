//! Integration tests for the landlord-side aggregates.

use std::sync::Arc;

use anyhow::Result;
use readmodel::config::AppConfig;
use readmodel::engine::OverviewEngine;
use readmodel::error::JoinStep;
use readmodel::models::PaymentStatus;
use readmodel::seeds::sample_store;
use readmodel::store::{MemoryStore, collections};
use serde_json::json;

#[path = "test_utils/mod.rs"]
mod test_utils;
use test_utils::{FailingStore, empty_engine, seeded_engine};

#[tokio::test]
async fn seeded_overview_aggregates_are_correct() -> Result<()> {
    let (_, engine) = seeded_engine();

    let overview = engine.landlord_overview("user-1").await?;

    // pay-1, pay-2 (lease-1) and pay-4 (lease-2) are paid.
    assert_eq!(overview.total_properties, 2);
    assert_eq!(overview.total_income, 2500 + 2500 + 3200);
    assert_eq!(overview.overdue_payments, 1); // pay-5
    assert_eq!(overview.pending_viewing_requests, 1); // vr-1
    Ok(())
}

#[tokio::test]
async fn recent_payments_are_most_recent_first_and_enriched() -> Result<()> {
    let (_, engine) = seeded_engine();

    let overview = engine.landlord_overview("user-1").await?;

    let dates: Vec<_> = overview
        .recent_payments
        .iter()
        .map(|row| row.payment_date)
        .collect();
    let mut sorted = dates.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(dates, sorted, "rows should be most recently dated first");

    let first = &overview.recent_payments[0];
    assert_eq!(first.id, "pay-3"); // 2024-01-01, the latest payment
    assert_eq!(first.tenant_name.as_deref(), Some("Charlie Brown"));
    assert_eq!(first.property_name.as_deref(), Some("Sunny Downtown Apartment"));
    Ok(())
}

#[tokio::test]
async fn landlord_without_properties_short_circuits() -> Result<()> {
    let (store, engine) = empty_engine();

    let overview = engine.landlord_overview("user-404").await?;

    assert_eq!(overview.total_income, 0);
    assert_eq!(overview.pending_viewing_requests, 0);
    assert_eq!(overview.overdue_payments, 0);
    assert!(overview.recent_payments.is_empty());
    assert_eq!(store.reads(), 1, "only the root properties query should run");
    Ok(())
}

#[tokio::test]
async fn income_sums_only_paid_payments() -> Result<()> {
    let store = MemoryStore::new();
    store.insert(
        collections::PROPERTIES,
        json!({
            "id": "prop-1", "landlordId": "ll-1", "name": "Test Flat", "price": 2500,
            "location": "Testville", "address": "1 Test St", "amenities": [],
            "availability": "rented", "imageIds": [], "bedrooms": 1, "bathrooms": 1, "size": 500,
        }),
    );
    store.insert(
        collections::LEASES,
        json!({
            "id": "lease-1", "propertyId": "prop-1", "landlordId": "ll-1", "tenantId": "t-1",
            "startDate": "2023-01-01", "endDate": "2024-01-01", "rentAmount": 2500, "signed": true,
        }),
    );
    for (id, amount, status) in [
        ("pay-1", 2500, "paid"),
        ("pay-2", 2500, "paid"),
        ("pay-3", 3200, "overdue"),
    ] {
        store.insert(
            collections::PAYMENTS,
            json!({
                "id": id, "leaseId": "lease-1", "amount": amount,
                "paymentDate": "2023-06-01", "status": status,
            }),
        );
    }

    let engine = OverviewEngine::new(Arc::new(store), &AppConfig::default());
    let overview = engine.landlord_overview("ll-1").await?;

    assert_eq!(overview.total_income, 5000);
    assert_eq!(overview.overdue_payments, 1);
    Ok(())
}

#[tokio::test]
async fn payments_outage_aborts_with_the_failing_step() {
    let store = FailingStore::wrapping(sample_store(), collections::PAYMENTS);
    let engine = OverviewEngine::new(Arc::new(store), &AppConfig::default());

    let err = engine
        .landlord_overview("user-1")
        .await
        .expect_err("payments outage should abort the aggregate");

    assert_eq!(err.step, JoinStep::PaymentsForLeases);
    assert_eq!(err.step.to_string(), "payments-for-leases");
}

#[tokio::test]
async fn payment_ledger_covers_every_lease() -> Result<()> {
    let (_, engine) = seeded_engine();

    let ledger = engine.payment_ledger("user-1").await?;

    assert_eq!(ledger.len(), 5);
    assert!(
        ledger
            .iter()
            .all(|row| row.tenant_name.is_some() && row.property_name.is_some())
    );
    let overdue: Vec<_> = ledger
        .iter()
        .filter(|row| row.status == PaymentStatus::Overdue)
        .collect();
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0].tenant_name.as_deref(), Some("Diana Prince"));
    Ok(())
}

#[tokio::test]
async fn roster_drops_leases_with_missing_tenants() -> Result<()> {
    let store = sample_store();
    // A lease referencing a tenant document that was deleted.
    store.insert(
        collections::LEASES,
        json!({
            "id": "lease-9", "propertyId": "prop-1", "landlordId": "user-1", "tenantId": "user-999",
            "startDate": "2024-01-01", "endDate": "2025-01-01", "rentAmount": 2000, "signed": true,
        }),
    );

    let engine = OverviewEngine::new(Arc::new(store), &AppConfig::default());
    let roster = engine.tenant_roster("user-1").await?;

    assert_eq!(roster.len(), 2);
    let names: Vec<&str> = roster.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, ["Charlie Brown", "Diana Prince"]);
    assert_eq!(
        roster[0].property_name.as_deref(),
        Some("Sunny Downtown Apartment")
    );
    Ok(())
}
