//! Landlord-side aggregates: the dashboard overview, the full payment
//! ledger, and the tenant roster.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use metrics::{counter, histogram};
use serde::Serialize;
use tracing::{debug, instrument};

use super::{OverviewEngine, most_recent_first};
use crate::error::{JoinFailed, JoinStep};
use crate::models::{Lease, Payment, PaymentStatus, Property, RequestStatus, User, ViewingRequest};
use crate::resolver;
use crate::store::collections;

/// Aggregated landlord dashboard view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LandlordOverview {
    /// Properties the landlord manages.
    pub total_properties: usize,
    /// Sum of all paid rent, in whole currency units.
    pub total_income: i64,
    /// Viewing requests awaiting a decision.
    pub pending_viewing_requests: usize,
    /// Payments past their date and unsettled.
    pub overdue_payments: usize,
    /// Most recently dated payments, enriched with tenant and property.
    pub recent_payments: Vec<PaymentRow>,
}

/// A payment joined with the tenant and property behind its lease. Names
/// are `None` when the referenced document is missing from the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRow {
    pub id: String,
    pub amount: i64,
    pub payment_date: DateTime<Utc>,
    pub status: PaymentStatus,
    pub tenant_name: Option<String>,
    pub property_name: Option<String>,
}

/// A lease row resolved to its tenant for the landlord's tenant list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TenantRow {
    pub tenant_id: String,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub property_name: Option<String>,
    pub lease_end_date: DateTime<Utc>,
}

impl OverviewEngine {
    /// Build the landlord dashboard overview.
    ///
    /// A landlord with no properties short-circuits after the root fetch:
    /// the result is all-empty and no dependent query is issued.
    #[instrument(skip(self))]
    pub async fn landlord_overview(
        &self,
        landlord_id: &str,
    ) -> Result<LandlordOverview, JoinFailed> {
        let timer = std::time::Instant::now();
        counter!("readmodel_overviews_total", "principal" => "landlord").increment(1);

        let properties: Vec<Property> = self
            .accessor
            .fetch_eq(collections::PROPERTIES, "landlordId", landlord_id)
            .await
            .map_err(|err| JoinFailed::at(JoinStep::PropertiesForLandlord, err))?;

        if properties.is_empty() {
            debug!(landlord_id, "landlord has no properties");
            return Ok(LandlordOverview::default());
        }

        let property_ids: Vec<String> = properties.iter().map(|p| p.id.clone()).collect();

        // Leases and viewing requests are keyed only off the property set.
        let (leases, requests) = tokio::try_join!(
            async {
                resolver::fetch_where_in::<Lease>(
                    &self.accessor,
                    collections::LEASES,
                    "propertyId",
                    &property_ids,
                )
                .await
                .map_err(|err| JoinFailed::at(JoinStep::LeasesForProperties, err))
            },
            async {
                resolver::fetch_where_in::<ViewingRequest>(
                    &self.accessor,
                    collections::VIEWING_REQUESTS,
                    "propertyId",
                    &property_ids,
                )
                .await
                .map_err(|err| JoinFailed::at(JoinStep::ViewingRequestsForProperties, err))
            },
        )?;

        let lease_ids: Vec<String> = leases.iter().map(|l| l.id.clone()).collect();
        let tenant_ids: Vec<String> = leases.iter().map(|l| l.tenant_id.clone()).collect();

        // Payments and tenants are keyed only off the lease set.
        let (mut payments, tenants) = tokio::try_join!(
            async {
                resolver::fetch_where_in::<Payment>(
                    &self.accessor,
                    collections::PAYMENTS,
                    "leaseId",
                    &lease_ids,
                )
                .await
                .map_err(|err| JoinFailed::at(JoinStep::PaymentsForLeases, err))
            },
            async {
                resolver::resolve_by_ids::<User>(&self.accessor, collections::USERS, &tenant_ids)
                    .await
                    .map_err(|err| JoinFailed::at(JoinStep::TenantsForLeases, err))
            },
        )?;

        let total_income = payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Paid)
            .map(|p| p.amount)
            .sum();
        let overdue_payments = payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Overdue)
            .count();
        let pending_viewing_requests = requests
            .iter()
            .filter(|r| r.status == RequestStatus::Pending)
            .count();

        let lease_by_id: HashMap<&str, &Lease> =
            leases.iter().map(|l| (l.id.as_str(), l)).collect();
        let tenant_by_id: HashMap<&str, &User> =
            tenants.iter().map(|(id, user)| (id.as_str(), user)).collect();
        let property_by_id: HashMap<&str, &Property> =
            properties.iter().map(|p| (p.id.as_str(), p)).collect();

        most_recent_first(&mut payments);
        let recent_payments = payments
            .iter()
            .take(self.recent_payments_limit)
            .map(|payment| enrich_payment(payment, &lease_by_id, &tenant_by_id, &property_by_id))
            .collect();

        histogram!("readmodel_overview_duration_ms", "principal" => "landlord")
            .record(timer.elapsed().as_secs_f64() * 1000.0);

        Ok(LandlordOverview {
            total_properties: properties.len(),
            total_income,
            pending_viewing_requests,
            overdue_payments,
            recent_payments,
        })
    }

    /// Every payment across the landlord's leases, most recent first, each
    /// row enriched with tenant and property names.
    #[instrument(skip(self))]
    pub async fn payment_ledger(&self, landlord_id: &str) -> Result<Vec<PaymentRow>, JoinFailed> {
        let leases: Vec<Lease> = self
            .accessor
            .fetch_eq(collections::LEASES, "landlordId", landlord_id)
            .await
            .map_err(|err| JoinFailed::at(JoinStep::LeasesForLandlord, err))?;

        let lease_ids: Vec<String> = leases.iter().map(|l| l.id.clone()).collect();
        let tenant_ids: Vec<String> = leases.iter().map(|l| l.tenant_id.clone()).collect();
        let property_ids: Vec<String> = leases.iter().map(|l| l.property_id.clone()).collect();

        let (mut payments, tenants, properties) = tokio::try_join!(
            async {
                resolver::fetch_where_in::<Payment>(
                    &self.accessor,
                    collections::PAYMENTS,
                    "leaseId",
                    &lease_ids,
                )
                .await
                .map_err(|err| JoinFailed::at(JoinStep::PaymentsForLeases, err))
            },
            async {
                resolver::resolve_by_ids::<User>(&self.accessor, collections::USERS, &tenant_ids)
                    .await
                    .map_err(|err| JoinFailed::at(JoinStep::TenantsForLeases, err))
            },
            async {
                resolver::resolve_by_ids::<Property>(
                    &self.accessor,
                    collections::PROPERTIES,
                    &property_ids,
                )
                .await
                .map_err(|err| JoinFailed::at(JoinStep::PropertiesForLeases, err))
            },
        )?;

        let lease_by_id: HashMap<&str, &Lease> =
            leases.iter().map(|l| (l.id.as_str(), l)).collect();
        let tenant_by_id: HashMap<&str, &User> =
            tenants.iter().map(|(id, user)| (id.as_str(), user)).collect();
        let property_by_id: HashMap<&str, &Property> = properties
            .iter()
            .map(|(id, property)| (id.as_str(), property))
            .collect();

        most_recent_first(&mut payments);
        Ok(payments
            .iter()
            .map(|payment| enrich_payment(payment, &lease_by_id, &tenant_by_id, &property_by_id))
            .collect())
    }

    /// One row per lease with the resolved tenant and property. Leases
    /// whose tenant document is missing are dropped; the store may lag
    /// behind a deletion.
    #[instrument(skip(self))]
    pub async fn tenant_roster(&self, landlord_id: &str) -> Result<Vec<TenantRow>, JoinFailed> {
        let leases: Vec<Lease> = self
            .accessor
            .fetch_eq(collections::LEASES, "landlordId", landlord_id)
            .await
            .map_err(|err| JoinFailed::at(JoinStep::LeasesForLandlord, err))?;

        let tenant_ids: Vec<String> = leases.iter().map(|l| l.tenant_id.clone()).collect();
        let property_ids: Vec<String> = leases.iter().map(|l| l.property_id.clone()).collect();

        let (tenants, properties) = tokio::try_join!(
            async {
                resolver::resolve_by_ids::<User>(&self.accessor, collections::USERS, &tenant_ids)
                    .await
                    .map_err(|err| JoinFailed::at(JoinStep::TenantsForLeases, err))
            },
            async {
                resolver::resolve_by_ids::<Property>(
                    &self.accessor,
                    collections::PROPERTIES,
                    &property_ids,
                )
                .await
                .map_err(|err| JoinFailed::at(JoinStep::PropertiesForLeases, err))
            },
        )?;

        let mut roster: Vec<TenantRow> = leases
            .iter()
            .filter_map(|lease| {
                let Some(tenant) = tenants.get(&lease.tenant_id) else {
                    debug!(
                        lease_id = %lease.id,
                        tenant_id = %lease.tenant_id,
                        "dropping roster row for missing tenant"
                    );
                    return None;
                };
                Some(TenantRow {
                    tenant_id: tenant.id.clone(),
                    name: tenant.name.clone(),
                    email: tenant.email.clone(),
                    avatar_url: tenant.avatar_url.clone(),
                    property_name: properties.get(&lease.property_id).map(|p| p.name.clone()),
                    lease_end_date: lease.end_date,
                })
            })
            .collect();

        roster.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.tenant_id.cmp(&b.tenant_id)));
        Ok(roster)
    }
}

fn enrich_payment(
    payment: &Payment,
    leases: &HashMap<&str, &Lease>,
    tenants: &HashMap<&str, &User>,
    properties: &HashMap<&str, &Property>,
) -> PaymentRow {
    let lease = leases.get(payment.lease_id.as_str());
    let tenant = lease.and_then(|l| tenants.get(l.tenant_id.as_str()));
    let property = lease.and_then(|l| properties.get(l.property_id.as_str()));

    PaymentRow {
        id: payment.id.clone(),
        amount: payment.amount,
        payment_date: payment.payment_date,
        status: payment.status,
        tenant_name: tenant.map(|t| t.name.clone()),
        property_name: property.map(|p| p.name.clone()),
    }
}
