//! Tenant-side aggregate: active lease, leased property, payment state,
//! and the tenant's applications with their property names.

use chrono::{DateTime, Utc};
use metrics::{counter, histogram};
use serde::Serialize;
use tracing::{instrument, warn};

use super::{OverviewEngine, most_recent_first, next_due_payment};
use crate::error::{JoinFailed, JoinStep};
use crate::models::{Application, ApplicationStatus, Lease, Payment, PaymentStatus, Property};
use crate::resolver;
use crate::store::collections;

/// Aggregated tenant dashboard view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TenantOverview {
    /// The tenant's active (signed) lease, if any.
    pub lease: Option<Lease>,
    /// The property behind the active lease.
    pub property: Option<Property>,
    /// The next payment due on the active lease.
    pub next_payment: Option<Payment>,
    /// Settled payments, most recent first.
    pub payment_history: Vec<Payment>,
    /// The tenant's most recent applications.
    pub applications: Vec<ApplicationRow>,
}

/// An application joined with its property's name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationRow {
    pub id: String,
    pub property_id: String,
    pub property_name: Option<String>,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
}

impl OverviewEngine {
    /// Build the tenant dashboard overview.
    ///
    /// The dashboard assumes at most one signed lease per tenant; when the
    /// store disagrees, the lease with the most recent start date wins and
    /// the anomaly is logged.
    #[instrument(skip(self))]
    pub async fn tenant_overview(&self, tenant_id: &str) -> Result<TenantOverview, JoinFailed> {
        let timer = std::time::Instant::now();
        counter!("readmodel_overviews_total", "principal" => "tenant").increment(1);

        // The lease root and the application list are both keyed off the
        // tenant alone.
        let (leases, applications) = tokio::try_join!(
            async {
                self.accessor
                    .fetch_eq::<Lease, _>(collections::LEASES, "tenantId", tenant_id)
                    .await
                    .map_err(|err| JoinFailed::at(JoinStep::LeasesForTenant, err))
            },
            async {
                self.accessor
                    .fetch_eq::<Application, _>(
                        collections::RENTAL_APPLICATIONS,
                        "tenantId",
                        tenant_id,
                    )
                    .await
                    .map_err(|err| JoinFailed::at(JoinStep::ApplicationsForTenant, err))
            },
        )?;

        let lease = select_signed_lease(tenant_id, leases);

        let (property, mut payments) = match &lease {
            Some(lease) => {
                tokio::try_join!(
                    async {
                        self.accessor
                            .get::<Property>(collections::PROPERTIES, &lease.property_id)
                            .await
                            .map_err(|err| JoinFailed::at(JoinStep::PropertyForLease, err))
                    },
                    async {
                        self.accessor
                            .fetch_eq::<Payment, _>(collections::PAYMENTS, "leaseId", &*lease.id)
                            .await
                            .map_err(|err| JoinFailed::at(JoinStep::PaymentsForLease, err))
                    },
                )?
            }
            None => (None, Vec::new()),
        };

        let application_property_ids: Vec<String> = applications
            .iter()
            .map(|app| app.property_id.clone())
            .collect();
        let application_properties = resolver::resolve_by_ids::<Property>(
            &self.accessor,
            collections::PROPERTIES,
            &application_property_ids,
        )
        .await
        .map_err(|err| JoinFailed::at(JoinStep::PropertiesForApplications, err))?;

        let next_payment = next_due_payment(&payments).cloned();

        most_recent_first(&mut payments);
        let payment_history: Vec<Payment> = payments
            .into_iter()
            .filter(|p| p.status == PaymentStatus::Paid)
            .take(self.recent_payments_limit)
            .collect();

        let mut applications = applications;
        applications.sort_by(|a, b| {
            b.submitted_at
                .cmp(&a.submitted_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        let applications = applications
            .iter()
            .take(self.recent_applications_limit)
            .map(|app| ApplicationRow {
                id: app.id.clone(),
                property_id: app.property_id.clone(),
                property_name: application_properties
                    .get(&app.property_id)
                    .map(|p| p.name.clone()),
                status: app.status,
                submitted_at: app.submitted_at,
            })
            .collect();

        histogram!("readmodel_overview_duration_ms", "principal" => "tenant")
            .record(timer.elapsed().as_secs_f64() * 1000.0);

        Ok(TenantOverview {
            lease,
            property,
            next_payment,
            payment_history,
            applications,
        })
    }
}

/// Pick the tenant's active lease from the fetched set. More than one
/// signed lease is an anomaly the dashboard tolerates: the most recently
/// started lease wins, ties broken by ID ascending.
fn select_signed_lease(tenant_id: &str, leases: Vec<Lease>) -> Option<Lease> {
    let mut signed: Vec<Lease> = leases.into_iter().filter(|l| l.signed).collect();
    if signed.len() > 1 {
        warn!(
            tenant_id,
            count = signed.len(),
            "tenant has multiple signed leases; selecting the most recent"
        );
    }
    signed.sort_by(|a, b| {
        b.start_date
            .cmp(&a.start_date)
            .then_with(|| a.id.cmp(&b.id))
    });
    signed.into_iter().next()
}
