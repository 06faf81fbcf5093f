//! Sample fixture data for local development and tests.
//!
//! Mirrors a small but representative slice of the marketplace: two
//! landlords, two tenants, a handful of listings, two signed leases with
//! payment history, and viewing requests in every state.

use serde_json::json;

use crate::store::{MemoryStore, collections};

/// Build an in-memory store seeded with the sample records.
pub fn sample_store() -> MemoryStore {
    let store = MemoryStore::new();

    for user in [
        json!({
            "id": "user-1", "name": "Alice Johnson", "email": "alice@example.com",
            "role": "landlord", "avatarUrl": "https://picsum.photos/seed/user1/100/100",
        }),
        json!({
            "id": "user-2", "name": "Bob Williams", "email": "bob@example.com",
            "role": "landlord", "avatarUrl": "https://picsum.photos/seed/user2/100/100",
        }),
        json!({
            "id": "user-11", "name": "Charlie Brown", "email": "charlie@example.com",
            "role": "tenant", "avatarUrl": "https://picsum.photos/seed/user11/100/100",
        }),
        json!({
            "id": "user-12", "name": "Diana Prince", "email": "diana@example.com",
            "role": "tenant",
        }),
    ] {
        store.insert(collections::USERS, user);
    }

    for property in [
        json!({
            "id": "prop-1", "landlordId": "user-1", "name": "Sunny Downtown Apartment",
            "price": 2500, "location": "New York", "address": "123 Main St, Apt 4B",
            "amenities": ["Gym", "Pool", "In-unit Washer/Dryer"], "availability": "rented",
            "imageIds": ["img-1", "img-2", "img-3"], "bedrooms": 2, "bathrooms": 2, "size": 1100,
        }),
        json!({
            "id": "prop-2", "landlordId": "user-1", "name": "Cozy Suburban House",
            "price": 3200, "location": "San Francisco", "address": "456 Oak Ave",
            "amenities": ["Backyard", "Garage", "Fireplace"], "availability": "rented",
            "imageIds": ["img-4", "img-5", "img-6"], "bedrooms": 3, "bathrooms": 2, "size": 1800,
        }),
        json!({
            "id": "prop-3", "landlordId": "user-2", "name": "Modern Loft in Arts District",
            "price": 2800, "location": "Los Angeles", "address": "789 Art St, Loft 3",
            "amenities": ["High Ceilings", "Exposed Brick", "Gym"], "availability": "available",
            "imageIds": ["img-7", "img-8", "img-9"], "bedrooms": 1, "bathrooms": 1, "size": 950,
        }),
        json!({
            "id": "prop-4", "landlordId": "user-2", "name": "Lakeside Cabin Retreat",
            "price": 1800, "location": "Seattle", "address": "101 Lakeview Dr",
            "amenities": ["Lake Access", "Fire Pit", "Deck"], "availability": "available",
            "imageIds": ["img-10", "img-11", "img-12"], "bedrooms": 2, "bathrooms": 1, "size": 800,
        }),
    ] {
        store.insert(collections::PROPERTIES, property);
    }

    for lease in [
        json!({
            "id": "lease-1", "propertyId": "prop-1", "landlordId": "user-1", "tenantId": "user-11",
            "startDate": "2023-11-01", "endDate": "2024-10-31", "rentAmount": 2500, "signed": true,
        }),
        json!({
            "id": "lease-2", "propertyId": "prop-2", "landlordId": "user-1", "tenantId": "user-12",
            "startDate": "2023-09-01", "endDate": "2024-08-31", "rentAmount": 3200, "signed": true,
        }),
    ] {
        store.insert(collections::LEASES, lease);
    }

    // lease-1 payments use the store-native timestamp wrapper, lease-2 plain
    // dates; both shapes occur in production data.
    for payment in [
        json!({
            "id": "pay-1", "leaseId": "lease-1", "amount": 2500,
            "paymentDate": { "seconds": 1698796800, "nanoseconds": 0 }, // 2023-11-01
            "status": "paid",
        }),
        json!({
            "id": "pay-2", "leaseId": "lease-1", "amount": 2500,
            "paymentDate": { "_seconds": 1701388800, "_nanoseconds": 0 }, // 2023-12-01
            "status": "paid",
        }),
        json!({
            "id": "pay-3", "leaseId": "lease-1", "amount": 2500,
            "paymentDate": "2024-01-01", "status": "pending",
        }),
        json!({
            "id": "pay-4", "leaseId": "lease-2", "amount": 3200,
            "paymentDate": "2023-11-01", "status": "paid",
        }),
        json!({
            "id": "pay-5", "leaseId": "lease-2", "amount": 3200,
            "paymentDate": "2023-12-01", "status": "overdue",
        }),
    ] {
        store.insert(collections::PAYMENTS, payment);
    }

    for request in [
        json!({
            "id": "vr-1", "propertyId": "prop-1", "landlordId": "user-1", "name": "Eve",
            "contact": "eve@example.com", "preferredTime": "2023-12-10", "status": "pending",
        }),
        json!({
            "id": "vr-2", "propertyId": "prop-3", "landlordId": "user-2", "name": "Frank",
            "contact": "frank@example.com", "preferredTime": "2023-12-12", "status": "confirmed",
        }),
        json!({
            "id": "vr-3", "propertyId": "prop-1", "landlordId": "user-1", "name": "Grace",
            "contact": "grace@example.com", "preferredTime": "2023-12-15", "status": "cancelled",
        }),
    ] {
        store.insert(collections::VIEWING_REQUESTS, request);
    }

    for application in [
        json!({
            "id": "app-1", "propertyId": "prop-1", "tenantId": "user-11",
            "status": "approved", "submittedAt": "2023-10-01",
        }),
        json!({
            "id": "app-2", "propertyId": "prop-3", "tenantId": "user-11",
            "status": "pending", "submittedAt": "2023-10-15",
        }),
        json!({
            "id": "app-3", "propertyId": "prop-4", "tenantId": "user-12",
            "status": "declined", "submittedAt": "2023-10-05",
        }),
    ] {
        store.insert(collections::RENTAL_APPLICATIONS, application);
    }

    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Payment, User};
    use crate::store::DocumentStore;

    #[tokio::test]
    async fn seeded_documents_decode_into_models() {
        let store = sample_store();

        let users = store.fetch(collections::USERS, None).await.unwrap();
        assert_eq!(users.len(), 4);
        for doc in &users {
            doc.decode::<User>().expect("seeded user should decode");
        }

        let payments = store.fetch(collections::PAYMENTS, None).await.unwrap();
        assert_eq!(payments.len(), 5);
        for doc in &payments {
            doc.decode::<Payment>().expect("seeded payment should decode");
        }
    }
}
