//! Property entity model.

use serde::{Deserialize, Serialize};

/// Listing availability. Moves to `rented` when a lease is signed; no
/// reverse transition is modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Rented,
}

/// A rental listing owned by a landlord.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub landlord_id: String,
    pub name: String,
    /// Monthly asking price in whole currency units.
    pub price: i64,
    pub location: String,
    pub address: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub availability: Availability,
    /// Ordered gallery image references.
    #[serde(default)]
    pub image_ids: Vec<String>,
    pub bedrooms: u32,
    pub bathrooms: u32,
    /// Floor area in square feet.
    pub size: u32,
}
