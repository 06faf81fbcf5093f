//! # Data Models
//!
//! Entity models mirroring the document store's collections. Documents are
//! loosely shaped; optional fields are modeled explicitly and every date
//! field is normalized to one representation on the way in.

use serde::{Deserialize, Serialize};

pub mod application;
pub mod lease;
pub mod payment;
pub mod property;
pub mod user;
pub mod viewing_request;

pub use application::{Application, ApplicationStatus};
pub use lease::Lease;
pub use payment::{Payment, PaymentStatus};
pub use property::{Availability, Property};
pub use user::{User, UserRole};
pub use viewing_request::{RequestStatus, ViewingRequest};

/// Basic service information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "rentmarket-readmodel".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
