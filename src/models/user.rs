//! User entity model.

use serde::{Deserialize, Serialize};

/// Role a user signed up with. Fixed after account creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Landlord,
    Tenant,
}

/// A registered user of the marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    /// Absent for accounts that never uploaded one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_without_avatar() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "user-9",
            "name": "Eve Adams",
            "email": "eve@example.com",
            "role": "tenant",
        }))
        .expect("user without avatarUrl should decode");
        assert_eq!(user.role, UserRole::Tenant);
        assert!(user.avatar_url.is_none());
    }
}
