//! Current-user record.

use kira_commerce::ids::UserId;
use serde::{Deserialize, Serialize};

/// Access role, as the API reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Can manage products, orders, and users.
    Admin,
    /// Regular shopper.
    #[default]
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Customer => "customer",
        }
    }
}

/// The logged-in user, as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    /// Unique user identifier.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Optional given name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Optional family name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Access role.
    #[serde(default)]
    pub role: Role,
}

impl CurrentUser {
    /// Whether this user may use the admin surfaces.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
