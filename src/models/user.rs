// Backend user accounts and invitations

use serde::{Deserialize, Serialize};

/// Closed role set, validated at the boundary. Some backend code paths still
/// say `loan_officer` where they mean `lender`; accept it as an alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    #[serde(alias = "loan_officer")]
    Lender,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Lender => "lender",
        }
    }
}

/// The signed-in user's own account record, from `/auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendUser {
    pub id: i64,
    pub email: String,
    pub role: Role,
    pub lender_id: Option<i64>,
}

impl BackendUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// A user row in the admin user-management list, from `/auth/users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagedUser {
    pub id: i64,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: Option<String>,
}

/// A pending invitation; consumed at most once by a signup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invitation {
    pub id: i64,
    pub email: String,
    pub role: Role,
    pub expires_at: Option<String>,
    #[serde(default)]
    pub accepted: bool,
    pub invited_by: Option<Inviter>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inviter {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

/// Body for `POST /auth/provision`, sent the first time an identity-provider
/// account reaches the backend.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProvisionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lender_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
}
