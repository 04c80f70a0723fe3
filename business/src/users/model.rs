//! User records and request/response bodies for the `/api/v1/auth/*` endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of an account. Drives every UI-level restriction on a user record.
///
/// Each restriction below is an exhaustive `match`, so a new role must be
/// classified at every site before the crate compiles again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AccountType {
    SuperAdmin,
    #[default]
    Admin,
    Graphics,
    Display,
    Accounts,
}

impl AccountType {
    /// All roles, in the order the role filter lists them.
    pub const ALL: [Self; 5] = [
        Self::SuperAdmin,
        Self::Admin,
        Self::Graphics,
        Self::Display,
        Self::Accounts,
    ];

    /// Roles a user can be given through the create and edit forms.
    pub const ASSIGNABLE: [Self; 4] = [Self::Admin, Self::Graphics, Self::Display, Self::Accounts];

    /// Wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "SuperAdmin",
            Self::Admin => "Admin",
            Self::Graphics => "Graphics",
            Self::Display => "Display",
            Self::Accounts => "Accounts",
        }
    }

    /// Human readable name.
    pub fn label(self) -> &'static str {
        match self {
            Self::SuperAdmin => "Super Admin",
            Self::Admin => "Admin",
            Self::Graphics => "Graphics",
            Self::Display => "Display",
            Self::Accounts => "Accounts",
        }
    }

    /// Protected accounts cannot be deleted or demoted from this screen.
    pub fn is_protected(self) -> bool {
        match self {
            Self::SuperAdmin => true,
            Self::Admin | Self::Graphics | Self::Display | Self::Accounts => false,
        }
    }

    /// Whether the delete action is offered for an account of this type.
    pub fn can_be_deleted(self) -> bool {
        match self {
            Self::SuperAdmin => false,
            Self::Admin | Self::Graphics | Self::Display | Self::Accounts => true,
        }
    }

    /// Whether the edit form locks the role selector for an account of this type.
    pub fn role_is_locked(self) -> bool {
        match self {
            Self::SuperAdmin => true,
            Self::Admin | Self::Graphics | Self::Display | Self::Accounts => false,
        }
    }

    /// Whether the create/edit forms may assign this type.
    pub fn is_assignable(self) -> bool {
        match self {
            Self::SuperAdmin => false,
            Self::Admin | Self::Graphics | Self::Display | Self::Accounts => true,
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A user account as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub account_type: AccountType,
    #[serde(
        rename = "created",
        alias = "createdAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Creation date as `YYYY-MM-DD`, or `-` when the server sent none.
    pub fn created_label(&self) -> String {
        self.created_at
            .map(|created| created.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_owned())
    }
}

/// Body of `GET /api/v1/auth/getAllUsers`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListUsersResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<User>,
}

/// Body of `POST /api/v1/auth/create-account`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub account_type: AccountType,
}

/// Body of `PUT /api/v1/auth/updateUser/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub account_type: AccountType,
}

/// Body of `POST /api/v1/auth/change-password`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub user_id: String,
    pub new_password: String,
}

/// Body of `DELETE /api/v1/auth/deleteUser/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteUserResponse {
    pub success: bool,
}
