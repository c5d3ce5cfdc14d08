// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Platform roles and the permission table.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::user::User;

/// Platform roles.
///
/// ## Role Hierarchy
///
/// - `CentralBank` - Issuing authority, satisfies every requirement
/// - `CommercialBank` - Intermediary, satisfies `CommercialBank` and `User`
/// - `User` - Retail holder, satisfies `User` only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Central bank operator
    CentralBank,
    /// Commercial bank operator
    CommercialBank,
    /// Retail user
    User,
}

impl UserRole {
    /// All roles, highest first.
    pub const ALL: [UserRole; 3] = [
        UserRole::CentralBank,
        UserRole::CommercialBank,
        UserRole::User,
    ];

    /// Check whether this role satisfies the `required` role.
    ///
    /// Evaluated as a literal table, first match wins. Do not collapse this
    /// into an ordinal comparison.
    pub fn satisfies(&self, required: UserRole) -> bool {
        match (self, required) {
            (UserRole::CentralBank, _) => true,
            (UserRole::CommercialBank, required) if required != UserRole::CentralBank => true,
            (UserRole::User, UserRole::User) => true,
            _ => false,
        }
    }

    /// Parse role from its wire name (`central_bank`, `commercial_bank`, `user`).
    pub fn from_str(s: &str) -> Option<UserRole> {
        match s {
            "central_bank" => Some(UserRole::CentralBank),
            "commercial_bank" => Some(UserRole::CommercialBank),
            "user" => Some(UserRole::User),
            _ => None,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::CentralBank => write!(f, "central_bank"),
            UserRole::CommercialBank => write!(f, "commercial_bank"),
            UserRole::User => write!(f, "user"),
        }
    }
}

/// Decide whether `user` meets the `required` access level.
///
/// An absent user never has permission.
pub fn has_permission(user: Option<&User>, required: UserRole) -> bool {
    match user {
        None => false,
        Some(user) => user.role.satisfies(required),
    }
}
