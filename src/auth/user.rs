// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User records as served by the identity store.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::roles::UserRole;

/// A row of the identity store's `Users` collection.
///
/// The store is authoritative; values held here are a transient copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Opaque unique identifier
    pub id: String,
    pub username: String,
    /// Opaque hash string. Never compared or exposed by this crate.
    pub password_hash: String,
    pub role: UserRole,
    /// Display name
    pub name: String,
    /// Lookup key, unique within the store
    pub email: String,
    /// Avatar URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// RFC 3339 timestamp of the last successful lookup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
}

impl User {
    /// Create a user with a freshly generated id and no login history.
    pub fn new(
        username: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: UserRole,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            username: username.into(),
            password_hash: password_hash.into(),
            role,
            name: name.into(),
            email: email.into(),
            avatar: None,
            last_login: None,
        }
    }
}

/// User as returned to API clients (never includes the password hash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub role: UserRole,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
            name: user.name,
            email: user.email,
            avatar: user.avatar,
            last_login: user.last_login,
        }
    }
}

/// Find the first user whose email equals `email` byte-for-byte.
///
/// Duplicate emails resolve to the earliest record in store order.
pub fn find_by_email<'a>(users: &'a [User], email: &str) -> Option<&'a User> {
    users.iter().find(|user| user.email == email)
}
