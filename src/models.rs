// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies for the REST API. All types derive
//! `ToSchema` for the OpenAPI document.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::{has_permission, AuthState, User, UserProfile, UserRole};

// =============================================================================
// Login
// =============================================================================

#[derive(Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Absent is treated as empty and rejected by the handler.
    #[serde(default)]
    pub email: String,
    /// Accepted for contract compatibility; not verified against the stored hash.
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub user: UserProfile,
    pub permissions: PermissionSet,
    pub session: SessionInfo,
}

impl LoginResponse {
    pub fn new(state: AuthState) -> Option<Self> {
        let session = SessionInfo::from(&state);
        let user = state.current_user?;
        Some(Self {
            permissions: PermissionSet::for_user(Some(&user)),
            user: user.into(),
            session,
        })
    }
}

// =============================================================================
// Authorization
// =============================================================================

/// Which role requirements the user satisfies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PermissionSet {
    pub central_bank: bool,
    pub commercial_bank: bool,
    pub user: bool,
}

impl PermissionSet {
    pub fn for_user(user: Option<&User>) -> Self {
        Self {
            central_bank: has_permission(user, UserRole::CentralBank),
            commercial_bank: has_permission(user, UserRole::CommercialBank),
            user: has_permission(user, UserRole::User),
        }
    }
}

// =============================================================================
// Session
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionInfo {
    pub is_authenticated: bool,
    /// Seconds until the session times out
    pub session_time_remaining: u64,
}

impl From<&AuthState> for SessionInfo {
    fn from(state: &AuthState) -> Self {
        Self {
            is_authenticated: state.is_authenticated,
            session_time_remaining: state.session_time_remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn permission_set_follows_role_table() {
        let bank = User::new("b", "B", "b@x.com", UserRole::CommercialBank, "h");
        assert_eq!(
            PermissionSet::for_user(Some(&bank)),
            PermissionSet {
                central_bank: false,
                commercial_bank: true,
                user: true
            }
        );

        let retail = User::new("r", "R", "r@x.com", UserRole::User, "h");
        assert_eq!(
            PermissionSet::for_user(Some(&retail)),
            PermissionSet {
                central_bank: false,
                commercial_bank: false,
                user: true
            }
        );

        assert_eq!(
            PermissionSet::for_user(None),
            PermissionSet {
                central_bank: false,
                commercial_bank: false,
                user: false
            }
        );
    }

    #[test]
    fn login_response_from_signed_in_state() {
        let cb = User::new("cb", "CB", "cb@x.com", UserRole::CentralBank, "h");
        let state = AuthState::sign_in(cb, Duration::from_secs(120));

        let response = LoginResponse::new(state).unwrap();
        assert_eq!(response.user.email, "cb@x.com");
        assert!(response.permissions.central_bank);
        assert_eq!(response.session.session_time_remaining, 120);
        assert!(response.session.is_authenticated);
    }

    #[test]
    fn login_response_requires_user() {
        assert!(LoginResponse::new(AuthState::default()).is_none());
    }

    #[test]
    fn login_request_debug_redacts_password() {
        let request = LoginRequest {
            email: "a@x.com".to_string(),
            password: "hunter2".to_string(),
        };
        let debug = format!("{request:?}");
        assert!(debug.contains("a@x.com"));
        assert!(!debug.contains("hunter2"));
    }
}
