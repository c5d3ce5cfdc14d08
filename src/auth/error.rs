// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::identity::IdentityStoreError;

/// Authentication error type.
///
/// "No such user" is not an error at the library level
/// (`authenticate_user` returns `Ok(None)`); `InvalidCredentials` is how the
/// HTTP layer reports it.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Identity store unavailable: {0}")]
    StoreUnavailable(#[source] IdentityStoreError),

    /// Only produced on the background last-login channel.
    #[error("Failed to record last login for user {user_id}: {source}")]
    LastLoginUpdateFailed {
        user_id: String,
        #[source]
        source: IdentityStoreError,
    },

    #[error("Internal authentication error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingCredentials => "missing_credentials",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::StoreUnavailable(_) => "store_unavailable",
            AuthError::LastLoginUpdateFailed { .. } => "last_login_update_failed",
            AuthError::Internal(_) => "internal_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingCredentials => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::LastLoginUpdateFailed { .. } | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Store details stay in the logs.
        let error = match &self {
            AuthError::StoreUnavailable(_) => "Identity store unavailable".to_string(),
            other => other.to_string(),
        };
        let body = Json(AuthErrorBody {
            error,
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn invalid_credentials_returns_401() {
        let response = AuthError::InvalidCredentials.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["error_code"], "invalid_credentials");
    }

    #[tokio::test]
    async fn store_unavailable_hides_details() {
        let err = AuthError::StoreUnavailable(IdentityStoreError::Status {
            status: 500,
            body: "relation \"Users\" does not exist".to_string(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["error"], "Identity store unavailable");
        assert_eq!(body["error_code"], "store_unavailable");
    }

    #[test]
    fn status_codes() {
        assert_eq!(AuthError::MissingCredentials.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::Internal("x".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
