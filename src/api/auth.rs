// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login endpoint.

use axum::{extract::State, Json};

use crate::auth::{AuthError, AuthState};
use crate::models::{LoginRequest, LoginResponse};
use crate::state::AppState;

/// Resolve an email/password pair to a user and start a session.
///
/// The password is not verified against the stored hash.
#[utoipa::path(
    post,
    path = "/v1/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "User resolved", body = LoginResponse),
        (status = 400, description = "Email missing"),
        (status = 401, description = "No user with this email"),
        (status = 503, description = "Identity store unavailable"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    if request.email.is_empty() {
        return Err(AuthError::MissingCredentials);
    }

    let user = state
        .authenticator
        .authenticate_user(&request.email, &request.password)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let session = AuthState::sign_in(user, state.session_timeout);
    LoginResponse::new(session)
        .map(Json)
        .ok_or_else(|| AuthError::Internal("signed-in session has no user".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::api::router;
    use crate::auth::{Authenticator, User, UserRole};
    use crate::identity::InMemoryIdentityStore;

    fn app(store: Arc<InMemoryIdentityStore>) -> axum::Router {
        let state = AppState::new(Authenticator::new(store))
            .with_session_timeout(Duration::from_secs(900));
        router(state)
    }

    async fn post_login(app: axum::Router, body: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/v1/auth/login")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    fn bank_store() -> Arc<InMemoryIdentityStore> {
        Arc::new(InMemoryIdentityStore::new(vec![User::new(
            "bank",
            "Commercial Bank",
            "ops@bank.example",
            UserRole::CommercialBank,
            "$2b$10$hash",
        )]))
    }

    #[tokio::test]
    async fn login_success_returns_profile_permissions_session() {
        let (status, body) = post_login(
            app(bank_store()),
            r#"{"email":"ops@bank.example","password":"pw"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["email"], "ops@bank.example");
        assert_eq!(body["user"]["role"], "commercial_bank");
        assert!(body["user"].get("password_hash").is_none());
        assert_eq!(body["permissions"]["central_bank"], false);
        assert_eq!(body["permissions"]["commercial_bank"], true);
        assert_eq!(body["permissions"]["user"], true);
        assert_eq!(body["session"]["is_authenticated"], true);
        assert_eq!(body["session"]["session_time_remaining"], 900);
    }

    #[tokio::test]
    async fn unknown_email_is_401() {
        let (status, body) = post_login(
            app(bank_store()),
            r#"{"email":"nobody@bank.example","password":"pw"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error_code"], "invalid_credentials");
    }

    #[tokio::test]
    async fn empty_email_is_400() {
        let (status, body) = post_login(app(bank_store()), r#"{"email":"","password":"pw"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_code"], "missing_credentials");
    }

    #[tokio::test]
    async fn missing_email_field_uses_error_body() {
        let (status, body) = post_login(app(bank_store()), r#"{"password":"pw"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error_code"], "missing_credentials");
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn missing_password_field_reaches_lookup() {
        let (status, body) =
            post_login(app(bank_store()), r#"{"email":"ops@bank.example"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["email"], "ops@bank.example");

        let (status, body) =
            post_login(app(bank_store()), r#"{"email":"nobody@bank.example"}"#).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error_code"], "invalid_credentials");
    }

    #[tokio::test]
    async fn store_outage_is_503() {
        let store = bank_store();
        store.set_fail_reads(true);

        let (status, body) = post_login(
            app(store),
            r#"{"email":"ops@bank.example","password":"pw"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error_code"], "store_unavailable");
    }

    #[tokio::test]
    async fn last_login_write_failure_still_logs_in() {
        let store = bank_store();
        store.set_fail_writes(true);

        let (status, _) = post_login(
            app(store),
            r#"{"email":"ops@bank.example","password":"pw"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
    }
}
