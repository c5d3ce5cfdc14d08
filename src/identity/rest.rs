// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Supabase (PostgREST) identity store client.
//!
//! ## Requests
//!
//! | Operation | Request |
//! |-----------|---------|
//! | read all  | `GET {base}/rest/v1/{table}?select=*` |
//! | last login | `PATCH {base}/rest/v1/{table}?id=eq.{id}` body `{"last_login": ts}` |
//! | ping      | `GET {base}/rest/v1/{table}?select=id&limit=1` |
//!
//! Every request carries `apikey` and `Authorization: Bearer` with the same
//! key, and is bounded by the configured timeout.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::json;
use tracing::debug;
use url::Url;

use super::{IdentityStore, IdentityStoreError};
use crate::auth::User;

pub const DEFAULT_USERS_TABLE: &str = "Users";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct RestStoreConfig {
    /// Project base URL, e.g. `https://abc.supabase.co`
    pub base_url: Url,
    pub api_key: String,
    pub table: String,
    pub timeout: Duration,
}

impl RestStoreConfig {
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            base_url,
            api_key: api_key.into(),
            table: DEFAULT_USERS_TABLE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Clone)]
pub struct RestIdentityStore {
    table_url: Url,
    api_key: String,
    http: Client,
}

impl RestIdentityStore {
    pub fn new(config: RestStoreConfig) -> Result<Self, IdentityStoreError> {
        let table_url = table_url(&config.base_url, &config.table)?;
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| IdentityStoreError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            table_url,
            api_key: config.api_key,
            http,
        })
    }

    pub fn table_url(&self) -> &Url {
        &self.table_url
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    fn url_with_query(&self, pairs: &[(&str, &str)]) -> Url {
        let mut url = self.table_url.clone();
        url.query_pairs_mut().extend_pairs(pairs);
        url
    }
}

#[async_trait]
impl IdentityStore for RestIdentityStore {
    async fn fetch_users(&self) -> Result<Vec<User>, IdentityStoreError> {
        let url = self.url_with_query(&[("select", "*")]);
        let response = self
            .authorized(self.http.get(url))
            .send()
            .await
            .map_err(|e| IdentityStoreError::Request(e.to_string()))?;
        let response = ensure_success(response).await?;

        let users: Vec<User> = response
            .json()
            .await
            .map_err(|e| IdentityStoreError::InvalidResponse(e.to_string()))?;

        debug!(count = users.len(), "Fetched users from identity store");
        Ok(users)
    }

    async fn update_last_login(
        &self,
        user_id: &str,
        timestamp: &str,
    ) -> Result<(), IdentityStoreError> {
        let filter = format!("eq.{user_id}");
        let url = self.url_with_query(&[("id", filter.as_str())]);
        let response = self
            .authorized(self.http.patch(url))
            .header("Prefer", "return=minimal")
            .json(&json!({ "last_login": timestamp }))
            .send()
            .await
            .map_err(|e| IdentityStoreError::Request(e.to_string()))?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), IdentityStoreError> {
        let url = self.url_with_query(&[("select", "id"), ("limit", "1")]);
        let response = self
            .authorized(self.http.get(url))
            .send()
            .await
            .map_err(|e| IdentityStoreError::Request(e.to_string()))?;
        ensure_success(response).await?;
        Ok(())
    }
}

/// `{base}/rest/v1/{table}`, tolerant of a trailing slash on `base`.
fn table_url(base: &Url, table: &str) -> Result<Url, IdentityStoreError> {
    if table.trim().is_empty() {
        return Err(IdentityStoreError::Request("users table name is empty".to_string()));
    }

    let mut url = base.clone();
    url.set_query(None);
    url.path_segments_mut()
        .map_err(|_| IdentityStoreError::Request(format!("{base} cannot be a base URL")))?
        .pop_if_empty()
        .extend(["rest", "v1", table]);
    Ok(url)
}

async fn ensure_success(response: Response) -> Result<Response, IdentityStoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(IdentityStoreError::Status {
        status: status.as_u16(),
        body,
    })
}
