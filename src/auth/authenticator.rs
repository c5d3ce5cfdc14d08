// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Email lookup against the identity store.
//!
//! ## Flow
//!
//! 1. Read every user from the identity store (failure is `StoreUnavailable`)
//! 2. Optionally mirror the fetched set into the local `"users"` cache
//! 3. Pick the first record whose email matches byte-for-byte
//! 4. On a match, spawn the last-login write and return without joining it
//!
//! ## Known gap
//!
//! The password is accepted but never compared with `password_hash`: any
//! email match succeeds. This mirrors the deployed login contract and is
//! tracked as an open question rather than patched with an ad-hoc hash check.

use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::error::AuthError;
use super::user::{find_by_email, User};
use crate::identity::IdentityStore;
use crate::storage::UserCache;

/// Result of a lookup, with a handle on the background last-login write.
#[derive(Debug)]
pub struct LoginOutcome {
    pub user: Option<User>,
    pub last_login_update: Option<LastLoginUpdate>,
}

/// In-flight last-login write.
///
/// Dropping this detaches the task; it still runs to completion.
#[derive(Debug)]
pub struct LastLoginUpdate {
    user_id: String,
    handle: JoinHandle<Result<(), AuthError>>,
}

impl LastLoginUpdate {
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the write and return its outcome.
    pub async fn wait(self) -> Result<(), AuthError> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(AuthError::Internal(format!("last-login task failed: {e}"))),
        }
    }
}

pub struct Authenticator {
    store: Arc<dyn IdentityStore>,
    cache: Option<UserCache>,
}

impl Authenticator {
    pub fn new(store: Arc<dyn IdentityStore>) -> Self {
        Self { store, cache: None }
    }

    /// Mirror every fetched user set into `cache`.
    pub fn with_cache(mut self, cache: UserCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn store(&self) -> &Arc<dyn IdentityStore> {
        &self.store
    }

    pub fn cache(&self) -> Option<&UserCache> {
        self.cache.as_ref()
    }

    /// Resolve `email` to a user.
    ///
    /// Returns `Ok(None)` when no record matches. The last-login write is
    /// dispatched in the background and its outcome is only logged.
    pub async fn authenticate_user(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, AuthError> {
        let outcome = self.authenticate(email, password).await?;
        Ok(outcome.user)
    }

    /// Same as [`Authenticator::authenticate_user`], also handing back the
    /// last-login write so the caller can observe it.
    pub async fn authenticate(
        &self,
        email: &str,
        _password: &str,
    ) -> Result<LoginOutcome, AuthError> {
        let users = self.store.fetch_users().await.map_err(|e| {
            warn!(error = %e, "Identity store read failed");
            AuthError::StoreUnavailable(e)
        })?;

        self.populate_cache(&users);

        let Some(user) = find_by_email(&users, email).cloned() else {
            debug!(candidates = users.len(), "No user matches the supplied email");
            return Ok(LoginOutcome {
                user: None,
                last_login_update: None,
            });
        };

        info!(user_id = %user.id, role = %user.role, "User authenticated");
        let update = self.dispatch_last_login(&user);

        Ok(LoginOutcome {
            user: Some(user),
            last_login_update: Some(update),
        })
    }

    /// Overwrite the `"users"` cache entry with `users`, if a cache is set.
    pub fn populate_cache(&self, users: &[User]) {
        if let Some(cache) = &self.cache {
            cache.store_best_effort(users);
        }
    }

    fn dispatch_last_login(&self, user: &User) -> LastLoginUpdate {
        let store = Arc::clone(&self.store);
        let user_id = user.id.clone();
        let task_user_id = user.id.clone();
        let timestamp = Utc::now().to_rfc3339();

        let handle = tokio::spawn(async move {
            match store.update_last_login(&task_user_id, &timestamp).await {
                Ok(()) => {
                    debug!(user_id = %task_user_id, %timestamp, "Recorded last login");
                    Ok(())
                }
                Err(source) => {
                    warn!(user_id = %task_user_id, error = %source, "Failed to record last login");
                    Err(AuthError::LastLoginUpdateFailed {
                        user_id: task_user_id,
                        source,
                    })
                }
            }
        });

        LastLoginUpdate { user_id, handle }
    }
}
