// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-process identity store for local development and tests.
//!
//! Keeps users in insertion order so that lookups see the same ordering a
//! remote read-all would return. Reads and writes can be switched to fail to
//! exercise the degraded paths.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{IdentityStore, IdentityStoreError};
use crate::auth::User;

#[derive(Default)]
pub struct InMemoryIdentityStore {
    users: RwLock<Vec<User>>,
    last_login_updates: RwLock<Vec<(String, String)>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl InMemoryIdentityStore {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
            ..Self::default()
        }
    }

    /// Load a JSON array of user records (same shape as the remote rows).
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, IdentityStoreError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            IdentityStoreError::Unavailable(format!("failed to read {}: {e}", path.display()))
        })?;
        let users: Vec<User> = serde_json::from_str(&raw)
            .map_err(|e| IdentityStoreError::InvalidResponse(e.to_string()))?;
        Ok(Self::new(users))
    }

    pub async fn insert(&self, user: User) {
        self.users.write().await.push(user);
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// `(user_id, timestamp)` pairs applied so far, oldest first.
    pub async fn last_login_updates(&self) -> Vec<(String, String)> {
        self.last_login_updates.read().await.clone()
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn fetch_users(&self) -> Result<Vec<User>, IdentityStoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(IdentityStoreError::Unavailable("reads disabled".to_string()));
        }
        Ok(self.users.read().await.clone())
    }

    async fn update_last_login(
        &self,
        user_id: &str,
        timestamp: &str,
    ) -> Result<(), IdentityStoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(IdentityStoreError::Unavailable("writes disabled".to_string()));
        }

        // Unknown ids match no rows, which is not an error for an UPDATE.
        let mut users = self.users.write().await;
        for user in users.iter_mut().filter(|u| u.id == user_id) {
            user.last_login = Some(timestamp.to_string());
        }
        drop(users);

        self.last_login_updates
            .write()
            .await
            .push((user_id.to_string(), timestamp.to_string()));
        Ok(())
    }

    async fn ping(&self) -> Result<(), IdentityStoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(IdentityStoreError::Unavailable("reads disabled".to_string()));
        }
        Ok(())
    }
}
