// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Identity Store
//!
//! The remote, authoritative record-keeper for platform users. This crate
//! consumes two operations from it:
//!
//! - read the whole `Users` collection (no filter)
//! - set `last_login` on one user, keyed by `id`
//!
//! `RestIdentityStore` talks to the hosted store (Supabase/PostgREST).
//! `InMemoryIdentityStore` backs local development and tests.

pub mod memory;
pub mod rest;

use async_trait::async_trait;

use crate::auth::User;

pub use memory::InMemoryIdentityStore;
pub use rest::{RestIdentityStore, RestStoreConfig};

#[derive(Debug, Clone, thiserror::Error)]
pub enum IdentityStoreError {
    #[error("identity store request failed: {0}")]
    Request(String),

    #[error("identity store returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("identity store response was invalid: {0}")]
    InvalidResponse(String),

    #[error("identity store unavailable: {0}")]
    Unavailable(String),
}

/// Operations consumed from the identity store.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Fetch every user record, in store order.
    async fn fetch_users(&self) -> Result<Vec<User>, IdentityStoreError>;

    /// Set `last_login` on the user with the given id.
    async fn update_last_login(&self, user_id: &str, timestamp: &str)
        -> Result<(), IdentityStoreError>;

    /// Cheap reachability probe used by readiness checks.
    async fn ping(&self) -> Result<(), IdentityStoreError>;
}
