// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Local Storage
//!
//! Process-local persistence under `DATA_DIR`. Nothing here is
//! authoritative: the identity store owns user records, and the cache only
//! mirrors the last fetched set for diagnostics and offline inspection.
//!
//! ## Storage Layout
//!
//! ```text
//! {DATA_DIR}/
//!   cache/
//!     users.json   # JSON array of the last fetched user records
//! ```

pub mod local_cache;
pub mod paths;

pub use local_cache::{LocalCache, StorageError, StorageResult, UserCache, USERS_CACHE_KEY};
pub use paths::StoragePaths;
