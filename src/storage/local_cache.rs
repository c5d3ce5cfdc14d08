// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! File-backed JSON key/value cache.
//!
//! Each key maps to one file under `{root}/cache/`. Writes replace the whole
//! entry atomically (temp file + rename), so readers never observe a partial
//! value. Every write gets its own temp file: concurrent writers to the same
//! key race only on the rename, and the last rename wins.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;
use uuid::Uuid;

use super::StoragePaths;
use crate::auth::User;

/// Cache key holding the last fetched user set.
pub const USERS_CACHE_KEY: &str = "users";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid cache key: {0:?}")]
    InvalidKey(String),

    #[error("Storage not initialized")]
    NotInitialized,
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Local JSON key/value store.
#[derive(Debug, Clone)]
pub struct LocalCache {
    paths: StoragePaths,
    initialized: bool,
}

impl LocalCache {
    /// Does NOT create the directory structure. Call `initialize()` first.
    pub fn new(paths: StoragePaths) -> Self {
        Self {
            paths,
            initialized: false,
        }
    }

    pub fn paths(&self) -> &StoragePaths {
        &self.paths
    }

    /// Create the cache directory. Idempotent.
    pub fn initialize(&mut self) -> StorageResult<()> {
        fs::create_dir_all(self.paths.cache_dir())?;
        self.initialized = true;
        Ok(())
    }

    /// Write-read-delete probe of the cache directory.
    pub fn health_check(&self) -> StorageResult<()> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }

        let probe = self.paths.cache_dir().join(".health_check");
        fs::write(&probe, b"ok")?;
        let read_back = fs::read(&probe)?;
        fs::remove_file(&probe)?;

        if read_back != b"ok" {
            return Err(StorageError::Io(io::Error::other("health check data mismatch")));
        }
        Ok(())
    }

    /// Overwrite the entry stored under `key`.
    pub fn put<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StorageResult<()> {
        let path = self.entry_path(key)?;

        let temp_path = path.with_extension(format!("{}.tmp", Uuid::new_v4().simple()));
        let result = write_json(&temp_path, value)
            .and_then(|()| fs::rename(&temp_path, &path).map_err(StorageError::from));
        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        result
    }

    /// Read the entry stored under `key`, `None` if absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        let path = self.entry_path(key)?;
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let value = serde_json::from_reader(BufReader::new(file))?;
        Ok(Some(value))
    }

    /// Delete the entry stored under `key`. Missing entries are not an error.
    pub fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.entry_path(key)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn entry_path(&self, key: &str) -> StorageResult<std::path::PathBuf> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }
        validate_key(key)?;
        Ok(self.paths.cache_entry(key))
    }
}

fn write_json<T: Serialize + ?Sized>(path: &std::path::Path, value: &T) -> StorageResult<()> {
    let file = File::create_new(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

/// Keys become file names: restrict them to `[A-Za-z0-9_-]`.
fn validate_key(key: &str) -> StorageResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

/// Snapshot of the last fetched user set, stored under [`USERS_CACHE_KEY`].
///
/// Informational only: authentication never reads from it.
#[derive(Debug, Clone)]
pub struct UserCache {
    cache: LocalCache,
}

impl UserCache {
    pub fn new(cache: LocalCache) -> Self {
        Self { cache }
    }

    pub fn local_cache(&self) -> &LocalCache {
        &self.cache
    }

    /// Replace the cached set with `users`.
    pub fn store(&self, users: &[User]) -> StorageResult<()> {
        self.cache.put(USERS_CACHE_KEY, users)
    }

    /// Store `users`, logging instead of failing.
    pub fn store_best_effort(&self, users: &[User]) {
        if let Err(e) = self.store(users) {
            warn!(error = %e, key = USERS_CACHE_KEY, "Failed to populate user cache");
        }
    }

    pub fn load(&self) -> StorageResult<Option<Vec<User>>> {
        self.cache.get(USERS_CACHE_KEY)
    }

    pub fn clear(&self) -> StorageResult<()> {
        self.cache.remove(USERS_CACHE_KEY)
    }
}
