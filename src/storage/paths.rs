// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Path layout for local storage.

use std::path::{Path, PathBuf};

/// Default base directory for local data.
pub const DATA_ROOT: &str = "./data";

/// Storage path utilities.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self::new(DATA_ROOT)
    }
}

impl StoragePaths {
    /// Create a new StoragePaths with a custom root (useful for testing).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory containing cache entries.
    pub fn cache_dir(&self) -> PathBuf {
        self.root.join("cache")
    }

    /// Path to the cache entry stored under `key`.
    pub fn cache_entry(&self, key: &str) -> PathBuf {
        self.cache_dir().join(format!("{key}.json"))
    }
}
