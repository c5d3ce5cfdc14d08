// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{Authenticator, DEFAULT_SESSION_TIMEOUT};
use crate::identity::{IdentityStore, InMemoryIdentityStore};

#[derive(Clone)]
pub struct AppState {
    pub authenticator: Arc<Authenticator>,
    pub session_timeout: Duration,
}

impl AppState {
    pub fn new(authenticator: Authenticator) -> Self {
        Self {
            authenticator: Arc::new(authenticator),
            session_timeout: DEFAULT_SESSION_TIMEOUT,
        }
    }

    pub fn with_session_timeout(mut self, timeout: Duration) -> Self {
        self.session_timeout = timeout;
        self
    }

    pub fn identity_store(&self) -> &Arc<dyn IdentityStore> {
        self.authenticator.store()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Authenticator::new(Arc::new(InMemoryIdentityStore::default())))
    }
}
