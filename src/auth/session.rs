// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Client-side session state.
//!
//! `AuthState` is the contract handed to session management: created at
//! sign-in, counted down over time, cleared at sign-out or timeout. No tokens
//! are issued here.

use std::time::Duration;

use super::user::User;

/// Default session length (30 minutes).
pub const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub is_authenticated: bool,
    pub current_user: Option<User>,
    /// Seconds until the session times out
    pub session_time_remaining: u64,
}

impl AuthState {
    /// Start a session for `user`.
    pub fn sign_in(user: User, timeout: Duration) -> Self {
        Self {
            is_authenticated: true,
            current_user: Some(user),
            session_time_remaining: timeout.as_secs(),
        }
    }

    /// Count the session down by `elapsed`.
    ///
    /// Returns `false` once the session has run out; the state is then
    /// signed out.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        if !self.is_authenticated {
            return false;
        }

        self.session_time_remaining = self.session_time_remaining.saturating_sub(elapsed.as_secs());
        if self.session_time_remaining == 0 {
            self.sign_out();
            return false;
        }
        true
    }

    pub fn sign_out(&mut self) {
        *self = Self::default();
    }

    pub fn is_expired(&self) -> bool {
        self.session_time_remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::UserRole;

    fn sample_user() -> User {
        User::new("teller", "Teller", "teller@bank.example", UserRole::CommercialBank, "h")
    }

    #[test]
    fn default_state_is_signed_out() {
        let state = AuthState::default();
        assert!(!state.is_authenticated);
        assert!(state.current_user.is_none());
        assert!(state.is_expired());
    }

    #[test]
    fn sign_in_starts_countdown() {
        let state = AuthState::sign_in(sample_user(), Duration::from_secs(600));
        assert!(state.is_authenticated);
        assert_eq!(state.session_time_remaining, 600);
        assert_eq!(state.current_user.unwrap().email, "teller@bank.example");
    }

    #[test]
    fn tick_decrements_then_times_out() {
        let mut state = AuthState::sign_in(sample_user(), Duration::from_secs(90));

        assert!(state.tick(Duration::from_secs(60)));
        assert_eq!(state.session_time_remaining, 30);

        assert!(!state.tick(Duration::from_secs(45)));
        assert!(!state.is_authenticated);
        assert!(state.current_user.is_none());
    }

    #[test]
    fn tick_on_signed_out_state_is_noop() {
        let mut state = AuthState::default();
        assert!(!state.tick(Duration::from_secs(1)));
        assert_eq!(state, AuthState::default());
    }

    #[test]
    fn sign_out_clears_user() {
        let mut state = AuthState::sign_in(sample_user(), DEFAULT_SESSION_TIMEOUT);
        state.sign_out();
        assert_eq!(state, AuthState::default());
    }
}
