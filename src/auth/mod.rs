// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! User lookup and role-based authorization for the CBDC platform.
//!
//! ## Login Flow
//!
//! 1. Client sends `email` and `password` to `POST /v1/auth/login`
//! 2. `Authenticator` reads the full `Users` collection from the identity store
//! 3. The first record with a byte-identical `email` is the authenticated user
//! 4. `last_login` is updated in the background (failures are logged only)
//!
//! ## Authorization
//!
//! `has_permission` gates access with a fixed role table:
//! `central_bank` satisfies everything, `commercial_bank` everything except
//! `central_bank`, and `user` only `user`.

pub mod authenticator;
pub mod error;
pub mod roles;
pub mod session;
pub mod user;

pub use authenticator::{Authenticator, LastLoginUpdate, LoginOutcome};
pub use error::AuthError;
pub use roles::{has_permission, UserRole};
pub use session::{AuthState, DEFAULT_SESSION_TIMEOUT};
pub use user::{find_by_email, User, UserProfile};
