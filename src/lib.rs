// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! CBDC Identity - user lookup and role authorization
//!
//! This crate resolves platform users against the remote identity store and
//! gates access with the central bank / commercial bank / user hierarchy.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Authentication, roles and session state
//! - `identity` - Identity store clients (Supabase REST, in-memory)
//! - `storage` - Local JSON cache

pub mod api;
pub mod auth;
pub mod config;
pub mod identity;
pub mod models;
pub mod state;
pub mod storage;
