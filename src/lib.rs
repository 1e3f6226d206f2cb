// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Rep Name Service - `.rep` name reservation API
//!
//! Validates and reserves soulbound `.rep` names, and reads chain state
//! through a JSON-RPC client that retries and fails over between endpoints.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `blockchain` - Failover JSON-RPC client
//! - `names` - Name validation and the reservation registry
//! - `storage` - redb-backed name persistence

pub mod api;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod models;
pub mod names;
pub mod state;
pub mod storage;
pub mod telemetry;
