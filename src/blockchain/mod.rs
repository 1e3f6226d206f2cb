// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Chain access over JSON-RPC.
//!
//! This module provides:
//! - The JSON-RPC 2.0 request envelope
//! - A client that retries each endpoint with linear backoff and fails over
//!   from the primary to the secondary endpoint

pub mod client;
pub mod types;

pub use client::{parse_quantity_result, AttemptFailure, RpcClient, RpcError, TransportError};
pub use types::*;
