// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JSON-RPC envelope and endpoint configuration.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

/// JSON-RPC protocol version sent on every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// Fixed request id. Callers needing correlation must wrap the client.
pub const REQUEST_ID: u64 = 1;

/// Default per-attempt timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(4000);

/// Default number of retries per endpoint (on top of the first attempt).
pub const DEFAULT_RETRIES: u32 = 2;

/// Default linear backoff step: retry `k` waits `k * step`.
pub const DEFAULT_BACKOFF_STEP: Duration = Duration::from_millis(300);

/// Outgoing JSON-RPC 2.0 request body.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: &'a Value,
}

impl<'a> JsonRpcRequest<'a> {
    pub fn new(method: &'a str, params: &'a Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id: REQUEST_ID,
            method,
            params,
        }
    }
}

/// Endpoint list and retry policy for [`super::RpcClient`].
///
/// Without a deadline, a call can take up to
/// `endpoints * (retries + 1) * timeout` plus
/// `endpoints * backoff_step * retries * (retries + 1) / 2` of backoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcConfig {
    /// Always tried first.
    pub primary_url: String,
    /// Tried after the primary's retry budget is spent.
    pub secondary_url: Option<String>,
    /// Per-attempt timeout.
    pub timeout: Duration,
    /// Retries per endpoint after the first attempt.
    pub retries: u32,
    pub backoff_step: Duration,
    /// Optional bound on the whole call across endpoints and retries.
    pub deadline: Option<Duration>,
}

impl RpcConfig {
    pub fn new(primary_url: impl Into<String>) -> Self {
        Self {
            primary_url: primary_url.into(),
            secondary_url: None,
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
            backoff_step: DEFAULT_BACKOFF_STEP,
            deadline: None,
        }
    }

    /// Set the secondary endpoint. Blank values mean "no secondary".
    pub fn with_secondary(mut self, url: Option<impl Into<String>>) -> Self {
        self.secondary_url = url.map(Into::into).filter(|u: &String| !u.trim().is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_backoff_step(mut self, step: Duration) -> Self {
        self.backoff_step = step;
        self
    }

    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Endpoints in the order they are tried.
    pub fn endpoints(&self) -> Vec<&str> {
        std::iter::once(self.primary_url.as_str())
            .chain(self.secondary_url.as_deref())
            .collect()
    }
}
