// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Failover JSON-RPC client for the chain backing `.rep` names.
//!
//! ## Retry Policy
//!
//! Endpoints are tried in order (primary, then secondary). Each endpoint gets
//! one attempt plus `retries` retries; retry `k` is preceded by a sleep of
//! `k * backoff_step`. After the last retry of an endpoint the next endpoint
//! is tried immediately.
//!
//! Only transport failures are retried: non-2xx statuses, timeouts, connection
//! errors and non-JSON bodies. A JSON-RPC `error` object inside a 2xx body is
//! returned to the caller untouched.

use std::time::Duration;

use serde_json::{json, Value};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use url::Url;

use super::types::{JsonRpcRequest, RpcConfig};

/// JSON-RPC client with per-endpoint retries and endpoint failover.
#[derive(Debug, Clone)]
pub struct RpcClient {
    endpoints: Vec<Url>,
    timeout: Duration,
    retries: u32,
    backoff_step: Duration,
    deadline: Option<Duration>,
    http: reqwest::Client,
}

impl RpcClient {
    /// Build a client from its configuration.
    pub fn new(config: RpcConfig) -> Result<Self, RpcError> {
        let endpoints = config
            .endpoints()
            .into_iter()
            .map(|raw| {
                raw.trim()
                    .parse::<Url>()
                    .map_err(|e| RpcError::InvalidEndpoint(format!("{raw}: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| RpcError::Client(e.to_string()))?;

        Ok(Self {
            endpoints,
            timeout: config.timeout,
            retries: config.retries,
            backoff_step: config.backoff_step,
            deadline: config.deadline,
            http,
        })
    }

    /// Endpoints in the order they are tried.
    pub fn endpoints(&self) -> &[Url] {
        &self.endpoints
    }

    /// Send `method` with `params` and return the first successful JSON body.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        self.call_with_cancel(method, params, &CancellationToken::new())
            .await
    }

    /// Like [`RpcClient::call`], but stops as soon as `cancel` fires.
    ///
    /// Cancellation is observed during attempts, backoff sleeps and endpoint
    /// switches.
    pub async fn call_with_cancel(
        &self,
        method: &str,
        params: Value,
        cancel: &CancellationToken,
    ) -> Result<Value, RpcError> {
        let request = JsonRpcRequest::new(method, &params);
        let deadline = self.deadline.map(|d| Instant::now() + d);
        let mut attempts: Vec<AttemptFailure> = Vec::new();

        for (endpoint_index, url) in self.endpoints.iter().enumerate() {
            if cancel.is_cancelled() {
                return Err(RpcError::Cancelled);
            }

            for attempt in 0..=self.retries {
                if attempt > 0 {
                    let wake = Instant::now() + self.backoff_step * attempt;
                    if deadline.is_some_and(|d| wake >= d) {
                        return Err(RpcError::DeadlineExceeded { attempts });
                    }
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => return Err(RpcError::Cancelled),
                        _ = tokio::time::sleep_until(wake) => {}
                    }
                }

                let timeout = match deadline {
                    Some(d) => {
                        let remaining = d.saturating_duration_since(Instant::now());
                        if remaining.is_zero() {
                            return Err(RpcError::DeadlineExceeded { attempts });
                        }
                        self.timeout.min(remaining)
                    }
                    None => self.timeout,
                };
                // A timeout on a clamped attempt is the deadline firing.
                let clamped = timeout < self.timeout;

                let outcome = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Err(RpcError::Cancelled),
                    outcome = self.attempt(url, &request, timeout) => outcome,
                };

                match outcome {
                    Ok(body) => {
                        if !attempts.is_empty() {
                            tracing::debug!(
                                method,
                                endpoint = endpoint_index,
                                failed_attempts = attempts.len(),
                                "RPC call recovered"
                            );
                        }
                        return Ok(body);
                    }
                    Err(error) => {
                        tracing::warn!(
                            method,
                            endpoint = endpoint_index,
                            attempt,
                            error = %error,
                            "RPC attempt failed"
                        );
                        let deadline_hit = (clamped && error == TransportError::Timeout)
                            || deadline.is_some_and(|d| Instant::now() >= d);
                        attempts.push(AttemptFailure {
                            endpoint: url.to_string(),
                            endpoint_index,
                            attempt,
                            error,
                        });
                        if deadline_hit {
                            return Err(RpcError::DeadlineExceeded { attempts });
                        }
                    }
                }
            }
        }

        Err(RpcError::Exhausted { attempts })
    }

    /// Current block height via `eth_blockNumber`.
    pub async fn block_number(&self) -> Result<u64, RpcError> {
        let body = self.call("eth_blockNumber", json!([])).await?;
        parse_quantity_result(&body)
    }

    /// One POST against one endpoint.
    async fn attempt(
        &self,
        url: &Url,
        request: &JsonRpcRequest<'_>,
        timeout: Duration,
    ) -> Result<Value, TransportError> {
        let response = self
            .http
            .post(url.clone())
            .timeout(timeout)
            .json(request)
            .send()
            .await
            .map_err(TransportError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        response.json::<Value>().await.map_err(TransportError::from)
    }
}

/// Read a hex quantity (`"0x1b4"`) from a JSON-RPC response body.
pub fn parse_quantity_result(body: &Value) -> Result<u64, RpcError> {
    if let Some(error) = body.get("error") {
        return Err(RpcError::InvalidResponse(format!("node returned error: {error}")));
    }

    let raw = body
        .get("result")
        .and_then(Value::as_str)
        .ok_or_else(|| RpcError::InvalidResponse("missing string result".to_string()))?;

    let digits = raw
        .strip_prefix("0x")
        .ok_or_else(|| RpcError::InvalidResponse(format!("quantity {raw:?} lacks 0x prefix")))?;

    u64::from_str_radix(digits, 16)
        .map_err(|e| RpcError::InvalidResponse(format!("quantity {raw:?}: {e}")))
}

/// Why a single attempt failed. Always retryable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP status {0}")]
    Status(u16),

    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Connect(String),

    #[error("response body is not JSON: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else if e.is_decode() {
            TransportError::Decode(e.to_string())
        } else {
            TransportError::Connect(e.to_string())
        }
    }
}

/// Record of one failed attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptFailure {
    pub endpoint: String,
    /// 0 for the primary, 1 for the secondary.
    pub endpoint_index: usize,
    /// 0 for the first attempt, `k` for retry `k`.
    pub attempt: u32,
    pub error: TransportError,
}

/// Errors that can occur during RPC calls.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("Invalid RPC endpoint URL: {0}")]
    InvalidEndpoint(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    /// Every endpoint spent its retry budget. The message names no endpoint;
    /// `attempts` carries the per-attempt causes.
    #[error("All RPC endpoints exhausted after {} attempts", .attempts.len())]
    Exhausted { attempts: Vec<AttemptFailure> },

    #[error("RPC deadline exceeded after {} attempts", .attempts.len())]
    DeadlineExceeded { attempts: Vec<AttemptFailure> },

    #[error("RPC call cancelled")]
    Cancelled,

    #[error("Invalid RPC response: {0}")]
    InvalidResponse(String),
}

impl RpcError {
    /// Failed attempts recorded before the call gave up.
    pub fn attempts(&self) -> &[AttemptFailure] {
        match self {
            RpcError::Exhausted { attempts } | RpcError::DeadlineExceeded { attempts } => attempts,
            _ => &[],
        }
    }
}
