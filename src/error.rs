// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::blockchain::RpcError;
use crate::names::NameError;

pub const INVALID_NAME: &str = "INVALID_NAME";
pub const INVALID_WALLET_ADDRESS: &str = "INVALID_WALLET_ADDRESS";
pub const ALREADY_RESERVED: &str = "ALREADY_RESERVED";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const RPC_UNAVAILABLE: &str = "RPC_UNAVAILABLE";
pub const RPC_NOT_CONFIGURED: &str = "RPC_NOT_CONFIGURED";
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

/// API failure: an HTTP status plus a stable, machine-readable code.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
}

#[derive(Serialize)]
struct ErrorBody {
    ok: bool,
    error: &'static str,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str) -> Self {
        Self { status, code }
    }

    pub fn bad_request(code: &'static str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code)
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, NOT_FOUND)
    }

    pub fn conflict(code: &'static str) -> Self {
        Self::new(StatusCode::CONFLICT, code)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
    }
}

impl From<NameError> for ApiError {
    fn from(e: NameError) -> Self {
        match e {
            NameError::InvalidName(_) => Self::bad_request(INVALID_NAME),
            NameError::InvalidWalletAddress(_) => Self::bad_request(INVALID_WALLET_ADDRESS),
            NameError::AlreadyReserved(_) => Self::conflict(ALREADY_RESERVED),
            NameError::Storage(message) => {
                tracing::error!(error = %message, "Name store failure");
                Self::internal()
            }
        }
    }
}

impl From<RpcError> for ApiError {
    fn from(e: RpcError) -> Self {
        tracing::warn!(
            error = %e,
            failed_attempts = e.attempts().len(),
            "Upstream RPC call failed"
        );
        Self::new(StatusCode::BAD_GATEWAY, RPC_UNAVAILABLE)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            ok: false,
            error: self.code,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    use crate::names::RepName;

    #[test]
    fn constructors_set_status_and_code() {
        let nf = ApiError::not_found();
        assert_eq!(nf.status, StatusCode::NOT_FOUND);
        assert_eq!(nf.code, NOT_FOUND);

        let bad = ApiError::bad_request(INVALID_NAME);
        assert_eq!(bad.status, StatusCode::BAD_REQUEST);
        assert_eq!(bad.code, INVALID_NAME);

        let conflict = ApiError::conflict(ALREADY_RESERVED);
        assert_eq!(conflict.status, StatusCode::CONFLICT);
    }

    #[test]
    fn name_errors_map_to_distinct_statuses() {
        let cases = [
            (NameError::InvalidName("-x".into()), StatusCode::BAD_REQUEST, INVALID_NAME),
            (
                NameError::InvalidWalletAddress("0x1".into()),
                StatusCode::BAD_REQUEST,
                INVALID_WALLET_ADDRESS,
            ),
            (
                NameError::AlreadyReserved(RepName::parse("alice").unwrap()),
                StatusCode::CONFLICT,
                ALREADY_RESERVED,
            ),
            (
                NameError::Storage("disk".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR,
            ),
        ];

        for (err, status, code) in cases {
            let api = ApiError::from(err);
            assert_eq!(api.status, status);
            assert_eq!(api.code, code);
        }
    }

    #[test]
    fn rpc_errors_are_a_single_gateway_failure() {
        let api = ApiError::from(RpcError::Exhausted { attempts: vec![] });
        assert_eq!(api.status, StatusCode::BAD_GATEWAY);
        assert_eq!(api.code, RPC_UNAVAILABLE);
    }

    #[tokio::test]
    async fn into_response_returns_json_body() {
        let response = ApiError::bad_request(INVALID_NAME).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"ok":false,"error":"INVALID_NAME"}"#);
    }
}
