// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response structures used by the REST API. All types derive
//! `ToSchema` for OpenAPI documentation. Field names on the wire are
//! camelCase, and every success body carries `ok: true` (error bodies are
//! produced by [`crate::error::ApiError`]).
//!
//! ## Wallet Address Type
//!
//! The [`WalletAddress`] newtype wraps Ethereum-style addresses (0x-prefixed,
//! 40 hex characters). [`WalletAddress::parse`] validates and lowercases, and
//! is the only constructor.
//!
//! ## Model Categories
//!
//! - **Names**: availability checks, reservations, lookups
//! - **Chain**: block height read through the JSON-RPC client
//! - **Health**: liveness

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::names::{NameError, ReservationStatus};

// =============================================================================
// Wallet Address Type
// =============================================================================

/// Ethereum-compatible wallet address wrapper.
///
/// Format: `0x` followed by 40 hexadecimal characters (20 bytes), stored
/// lowercased. The only way in is [`WalletAddress::parse`], which serde
/// deserialization also goes through.
///
/// # Example
///
/// ```rust,ignore
/// let addr = WalletAddress::parse("0x742d35Cc6634C0532925a3b844Bc9e7595f4aB12")?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Validate a `0x`-prefixed 20-byte hex address and lowercase it.
    pub fn parse(raw: &str) -> Result<Self, NameError> {
        let trimmed = raw.trim();
        let hex = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| NameError::InvalidWalletAddress(trimmed.to_string()))?;

        if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(NameError::InvalidWalletAddress(trimmed.to_string()));
        }

        Ok(Self(format!("0x{}", hex.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for WalletAddress {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<WalletAddress> for String {
    fn from(value: WalletAddress) -> Self {
        value.0
    }
}

// =============================================================================
// Name Models
// =============================================================================

/// Query for `GET /rep/check`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct CheckNameQuery {
    /// Candidate name, any casing, surrounding whitespace ignored.
    #[serde(default)]
    pub name: String,
}

/// Availability of a valid name.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct CheckNameResponse {
    pub ok: bool,
    /// Canonical (trimmed, lowercased) name.
    pub name: String,
    pub available: bool,
}

/// Request to reserve a name.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReserveNameRequest {
    /// Candidate name.
    #[serde(default)]
    pub name: String,
    /// Wallet the name is bound to. Required when names are persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
}

/// Successful reservation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ReserveNameResponse {
    pub ok: bool,
    /// Canonical name now reserved.
    pub name: String,
    /// `RESERVED` when persisted, `RESERVED_MOCK` when held in memory.
    pub status: ReservationStatus,
}

/// Stored reservation record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NameRecordResponse {
    pub ok: bool,
    pub name: String,
    /// Wallet the name is bound to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Names bound to one wallet.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct OwnerNamesResponse {
    pub ok: bool,
    pub owner: String,
    pub names: Vec<String>,
}

// =============================================================================
// Chain Models
// =============================================================================

/// Latest block height reported by the configured RPC endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BlockNumberResponse {
    pub ok: bool,
    pub block_number: u64,
}

// =============================================================================
// Health Models
// =============================================================================

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct HealthResponse {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_address_serde_validates() {
        let parsed: WalletAddress =
            serde_json::from_str("\"0xABCDEF0123456789abcdef0123456789ABCDEF01\"").unwrap();
        assert_eq!(parsed.as_str(), "0xabcdef0123456789abcdef0123456789abcdef01");
        assert_eq!(
            serde_json::to_string(&parsed).unwrap(),
            "\"0xabcdef0123456789abcdef0123456789abcdef01\""
        );

        assert!(serde_json::from_str::<WalletAddress>("\"abc\"").is_err());

        let to_string: String = parsed.into();
        assert!(to_string.starts_with("0x"));
    }

    #[test]
    fn wallet_address_parse_validates_and_lowercases() {
        let parsed = WalletAddress::parse(" 0x742d35Cc6634C0532925a3b844Bc9e7595f4aB12 ").unwrap();
        assert_eq!(parsed.as_str(), "0x742d35cc6634c0532925a3b844bc9e7595f4ab12");

        for bad in [
            "",
            "742d35Cc6634C0532925a3b844Bc9e7595f4aB12",
            "0x742d35",
            "0x742d35Cc6634C0532925a3b844Bc9e7595f4aB1Z",
            "0x742d35Cc6634C0532925a3b844Bc9e7595f4aB1234",
        ] {
            assert!(
                matches!(WalletAddress::parse(bad), Err(NameError::InvalidWalletAddress(_))),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn reserve_request_uses_camel_case() {
        let request: ReserveNameRequest =
            serde_json::from_str(r#"{"name":"alice","walletAddress":"0xabc"}"#).unwrap();
        assert_eq!(request.wallet_address.as_deref(), Some("0xabc"));

        let bare: ReserveNameRequest = serde_json::from_str(r#"{"name":"alice"}"#).unwrap();
        assert!(bare.wallet_address.is_none());
    }

    #[test]
    fn reservation_status_wire_format() {
        let body = serde_json::to_value(ReserveNameResponse {
            ok: true,
            name: "alice".into(),
            status: ReservationStatus::ReservedMock,
        })
        .unwrap();
        assert_eq!(body["status"], "RESERVED_MOCK");
        assert_eq!(
            serde_json::to_value(ReservationStatus::Reserved).unwrap(),
            "RESERVED"
        );
    }
}
