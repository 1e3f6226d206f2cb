// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Name Reservation
//!
//! Soulbound `.rep` names. A name is canonicalized (trimmed and lowercased),
//! validated against the naming rules, and reserved at most once. There is no
//! release or transfer: once reserved, a name stays bound to its wallet.
//!
//! ## Naming Rules
//!
//! - 3 to 30 characters after canonicalization
//! - optional single leading `.`
//! - alphanumeric start and end, `-`/`_` allowed only in the middle
//!
//! ## Modules
//!
//! - `registry` - availability checks and atomic reservation
//! - `store` - the [`NameStore`] seam and its in-memory implementation

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::WalletAddress;

pub mod registry;
pub mod store;

pub use registry::{Availability, NameRegistry, Reservation, ReservationStatus};
pub use store::{InMemoryNameStore, NameStore};

/// Shortest canonical name accepted.
pub const MIN_NAME_LEN: usize = 3;

/// Longest canonical name accepted.
pub const MAX_NAME_LEN: usize = 30;

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[.]?[a-z0-9]+(?:[-_a-z0-9]*[a-z0-9])?$").expect("name pattern is valid")
});

/// Trim surrounding whitespace and lowercase.
pub fn canonicalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// A validated, canonical reservation key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct RepName(String);

impl RepName {
    /// Canonicalize `raw` and validate it.
    pub fn parse(raw: &str) -> Result<Self, NameError> {
        let name = canonicalize(raw);

        if name.is_empty() {
            return Err(NameError::InvalidName(name));
        }

        // Length is counted in characters; the pattern only admits ASCII anyway.
        let len = name.chars().count();
        if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
            return Err(NameError::InvalidName(name));
        }

        if !NAME_PATTERN.is_match(&name) {
            return Err(NameError::InvalidName(name));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RepName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RepName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RepName> for String {
    fn from(value: RepName) -> Self {
        value.0
    }
}

/// A reserved name as kept by a [`NameStore`].
///
/// The in-memory store leaves `owner` empty when the caller supplied no
/// wallet; the persisted store always records one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReservedName {
    /// Canonical name (uniqueness key).
    #[schema(value_type = String)]
    pub name: RepName,
    /// Wallet the name is bound to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<WalletAddress>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReservedName {
    pub fn new(name: RepName, owner: Option<WalletAddress>) -> Self {
        let now = Utc::now();
        Self {
            name,
            owner,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Errors raised by name validation and reservation.
#[derive(Debug, thiserror::Error)]
pub enum NameError {
    #[error("invalid name: {0:?}")]
    InvalidName(String),

    #[error("invalid wallet address: {0:?}")]
    InvalidWalletAddress(String),

    #[error("name already reserved: {0}")]
    AlreadyReserved(RepName),

    #[error("name store failure: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalize_trims_and_lowercases() {
        assert_eq!(canonicalize("  Alice\t"), "alice");
        assert_eq!(canonicalize("BOB.rep"), "bob.rep");
        assert_eq!(canonicalize(""), "");
    }

    #[test]
    fn accepts_well_formed_names() {
        for raw in ["abc", "Alice", ".abc", "a-b", "a_b", "node-01", "x1_y2-z3", "  Spaced  "] {
            assert!(RepName::parse(raw).is_ok(), "expected {raw:?} to be valid");
        }
    }

    #[test]
    fn rejects_bad_lengths() {
        assert!(matches!(RepName::parse("ab"), Err(NameError::InvalidName(_))));
        assert!(matches!(RepName::parse("   "), Err(NameError::InvalidName(_))));
        assert!(matches!(RepName::parse(""), Err(NameError::InvalidName(_))));

        let thirty = "a".repeat(30);
        assert!(RepName::parse(&thirty).is_ok());

        let thirty_one = "a".repeat(31);
        assert!(matches!(
            RepName::parse(&thirty_one),
            Err(NameError::InvalidName(_))
        ));

        // Padding whitespace does not count towards the length.
        assert!(RepName::parse(&format!("   {thirty}   ")).is_ok());
    }

    #[test]
    fn rejects_bad_separators() {
        for raw in ["-abc", "abc-", "_abc", "abc_", "..abc", "ab.c", "a b c", "ab!c", "é-abc"] {
            assert!(
                matches!(RepName::parse(raw), Err(NameError::InvalidName(_))),
                "expected {raw:?} to be rejected"
            );
        }
    }

    #[test]
    fn dot_prefix_counts_towards_length() {
        assert_eq!(RepName::parse(".ab").unwrap().as_str(), ".ab");
        assert!(matches!(RepName::parse(".a"), Err(NameError::InvalidName(_))));
    }

    #[test]
    fn canonical_form_is_idempotent() {
        for raw in ["Alice", " .Node-01 ", "x_Y_z"] {
            let once = RepName::parse(raw).unwrap();
            let twice = RepName::parse(once.as_str()).unwrap();
            assert_eq!(once, twice);
            assert_eq!(canonicalize(once.as_str()), once.as_str());
        }
    }

    #[test]
    fn deserialization_validates() {
        let ok: RepName = serde_json::from_str("\"Alice\"").unwrap();
        assert_eq!(ok.as_str(), "alice");

        assert!(serde_json::from_str::<RepName>("\"-x\"").is_err());
    }
}
