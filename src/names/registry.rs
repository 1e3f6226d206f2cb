// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Availability checks and reservation on top of a [`NameStore`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{NameError, NameStore, RepName, ReservedName};
use crate::models::WalletAddress;

/// Outcome reported to the client after a successful reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    /// Written to the persistent store.
    Reserved,
    /// Held in process memory only.
    ReservedMock,
}

/// Result of an availability check for a valid name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    pub name: RepName,
    pub available: bool,
}

/// Result of a successful reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub name: RepName,
    pub status: ReservationStatus,
}

/// Validates names and admits each canonical name at most once.
#[derive(Clone)]
pub struct NameRegistry {
    store: Arc<dyn NameStore>,
}

impl NameRegistry {
    pub fn new(store: Arc<dyn NameStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn NameStore> {
        &self.store
    }

    /// Validate `raw` and report whether its canonical form is free.
    pub fn check_availability(&self, raw: &str) -> Result<Availability, NameError> {
        let name = RepName::parse(raw)?;
        let available = !self.store.contains(&name)?;
        Ok(Availability { name, available })
    }

    /// Reserve `raw` for `owner`.
    ///
    /// A persistent store refuses reservations without a wallet, since
    /// names are bound to the reserving wallet for good.
    pub fn reserve(&self, raw: &str, owner: Option<&str>) -> Result<Reservation, NameError> {
        let name = RepName::parse(raw)?;

        let owner = match owner.map(str::trim).filter(|o| !o.is_empty()) {
            Some(raw_owner) => Some(WalletAddress::parse(raw_owner)?),
            None if self.store.is_persistent() => {
                return Err(NameError::InvalidWalletAddress(String::new()));
            }
            None => None,
        };

        self.store
            .insert_if_absent(ReservedName::new(name.clone(), owner.clone()))?;

        tracing::info!(
            name = %name,
            owner = owner.as_ref().map(|o| o.as_str()).unwrap_or("-"),
            persistent = self.store.is_persistent(),
            "Name reserved"
        );

        let status = if self.store.is_persistent() {
            ReservationStatus::Reserved
        } else {
            ReservationStatus::ReservedMock
        };

        Ok(Reservation { name, status })
    }

    /// Fetch the reservation record for `raw`.
    pub fn lookup(&self, raw: &str) -> Result<Option<ReservedName>, NameError> {
        let name = RepName::parse(raw)?;
        self.store.get(&name)
    }

    /// Names bound to a wallet.
    pub fn names_of(&self, raw_owner: &str) -> Result<Vec<RepName>, NameError> {
        let owner = WalletAddress::parse(raw_owner)?;
        self.store.list_by_owner(&owner)
    }
}
