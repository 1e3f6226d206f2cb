// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Storage seam for reserved names.
//!
//! [`NameStore::insert_if_absent`] is the only mutating operation and must
//! perform its existence check and insert as one critical section.

use std::collections::HashMap;
use std::sync::RwLock;

use super::{NameError, RepName, ReservedName};
use crate::models::WalletAddress;

/// Backend holding the set of reserved names.
pub trait NameStore: Send + Sync {
    /// Whether `name` is already reserved.
    fn contains(&self, name: &RepName) -> Result<bool, NameError>;

    /// Fetch the record for `name`, if reserved.
    fn get(&self, name: &RepName) -> Result<Option<ReservedName>, NameError>;

    /// Insert `record` unless its name is present.
    ///
    /// Returns `NameError::AlreadyReserved` without mutating when the name is
    /// taken.
    fn insert_if_absent(&self, record: ReservedName) -> Result<(), NameError>;

    /// All names bound to `owner`, sorted.
    fn list_by_owner(&self, owner: &WalletAddress) -> Result<Vec<RepName>, NameError>;

    /// Number of reserved names.
    fn len(&self) -> Result<usize, NameError>;

    fn is_empty(&self) -> Result<bool, NameError> {
        Ok(self.len()? == 0)
    }

    /// Whether reservations survive a restart.
    fn is_persistent(&self) -> bool;
}

/// Process-local store used for development and tests.
///
/// Reservations made here answer with `RESERVED_MOCK`.
#[derive(Default)]
pub struct InMemoryNameStore {
    names: RwLock<HashMap<RepName, ReservedName>>,
}

impl InMemoryNameStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> NameError {
    NameError::Storage("in-memory name store lock poisoned".to_string())
}

impl NameStore for InMemoryNameStore {
    fn contains(&self, name: &RepName) -> Result<bool, NameError> {
        Ok(self.names.read().map_err(poisoned)?.contains_key(name))
    }

    fn get(&self, name: &RepName) -> Result<Option<ReservedName>, NameError> {
        Ok(self.names.read().map_err(poisoned)?.get(name).cloned())
    }

    fn insert_if_absent(&self, record: ReservedName) -> Result<(), NameError> {
        let mut names = self.names.write().map_err(poisoned)?;

        if names.contains_key(&record.name) {
            return Err(NameError::AlreadyReserved(record.name));
        }

        names.insert(record.name.clone(), record);
        Ok(())
    }

    fn list_by_owner(&self, owner: &WalletAddress) -> Result<Vec<RepName>, NameError> {
        let names = self.names.read().map_err(poisoned)?;
        let mut owned: Vec<RepName> = names
            .values()
            .filter(|record| record.owner.as_ref() == Some(owner))
            .map(|record| record.name.clone())
            .collect();
        owned.sort();
        Ok(owned)
    }

    fn len(&self) -> Result<usize, NameError> {
        Ok(self.names.read().map_err(poisoned)?.len())
    }

    fn is_persistent(&self) -> bool {
        false
    }
}
