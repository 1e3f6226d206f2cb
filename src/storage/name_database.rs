// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded name database backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `reserved_names`: canonical name → serialized ReservedName
//! - `owner_names`: composite key (owner|name) → name
//!
//! redb serializes write transactions, so the existence check and the insert
//! in [`NameDatabase::reserve`] form one critical section across threads.

use std::path::Path;

use redb::{
    Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition,
};

use crate::models::WalletAddress;
use crate::names::{NameError, NameStore, RepName, ReservedName};

// =============================================================================
// Table Definitions
// =============================================================================

/// Primary table: canonical name → serialized ReservedName (JSON bytes).
const RESERVED_NAMES: TableDefinition<&str, &[u8]> = TableDefinition::new("reserved_names");

/// Index: `owner|name` → name, for per-wallet listings.
const OWNER_NAMES: TableDefinition<&str, &str> = TableDefinition::new("owner_names");

// =============================================================================
// Error Type
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum NameDbError {
    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type NameDbResult<T> = Result<T, NameDbError>;

impl From<NameDbError> for NameError {
    fn from(e: NameDbError) -> Self {
        NameError::Storage(e.to_string())
    }
}

// =============================================================================
// Index Key Helpers
// =============================================================================

/// Format: `owner | name`. Both halves are already canonical.
fn make_owner_key(owner: &WalletAddress, name: &RepName) -> String {
    format!("{owner}|{name}")
}

/// `'}'` sorts directly after `'|'`, bounding every key of one owner.
fn owner_range(owner: &WalletAddress) -> (String, String) {
    (format!("{owner}|"), format!("{owner}}}"))
}

// =============================================================================
// NameDatabase
// =============================================================================

/// Persistent, soulbound name store.
pub struct NameDatabase {
    db: Database,
}

impl NameDatabase {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> NameDbResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let db = Database::create(path)?;

        // Pre-create all tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(RESERVED_NAMES)?;
            let _ = write_txn.open_table(OWNER_NAMES)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Look up a reservation by canonical name.
    pub fn get_reservation(&self, name: &RepName) -> NameDbResult<Option<ReservedName>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(RESERVED_NAMES)?;
        match table.get(name.as_str())? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Insert `record` if its name is free.
    ///
    /// Returns `false` (and commits nothing) when the name is taken.
    pub fn reserve(&self, record: &ReservedName) -> NameDbResult<bool> {
        let json = serde_json::to_vec(record)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut names = write_txn.open_table(RESERVED_NAMES)?;
            if names.get(record.name.as_str())?.is_some() {
                drop(names);
                write_txn.abort()?;
                return Ok(false);
            }
            names.insert(record.name.as_str(), json.as_slice())?;

            if let Some(owner) = &record.owner {
                let mut index = write_txn.open_table(OWNER_NAMES)?;
                let key = make_owner_key(owner, &record.name);
                index.insert(key.as_str(), record.name.as_str())?;
            }
        }
        write_txn.commit()?;
        Ok(true)
    }

    /// Names bound to `owner`, in key order.
    pub fn names_by_owner(&self, owner: &WalletAddress) -> NameDbResult<Vec<String>> {
        let read_txn = self.db.begin_read()?;
        let index = read_txn.open_table(OWNER_NAMES)?;
        let (start, end) = owner_range(owner);

        let mut names = Vec::new();
        for entry in index.range(start.as_str()..end.as_str())? {
            let (_, name) = entry?;
            names.push(name.value().to_string());
        }
        Ok(names)
    }

    /// Number of reserved names.
    pub fn count(&self) -> NameDbResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(RESERVED_NAMES)?;
        Ok(table.len()?)
    }
}

impl NameStore for NameDatabase {
    fn contains(&self, name: &RepName) -> Result<bool, NameError> {
        Ok(self.get_reservation(name)?.is_some())
    }

    fn get(&self, name: &RepName) -> Result<Option<ReservedName>, NameError> {
        Ok(self.get_reservation(name)?)
    }

    fn insert_if_absent(&self, record: ReservedName) -> Result<(), NameError> {
        if self.reserve(&record)? {
            Ok(())
        } else {
            Err(NameError::AlreadyReserved(record.name))
        }
    }

    fn list_by_owner(&self, owner: &WalletAddress) -> Result<Vec<RepName>, NameError> {
        self.names_by_owner(owner)?
            .iter()
            .map(|raw| RepName::parse(raw))
            .collect()
    }

    fn len(&self) -> Result<usize, NameError> {
        let count = self.count()?;
        usize::try_from(count).map_err(|e| NameError::Storage(e.to_string()))
    }

    fn is_persistent(&self) -> bool {
        true
    }
}
