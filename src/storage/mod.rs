// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Persistent Storage
//!
//! Reserved names are kept in an embedded redb database when a data directory
//! is configured. Without one, the service falls back to
//! [`crate::names::InMemoryNameStore`] and answers `RESERVED_MOCK`.
//!
//! ## Storage Layout
//!
//! ```text
//! {DATA_DIR}/
//!   names.redb        # reserved_names + owner_names tables
//! ```

pub mod name_database;
pub mod paths;

pub use name_database::{NameDatabase, NameDbError, NameDbResult};
pub use paths::StoragePaths;
