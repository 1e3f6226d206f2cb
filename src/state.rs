// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::blockchain::RpcClient;
use crate::names::{InMemoryNameStore, NameRegistry, NameStore};

#[derive(Clone)]
pub struct AppState {
    pub registry: NameRegistry,
    /// `None` when no RPC endpoint is configured.
    pub rpc: Option<Arc<RpcClient>>,
}

impl AppState {
    pub fn new(store: Arc<dyn NameStore>) -> Self {
        Self {
            registry: NameRegistry::new(store),
            rpc: None,
        }
    }

    pub fn with_rpc(mut self, client: RpcClient) -> Self {
        self.rpc = Some(Arc::new(client));
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(InMemoryNameStore::new()))
    }
}
