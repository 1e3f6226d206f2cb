// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum_server::{tls_rustls::RustlsConfig, Handle};
use tokio_util::sync::CancellationToken;

use rep_name_service::{
    api::router,
    blockchain::RpcClient,
    config::AppConfig,
    names::{InMemoryNameStore, NameStore},
    state::AppState,
    storage::{NameDatabase, StoragePaths},
    telemetry,
};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };
    telemetry::init(config.log_format);

    if let Err(message) = run(config).await {
        tracing::error!(error = %message, "Server stopped with an error");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> Result<(), String> {
    let store: Arc<dyn NameStore> = match &config.data_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .map_err(|e| format!("cannot create {}: {e}", dir.display()))?;
            let path = StoragePaths::new(dir).names_db();
            let db = NameDatabase::open(&path)
                .map_err(|e| format!("cannot open {}: {e}", path.display()))?;
            tracing::info!(path = %path.display(), "Persisting names");
            Arc::new(db)
        }
        None => {
            tracing::warn!("DATA_DIR not set, names are kept in memory only");
            Arc::new(InMemoryNameStore::new())
        }
    };

    let mut state = AppState::new(store);
    if let Some(rpc) = config.rpc.clone() {
        let client = RpcClient::new(rpc).map_err(|e| e.to_string())?;
        tracing::info!(endpoints = client.endpoints().len(), "RPC client configured");
        state = state.with_rpc(client);
    }

    let app = router(state);

    let shutdown = CancellationToken::new();
    let handle = Handle::<SocketAddr>::new();
    tokio::spawn(watch_shutdown(shutdown.clone(), handle.clone()));

    let addr = config.bind_addr;
    match &config.tls {
        Some(tls) => {
            // Install the ring crypto provider before any TLS operations
            let _ = rustls::crypto::ring::default_provider().install_default();
            let tls_config = RustlsConfig::from_pem_file(&tls.cert, &tls.key)
                .await
                .map_err(|e| format!("cannot load TLS credentials: {e}"))?;

            tracing::info!(%addr, "Rep name service listening on https (docs at /docs)");
            axum_server::bind_rustls(addr, tls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .map_err(|e| format!("HTTPS server failed: {e}"))?;
        }
        None => {
            tracing::info!(%addr, "Rep name service listening on http (docs at /docs)");
            axum_server::bind(addr)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .map_err(|e| format!("HTTP server failed: {e}"))?;
        }
    }

    shutdown.cancel();
    tracing::info!("Server stopped");
    Ok(())
}

/// Trigger a graceful shutdown on Ctrl-C.
async fn watch_shutdown(token: CancellationToken, handle: Handle<SocketAddr>) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Failed to listen for Ctrl-C");
                return;
            }
            tracing::info!("Shutdown signal received");
            handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
        }
        _ = token.cancelled() => {}
    }
}
