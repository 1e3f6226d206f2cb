// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::{ApiError, RPC_NOT_CONFIGURED},
    models::BlockNumberResponse,
    state::AppState,
};

/// Latest block number, read through the failover RPC client.
#[utoipa::path(
    get,
    path = "/chain/block-number",
    tag = "Chain",
    responses(
        (status = 200, description = "Current block height", body = BlockNumberResponse),
        (status = 502, description = "RPC_UNAVAILABLE"),
        (status = 503, description = "RPC_NOT_CONFIGURED")
    )
)]
pub async fn block_number(
    State(state): State<AppState>,
) -> Result<Json<BlockNumberResponse>, ApiError> {
    let client = state
        .rpc
        .as_ref()
        .ok_or_else(|| ApiError::new(StatusCode::SERVICE_UNAVAILABLE, RPC_NOT_CONFIGURED))?;

    let block_number = client.block_number().await?;

    Ok(Json(BlockNumberResponse {
        ok: true,
        block_number,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::{routing::post, Router};
    use serde_json::{json, Value};
    use tokio::sync::oneshot;

    use crate::blockchain::{RpcClient, RpcConfig};

    async fn spawn_node(reply: Value) -> (String, oneshot::Sender<()>) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().route("/", post(move || async move { Json(reply) }));
        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = rx.await;
                })
                .await
                .unwrap();
        });
        (format!("http://{addr}/"), tx)
    }

    async fn closed_url() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}/")
    }

    fn client(primary: String) -> RpcClient {
        RpcClient::new(
            RpcConfig::new(primary)
                .with_retries(1)
                .with_timeout(Duration::from_millis(500))
                .with_backoff_step(Duration::from_millis(10)),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn not_configured_is_service_unavailable() {
        let err = block_number(State(AppState::default())).await.unwrap_err();
        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.code, "RPC_NOT_CONFIGURED");
    }

    #[tokio::test]
    async fn returns_decoded_height() {
        let (url, shutdown) = spawn_node(json!({"jsonrpc": "2.0", "id": 1, "result": "0x1b4"})).await;
        let state = AppState::default().with_rpc(client(url));

        let Json(body) = block_number(State(state)).await.unwrap();
        assert_eq!(
            body,
            BlockNumberResponse {
                ok: true,
                block_number: 436
            }
        );
        let _ = shutdown.send(());
    }

    #[tokio::test]
    async fn unreachable_endpoints_are_a_bad_gateway() {
        let state = AppState::default().with_rpc(client(closed_url().await));

        let err = block_number(State(state)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
        assert_eq!(err.code, "RPC_UNAVAILABLE");
    }
}
