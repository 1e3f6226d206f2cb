// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{routing::get, routing::post, Router};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{
        BlockNumberResponse, CheckNameResponse, HealthResponse, NameRecordResponse,
        OwnerNamesResponse, ReserveNameRequest, ReserveNameResponse, WalletAddress,
    },
    names::ReservationStatus,
    state::AppState,
};

pub mod chain;
pub mod health;
pub mod names;

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/healthz", get(health::healthz))
        .route("/rep/check", get(names::check_name))
        .route("/rep/reserve", post(names::reserve_name))
        .route("/rep/name/{name}", get(names::get_name))
        .route("/rep/owner/{address}", get(names::owner_names))
        .route("/chain/block-number", get(chain::block_number))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        names::check_name,
        names::reserve_name,
        names::get_name,
        names::owner_names,
        chain::block_number
    ),
    components(
        schemas(
            WalletAddress,
            ReservationStatus,
            CheckNameResponse,
            ReserveNameRequest,
            ReserveNameResponse,
            NameRecordResponse,
            OwnerNamesResponse,
            BlockNumberResponse,
            HealthResponse
        )
    ),
    tags(
        (name = "Names", description = "Name availability and reservation"),
        (name = "Chain", description = "Reads through the failover JSON-RPC client"),
        (name = "Health", description = "Liveness")
    )
)]
struct ApiDoc;
