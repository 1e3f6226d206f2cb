// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Name reservation endpoints.
//!
//! Reserved names are soulbound: there is no release or transfer endpoint.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};

use crate::{
    error::{ApiError, INVALID_NAME, INVALID_WALLET_ADDRESS},
    models::{
        CheckNameQuery, CheckNameResponse, NameRecordResponse, OwnerNamesResponse,
        ReserveNameRequest, ReserveNameResponse, WalletAddress,
    },
    state::AppState,
};

/// Check whether a name can still be reserved.
#[utoipa::path(
    get,
    path = "/rep/check",
    params(CheckNameQuery),
    tag = "Names",
    responses(
        (status = 200, description = "Name is valid", body = CheckNameResponse),
        (status = 400, description = "INVALID_NAME")
    )
)]
pub async fn check_name(
    State(state): State<AppState>,
    query: Result<Query<CheckNameQuery>, QueryRejection>,
) -> Result<Json<CheckNameResponse>, ApiError> {
    let Query(params) = query.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected check query");
        ApiError::bad_request(INVALID_NAME)
    })?;
    let availability = state.registry.check_availability(&params.name)?;
    Ok(Json(CheckNameResponse {
        ok: true,
        name: availability.name.into(),
        available: availability.available,
    }))
}

/// Reserve a name for a wallet.
///
/// A body that is not valid JSON is treated like a missing name.
#[utoipa::path(
    post,
    path = "/rep/reserve",
    request_body = ReserveNameRequest,
    tag = "Names",
    responses(
        (status = 200, description = "Name reserved", body = ReserveNameResponse),
        (status = 400, description = "INVALID_NAME or INVALID_WALLET_ADDRESS"),
        (status = 409, description = "ALREADY_RESERVED")
    )
)]
pub async fn reserve_name(
    State(state): State<AppState>,
    payload: Result<Json<ReserveNameRequest>, JsonRejection>,
) -> Result<Json<ReserveNameResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected reserve body");
        ApiError::bad_request(INVALID_NAME)
    })?;

    let reservation = state
        .registry
        .reserve(&request.name, request.wallet_address.as_deref())?;

    Ok(Json(ReserveNameResponse {
        ok: true,
        name: reservation.name.into(),
        status: reservation.status,
    }))
}

/// Fetch the reservation record for a name.
#[utoipa::path(
    get,
    path = "/rep/name/{name}",
    params(
        ("name" = String, Path, description = "Name to look up")
    ),
    tag = "Names",
    responses(
        (status = 200, description = "Reservation record", body = NameRecordResponse),
        (status = 400, description = "INVALID_NAME"),
        (status = 404, description = "NOT_FOUND")
    )
)]
pub async fn get_name(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<NameRecordResponse>, ApiError> {
    let Path(name) = path.map_err(|_| ApiError::bad_request(INVALID_NAME))?;
    let record = state
        .registry
        .lookup(&name)?
        .ok_or_else(ApiError::not_found)?;

    Ok(Json(NameRecordResponse {
        ok: true,
        name: record.name.into(),
        owner: record.owner.map(String::from),
        created_at: record.created_at,
    }))
}

/// List the names bound to a wallet.
#[utoipa::path(
    get,
    path = "/rep/owner/{address}",
    params(
        ("address" = String, Path, description = "0x-prefixed wallet address")
    ),
    tag = "Names",
    responses(
        (status = 200, description = "Names owned by the wallet", body = OwnerNamesResponse),
        (status = 400, description = "INVALID_WALLET_ADDRESS")
    )
)]
pub async fn owner_names(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<OwnerNamesResponse>, ApiError> {
    let Path(address) = path.map_err(|_| ApiError::bad_request(INVALID_WALLET_ADDRESS))?;
    let owner = WalletAddress::parse(&address)?;
    let names = state.registry.names_of(owner.as_str())?;

    Ok(Json(OwnerNamesResponse {
        ok: true,
        owner: owner.into(),
        names: names.into_iter().map(String::from).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use std::sync::Arc;

    use crate::names::ReservationStatus;
    use crate::storage::NameDatabase;

    const WALLET: &str = "0x742d35Cc6634C0532925a3b844Bc9e7595f4aB12";

    async fn check(state: &AppState, name: &str) -> Result<CheckNameResponse, ApiError> {
        check_name(
            State(state.clone()),
            Ok(Query(CheckNameQuery { name: name.into() })),
        )
        .await
        .map(|Json(body)| body)
    }

    async fn reserve(
        state: &AppState,
        name: &str,
        wallet: Option<&str>,
    ) -> Result<ReserveNameResponse, ApiError> {
        reserve_name(
            State(state.clone()),
            Ok(Json(ReserveNameRequest {
                name: name.into(),
                wallet_address: wallet.map(Into::into),
            })),
        )
        .await
        .map(|Json(body)| body)
    }

    #[tokio::test]
    async fn check_reserve_check_scenario() {
        let state = AppState::default();

        let before = check(&state, "Alice").await.unwrap();
        assert_eq!(
            before,
            CheckNameResponse {
                ok: true,
                name: "alice".into(),
                available: true
            }
        );

        let reserved = reserve(&state, "Alice", None).await.unwrap();
        assert_eq!(reserved.name, "alice");
        assert_eq!(reserved.status, ReservationStatus::ReservedMock);

        let after = check(&state, "ALICE  ").await.unwrap();
        assert!(!after.available);
    }

    #[tokio::test]
    async fn invalid_and_duplicate_reservations() {
        let state = AppState::default();

        let err = reserve(&state, "ab", None).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "INVALID_NAME");

        let err = reserve(&state, "-abc", None).await.unwrap_err();
        assert_eq!(err.code, "INVALID_NAME");

        reserve(&state, ".abc", None).await.unwrap();
        let err = reserve(&state, " .ABC ", None).await.unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.code, "ALREADY_RESERVED");

        let err = check(&state, "x").await.unwrap_err();
        assert_eq!(err.code, "INVALID_NAME");
    }

    #[tokio::test]
    async fn persisted_variant_requires_valid_wallet() {
        let dir = tempfile::tempdir().unwrap();
        let db = NameDatabase::open(&dir.path().join("names.redb")).unwrap();
        let state = AppState::new(Arc::new(db));

        let err = reserve(&state, "soul", None).await.unwrap_err();
        assert_eq!(err.code, "INVALID_WALLET_ADDRESS");

        let err = reserve(&state, "soul", Some("0xnot-a-wallet")).await.unwrap_err();
        assert_eq!(err.code, "INVALID_WALLET_ADDRESS");

        let ok = reserve(&state, "soul", Some(WALLET)).await.unwrap();
        assert_eq!(ok.status, ReservationStatus::Reserved);
    }

    #[tokio::test]
    async fn malformed_body_is_an_invalid_name() {
        use axum::{body::Body, extract::FromRequest, http::Request};

        let request = Request::builder()
            .method("POST")
            .uri("/rep/reserve")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let payload = Json::<ReserveNameRequest>::from_request(request, &()).await;
        assert!(payload.is_err());

        let err = reserve_name(State(AppState::default()), payload)
            .await
            .unwrap_err();
        assert_eq!(err.code, "INVALID_NAME");
    }

    #[tokio::test]
    async fn lookup_and_owner_listing() {
        let state = AppState::default();
        reserve(&state, "Zed", Some(WALLET)).await.unwrap();
        reserve(&state, "amy", Some(WALLET)).await.unwrap();

        let Json(record) = get_name(State(state.clone()), Ok(Path("ZED".into())))
            .await
            .unwrap();
        assert_eq!(record.name, "zed");
        assert_eq!(record.owner.as_deref(), Some(WALLET.to_lowercase().as_str()));

        let err = get_name(State(state.clone()), Ok(Path("nobody".into())))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let Json(listing) = owner_names(State(state.clone()), Ok(Path(WALLET.into())))
            .await
            .unwrap();
        assert_eq!(listing.names, vec!["amy", "zed"]);

        let err = owner_names(State(state), Ok(Path("0x12".into())))
            .await
            .unwrap_err();
        assert_eq!(err.code, "INVALID_WALLET_ADDRESS");
    }
}
