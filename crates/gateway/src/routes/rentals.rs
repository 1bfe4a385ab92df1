//! Rental workflow endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::NaiveDate;
use clients::{InventoryClient, LedgerClient, PaymentClient};
use common::{CarId, RentalId};
use orchestrator::{CreatedRental, RentalView};
use serde::Deserialize;

use crate::AppState;
use crate::error::ApiError;
use crate::extract::CallerIdentity;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRentalRequest {
    pub car_uid: CarId,
    pub date_from: String,
    pub date_to: String,
}

fn parse_date(raw: &str) -> Result<NaiveDate, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid calendar date: {raw}")))
}

/// POST /api/v1/rental — run the create-rental saga.
#[tracing::instrument(skip(state, req))]
pub async fn create<I, P, L>(
    State(state): State<Arc<AppState<I, P, L>>>,
    CallerIdentity(username): CallerIdentity,
    Json(req): Json<CreateRentalRequest>,
) -> Result<Json<CreatedRental>, ApiError>
where
    I: InventoryClient,
    P: PaymentClient,
    L: LedgerClient,
{
    let date_from = parse_date(&req.date_from)?;
    let date_to = parse_date(&req.date_to)?;

    let created = state
        .orchestrator
        .create_rental(username, req.car_uid, date_from, date_to)
        .await?;
    Ok(Json(created))
}

/// GET /api/v1/rental — list the caller's rentals.
#[tracing::instrument(skip(state))]
pub async fn list<I, P, L>(
    State(state): State<Arc<AppState<I, P, L>>>,
    CallerIdentity(username): CallerIdentity,
) -> Result<Json<Vec<RentalView>>, ApiError>
where
    I: InventoryClient,
    P: PaymentClient,
    L: LedgerClient,
{
    let rentals = state.orchestrator.list_rentals(&username).await?;
    Ok(Json(rentals))
}

/// GET /api/v1/rental/{id} — one rental summary.
#[tracing::instrument(skip(state))]
pub async fn get<I, P, L>(
    State(state): State<Arc<AppState<I, P, L>>>,
    Path(rental_uid): Path<RentalId>,
    CallerIdentity(username): CallerIdentity,
) -> Result<Json<RentalView>, ApiError>
where
    I: InventoryClient,
    P: PaymentClient,
    L: LedgerClient,
{
    let rental = state
        .orchestrator
        .get_rental(rental_uid, &username)
        .await?;
    Ok(Json(rental))
}

/// DELETE /api/v1/rental/{id} — cancel a rental.
#[tracing::instrument(skip(state))]
pub async fn cancel<I, P, L>(
    State(state): State<Arc<AppState<I, P, L>>>,
    Path(rental_uid): Path<RentalId>,
    CallerIdentity(username): CallerIdentity,
) -> Result<StatusCode, ApiError>
where
    I: InventoryClient,
    P: PaymentClient,
    L: LedgerClient,
{
    state
        .orchestrator
        .cancel_rental(rental_uid, &username)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/rental/{id}/finish — finish a rental.
#[tracing::instrument(skip(state))]
pub async fn finish<I, P, L>(
    State(state): State<Arc<AppState<I, P, L>>>,
    Path(rental_uid): Path<RentalId>,
    CallerIdentity(username): CallerIdentity,
) -> Result<StatusCode, ApiError>
where
    I: InventoryClient,
    P: PaymentClient,
    L: LedgerClient,
{
    state
        .orchestrator
        .finish_rental(rental_uid, &username)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
