//! Car catalogue passthrough endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use clients::{InventoryClient, LedgerClient, PaymentClient};
use common::CarId;
use domain::{Car, CarType};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::ApiError;

fn default_page() -> u32 {
    1
}

fn default_size() -> u32 {
    10
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarsQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_size")]
    pub size: u32,
    #[serde(default)]
    pub show_all: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarResponse {
    pub car_uid: CarId,
    pub brand: String,
    pub model: String,
    pub registration_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<i32>,
    pub price: i64,
    #[serde(rename = "type")]
    pub car_type: CarType,
    pub available: bool,
}

impl From<Car> for CarResponse {
    fn from(car: Car) -> Self {
        Self {
            car_uid: car.car_uid,
            brand: car.brand,
            model: car.model,
            registration_number: car.registration_number,
            power: car.power,
            price: car.price,
            car_type: car.car_type,
            available: car.available,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarsPageResponse {
    pub page: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub items: Vec<CarResponse>,
}

/// GET /api/v1/cars — one catalogue page from the inventory service.
#[tracing::instrument(skip(state))]
pub async fn list<I, P, L>(
    State(state): State<Arc<AppState<I, P, L>>>,
    Query(query): Query<CarsQuery>,
) -> Result<Json<CarsPageResponse>, ApiError>
where
    I: InventoryClient,
    P: PaymentClient,
    L: LedgerClient,
{
    let page = state
        .inventory
        .list_cars(query.page, query.size, query.show_all)
        .await
        .map_err(ApiError::Upstream)?;

    Ok(Json(CarsPageResponse {
        page: page.page,
        page_size: page.page_size,
        total_elements: page.total_elements,
        items: page.items.into_iter().map(CarResponse::from).collect(),
    }))
}
