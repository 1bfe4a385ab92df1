//! HTTP inventory client.

use std::time::Duration;

use async_trait::async_trait;
use common::CarId;
use domain::Car;
use reqwest::Client;

use super::{build_client, expect_success, map_transport_error, read_json};
use crate::error::ClientError;
use crate::inventory::{CarPage, InventoryClient};

/// Inventory client speaking the cars service's REST API.
#[derive(Debug, Clone)]
pub struct HttpInventoryClient {
    client: Client,
    base_url: String,
}

impl HttpInventoryClient {
    /// Builds a client for the given base URL with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying reqwest client cannot be
    /// constructed.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl InventoryClient for HttpInventoryClient {
    async fn get_car(&self, car_id: CarId) -> Result<Car, ClientError> {
        let response = self
            .client
            .get(format!("{}/api/v1/cars/{car_id}", self.base_url))
            .send()
            .await
            .map_err(map_transport_error)?;
        read_json(response).await
    }

    async fn list_cars(
        &self,
        page: u32,
        size: u32,
        show_all: bool,
    ) -> Result<CarPage, ClientError> {
        let response = self
            .client
            .get(format!("{}/api/v1/cars", self.base_url))
            .query(&[
                ("page", page.to_string()),
                ("size", size.to_string()),
                ("show_all", show_all.to_string()),
            ])
            .send()
            .await
            .map_err(map_transport_error)?;
        read_json(response).await
    }

    async fn reserve(&self, car_id: CarId) -> Result<(), ClientError> {
        // Conditional write: the service compares against `expected` before
        // flipping the flag and answers 409 when the compare fails.
        let response = self
            .client
            .patch(format!(
                "{}/api/v1/cars/{car_id}/availability",
                self.base_url
            ))
            .query(&[("available", "false"), ("expected", "true")])
            .send()
            .await
            .map_err(map_transport_error)?;
        expect_success(response).await
    }

    async fn release(&self, car_id: CarId) -> Result<(), ClientError> {
        let response = self
            .client
            .patch(format!(
                "{}/api/v1/cars/{car_id}/availability",
                self.base_url
            ))
            .query(&[("available", "true")])
            .send()
            .await
            .map_err(map_transport_error)?;
        expect_success(response).await
    }
}
