//! HTTP rental ledger client.

use std::time::Duration;

use async_trait::async_trait;
use common::{RentalId, Username};
use domain::Rental;
use reqwest::Client;

use super::{build_client, expect_success, map_transport_error, read_json};
use crate::error::ClientError;
use crate::ledger::{LedgerClient, NewRental};

/// Ledger client speaking the rental service's REST API.
///
/// Ownership is expressed on the wire as a `username` query parameter the
/// ledger checks on every keyed operation.
#[derive(Debug, Clone)]
pub struct HttpLedgerClient {
    client: Client,
    base_url: String,
}

impl HttpLedgerClient {
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
impl LedgerClient for HttpLedgerClient {
    async fn create_rental(&self, rental: NewRental) -> Result<Rental, ClientError> {
        let response = self
            .client
            .post(format!("{}/api/v1/rental", self.base_url))
            .json(&rental)
            .send()
            .await
            .map_err(map_transport_error)?;
        read_json(response).await
    }

    async fn get_rental(
        &self,
        rental_id: RentalId,
        username: &Username,
    ) -> Result<Rental, ClientError> {
        let response = self
            .client
            .get(format!("{}/api/v1/rental/{rental_id}", self.base_url))
            .query(&[("username", username.as_str())])
            .send()
            .await
            .map_err(map_transport_error)?;
        read_json(response).await
    }

    async fn list_rentals(&self, username: &Username) -> Result<Vec<Rental>, ClientError> {
        let response = self
            .client
            .get(format!("{}/api/v1/rental", self.base_url))
            .query(&[("username", username.as_str())])
            .send()
            .await
            .map_err(map_transport_error)?;
        read_json(response).await
    }

    async fn cancel_rental(
        &self,
        rental_id: RentalId,
        username: &Username,
    ) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(format!("{}/api/v1/rental/{rental_id}", self.base_url))
            .query(&[("username", username.as_str())])
            .send()
            .await
            .map_err(map_transport_error)?;
        expect_success(response).await
    }

    async fn finish_rental(
        &self,
        rental_id: RentalId,
        username: &Username,
    ) -> Result<(), ClientError> {
        let response = self
            .client
            .post(format!(
                "{}/api/v1/rental/{rental_id}/finish",
                self.base_url
            ))
            .query(&[("username", username.as_str())])
            .send()
            .await
            .map_err(map_transport_error)?;
        expect_success(response).await
    }
}
