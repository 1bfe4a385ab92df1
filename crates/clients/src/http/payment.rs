//! HTTP payment client.

use std::time::Duration;

use async_trait::async_trait;
use common::PaymentId;
use domain::Payment;
use reqwest::Client;
use serde::Serialize;

use super::{build_client, expect_success, map_transport_error, read_json};
use crate::error::ClientError;
use crate::payment::PaymentClient;

#[derive(Serialize)]
struct CreatePaymentBody {
    price: i64,
}

/// Payment client speaking the payment service's REST API.
#[derive(Debug, Clone)]
pub struct HttpPaymentClient {
    client: Client,
    base_url: String,
}

impl HttpPaymentClient {
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
impl PaymentClient for HttpPaymentClient {
    async fn create_payment(&self, price: i64) -> Result<Payment, ClientError> {
        let response = self
            .client
            .post(format!("{}/api/v1/payment", self.base_url))
            .json(&CreatePaymentBody { price })
            .send()
            .await
            .map_err(map_transport_error)?;
        read_json(response).await
    }

    async fn get_payment(&self, payment_id: PaymentId) -> Result<Payment, ClientError> {
        let response = self
            .client
            .get(format!("{}/api/v1/payment/{payment_id}", self.base_url))
            .send()
            .await
            .map_err(map_transport_error)?;
        read_json(response).await
    }

    async fn cancel_payment(&self, payment_id: PaymentId) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(format!("{}/api/v1/payment/{payment_id}", self.base_url))
            .send()
            .await
            .map_err(map_transport_error)?;
        expect_success(response).await
    }
}
