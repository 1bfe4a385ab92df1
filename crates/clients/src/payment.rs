//! Payment service contract and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::PaymentId;
use domain::{Payment, PaymentStatus};

use crate::error::ClientError;

/// Contract of the payment service.
#[async_trait]
pub trait PaymentClient: Send + Sync {
    /// Creates a payment for the given total. Authorization is synchronous
    /// and unconditional: the record comes back `PAID`.
    async fn create_payment(&self, price: i64) -> Result<Payment, ClientError>;

    /// Fetches one payment by id.
    async fn get_payment(&self, payment_id: PaymentId) -> Result<Payment, ClientError>;

    /// Voids a payment. Idempotent: cancelling an already cancelled payment
    /// is a no-op success.
    async fn cancel_payment(&self, payment_id: PaymentId) -> Result<(), ClientError>;
}

#[derive(Debug, Default)]
struct InMemoryPaymentState {
    payments: HashMap<PaymentId, Payment>,
    fail_on_create: bool,
    fail_on_cancel: bool,
}

/// In-memory payment service for tests and local runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentClient {
    state: Arc<RwLock<InMemoryPaymentState>>,
}

impl InMemoryPaymentClient {
    /// Creates a new empty in-memory payment service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of a payment, if present.
    pub fn payment(&self, payment_id: PaymentId) -> Option<Payment> {
        self.state.read().unwrap().payments.get(&payment_id).cloned()
    }

    /// Returns the number of stored payments.
    pub fn payment_count(&self) -> usize {
        self.state.read().unwrap().payments.len()
    }

    /// Returns the ids of all stored payments.
    pub fn payment_ids(&self) -> Vec<PaymentId> {
        self.state.read().unwrap().payments.keys().copied().collect()
    }

    /// Configures create calls to fail with a transport error.
    pub fn set_fail_on_create(&self, fail: bool) {
        self.state.write().unwrap().fail_on_create = fail;
    }

    /// Configures cancel calls to fail with a transport error.
    pub fn set_fail_on_cancel(&self, fail: bool) {
        self.state.write().unwrap().fail_on_cancel = fail;
    }
}

#[async_trait]
impl PaymentClient for InMemoryPaymentClient {
    async fn create_payment(&self, price: i64) -> Result<Payment, ClientError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_create {
            return Err(ClientError::Transport("payment unreachable".to_string()));
        }
        if price <= 0 {
            return Err(ClientError::Rejected(format!(
                "price must be positive, got {price}"
            )));
        }

        let payment = Payment {
            payment_uid: PaymentId::new(),
            status: PaymentStatus::Paid,
            price,
        };
        state.payments.insert(payment.payment_uid, payment.clone());
        Ok(payment)
    }

    async fn get_payment(&self, payment_id: PaymentId) -> Result<Payment, ClientError> {
        self.payment(payment_id).ok_or(ClientError::NotFound)
    }

    async fn cancel_payment(&self, payment_id: PaymentId) -> Result<(), ClientError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_cancel {
            return Err(ClientError::Transport("payment unreachable".to_string()));
        }

        let payment = state
            .payments
            .get_mut(&payment_id)
            .ok_or(ClientError::NotFound)?;

        payment.status = PaymentStatus::Canceled;
        Ok(())
    }
}
