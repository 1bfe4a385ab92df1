//! Rental ledger contract and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::NaiveDate;
use common::{CarId, PaymentId, RentalId, Username};
use domain::{Rental, RentalStatus};
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Payload for creating a rental record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRental {
    pub username: Username,
    pub payment_uid: PaymentId,
    pub car_uid: CarId,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

/// Contract of the rental ledger service.
///
/// Every read and transition is keyed by the owning username; a rental owned
/// by someone else is indistinguishable from a missing one. The ledger is
/// also the sole authority on the rental state machine: transitions out of a
/// terminal status are rejected here and nowhere else.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Creates a rental record in `IN_PROGRESS`.
    async fn create_rental(&self, rental: NewRental) -> Result<Rental, ClientError>;

    /// Fetches one rental owned by `username`.
    async fn get_rental(
        &self,
        rental_id: RentalId,
        username: &Username,
    ) -> Result<Rental, ClientError>;

    /// Lists all rentals owned by `username`.
    async fn list_rentals(&self, username: &Username) -> Result<Vec<Rental>, ClientError>;

    /// Transitions a rental to `CANCELED`.
    async fn cancel_rental(
        &self,
        rental_id: RentalId,
        username: &Username,
    ) -> Result<(), ClientError>;

    /// Transitions a rental to `FINISHED`.
    async fn finish_rental(
        &self,
        rental_id: RentalId,
        username: &Username,
    ) -> Result<(), ClientError>;
}

#[derive(Debug, Default)]
struct InMemoryLedgerState {
    rentals: HashMap<RentalId, Rental>,
    fail_on_create: bool,
    fail_on_cancel: bool,
    fail_on_finish: bool,
}

/// In-memory rental ledger for tests and local runs.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedgerClient {
    state: Arc<RwLock<InMemoryLedgerState>>,
}

impl InMemoryLedgerClient {
    /// Creates a new empty in-memory ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of a rental regardless of owner, if present.
    pub fn rental(&self, rental_id: RentalId) -> Option<Rental> {
        self.state.read().unwrap().rentals.get(&rental_id).cloned()
    }

    /// Returns the number of stored rentals.
    pub fn rental_count(&self) -> usize {
        self.state.read().unwrap().rentals.len()
    }

    /// Configures create calls to fail with a transport error.
    pub fn set_fail_on_create(&self, fail: bool) {
        self.state.write().unwrap().fail_on_create = fail;
    }

    /// Configures cancel calls to fail with a transport error.
    pub fn set_fail_on_cancel(&self, fail: bool) {
        self.state.write().unwrap().fail_on_cancel = fail;
    }

    /// Configures finish calls to fail with a transport error.
    pub fn set_fail_on_finish(&self, fail: bool) {
        self.state.write().unwrap().fail_on_finish = fail;
    }

    fn transition(
        &self,
        rental_id: RentalId,
        username: &Username,
        to: RentalStatus,
    ) -> Result<(), ClientError> {
        let mut state = self.state.write().unwrap();

        let rental = state
            .rentals
            .get_mut(&rental_id)
            .filter(|r| &r.username == username)
            .ok_or(ClientError::NotFound)?;

        let allowed = match to {
            RentalStatus::Canceled => rental.status.can_cancel(),
            RentalStatus::Finished => rental.status.can_finish(),
            RentalStatus::InProgress => false,
        };
        if !allowed {
            return Err(ClientError::Rejected(format!(
                "rental is {}, not IN_PROGRESS",
                rental.status
            )));
        }

        rental.status = to;
        Ok(())
    }
}

#[async_trait]
impl LedgerClient for InMemoryLedgerClient {
    async fn create_rental(&self, rental: NewRental) -> Result<Rental, ClientError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_create {
            return Err(ClientError::Transport("ledger unreachable".to_string()));
        }

        let record = Rental {
            rental_uid: RentalId::new(),
            username: rental.username,
            payment_uid: rental.payment_uid,
            car_uid: rental.car_uid,
            date_from: rental.date_from,
            date_to: rental.date_to,
            status: RentalStatus::InProgress,
        };
        state.rentals.insert(record.rental_uid, record.clone());
        Ok(record)
    }

    async fn get_rental(
        &self,
        rental_id: RentalId,
        username: &Username,
    ) -> Result<Rental, ClientError> {
        self.state
            .read()
            .unwrap()
            .rentals
            .get(&rental_id)
            .filter(|r| &r.username == username)
            .cloned()
            .ok_or(ClientError::NotFound)
    }

    async fn list_rentals(&self, username: &Username) -> Result<Vec<Rental>, ClientError> {
        Ok(self
            .state
            .read()
            .unwrap()
            .rentals
            .values()
            .filter(|r| &r.username == username)
            .cloned()
            .collect())
    }

    async fn cancel_rental(
        &self,
        rental_id: RentalId,
        username: &Username,
    ) -> Result<(), ClientError> {
        if self.state.read().unwrap().fail_on_cancel {
            return Err(ClientError::Transport("ledger unreachable".to_string()));
        }
        self.transition(rental_id, username, RentalStatus::Canceled)
    }

    async fn finish_rental(
        &self,
        rental_id: RentalId,
        username: &Username,
    ) -> Result<(), ClientError> {
        if self.state.read().unwrap().fail_on_finish {
            return Err(ClientError::Transport("ledger unreachable".to_string()));
        }
        self.transition(rental_id, username, RentalStatus::Finished)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_rental(username: &str) -> NewRental {
        NewRental {
            username: Username::new(username),
            payment_uid: PaymentId::new(),
            car_uid: CarId::new(),
            date_from: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            date_to: NaiveDate::from_ymd_opt(2024, 6, 8).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let ledger = InMemoryLedgerClient::new();
        let alice = Username::new("alice");

        let created = ledger.create_rental(new_rental("alice")).await.unwrap();
        assert_eq!(created.status, RentalStatus::InProgress);

        let fetched = ledger.get_rental(created.rental_uid, &alice).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_ownership_hides_foreign_rentals() {
        let ledger = InMemoryLedgerClient::new();
        let created = ledger.create_rental(new_rental("alice")).await.unwrap();

        let bob = Username::new("bob");
        assert!(matches!(
            ledger.get_rental(created.rental_uid, &bob).await,
            Err(ClientError::NotFound)
        ));
        assert!(matches!(
            ledger.cancel_rental(created.rental_uid, &bob).await,
            Err(ClientError::NotFound)
        ));
        assert!(matches!(
            ledger.finish_rental(created.rental_uid, &bob).await,
            Err(ClientError::NotFound)
        ));
        assert!(ledger.list_rentals(&bob).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_transitions_to_canceled() {
        let ledger = InMemoryLedgerClient::new();
        let alice = Username::new("alice");
        let created = ledger.create_rental(new_rental("alice")).await.unwrap();

        ledger.cancel_rental(created.rental_uid, &alice).await.unwrap();
        assert_eq!(
            ledger.rental(created.rental_uid).unwrap().status,
            RentalStatus::Canceled
        );
    }

    #[tokio::test]
    async fn test_no_transition_out_of_terminal_status() {
        let ledger = InMemoryLedgerClient::new();
        let alice = Username::new("alice");
        let created = ledger.create_rental(new_rental("alice")).await.unwrap();

        ledger.finish_rental(created.rental_uid, &alice).await.unwrap();

        let cancel = ledger.cancel_rental(created.rental_uid, &alice).await;
        assert!(matches!(cancel, Err(ClientError::Rejected(_))));

        let finish = ledger.finish_rental(created.rental_uid, &alice).await;
        assert!(matches!(finish, Err(ClientError::Rejected(_))));
        assert_eq!(
            ledger.rental(created.rental_uid).unwrap().status,
            RentalStatus::Finished
        );
    }

    #[tokio::test]
    async fn test_list_returns_only_own_rentals() {
        let ledger = InMemoryLedgerClient::new();
        ledger.create_rental(new_rental("alice")).await.unwrap();
        ledger.create_rental(new_rental("alice")).await.unwrap();
        ledger.create_rental(new_rental("bob")).await.unwrap();

        let alice = Username::new("alice");
        assert_eq!(ledger.list_rentals(&alice).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_fail_on_create() {
        let ledger = InMemoryLedgerClient::new();
        ledger.set_fail_on_create(true);

        let result = ledger.create_rental(new_rental("alice")).await;
        assert!(matches!(result, Err(ClientError::Transport(_))));
        assert_eq!(ledger.rental_count(), 0);
    }
}
