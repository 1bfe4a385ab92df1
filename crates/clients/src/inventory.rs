//! Inventory service contract and in-memory implementation.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::CarId;
use domain::Car;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// One page of the inventory's car catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarPage {
    pub page: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub items: Vec<Car>,
}

/// Contract of the inventory service.
#[async_trait]
pub trait InventoryClient: Send + Sync {
    /// Fetches one car by id.
    async fn get_car(&self, car_id: CarId) -> Result<Car, ClientError>;

    /// Lists cars, one page at a time. Unavailable cars are hidden unless
    /// `show_all` is set.
    async fn list_cars(
        &self,
        page: u32,
        size: u32,
        show_all: bool,
    ) -> Result<CarPage, ClientError>;

    /// Atomically flips the availability flag from true to false.
    ///
    /// Fails with [`ClientError::Conflict`] when the car is already
    /// reserved, so two racing reservations cannot both succeed.
    async fn reserve(&self, car_id: CarId) -> Result<(), ClientError>;

    /// Sets the availability flag back to true. Idempotent: releasing an
    /// already available car is a no-op success.
    async fn release(&self, car_id: CarId) -> Result<(), ClientError>;
}

#[derive(Debug, Default)]
struct InMemoryInventoryState {
    cars: Vec<Car>,
    fail_on_reserve: bool,
    fail_on_release: bool,
}

/// In-memory inventory for tests and local runs.
///
/// `reserve` performs its availability compare under the write lock, giving
/// it the same conditional-update semantics as the HTTP contract.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInventoryClient {
    state: Arc<RwLock<InMemoryInventoryState>>,
}

impl InMemoryInventoryClient {
    /// Creates a new empty in-memory inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a car record.
    pub fn add_car(&self, car: Car) {
        self.state.write().unwrap().cars.push(car);
    }

    /// Returns a snapshot of a car, if present.
    pub fn car(&self, car_id: CarId) -> Option<Car> {
        self.state
            .read()
            .unwrap()
            .cars
            .iter()
            .find(|c| c.car_uid == car_id)
            .cloned()
    }

    /// Configures reserve calls to fail with a transport error.
    pub fn set_fail_on_reserve(&self, fail: bool) {
        self.state.write().unwrap().fail_on_reserve = fail;
    }

    /// Configures release calls to fail with a transport error.
    pub fn set_fail_on_release(&self, fail: bool) {
        self.state.write().unwrap().fail_on_release = fail;
    }
}

#[async_trait]
impl InventoryClient for InMemoryInventoryClient {
    async fn get_car(&self, car_id: CarId) -> Result<Car, ClientError> {
        self.car(car_id).ok_or(ClientError::NotFound)
    }

    async fn list_cars(
        &self,
        page: u32,
        size: u32,
        show_all: bool,
    ) -> Result<CarPage, ClientError> {
        let state = self.state.read().unwrap();
        let visible: Vec<&Car> = state
            .cars
            .iter()
            .filter(|c| show_all || c.available)
            .collect();

        let start = (page.saturating_sub(1) as usize).saturating_mul(size as usize);
        let items = visible
            .iter()
            .skip(start)
            .take(size as usize)
            .map(|c| (*c).clone())
            .collect();

        Ok(CarPage {
            page,
            page_size: size,
            total_elements: visible.len() as u64,
            items,
        })
    }

    async fn reserve(&self, car_id: CarId) -> Result<(), ClientError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_reserve {
            return Err(ClientError::Transport("inventory unreachable".to_string()));
        }

        let car = state
            .cars
            .iter_mut()
            .find(|c| c.car_uid == car_id)
            .ok_or(ClientError::NotFound)?;

        if !car.available {
            return Err(ClientError::Conflict);
        }
        car.available = false;
        Ok(())
    }

    async fn release(&self, car_id: CarId) -> Result<(), ClientError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_release {
            return Err(ClientError::Transport("inventory unreachable".to_string()));
        }

        let car = state
            .cars
            .iter_mut()
            .find(|c| c.car_uid == car_id)
            .ok_or(ClientError::NotFound)?;

        car.available = true;
        Ok(())
    }
}
