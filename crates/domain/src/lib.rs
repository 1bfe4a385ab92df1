//! Domain layer for the rental gateway.
//!
//! This crate provides the entities owned by the downstream services as the
//! gateway sees them, plus the pure computations the orchestrator needs:
//! - `Car` with its type enum and availability flag
//! - `Payment` with its PAID/CANCELED status
//! - `Rental` with its status state machine
//! - the rental price function

pub mod car;
pub mod payment;
pub mod pricing;
pub mod rental;

pub use car::{Car, CarType};
pub use payment::{Payment, PaymentStatus};
pub use pricing::rental_price;
pub use rental::{Rental, RentalStatus};
