//! Shared identifier types used across the rental gateway crates.

pub mod types;

pub use types::{CarId, PaymentId, RentalId, Username};
