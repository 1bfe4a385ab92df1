//! Composed read models returned by the workflows.
//!
//! The read path favors availability over completeness: when an enrichment
//! lookup fails, the summary degrades to the identifier that is already
//! known from the rental record plus neutral descriptive fields.

use chrono::NaiveDate;
use common::{CarId, PaymentId, RentalId};
use domain::{Car, Payment, PaymentStatus, RentalStatus};
use serde::{Deserialize, Serialize};

/// Car fields embedded in a rental summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarSummary {
    pub car_uid: CarId,
    pub brand: String,
    pub model: String,
    pub registration_number: String,
}

impl CarSummary {
    /// Identifier-only summary used when the inventory lookup fails.
    pub fn placeholder(car_uid: CarId) -> Self {
        Self {
            car_uid,
            brand: String::new(),
            model: String::new(),
            registration_number: String::new(),
        }
    }
}

impl From<&Car> for CarSummary {
    fn from(car: &Car) -> Self {
        Self {
            car_uid: car.car_uid,
            brand: car.brand.clone(),
            model: car.model.clone(),
            registration_number: car.registration_number.clone(),
        }
    }
}

/// Payment fields embedded in a rental summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    pub payment_uid: PaymentId,
    pub status: PaymentStatus,
    pub price: i64,
}

impl PaymentSummary {
    /// Identifier-only summary used when the payment lookup fails.
    pub fn placeholder(payment_uid: PaymentId) -> Self {
        Self {
            payment_uid,
            status: PaymentStatus::Paid,
            price: 0,
        }
    }
}

impl From<&Payment> for PaymentSummary {
    fn from(payment: &Payment) -> Self {
        Self {
            payment_uid: payment.payment_uid,
            status: payment.status,
            price: payment.price,
        }
    }
}

/// A rental enriched with its car and payment summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalView {
    pub rental_uid: RentalId,
    pub status: RentalStatus,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub car: CarSummary,
    pub payment: PaymentSummary,
}

/// Result of a successful create-rental workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedRental {
    pub rental_uid: RentalId,
    pub status: RentalStatus,
    pub car_uid: CarId,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub payment: PaymentSummary,
}
