//! Payment entity as owned by the payment service.

use common::PaymentId;
use serde::{Deserialize, Serialize};

/// Status of a payment record.
///
/// Payments are authorized synchronously and unconditionally, so a payment
/// is born `PAID`; cancellation is the only transition out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    Paid,
    Canceled,
}

impl PaymentStatus {
    /// Returns the wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "PAID",
            PaymentStatus::Canceled => "CANCELED",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A payment record as returned by the payment service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub payment_uid: PaymentId,
    pub status: PaymentStatus,
    /// Whole-unit total charged for the rental period.
    pub price: i64,
}
