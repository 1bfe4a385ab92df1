//! Rental entity and its status state machine.

use chrono::NaiveDate;
use common::{CarId, PaymentId, RentalId, Username};
use serde::{Deserialize, Serialize};

/// The status of a rental in its lifecycle.
///
/// State transitions:
/// ```text
/// InProgress ──┬──► Finished
///              └──► Canceled
/// ```
///
/// `Finished` and `Canceled` are terminal; the ledger service is the sole
/// authority enforcing that no transition leaves a terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RentalStatus {
    /// The rental is active and holds its car's availability.
    #[default]
    InProgress,

    /// The rental completed normally; the payment stays PAID (terminal).
    Finished,

    /// The rental was canceled; the payment is voided (terminal).
    Canceled,
}

impl RentalStatus {
    /// Returns true if the rental can be canceled from this status.
    pub fn can_cancel(&self) -> bool {
        matches!(self, RentalStatus::InProgress)
    }

    /// Returns true if the rental can be finished from this status.
    pub fn can_finish(&self) -> bool {
        matches!(self, RentalStatus::InProgress)
    }

    /// Returns true if this is a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RentalStatus::Finished | RentalStatus::Canceled)
    }

    /// Returns the wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::InProgress => "IN_PROGRESS",
            RentalStatus::Finished => "FINISHED",
            RentalStatus::Canceled => "CANCELED",
        }
    }
}

impl std::fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A rental record as returned by the ledger service.
///
/// One rental references exactly one payment and one car. Dates follow the
/// inclusive-start/exclusive-end convention used for day counting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rental {
    pub rental_uid: RentalId,
    pub username: Username,
    pub payment_uid: PaymentId,
    pub car_uid: CarId,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub status: RentalStatus,
}
