//! Workflow error types.

use clients::ClientError;
use common::{CarId, RentalId};
use thiserror::Error;

/// Errors a rental workflow can surface to the API layer.
///
/// Forward-step failures are wrapped per step so the API layer can tell a
/// missing entity (404-class) from a failed coordination step (500-class).
/// Compensation failures are never carried here: they are reported through
/// their own log signal and counter while the primary failure propagates.
#[derive(Debug, Error)]
pub enum RentalError {
    /// The requested car does not exist.
    #[error("car not found: {0}")]
    CarNotFound(CarId),

    /// The car exists but is already held by another rental.
    #[error("car is not available: {0}")]
    CarUnavailable(CarId),

    /// The requested rental does not exist (or belongs to someone else).
    #[error("rental not found: {0}")]
    RentalNotFound(RentalId),

    /// Inventory lookup failed before anything was committed.
    #[error("inventory lookup failed: {0}")]
    Inventory(ClientError),

    /// Ledger lookup failed on a read path.
    #[error("ledger lookup failed: {0}")]
    Ledger(ClientError),

    /// Payment creation failed; nothing was committed.
    #[error("payment creation failed: {0}")]
    PaymentFailed(ClientError),

    /// Car reservation failed after payment creation; the payment was
    /// compensated.
    #[error("car reservation failed: {0}")]
    ReservationFailed(ClientError),

    /// Ledger record creation failed after reservation; the reservation and
    /// payment were compensated.
    #[error("rental creation failed: {0}")]
    RentalCreationFailed(ClientError),

    /// The ledger refused to cancel the rental.
    #[error("rental cancellation failed: {0}")]
    CancelFailed(ClientError),

    /// The ledger refused to finish the rental.
    #[error("rental completion failed: {0}")]
    FinishFailed(ClientError),
}

/// Convenience type alias for workflow results.
pub type Result<T> = std::result::Result<T, RentalError>;
