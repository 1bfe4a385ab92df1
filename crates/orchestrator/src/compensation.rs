//! Explicit undo stack for the create-rental saga.
//!
//! Forward steps push their undo action as they commit; on failure the stack
//! is unwound in reverse completion order. Compensations are the deepest
//! level of the saga: their own failures are recorded and reported through a
//! dedicated log signal and counter, never compensated further.

use clients::{ClientError, InventoryClient, PaymentClient};
use common::{CarId, PaymentId};

/// A single undoable step of the create-rental saga.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompensationAction {
    /// Void the payment created for the rental.
    CancelPayment(PaymentId),

    /// Put the reserved car back on the market.
    ReleaseCar(CarId),
}

impl std::fmt::Display for CompensationAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompensationAction::CancelPayment(id) => write!(f, "cancel_payment {id}"),
            CompensationAction::ReleaseCar(id) => write!(f, "release_car {id}"),
        }
    }
}

/// A compensation that did not take; downstream state may be dangling.
#[derive(Debug)]
pub struct CompensationFailure {
    pub action: CompensationAction,
    pub error: ClientError,
}

/// LIFO stack of undo actions for one in-flight saga.
#[derive(Debug, Default)]
pub struct CompensationStack {
    actions: Vec<CompensationAction>,
}

impl CompensationStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the undo action for a step that just committed.
    pub fn push(&mut self, action: CompensationAction) {
        self.actions.push(action);
    }

    /// Returns the number of recorded actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns true if no step has committed yet.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Executes the recorded actions in reverse completion order.
    ///
    /// A failing compensation does not stop the unwind: it is logged at
    /// error level, counted in `compensation_failures_total`, and returned,
    /// then the remaining actions still run.
    pub async fn unwind<I, P>(self, inventory: &I, payment: &P) -> Vec<CompensationFailure>
    where
        I: InventoryClient + ?Sized,
        P: PaymentClient + ?Sized,
    {
        if self.actions.is_empty() {
            return Vec::new();
        }
        metrics::counter!("compensation_runs_total").increment(1);

        let mut failures = Vec::new();
        for action in self.actions.into_iter().rev() {
            let result = match &action {
                CompensationAction::CancelPayment(payment_uid) => {
                    payment.cancel_payment(*payment_uid).await
                }
                CompensationAction::ReleaseCar(car_uid) => inventory.release(*car_uid).await,
            };
            match result {
                Ok(()) => tracing::info!(%action, "compensation applied"),
                Err(error) => {
                    metrics::counter!("compensation_failures_total").increment(1);
                    tracing::error!(%action, %error, "compensation failed, state may be dangling");
                    failures.push(CompensationFailure { action, error });
                }
            }
        }
        failures
    }
}
