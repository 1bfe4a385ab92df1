//! Saga coordinator for the rental workflows.

use chrono::NaiveDate;
use clients::{ClientError, InventoryClient, LedgerClient, NewRental, PaymentClient};
use common::{CarId, RentalId, Username};
use domain::{Rental, rental_price};
use futures_util::future::join_all;

use crate::compensation::{CompensationAction, CompensationStack};
use crate::error::RentalError;
use crate::view::{CarSummary, CreatedRental, PaymentSummary, RentalView};
use crate::workflow;

/// Orchestrates the rental workflows across the three downstream services.
///
/// Create is a 4-step saga (fetch car → create payment → reserve car →
/// create rental) with compensating actions on failure. Cancel and finish
/// run the authoritative ledger transition first and then best-effort
/// cleanup. The coordinator holds no mutable state of its own, so its
/// methods are reentrant.
pub struct RentalOrchestrator<I, P, L>
where
    I: InventoryClient,
    P: PaymentClient,
    L: LedgerClient,
{
    inventory: I,
    payment: P,
    ledger: L,
}

impl<I, P, L> RentalOrchestrator<I, P, L>
where
    I: InventoryClient,
    P: PaymentClient,
    L: LedgerClient,
{
    /// Creates a new orchestrator over the given clients.
    pub fn new(inventory: I, payment: P, ledger: L) -> Self {
        Self {
            inventory,
            payment,
            ledger,
        }
    }

    /// Executes the create-rental saga.
    ///
    /// On failure of a later step, every step that already committed is
    /// compensated in reverse order; the caller always sees either a fully
    /// booked rental or none at all.
    #[tracing::instrument(skip(self), fields(saga_type = workflow::SAGA_TYPE))]
    pub async fn create_rental(
        &self,
        username: Username,
        car_uid: CarId,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Result<CreatedRental, RentalError> {
        metrics::counter!("rental_workflows_total", "workflow" => "create").increment(1);
        let saga_start = std::time::Instant::now();

        // 1. Fetch the car and price the period
        tracing::info!(step = workflow::STEP_FETCH_CAR, %car_uid, "saga step started");
        let car = match self.inventory.get_car(car_uid).await {
            Ok(car) => car,
            Err(ClientError::NotFound) => return Err(RentalError::CarNotFound(car_uid)),
            Err(error) => return Err(RentalError::Inventory(error)),
        };
        if !car.available {
            // Fail fast before committing anything. The reservation step
            // below re-checks atomically, so this is not what guarantees
            // single booking.
            return Err(RentalError::CarUnavailable(car_uid));
        }
        let total_price = rental_price(date_from, date_to, car.price);

        let mut compensations = CompensationStack::new();

        // 2. Create the payment
        tracing::info!(
            step = workflow::STEP_CREATE_PAYMENT,
            total_price,
            "saga step started"
        );
        let payment = self
            .payment
            .create_payment(total_price)
            .await
            .map_err(RentalError::PaymentFailed)?;
        compensations.push(CompensationAction::CancelPayment(payment.payment_uid));

        // 3. Reserve the car
        tracing::info!(step = workflow::STEP_RESERVE_CAR, "saga step started");
        if let Err(error) = self.inventory.reserve(car_uid).await {
            compensations.unwind(&self.inventory, &self.payment).await;
            metrics::counter!("rental_workflows_failed_total", "workflow" => "create")
                .increment(1);
            return Err(match error {
                ClientError::Conflict => RentalError::CarUnavailable(car_uid),
                other => RentalError::ReservationFailed(other),
            });
        }
        compensations.push(CompensationAction::ReleaseCar(car_uid));

        // 4. Create the rental record
        tracing::info!(step = workflow::STEP_CREATE_RENTAL, "saga step started");
        let rental = match self
            .ledger
            .create_rental(NewRental {
                username,
                payment_uid: payment.payment_uid,
                car_uid,
                date_from,
                date_to,
            })
            .await
        {
            Ok(rental) => rental,
            Err(error) => {
                compensations.unwind(&self.inventory, &self.payment).await;
                metrics::counter!("rental_workflows_failed_total", "workflow" => "create")
                    .increment(1);
                return Err(RentalError::RentalCreationFailed(error));
            }
        };

        let duration = saga_start.elapsed().as_secs_f64();
        metrics::histogram!("rental_workflow_duration_seconds").record(duration);
        tracing::info!(rental_uid = %rental.rental_uid, duration, "create-rental saga completed");

        Ok(CreatedRental {
            rental_uid: rental.rental_uid,
            status: rental.status,
            car_uid,
            date_from,
            date_to,
            payment: PaymentSummary::from(&payment),
        })
    }

    /// Cancels a rental: ledger transition, then best-effort car release and
    /// payment voiding.
    #[tracing::instrument(skip(self, username))]
    pub async fn cancel_rental(
        &self,
        rental_uid: RentalId,
        username: &Username,
    ) -> Result<(), RentalError> {
        metrics::counter!("rental_workflows_total", "workflow" => "cancel").increment(1);

        let rental = self.fetch_owned(rental_uid, username).await?;

        self.ledger
            .cancel_rental(rental_uid, username)
            .await
            .map_err(|error| match error {
                ClientError::NotFound => RentalError::RentalNotFound(rental_uid),
                other => RentalError::CancelFailed(other),
            })?;

        // The ledger transition is the authoritative outcome; what follows
        // is cleanup with idempotent retry potential.
        self.release_car_best_effort(rental_uid, rental.car_uid).await;
        if let Err(error) = self.payment.cancel_payment(rental.payment_uid).await {
            metrics::counter!("cleanup_failures_total", "action" => "cancel_payment")
                .increment(1);
            tracing::warn!(
                %rental_uid,
                payment_uid = %rental.payment_uid,
                %error,
                "payment voiding failed after cancellation"
            );
        }
        Ok(())
    }

    /// Finishes a rental: ledger transition, then best-effort car release.
    /// The payment stays `PAID`; a finished rental is a paid transaction.
    #[tracing::instrument(skip(self, username))]
    pub async fn finish_rental(
        &self,
        rental_uid: RentalId,
        username: &Username,
    ) -> Result<(), RentalError> {
        metrics::counter!("rental_workflows_total", "workflow" => "finish").increment(1);

        let rental = self.fetch_owned(rental_uid, username).await?;

        self.ledger
            .finish_rental(rental_uid, username)
            .await
            .map_err(|error| match error {
                ClientError::NotFound => RentalError::RentalNotFound(rental_uid),
                other => RentalError::FinishFailed(other),
            })?;

        self.release_car_best_effort(rental_uid, rental.car_uid).await;
        Ok(())
    }

    /// Fetches one rental enriched with car and payment summaries.
    pub async fn get_rental(
        &self,
        rental_uid: RentalId,
        username: &Username,
    ) -> Result<RentalView, RentalError> {
        let rental = self.fetch_owned(rental_uid, username).await?;
        Ok(self.enrich(rental).await)
    }

    /// Lists the caller's rentals, each enriched with car and payment
    /// summaries.
    pub async fn list_rentals(&self, username: &Username) -> Result<Vec<RentalView>, RentalError> {
        let rentals = self
            .ledger
            .list_rentals(username)
            .await
            .map_err(RentalError::Ledger)?;
        Ok(join_all(rentals.into_iter().map(|rental| self.enrich(rental))).await)
    }

    async fn fetch_owned(
        &self,
        rental_uid: RentalId,
        username: &Username,
    ) -> Result<Rental, RentalError> {
        self.ledger
            .get_rental(rental_uid, username)
            .await
            .map_err(|error| match error {
                ClientError::NotFound => RentalError::RentalNotFound(rental_uid),
                other => RentalError::Ledger(other),
            })
    }

    async fn release_car_best_effort(&self, rental_uid: RentalId, car_uid: CarId) {
        if let Err(error) = self.inventory.release(car_uid).await {
            metrics::counter!("cleanup_failures_total", "action" => "release_car").increment(1);
            tracing::warn!(%rental_uid, %car_uid, %error, "car release failed after transition");
        }
    }

    /// Composes a rental view, degrading to identifier-only summaries when
    /// an enrichment lookup fails.
    async fn enrich(&self, rental: Rental) -> RentalView {
        let (car, payment) = tokio::join!(
            self.inventory.get_car(rental.car_uid),
            self.payment.get_payment(rental.payment_uid)
        );

        let car = match car {
            Ok(car) => CarSummary::from(&car),
            Err(error) => {
                tracing::warn!(car_uid = %rental.car_uid, %error, "car enrichment degraded");
                CarSummary::placeholder(rental.car_uid)
            }
        };
        let payment = match payment {
            Ok(payment) => PaymentSummary::from(&payment),
            Err(error) => {
                tracing::warn!(
                    payment_uid = %rental.payment_uid,
                    %error,
                    "payment enrichment degraded"
                );
                PaymentSummary::placeholder(rental.payment_uid)
            }
        };

        RentalView {
            rental_uid: rental.rental_uid,
            status: rental.status,
            date_from: rental.date_from,
            date_to: rental.date_to,
            car,
            payment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clients::{InMemoryInventoryClient, InMemoryLedgerClient, InMemoryPaymentClient};
    use domain::{Car, CarType, PaymentStatus, RentalStatus};

    type TestOrchestrator =
        RentalOrchestrator<InMemoryInventoryClient, InMemoryPaymentClient, InMemoryLedgerClient>;

    fn setup() -> (
        TestOrchestrator,
        InMemoryInventoryClient,
        InMemoryPaymentClient,
        InMemoryLedgerClient,
    ) {
        let inventory = InMemoryInventoryClient::new();
        let payment = InMemoryPaymentClient::new();
        let ledger = InMemoryLedgerClient::new();
        let orchestrator =
            RentalOrchestrator::new(inventory.clone(), payment.clone(), ledger.clone());
        (orchestrator, inventory, payment, ledger)
    }

    fn seed_car(inventory: &InMemoryInventoryClient, price: i64) -> CarId {
        let car = Car {
            car_uid: CarId::new(),
            brand: "Mercedes Benz".to_string(),
            model: "GLA 250".to_string(),
            registration_number: "ЛО777Х799".to_string(),
            power: Some(249),
            price,
            car_type: CarType::Sedan,
            available: true,
        };
        let id = car.car_uid;
        inventory.add_car(car);
        id
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_create_happy_path_prices_and_reserves() {
        let (orchestrator, inventory, payments, ledger) = setup();
        let car_uid = seed_car(&inventory, 100);

        let created = orchestrator
            .create_rental(
                Username::new("alice"),
                car_uid,
                date(2021, 10, 8),
                date(2021, 10, 11),
            )
            .await
            .unwrap();

        assert_eq!(created.status, RentalStatus::InProgress);
        assert_eq!(created.payment.price, 300);
        assert_eq!(created.payment.status, PaymentStatus::Paid);
        assert!(!inventory.car(car_uid).unwrap().available);
        assert_eq!(ledger.rental_count(), 1);
        assert_eq!(payments.payment_count(), 1);
    }

    #[tokio::test]
    async fn test_create_unknown_car_commits_nothing() {
        let (orchestrator, _, payments, ledger) = setup();

        let result = orchestrator
            .create_rental(
                Username::new("alice"),
                CarId::new(),
                date(2021, 10, 8),
                date(2021, 10, 11),
            )
            .await;

        assert!(matches!(result, Err(RentalError::CarNotFound(_))));
        assert_eq!(payments.payment_count(), 0);
        assert_eq!(ledger.rental_count(), 0);
    }

    #[tokio::test]
    async fn test_create_payment_failure_needs_no_compensation() {
        let (orchestrator, inventory, payments, ledger) = setup();
        let car_uid = seed_car(&inventory, 100);
        payments.set_fail_on_create(true);

        let result = orchestrator
            .create_rental(
                Username::new("alice"),
                car_uid,
                date(2021, 10, 8),
                date(2021, 10, 11),
            )
            .await;

        assert!(matches!(result, Err(RentalError::PaymentFailed(_))));
        assert!(inventory.car(car_uid).unwrap().available);
        assert_eq!(ledger.rental_count(), 0);
    }

    #[tokio::test]
    async fn test_reservation_failure_cancels_the_payment() {
        let (orchestrator, inventory, payments, ledger) = setup();
        let car_uid = seed_car(&inventory, 100);
        inventory.set_fail_on_reserve(true);

        let result = orchestrator
            .create_rental(
                Username::new("alice"),
                car_uid,
                date(2021, 10, 8),
                date(2021, 10, 11),
            )
            .await;

        assert!(matches!(result, Err(RentalError::ReservationFailed(_))));
        assert_eq!(ledger.rental_count(), 0);

        // The payment record exists but ended up voided.
        assert_eq!(payments.payment_count(), 1);
        let payment_uid = payments.payment_ids().into_iter().next().expect("one payment");
        assert_eq!(
            payments.payment(payment_uid).unwrap().status,
            PaymentStatus::Canceled
        );
    }

    #[tokio::test]
    async fn test_ledger_failure_releases_car_and_cancels_payment() {
        let (orchestrator, inventory, payments, ledger) = setup();
        let car_uid = seed_car(&inventory, 100);
        ledger.set_fail_on_create(true);

        let result = orchestrator
            .create_rental(
                Username::new("alice"),
                car_uid,
                date(2021, 10, 8),
                date(2021, 10, 11),
            )
            .await;

        assert!(matches!(result, Err(RentalError::RentalCreationFailed(_))));
        assert_eq!(ledger.rental_count(), 0);
        assert!(inventory.car(car_uid).unwrap().available);

        let payment_uid = payments.payment_ids().into_iter().next().expect("one payment");
        assert_eq!(
            payments.payment(payment_uid).unwrap().status,
            PaymentStatus::Canceled
        );
    }

    #[tokio::test]
    async fn test_create_on_reserved_car_fails_fast() {
        let (orchestrator, inventory, payments, _) = setup();
        let car_uid = seed_car(&inventory, 100);
        inventory.reserve(car_uid).await.unwrap();

        let result = orchestrator
            .create_rental(
                Username::new("alice"),
                car_uid,
                date(2021, 10, 8),
                date(2021, 10, 11),
            )
            .await;

        assert!(matches!(result, Err(RentalError::CarUnavailable(_))));
        assert_eq!(payments.payment_count(), 0);
    }

    #[tokio::test]
    async fn test_cancel_releases_car_and_voids_payment() {
        let (orchestrator, inventory, payments, ledger) = setup();
        let car_uid = seed_car(&inventory, 100);
        let alice = Username::new("alice");

        let created = orchestrator
            .create_rental(alice.clone(), car_uid, date(2021, 10, 8), date(2021, 10, 11))
            .await
            .unwrap();

        orchestrator
            .cancel_rental(created.rental_uid, &alice)
            .await
            .unwrap();

        assert_eq!(
            ledger.rental(created.rental_uid).unwrap().status,
            RentalStatus::Canceled
        );
        assert!(inventory.car(car_uid).unwrap().available);
        assert_eq!(
            payments.payment(created.payment.payment_uid).unwrap().status,
            PaymentStatus::Canceled
        );
    }

    #[tokio::test]
    async fn test_cancel_succeeds_even_when_cleanup_fails() {
        let (orchestrator, inventory, payments, ledger) = setup();
        let car_uid = seed_car(&inventory, 100);
        let alice = Username::new("alice");

        let created = orchestrator
            .create_rental(alice.clone(), car_uid, date(2021, 10, 8), date(2021, 10, 11))
            .await
            .unwrap();

        inventory.set_fail_on_release(true);
        payments.set_fail_on_cancel(true);

        // The ledger transition is authoritative: cleanup failures are
        // reported, not escalated.
        orchestrator
            .cancel_rental(created.rental_uid, &alice)
            .await
            .unwrap();
        assert_eq!(
            ledger.rental(created.rental_uid).unwrap().status,
            RentalStatus::Canceled
        );
        assert!(!inventory.car(car_uid).unwrap().available);
    }

    #[tokio::test]
    async fn test_finish_keeps_the_payment_paid() {
        let (orchestrator, inventory, payments, ledger) = setup();
        let car_uid = seed_car(&inventory, 100);
        let alice = Username::new("alice");

        let created = orchestrator
            .create_rental(alice.clone(), car_uid, date(2021, 10, 8), date(2021, 10, 11))
            .await
            .unwrap();

        orchestrator
            .finish_rental(created.rental_uid, &alice)
            .await
            .unwrap();

        assert_eq!(
            ledger.rental(created.rental_uid).unwrap().status,
            RentalStatus::Finished
        );
        assert!(inventory.car(car_uid).unwrap().available);
        assert_eq!(
            payments.payment(created.payment.payment_uid).unwrap().status,
            PaymentStatus::Paid
        );
    }

    #[tokio::test]
    async fn test_get_returns_enriched_view() {
        let (orchestrator, inventory, _, _) = setup();
        let car_uid = seed_car(&inventory, 100);
        let alice = Username::new("alice");

        let created = orchestrator
            .create_rental(alice.clone(), car_uid, date(2021, 10, 8), date(2021, 10, 11))
            .await
            .unwrap();

        let view = orchestrator
            .get_rental(created.rental_uid, &alice)
            .await
            .unwrap();
        assert_eq!(view.status, RentalStatus::InProgress);
        assert_eq!(view.car.car_uid, car_uid);
        assert_eq!(view.car.brand, "Mercedes Benz");
        assert_eq!(view.payment.payment_uid, created.payment.payment_uid);
        assert_eq!(view.payment.price, 300);
    }

    #[tokio::test]
    async fn test_ownership_is_opaque_not_found() {
        let (orchestrator, inventory, _, _) = setup();
        let car_uid = seed_car(&inventory, 100);
        let alice = Username::new("alice");
        let bob = Username::new("bob");

        let created = orchestrator
            .create_rental(alice, car_uid, date(2021, 10, 8), date(2021, 10, 11))
            .await
            .unwrap();

        assert!(matches!(
            orchestrator.get_rental(created.rental_uid, &bob).await,
            Err(RentalError::RentalNotFound(_))
        ));
        assert!(matches!(
            orchestrator.cancel_rental(created.rental_uid, &bob).await,
            Err(RentalError::RentalNotFound(_))
        ));
        assert!(matches!(
            orchestrator.finish_rental(created.rental_uid, &bob).await,
            Err(RentalError::RentalNotFound(_))
        ));
    }
}
