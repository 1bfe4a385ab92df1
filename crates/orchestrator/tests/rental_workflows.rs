//! Integration tests for the rental workflows.

use std::sync::Arc;

use chrono::NaiveDate;
use clients::{
    InMemoryInventoryClient, InMemoryLedgerClient, InMemoryPaymentClient, LedgerClient, NewRental,
};
use common::{CarId, PaymentId, Username};
use domain::{Car, CarType, PaymentStatus, RentalStatus};
use orchestrator::{RentalError, RentalOrchestrator};

type TestOrchestrator =
    RentalOrchestrator<InMemoryInventoryClient, InMemoryPaymentClient, InMemoryLedgerClient>;

struct TestHarness {
    orchestrator: Arc<TestOrchestrator>,
    inventory: InMemoryInventoryClient,
    payments: InMemoryPaymentClient,
    ledger: InMemoryLedgerClient,
}

impl TestHarness {
    fn new() -> Self {
        let inventory = InMemoryInventoryClient::new();
        let payments = InMemoryPaymentClient::new();
        let ledger = InMemoryLedgerClient::new();
        let orchestrator = Arc::new(RentalOrchestrator::new(
            inventory.clone(),
            payments.clone(),
            ledger.clone(),
        ));
        Self {
            orchestrator,
            inventory,
            payments,
            ledger,
        }
    }

    fn seed_car(&self, price: i64) -> CarId {
        let car = Car {
            car_uid: CarId::new(),
            brand: "Skoda".to_string(),
            model: "Octavia".to_string(),
            registration_number: "В567ГД78".to_string(),
            power: Some(150),
            price,
            car_type: CarType::Suv,
            available: true,
        };
        let id = car.car_uid;
        self.inventory.add_car(car);
        id
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_full_lifecycle_create_list_get() {
    let harness = TestHarness::new();
    let alice = Username::new("alice");

    let first_car = harness.seed_car(2000);
    let second_car = harness.seed_car(3000);
    let bobs_car = harness.seed_car(1000);

    let first = harness
        .orchestrator
        .create_rental(alice.clone(), first_car, date(2024, 7, 1), date(2024, 7, 3))
        .await
        .unwrap();
    harness
        .orchestrator
        .create_rental(alice.clone(), second_car, date(2024, 7, 1), date(2024, 7, 5))
        .await
        .unwrap();
    harness
        .orchestrator
        .create_rental(Username::new("bob"), bobs_car, date(2024, 7, 1), date(2024, 7, 2))
        .await
        .unwrap();

    let listed = harness.orchestrator.list_rentals(&alice).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|v| v.status == RentalStatus::InProgress));
    assert!(listed.iter().all(|v| !v.car.brand.is_empty()));

    let view = harness
        .orchestrator
        .get_rental(first.rental_uid, &alice)
        .await
        .unwrap();
    assert_eq!(view.rental_uid, first.rental_uid);
    assert_eq!(view.car.car_uid, first_car);
    assert_eq!(view.payment.payment_uid, first.payment.payment_uid);
    assert_eq!(view.payment.price, 2 * 2000);
}

#[tokio::test]
async fn test_enrichment_degrades_to_known_identifiers() {
    let harness = TestHarness::new();
    let alice = Username::new("alice");

    // A ledger record whose car and payment are unknown downstream.
    let orphan = harness
        .ledger
        .create_rental(NewRental {
            username: alice.clone(),
            payment_uid: PaymentId::new(),
            car_uid: CarId::new(),
            date_from: date(2024, 7, 1),
            date_to: date(2024, 7, 3),
        })
        .await
        .unwrap();

    let view = harness
        .orchestrator
        .get_rental(orphan.rental_uid, &alice)
        .await
        .unwrap();

    assert_eq!(view.car.car_uid, orphan.car_uid);
    assert!(view.car.brand.is_empty());
    assert_eq!(view.payment.payment_uid, orphan.payment_uid);
    assert_eq!(view.payment.status, PaymentStatus::Paid);
    assert_eq!(view.payment.price, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_racing_creates_book_the_car_at_most_once() {
    for _ in 0..25 {
        let harness = TestHarness::new();
        let car_uid = harness.seed_car(100);

        let first = harness.orchestrator.clone();
        let second = harness.orchestrator.clone();
        let (a, b) = tokio::join!(
            tokio::spawn(async move {
                first
                    .create_rental(
                        Username::new("alice"),
                        car_uid,
                        date(2024, 7, 1),
                        date(2024, 7, 2),
                    )
                    .await
            }),
            tokio::spawn(async move {
                second
                    .create_rental(
                        Username::new("bob"),
                        car_uid,
                        date(2024, 7, 1),
                        date(2024, 7, 2),
                    )
                    .await
            }),
        );
        let a = a.unwrap();
        let b = b.unwrap();

        let winners = usize::from(a.is_ok()) + usize::from(b.is_ok());
        assert_eq!(winners, 1, "exactly one racing create must win");

        let loser = match (&a, &b) {
            (Err(error), _) | (_, Err(error)) => error,
            _ => unreachable!(),
        };
        assert!(
            matches!(loser, RentalError::CarUnavailable(_)),
            "loser must observe the car as unavailable, got {loser:?}"
        );

        // One rental exists, the car stays reserved, and no stray PAID
        // payment is left behind.
        assert_eq!(harness.ledger.rental_count(), 1);
        assert!(!harness.inventory.car(car_uid).unwrap().available);
        let paid = harness
            .payments
            .payment_ids()
            .into_iter()
            .filter(|id| {
                harness.payments.payment(*id).unwrap().status == PaymentStatus::Paid
            })
            .count();
        assert_eq!(paid, 1);
    }
}

#[tokio::test]
async fn test_cancel_after_finish_is_rejected() {
    let harness = TestHarness::new();
    let alice = Username::new("alice");
    let car_uid = harness.seed_car(100);

    let created = harness
        .orchestrator
        .create_rental(alice.clone(), car_uid, date(2024, 7, 1), date(2024, 7, 2))
        .await
        .unwrap();

    harness
        .orchestrator
        .finish_rental(created.rental_uid, &alice)
        .await
        .unwrap();

    let result = harness
        .orchestrator
        .cancel_rental(created.rental_uid, &alice)
        .await;
    assert!(matches!(result, Err(RentalError::CancelFailed(_))));
    assert_eq!(
        harness.ledger.rental(created.rental_uid).unwrap().status,
        RentalStatus::Finished
    );
}

#[tokio::test]
async fn test_released_car_can_be_rented_again() {
    let harness = TestHarness::new();
    let alice = Username::new("alice");
    let car_uid = harness.seed_car(100);

    let first = harness
        .orchestrator
        .create_rental(alice.clone(), car_uid, date(2024, 7, 1), date(2024, 7, 2))
        .await
        .unwrap();
    harness
        .orchestrator
        .cancel_rental(first.rental_uid, &alice)
        .await
        .unwrap();

    let second = harness
        .orchestrator
        .create_rental(alice.clone(), car_uid, date(2024, 8, 1), date(2024, 8, 2))
        .await
        .unwrap();
    assert_ne!(second.rental_uid, first.rental_uid);
    assert!(!harness.inventory.car(car_uid).unwrap().available);
}
