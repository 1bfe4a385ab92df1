//! Rental saga constants.

/// The saga type identifier for rental creation.
pub const SAGA_TYPE: &str = "CreateRental";

/// Step name: fetch the car and price the period.
pub const STEP_FETCH_CAR: &str = "fetch_car";

/// Step name: create the payment record.
pub const STEP_CREATE_PAYMENT: &str = "create_payment";

/// Step name: reserve the car.
pub const STEP_RESERVE_CAR: &str = "reserve_car";

/// Step name: create the rental record.
pub const STEP_CREATE_RENTAL: &str = "create_rental";
