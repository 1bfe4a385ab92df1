//! Car entity as owned by the inventory service.

use common::CarId;
use serde::{Deserialize, Serialize};

/// Body style of a car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CarType {
    Sedan,
    Suv,
    Minivan,
    Roadster,
}

impl CarType {
    /// Returns the wire name of the car type.
    pub fn as_str(&self) -> &'static str {
        match self {
            CarType::Sedan => "SEDAN",
            CarType::Suv => "SUV",
            CarType::Minivan => "MINIVAN",
            CarType::Roadster => "ROADSTER",
        }
    }
}

impl std::fmt::Display for CarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A car record as returned by the inventory service.
///
/// The availability flag is true unless the car is held by exactly one
/// in-progress rental; the orchestrator only ever toggles that flag, it
/// never creates or deletes car records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub car_uid: CarId,
    pub brand: String,
    pub model: String,
    pub registration_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<i32>,
    /// Whole-unit price per rental day.
    pub price: i64,
    #[serde(rename = "type")]
    pub car_type: CarType,
    pub available: bool,
}
