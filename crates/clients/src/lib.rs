//! Typed clients for the three downstream services the gateway coordinates.
//!
//! Each contract is an async trait with two implementations:
//! - an HTTP implementation built on reqwest, constructed from an explicit
//!   base URL and request timeout
//! - an in-memory implementation with per-operation failure injection, used
//!   by workflow tests and local runs
//!
//! The in-memory inventory performs its availability compare under a write
//! lock, so `reserve` has the same conditional-update semantics the HTTP
//! contract requires.

pub mod error;
pub mod http;
pub mod inventory;
pub mod ledger;
pub mod payment;

pub use error::ClientError;
pub use http::{HttpInventoryClient, HttpLedgerClient, HttpPaymentClient};
pub use inventory::{CarPage, InMemoryInventoryClient, InventoryClient};
pub use ledger::{InMemoryLedgerClient, LedgerClient, NewRental};
pub use payment::{InMemoryPaymentClient, PaymentClient};
