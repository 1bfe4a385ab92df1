//! HTTP gateway for the car-rental platform.
//!
//! Exposes the rental workflows over REST with structured logging (tracing)
//! and Prometheus metrics. The gateway performs no authentication: the
//! caller identity is the opaque `X-User-Name` header value, forwarded
//! verbatim to the ledger.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use clients::{InventoryClient, LedgerClient, PaymentClient};
use metrics_exporter_prometheus::PrometheusHandle;
use orchestrator::RentalOrchestrator;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state accessible from all handlers.
pub struct AppState<I, P, L>
where
    I: InventoryClient,
    P: PaymentClient,
    L: LedgerClient,
{
    pub orchestrator: RentalOrchestrator<I, P, L>,
    pub inventory: I,
}

impl<I, P, L> AppState<I, P, L>
where
    I: InventoryClient + Clone,
    P: PaymentClient,
    L: LedgerClient,
{
    /// Builds the state over one set of downstream clients. The inventory
    /// client is shared between the orchestrator and the catalogue
    /// passthrough route.
    pub fn new(inventory: I, payment: P, ledger: L) -> Self {
        Self {
            orchestrator: RentalOrchestrator::new(inventory.clone(), payment, ledger),
            inventory,
        }
    }
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<I, P, L>(
    state: Arc<AppState<I, P, L>>,
    metrics_handle: PrometheusHandle,
) -> Router
where
    I: InventoryClient + 'static,
    P: PaymentClient + 'static,
    L: LedgerClient + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/manage/health", get(routes::health::check))
        .route("/api/v1/cars", get(routes::cars::list::<I, P, L>))
        .route(
            "/api/v1/rental",
            post(routes::rentals::create::<I, P, L>).get(routes::rentals::list::<I, P, L>),
        )
        .route(
            "/api/v1/rental/{id}",
            get(routes::rentals::get::<I, P, L>).delete(routes::rentals::cancel::<I, P, L>),
        )
        .route(
            "/api/v1/rental/{id}/finish",
            post(routes::rentals::finish::<I, P, L>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
