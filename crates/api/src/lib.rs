//! HTTP API server for the strategy gateway.
//!
//! Exposes the strategy registry command surface over REST, with structured
//! logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod identity;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post};
use event_store::EventStore;
use metrics_exporter_prometheus::PrometheusHandle;
use projections::{CurrentStrategiesView, Projection, ProjectionProcessor};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::strategies::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: EventStore + Clone + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/strategies", get(routes::strategies::list::<S>))
        .route("/strategies", post(routes::strategies::create::<S>))
        .route("/strategies/{name}", get(routes::strategies::get::<S>))
        .route(
            "/strategies/{name}",
            delete(routes::strategies::delete::<S>),
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

/// Creates the default application state: the gateway service wired over
/// the given event log and a replay-maintained strategies view.
pub fn create_default_state<S: EventStore + Clone + 'static>(
    event_store: S,
    config: &config::Config,
) -> (Arc<AppState<S>>, Arc<ProjectionProcessor<S>>) {
    use gateway::StrategyService;

    let current_strategies = Arc::new(CurrentStrategiesView::new());
    let service = StrategyService::new(event_store.clone(), current_strategies.as_ref().clone());

    let mut processor = ProjectionProcessor::new(event_store);
    processor.register(Box::new(current_strategies.as_ref().clone()) as Box<dyn Projection>);
    let processor = Arc::new(processor);

    let state = Arc::new(AppState {
        service,
        current_strategies,
        projection_processor: processor.clone(),
        identity_header: config.identity_header.clone(),
    });

    (state, processor)
}
