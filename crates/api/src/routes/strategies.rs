//! Strategy registry endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use common::Strategy;
use event_store::EventStore;
use gateway::{GatewayError, StrategyCollection, StrategyService};
use projections::{CurrentStrategiesView, ProjectionProcessor};

use crate::error::ApiError;
use crate::identity::extract_identity;

/// Shared application state accessible from all handlers.
pub struct AppState<S: EventStore> {
    pub service: StrategyService<S, CurrentStrategiesView>,
    pub current_strategies: Arc<CurrentStrategiesView>,
    pub projection_processor: Arc<ProjectionProcessor<S>>,
    pub identity_header: String,
}

/// Brings the read-side view up to date with the event log.
///
/// Stands in for the external subscription that would maintain the
/// projection in a deployed system. Deliberately not atomic with anything
/// the handlers do afterwards: a concurrent command may append between this
/// replay and a handler's precondition check.
async fn sync_projection<S: EventStore>(state: &AppState<S>) -> Result<(), ApiError> {
    state
        .projection_processor
        .run_catch_up()
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))
}

/// GET /strategies — list all strategies with the schema-version marker.
#[tracing::instrument(skip(state))]
pub async fn list<S: EventStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<StrategyCollection>, ApiError> {
    sync_projection(&state).await?;
    Ok(Json(state.service.list_strategies().await))
}

/// GET /strategies/{name} — fetch a single strategy.
#[tracing::instrument(skip(state))]
pub async fn get<S: EventStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(name): Path<String>,
) -> Result<Json<Strategy>, ApiError> {
    sync_projection(&state).await?;
    let strategy = state.service.get_strategy(&name).await?;
    Ok(Json(strategy))
}

/// POST /strategies — create a strategy, recording who asked for it.
#[tracing::instrument(skip(state, headers, strategy))]
pub async fn create<S: EventStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
    Json(strategy): Json<Strategy>,
) -> Result<StatusCode, ApiError> {
    sync_projection(&state).await?;
    let created_by = extract_identity(&headers, &state.identity_header);
    state.service.create_strategy(strategy, &created_by).await?;
    Ok(StatusCode::CREATED)
}

/// DELETE /strategies/{name} — delete a strategy.
///
/// A missing strategy maps to a bodyless 404 and is not logged; the
/// outcome is benign by design.
#[tracing::instrument(skip(state, headers))]
pub async fn delete<S: EventStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    sync_projection(&state).await?;
    let created_by = extract_identity(&headers, &state.identity_header);
    match state.service.delete_strategy(&name, &created_by).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(GatewayError::NotFound { .. }) => Err(ApiError::NotFoundNoBody),
        Err(err) => Err(err.into()),
    }
}
