//! Graph statistics endpoints.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use tracing::warn;

use graphcount_core::AppError;
use graphcount_core::traits::{GraphCatalog, GraphCountProvider, StatsCache};

use crate::dto::{
    GraphPropertiesDto, GraphPropertiesResponse, GraphTotalsDto, GraphTotalsResponse, Res,
    RollupResponse,
};
use crate::error::ApiError;
use crate::state::AppState;

/// Fleet-wide rollup, served from the precomputed cache entry.
///
/// An unreachable cache or a missing entry answers 200 with the error
/// payload in the body. The rollup is never computed on the request path.
pub async fn get_rollup<C, P, S>(State(state): State<AppState<C, P, S>>) -> Response
where
    C: GraphCatalog,
    P: GraphCountProvider,
    S: StatsCache,
{
    match state.stats_service.cached_rollup().await {
        Ok(rollup) => Json(RollupResponse::new(rollup)).into_response(),
        Err(e) => {
            warn!(error = %e, "serving degraded rollup response");
            ApiError::from(e).into_degraded_response()
        }
    }
}

/// Simple totals for one graph.
///
/// A graph engine that refuses the count query yields `"--"` placeholders
/// rather than an error response.
pub async fn get_graph_totals<C, P, S>(
    State(state): State<AppState<C, P, S>>,
    Path(graph_id): Path<String>,
) -> Result<Json<GraphTotalsResponse>, ApiError>
where
    C: GraphCatalog,
    P: GraphCountProvider,
    S: StatsCache,
{
    match state.stats_service.graph_totals(&graph_id).await {
        Ok(totals) => Ok(Json(Res::new(GraphTotalsDto::from(totals)))),
        Err(AppError::ProviderError { code, message }) => {
            warn!(%graph_id, %code, %message, "graph engine refused count query");
            Ok(Json(Res::new(GraphTotalsDto::unavailable())))
        }
        Err(e) => Err(ApiError::from(e)),
    }
}

/// Arity-weighted property statistics for one graph.
pub async fn get_graph_properties<C, P, S>(
    State(state): State<AppState<C, P, S>>,
    Path(graph_id): Path<String>,
) -> Result<Json<GraphPropertiesResponse>, ApiError>
where
    C: GraphCatalog,
    P: GraphCountProvider,
    S: StatsCache,
{
    match state.stats_service.graph_properties(&graph_id).await {
        Ok(aggregate) => Ok(Json(Res::new(GraphPropertiesDto::from(aggregate)))),
        Err(AppError::ProviderError { code, message }) => {
            warn!(%graph_id, %code, %message, "graph engine refused count query");
            Ok(Json(Res::new(GraphPropertiesDto::unavailable())))
        }
        Err(e) => Err(ApiError::from(e)),
    }
}
