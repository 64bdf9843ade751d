//! Health check endpoint.

use axum::{Json, extract::State};
use tracing::warn;

use graphcount_core::traits::{GraphCatalog, GraphCountProvider, StatsCache};

use crate::dto::{HealthResponse, ServiceStatus};
use crate::state::AppState;

/// Health check endpoint.
///
/// Always answers 200; an unreachable catalog database reports `degraded`.
pub async fn health_check<C, P, S>(State(state): State<AppState<C, P, S>>) -> Json<HealthResponse>
where
    C: GraphCatalog,
    P: GraphCountProvider,
    S: StatsCache,
{
    let database = match state.catalog.health_check().await {
        Ok(()) => ServiceStatus {
            healthy: true,
            message: None,
        },
        Err(e) => {
            warn!(error = %e, "catalog database health check failed");
            ServiceStatus {
                healthy: false,
                message: Some(e.to_string()),
            }
        }
    };

    let status = if database.healthy { "healthy" } else { "degraded" };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
    })
}
