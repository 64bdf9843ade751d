//! Router configuration and route composition.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, Method};
use axum::{Router, routing::get};
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::warn;

use graphcount_core::traits::{GraphCatalog, GraphCountProvider, StatsCache};

use crate::config::ServerConfig;
use crate::handlers::{graph_count, health};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// Rate limiting keys on the peer address, so the router must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()` when
/// `rate_limit_rps` is non-zero.
pub fn create_router<C, P, S>(state: AppState<C, P, S>, config: &ServerConfig) -> Router
where
    C: GraphCatalog + 'static,
    P: GraphCountProvider + 'static,
    S: StatsCache + 'static,
{
    let api_routes = Router::new()
        .route("/health", get(health::health_check::<C, P, S>))
        .route("/graph-count", get(graph_count::get_rollup::<C, P, S>))
        .route("/graph-count/", get(graph_count::get_rollup::<C, P, S>))
        .route(
            "/graph-count/:graph_id",
            get(graph_count::get_graph_totals::<C, P, S>),
        )
        .route(
            "/graph-count/:graph_id/properties",
            get(graph_count::get_graph_properties::<C, P, S>),
        );

    let cors_layer = build_cors_layer(&config.cors_origins);

    let router = Router::new()
        .nest("/api/v1", api_routes)
        // Middleware layers (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer);

    if config.rate_limit_rps == 0 {
        return router.with_state(state);
    }

    // Configure rate limiting (Arc required for cloning in layers)
    let Some(governor_config) = GovernorConfigBuilder::default()
        .per_second(config.rate_limit_rps.into())
        .burst_size(config.rate_limit_burst.max(1))
        .finish()
    else {
        warn!(
            rps = config.rate_limit_rps,
            burst = config.rate_limit_burst,
            "invalid rate limit configuration, rate limiting disabled"
        );
        return router.with_state(state);
    };

    router
        .layer(GovernorLayer {
            config: Arc::new(governor_config),
        })
        .with_state(state)
}

/// Build CORS layer from configuration.
///
/// If `origins` is "*", allows any origin (for development).
/// Otherwise, parses comma-separated origins.
fn build_cors_layer(origins: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .max_age(Duration::from_secs(3600));

    if origins == "*" {
        cors.allow_origin(tower_http::cors::Any)
    } else {
        let allowed: Vec<HeaderValue> = origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors.allow_origin(allowed)
    }
}
