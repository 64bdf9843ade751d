use graphcount_client::{GraphEngineClient, RedisStatsCache};
use graphcount_core::traits::{GraphCatalog, GraphCountProvider, StatsCache};
use graphcount_core::GraphStatsService;
use graphcount_db::GraphRepository;

/// Shared application state for all handlers.
///
/// Generic over the collaborator traits so the router can be exercised with
/// in-memory implementations; the defaults are the production types.
/// Axum clones this per request; every field is a cheap handle.
#[derive(Clone)]
pub struct AppState<C = GraphRepository, P = GraphEngineClient, S = RedisStatsCache>
where
    C: GraphCatalog,
    P: GraphCountProvider,
    S: StatsCache,
{
    /// Statistics service for rollup and per-graph queries
    pub stats_service: GraphStatsService<C, P, S>,

    /// Graph catalog, used directly by the health check
    pub catalog: C,
}

impl AppState {
    /// Creates the production state over a catalog connection pool.
    pub fn new(pool: sqlx::PgPool, engine: GraphEngineClient, cache: RedisStatsCache) -> Self {
        Self::from_parts(GraphRepository::new(pool), engine, cache)
    }
}

impl<C, P, S> AppState<C, P, S>
where
    C: GraphCatalog,
    P: GraphCountProvider,
    S: StatsCache,
{
    /// Creates a state from already constructed collaborators.
    pub fn from_parts(catalog: C, provider: P, cache: S) -> Self {
        Self {
            stats_service: GraphStatsService::new(catalog.clone(), provider, cache),
            catalog,
        }
    }
}
