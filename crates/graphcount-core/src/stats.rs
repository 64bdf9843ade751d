//! Boundary-facing statistics service.
//!
//! [`GraphStatsService`] is what the HTTP server and the CLI call. It
//! validates raw graph ids, checks them against the catalog, and delegates to
//! the aggregators or the rollup cache.

use tracing::debug;

use crate::aggregate::GraphAggregator;
use crate::error::AppError;
use crate::fleet::FleetAggregator;
use crate::models::{FleetAggregate, GraphAggregate, GraphId, SimpleTotals};
use crate::traits::{GraphCatalog, GraphCountProvider, StatsCache};

/// Statistics facade over the catalog, the graph engine and the rollup cache.
pub struct GraphStatsService<C, P, S>
where
    C: GraphCatalog,
    P: GraphCountProvider,
    S: StatsCache,
{
    catalog: C,
    aggregator: GraphAggregator<C, P>,
    fleet: FleetAggregator<C, P>,
    cache: S,
}

impl<C, P, S> Clone for GraphStatsService<C, P, S>
where
    C: GraphCatalog,
    P: GraphCountProvider,
    S: StatsCache,
{
    fn clone(&self) -> Self {
        Self {
            catalog: self.catalog.clone(),
            aggregator: self.aggregator.clone(),
            fleet: self.fleet.clone(),
            cache: self.cache.clone(),
        }
    }
}

impl<C, P, S> GraphStatsService<C, P, S>
where
    C: GraphCatalog,
    P: GraphCountProvider,
    S: StatsCache,
{
    pub fn new(catalog: C, provider: P, cache: S) -> Self {
        Self {
            aggregator: GraphAggregator::new(catalog.clone(), provider.clone()),
            fleet: FleetAggregator::new(catalog.clone(), provider),
            catalog,
            cache,
        }
    }

    /// Reads the precomputed fleet rollup from the cache.
    ///
    /// No retry is attempted; callers turn [`AppError::CacheUnavailable`] into
    /// a degraded response.
    pub async fn cached_rollup(&self) -> Result<FleetAggregate, AppError> {
        self.cache.read_rollup().await
    }

    /// Computes the fleet rollup live, bypassing the cache.
    pub async fn fleet_rollup(&self) -> Result<FleetAggregate, AppError> {
        self.fleet.compute_fleet_rollup().await
    }

    /// Simple totals for one graph, addressed by a raw path segment.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidGraphId`] if `raw_id` is not a non-negative
    ///   integer. The catalog is not consulted.
    /// - [`AppError::GraphNotFound`] if the catalog does not know the id.
    /// - Any error from [`GraphAggregator::compute_simple_totals`].
    pub async fn graph_totals(&self, raw_id: &str) -> Result<SimpleTotals, AppError> {
        let graph_id = self.resolve(raw_id).await?;
        self.aggregator.compute_simple_totals(graph_id).await
    }

    /// Arity-weighted statistics for one graph, addressed by a raw path segment.
    ///
    /// Validation is identical to [`Self::graph_totals`].
    pub async fn graph_properties(&self, raw_id: &str) -> Result<GraphAggregate, AppError> {
        let graph_id = self.resolve(raw_id).await?;
        self.aggregator.compute_properties(graph_id).await
    }

    async fn resolve(&self, raw_id: &str) -> Result<GraphId, AppError> {
        let graph_id = GraphId::parse(raw_id)?;
        if !self.catalog.graph_exists(graph_id).await? {
            debug!(%graph_id, "graph id unknown to catalog");
            return Err(AppError::GraphNotFound(graph_id.get()));
        }
        Ok(graph_id)
    }
}
