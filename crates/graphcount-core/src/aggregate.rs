//! Per-graph aggregation.
//!
//! [`GraphAggregator`] turns the graph engine's raw counts into derived
//! totals. Two formulas coexist and are kept apart on purpose:
//!
//! - [`GraphAggregator::compute_properties`] weights each type's instance
//!   count by its declared property arity.
//! - [`GraphAggregator::compute_simple_totals`] reports `edges + entities` as
//!   its property figure. The fleet rollup and the single-graph endpoint use it.
//!
//! # Example
//!
//! ```ignore
//! use graphcount_core::{GraphAggregator, GraphId};
//!
//! let aggregator = GraphAggregator::new(catalog, engine);
//! let detail = aggregator.compute_properties(GraphId::parse("7")?).await?;
//! println!("{} properties", detail.total_properties);
//! ```

use tracing::{debug, warn};

use crate::error::AppError;
use crate::models::{CountSnapshot, GraphAggregate, GraphId, RawCounts, SimpleTotals};
use crate::traits::{GraphCatalog, GraphCountProvider};

/// Computes statistics for a single graph.
///
/// The graph id is assumed to have been validated by the caller.
pub struct GraphAggregator<C, P>
where
    C: GraphCatalog,
    P: GraphCountProvider,
{
    catalog: C,
    provider: P,
}

impl<C, P> Clone for GraphAggregator<C, P>
where
    C: GraphCatalog,
    P: GraphCountProvider,
{
    fn clone(&self) -> Self {
        Self {
            catalog: self.catalog.clone(),
            provider: self.provider.clone(),
        }
    }
}

impl<C, P> GraphAggregator<C, P>
where
    C: GraphCatalog,
    P: GraphCountProvider,
{
    pub fn new(catalog: C, provider: P) -> Self {
        Self { catalog, provider }
    }

    /// Fetches the raw counts for a graph with a single provider call.
    ///
    /// Zero-count snapshots are returned instead of errors when:
    /// - the catalog lookup fails ([`crate::CountSource::CatalogUnavailable`]);
    /// - the catalog has no record for the graph, or the record has no
    ///   backing database name ([`crate::CountSource::Unassigned`]);
    /// - the provider faults ([`crate::CountSource::Recovered`]).
    ///
    /// # Errors
    ///
    /// An explicit [`AppError::ProviderError`] is forwarded unchanged.
    pub async fn fetch_raw_counts(&self, graph_id: GraphId) -> Result<CountSnapshot, AppError> {
        let record = match self.catalog.get_graph_by_id(graph_id).await {
            Ok(record) => record,
            Err(err) => {
                warn!(%graph_id, error = %err, "catalog lookup failed, reporting zero counts");
                return Ok(CountSnapshot::catalog_unavailable(err.to_string()));
            }
        };

        let Some(record) = record else {
            debug!(%graph_id, "graph missing from catalog, reporting zero counts");
            return Ok(CountSnapshot::unassigned());
        };

        let Some(db_name) = record.assigned_db_name() else {
            debug!(%graph_id, "graph has no backing database, reporting zero counts");
            return Ok(CountSnapshot::unassigned());
        };

        match self.provider.count(&record, db_name).await {
            Ok(engine_counts) => Ok(CountSnapshot::counted(RawCounts::from(engine_counts))),
            Err(err) if err.is_provider_fault() => {
                warn!(%graph_id, db_name, error = %err, "graph engine fault, reporting zero counts");
                Ok(CountSnapshot::recovered(err.to_string()))
            }
            Err(err) => Err(err),
        }
    }

    /// Computes arity-weighted property totals for a graph.
    ///
    /// `edges` and `entities` are the provider's raw totals.
    pub async fn compute_properties(&self, graph_id: GraphId) -> Result<GraphAggregate, AppError> {
        let snapshot = self.fetch_raw_counts(graph_id).await?;
        Ok(GraphAggregate::from(snapshot))
    }

    /// Computes simple totals for a graph, where `properties = edges + entities`.
    pub async fn compute_simple_totals(&self, graph_id: GraphId) -> Result<SimpleTotals, AppError> {
        let snapshot = self.fetch_raw_counts(graph_id).await?;
        Ok(SimpleTotals::from(snapshot))
    }
}
