//! Fleet-wide rollup over every graph in the catalog.

use tracing::{info, warn};

use crate::aggregate::GraphAggregator;
use crate::error::AppError;
use crate::models::{FleetAggregate, GraphId};
use crate::traits::{GraphCatalog, GraphCountProvider};

/// Sums per-graph simple totals across the whole catalog.
///
/// Graphs are processed one after another, so a rollup takes time linear in
/// the size of the catalog.
pub struct FleetAggregator<C, P>
where
    C: GraphCatalog,
    P: GraphCountProvider,
{
    catalog: C,
    aggregator: GraphAggregator<C, P>,
}

impl<C, P> Clone for FleetAggregator<C, P>
where
    C: GraphCatalog,
    P: GraphCountProvider,
{
    fn clone(&self) -> Self {
        Self {
            catalog: self.catalog.clone(),
            aggregator: self.aggregator.clone(),
        }
    }
}

impl<C, P> FleetAggregator<C, P>
where
    C: GraphCatalog,
    P: GraphCountProvider,
{
    pub fn new(catalog: C, provider: P) -> Self {
        Self {
            aggregator: GraphAggregator::new(catalog.clone(), provider),
            catalog,
        }
    }

    /// Computes the rollup for every graph in the catalog.
    ///
    /// Per-graph provider faults are already recovered as zero counts by
    /// [`GraphAggregator`]. Any error that does surface from a graph (for
    /// example an explicit [`AppError::ProviderError`]) aborts the whole
    /// rollup, and the sums accumulated so far are discarded.
    pub async fn compute_fleet_rollup(&self) -> Result<FleetAggregate, AppError> {
        let graphs = self.catalog.list_all_graphs().await?;

        let mut entities: u64 = 0;
        let mut edges: u64 = 0;
        let mut properties: u64 = 0;
        let mut recovered = 0usize;

        for graph in &graphs {
            let Some(graph_id) = GraphId::new(graph.id) else {
                warn!(id = graph.id, "skipping catalog entry with negative id");
                continue;
            };

            let totals = self.aggregator.compute_simple_totals(graph_id).await?;
            if !totals.source.is_counted() {
                recovered += 1;
            }

            entities = entities.saturating_add(totals.entities);
            edges = edges.saturating_add(totals.edges);
            properties = properties.saturating_add(totals.properties);
        }

        info!(
            graphs = graphs.len(),
            zero_filled = recovered,
            entities,
            edges,
            properties,
            "fleet rollup computed"
        );

        Ok(FleetAggregate::new(entities, edges, properties))
    }
}
