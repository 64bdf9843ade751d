//! Response DTOs for API endpoints.

use serde::Serialize;

use graphcount_core::{FleetAggregate, GraphAggregate, SimpleTotals};

/// Placeholder rendered in place of counts the graph engine refused to give.
pub const UNAVAILABLE: &str = "--";

/// Envelope wrapping every successful statistics payload.
#[derive(Debug, Serialize)]
pub struct Res<T> {
    pub res: T,
}

impl<T> Res<T> {
    pub fn new(res: T) -> Self {
        Self { res }
    }
}

/// Fleet rollup response body: `{res: {entities, edges, pro, all}}`.
pub type RollupResponse = Res<FleetAggregate>;

// =============================================================================
// Health
// =============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,
    /// Server version
    pub version: String,
    /// Catalog database connectivity status
    pub database: ServiceStatus,
}

/// Status of an individual service component.
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// =============================================================================
// Per-graph statistics
// =============================================================================

/// A count, or the `"--"` placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Count(u64),
    Unavailable(&'static str),
}

impl StatValue {
    pub fn unavailable() -> Self {
        Self::Unavailable(UNAVAILABLE)
    }
}

impl From<u64> for StatValue {
    fn from(n: u64) -> Self {
        Self::Count(n)
    }
}

/// Simple totals for one graph.
#[derive(Debug, Serialize)]
pub struct GraphTotalsDto {
    pub entity_pro: StatValue,
    pub edge_pro: StatValue,
    pub pros: StatValue,
}

impl GraphTotalsDto {
    pub fn unavailable() -> Self {
        Self {
            entity_pro: StatValue::unavailable(),
            edge_pro: StatValue::unavailable(),
            pros: StatValue::unavailable(),
        }
    }
}

impl From<SimpleTotals> for GraphTotalsDto {
    fn from(t: SimpleTotals) -> Self {
        Self {
            entity_pro: t.entities.into(),
            edge_pro: t.edges.into(),
            pros: t.properties.into(),
        }
    }
}

/// Arity-weighted statistics for one graph.
#[derive(Debug, Serialize)]
pub struct GraphPropertiesDto {
    pub edges: StatValue,
    pub entities: StatValue,
    pub edge_pro: StatValue,
    pub entity_pro: StatValue,
    pub pros: StatValue,
}

impl GraphPropertiesDto {
    pub fn unavailable() -> Self {
        Self {
            edges: StatValue::unavailable(),
            entities: StatValue::unavailable(),
            edge_pro: StatValue::unavailable(),
            entity_pro: StatValue::unavailable(),
            pros: StatValue::unavailable(),
        }
    }
}

impl From<GraphAggregate> for GraphPropertiesDto {
    fn from(a: GraphAggregate) -> Self {
        Self {
            edges: a.edges.into(),
            entities: a.entities.into(),
            edge_pro: a.edge_properties.into(),
            entity_pro: a.entity_properties.into(),
            pros: a.total_properties.into(),
        }
    }
}

pub type GraphTotalsResponse = Res<GraphTotalsDto>;
pub type GraphPropertiesResponse = Res<GraphPropertiesDto>;
