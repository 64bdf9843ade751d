//! Domain models for graph statistics.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Identifier of a graph, assigned by the catalog at graph creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphId(i64);

impl GraphId {
    /// Wraps a raw catalog id.
    ///
    /// Returns `None` for negative values, which the catalog never assigns.
    pub fn new(id: i64) -> Option<Self> {
        (id >= 0).then_some(Self(id))
    }

    /// Parses a graph id from a request path segment.
    ///
    /// Only non-empty strings of ASCII digits that fit in `i64` are accepted,
    /// so signs, whitespace and decimal points are all rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use graphcount_core::GraphId;
    ///
    /// assert_eq!(GraphId::parse("17").unwrap().get(), 17);
    /// assert!(GraphId::parse("abc").is_err());
    /// assert!(GraphId::parse("-1").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AppError::InvalidGraphId(raw.to_string()));
        }
        raw.parse::<i64>()
            .map(Self)
            .map_err(|_| AppError::InvalidGraphId(raw.to_string()))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A graph as described by the metadata catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct GraphRecord {
    pub id: i64,
    pub name: String,
    /// Name of the database holding the graph inside the graph engine.
    pub db_name: Option<String>,
    /// Catalog id of the graph engine instance.
    pub graph_db_id: Option<i64>,
    /// Base URL of the graph engine instance, when the catalog knows it.
    pub engine_url: Option<String>,
}

impl GraphRecord {
    /// Returns the backing database name, treating blank names as unassigned.
    pub fn assigned_db_name(&self) -> Option<&str> {
        self.db_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Full answer of the graph engine's count query.
///
/// `entity_count` and `edge_count` are reported by the engine but not used
/// by the aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineCounts {
    pub edges: u64,
    pub entities: u64,
    #[serde(default)]
    pub name2count: HashMap<String, u64>,
    #[serde(default)]
    pub entity_count: u64,
    #[serde(default)]
    pub edge_count: u64,
    #[serde(default)]
    pub edge2pros: HashMap<String, u64>,
    #[serde(default)]
    pub entity2pros: HashMap<String, u64>,
}

/// Raw per-graph counts consumed by the aggregators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCounts {
    pub edge_total: u64,
    pub entity_total: u64,
    /// Instance count per entity or edge type name.
    pub type_instance_counts: HashMap<String, u64>,
    /// Declared properties per instance, per edge type name.
    pub edge_property_arity: HashMap<String, u64>,
    /// Declared properties per instance, per entity type name.
    pub entity_property_arity: HashMap<String, u64>,
}

impl RawCounts {
    /// Sums `instances × arity` over the type names present in both
    /// `type_instance_counts` and `arity`.
    ///
    /// Types known to only one of the two maps contribute nothing. The sum
    /// saturates at `u64::MAX`.
    pub fn weighted_properties(&self, arity: &HashMap<String, u64>) -> u64 {
        arity
            .iter()
            .filter_map(|(type_name, per_instance)| {
                self.type_instance_counts
                    .get(type_name)
                    .map(|instances| instances.saturating_mul(*per_instance))
            })
            .fold(0, u64::saturating_add)
    }

    pub fn edge_properties(&self) -> u64 {
        self.weighted_properties(&self.edge_property_arity)
    }

    pub fn entity_properties(&self) -> u64 {
        self.weighted_properties(&self.entity_property_arity)
    }
}

impl From<EngineCounts> for RawCounts {
    fn from(c: EngineCounts) -> Self {
        Self {
            edge_total: c.edges,
            entity_total: c.entities,
            type_instance_counts: c.name2count,
            edge_property_arity: c.edge2pros,
            entity_property_arity: c.entity2pros,
        }
    }
}

/// How the raw counts behind an aggregate were obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CountSource {
    /// The graph engine answered the count query.
    Counted,
    /// The graph has no backing database (or no catalog entry); counts are zero.
    Unassigned,
    /// The graph engine faulted; counts were replaced by zeros.
    Recovered { reason: String },
    /// The catalog lookup for the graph failed; counts were replaced by zeros.
    CatalogUnavailable { reason: String },
}

impl CountSource {
    pub fn is_counted(&self) -> bool {
        matches!(self, Self::Counted)
    }
}

/// Raw counts for one graph together with their provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountSnapshot {
    pub counts: RawCounts,
    pub source: CountSource,
}

impl CountSnapshot {
    pub fn counted(counts: RawCounts) -> Self {
        Self {
            counts,
            source: CountSource::Counted,
        }
    }

    pub fn unassigned() -> Self {
        Self {
            counts: RawCounts::default(),
            source: CountSource::Unassigned,
        }
    }

    pub fn recovered(reason: impl Into<String>) -> Self {
        Self {
            counts: RawCounts::default(),
            source: CountSource::Recovered {
                reason: reason.into(),
            },
        }
    }

    pub fn catalog_unavailable(reason: impl Into<String>) -> Self {
        Self {
            counts: RawCounts::default(),
            source: CountSource::CatalogUnavailable {
                reason: reason.into(),
            },
        }
    }
}

/// Arity-weighted statistics for a single graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphAggregate {
    pub edges: u64,
    pub entities: u64,
    pub edge_properties: u64,
    pub entity_properties: u64,
    /// Always `edge_properties + entity_properties`, saturating at `u64::MAX`.
    pub total_properties: u64,
    pub source: CountSource,
}

impl From<CountSnapshot> for GraphAggregate {
    fn from(snapshot: CountSnapshot) -> Self {
        let edge_properties = snapshot.counts.edge_properties();
        let entity_properties = snapshot.counts.entity_properties();
        Self {
            edges: snapshot.counts.edge_total,
            entities: snapshot.counts.entity_total,
            edge_properties,
            entity_properties,
            total_properties: edge_properties.saturating_add(entity_properties),
            source: snapshot.source,
        }
    }
}

/// Simple totals for a single graph, as used by the fleet rollup.
///
/// Unlike [`GraphAggregate`], `properties` here is `edges + entities`
/// (saturating at `u64::MAX`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimpleTotals {
    pub edges: u64,
    pub entities: u64,
    pub properties: u64,
    pub source: CountSource,
}

impl From<CountSnapshot> for SimpleTotals {
    fn from(snapshot: CountSnapshot) -> Self {
        let edges = snapshot.counts.edge_total;
        let entities = snapshot.counts.entity_total;
        Self {
            edges,
            entities,
            properties: edges.saturating_add(entities),
            source: snapshot.source,
        }
    }
}

/// Fleet-wide rollup over every graph in the catalog.
///
/// This is also the JSON document stored in the rollup cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetAggregate {
    pub entities: u64,
    pub edges: u64,
    pub pro: u64,
    /// Mirrors `pro`; kept for clients that read it.
    pub all: u64,
}

impl FleetAggregate {
    pub fn new(entities: u64, edges: u64, properties: u64) -> Self {
        Self {
            entities,
            edges,
            pro: properties,
            all: properties,
        }
    }
}
