//! graphcount Core - Domain types, aggregation logic, and services.
//!
//! This crate computes entity, edge and property statistics for the graphs
//! hosted by an external graph engine:
//!
//! - **Domain models**: [`GraphId`], [`RawCounts`], [`GraphAggregate`], [`SimpleTotals`], [`FleetAggregate`]
//! - **Aggregation**: [`GraphAggregator`] for one graph, [`FleetAggregator`] for the whole catalog
//! - **Services**: [`GraphStatsService`] used by the HTTP server and the CLI
//! - **Traits**: [`GraphCatalog`], [`GraphCountProvider`], [`StatsCache`] for dependency injection
//!
//! # Architecture
//!
//! Aggregation logic is decoupled from I/O through traits:
//!
//! - [`GraphCatalog`] - the metadata catalog (PostgreSQL in `graphcount-db`)
//! - [`GraphCountProvider`] - the graph engine's count query (HTTP in `graphcount-client`)
//! - [`StatsCache`] - the precomputed rollup (Redis in `graphcount-client`)
//!
//! # Example
//!
//! ```ignore
//! use graphcount_core::GraphStatsService;
//!
//! let service = GraphStatsService::new(catalog, engine, cache);
//! let totals = service.graph_totals("17").await?;
//! let rollup = service.cached_rollup().await?;
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod fleet;
pub mod models;
pub mod stats;
pub mod traits;

// Configuration
pub use config::{CacheConfig, DEFAULT_ROLLUP_KEY, DbConfig, HttpConfig};

// Error handling
pub use error::AppError;

// Domain models
pub use models::{
    CountSnapshot, CountSource, EngineCounts, FleetAggregate, GraphAggregate, GraphId,
    GraphRecord, RawCounts, SimpleTotals,
};

// Traits for dependency injection
pub use traits::{GraphCatalog, GraphCountProvider, StatsCache};

// Services (generic over trait implementations)
pub use aggregate::GraphAggregator;
pub use fleet::FleetAggregator;
pub use stats::GraphStatsService;
