//! Trait definitions for external collaborators.
//!
//! The aggregation services never talk to PostgreSQL, the graph engine or
//! Redis directly. They depend on these traits instead, which keeps them
//! testable with in-memory mocks and lets the server and the CLI plug in the
//! concrete implementations from `graphcount-db` and `graphcount-client`.
//!
//! # Example
//!
//! ```
//! use graphcount_core::traits::GraphCatalog;
//! use graphcount_core::AppError;
//!
//! async fn graph_names<C: GraphCatalog>(catalog: &C) -> Result<Vec<String>, AppError> {
//!     let graphs = catalog.list_all_graphs().await?;
//!     Ok(graphs.into_iter().map(|g| g.name).collect())
//! }
//! ```

use std::future::Future;

use crate::{AppError, EngineCounts, FleetAggregate, GraphId, GraphRecord};

/// Metadata catalog listing every graph and its backing database.
pub trait GraphCatalog: Send + Sync + Clone {
    /// Lists every graph known to the catalog, ordered by id.
    fn list_all_graphs(&self) -> impl Future<Output = Result<Vec<GraphRecord>, AppError>> + Send;

    /// Retrieves a single graph, or `None` if the id is unknown.
    fn get_graph_by_id(
        &self,
        id: GraphId,
    ) -> impl Future<Output = Result<Option<GraphRecord>, AppError>> + Send;

    /// Checks whether the catalog knows the given graph id.
    fn graph_exists(&self, id: GraphId) -> impl Future<Output = Result<bool, AppError>> + Send;

    /// Checks that the catalog backend is reachable.
    ///
    /// Catalogs without a remote backend keep the default, which always succeeds.
    fn health_check(&self) -> impl Future<Output = Result<(), AppError>> + Send {
        async { Ok(()) }
    }
}

/// Source of raw counts for a graph, backed by the graph engine.
pub trait GraphCountProvider: Send + Sync + Clone {
    /// Runs the engine's count query for the graph's backing database.
    ///
    /// # Arguments
    ///
    /// * `graph` - The catalog record; its database name is already known to be assigned
    /// * `db_name` - The database to count inside the engine
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ProviderError`] when the engine answers with a
    /// non-success status. Any other error is treated as a provider fault.
    fn count(
        &self,
        graph: &GraphRecord,
        db_name: &str,
    ) -> impl Future<Output = Result<EngineCounts, AppError>> + Send;
}

/// Read access to the precomputed fleet rollup.
///
/// The rollup is written by an out-of-band refresh job; the core only reads.
pub trait StatsCache: Send + Sync + Clone {
    /// Returns the last published rollup.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CacheUnavailable`] when the cache is unreachable
    /// or holds no rollup.
    fn read_rollup(&self) -> impl Future<Output = Result<FleetAggregate, AppError>> + Send;
}
