//! Graph catalog repository for PostgreSQL.

use graphcount_core::error::AppError;
use graphcount_core::models::{GraphId, GraphRecord};
use graphcount_core::traits::GraphCatalog;
use sqlx::{PgPool, Pool, Postgres};

/// SELECT clause shared by catalog lookups. Must remain a const literal to
/// ensure SQL safety since format!() bypasses sqlx compile-time validation.
const GRAPH_SELECT: &str = "SELECT g.id, g.graph_name AS name, g.db_name, g.graph_db_id, d.engine_url FROM graph_config g LEFT JOIN graph_db d ON d.id = g.graph_db_id";

/// Repository over the `graph_config` and `graph_db` catalog tables.
///
/// # Examples
///
/// ```no_run
/// use sqlx::postgres::PgPoolOptions;
/// use graphcount_db::GraphRepository;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = PgPoolOptions::new()
///     .max_connections(5)
///     .connect("postgresql://localhost/graphcount")
///     .await?;
///
/// let repo = GraphRepository::new(pool);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GraphRepository {
    pool: Pool<Postgres>,
}

impl GraphRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists every graph with its engine endpoint, ordered by id.
    pub async fn list_all(&self) -> Result<Vec<GraphRecord>, AppError> {
        let query = format!("{} ORDER BY g.id", GRAPH_SELECT);
        let graphs = sqlx::query_as::<_, GraphRecord>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::DatabaseError)?;

        Ok(graphs)
    }

    /// Retrieves a graph by id.
    pub async fn get(&self, id: GraphId) -> Result<Option<GraphRecord>, AppError> {
        let query = format!("{} WHERE g.id = $1", GRAPH_SELECT);
        let graph = sqlx::query_as::<_, GraphRecord>(&query)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::DatabaseError)?;

        Ok(graph)
    }

    /// Returns true if a graph with this id exists.
    pub async fn exists(&self, id: GraphId) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM graph_config WHERE id = $1)")
                .bind(id.get())
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::DatabaseError)?;

        Ok(exists)
    }

    /// Checks database connectivity by executing a simple query.
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(AppError::DatabaseError)?;
        Ok(())
    }
}

impl GraphCatalog for GraphRepository {
    async fn list_all_graphs(&self) -> Result<Vec<GraphRecord>, AppError> {
        self.list_all().await
    }

    async fn get_graph_by_id(&self, id: GraphId) -> Result<Option<GraphRecord>, AppError> {
        self.get(id).await
    }

    async fn graph_exists(&self, id: GraphId) -> Result<bool, AppError> {
        self.exists(id).await
    }

    async fn health_check(&self) -> Result<(), AppError> {
        GraphRepository::health_check(self).await
    }
}
