//! Test utilities for integration tests.
//!
//! Provides helpers to start an isolated PostgreSQL container with the
//! catalog schema applied, and to seed catalog rows.

use graphcount_db::CATALOG_SCHEMA;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use testcontainers::core::{ContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};

/// Sets up a PostgreSQL container and returns a connection pool.
///
/// The container is cleaned up when the returned `ContainerAsync` is dropped,
/// so keep it alive for the duration of the test.
pub async fn setup_test_db() -> (PgPool, ContainerAsync<GenericImage>) {
    let container = GenericImage::new("postgres", "16-alpine")
        .with_exposed_port(ContainerPort::Tcp(5432))
        .with_wait_for(WaitFor::message_on_stderr(
            "database system is ready to accept connections",
        ))
        .with_env_var("POSTGRES_PASSWORD", "postgres")
        .with_env_var("POSTGRES_DB", "postgres")
        .start()
        .await
        .expect("Failed to start PostgreSQL container");

    let host = container.get_host().await.expect("Failed to get host");
    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get port");

    let connection_string = format!("postgresql://postgres:postgres@{}:{}/postgres", host, port);

    // The server logs readiness once before its init restart; retry until it accepts us.
    const MAX_RETRIES: u32 = 30;
    let mut retries = 0;
    let pool = loop {
        match PgPoolOptions::new()
            .max_connections(5)
            .connect(&connection_string)
            .await
        {
            Ok(pool) => break pool,
            Err(e) => {
                retries += 1;
                if retries >= MAX_RETRIES {
                    panic!(
                        "Failed to connect to database after {} retries: {}",
                        MAX_RETRIES, e
                    );
                }
                tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            }
        }
    };

    sqlx::raw_sql(CATALOG_SCHEMA)
        .execute(&pool)
        .await
        .expect("Failed to apply catalog schema");

    (pool, container)
}

/// Inserts a graph engine instance and returns its id.
pub async fn insert_engine(pool: &PgPool, name: &str, engine_url: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO graph_db (name, engine_url) VALUES ($1, $2) RETURNING id")
        .bind(name)
        .bind(engine_url)
        .fetch_one(pool)
        .await
        .expect("Failed to insert graph_db row")
}

/// Inserts a graph and returns its id.
pub async fn insert_graph(
    pool: &PgPool,
    name: &str,
    db_name: Option<&str>,
    graph_db_id: Option<i64>,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO graph_config (graph_name, db_name, graph_db_id) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(name)
    .bind(db_name)
    .bind(graph_db_id)
    .fetch_one(pool)
    .await
    .expect("Failed to insert graph_config row")
}
