use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use graphcount_client::{GraphEngineClient, RedisStatsCache};
use graphcount_cli::{Command, Config};
use graphcount_core::{
    AppError, CacheConfig, CountSource, DbConfig, FleetAggregate, GraphAggregate,
    GraphStatsService, SimpleTotals, StatsCache,
};
use graphcount_db::GraphRepository;

type StatsService = GraphStatsService<GraphRepository, GraphEngineClient, RedisStatsCache>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let config = Config::parse();

    let cache_config = CacheConfig::with_url(&config.redis_url)
        .with_key(&config.cache_key)
        .map_err(user_error)?;
    let cache = RedisStatsCache::new(&cache_config).map_err(user_error)?;

    match config.command {
        Command::Cached => {
            let rollup = cache.read_rollup().await.map_err(user_error)?;
            print_rollup(&rollup, "Cached rollup", config.json)?;
        }
        Command::Refresh { ttl } => {
            let stats_service = connect_service(&config, cache.clone()).await?;
            let rollup = stats_service.fleet_rollup().await.map_err(user_error)?;
            cache
                .publish_rollup(&rollup, ttl.map(Duration::from_secs))
                .await
                .map_err(user_error)?;
            print_rollup(&rollup, "Published rollup", config.json)?;
            if !config.json {
                println!("  Cache key:             {}", cache.key());
                println!();
            }
        }
        Command::Rollup => {
            let stats_service = connect_service(&config, cache).await?;
            let rollup = stats_service.fleet_rollup().await.map_err(user_error)?;
            print_rollup(&rollup, "Fleet rollup", config.json)?;
        }
        Command::Graph {
            ref graph_id,
            detailed,
        } => {
            let stats_service = connect_service(&config, cache).await?;
            if detailed {
                let aggregate = stats_service
                    .graph_properties(graph_id)
                    .await
                    .map_err(user_error)?;
                print_aggregate(graph_id, &aggregate, config.json)?;
            } else {
                let totals = stats_service
                    .graph_totals(graph_id)
                    .await
                    .map_err(user_error)?;
                print_totals(graph_id, &totals, config.json)?;
            }
        }
    }

    Ok(())
}

/// Connects to the catalog and wires the statistics service.
async fn connect_service(config: &Config, cache: RedisStatsCache) -> anyhow::Result<StatsService> {
    info!("Connecting to database...");
    let db_config = DbConfig::default();
    let pool = PgPoolOptions::new()
        .max_connections(db_config.max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    let repo = GraphRepository::new(pool);
    let engine = GraphEngineClient::new(config.engine_url.as_deref()).map_err(user_error)?;

    Ok(GraphStatsService::new(repo, engine, cache))
}

fn user_error(err: AppError) -> anyhow::Error {
    anyhow::anyhow!(err.user_message())
}

fn print_rollup(rollup: &FleetAggregate, title: &str, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(rollup)?);
        return Ok(());
    }

    println!("\n{}\n", title);
    println!("  Entities:              {}", rollup.entities);
    println!("  Edges:                 {}", rollup.edges);
    println!("  Properties:            {}", rollup.pro);
    println!();
    Ok(())
}

fn print_totals(graph_id: &str, totals: &SimpleTotals, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(totals)?);
        return Ok(());
    }

    println!("\nGraph {}\n", graph_id);
    println!("  Entities:              {}", totals.entities);
    println!("  Edges:                 {}", totals.edges);
    println!("  Properties:            {}", totals.properties);
    print_source(&totals.source);
    println!();
    Ok(())
}

fn print_aggregate(graph_id: &str, aggregate: &GraphAggregate, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(aggregate)?);
        return Ok(());
    }

    println!("\nGraph {} (arity-weighted)\n", graph_id);
    println!("  Entities:              {}", aggregate.entities);
    println!("  Edges:                 {}", aggregate.edges);
    println!("  Entity properties:     {}", aggregate.entity_properties);
    println!("  Edge properties:       {}", aggregate.edge_properties);
    println!("  Total properties:      {}", aggregate.total_properties);
    print_source(&aggregate.source);
    println!();
    Ok(())
}

fn print_source(source: &CountSource) {
    match source {
        CountSource::Counted => {}
        CountSource::Unassigned => {
            println!("  Note:                  graph has no backing database");
        }
        CountSource::Recovered { reason } => {
            println!("  Note:                  engine fault, counts zeroed ({})", reason);
        }
        CountSource::CatalogUnavailable { reason } => {
            println!("  Note:                  catalog lookup failed, counts zeroed ({})", reason);
        }
    }
}
