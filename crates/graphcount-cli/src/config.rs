use clap::{Parser, Subcommand};
use std::sync::LazyLock;

use graphcount_core::DEFAULT_ROLLUP_KEY;

static VERSION_INFO: LazyLock<String> = LazyLock::new(|| {
    let version = env!("CARGO_PKG_VERSION");

    let commit = option_env!("VERGEN_GIT_SHA")
        .map(|s| s.chars().take(7).collect::<String>())
        .unwrap_or_else(|| "unknown".to_string());

    let built = option_env!("VERGEN_BUILD_DATE").unwrap_or("unknown");
    let target = option_env!("VERGEN_CARGO_TARGET_TRIPLE").unwrap_or("unknown");
    let rustc = option_env!("VERGEN_RUSTC_SEMVER").unwrap_or("unknown");

    format!("{version}\ncommit: {commit}\nbuilt: {built}\ntarget: {target}\nrustc: {rustc}")
});

pub fn version_info() -> &'static str {
    &VERSION_INFO
}

/// CLI configuration parsed from command line arguments and environment variables
#[derive(Parser, Debug)]
#[command(name = "graphcount")]
#[command(
    author,
    version = version_info(),
    about = "Entity, edge and property statistics for hosted graphs"
)]
#[command(after_help = "Examples:
  graphcount refresh --ttl 3600
  graphcount cached
  graphcount graph 17 --detailed
  graphcount --json rollup")]
pub struct Config {
    /// PostgreSQL connection URL of the graph catalog
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Redis URL of the rollup cache
    #[arg(long, env = "REDIS_URL", default_value = "redis://127.0.0.1:6379/0")]
    pub redis_url: String,

    /// Redis key holding the precomputed rollup
    #[arg(long, env = "ROLLUP_CACHE_KEY", default_value = DEFAULT_ROLLUP_KEY)]
    pub cache_key: String,

    /// Graph engine used for graphs whose catalog entry has no engine URL
    #[arg(long, env = "GRAPH_ENGINE_URL")]
    pub engine_url: Option<String>,

    /// Print results as JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the fleet rollup and publish it to the rollup cache
    Refresh {
        /// Expire the cached rollup after this many seconds
        #[arg(long, value_name = "SECONDS")]
        ttl: Option<u64>,
    },
    /// Compute the fleet rollup and print it without caching
    Rollup,
    /// Print the rollup currently held by the cache
    Cached,
    /// Show statistics for a single graph
    #[command(after_help = "Example: graphcount graph 17 --detailed")]
    Graph {
        /// Graph id from the catalog
        #[arg(value_name = "ID")]
        graph_id: String,
        /// Show arity-weighted property counts instead of simple totals
        #[arg(short, long)]
        detailed: bool,
    },
}
