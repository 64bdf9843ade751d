use clap::Parser;

use graphcount_core::DEFAULT_ROLLUP_KEY;

/// Server configuration parsed from command line arguments and environment variables
#[derive(Parser, Debug, Clone)]
#[command(name = "graphcount-server")]
#[command(author, version, about = "REST API server for graph statistics")]
pub struct ServerConfig {
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

    /// Maximum number of catalog database connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value = "10")]
    pub db_max_connections: u32,

    /// Server port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    pub port: u16,

    /// Server host to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Allowed CORS origins, comma-separated, or "*" for any
    #[arg(long, env = "CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Requests per second allowed per client IP (0 disables rate limiting)
    #[arg(long, env = "RATE_LIMIT_RPS", default_value = "10")]
    pub rate_limit_rps: u32,

    /// Burst size for the per-IP rate limiter
    #[arg(long, env = "RATE_LIMIT_BURST", default_value = "30")]
    pub rate_limit_burst: u32,
}
