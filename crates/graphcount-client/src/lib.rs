//! graphcount Client - clients for the external services behind the statistics
//!
//! This crate provides:
//!
//! - [`engine`] - HTTP client for the graph engine's count query
//! - [`cache`] - Redis-backed store for the precomputed fleet rollup
//!
//! Both implement the corresponding `graphcount_core::traits` so they can be
//! plugged into `GraphStatsService`.

pub mod cache;
pub mod engine;

// Re-export main client types
pub use cache::RedisStatsCache;
pub use engine::GraphEngineClient;
