//! graphcount Server - REST API for graph statistics
//!
//! This crate exposes the statistics computed by `graphcount-core` over HTTP:
//!
//! - **Rollup**: the precomputed fleet-wide totals read from the cache
//! - **Graph totals**: simple totals for a single graph
//! - **Graph properties**: arity-weighted property counts for a single graph
//!
//! Every failure is rendered as `{cause, status, message, code}`; see
//! [`ApiError`].

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use router::create_router;
pub use state::AppState;
