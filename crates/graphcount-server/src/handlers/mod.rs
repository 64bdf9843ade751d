//! HTTP request handlers for API endpoints.

pub mod graph_count;
pub mod health;
