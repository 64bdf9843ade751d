//! graphcount DB - Metadata catalog repository for PostgreSQL
//!
//! This crate provides the repository that lists graphs and resolves the
//! graph engine instance hosting each one.
//!
//! # Overview
//!
//! - [`GraphRepository`] - implements [`graphcount_core::GraphCatalog`]

mod repository;

pub use repository::GraphRepository;

/// SQL schema of the catalog tables, applied by deployments and tests.
pub const CATALOG_SCHEMA: &str = include_str!("../migrations/0001_catalog.sql");
