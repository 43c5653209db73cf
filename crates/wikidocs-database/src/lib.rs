//! # wikidocs-database
//!
//! PostgreSQL connection management, the specification evaluator, and
//! the generic repository used by every WikiDocs entity. Relation
//! hydration helpers for articles live in [`relations`].

pub mod connection;
pub mod evaluator;
pub mod migration;
pub mod relations;
pub mod repository;

pub use connection::DatabasePool;
pub use repository::Repository;
