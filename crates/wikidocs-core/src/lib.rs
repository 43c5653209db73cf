//! # wikidocs-core
//!
//! Core crate for WikiDocs. Contains the entity trait, configuration
//! schemas, pagination/sorting/filter types, the query specification,
//! the request-field mapping layer, and the unified error system.
//!
//! This crate has **no** internal dependencies on other WikiDocs crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
