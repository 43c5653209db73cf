//! # wikidocs-service
//!
//! Domain services for WikiDocs. Services validate requests, stamp audit
//! fields from the request context, translate request-field filters onto
//! entity columns, and delegate persistence to the generic repository.

pub mod article;
pub mod category;
pub mod context;
pub mod tag;

pub use context::RequestContext;
