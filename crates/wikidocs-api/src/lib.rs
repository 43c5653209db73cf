//! # wikidocs-api
//!
//! HTTP layer for WikiDocs: axum handlers, router, shared state, the
//! uniform result envelope, and error-to-response mapping. Handlers stay
//! mapping-only; all domain logic lives in `wikidocs-service`.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
