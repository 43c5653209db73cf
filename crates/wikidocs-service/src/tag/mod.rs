//! Tag domain service.

pub mod service;

pub use service::{CreateTagRequest, TagQuery, TagResponse, TagService, UpdateTagRequest};
