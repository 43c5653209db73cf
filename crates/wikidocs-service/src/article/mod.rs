//! Article domain service.

pub mod query;
pub mod service;

pub use query::{ArticleQuery, ArticleSortKey, SortOrder};
pub use service::{ArticleResponse, ArticleService, CreateArticleRequest, UpdateArticleRequest};
