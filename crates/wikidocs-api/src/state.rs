//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use wikidocs_core::config::AppConfig;
use wikidocs_service::article::ArticleService;
use wikidocs_service::category::CategoryService;
use wikidocs_service::tag::TagService;

/// Application state containing all shared dependencies.
///
/// Passed to every axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Article service.
    pub article_service: Arc<ArticleService>,
    /// Category service.
    pub category_service: Arc<CategoryService>,
    /// Tag service.
    pub tag_service: Arc<TagService>,
}
