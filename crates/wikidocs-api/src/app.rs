//! Application builder — wires repositories, services, and router into
//! a running Axum app.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use wikidocs_core::config::AppConfig;
use wikidocs_core::error::AppError;
use wikidocs_database::relations::ArticleRelations;
use wikidocs_database::Repository;
use wikidocs_entity::{Article, Category, Tag};
use wikidocs_service::article::ArticleService;
use wikidocs_service::category::CategoryService;
use wikidocs_service::tag::TagService;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the application state from configuration and a connected pool.
pub fn build_state(config: AppConfig, db_pool: PgPool) -> AppState {
    let articles = Arc::new(Repository::<Article>::new(db_pool.clone()));
    let categories = Arc::new(Repository::<Category>::new(db_pool.clone()));
    let tags = Arc::new(Repository::<Tag>::new(db_pool.clone()));
    let relations = Arc::new(ArticleRelations::new(db_pool.clone()));

    let article_service = Arc::new(ArticleService::new(
        Arc::clone(&articles),
        Arc::clone(&categories),
        Arc::clone(&tags),
        Arc::clone(&relations),
    ));
    let category_service = Arc::new(CategoryService::new(Arc::clone(&categories)));
    let tag_service = Arc::new(TagService::new(Arc::clone(&tags)));

    AppState {
        config: Arc::new(config),
        db_pool,
        article_service,
        category_service,
        tag_service,
    }
}

/// Builds the complete Axum application.
pub fn build_app(config: AppConfig, db_pool: PgPool) -> Router {
    build_router(build_state(config, db_pool))
}

/// Runs the WikiDocs server with the given configuration and pool.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = build_app(config, db_pool);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("WikiDocs server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to install Ctrl+C handler: {}", e);
    }
}
