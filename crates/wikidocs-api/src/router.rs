//! Route definitions for the WikiDocs HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(article_routes())
        .merge(category_routes())
        .merge(tag_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Article CRUD and listing
fn article_routes() -> Router<AppState> {
    Router::new()
        .route("/articles", get(handlers::articles::list_articles))
        .route("/articles", post(handlers::articles::create_article))
        .route("/articles/all", get(handlers::articles::list_all_articles))
        .route("/articles/{id}", get(handlers::articles::get_article))
        .route("/articles/{id}", put(handlers::articles::update_article))
        .route("/articles/{id}", delete(handlers::articles::delete_article))
        .route(
            "/articles/{id}/exists",
            get(handlers::articles::article_exists),
        )
}

/// Category CRUD and listing
fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(handlers::categories::list_categories))
        .route("/categories", post(handlers::categories::create_category))
        .route(
            "/categories/all",
            get(handlers::categories::list_all_categories),
        )
        .route("/categories/{id}", get(handlers::categories::get_category))
        .route(
            "/categories/{id}",
            put(handlers::categories::update_category),
        )
        .route(
            "/categories/{id}",
            delete(handlers::categories::delete_category),
        )
        .route(
            "/categories/{id}/exists",
            get(handlers::categories::category_exists),
        )
}

/// Tag CRUD and listing
fn tag_routes() -> Router<AppState> {
    Router::new()
        .route("/tags", get(handlers::tags::list_tags))
        .route("/tags", post(handlers::tags::create_tag))
        .route("/tags/all", get(handlers::tags::list_all_tags))
        .route("/tags/{id}", get(handlers::tags::get_tag))
        .route("/tags/{id}", put(handlers::tags::update_tag))
        .route("/tags/{id}", delete(handlers::tags::delete_tag))
        .route("/tags/{id}/exists", get(handlers::tags::tag_exists))
}

/// Health check endpoint
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::{HeaderValue, Method};
    use tower_http::cors::Any;

    let allowed = &state.config.server.allowed_origins;

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    if allowed.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed.iter().filter_map(|o| o.parse().ok()).collect();
        cors = cors.allow_origin(origins);
    }

    cors
}
