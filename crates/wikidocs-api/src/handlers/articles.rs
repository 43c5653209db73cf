//! Article CRUD handlers.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;

use wikidocs_core::types::pagination::PageResponse;
use wikidocs_service::article::{ArticleQuery, ArticleResponse, CreateArticleRequest, UpdateArticleRequest};

use crate::dto::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

use super::{parse_id_list, parse_part_name, parse_sort_order, parse_u64, request_context};

fn query_from_params(params: &HashMap<String, String>) -> Result<ArticleQuery, ApiError> {
    Ok(ArticleQuery {
        page: parse_u64(params, "page")?,
        page_size: parse_u64(params, "page_size")?,
        sorting: parse_sort_order(params)?,
        part_name: parse_part_name(params),
        category_ids: parse_id_list(params, "category_ids")?,
        tag_ids: parse_id_list(params, "tag_ids")?,
    })
}

/// GET /api/articles
pub async fn list_articles(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ApiResponse<PageResponse<ArticleResponse>>>, ApiError> {
    let query = query_from_params(&params)?;
    let page = state.article_service.get_paged(&query).await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/articles/all
pub async fn list_all_articles(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ApiResponse<Vec<ArticleResponse>>>, ApiError> {
    let query = query_from_params(&params)?;
    let articles = state.article_service.get_many(&query).await?;
    Ok(Json(ApiResponse::ok(articles)))
}

/// GET /api/articles/{id}
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ArticleResponse>>, ApiError> {
    let article = state.article_service.get_by_id(id).await?;
    Ok(Json(ApiResponse::ok(article)))
}

/// POST /api/articles
pub async fn create_article(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateArticleRequest>,
) -> Result<Json<ApiResponse<ArticleResponse>>, ApiError> {
    let ctx = request_context(&headers);
    let article = state.article_service.create(&ctx, req).await?;
    Ok(Json(ApiResponse::created(article)))
}

/// PUT /api/articles/{id}
pub async fn update_article(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(req): Json<UpdateArticleRequest>,
) -> Result<Json<ApiResponse<ArticleResponse>>, ApiError> {
    let ctx = request_context(&headers);
    let article = state.article_service.update(&ctx, id, req).await?;
    Ok(Json(ApiResponse::ok(article)))
}

/// DELETE /api/articles/{id}
pub async fn delete_article(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.article_service.delete_by_id(id).await?;
    Ok(Json(ApiResponse::ok(())))
}

/// GET /api/articles/{id}/exists
pub async fn article_exists(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    let exists = state.article_service.exists(id).await?;
    Ok(Json(ApiResponse::ok(exists)))
}
