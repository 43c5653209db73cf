//! Category CRUD handlers.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;

use wikidocs_core::types::pagination::PageResponse;
use wikidocs_service::category::{
    CategoryQuery, CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest,
};

use crate::dto::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

use super::{parse_part_name, parse_sort_order, parse_u64, request_context};

fn query_from_params(params: &HashMap<String, String>) -> Result<CategoryQuery, ApiError> {
    Ok(CategoryQuery {
        page: parse_u64(params, "page")?,
        page_size: parse_u64(params, "page_size")?,
        sorting: parse_sort_order(params)?,
        part_name: parse_part_name(params),
    })
}

/// GET /api/categories
pub async fn list_categories(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ApiResponse<PageResponse<CategoryResponse>>>, ApiError> {
    let query = query_from_params(&params)?;
    let page = state.category_service.get_paged(&query).await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/categories/all
pub async fn list_all_categories(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ApiResponse<Vec<CategoryResponse>>>, ApiError> {
    let query = query_from_params(&params)?;
    let categories = state.category_service.get_many(&query).await?;
    Ok(Json(ApiResponse::ok(categories)))
}

/// GET /api/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<CategoryResponse>>, ApiError> {
    let category = state.category_service.get_by_id(id).await?;
    Ok(Json(ApiResponse::ok(category)))
}

/// POST /api/categories
pub async fn create_category(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<Json<ApiResponse<CategoryResponse>>, ApiError> {
    let ctx = request_context(&headers);
    let category = state.category_service.create(&ctx, req).await?;
    Ok(Json(ApiResponse::created(category)))
}

/// PUT /api/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(req): Json<UpdateCategoryRequest>,
) -> Result<Json<ApiResponse<CategoryResponse>>, ApiError> {
    let ctx = request_context(&headers);
    let category = state.category_service.update(&ctx, id, req).await?;
    Ok(Json(ApiResponse::ok(category)))
}

/// DELETE /api/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.category_service.delete_by_id(id).await?;
    Ok(Json(ApiResponse::ok(())))
}

/// GET /api/categories/{id}/exists
pub async fn category_exists(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    let exists = state.category_service.exists(id).await?;
    Ok(Json(ApiResponse::ok(exists)))
}
